//! Error handling for option resolution

use thiserror::Error;

/// A malformed invocation. Resolution never produces a partial `RunConfig`
/// alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized option [{token}]")]
    UnrecognizedOption { token: String },

    #[error("option [{option}] requires a value")]
    MissingValue { option: String },

    /// Any other rejection from the option parser
    #[error("malformed arguments: {message}")]
    Malformed { message: String },

    #[error("could not initialise logging: {message}")]
    Logging { message: String },
}

impl ConfigError {
    /// Returns the process exit code the binary uses for this error
    pub fn exit_code(&self) -> i32 {
        crate::EXIT_FAILURE
    }

    /// Create an unrecognized option error
    pub fn unrecognized_option(token: &str) -> Self {
        ConfigError::UnrecognizedOption {
            token: token.to_string(),
        }
    }

    /// Create a missing value error
    pub fn missing_value(option: &str) -> Self {
        ConfigError::MissingValue {
            option: option.to_string(),
        }
    }

    /// Create a malformed arguments error
    pub fn malformed(message: &str) -> Self {
        ConfigError::Malformed {
            message: message.to_string(),
        }
    }

    /// Create a logging setup error
    pub fn logging(message: &str) -> Self {
        ConfigError::Logging {
            message: message.to_string(),
        }
    }

    /// The offending argv token, when one can be named
    pub fn token(&self) -> Option<&str> {
        match self {
            ConfigError::UnrecognizedOption { token } => Some(token),
            ConfigError::MissingValue { option } => Some(option),
            ConfigError::Malformed { .. } | ConfigError::Logging { .. } => None,
        }
    }
}

/// Result type for option resolution
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_token() {
        let err = ConfigError::unrecognized_option("-z");
        assert_eq!(err.to_string(), "unrecognized option [-z]");
        assert_eq!(err.token(), Some("-z"));

        let err = ConfigError::missing_value("-k");
        assert!(err.to_string().contains("-k"));
    }

    #[test]
    fn test_exit_code_is_failure() {
        assert_ne!(ConfigError::malformed("bad utf-8").exit_code(), 0);
        assert_eq!(ConfigError::malformed("x").token(), None);
        assert_ne!(ConfigError::logging("x").exit_code(), 0);
        assert_eq!(ConfigError::logging("x").token(), None);
    }
}
