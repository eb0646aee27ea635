//! Console logging for the executable

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{runtime::ConfigErrors, Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use crate::error::{ConfigError, ConfigResult};

/// Level used for a run: `Info` when verbose, `Warn` otherwise
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Build a stderr logging config whose lines carry the process rank.
/// Stdout stays reserved for help text and fatal option messages.
pub fn log_config(rank: i32, level: LevelFilter) -> Result<Config, ConfigErrors> {
    let pattern = format!("[rank {rank}] {{l}} {{t}} - {{m}}{{n}}");
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(&pattern)))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
}

/// Install the global logger. Fails if one is already installed.
pub fn init_logging(rank: i32, verbose: bool) -> ConfigResult<()> {
    let config = log_config(rank, level_for(verbose))
        .map_err(|e| ConfigError::logging(&e.to_string()))?;
    log4rs::init_config(config).map_err(|e| ConfigError::logging(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), LevelFilter::Info);
        assert_eq!(level_for(false), LevelFilter::Warn);
    }

    #[test]
    fn test_second_init_is_an_error() {
        init_logging(0, false).ok();
        assert!(matches!(
            init_logging(0, false),
            Err(ConfigError::Logging { .. })
        ));
    }

    #[test]
    fn test_log_config_builds() {
        let config = log_config(4, LevelFilter::Info).expect("valid logging config");
        assert_eq!(config.root().level(), LevelFilter::Info);
        assert_eq!(config.appenders().len(), 1);
    }
}
