//! Rank discovery for the executable.
//!
//! MPI launchers export the world rank of each process through the
//! environment. The resolver never looks at these; the binary reads them
//! once and passes the rank in.

use std::env;

/// Variables consulted, in order
pub const RANK_VARIABLES: [&str; 4] = [
    "OMPI_COMM_WORLD_RANK",
    "PMI_RANK",
    "PMIX_RANK",
    "SLURM_PROCID",
];

/// The calling process's rank, or 0 when no launcher variable is set
pub fn detect_rank() -> i32 {
    rank_from(|name| env::var(name).ok())
}

/// Rank from the first launcher variable `lookup` yields a valid integer for
pub fn rank_from<F>(lookup: F) -> i32
where
    F: Fn(&str) -> Option<String>,
{
    RANK_VARIABLES
        .iter()
        .find_map(|name| lookup(name)?.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_leader() {
        assert_eq!(rank_from(|_| None), 0);
    }

    #[test]
    fn test_first_variable_wins() {
        let rank = rank_from(|name| match name {
            "PMI_RANK" => Some("3".to_string()),
            "SLURM_PROCID" => Some("9".to_string()),
            _ => None,
        });
        assert_eq!(rank, 3);
    }

    #[test]
    fn test_skips_garbage() {
        let rank = rank_from(|name| match name {
            "OMPI_COMM_WORLD_RANK" => Some("abc".to_string()),
            "PMIX_RANK" => Some(" 2 ".to_string()),
            _ => None,
        });
        assert_eq!(rank, 2);
    }
}
