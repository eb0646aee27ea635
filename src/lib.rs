//! Option resolution for the distributed HDF5 group sorter
//!
//! Every rank of a sort job resolves its own argument vector into a
//! [`RunConfig`] that drives the HDF5 reader, the local and distributed sort
//! and the writer. Resolution is a pure function of the arguments and the
//! caller's rank: only rank 0 prints help, and a malformed invocation comes
//! back as [`Resolution::Fatal`] so the caller decides how the group shuts down.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod help;
pub mod logging;
pub mod rank;

// Re-export commonly used types
pub use cli::{resolve, resolve_to, ConfigResolver, Resolution};
pub use config::RunConfig;
pub use error::{ConfigError, ConfigResult};

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
