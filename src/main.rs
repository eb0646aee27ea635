//! h5group-sorter command line entry point
//!
//! Resolves this rank's options and reports the outcome. The HDF5 reader and
//! the sorter consume the resolved `RunConfig`; this entry point stops there.

use std::process;

use log::{info, warn};

use h5group_sorter::{
    help::PROGRAM_NAME, logging, rank, ConfigResolver, ConfigResult, Resolution, EXIT_SUCCESS,
};

fn main() {
    let result = run();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            println!("{PROGRAM_NAME}: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run() -> ConfigResult<i32> {
    let caller_rank = rank::detect_rank();

    let config = match ConfigResolver::new(caller_rank).resolve(std::env::args_os().skip(1)) {
        Resolution::Resolved(config) => config,
        // Every rank sees -h, so the whole group leaves here together.
        Resolution::HelpRequested => return Ok(EXIT_SUCCESS),
        Resolution::Fatal(e) => return Err(e),
    };

    logging::init_logging(caller_rank, config.verbose)?;

    for warning in config.sanity_warnings() {
        warn!("{warning}");
    }
    info!("run configuration for rank {caller_rank}:\n{config}");

    Ok(EXIT_SUCCESS)
}
