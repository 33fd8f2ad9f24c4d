//! Iterative SAXPY (`y <- y + a * x`) over a fixed set of worker threads.
//!
//! Each iteration splits the vectors into contiguous ranges, one per worker. Workers
//! update their own range of `y` and reduce its sum into the iteration's average,
//! the only state they share. An iteration starts once the previous one fully
//! finished.

pub mod config;
pub mod error;
pub mod execution;
pub mod initialization;
pub mod partition;
pub mod reduction;
pub mod report;
pub mod worker;

pub use config::{PoolKind, SaxpyConfig};
pub use error::{Result, SaxpyErr};
pub use execution::{Driver, DriverState, SaxpyOutput};
pub use initialization::SaxpyInput;
pub use report::Report;

use crate::{execution::SelectedExec, partition::Partitioner};

/// Builds the driver described by `config`, worker pool included.
///
/// Everything a run needs besides its input is allocated here, so timing
/// `Driver::run` only measures the iterations.
pub fn driver(config: &SaxpyConfig) -> Result<Driver<SelectedExec>> {
    config.validate()?;

    let partitioner = Partitioner::new(config.size, config.threads);
    let executor = SelectedExec::new(config.pool, config.threads)?;
    Ok(Driver::new(partitioner, config.iterations, executor))
}

/// Runs every iteration described by `config` over `input`.
///
/// # Returns
/// A `SizeMismatch` error if `input` isn't `config.size` long, or the error that
/// aborted the run.
pub fn run(config: &SaxpyConfig, input: SaxpyInput) -> Result<SaxpyOutput> {
    driver(config)?.run(input)
}

/// Initializes the input from `config.seed` and runs it.
pub fn run_seeded(config: &SaxpyConfig) -> Result<SaxpyOutput> {
    let input = SaxpyInput::seeded(config.size, config.seed)?;
    run(config, input)
}
