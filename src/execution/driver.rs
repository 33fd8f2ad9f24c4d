use std::num::NonZeroUsize;

use log::{debug, info, warn};
use serde::Serialize;

use super::{Executor, Task};
use crate::{
    error::{Result, SaxpyErr},
    initialization::SaxpyInput,
    partition::Partitioner,
    reduction::Averages,
    worker::Worker,
};

/// The outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaxpyOutput {
    /// `y` after the last iteration.
    pub y: Vec<f64>,
    /// The average of `y` after each iteration.
    pub averages: Vec<f64>,
}

/// Where a `Driver` is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    NotStarted,
    /// Workers of this iteration are being spawned or are running.
    Running(usize),
    Done,
    /// The run stopped at this iteration, nothing it produced is valid.
    Aborted(usize),
}

/// Runs every iteration of the SAXPY update, one barrier per iteration.
pub struct Driver<E: Executor> {
    partitioner: Partitioner,
    iterations: NonZeroUsize,
    executor: E,
    state: DriverState,
}

impl<E: Executor> Driver<E> {
    /// Creates a new `Driver`.
    ///
    /// # Arguments
    /// * `partitioner` - The partition of the vectors, reused by every iteration.
    /// * `iterations` - The amount of iterations to run.
    /// * `executor` - How each iteration's workers are run.
    pub fn new(partitioner: Partitioner, iterations: NonZeroUsize, executor: E) -> Self {
        Self {
            partitioner,
            iterations,
            executor,
            state: DriverState::NotStarted,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs `iterations` rounds of `y <- y + a * x` over `input`.
    ///
    /// Iteration `it + 1` never starts before every worker of iteration `it` has
    /// finished.
    ///
    /// # Returns
    /// The final `y` and one average per iteration, or the first error that aborted
    /// the run. A `SizeMismatch` error if `input` doesn't match the partition.
    pub fn run(&mut self, input: SaxpyInput) -> Result<SaxpyOutput> {
        let p = self.partitioner.size();

        if input.len() != p {
            return Err(SaxpyErr::SizeMismatch {
                what: "input",
                got: input.len(),
                expected: p,
            });
        }

        let SaxpyInput { x, mut y, a } = input;
        let iterations = self.iterations.get();
        let averages = Averages::new(iterations);

        info!(
            "running {iterations} iteration(s) over {p} elements with {} worker(s)",
            self.partitioner.len()
        );

        for it in 0..iterations {
            self.state = DriverState::Running(it);
            averages.reset(it);

            let tasks: Vec<_> = self
                .partitioner
                .ranges()
                .iter()
                .cloned()
                .zip(self.partitioner.split_mut(&mut y))
                .enumerate()
                .map(|(id, (range, chunk))| {
                    Task::new(Worker::new(id, it, range, a), &x, chunk, &averages, p)
                })
                .collect();

            if let Err(e) = self.executor.run_round(it, tasks) {
                warn!("aborting at iteration {it}: {e}");
                self.state = DriverState::Aborted(it);
                return Err(e);
            }

            debug!("iteration {it} done, average {}", averages.get(it));
        }

        self.state = DriverState::Done;
        info!("all iterations done");

        Ok(SaxpyOutput {
            y,
            averages: averages.into_inner(),
        })
    }
}
