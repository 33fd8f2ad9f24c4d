use std::{
    num::NonZeroUsize,
    panic::{self, AssertUnwindSafe},
};

use log::{debug, warn};
use parking_lot::Mutex;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{Executor, Task};
use crate::error::{Result, SaxpyErr};

/// Runs every iteration on the same pool of threads.
///
/// The pool is built once, each round is a `rayon` scope that only returns once
/// all of its tasks finished.
#[derive(Debug)]
pub struct PooledExec {
    pool: ThreadPool,
}

impl PooledExec {
    /// Creates a new `PooledExec`.
    ///
    /// # Arguments
    /// * `threads` - The amount of threads in the pool.
    ///
    /// # Returns
    /// A `ThreadPool` error if the OS refused to create the threads.
    pub fn new(threads: NonZeroUsize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|i| format!("saxpy-pool-{i}"))
            .build()?;

        debug!("built a pool of {threads} threads");
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for PooledExec {
    fn run_round(&self, iteration: usize, tasks: Vec<Task<'_>>) -> Result<()> {
        let panicked = Mutex::new(None);

        self.pool.scope(|s| {
            for task in tasks {
                let panicked = &panicked;

                s.spawn(move |_| {
                    let worker = task.worker_id();

                    if panic::catch_unwind(AssertUnwindSafe(|| task.run())).is_err() {
                        warn!("worker {worker} panicked at iteration {iteration}");
                        panicked.lock().get_or_insert(worker);
                    }
                });
            }
        });

        match panicked.into_inner() {
            Some(worker) => Err(SaxpyErr::WorkerPanicked { iteration, worker }),
            None => Ok(()),
        }
    }
}
