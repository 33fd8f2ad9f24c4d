use std::num::NonZeroUsize;

use super::{Executor, PooledExec, ScopedExec, Task};
use crate::{config::PoolKind, error::Result};

/// The executor picked by a run's `PoolKind`.
#[derive(Debug)]
pub enum SelectedExec {
    Scoped(ScopedExec),
    Pooled(PooledExec),
}

impl SelectedExec {
    /// Builds the executor for `pool`.
    ///
    /// # Arguments
    /// * `pool` - Which kind of executor to build.
    /// * `threads` - The size of the pool, ignored by `PoolKind::Scoped`.
    ///
    /// # Returns
    /// A `ThreadPool` error if the pool couldn't be built.
    pub fn new(pool: PoolKind, threads: NonZeroUsize) -> Result<Self> {
        Ok(match pool {
            PoolKind::Scoped => Self::Scoped(ScopedExec::new()),
            PoolKind::Pooled => Self::Pooled(PooledExec::new(threads)?),
        })
    }

    pub fn kind(&self) -> PoolKind {
        match self {
            Self::Scoped(_) => PoolKind::Scoped,
            Self::Pooled(_) => PoolKind::Pooled,
        }
    }
}

impl Executor for SelectedExec {
    fn run_round(&self, iteration: usize, tasks: Vec<Task<'_>>) -> Result<()> {
        match self {
            Self::Scoped(exec) => exec.run_round(iteration, tasks),
            Self::Pooled(exec) => exec.run_round(iteration, tasks),
        }
    }
}
