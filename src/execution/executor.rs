use super::Task;
use crate::error::Result;

/// Runs the tasks of a single iteration.
///
/// An `Executor` is the barrier between iterations: `run_round` must not return
/// before every task it was given has finished.
pub trait Executor {
    /// Should run every task of `iteration` to completion.
    ///
    /// # Arguments
    /// * `iteration` - The index of the current iteration.
    /// * `tasks` - One task per partition, their chunks of `y` are disjoint.
    ///
    /// # Returns
    /// An error if a worker couldn't be started or didn't finish.
    fn run_round(&self, iteration: usize, tasks: Vec<Task<'_>>) -> Result<()>;
}
