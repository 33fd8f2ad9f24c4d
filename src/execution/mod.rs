mod driver;
mod executor;
mod pooled;
mod scoped;
mod selected;
mod task;

pub use driver::{Driver, DriverState, SaxpyOutput};
pub use executor::Executor;
pub use pooled::PooledExec;
pub use scoped::{NamedThreads, ScopedExec, SpawnWorker};
pub use selected::SelectedExec;
pub use task::Task;
