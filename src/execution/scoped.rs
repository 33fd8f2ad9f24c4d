use std::{
    io,
    thread::{self, Scope, ScopedJoinHandle},
};

use log::warn;

use super::{Executor, Task};
use crate::error::{Result, SaxpyErr};

/// Starts the thread of a single worker inside an iteration's scope.
pub trait SpawnWorker {
    /// Should start `f` on its own thread, bound to `scope`.
    ///
    /// # Arguments
    /// * `scope` - The scope of the current iteration.
    /// * `worker` - The id of the worker the thread will run.
    /// * `f` - The worker's body.
    ///
    /// # Returns
    /// The OS error if the thread couldn't be created.
    fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        worker: usize,
        f: F,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope;
}

/// Spawns named OS threads, `saxpy-worker-{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedThreads;

impl SpawnWorker for NamedThreads {
    fn spawn<'scope, 'env, F>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        worker: usize,
        f: F,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>>
    where
        F: FnOnce() + Send + 'scope,
    {
        thread::Builder::new()
            .name(format!("saxpy-worker-{worker}"))
            .spawn_scoped(scope, f)
    }
}

/// Spawns a fresh OS thread per task every iteration and joins them all before
/// returning.
#[derive(Debug, Clone, Default)]
pub struct ScopedExec<S = NamedThreads> {
    spawner: S,
}

impl ScopedExec {
    pub fn new() -> Self {
        Self::with_spawner(NamedThreads)
    }
}

impl<S: SpawnWorker> ScopedExec<S> {
    /// Creates a new `ScopedExec` that starts its threads through `spawner`.
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }
}

impl<S: SpawnWorker> Executor for ScopedExec<S> {
    fn run_round(&self, iteration: usize, tasks: Vec<Task<'_>>) -> Result<()> {
        thread::scope(|s| {
            let mut handles = Vec::with_capacity(tasks.len());

            for task in tasks {
                let worker = task.worker_id();

                match self.spawner.spawn(s, worker, move || task.run()) {
                    Ok(handle) => handles.push((worker, handle)),
                    Err(source) => {
                        // The ones already running still have to be joined.
                        if let Err(e) = join_all(iteration, handles) {
                            warn!("while aborting iteration {iteration}: {e}");
                        }

                        return Err(SaxpyErr::Spawn {
                            iteration,
                            worker,
                            source,
                        });
                    }
                }
            }

            join_all(iteration, handles)
        })
    }
}

/// Joins every handle, reporting the first worker that panicked.
fn join_all(iteration: usize, handles: Vec<(usize, ScopedJoinHandle<'_, ()>)>) -> Result<()> {
    let mut res = Ok(());

    for (worker, handle) in handles {
        if handle.join().is_err() {
            warn!("worker {worker} panicked at iteration {iteration}");

            if res.is_ok() {
                res = Err(SaxpyErr::WorkerPanicked { iteration, worker });
            }
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reduction::Averages, worker::Worker};

    #[test]
    fn runs_every_task() {
        let x = [1., 2., 3., 4.];
        let mut y = [0.; 4];
        let averages = Averages::new(1);

        let (left, right) = y.split_at_mut(2);
        let tasks = vec![
            Task::new(Worker::new(0, 0, 0..2, 1.), &x, left, &averages, 4),
            Task::new(Worker::new(1, 0, 2..4, 1.), &x, right, &averages, 4),
        ];

        ScopedExec::new().run_round(0, tasks).unwrap();
        assert_eq!(y, [1., 2., 3., 4.]);
        assert_eq!(averages.get(0), 2.5);
    }

    #[test]
    fn reports_panicked_worker() {
        let x = [1., 2., 3.];
        let mut y = [0.; 3];
        let averages = Averages::new(1);

        // Worker 1 gets a chunk shorter than its range.
        let (left, right) = y.split_at_mut(1);
        let tasks = vec![
            Task::new(Worker::new(0, 0, 0..1, 1.), &x, left, &averages, 3),
            Task::new(Worker::new(1, 0, 1..3, 1.), &x, &mut right[..1], &averages, 3),
        ];

        let res = ScopedExec::new().run_round(0, tasks);
        assert!(matches!(
            res,
            Err(SaxpyErr::WorkerPanicked {
                iteration: 0,
                worker: 1
            })
        ));
    }

    /// Refuses to start one worker, every other one runs on a named thread.
    struct RefuseWorker(usize);

    impl SpawnWorker for RefuseWorker {
        fn spawn<'scope, 'env, F>(
            &self,
            scope: &'scope Scope<'scope, 'env>,
            worker: usize,
            f: F,
        ) -> io::Result<ScopedJoinHandle<'scope, ()>>
        where
            F: FnOnce() + Send + 'scope,
        {
            if worker == self.0 {
                return Err(io::Error::other("thread limit reached"));
            }
            NamedThreads.spawn(scope, worker, f)
        }
    }

    #[test]
    fn reports_spawn_failure() {
        let x = [1., 2., 3., 4.];
        let mut y = [0.; 4];
        let averages = Averages::new(1);

        let (left, right) = y.split_at_mut(2);
        let tasks = vec![
            Task::new(Worker::new(0, 0, 0..2, 1.), &x, left, &averages, 4),
            Task::new(Worker::new(1, 0, 2..4, 1.), &x, right, &averages, 4),
        ];

        let res = ScopedExec::with_spawner(RefuseWorker(1)).run_round(0, tasks);
        assert!(matches!(
            res,
            Err(SaxpyErr::Spawn {
                iteration: 0,
                worker: 1,
                ..
            })
        ));

        // Worker 0 was already running and got joined before returning.
        assert_eq!(y[..2], [1., 2.]);
    }

    #[test]
    fn spawn_failure_still_joins_panicked_workers() {
        let x = [1., 2., 3.];
        let mut y = [0.; 3];
        let averages = Averages::new(1);

        // Worker 0 panics on a short chunk, worker 1 is never started.
        let (left, right) = y.split_at_mut(1);
        let tasks = vec![
            Task::new(Worker::new(0, 0, 0..2, 1.), &x, left, &averages, 3),
            Task::new(Worker::new(1, 0, 2..3, 1.), &x, &mut right[1..], &averages, 3),
        ];

        let res = ScopedExec::with_spawner(RefuseWorker(1)).run_round(0, tasks);
        assert!(matches!(res, Err(SaxpyErr::Spawn { worker: 1, .. })));
    }
}
