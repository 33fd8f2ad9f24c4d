use crate::{reduction::Averages, worker::Worker};

/// A worker bound to the data it needs for one iteration.
///
/// Owns the exclusive borrow of its chunk of `y`, so no two tasks of a round can
/// touch the same element.
#[derive(Debug)]
pub struct Task<'a> {
    worker: Worker,
    x: &'a [f64],
    y: &'a mut [f64],
    averages: &'a Averages,
    p: usize,
}

impl<'a> Task<'a> {
    /// Creates a new `Task`.
    ///
    /// # Arguments
    /// * `worker` - The worker to run.
    /// * `x` - The whole `x` vector.
    /// * `y` - The chunk of `y` matching the worker's range.
    /// * `averages` - Where to reduce the worker's partial sum.
    /// * `p` - The length of the whole vectors.
    pub fn new(
        worker: Worker,
        x: &'a [f64],
        y: &'a mut [f64],
        averages: &'a Averages,
        p: usize,
    ) -> Self {
        Self {
            worker,
            x,
            y,
            averages,
            p,
        }
    }

    /// The id of the worker within its iteration.
    pub fn worker_id(&self) -> usize {
        self.worker.id()
    }

    /// Updates the owned chunk and adds its contribution to the iteration's average.
    pub fn run(self) {
        let acc = self.worker.run(self.x, self.y);
        self.averages.reduce(self.worker.iteration(), acc, self.p);
    }
}
