use std::sync::Arc;

use parking_lot::Mutex;

/// The per-iteration averages of `y`, shared by every worker of the run.
///
/// One lock guards the whole buffer. Only one iteration is active at a time, so
/// contention is bounded by the amount of workers per iteration.
#[derive(Debug, Clone)]
pub struct Averages {
    avgs: Arc<Mutex<Box<[f64]>>>,
}

impl Averages {
    /// Creates a new `Averages` with every entry set to zero.
    ///
    /// # Arguments
    /// * `iterations` - The amount of iterations of the run.
    pub fn new(iterations: usize) -> Self {
        Self {
            avgs: Arc::new(Mutex::new(vec![0.; iterations].into_boxed_slice())),
        }
    }

    /// Zeroes the entry of `iteration` before it begins.
    pub fn reset(&self, iteration: usize) {
        self.avgs.lock()[iteration] = 0.;
    }

    /// Adds a worker's contribution to the average of `iteration`.
    ///
    /// # Arguments
    /// * `iteration` - The iteration the partial sum belongs to.
    /// * `acc` - The sum of the worker's updated values.
    /// * `p` - The length of the whole vector.
    pub fn reduce(&self, iteration: usize, acc: f64, p: usize) {
        let contribution = acc / p as f64;
        self.avgs.lock()[iteration] += contribution;
    }

    /// Returns the current average of `iteration`.
    pub fn get(&self, iteration: usize) -> f64 {
        self.avgs.lock()[iteration]
    }

    pub fn len(&self) -> usize {
        self.avgs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every average into a new vector.
    pub fn snapshot(&self) -> Vec<f64> {
        self.avgs.lock().to_vec()
    }

    /// Takes the averages out, copying them only if other handles are still alive.
    pub fn into_inner(self) -> Vec<f64> {
        match Arc::try_unwrap(self.avgs) {
            Ok(avgs) => avgs.into_inner().into_vec(),
            Err(shared) => {
                let avgs = shared.lock();
                avgs.to_vec()
            }
        }
    }
}
