use std::ops::Range;

use log::trace;

/// Applies the SAXPY update over a single range of the vectors.
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    iteration: usize,
    range: Range<usize>,
    a: f64,
}

impl Worker {
    /// Creates a new `Worker`.
    ///
    /// # Arguments
    /// * `id` - The index of this worker within its iteration.
    /// * `iteration` - The iteration this worker belongs to.
    /// * `range` - The indices of the vectors this worker owns.
    /// * `a` - The scalar multiplying `x`.
    pub fn new(id: usize, iteration: usize, range: Range<usize>, a: f64) -> Self {
        Self {
            id,
            iteration,
            range,
            a,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn range(&self) -> &Range<usize> {
        &self.range
    }

    /// Computes `y[i] += a * x[i]` in ascending order over the owned range.
    ///
    /// # Arguments
    /// * `x` - The whole `x` vector, only the owned range is read.
    /// * `y` - The chunk of `y` this worker owns, must be as long as its range.
    ///
    /// # Returns
    /// The sum of the updated values of `y`.
    ///
    /// # Panics
    /// If `y` doesn't have the length of the range or the range is out of `x`'s bounds.
    pub fn run(&self, x: &[f64], y: &mut [f64]) -> f64 {
        assert_eq!(y.len(), self.range.len(), "chunk length doesn't match the range");

        let mut acc = 0.;

        for (yi, xi) in y.iter_mut().zip(&x[self.range.clone()]) {
            *yi += self.a * xi;
            acc += *yi;
        }

        trace!(
            "worker {} iteration {}: range {:?}, partial sum {acc}",
            self.id, self.iteration, self.range
        );

        acc
    }
}
