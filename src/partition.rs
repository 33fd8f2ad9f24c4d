use std::{num::NonZeroUsize, ops::Range};

/// Splits `[0, p)` into `n` contiguous half-open ranges.
///
/// Every range holds `p / n` indices except the last one, which also takes the
/// remainder and always ends at `p`. When `n > p` all the ranges but the last are
/// empty.
///
/// # Arguments
/// * `p` - The length of the vectors.
/// * `n` - The amount of workers.
///
/// # Returns
/// The `n` ranges, ordered by worker id.
pub fn partition(p: NonZeroUsize, n: NonZeroUsize) -> Vec<Range<usize>> {
    let (p, n) = (p.get(), n.get());
    let spt = p / n;

    (0..n)
        .map(|i| {
            let init = i * spt;
            let end = if i + 1 == n { p } else { init + spt };
            init..end
        })
        .collect()
}

/// The partition of the vectors among the workers, computed once and reused by
/// every iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioner {
    size: usize,
    ranges: Box<[Range<usize>]>,
}

impl Partitioner {
    /// Creates a new `Partitioner`.
    ///
    /// # Arguments
    /// * `size` - The length of the vectors.
    /// * `workers` - The amount of workers to split them among.
    pub fn new(size: NonZeroUsize, workers: NonZeroUsize) -> Self {
        Self {
            size: size.get(),
            ranges: partition(size, workers).into_boxed_slice(),
        }
    }

    /// The length of the partitioned vectors.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The amount of ranges, one per worker.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Splits `y` into one disjoint mutable chunk per range.
    ///
    /// # Panics
    /// If the length of `y` doesn't match the partitioned size.
    pub fn split_mut<'a>(&self, mut y: &'a mut [f64]) -> Vec<&'a mut [f64]> {
        assert_eq!(y.len(), self.size, "vector length doesn't match the partition");

        let mut chunks = Vec::with_capacity(self.ranges.len());

        for range in self.ranges.iter() {
            let (chunk, rest) = y.split_at_mut(range.len());
            chunks.push(chunk);
            y = rest;
        }

        chunks
    }
}
