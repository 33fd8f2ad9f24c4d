use std::num::NonZeroUsize;

use log::debug;
use rand::{
    SeedableRng,
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

use crate::error::{Result, SaxpyErr};

/// The operands of a SAXPY run: `y <- y + a * x`.
///
/// `x` and `a` are never modified once built, `y` is updated in place by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct SaxpyInput {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) a: f64,
}

impl SaxpyInput {
    /// Creates a new `SaxpyInput` from explicit operands.
    ///
    /// # Returns
    /// A `SizeMismatch` error if `x` and `y` differ in length, or an `InvalidConfig`
    /// error if they are empty.
    pub fn new(x: Vec<f64>, y: Vec<f64>, a: f64) -> Result<Self> {
        if x.is_empty() {
            return Err(SaxpyErr::InvalidConfig("vectors must not be empty".into()));
        }

        if x.len() != y.len() {
            return Err(SaxpyErr::SizeMismatch {
                what: "y",
                got: y.len(),
                expected: x.len(),
            });
        }

        Ok(Self { x, y, a })
    }

    /// Draws `x`, `y` and `a` uniformly from `[0, 1)` using a seeded generator.
    ///
    /// For every index `x[i]` is drawn before `y[i]`, and `a` is drawn last, so the
    /// same seed always yields the same input.
    pub fn seeded(size: NonZeroUsize, seed: u64) -> Result<Self> {
        let size = size.get();
        let mut rng = StdRng::seed_from_u64(seed);
        let distribution = Uniform::new(0., 1.)
            .map_err(|e| SaxpyErr::InvalidConfig(format!("unit range: {e}")))?;

        let mut x = Vec::with_capacity(size);
        let mut y = Vec::with_capacity(size);

        for _ in 0..size {
            x.push(distribution.sample(&mut rng));
            y.push(distribution.sample(&mut rng));
        }

        let a = distribution.sample(&mut rng);
        debug!("initialized {size} elements from seed {seed}, a = {a}");

        Ok(Self { x, y, a })
    }

    /// Returns the length `p` of the vectors.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`, an input can't be built empty.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn a(&self) -> f64 {
        self.a
    }
}
