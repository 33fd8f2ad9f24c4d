use std::{fs, num::NonZeroUsize, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SaxpyErr};

/// The largest vector a run accepts.
pub const MAX_SIZE: usize = 2_147_483_647;

const DEFAULT_SIZE: NonZeroUsize = NonZeroUsize::new(10_000_000).unwrap();
const DEFAULT_THREADS: NonZeroUsize = NonZeroUsize::new(2).unwrap();
const DEFAULT_ITERATIONS: NonZeroUsize = NonZeroUsize::new(1).unwrap();
const DEFAULT_SEED: u64 = 1;

/// How the worker threads of each iteration are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    /// Fresh OS threads are spawned every iteration and joined at its end.
    #[default]
    Scoped,
    /// A thread pool is built once and reused by every iteration.
    Pooled,
}

/// Immutable bounds of a SAXPY run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaxpyConfig {
    pub size: NonZeroUsize,
    pub seed: u64,
    pub threads: NonZeroUsize,
    pub iterations: NonZeroUsize,
    pub pool: PoolKind,
}

impl Default for SaxpyConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: DEFAULT_SEED,
            threads: DEFAULT_THREADS,
            iterations: DEFAULT_ITERATIONS,
            pool: PoolKind::default(),
        }
    }
}

impl SaxpyConfig {
    /// Creates a new run configuration.
    ///
    /// # Arguments
    /// * `size` - The length of the `x` and `y` vectors.
    /// * `seed` - The seed used to initialize the vectors and the scalar.
    /// * `threads` - The amount of workers per iteration.
    /// * `iterations` - The amount of update rounds.
    ///
    /// # Returns
    /// An `InvalidConfig` error if any argument is zero or `size` exceeds `MAX_SIZE`.
    pub fn new(size: usize, seed: u64, threads: usize, iterations: usize) -> Result<Self> {
        let size = non_zero("size", size)?;
        let threads = non_zero("threads", threads)?;
        let iterations = non_zero("iterations", iterations)?;

        let config = Self {
            size,
            seed,
            threads,
            iterations,
            pool: PoolKind::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Sets the worker strategy.
    pub fn with_pool(mut self, pool: PoolKind) -> Self {
        self.pool = pool;
        self
    }

    /// Checks the bounds that the types alone can't express.
    pub fn validate(&self) -> Result<()> {
        if self.size.get() > MAX_SIZE {
            return Err(SaxpyErr::InvalidConfig(format!(
                "size ({}) must not exceed {MAX_SIZE}",
                self.size
            )));
        }

        Ok(())
    }

    /// Parses a JSON document, missing fields take their default value.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }
}

fn non_zero(what: &str, value: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(value)
        .ok_or_else(|| SaxpyErr::InvalidConfig(format!("{what} must be greater than 0")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SaxpyConfig::default();
        assert_eq!(config.size.get(), 10_000_000);
        assert_eq!(config.seed, 1);
        assert_eq!(config.threads.get(), 2);
        assert_eq!(config.iterations.get(), 1);
        assert_eq!(config.pool, PoolKind::Scoped);
    }

    #[test]
    fn rejects_zero_values() {
        assert!(matches!(
            SaxpyConfig::new(0, 1, 2, 1),
            Err(SaxpyErr::InvalidConfig(_))
        ));
        assert!(matches!(
            SaxpyConfig::new(4, 1, 0, 1),
            Err(SaxpyErr::InvalidConfig(_))
        ));
        assert!(matches!(
            SaxpyConfig::new(4, 1, 2, 0),
            Err(SaxpyErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_oversized_vectors() {
        assert!(SaxpyConfig::new(MAX_SIZE, 1, 2, 1).is_ok());
        assert!(matches!(
            SaxpyConfig::new(MAX_SIZE + 1, 1, 2, 1),
            Err(SaxpyErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = SaxpyConfig::from_json_str(r#"{ "size": 16, "pool": "pooled" }"#).unwrap();
        assert_eq!(config.size.get(), 16);
        assert_eq!(config.threads.get(), 2);
        assert_eq!(config.pool, PoolKind::Pooled);
    }

    #[test]
    fn json_rejects_zero_threads() {
        let res = SaxpyConfig::from_json_str(r#"{ "threads": 0 }"#);
        assert!(matches!(res, Err(SaxpyErr::Json(_))));
    }
}
