use std::{error::Error, fmt, io};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, SaxpyErr>;

/// Every failure a SAXPY run can surface.
///
/// None of them are recoverable inside the core, a run either completes every
/// iteration or returns one of these and no partial result.
#[derive(Debug)]
pub enum SaxpyErr {
    /// Invalid configuration, caught before any computation begins.
    InvalidConfig(String),
    /// An input vector doesn't have the expected length.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The OS refused to create a worker thread.
    Spawn {
        iteration: usize,
        worker: usize,
        source: io::Error,
    },
    /// The reusable worker pool couldn't be built.
    ThreadPool(rayon::ThreadPoolBuildError),
    /// A worker panicked before finishing its range.
    WorkerPanicked { iteration: usize, worker: usize },
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SaxpyErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "{what} length mismatch: got {got}, expected {expected}"),
            Self::Spawn {
                iteration,
                worker,
                source,
            } => write!(
                f,
                "failed to spawn worker {worker} at iteration {iteration}: {source}"
            ),
            Self::ThreadPool(e) => write!(f, "failed to build worker pool: {e}"),
            Self::WorkerPanicked { iteration, worker } => {
                write!(f, "worker {worker} panicked at iteration {iteration}")
            }
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for SaxpyErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::ThreadPool(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SaxpyErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SaxpyErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<rayon::ThreadPoolBuildError> for SaxpyErr {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(value)
    }
}
