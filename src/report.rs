use std::{fmt, time::Duration};

use serde::Serialize;

use crate::execution::SaxpyOutput;

const TAIL: usize = 3;

/// A summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub elapsed_ms: f64,
    pub y_tail: Vec<f64>,
    pub avgs_tail: Vec<f64>,
}

impl Report {
    /// Builds the summary of `output`, keeping the last (at most three) values of `y`
    /// and of the averages.
    pub fn new(output: &SaxpyOutput, elapsed: Duration) -> Self {
        Self {
            elapsed_ms: elapsed.as_nanos() as f64 / 1e6,
            y_tail: tail(&output.y),
            avgs_tail: tail(&output.averages),
        }
    }
}

fn tail(values: &[f64]) -> Vec<f64> {
    values[values.len().saturating_sub(TAIL)..].to_vec()
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution time: {:.6} ms", self.elapsed_ms)?;
        writeln!(f, "Last {} values of Y: {}", self.y_tail.len(), join(&self.y_tail))?;
        write!(
            f,
            "Last {} values of Y_avgs: {}",
            self.avgs_tail.len(),
            join(&self.avgs_tail)
        )
    }
}
