//! Run statistics
//!
//! Each worker folds outcomes into its own `MiningStats`; partials are
//! merged once at the end.

use incmine_core::CompileOutcome;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MiningStats {
    pub files: usize,
    pub successful: usize,
    pub failed: usize,
    /// Compiler invocations over all files
    pub attempts: usize,
    pub timed_out_attempts: usize,
    pub vectorized_loops: usize,
    /// Vectorized loops with a non-zero scalar interpolation count
    pub scalar_interpolated_loops: usize,
}

impl MiningStats {
    pub fn record(&mut self, outcome: &CompileOutcome) {
        self.files += 1;
        if outcome.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.attempts += outcome.attempts;
        self.timed_out_attempts += outcome.timeouts;
        self.vectorized_loops += outcome.matches.len();
        self.scalar_interpolated_loops += outcome.scalar_interpolated();
    }

    pub fn merge(mut self, other: MiningStats) -> Self {
        self.files += other.files;
        self.successful += other.successful;
        self.failed += other.failed;
        self.attempts += other.attempts;
        self.timed_out_attempts += other.timed_out_attempts;
        self.vectorized_loops += other.vectorized_loops;
        self.scalar_interpolated_loops += other.scalar_interpolated_loops;
        self
    }

    /// Percentage of files that compiled
    pub fn success_rate(&self) -> f64 {
        percent(self.successful, self.files)
    }

    pub fn failure_rate(&self) -> f64 {
        percent(self.failed, self.files)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl fmt::Display for MiningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<28}{:>10}", "Files", self.files)?;
        writeln!(
            f,
            "{:<28}{:>10}  ({:.2}%)",
            "Successful",
            self.successful,
            self.success_rate()
        )?;
        writeln!(
            f,
            "{:<28}{:>10}  ({:.2}%)",
            "Failed",
            self.failed,
            self.failure_rate()
        )?;
        writeln!(f, "{:<28}{:>10}", "Timed-out attempts", self.timed_out_attempts)?;
        writeln!(f, "{:<28}{:>10}", "Compile attempts", self.attempts)?;
        writeln!(f, "{:<28}{:>10}", "Vectorized loops", self.vectorized_loops)?;
        write!(
            f,
            "{:<28}{:>10}",
            "Scalar-interpolated loops", self.scalar_interpolated_loops
        )
    }
}
