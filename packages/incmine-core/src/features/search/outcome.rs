use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::features::remarks::VectorizationMatch;

/// Why a search ended without a compiling resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// Every reachable combination was tried
    SearchExhausted,
    /// The compile budget ran out first
    TriesExhausted,
    /// The search state broke an internal invariant
    InvariantViolation(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::SearchExhausted => write!(f, "search exhausted"),
            FailureReason::TriesExhausted => write!(f, "tries exhausted"),
            FailureReason::InvariantViolation(detail) => {
                write!(f, "invariant violation: {}", detail)
            }
        }
    }
}

/// Result of resolving one root file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileOutcome {
    pub success: bool,

    /// Vectorization remarks of the successful compile; empty on failure
    pub matches: Vec<VectorizationMatch>,

    /// Compiler invocations made
    pub attempts: usize,

    /// Invocations that hit the timeout
    pub timeouts: usize,

    /// Directories of the successful compile, or of the last round on
    /// failure
    pub include_dirs: Vec<PathBuf>,

    pub failure: Option<FailureReason>,
}

impl CompileOutcome {
    pub fn succeeded(
        matches: Vec<VectorizationMatch>,
        attempts: usize,
        timeouts: usize,
        include_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            success: true,
            matches,
            attempts,
            timeouts,
            include_dirs,
            failure: None,
        }
    }

    pub fn failed(
        reason: FailureReason,
        attempts: usize,
        timeouts: usize,
        include_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            success: false,
            matches: Vec::new(),
            attempts,
            timeouts,
            include_dirs,
            failure: Some(reason),
        }
    }

    /// Loops reported with a non-zero scalar interpolation count
    pub fn scalar_interpolated(&self) -> usize {
        self.matches.iter().filter(|m| m.scalar > 0).count()
    }
}
