//! Vectorization remark extraction
//!
//! Parses the loop-vectorizer's optimization remarks out of compiler
//! diagnostics:
//!
//! ```text
//! kernel.c:12:5: remark: vectorized loop (vectorization width: 4, interleaved count: 2) [-Rpass=loop-vectorize]
//! ```
//!
//! The file prefix is optional (stdin compiles report `<stdin>` or nothing),
//! as is the trailing scalar interpolation count, which only patched
//! compilers print.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;

lazy_static! {
    static ref REMARK_PATTERN: Regex = Regex::new(
        r"(?:(.*?):)?(\d+):(\d+): remark: vectorized loop \(vectorization width: (\d+), interleaved count: (\d+)(?:, scalar interpolation count: (\d+))?\)"
    )
    .unwrap();
}

/// One vectorized loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorizationMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub line: u32,
    pub column: u32,
    pub width: u32,
    pub interleave: u32,
    /// 0 when the compiler did not report it
    pub scalar: u32,
}

impl VectorizationMatch {
    /// `(line, column, width, interleave, scalar)`
    pub fn as_tuple(&self) -> (u32, u32, u32, u32, u32) {
        (self.line, self.column, self.width, self.interleave, self.scalar)
    }
}

/// Extract every vectorization remark from diagnostic text, in order
pub fn extract(diagnostics: &str) -> Vec<VectorizationMatch> {
    diagnostics.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<VectorizationMatch> {
    let caps = REMARK_PATTERN.captures(line)?;
    let number = |i: usize| -> Option<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    Some(VectorizationMatch {
        file: caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|f| !f.is_empty())
            .map(PathBuf::from),
        line: number(2)?,
        column: number(3)?,
        width: number(4)?,
        interleave: number(5)?,
        scalar: number(6)?,
    })
}
