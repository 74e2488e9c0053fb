//! Loop pragma insertion
//!
//! Scalar interpolation is opt-in per loop, so every line that opens a
//! `for` loop gets the enabling pragma on the line before it.

use lazy_static::lazy_static;
use regex::Regex;

pub const SCALAR_INTERPOLATION_PRAGMA: &str = "#pragma clang loop scalar_interpolation(enable)";

lazy_static! {
    static ref FOR_LOOP: Regex = Regex::new(r"^\s*for\s*\(").unwrap();
}

/// Source with the scalar interpolation pragma before every `for` loop
///
/// Line structure is otherwise preserved, so diagnostics shift by one line
/// per inserted pragma above them.
pub fn insert_pragmas(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 64);
    for line in source.split_inclusive('\n') {
        if FOR_LOOP.is_match(line) {
            out.push_str(SCALAR_INTERPOLATION_PRAGMA);
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}
