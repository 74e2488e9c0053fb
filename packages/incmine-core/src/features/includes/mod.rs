//! Include directive scanning
//!
//! A single-pass, line-oriented text scan. There is no preprocessor here:
//! includes inside `#if 0` blocks or comments spanning lines are reported
//! like any other, which is fine because the resolver only needs a superset.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::shared::models::IncludeDirective;

lazy_static! {
    /// `#include "a.h"`, `#  include <a.h>`, leading whitespace allowed
    static ref INCLUDE_PATTERN: Regex =
        Regex::new(r#"^\s*#\s*include\s*([<"][^>"]+[>"])"#).unwrap();
}

/// Extract include directives from source text, in order of appearance
pub fn extract_includes(source: &str) -> Vec<IncludeDirective> {
    source
        .lines()
        .filter_map(|line| INCLUDE_PATTERN.captures(line))
        .filter_map(|caps| caps.get(1))
        .filter_map(|operand| IncludeDirective::parse(operand.as_str()))
        .collect()
}

/// Read a file and extract its include directives
///
/// Source files are not required to be UTF-8; invalid bytes are replaced.
pub fn scan_file(path: &Path) -> std::io::Result<Vec<IncludeDirective>> {
    let bytes = std::fs::read(path)?;
    Ok(extract_includes(&String::from_utf8_lossy(&bytes)))
}
