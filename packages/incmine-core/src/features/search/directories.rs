//! Include-directory derivation
//!
//! A candidate `/a/b/c/d/e.h` matched by `#include "d/e.h"` needs `-I/a/b/c`:
//! the candidate path with as many trailing components removed as the
//! directive has.

use std::collections::BTreeSet;
use std::path::PathBuf;

use super::frame::SearchFrame;
use crate::shared::models::{IncludeDirective, RepoFile};

/// Directory that makes `directive` resolve to `candidate`
///
/// System directives never contribute a directory.
pub fn derive_directory(candidate: &RepoFile, directive: &IncludeDirective) -> Option<PathBuf> {
    if directive.is_system() {
        return None;
    }
    let partial = directive.component_count();
    if partial == 0 || partial > candidate.component_count() {
        return None;
    }
    candidate
        .path()
        .ancestors()
        .nth(partial)
        .map(|dir| dir.to_path_buf())
}

/// Directories needed by every live descending frame, ordered
pub fn resolve_directories(frames: &[SearchFrame]) -> BTreeSet<PathBuf> {
    frames
        .iter()
        .filter_map(SearchFrame::resolution)
        .filter_map(|(candidate, directive)| derive_directory(candidate, directive))
        .collect()
}

/// Canonical text of a directory set: sorted, newline-joined
pub fn canonical_key(dirs: &BTreeSet<PathBuf>) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
