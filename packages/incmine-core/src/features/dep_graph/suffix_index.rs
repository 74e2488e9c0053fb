//! Path-suffix index
//!
//! Maps every trailing suffix of every file's repo-relative path to the
//! files sharing it. For `a/b/c.h` the keys are:
//! - `c.h`
//! - `b/c.h`
//! - `a/b/c.h`
//!
//! An include directive's text is looked up verbatim, so `#include "b/c.h"`
//! finds every file whose relative path ends in `b/c.h`.

use dashmap::DashMap;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

use crate::shared::models::RepoFile;

/// Suffix → candidate files, in insertion order
///
/// Built once and read-only afterwards.
#[derive(Debug, Default)]
pub struct SuffixIndex {
    entries: HashMap<PathBuf, Vec<RepoFile>>,
}

impl SuffixIndex {
    /// Build the index from `files` (parallel)
    ///
    /// Each file registers all of its suffixes concurrently; candidate
    /// lists are then put back into the order of `files`, which is the
    /// insertion order the resolver's tie-break relies on.
    pub fn build(files: &[RepoFile], repo_root: &Path) -> Self {
        let staging: DashMap<PathBuf, Vec<(usize, RepoFile)>> = DashMap::new();

        files.par_iter().enumerate().for_each(|(order, file)| {
            let Some(relative) = file.relative_to(repo_root) else {
                warn!("Skipping {} (outside repository {})", file, repo_root.display());
                return;
            };

            for suffix in suffixes(relative) {
                staging
                    .entry(suffix)
                    .or_insert_with(Vec::new)
                    .push((order, file.clone()));
            }
        });

        let entries = staging
            .into_iter()
            .map(|(suffix, mut candidates)| {
                candidates.sort_by_key(|(order, _)| *order);
                candidates.dedup_by(|a, b| a.1 == b.1);
                (suffix, candidates.into_iter().map(|(_, f)| f).collect())
            })
            .collect();

        Self { entries }
    }

    /// Files whose relative path ends in `suffix`
    pub fn candidates(&self, suffix: &Path) -> Option<&[RepoFile]> {
        self.entries.get(suffix).map(|v| v.as_slice())
    }

    /// Number of distinct suffix keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every trailing suffix of a relative path, shortest first
fn suffixes(relative: &Path) -> Vec<PathBuf> {
    let components: Vec<&std::ffi::OsStr> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect();

    (0..components.len())
        .rev()
        .map(|start| components[start..].iter().collect())
        .collect()
}
