//! Repository file discovery
//!
//! Walks the repository and collects every file whose extension is in the
//! requested set. Hidden directories (`.git`, `.cache`, ...) are skipped.
//! Results are sorted so that suffix-index insertion order, and with it the
//! order in which ambiguous candidates are tried, is stable across runs.

use std::path::Path;
use walkdir::WalkDir;

use crate::errors::Result;
use crate::shared::models::RepoFile;

/// Find all files under `root` with one of `extensions` (without the dot)
pub fn find_files(root: &Path, extensions: &[String]) -> Result<Vec<RepoFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| extensions.iter().any(|e| e == ext));

        if matches {
            files.push(RepoFile::new(entry.path()));
        }
    }

    files.sort();
    Ok(files)
}
