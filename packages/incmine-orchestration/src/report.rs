//! JSON run report

use incmine_core::{CompileOutcome, RepoFile};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{OrchestratorError, Result};
use crate::stats::MiningStats;

/// Outcome of one compilable file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the repository root
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: CompileOutcome,
}

impl FileReport {
    pub fn new(repo_root: &Path, file: &RepoFile, outcome: CompileOutcome) -> Self {
        let path = file
            .relative_to(repo_root)
            .unwrap_or_else(|| file.path())
            .to_path_buf();
        Self { path, outcome }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MiningReport {
    pub repository: PathBuf,
    pub compiler: PathBuf,
    pub files: Vec<FileReport>,
    pub stats: MiningStats,
}

impl MiningReport {
    pub fn file(&self, relative: impl AsRef<Path>) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == relative.as_ref())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(OrchestratorError::serialization)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
