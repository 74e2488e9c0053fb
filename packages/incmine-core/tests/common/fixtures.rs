//! Fixture repositories on disk

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use incmine_core::{MinerConfig, RepoFile, RepositoryGraph};
use tempfile::TempDir;

/// Temporary repository with a canonical root path
pub struct TempRepo {
    _dir: TempDir,
    root: PathBuf,
}

impl TempRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        Self { _dir: dir, root }
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn with(self, rel: &str, content: &str) -> Self {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn file(&self, rel: &str) -> RepoFile {
        RepoFile::new(self.path(rel))
    }

    pub fn load(&self) -> RepositoryGraph {
        self.load_with(&MinerConfig::default())
    }

    pub fn load_with(&self, config: &MinerConfig) -> RepositoryGraph {
        RepositoryGraph::load(&self.root, config).unwrap()
    }
}

/// `#include "<path>"` lines
pub fn includes(paths: &[&str]) -> String {
    paths
        .iter()
        .map(|p| format!("#include \"{}\"\n", p))
        .collect()
}
