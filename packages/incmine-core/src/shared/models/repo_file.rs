//! Repository file identity
//!
//! A `RepoFile` is the node identity of the dependency graph. The path is
//! normalized once and shared behind an `Arc`, so cloning a file into the
//! suffix index, the graph and every search frame costs one refcount bump.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Absolute, lexically normalized path of a file in the repository
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoFile(Arc<Path>);

impl RepoFile {
    /// Create a file from a path, normalizing `.` and `..` components
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(Arc::from(normalize_path(path.as_ref())))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Path relative to `root`, or None when the file lives outside it
    pub fn relative_to(&self, root: &Path) -> Option<&Path> {
        self.0.strip_prefix(root).ok()
    }

    /// File extension as UTF-8, if any
    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|ext| ext.to_str())
    }

    /// Directory containing this file
    pub fn parent_dir(&self) -> Option<&Path> {
        self.0.parent()
    }

    /// Number of normal (non-root, non-prefix) components
    pub fn component_count(&self) -> usize {
        self.0
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .count()
    }
}

impl fmt::Debug for RepoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RepoFile({})", self.0.display())
    }
}

impl fmt::Display for RepoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for RepoFile {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for RepoFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for RepoFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Lexical normalization: drop `.`, resolve `..` against the preceding
/// normal component. Never touches the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
