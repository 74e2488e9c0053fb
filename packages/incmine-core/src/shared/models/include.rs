//! Include directive model

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Type of an include, either user or system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncludeKind {
    /// `#include <file.h>`
    System,
    /// `#include "file.h"`
    User,
}

/// A single `#include` found in a source file
///
/// Equality is by (kind, path): two directives with identical text are the
/// same directive no matter which file they were found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncludeDirective {
    kind: IncludeKind,
    path: PathBuf,
}

impl IncludeDirective {
    /// Create a directive, dropping `.` and `..` components from the path
    ///
    /// `#include "../inc/util.h"` is matched against the suffix index as
    /// `inc/util.h`.
    pub fn new(kind: IncludeKind, path: impl AsRef<Path>) -> Self {
        let path = path
            .as_ref()
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();
        Self { kind, path }
    }

    pub fn user(path: impl AsRef<Path>) -> Self {
        Self::new(IncludeKind::User, path)
    }

    pub fn system(path: impl AsRef<Path>) -> Self {
        Self::new(IncludeKind::System, path)
    }

    /// Parse the delimited operand of an include line: `"a/b.h"` or `<a/b.h>`
    ///
    /// The kind follows the opening delimiter. Returns None for anything
    /// else, for absolute paths, or when nothing is left after
    /// normalization.
    pub fn parse(operand: &str) -> Option<Self> {
        let kind = match operand.chars().next()? {
            '"' => IncludeKind::User,
            '<' => IncludeKind::System,
            _ => return None,
        };
        if operand.len() < 2 || !operand.ends_with(['"', '>']) {
            return None;
        }
        let inner = operand.get(1..operand.len() - 1)?;
        if Path::new(inner).has_root() {
            return None;
        }
        let directive = Self::new(kind, inner);
        if directive.path.as_os_str().is_empty() {
            return None;
        }
        Some(directive)
    }

    pub fn kind(&self) -> IncludeKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_system(&self) -> bool {
        self.kind == IncludeKind::System
    }

    /// Number of path components in the directive text
    pub fn component_count(&self) -> usize {
        self.path.components().count()
    }
}

impl fmt::Display for IncludeDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IncludeKind::User => write!(f, "\"{}\"", self.path.display()),
            IncludeKind::System => write!(f, "<{}>", self.path.display()),
        }
    }
}
