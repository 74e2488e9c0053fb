use std::fmt;

use crate::shared::models::{IncludeDirective, RepoFile};

/// One step of the depth-first search over the include graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFrame {
    /// Bottom of every stack: the file being compiled
    Start(RepoFile),

    /// Descent through a directive with exactly one candidate
    Forward {
        from: RepoFile,
        to: RepoFile,
        via: IncludeDirective,
    },

    /// Return from a fully expanded file to its parent
    Backward { from: RepoFile, to: RepoFile },

    /// Descent through an ambiguous directive; `remaining` holds the
    /// candidates not tried yet, in insertion order
    Choice {
        from: RepoFile,
        chosen: RepoFile,
        via: IncludeDirective,
        remaining: Vec<RepoFile>,
    },
}

impl SearchFrame {
    /// File the search is positioned on after this frame
    pub fn destination(&self) -> &RepoFile {
        match self {
            SearchFrame::Start(file) => file,
            SearchFrame::Forward { to, .. } => to,
            SearchFrame::Backward { to, .. } => to,
            SearchFrame::Choice { chosen, .. } => chosen,
        }
    }

    /// `(candidate, directive)` this frame resolved, for descending frames
    pub fn resolution(&self) -> Option<(&RepoFile, &IncludeDirective)> {
        match self {
            SearchFrame::Forward { to, via, .. } => Some((to, via)),
            SearchFrame::Choice { chosen, via, .. } => Some((chosen, via)),
            SearchFrame::Start(_) | SearchFrame::Backward { .. } => None,
        }
    }

    /// Parent link `(child, parent)` owned by this frame
    pub fn parent_link(&self) -> Option<(&RepoFile, &RepoFile)> {
        match self {
            SearchFrame::Forward { from, to, .. } => Some((to, from)),
            SearchFrame::Choice { from, chosen, .. } => Some((chosen, from)),
            SearchFrame::Start(_) | SearchFrame::Backward { .. } => None,
        }
    }

    /// Whether backtracking can resume here
    pub fn is_choice_point(&self) -> bool {
        matches!(self, SearchFrame::Choice { remaining, .. } if !remaining.is_empty())
    }

    pub fn is_start(&self) -> bool {
        matches!(self, SearchFrame::Start(_))
    }
}

impl fmt::Display for SearchFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFrame::Start(file) => write!(f, "start {}", file),
            SearchFrame::Forward { from, to, via } => {
                write!(f, "forward {} -> {} via {}", from, to, via)
            }
            SearchFrame::Backward { from, to } => write!(f, "backward {} -> {}", from, to),
            SearchFrame::Choice {
                from,
                chosen,
                via,
                remaining,
            } => write!(
                f,
                "choice {} -> {} via {} ({} left)",
                from,
                chosen,
                via,
                remaining.len()
            ),
        }
    }
}
