use std::collections::HashSet;

use super::frame::SearchFrame;
use crate::shared::models::{IncludeDirective, RepoFile};

/// Explicit DFS state of one resolver
///
/// `push` and `pop` are the only places the parent map and the seen set
/// change. A descending frame (`Forward`/`Choice`) owns one seen pair and
/// opens one `(child, parent)` link; a `Backward` frame closes the innermost
/// open link and hands it back when it is popped. A file reached through
/// several directives therefore always returns to the parent that brought
/// it in most recently.
#[derive(Debug, Default)]
pub struct SearchStack {
    frames: Vec<SearchFrame>,
    /// Open `(child, parent)` links, innermost last
    parents: Vec<(RepoFile, RepoFile)>,
    /// Links closed by the live `Backward` frames, one slot per frame
    closed: Vec<Option<(RepoFile, RepoFile)>>,
    seen: HashSet<(RepoFile, IncludeDirective)>,
}

impl SearchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: SearchFrame) {
        if let Some((candidate, directive)) = frame.resolution() {
            self.seen.insert((candidate.clone(), directive.clone()));
        }
        if let Some((child, parent)) = frame.parent_link() {
            self.parents.push((child.clone(), parent.clone()));
        }
        if matches!(frame, SearchFrame::Backward { .. }) {
            let link = self.parents.pop();
            self.closed.push(link);
        }
        self.frames.push(frame);
    }

    /// Pop the top frame; the `Start` frame is never popped
    pub fn pop(&mut self) -> Option<SearchFrame> {
        if self.frames.last().map_or(true, SearchFrame::is_start) {
            return None;
        }
        let frame = self.frames.pop()?;
        if let Some((candidate, directive)) = frame.resolution() {
            self.seen.remove(&(candidate.clone(), directive.clone()));
        }
        if frame.parent_link().is_some() {
            self.parents.pop();
        }
        if matches!(frame, SearchFrame::Backward { .. }) {
            if let Some(Some(link)) = self.closed.pop() {
                self.parents.push(link);
            }
        }
        Some(frame)
    }

    pub fn peek(&self) -> Option<&SearchFrame> {
        self.frames.last()
    }

    /// Parent `file` returns to, if `file` is the innermost open descent
    pub fn parent(&self, file: &RepoFile) -> Option<&RepoFile> {
        self.parents
            .last()
            .filter(|(child, _)| child == file)
            .map(|(_, parent)| parent)
    }

    /// Number of descents not yet closed by a `Backward` frame
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    pub fn is_seen(&self, candidate: &RepoFile, directive: &IncludeDirective) -> bool {
        self.seen.contains(&(candidate.clone(), directive.clone()))
    }

    pub fn frames(&self) -> &[SearchFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// One frame per line, bottom first
    pub fn dump(&self) -> String {
        self.frames
            .iter()
            .enumerate()
            .map(|(depth, frame)| format!("{:>3}: {}", depth, frame))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
