//! Backtracking include resolver
//!
//! One `Resolver` per root file. Each round expands the search tree as far
//! as it goes, turns the live frames into a set of include directories and
//! compiles with them. A failed compile backtracks to the most recent
//! choice point that still has untried candidates.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use super::directories::{canonical_key, resolve_directories};
use super::error::SearchError;
use super::frame::SearchFrame;
use super::outcome::{CompileOutcome, FailureReason};
use super::stack::SearchStack;
use crate::features::compile::{CompileBackend, CompileRequest};
use crate::features::dep_graph::{DependencyGraph, IncludeEdge};
use crate::features::process::ExitStatus;
use crate::features::remarks;
use crate::shared::models::RepoFile;

pub struct Resolver<'a> {
    graph: &'a DependencyGraph,
    backend: &'a dyn CompileBackend,
    root: RepoFile,
    max_tries: usize,

    stack: SearchStack,
    /// Canonical keys of directory sets already compiled
    tried: HashSet<String>,
    attempts: usize,
    timeouts: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(
        graph: &'a DependencyGraph,
        backend: &'a dyn CompileBackend,
        root: RepoFile,
        max_tries: usize,
    ) -> Self {
        Self {
            graph,
            backend,
            root,
            max_tries,
            stack: SearchStack::new(),
            tried: HashSet::new(),
            attempts: 0,
            timeouts: 0,
        }
    }

    /// Search for a compiling resolution of the root file
    pub fn run(mut self) -> CompileOutcome {
        self.stack.push(SearchFrame::Start(self.root.clone()));
        self.search()
    }

    fn search(mut self) -> CompileOutcome {
        loop {
            if let Err(e) = self.expand() {
                error!("Search for {} aborted: {}\n{}", self.root, e, self.stack.dump());
                return self.fail(FailureReason::InvariantViolation(e.to_string()), BTreeSet::new());
            }

            let dirs = resolve_directories(self.stack.frames());
            let key = canonical_key(&dirs);

            if self.tried.contains(&key) {
                debug!("{}: directory set already tried, skipping compile", self.root);
            } else if self.attempts >= self.max_tries {
                return self.fail(FailureReason::TriesExhausted, dirs);
            } else {
                self.tried.insert(key);
                if let Some(outcome) = self.attempt(&dirs) {
                    return outcome;
                }
            }

            if !self.shrink() {
                return self.fail(FailureReason::SearchExhausted, dirs);
            }
        }
    }

    /// Compile once with `dirs`; Some on success
    fn attempt(&mut self, dirs: &BTreeSet<PathBuf>) -> Option<CompileOutcome> {
        self.attempts += 1;
        let request = CompileRequest::new(self.root.clone(), dirs.iter().cloned().collect());
        debug!(
            "{}: attempt {}/{} with include dirs [{}]",
            self.root,
            self.attempts,
            self.max_tries,
            canonical_key(dirs).replace('\n', ", ")
        );

        let output = match self.backend.compile(&request) {
            Ok(output) => output,
            Err(e) => {
                warn!("{}: compiler could not be started: {}", self.root, e);
                return None;
            }
        };

        if output.status == ExitStatus::TimedOut {
            self.timeouts += 1;
            warn!("{}: attempt {} timed out", self.root, self.attempts);
            return None;
        }

        if !output.success() {
            debug!(
                "{}: attempt {} failed ({})\n{}",
                self.root, self.attempts, output.status, output.stderr
            );
            return None;
        }

        let matches = remarks::extract(&output.stderr);
        info!(
            "{}: compiled after {} attempts, {} vectorized loops",
            self.root,
            self.attempts,
            matches.len()
        );
        Some(CompileOutcome::succeeded(
            matches,
            self.attempts,
            self.timeouts,
            dirs.iter().cloned().collect(),
        ))
    }

    fn fail(&self, reason: FailureReason, dirs: BTreeSet<PathBuf>) -> CompileOutcome {
        info!(
            "{}: no compiling resolution ({}) after {} attempts, last dirs: [{}]",
            self.root,
            reason,
            self.attempts,
            canonical_key(&dirs).replace('\n', ", ")
        );
        CompileOutcome::failed(reason, self.attempts, self.timeouts, dirs.into_iter().collect())
    }

    /// Grow the tree until every reachable directive is resolved
    fn expand(&mut self) -> Result<(), SearchError> {
        loop {
            let current = self
                .stack
                .peek()
                .ok_or(SearchError::EmptyStack)?
                .destination()
                .clone();

            if let Some(frame) = self.next_descent(&current) {
                self.stack.push(frame);
                continue;
            }

            match self.stack.peek() {
                None => return Err(SearchError::EmptyStack),
                Some(SearchFrame::Start(_)) => return Ok(()),
                Some(SearchFrame::Backward { .. }) if self.stack.depth() == 0 => return Ok(()),
                Some(_) => {}
            }

            let parent = self
                .stack
                .parent(&current)
                .cloned()
                .ok_or_else(|| SearchError::MissingParent {
                    file: current.to_string(),
                })?;
            self.stack.push(SearchFrame::Backward {
                from: current,
                to: parent,
            });
        }
    }

    /// Frame for the first unresolved directive of `current`
    fn next_descent(&self, current: &RepoFile) -> Option<SearchFrame> {
        let edge = self
            .graph
            .includes(current)
            .iter()
            .find(|edge| !self.is_resolved(edge))?;

        let mut remaining = edge.candidates.clone();
        let chosen = remaining.pop()?;
        let frame = if remaining.is_empty() {
            SearchFrame::Forward {
                from: current.clone(),
                to: chosen,
                via: edge.directive.clone(),
            }
        } else {
            SearchFrame::Choice {
                from: current.clone(),
                chosen,
                via: edge.directive.clone(),
                remaining,
            }
        };
        Some(frame)
    }

    /// Resolved once any `(candidate, directive)` pair of the group is seen
    fn is_resolved(&self, edge: &IncludeEdge) -> bool {
        edge.candidates
            .iter()
            .any(|c| self.stack.is_seen(c, &edge.directive))
    }

    /// Backtrack to the nearest choice point with untried candidates
    ///
    /// Returns false once only the start frame is left.
    fn shrink(&mut self) -> bool {
        while let Some(frame) = self.stack.pop() {
            if let SearchFrame::Choice {
                from,
                via,
                mut remaining,
                ..
            } = frame
            {
                if let Some(next) = remaining.pop() {
                    debug!("{}: retrying {} with {}", self.root, via, next);
                    self.stack.push(SearchFrame::Choice {
                        from,
                        chosen: next,
                        via,
                        remaining,
                    });
                    return true;
                }
            }
        }
        false
    }
}
