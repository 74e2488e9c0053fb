//! Include dependency graph with petgraph
//!
//! Directed multigraph where:
//! - Nodes are repository files
//! - Edges are tagged with the include directive that produced them; one
//!   directive with N candidates yields N parallel edges
//!
//! Alongside the petgraph structure, each file keeps its directive groups
//! in first-appearance order. The resolver walks those groups; petgraph is
//! used for the whole-graph views (SCCs, counts).

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::warn;

use super::suffix_index::SuffixIndex;
use crate::features::includes::scan_file;
use crate::shared::models::{IncludeDirective, RepoFile};

/// One include directive of a file and every file that could satisfy it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeEdge {
    pub directive: IncludeDirective,
    /// Candidates in suffix-index insertion order
    pub candidates: Vec<RepoFile>,
}

impl IncludeEdge {
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// File include graph
///
/// Built once before any search starts; shared read-only afterwards.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<RepoFile, IncludeDirective>,

    /// File → node index
    path_to_node: HashMap<RepoFile, NodeIndex>,

    /// File → directive groups, first appearance first
    includes: HashMap<RepoFile, Vec<IncludeEdge>>,

    /// Files left out because they could not be scanned, with the reason
    skipped: Vec<(RepoFile, String)>,
}

impl DependencyGraph {
    /// Create empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Link every file's include directives against the suffix index
    pub fn link_edges(files: &[RepoFile], index: &SuffixIndex) -> Self {
        Self::link_edges_with(files, index, |file| scan_file(file.path()))
    }

    /// Same as [`link_edges`](Self::link_edges) with a custom scanner
    ///
    /// Files are scanned in parallel. A file whose scan fails is left out of
    /// the graph entirely (neither node nor candidate) and logged.
    pub fn link_edges_with<F>(files: &[RepoFile], index: &SuffixIndex, scan: F) -> Self
    where
        F: Fn(&RepoFile) -> std::io::Result<Vec<IncludeDirective>> + Sync,
    {
        let scanned: Vec<(RepoFile, std::io::Result<Vec<IncludeDirective>>)> = files
            .par_iter()
            .map(|file| (file.clone(), scan(file)))
            .collect();

        let mut graph = Self::new();
        let mut readable = Vec::with_capacity(scanned.len());

        for (file, result) in scanned {
            match result {
                Ok(directives) => {
                    graph.insert_node(file.clone());
                    readable.push((file, directives));
                }
                Err(e) => {
                    warn!("Skipping {}: failed to scan includes: {}", file, e);
                    graph.skipped.push((file, e.to_string()));
                }
            }
        }

        let skipped: HashSet<&RepoFile> = graph.skipped.iter().map(|(f, _)| f).collect();
        let mut links = Vec::new();
        for (file, directives) in &readable {
            for directive in directives {
                let Some(candidates) = index.candidates(directive.path()) else {
                    continue;
                };
                let usable: Vec<RepoFile> = candidates
                    .iter()
                    .filter(|c| !skipped.contains(c))
                    .cloned()
                    .collect();
                links.push((file.clone(), directive.clone(), usable));
            }
        }

        for (file, directive, candidates) in links {
            graph.insert_edges(&file, directive, &candidates);
        }

        graph
    }

    /// Insert a node (idempotent)
    pub fn insert_node(&mut self, file: RepoFile) -> NodeIndex {
        if let Some(&idx) = self.path_to_node.get(&file) {
            return idx;
        }
        let idx = self.graph.add_node(file.clone());
        self.path_to_node.insert(file, idx);
        idx
    }

    /// Insert edges `from → candidate` for every candidate, tagged with
    /// `directive`
    ///
    /// A directive already present on `from` is extended rather than
    /// duplicated. A file is never its own candidate.
    pub fn insert_edges(&mut self, from: &RepoFile, directive: IncludeDirective, candidates: &[RepoFile]) {
        let from_idx = self.insert_node(from.clone());

        let existing: Vec<RepoFile> = self
            .includes(from)
            .iter()
            .find(|e| e.directive == directive)
            .map(|e| e.candidates.clone())
            .unwrap_or_default();

        let fresh: Vec<RepoFile> = candidates
            .iter()
            .filter(|c| *c != from && !existing.contains(*c))
            .cloned()
            .collect();

        if fresh.is_empty() {
            return;
        }

        for candidate in &fresh {
            let to_idx = self.insert_node(candidate.clone());
            self.graph.add_edge(from_idx, to_idx, directive.clone());
        }

        let groups = self.includes.entry(from.clone()).or_insert_with(Vec::new);
        match groups.iter_mut().find(|e| e.directive == directive) {
            Some(group) => group.candidates.extend(fresh),
            None => groups.push(IncludeEdge {
                directive,
                candidates: fresh,
            }),
        }
    }

    /// Directive groups of `file`, first appearance first
    pub fn includes(&self, file: &RepoFile) -> &[IncludeEdge] {
        self.includes.get(file).map_or(&[], |v| v.as_slice())
    }

    pub fn contains(&self, file: &RepoFile) -> bool {
        self.path_to_node.contains_key(file)
    }

    /// All files, in insertion order
    pub fn files(&self) -> impl Iterator<Item = &RepoFile> {
        self.graph.node_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of (file, candidate) edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of (file, directive) groups
    pub fn directive_count(&self) -> usize {
        self.includes.values().map(|groups| groups.len()).sum()
    }

    /// Number of (file, directive) groups with more than one candidate
    pub fn ambiguous_directive_count(&self) -> usize {
        self.includes
            .values()
            .flat_map(|groups| groups.iter())
            .filter(|e| e.is_ambiguous())
            .count()
    }

    /// Files left out of the graph because their scan failed
    pub fn skipped_files(&self) -> &[(RepoFile, String)] {
        &self.skipped
    }

    /// Include cycles (strongly connected components with more than one file)
    pub fn cycles(&self) -> Vec<Vec<RepoFile>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut files: Vec<RepoFile> =
                    scc.into_iter().map(|idx| self.graph[idx].clone()).collect();
                files.sort();
                files
            })
            .collect()
    }
}
