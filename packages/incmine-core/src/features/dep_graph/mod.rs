//! Dependency graph feature
//!
//! Built once per repository, before any search starts:
//! discovery → suffix index → directive linking.

mod graph;
mod suffix_index;

pub use graph::{DependencyGraph, IncludeEdge};
pub use suffix_index::SuffixIndex;

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::MinerConfig;
use crate::errors::{CoreError, Result};
use crate::features::discovery::find_files;
use crate::shared::models::RepoFile;

/// Everything the resolvers of one repository share
#[derive(Debug)]
pub struct RepositoryGraph {
    root: PathBuf,
    index: SuffixIndex,
    graph: DependencyGraph,
    sources: Vec<RepoFile>,
}

impl RepositoryGraph {
    /// Discover, index and link every file of the repository at `root`
    pub fn load(root: &Path, config: &MinerConfig) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|e| CoreError::repository(format!("{}: {}", root.display(), e)))?;
        if !root.is_dir() {
            return Err(CoreError::repository(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let files = find_files(&root, &config.all_extensions())?;
        info!("Discovered {} files under {}", files.len(), root.display());

        let index = SuffixIndex::build(&files, &root);
        let graph = DependencyGraph::link_edges(&files, &index);

        let sources = graph
            .files()
            .filter(|f| config.is_source(f.path()))
            .cloned()
            .collect();

        Ok(Self::from_parts(root, index, graph, sources))
    }

    /// Assemble from prebuilt parts; sources are sorted
    pub fn from_parts(
        root: PathBuf,
        index: SuffixIndex,
        graph: DependencyGraph,
        mut sources: Vec<RepoFile>,
    ) -> Self {
        sources.sort();
        let repo = Self {
            root,
            index,
            graph,
            sources,
        };
        repo.log_summary();
        repo
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index(&self) -> &SuffixIndex {
        &self.index
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Compilable files, sorted
    pub fn sources(&self) -> &[RepoFile] {
        &self.sources
    }

    fn log_summary(&self) {
        info!(
            "Dependency graph: {} files, {} include edges, {} directives ({} ambiguous), {} compilable",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.directive_count(),
            self.graph.ambiguous_directive_count(),
            self.sources.len()
        );

        let skipped = self.graph.skipped_files().len();
        if skipped > 0 {
            warn!("{} files could not be scanned and were left out", skipped);
        }

        for cycle in self.graph.cycles() {
            let names: Vec<String> = cycle
                .iter()
                .map(|f| {
                    f.relative_to(&self.root)
                        .unwrap_or_else(|| f.path())
                        .display()
                        .to_string()
                })
                .collect();
            info!("Include cycle: {}", names.join(" <-> "));
        }
    }
}
