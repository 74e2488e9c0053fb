use incmine_core::{ClangBackend, CompileBackend, MinerConfig, RepositoryGraph, Resolver};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::{OrchestratorError, Result};
use crate::report::{FileReport, MiningReport};
use crate::stats::MiningStats;

/// Runs one resolver per compilable file of a repository
pub struct MiningOrchestrator {
    config: MinerConfig,
}

impl MiningOrchestrator {
    /// Create an orchestrator; invalid configuration is rejected up front
    pub fn new(config: MinerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Mine the repository at `repo_root` with the configured compiler
    pub fn run(&self, repo_root: &Path) -> Result<MiningReport> {
        let backend = ClangBackend::from_config(&self.config)?;
        info!("Using compiler {}", backend.compiler().display());

        let repo = RepositoryGraph::load(repo_root, &self.config)?;
        let mut report = self.run_with_backend(&repo, &backend)?;
        report.compiler = backend.compiler().to_path_buf();
        Ok(report)
    }

    /// Mine an already loaded repository with any backend
    pub fn run_with_backend(
        &self,
        repo: &RepositoryGraph,
        backend: &dyn CompileBackend,
    ) -> Result<MiningReport> {
        let workers = self.config.worker_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("incmine-worker-{}", i))
            .build()
            .map_err(OrchestratorError::worker_pool)?;

        info!(
            "Resolving {} files on {} workers (max {} tries each)",
            repo.sources().len(),
            workers,
            self.config.max_tries
        );
        let start = Instant::now();

        let (mut files, stats) = pool.install(|| {
            repo.sources()
                .par_iter()
                .map(|file| {
                    let outcome =
                        Resolver::new(repo.graph(), backend, file.clone(), self.config.max_tries)
                            .run();
                    FileReport::new(repo.root(), file, outcome)
                })
                .fold(
                    || (Vec::new(), MiningStats::default()),
                    |(mut reports, mut stats), report| {
                        stats.record(&report.outcome);
                        reports.push(report);
                        (reports, stats)
                    },
                )
                .reduce(
                    || (Vec::new(), MiningStats::default()),
                    |(mut reports, stats), (more, other)| {
                        reports.extend(more);
                        (reports, stats.merge(other))
                    },
                )
        });
        files.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            "Finished in {:.2}s: {}/{} files compiled",
            start.elapsed().as_secs_f64(),
            stats.successful,
            stats.files
        );

        Ok(MiningReport {
            repository: repo.root().to_path_buf(),
            compiler: self.config.compiler.clone(),
            files,
            stats,
        })
    }
}
