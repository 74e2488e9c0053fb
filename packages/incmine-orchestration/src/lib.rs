/*
 * incmine orchestration - batch include mining over a repository
 *
 * Layout:
 * - cli          : command-line arguments → MinerConfig
 * - orchestrator : rayon worker pool, one Resolver per compilable file
 * - stats        : per-worker partial counters, merged at the end
 * - report       : JSON output
 */

pub mod cli;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod stats;

pub use cli::CliArgs;
pub use error::{OrchestratorError, Result};
pub use orchestrator::MiningOrchestrator;
pub use report::{FileReport, MiningReport};
pub use stats::MiningStats;
