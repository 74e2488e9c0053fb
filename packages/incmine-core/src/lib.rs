/*
 * incmine core - include resolution for repositories without a build system
 *
 * Layout:
 * - shared/   : RepoFile and IncludeDirective models
 * - config/   : MinerConfig (YAML + validation)
 * - features/ : discovery → includes → dep_graph → search → compile/process → remarks
 *
 * The dependency graph is built once and shared read-only; every root file
 * gets its own Resolver with private search state.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{ConfigError, MinerConfig};
pub use errors::{CoreError, Result};
pub use features::compile::{ClangBackend, CompileBackend, CompileRequest};
pub use features::dep_graph::{DependencyGraph, IncludeEdge, RepositoryGraph, SuffixIndex};
pub use features::process::{CommandSpec, ExitStatus, ProcessOutput, ProcessRunner, RunnerError};
pub use features::remarks::VectorizationMatch;
pub use features::search::{CompileOutcome, FailureReason, Resolver, SearchError, SearchFrame};
pub use shared::models::{IncludeDirective, IncludeKind, RepoFile};
