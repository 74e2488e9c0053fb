//! Compiler backend
//!
//! The resolver only sees `CompileBackend`; `ClangBackend` turns a request
//! into a clang command line and runs it through the `ProcessRunner`.

use std::path::{Path, PathBuf};

use super::pragma::insert_pragmas;
use crate::config::{ConfigError, MinerConfig};
use crate::errors::Result;
use crate::features::process::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
use crate::shared::models::RepoFile;

/// Flags of every compile: no object output, vectorizer remarks on
const COMPILE_FLAGS: [&str; 5] = ["-o", "/dev/null", "-emit-llvm", "-O3", "-Rpass=loop-vectorize"];

/// One compile of a root file with a fixed set of include directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub root: RepoFile,
    pub include_dirs: Vec<PathBuf>,
}

impl CompileRequest {
    pub fn new(root: RepoFile, include_dirs: Vec<PathBuf>) -> Self {
        Self { root, include_dirs }
    }
}

/// Something that can compile a root file
///
/// Shared across worker threads; implementations hold no per-search state.
pub trait CompileBackend: Send + Sync {
    fn compile(&self, request: &CompileRequest) -> std::result::Result<ProcessOutput, RunnerError>;
}

/// clang driven through a `ProcessRunner`
#[derive(Debug, Clone)]
pub struct ClangBackend {
    compiler: PathBuf,
    extra_args: Vec<String>,
    insert_pragmas: bool,
    runner: ProcessRunner,
}

impl ClangBackend {
    pub fn new(compiler: impl Into<PathBuf>, runner: ProcessRunner) -> Self {
        Self {
            compiler: compiler.into(),
            extra_args: Vec::new(),
            insert_pragmas: false,
            runner,
        }
    }

    /// Locate the configured compiler and set up a runner with its timeout
    pub fn from_config(config: &MinerConfig) -> Result<Self> {
        let compiler = locate_compiler(&config.compiler)?;
        let runner = ProcessRunner::new(config.timeout())?;
        Ok(Self::new(compiler, runner)
            .with_extra_args(config.extra_args.clone())
            .with_pragmas(config.insert_pragmas))
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn with_pragmas(mut self, enabled: bool) -> Self {
        self.insert_pragmas = enabled;
        self
    }

    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    /// Command line for `request`
    ///
    /// With pragma insertion the source arrives on stdin, so the root's own
    /// directory is added with `-iquote` for its relative quoted includes.
    pub fn command(&self, request: &CompileRequest) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.compiler).arg("-c");

        cmd = if self.insert_pragmas {
            let cmd = cmd.args(["-x", "c", "-"]);
            match request.root.parent_dir() {
                Some(dir) => cmd.arg("-iquote").arg(dir.display().to_string()),
                None => cmd,
            }
        } else {
            cmd.arg(request.root.path().display().to_string())
        };

        cmd.args(
            request
                .include_dirs
                .iter()
                .map(|dir| format!("-I{}", dir.display())),
        )
        .args(COMPILE_FLAGS)
        .args(self.extra_args.iter().cloned())
    }
}

impl CompileBackend for ClangBackend {
    fn compile(&self, request: &CompileRequest) -> std::result::Result<ProcessOutput, RunnerError> {
        let command = self.command(request);
        tracing::debug!("{}", command);

        if self.insert_pragmas {
            let source = std::fs::read(request.root.path())?;
            let rewritten = insert_pragmas(&String::from_utf8_lossy(&source));
            self.runner.execute(&command, Some(&rewritten))
        } else {
            self.runner.execute(&command, None)
        }
    }
}

/// Resolve the compiler to an existing file
///
/// A bare name is looked up on `PATH`; anything with a separator is taken
/// as a path.
pub fn locate_compiler(compiler: &Path) -> std::result::Result<PathBuf, ConfigError> {
    if compiler.components().count() > 1 {
        if compiler.is_file() {
            return Ok(compiler.to_path_buf());
        }
        return Err(ConfigError::invalid(
            "compiler",
            format!("{} does not exist", compiler.display()),
        ));
    }

    std::env::var_os("PATH")
        .iter()
        .flat_map(std::env::split_paths)
        .map(|dir| dir.join(compiler))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            ConfigError::invalid(
                "compiler",
                format!("{} not found on PATH", compiler.display()),
            )
        })
}
