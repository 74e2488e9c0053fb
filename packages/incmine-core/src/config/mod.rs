//! Miner configuration
//!
//! Values come from (lowest to highest precedence) the defaults below, an
//! optional YAML file, and command-line overrides applied by the binary.
//!
//! ```yaml
//! compiler: /opt/llvm/bin/clang
//! max_tries: 20
//! threads: 8
//! timeout_secs: 5
//! insert_pragmas: true
//! extra_args: ["-DNDEBUG"]
//! ```

mod error;

pub use error::{ConfigError, ConfigResult};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for mining a single repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinerConfig {
    /// Compiler executable (path or name looked up on PATH)
    pub compiler: PathBuf,

    /// Maximum compiler invocations per root file (1..=10000)
    pub max_tries: usize,

    /// Worker threads (0=auto, ..=256)
    pub threads: usize,

    /// Wall-clock limit for one compiler invocation in seconds (1..=3600)
    pub timeout_secs: u64,

    /// Extensions of compilable files
    pub source_extensions: Vec<String>,

    /// Extensions of header files
    pub header_extensions: Vec<String>,

    /// Extra arguments appended to every compiler invocation
    pub extra_args: Vec<String>,

    /// Insert scalar-interpolation pragmas before `for` loops and compile
    /// the rewritten source from stdin
    pub insert_pragmas: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("clang"),
            max_tries: 10,
            threads: 0,
            timeout_secs: 5,
            source_extensions: vec!["c".to_string()],
            header_extensions: vec!["h".to_string()],
            extra_args: Vec::new(),
            insert_pragmas: false,
        }
    }
}

impl MinerConfig {
    /// Load configuration from a YAML file and validate it
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text and validate it
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: MinerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_tries < 1 || self.max_tries > 10_000 {
            return Err(ConfigError::range_with_hint(
                "max_tries",
                self.max_tries,
                1,
                10_000,
                "At least one compile attempt is needed per file",
            ));
        }

        if self.threads > 256 {
            return Err(ConfigError::range_with_hint(
                "threads",
                self.threads,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }

        if self.timeout_secs < 1 || self.timeout_secs > 3600 {
            return Err(ConfigError::range_with_hint(
                "timeout_secs",
                self.timeout_secs,
                1,
                3600,
                "A single compile should not run longer than an hour",
            ));
        }

        if self.compiler.as_os_str().is_empty() {
            return Err(ConfigError::invalid("compiler", "must not be empty"));
        }

        if self.source_extensions.is_empty() {
            return Err(ConfigError::invalid(
                "source_extensions",
                "at least one compilable extension is required",
            ));
        }

        for ext in self.source_extensions.iter().chain(&self.header_extensions) {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::invalid(
                    "extensions",
                    format!("'{}' must be a bare extension such as 'c'", ext),
                ));
            }
        }

        Ok(())
    }

    /// Effective worker count
    pub fn worker_threads(&self) -> usize {
        match self.threads {
            0 => num_cpus::get(),
            n => n,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Extensions of every file that takes part in the dependency graph
    pub fn all_extensions(&self) -> Vec<String> {
        let mut all = self.source_extensions.clone();
        for ext in &self.header_extensions {
            if !all.contains(ext) {
                all.push(ext.clone());
            }
        }
        all
    }

    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| self.source_extensions.iter().any(|s| s == ext))
    }
}
