//! Command-line arguments
//!
//! Flags override values from `--config`, which override the defaults.

use clap::Parser;
use incmine_core::MinerConfig;
use std::path::PathBuf;

use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "incmine")]
#[command(about = "Resolve include paths by trial compilation and collect vectorization remarks", long_about = None)]
pub struct CliArgs {
    /// Compiler executable (path or name on PATH)
    pub compiler: PathBuf,

    /// Repository root
    pub repo: PathBuf,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Maximum compile attempts per file
    #[arg(short, long)]
    pub max_tries: Option<usize>,

    /// Write logs to this file instead of stderr
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Per-attempt timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Insert scalar interpolation pragmas before every `for` loop
    #[arg(long)]
    pub insert_pragmas: bool,

    /// Extra compiler argument (repeatable)
    #[arg(long = "extra-arg", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}

impl CliArgs {
    /// Effective configuration, validated
    pub fn to_config(&self) -> Result<MinerConfig> {
        let mut config = match &self.config {
            Some(path) => MinerConfig::from_yaml_file(path)?,
            None => MinerConfig::default(),
        };

        config.compiler = self.compiler.clone();
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(max_tries) = self.max_tries {
            config.max_tries = max_tries;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.insert_pragmas {
            config.insert_pragmas = true;
        }
        config.extra_args.extend(self.extra_args.iter().cloned());

        config.validate()?;
        Ok(config)
    }
}
