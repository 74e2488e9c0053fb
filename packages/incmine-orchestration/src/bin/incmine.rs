//! incmine CLI
//!
//! # Usage
//!
//! ```bash
//! # Mine a repository with clang from PATH, 8 workers, 20 tries per file
//! incmine clang ./linux-drivers -t 8 -m 20 --output report.json
//!
//! # Patched compiler with scalar interpolation pragmas, logs to a file
//! incmine /opt/llvm/bin/clang ./repo --insert-pragmas -l mine.log
//! ```

use anyhow::Context;
use clap::Parser;
use incmine_orchestration::{CliArgs, MiningOrchestrator};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log.as_deref())?;

    let config = args.to_config()?;
    let orchestrator = MiningOrchestrator::new(config)?;
    let report = orchestrator
        .run(&args.repo)
        .with_context(|| format!("mining {} failed", args.repo.display()))?;

    println!("{}", report.stats);

    if let Some(output) = &args.output {
        report
            .write_json(output)
            .with_context(|| format!("writing report to {}", output.display()))?;
        tracing::info!("Report written to {}", output.display());
    }

    Ok(())
}

fn init_logging(log: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
