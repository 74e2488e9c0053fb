//! Child process execution with a wall-clock timeout
//!
//! The runner owns a small tokio runtime and exposes a blocking API, so it
//! can be called straight from rayon workers. A process that outlives the
//! timeout is killed and reported as `ExitStatus::TimedOut`.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use super::error::RunnerError;

/// Program plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Exited(i32),
    /// Terminated by a signal
    Signaled,
    /// Killed after exceeding the timeout
    TimedOut,
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Exited(code) => write!(f, "exit code {}", code),
            ExitStatus::Signaled => write!(f, "killed by signal"),
            ExitStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Captured result of one process run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(status: ExitStatus, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn timed_out() -> Self {
        Self::new(ExitStatus::TimedOut, "", "")
    }

    /// Exited with status 0
    pub fn success(&self) -> bool {
        self.status == ExitStatus::Exited(0)
    }

    /// Record a failed stdin write in the captured diagnostics
    pub fn with_input_error(mut self, error: &std::io::Error) -> Self {
        if !self.stderr.is_empty() && !self.stderr.ends_with('\n') {
            self.stderr.push('\n');
        }
        self.stderr
            .push_str(&format!("incmine: failed to write process input: {}\n", error));
        self
    }
}

/// Blocking process runner with a per-run timeout
#[derive(Clone)]
pub struct ProcessRunner {
    runtime: Arc<Runtime>,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Result<Self, RunnerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("incmine-process")
            .enable_all()
            .build()
            .map_err(RunnerError::Runtime)?;
        Ok(Self::with_runtime(Arc::new(runtime), timeout))
    }

    pub fn with_runtime(runtime: Arc<Runtime>, timeout: Duration) -> Self {
        Self { runtime, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `command` to completion, feeding `input` on stdin if given
    ///
    /// Must not be called from inside a tokio runtime.
    pub fn execute(&self, command: &CommandSpec, input: Option<&str>) -> Result<ProcessOutput, RunnerError> {
        self.runtime.block_on(self.execute_async(command, input))
    }

    async fn execute_async(&self, command: &CommandSpec, input: Option<&str>) -> Result<ProcessOutput, RunnerError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            program: command.program.display().to_string(),
            source,
        })?;

        let stdin = child.stdin.take();
        let feed = async move {
            if let (Some(mut stdin), Some(text)) = (stdin, input) {
                match stdin.write_all(text.as_bytes()).await {
                    // The child may exit without reading all of its input
                    Err(e) if e.kind() != ErrorKind::BrokenPipe => return Some(e),
                    _ => {}
                }
            }
            None
        };

        let run = async {
            let (feed_error, output) = tokio::join!(feed, child.wait_with_output());
            Ok::<_, RunnerError>((feed_error, output?))
        };

        let (feed_error, output) = match tokio::time::timeout(self.timeout, run).await {
            Ok(result) => result?,
            Err(_) => {
                debug!("{} timed out after {:?}", command, self.timeout);
                return Ok(ProcessOutput::timed_out());
            }
        };

        let status = match output.status.code() {
            Some(code) => ExitStatus::Exited(code),
            None => ExitStatus::Signaled,
        };

        let captured = ProcessOutput::new(
            status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        Ok(match feed_error {
            Some(e) => {
                warn!("{}: writing stdin failed: {}", command, e);
                captured.with_input_error(&e)
            }
            None => captured,
        })
    }
}

impl fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
