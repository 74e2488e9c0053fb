use thiserror::Error;

/// Errors starting or talking to a child process
///
/// A non-zero exit, a timeout or a failed stdin write is not an error; see
/// `ExitStatus` and `ProcessOutput`.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
