//! Process execution feature

mod error;
mod runner;

pub use error::RunnerError;
pub use runner::{CommandSpec, ExitStatus, ProcessOutput, ProcessRunner};
