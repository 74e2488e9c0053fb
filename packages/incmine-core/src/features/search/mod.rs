//! Per-file backtracking search
//!
//! frame → stack → resolver, with directories turning the live frames into
//! `-I` arguments.

mod directories;
mod error;
mod frame;
mod outcome;
mod resolver;
mod stack;

pub use directories::{canonical_key, derive_directory, resolve_directories};
pub use error::SearchError;
pub use frame::SearchFrame;
pub use outcome::{CompileOutcome, FailureReason};
pub use resolver::Resolver;
pub use stack::SearchStack;
