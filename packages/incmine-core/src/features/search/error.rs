use thiserror::Error;

/// Broken search-state invariants
///
/// These abort the search of one root file; the batch keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A file reached through a descending frame has no recorded parent
    #[error("no parent recorded for {file}")]
    MissingParent { file: String },

    /// The stack lost its start frame
    #[error("search stack is empty")]
    EmptyStack,
}
