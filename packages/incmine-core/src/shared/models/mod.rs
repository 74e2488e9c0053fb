mod include;
mod repo_file;

pub use include::{IncludeDirective, IncludeKind};
pub use repo_file::{normalize_path, RepoFile};
