//! Common test utilities for incmine-core
//!
//! On-disk fixture repositories and scripted compile backends.

mod fixtures;

pub use backends::*;
pub use fixtures::*;
