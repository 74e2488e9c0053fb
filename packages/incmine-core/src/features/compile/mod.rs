//! Compile feature: command construction and pragma rewriting

mod backend;
mod pragma;

pub use backend::{locate_compiler, ClangBackend, CompileBackend, CompileRequest};
pub use pragma::{insert_pragmas, SCALAR_INTERPOLATION_PRAGMA};
