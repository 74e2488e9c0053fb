//! Feature slices, leaf-first
//!
//! discovery → includes → dep_graph → search, with search driving
//! compile (→ process) and remarks for every attempt.

pub mod compile;
pub mod dep_graph;
pub mod discovery;
pub mod includes;
pub mod process;
pub mod remarks;
pub mod search;
