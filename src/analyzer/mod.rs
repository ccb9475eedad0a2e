//! Semantic analysis module.
//!
//! Runs two passes over the syntax tree, both driven by the same traversal:
//!
//! - `builder` - Preorder pass registering declarations and their scopes
//! - `checker` - Postorder pass typing every expression and validating
//!   conditions, assignments, operations, returns, indexing and calls
//! - `traverse` - The traversal engine and its scope teardown timing
//! - `analyzer` - The per-run state tying the passes together
//!
//! Neither pass stops at a semantic error. Diagnostics are collected and
//! returned; only a malformed tree or a scope bookkeeping failure ends a pass.

pub mod analyzer;
pub mod builder;
pub mod checker;
pub mod traverse;
