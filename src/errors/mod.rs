//! Error types and error handling for the front end.
//!
//! This module defines the error types used by the semantic analyzer.
//! It includes:
//!
//! - Semantic diagnostics with their source line and offending name
//! - Scope table errors
//! - Fatal analysis errors for malformed trees
//! - The listing text each diagnostic renders to

pub mod errors;
