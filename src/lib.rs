#![allow(clippy::module_inception)]

pub mod analyzer;
pub mod ast;
pub mod errors;
pub mod macros;
pub mod symtab;
