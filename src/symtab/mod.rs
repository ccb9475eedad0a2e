//! Symbol table module.
//!
//! Holds every scope and symbol of a compilation run:
//!
//! - `symtab` - The scope arena, symbols and the symbol table listing
//! - `stack` - The active scope path of a traversal and scope naming
//! - `builtins` - Functions seeded into the global scope

pub mod builtins;
pub mod stack;
pub mod symtab;
