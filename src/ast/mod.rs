/// AST (Abstract Syntax Tree) module
/// Contains the tree shape the parser hands to the semantic analyzer
///
/// Submodules:
/// - ast: The node structure, node kinds and the tree listing
/// - declarations: Constructors for declaration and parameter nodes
/// - expressions: Constructors for expression nodes
/// - statements: Constructors for statement nodes
/// - types: Semantic types and operators
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
