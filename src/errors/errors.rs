use std::fmt::Display;

use thiserror::Error;

/// A semantic diagnostic
///
/// Diagnostics never stop the analysis. Both passes collect them and hand them
/// back to the caller, which decides how to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    line: u32,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: u32) -> Self {
        Diagnostic { kind, line }
    }

    pub fn get_kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    /// The identifier the diagnostic is about, when it names one.
    pub fn get_name(&self) -> Option<&str> {
        match &self.kind {
            DiagnosticKind::Redeclared { name }
            | DiagnosticKind::UndeclaredVariable { name }
            | DiagnosticKind::UndeclaredFunction { name }
            | DiagnosticKind::VoidVariableDeclared { name }
            | DiagnosticKind::InvalidArrayIndexType { name }
            | DiagnosticKind::InvalidArrayIndexTarget { name }
            | DiagnosticKind::InvalidFunctionCall { name } => Some(name),
            DiagnosticKind::InvalidCondition
            | DiagnosticKind::InvalidAssignment
            | DiagnosticKind::InvalidOperation
            | DiagnosticKind::InvalidReturn => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            DiagnosticKind::Redeclared { .. } => "Redeclared",
            DiagnosticKind::UndeclaredVariable { .. } => "UndeclaredVariable",
            DiagnosticKind::UndeclaredFunction { .. } => "UndeclaredFunction",
            DiagnosticKind::VoidVariableDeclared { .. } => "VoidVariableDeclared",
            DiagnosticKind::InvalidCondition => "InvalidCondition",
            DiagnosticKind::InvalidAssignment => "InvalidAssignment",
            DiagnosticKind::InvalidOperation => "InvalidOperation",
            DiagnosticKind::InvalidReturn => "InvalidReturn",
            DiagnosticKind::InvalidArrayIndexType { .. } => "InvalidArrayIndexType",
            DiagnosticKind::InvalidArrayIndexTarget { .. } => "InvalidArrayIndexTarget",
            DiagnosticKind::InvalidFunctionCall { .. } => "InvalidFunctionCall",
        }
    }
}

impl Display for Diagnostic {
    /// Renders the diagnostic as one line of the compiler listing.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self.line;
        match &self.kind {
            DiagnosticKind::Redeclared { name } => {
                write!(f, "Error: Symbol \"{}\" is redefined at line {}", name, line)
            }
            DiagnosticKind::UndeclaredVariable { name } => {
                write!(f, "Error: Undeclared variable \"{}\" is used at line {}", name, line)
            }
            DiagnosticKind::UndeclaredFunction { name } => {
                write!(f, "Error: Undeclared function \"{}\" is called at line {}", name, line)
            }
            DiagnosticKind::VoidVariableDeclared { name } => write!(
                f,
                "Error: The void-type variable is declared at line {} (name : \"{}\")",
                line, name
            ),
            DiagnosticKind::InvalidCondition => write!(f, "Error: Invalid condition at line {}", line),
            DiagnosticKind::InvalidAssignment => write!(f, "Error: Invalid assignment at line {}", line),
            DiagnosticKind::InvalidOperation => write!(f, "Error: Invalid operation at line {}", line),
            DiagnosticKind::InvalidReturn => write!(f, "Error: Invalid return at line {}", line),
            DiagnosticKind::InvalidArrayIndexType { name } => write!(
                f,
                "Error: Invalid array indexing at line {} (name : \"{}\"). Indices should be integer",
                line, name
            ),
            DiagnosticKind::InvalidArrayIndexTarget { name } => write!(
                f,
                "Error: Invalid array indexing at line {} (name : \"{}\"). Indexing can only be allowed for int[] variables",
                line, name
            ),
            DiagnosticKind::InvalidFunctionCall { name } => write!(
                f,
                "Error: Invalid function call at line {} (name : \"{}\")",
                line, name
            ),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("symbol {name:?} is redeclared")]
    Redeclared { name: String },
    #[error("variable {name:?} not declared")]
    UndeclaredVariable { name: String },
    #[error("function {name:?} not declared")]
    UndeclaredFunction { name: String },
    #[error("variable {name:?} declared with type void")]
    VoidVariableDeclared { name: String },
    #[error("condition is not an integer")]
    InvalidCondition,
    #[error("assignment operands are not integers")]
    InvalidAssignment,
    #[error("operands are not integers")]
    InvalidOperation,
    #[error("return value does not match the function's return type")]
    InvalidReturn,
    #[error("index into {name:?} is not an integer")]
    InvalidArrayIndexType { name: String },
    #[error("{name:?} is not an integer array")]
    InvalidArrayIndexTarget { name: String },
    #[error("invalid call to {name:?}")]
    InvalidFunctionCall { name: String },
}

/// Errors raised by the scope table itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("scope {scope:?} already exists")]
    ScopeAlreadyExists { scope: String },
    #[error("symbol {name:?} not found")]
    NotFound { name: String },
    #[error("{name:?} is not a function")]
    NotAFunction { name: String },
}

/// Fatal analysis failures
///
/// These mean the tree broke the parser's structural contract or the scope
/// bookkeeping went out of step. They end the pass instead of being reported
/// as diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{node} node at line {line} is missing its child in slot {slot}")]
    MissingChild { node: String, line: u32, slot: usize },
    #[error("{node} node at line {line} has no name")]
    MissingName { node: String, line: u32 },
    #[error("scope {scope:?} was never built")]
    UnknownScope { scope: String },
    #[error(transparent)]
    Table(#[from] TableError),
}
