use std::fmt::Display;

/// Semantic types
///
/// The language only knows integers, integer arrays and void. `Untyped` is the
/// placeholder every node starts with until the type checker resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpType {
    Integer,
    IntArray,
    Void,
    #[default]
    Untyped,
}

impl Display for ExpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpType::Integer => write!(f, "int"),
            ExpType::IntArray => write!(f, "int[]"),
            ExpType::Void => write!(f, "void"),
            ExpType::Untyped => write!(f, "null"),
        }
    }
}

/// Binary operators carried by `ExpKind::BinaryOp` nodes.
///
/// Every operator maps two integers to an integer, relational ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Over,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Over => "/",
            Operator::Less => "<",
            Operator::LessEquals => "<=",
            Operator::Greater => ">",
            Operator::GreaterEquals => ">=",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
        };
        write!(f, "{}", symbol)
    }
}
