use lazy_static::lazy_static;

use crate::ast::types::ExpType;

/// A function every program can call without declaring it.
#[derive(Debug, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub return_type: ExpType,
    pub params: Vec<ExpType>,
}

lazy_static! {
    /// Seeded into the global scope, in this order, before any user code is seen.
    pub static ref BUILTINS: Vec<Builtin> = vec![
        Builtin {
            name: "input",
            return_type: ExpType::Integer,
            params: vec![],
        },
        Builtin {
            name: "output",
            return_type: ExpType::Void,
            params: vec![ExpType::Integer],
        },
    ];
}
