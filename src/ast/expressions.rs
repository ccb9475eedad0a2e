use super::{
    ast::{ExpKind, TreeNode},
    types::Operator,
};

// LITERALS

/// Constant Expression
/// An integer literal.
pub fn constant(line: u32, value: i32) -> TreeNode {
    TreeNode::new_exp(ExpKind::Const, line).with_value(value)
}

// NAMES

/// Identifier Expression
/// A plain use of a variable (or, erroneously, a function) name.
pub fn identifier(line: u32, name: &str) -> TreeNode {
    TreeNode::new_exp(ExpKind::Identifier, line).with_name(name)
}

/// Array Element Expression
/// `name[index]`
pub fn array_element(line: u32, name: &str, index: TreeNode) -> TreeNode {
    TreeNode::new_exp(ExpKind::ArrayElement, line)
        .with_name(name)
        .with_child(0, Some(index))
}

// COMPOUND EXPRESSIONS

/// Binary Expression
pub fn binary(line: u32, op: Operator, left: TreeNode, right: TreeNode) -> TreeNode {
    TreeNode::new_exp(ExpKind::BinaryOp, line)
        .with_op(op)
        .with_child(0, Some(left))
        .with_child(1, Some(right))
}

/// Call Expression
/// Arguments are linked through their sibling pointers, first argument in slot 0.
pub fn call(line: u32, callee: &str, arguments: Option<TreeNode>) -> TreeNode {
    TreeNode::new_exp(ExpKind::Call, line)
        .with_name(callee)
        .with_child(0, arguments)
}
