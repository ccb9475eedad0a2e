use super::ast::{StmtKind, TreeNode};

/// Compound Statement
/// A `{ ... }` block. Local declarations sit in slot 0, statements in slot 1.
pub fn compound(line: u32, locals: Option<TreeNode>, body: Option<TreeNode>) -> TreeNode {
    TreeNode::new_stmt(StmtKind::Compound, line)
        .with_child(0, locals)
        .with_child(1, body)
}

/// If Statement
pub fn if_stmt(line: u32, condition: TreeNode, then_body: TreeNode) -> TreeNode {
    TreeNode::new_stmt(StmtKind::If, line)
        .with_child(0, Some(condition))
        .with_child(1, Some(then_body))
}

/// If-Else Statement
pub fn if_else_stmt(line: u32, condition: TreeNode, then_body: TreeNode, else_body: TreeNode) -> TreeNode {
    TreeNode::new_stmt(StmtKind::IfElse, line)
        .with_child(0, Some(condition))
        .with_child(1, Some(then_body))
        .with_child(2, Some(else_body))
}

/// While Statement
pub fn while_stmt(line: u32, condition: TreeNode, body: TreeNode) -> TreeNode {
    TreeNode::new_stmt(StmtKind::While, line)
        .with_child(0, Some(condition))
        .with_child(1, Some(body))
}

/// Return Statement
/// `return value;`
pub fn return_stmt(line: u32, value: TreeNode) -> TreeNode {
    TreeNode::new_stmt(StmtKind::Return, line).with_child(0, Some(value))
}

/// Non-value Return Statement
/// `return;`
pub fn return_void(line: u32) -> TreeNode {
    TreeNode::new_stmt(StmtKind::ReturnVoid, line)
}

/// Assignment Statement
/// `target = value;` where the target is an identifier or an array element.
pub fn assign(line: u32, target: TreeNode, value: TreeNode) -> TreeNode {
    TreeNode::new_stmt(StmtKind::Assign, line)
        .with_child(0, Some(target))
        .with_child(1, Some(value))
}
