use super::{
    ast::{DeclKind, ParamKind, TreeNode},
    types::ExpType,
};

/// Variable Declaration
/// `int name;` The declared type is kept as written, so `void name;` reaches the analyzer.
pub fn var_decl(line: u32, declared: ExpType, name: &str) -> TreeNode {
    TreeNode::new_decl(DeclKind::Var, line)
        .with_name(name)
        .with_declared(declared)
}

/// Array Declaration
/// `int name[size];` is declared as `IntArray`; `void name[size];` keeps `Void`.
pub fn array_decl(line: u32, declared: ExpType, name: &str, size: i32) -> TreeNode {
    TreeNode::new_decl(DeclKind::Array, line)
        .with_name(name)
        .with_declared(declared)
        .with_value(size)
}

/// Function Declaration
/// Parameters are a sibling list in slot 0 (a single `void_param` for none), the body is slot 1.
pub fn fn_decl(line: u32, return_type: ExpType, name: &str, params: TreeNode, body: TreeNode) -> TreeNode {
    TreeNode::new_decl(DeclKind::Function, line)
        .with_name(name)
        .with_declared(return_type)
        .with_child(0, Some(params))
        .with_child(1, Some(body))
}

/// Scalar Parameter
/// `int name`
pub fn param(line: u32, name: &str) -> TreeNode {
    TreeNode::new_param(ParamKind::Scalar, line)
        .with_name(name)
        .with_declared(ExpType::Integer)
}

/// Array Parameter
/// `int name[]`
pub fn array_param(line: u32, name: &str) -> TreeNode {
    TreeNode::new_param(ParamKind::ArrayParam, line)
        .with_name(name)
        .with_declared(ExpType::IntArray)
}

/// Void Parameter
/// The `(void)` parameter list.
pub fn void_param(line: u32) -> TreeNode {
    TreeNode::new_param(ParamKind::Void, line).with_declared(ExpType::Void)
}
