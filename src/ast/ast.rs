use std::fmt::Display;

use super::types::{ExpType, Operator};

/// Number of child slots every node carries.
pub const MAX_CHILDREN: usize = 3;

/// Statement Kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    If,
    IfElse,
    While,
    Return,
    ReturnVoid,
    Compound,
    Assign,
}

/// Expression Kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpKind {
    BinaryOp,
    Const,
    Identifier,
    ArrayElement,
    Call,
}

/// Declaration Kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Array,
    Function,
    Type,
}

/// Parameter Kinds
///
/// `Void` is the sentinel the parser emits for an empty `(void)` parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    ArrayParam,
    Void,
}

/// Node Kinds
///
/// The outer tag of a tree node, each variant carrying its sub-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Stmt(StmtKind),
    Exp(ExpKind),
    Decl(DeclKind),
    Param(ParamKind),
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attr {
    /// Identifier, callee or declared name.
    pub name: Option<String>,
    /// Literal value of a constant, or the size of an array declaration.
    pub value: i32,
    pub op: Option<Operator>,
    /// Type written in the source for declarations and parameters.
    pub declared: ExpType,
}

/// Syntax tree node
///
/// Nodes form a tree through their child slots and a list through `sibling`,
/// the way the parser links declarations, statements and arguments that sit at
/// the same syntactic level.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub kind: NodeKind,
    pub children: [Option<Box<TreeNode>>; MAX_CHILDREN],
    pub sibling: Option<Box<TreeNode>>,
    pub line: u32,
    /// Resolved type, written by the type checker.
    pub ty: ExpType,
    pub attr: Attr,
}

impl TreeNode {
    pub fn new(kind: NodeKind, line: u32) -> Self {
        TreeNode {
            kind,
            children: [None, None, None],
            sibling: None,
            line,
            ty: ExpType::Untyped,
            attr: Attr::default(),
        }
    }

    pub fn new_stmt(kind: StmtKind, line: u32) -> Self {
        TreeNode::new(NodeKind::Stmt(kind), line)
    }

    pub fn new_exp(kind: ExpKind, line: u32) -> Self {
        TreeNode::new(NodeKind::Exp(kind), line)
    }

    pub fn new_decl(kind: DeclKind, line: u32) -> Self {
        TreeNode::new(NodeKind::Decl(kind), line)
    }

    pub fn new_param(kind: ParamKind, line: u32) -> Self {
        TreeNode::new(NodeKind::Param(kind), line)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.attr.name = Some(name.to_string());
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.attr.value = value;
        self
    }

    pub fn with_op(mut self, op: Operator) -> Self {
        self.attr.op = Some(op);
        self
    }

    pub fn with_declared(mut self, declared: ExpType) -> Self {
        self.attr.declared = declared;
        self
    }

    /// Places `child` in slot `index`. Passing `None` leaves the slot empty.
    pub fn with_child(mut self, index: usize, child: Option<TreeNode>) -> Self {
        self.children[index] = child.map(Box::new);
        self
    }

    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        self.children.get(index)?.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.attr.name.as_deref()
    }

    /// Appends `node` to the end of this node's sibling list.
    pub fn append_sibling(&mut self, node: TreeNode) {
        let mut tail = &mut self.sibling;
        while let Some(next) = tail {
            tail = &mut next.sibling;
        }
        *tail = Some(Box::new(node));
    }

    /// Iterates this node followed by every node reachable through `sibling`.
    pub fn siblings(&self) -> Siblings<'_> {
        Siblings { next: Some(self) }
    }

    /// Whether visiting this node opens a new scope.
    ///
    /// Only compound statements and function declarations do.
    pub fn opens_scope(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Stmt(StmtKind::Compound) | NodeKind::Decl(DeclKind::Function)
        )
    }
}

impl Drop for TreeNode {
    /// Unlinks the sibling list before dropping it so long lists free in a loop.
    fn drop(&mut self) {
        let mut next = self.sibling.take();
        while let Some(mut node) = next {
            next = node.sibling.take();
        }
    }
}

pub struct Siblings<'a> {
    next: Option<&'a TreeNode>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.sibling.as_deref();
        Some(current)
    }
}

impl Display for TreeNode {
    /// Prints the tree as an indented listing, two spaces per nesting level.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_listing(f, self, 2)
    }
}

fn write_listing(f: &mut std::fmt::Formatter<'_>, tree: &TreeNode, indent: usize) -> std::fmt::Result {
    for node in tree.siblings() {
        write!(f, "{:indent$}", "")?;
        let name = node.name().unwrap_or("");
        match node.kind {
            NodeKind::Stmt(kind) => match kind {
                StmtKind::If => writeln!(f, "If Statement:")?,
                StmtKind::IfElse => writeln!(f, "If-Else Statement:")?,
                StmtKind::While => writeln!(f, "While Statement:")?,
                StmtKind::ReturnVoid => writeln!(f, "Non-value Return Statement")?,
                StmtKind::Return => writeln!(f, "Return Statement:")?,
                StmtKind::Compound => writeln!(f, "Compound Statement:")?,
                StmtKind::Assign => writeln!(f, "Assign:")?,
            },
            NodeKind::Exp(kind) => match kind {
                ExpKind::BinaryOp => match node.attr.op {
                    Some(op) => writeln!(f, "Op: {}", op)?,
                    None => writeln!(f, "Op:")?,
                },
                ExpKind::Const => writeln!(f, "Const: {}", node.attr.value)?,
                ExpKind::Identifier | ExpKind::ArrayElement => writeln!(f, "Variable: name = {}", name)?,
                ExpKind::Call => writeln!(f, "Call: function name = {}", name)?,
            },
            NodeKind::Decl(kind) => match kind {
                DeclKind::Var => writeln!(f, "Variable Declaration: name = {}, type = {}", name, node.attr.declared)?,
                DeclKind::Array => writeln!(f, "Variable Declaration: name = {}, type = {}", name, node.attr.declared)?,
                DeclKind::Function => writeln!(f, "Function Declaration: name = {}, return type = {}", name, node.attr.declared)?,
                DeclKind::Type => writeln!(f, "Type Declaration")?,
            },
            NodeKind::Param(kind) => match kind {
                ParamKind::Scalar | ParamKind::ArrayParam => writeln!(f, "Parameter: name = {}, type = {}", name, node.attr.declared)?,
                ParamKind::Void => writeln!(f, "Void Parameter")?,
            },
        }
        for child in node.children.iter().flatten() {
            write_listing(f, child, indent + 2)?;
        }
    }
    Ok(())
}
