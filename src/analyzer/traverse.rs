use crate::{
    ast::ast::TreeNode,
    errors::errors::AnalysisError,
    symtab::stack::ScopeStack,
};

/// Hooks run by `traverse` at every node.
///
/// A visitor tracking scopes opens one in `preorder` for every node whose
/// `opens_scope()` is true; `traverse` closes it. Scopes a visitor does not
/// open are never closed, so the default hooks leave the stack untouched.
pub trait Visitor {
    /// Runs before any child of `node` is visited.
    fn preorder(&mut self, _node: &mut TreeNode, _scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
        Ok(())
    }
    /// Runs once every child of `node` has been visited.
    fn postorder(&mut self, _node: &mut TreeNode, _scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
        Ok(())
    }
}

/// Walks `node`, its subtree and its sibling list.
///
/// Order at each node: preorder hook, children in slot order (empty slots
/// skipped), postorder hook, then the next sibling. Scopes opened by nodes of a
/// sibling list are popped once the whole list has been visited, innermost
/// first. A block's scope therefore stays active until every node after it in
/// the same list has been visited, so names declared inside a block remain
/// visible to its later siblings.
///
/// Sibling lists are walked in a loop; recursion depth follows the nesting of
/// the tree, not the length of its lists.
pub fn traverse<V: Visitor>(node: &mut TreeNode, visitor: &mut V, scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
    let mut opened = 0;
    let mut current = Some(node);
    while let Some(node) = current {
        let depth = scopes.depth();
        visitor.preorder(node, scopes)?;
        if node.opens_scope() && scopes.depth() > depth {
            opened += 1;
        }
        for child in node.children.iter_mut().flatten() {
            traverse(child, visitor, scopes)?;
        }
        visitor.postorder(node, scopes)?;
        current = node.sibling.as_deref_mut();
    }
    for _ in 0..opened {
        scopes.pop();
    }
    Ok(())
}

/// The name a node must carry.
pub fn node_name(node: &TreeNode) -> Result<&str, AnalysisError> {
    node.name().ok_or_else(|| AnalysisError::MissingName {
        node: format!("{:?}", node.kind),
        line: node.line,
    })
}

/// The child a node must have in `slot`.
pub fn required_child(node: &TreeNode, slot: usize) -> Result<&TreeNode, AnalysisError> {
    node.child(slot).ok_or_else(|| AnalysisError::MissingChild {
        node: format!("{:?}", node.kind),
        line: node.line,
        slot,
    })
}
