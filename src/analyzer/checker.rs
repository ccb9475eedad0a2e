use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{DeclKind, ExpKind, NodeKind, StmtKind, TreeNode},
        types::ExpType,
    },
    errors::errors::{AnalysisError, Diagnostic, DiagnosticKind},
    symtab::{
        stack::ScopeStack,
        symtab::{ScopeId, ScopeTable},
    },
};

use super::traverse::{node_name, required_child, Visitor};

/// Postorder pass resolving and validating the type of every expression.
///
/// Reads the scopes a `SymbolBuilder` run left in the table. The only table
/// writes are reference lines for resolved identifiers.
pub struct TypeChecker<'a> {
    table: &'a mut ScopeTable,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(table: &'a mut ScopeTable) -> Self {
        TypeChecker {
            table,
            diagnostics: vec![],
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, kind: DiagnosticKind, line: u32) {
        let diagnostic = Diagnostic::new(kind, line);
        debug!(%diagnostic, "type error");
        self.diagnostics.push(diagnostic);
    }

    fn check_condition(&mut self, node: &TreeNode) -> Result<(), AnalysisError> {
        if required_child(node, 0)?.ty != ExpType::Integer {
            self.report(DiagnosticKind::InvalidCondition, node.line);
        }
        Ok(())
    }

    fn check_return(&mut self, line: u32, actual: ExpType, scopes: &ScopeStack) {
        let expected = scopes
            .enclosing_function(self.table)
            .and_then(|function| self.table.lookup_local(ScopeId::GLOBAL, function))
            .map(|symbol| symbol.ty);
        if expected != Some(actual) {
            trace!(?expected, %actual, line, "return mismatch");
            self.report(DiagnosticKind::InvalidReturn, line);
        }
    }

    /// Types an operator node from its two children.
    fn check_operands(&mut self, node: &mut TreeNode, invalid: DiagnosticKind) -> Result<(), AnalysisError> {
        let left = required_child(node, 0)?.ty;
        let right = required_child(node, 1)?.ty;
        if left == ExpType::Integer && right == ExpType::Integer {
            node.ty = ExpType::Integer;
        } else {
            self.report(invalid, node.line);
        }
        Ok(())
    }

    fn check_identifier(&mut self, node: &mut TreeNode, scope: ScopeId) -> Result<(), AnalysisError> {
        let name = node_name(node)?;
        let Some(ty) = self.table.lookup(scope, name).map(|symbol| symbol.ty) else {
            let kind = if self.table.param_count(name).is_ok() {
                DiagnosticKind::UndeclaredFunction { name: name.to_string() }
            } else {
                DiagnosticKind::UndeclaredVariable { name: name.to_string() }
            };
            self.report(kind, node.line);
            return Ok(());
        };
        self.table.add_reference(scope, name, node.line)?;
        node.ty = ty;
        Ok(())
    }

    fn check_array_element(&mut self, node: &mut TreeNode, scope: ScopeId) -> Result<(), AnalysisError> {
        let name = node_name(node)?;
        let index = required_child(node, 0)?.ty;
        let Some(ty) = self.table.lookup(scope, name).map(|symbol| symbol.ty) else {
            self.report(DiagnosticKind::UndeclaredVariable { name: name.to_string() }, node.line);
            return Ok(());
        };
        if index != ExpType::Integer {
            self.report(DiagnosticKind::InvalidArrayIndexType { name: name.to_string() }, node.line);
        } else if ty != ExpType::IntArray {
            self.report(DiagnosticKind::InvalidArrayIndexTarget { name: name.to_string() }, node.line);
        } else {
            self.table.add_reference(scope, name, node.line)?;
            node.ty = ExpType::Integer;
        }
        Ok(())
    }

    fn check_call(&mut self, node: &mut TreeNode, scope: ScopeId) -> Result<(), AnalysisError> {
        let name = node_name(node)?.to_string();
        let Some(callee) = self.table.lookup_local(ScopeId::GLOBAL, &name) else {
            self.report(DiagnosticKind::UndeclaredFunction { name }, node.line);
            return Ok(());
        };
        let (return_type, param_count) = (callee.ty, callee.param_count());
        let Some(param_count) = param_count else {
            self.report(DiagnosticKind::InvalidFunctionCall { name }, node.line);
            return Ok(());
        };

        let valid = match node.child(0) {
            None => param_count == 0,
            Some(arguments) => {
                let mut count = 0;
                let mut resolved = true;
                for argument in arguments.siblings() {
                    count += 1;
                    if let NodeKind::Exp(ExpKind::Identifier | ExpKind::ArrayElement) = argument.kind {
                        let argument_name = node_name(argument)?;
                        resolved &= self.table.lookup(scope, argument_name).is_some();
                    }
                }
                resolved && count == param_count
            }
        };
        if !valid {
            self.report(DiagnosticKind::InvalidFunctionCall { name: name.clone() }, node.line);
        }
        self.table.add_reference(ScopeId::GLOBAL, &name, node.line)?;
        node.ty = return_type;
        Ok(())
    }
}

impl Visitor for TypeChecker<'_> {
    fn preorder(&mut self, node: &mut TreeNode, scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
        match node.kind {
            NodeKind::Stmt(StmtKind::Compound) => {
                scopes.enter(self.table, node.line)?;
            }
            NodeKind::Decl(DeclKind::Function) => {
                let name = node_name(node)?;
                scopes.enter_function(self.table, name, node.line)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn postorder(&mut self, node: &mut TreeNode, scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
        let scope = scopes.current();
        match node.kind {
            NodeKind::Stmt(StmtKind::If | StmtKind::IfElse | StmtKind::While) => self.check_condition(node)?,
            NodeKind::Stmt(StmtKind::Return) => {
                let actual = required_child(node, 0)?.ty;
                self.check_return(node.line, actual, scopes);
            }
            NodeKind::Stmt(StmtKind::ReturnVoid) => self.check_return(node.line, ExpType::Void, scopes),
            NodeKind::Stmt(StmtKind::Assign) => self.check_operands(node, DiagnosticKind::InvalidAssignment)?,
            NodeKind::Exp(ExpKind::BinaryOp) => self.check_operands(node, DiagnosticKind::InvalidOperation)?,
            NodeKind::Exp(ExpKind::Const) => node.ty = ExpType::Integer,
            NodeKind::Exp(ExpKind::Identifier) => self.check_identifier(node, scope)?,
            NodeKind::Exp(ExpKind::ArrayElement) => self.check_array_element(node, scope)?,
            NodeKind::Exp(ExpKind::Call) => self.check_call(node, scope)?,
            NodeKind::Stmt(StmtKind::Compound) | NodeKind::Decl(_) | NodeKind::Param(_) => {}
        }
        Ok(())
    }
}
