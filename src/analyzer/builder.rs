use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{DeclKind, NodeKind, ParamKind, StmtKind, TreeNode},
        types::ExpType,
    },
    errors::errors::{AnalysisError, Diagnostic, DiagnosticKind},
    symtab::{
        stack::ScopeStack,
        symtab::{Binding, ScopeId, ScopeTable},
    },
};

use super::traverse::{node_name, Visitor};

/// Preorder pass registering every declaration in the scope table.
pub struct SymbolBuilder<'a> {
    table: &'a mut ScopeTable,
    /// Next free memory location, shared by every scope of the run.
    location: &'a mut u32,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> SymbolBuilder<'a> {
    pub fn new(table: &'a mut ScopeTable, location: &'a mut u32) -> Self {
        SymbolBuilder {
            table,
            location,
            diagnostics: vec![],
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, kind: DiagnosticKind, line: u32) {
        let diagnostic = Diagnostic::new(kind, line);
        debug!(%diagnostic, "symbol table error");
        self.diagnostics.push(diagnostic);
    }

    fn next_location(&mut self) -> u32 {
        let location = *self.location;
        *self.location += 1;
        location
    }

    /// Declares a variable, array or parameter in the current scope.
    ///
    /// Returns false when the name is already declared there.
    fn declare(&mut self, scope: ScopeId, name: &str, ty: ExpType, line: u32) -> bool {
        if self.table.lookup_local(scope, name).is_some() {
            self.report(DiagnosticKind::Redeclared { name: name.to_string() }, line);
            return false;
        }
        let location = self.next_location();
        trace!(name, %ty, location, "declare");
        self.table.insert_symbol(scope, name, ty, line, Binding::Variable { location });
        true
    }

    fn declare_function(&mut self, node: &TreeNode, name: &str, scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
        if self.table.lookup_local(ScopeId::GLOBAL, name).is_some() {
            self.report(DiagnosticKind::Redeclared { name: name.to_string() }, node.line);
        } else {
            let params = param_types(node);
            trace!(name, ret = %node.attr.declared, params = params.len(), "declare function");
            self.table.insert_symbol(
                ScopeId::GLOBAL,
                name,
                node.attr.declared,
                node.line,
                Binding::Function { params },
            );
        }
        // A redeclared function still gets a scope so its body resolves and the
        // pop after its sibling list stays balanced.
        scopes.push_function(self.table, name, node.line)?;
        Ok(())
    }
}

/// Declared types of a function's parameters, in order.
fn param_types(function: &TreeNode) -> Vec<ExpType> {
    let Some(params) = function.child(0) else {
        return vec![];
    };
    params
        .siblings()
        .filter(|param| matches!(param.kind, NodeKind::Param(ParamKind::Scalar | ParamKind::ArrayParam)))
        .map(|param| param.attr.declared)
        .collect()
}

impl Visitor for SymbolBuilder<'_> {
    fn preorder(&mut self, node: &mut TreeNode, scopes: &mut ScopeStack) -> Result<(), AnalysisError> {
        match node.kind {
            NodeKind::Stmt(StmtKind::Compound) => {
                scopes.push(self.table, node.line)?;
            }
            NodeKind::Decl(DeclKind::Var) => {
                let name = node_name(node)?;
                let declared = node.attr.declared;
                if self.declare(scopes.current(), name, declared, node.line) && declared == ExpType::Void {
                    self.report(DiagnosticKind::VoidVariableDeclared { name: name.to_string() }, node.line);
                }
            }
            NodeKind::Decl(DeclKind::Array) => {
                let name = node_name(node)?;
                let declared = node.attr.declared;
                if self.declare(scopes.current(), name, declared, node.line) && declared != ExpType::IntArray {
                    self.report(DiagnosticKind::VoidVariableDeclared { name: name.to_string() }, node.line);
                }
            }
            NodeKind::Decl(DeclKind::Function) => {
                let name = node_name(node)?;
                self.declare_function(node, name, scopes)?;
            }
            NodeKind::Param(ParamKind::Scalar | ParamKind::ArrayParam) => {
                let name = node_name(node)?;
                self.declare(scopes.current(), name, node.attr.declared, node.line);
            }
            NodeKind::Param(ParamKind::Void) | NodeKind::Decl(DeclKind::Type) | NodeKind::Stmt(_) | NodeKind::Exp(_) => {}
        }
        Ok(())
    }
}
