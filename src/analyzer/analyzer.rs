use tracing::debug;

use crate::{
    ast::ast::TreeNode,
    errors::errors::{AnalysisError, Diagnostic},
    symtab::{stack::ScopeStack, symtab::ScopeTable},
};

use super::{builder::SymbolBuilder, checker::TypeChecker, traverse::traverse};

/// Knobs of an analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Emit the symbol table listing at debug level once it is built.
    pub trace_analyze: bool,
}

/// Analyzer
/// Owns the state of one compilation run: the scope table, the memory
/// location counter and the error flag. Both passes read and write it.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    table: ScopeTable,
    location: u32,
    had_error: bool,
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Analyzer {
            table: ScopeTable::new(),
            location: 0,
            had_error: false,
            options,
        }
    }

    /// Registers every declaration of `tree` in the scope table.
    pub fn build_symtab(&mut self, tree: &mut TreeNode) -> Result<Vec<Diagnostic>, AnalysisError> {
        debug!(first_location = self.location, "building symbol table");
        let mut scopes = ScopeStack::new();
        let mut builder = SymbolBuilder::new(&mut self.table, &mut self.location);
        traverse(tree, &mut builder, &mut scopes)?;
        let diagnostics = builder.into_diagnostics();

        self.had_error |= !diagnostics.is_empty();
        debug!(
            scopes = self.table.scope_count(),
            diagnostics = diagnostics.len(),
            "symbol table built"
        );
        if self.options.trace_analyze {
            debug!("symbol table:\n{}", self.table);
        }
        Ok(diagnostics)
    }

    /// Resolves and validates the type of every node in `tree`.
    ///
    /// Must run after `build_symtab` on the same tree.
    pub fn type_check(&mut self, tree: &mut TreeNode) -> Result<Vec<Diagnostic>, AnalysisError> {
        debug!("checking types");
        let mut scopes = ScopeStack::new();
        let mut checker = TypeChecker::new(&mut self.table);
        traverse(tree, &mut checker, &mut scopes)?;
        let diagnostics = checker.into_diagnostics();

        self.had_error |= !diagnostics.is_empty();
        debug!(diagnostics = diagnostics.len(), "types checked");
        Ok(diagnostics)
    }

    /// Runs both passes, returning their diagnostics in order.
    pub fn analyze(&mut self, tree: &mut TreeNode) -> Result<Vec<Diagnostic>, AnalysisError> {
        let mut diagnostics = self.build_symtab(tree)?;
        diagnostics.extend(self.type_check(tree)?);
        Ok(diagnostics)
    }

    /// Whether any pass has reported a diagnostic since the last reset.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn table(&self) -> &ScopeTable {
        &self.table
    }

    pub fn options(&self) -> AnalyzerOptions {
        self.options
    }

    /// Forgets every scope, symbol and error, ready for a new program.
    pub fn reset(&mut self) {
        debug!(scopes = self.table.scope_count(), "resetting analyzer");
        self.table.reset();
        self.location = 0;
        self.had_error = false;
    }
}

/// Analyzes `tree` with a fresh analyzer.
///
/// Returns the analyzer, holding the finished scope table, together with the
/// diagnostics of both passes or the error that ended the run.
pub fn analyze(tree: &mut TreeNode, options: AnalyzerOptions) -> (Analyzer, Result<Vec<Diagnostic>, AnalysisError>) {
    let mut analyzer = Analyzer::new(options);
    let result = analyzer.analyze(tree);
    (analyzer, result)
}
