use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::errors::errors::{AnalysisError, TableError};

use super::symtab::{ScopeId, ScopeTable};

/// The active nesting path of one traversal, innermost scope last.
///
/// New scopes are named `<base><line>`, where the base is the current scope's
/// name for blocks and the function name for function scopes. A name produced
/// twice in one traversal gets `#<n>` appended, with `n` raised past any name
/// the traversal already produced. Naming depends only on the order scopes are
/// opened, so every traversal of the same tree produces the same names.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    stack: Vec<ScopeId>,
    produced: HashSet<String>,
    /// Last suffix handed out per synthesized name.
    repeats: HashMap<String, u32>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

impl ScopeStack {
    /// A stack holding only the global scope.
    pub fn new() -> Self {
        ScopeStack {
            stack: vec![ScopeId::GLOBAL],
            produced: HashSet::new(),
            repeats: HashMap::new(),
        }
    }

    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Scopes from innermost to outermost.
    pub fn iter(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.stack.iter().rev().copied()
    }

    /// Creates a block scope under the current scope and makes it current.
    pub fn push(&mut self, table: &mut ScopeTable, line: u32) -> Result<ScopeId, TableError> {
        let name = self.synthesize(table, None, line);
        let id = table.create_scope(self.current(), &name)?;
        trace!(scope = %name, depth = self.depth(), "push scope");
        self.stack.push(id);
        Ok(id)
    }

    /// Creates the scope of `function` under the current scope and makes it current.
    pub fn push_function(&mut self, table: &mut ScopeTable, function: &str, line: u32) -> Result<ScopeId, TableError> {
        let name = self.synthesize(table, Some(function), line);
        let id = table.create_function_scope(self.current(), &name, function)?;
        trace!(scope = %name, depth = self.depth(), "push function scope");
        self.stack.push(id);
        Ok(id)
    }

    /// Re-enters the block scope an earlier traversal created at this point.
    pub fn enter(&mut self, table: &ScopeTable, line: u32) -> Result<ScopeId, AnalysisError> {
        let name = self.synthesize(table, None, line);
        self.reenter(table, name)
    }

    /// Re-enters the scope of `function` an earlier traversal created at this point.
    pub fn enter_function(&mut self, table: &ScopeTable, function: &str, line: u32) -> Result<ScopeId, AnalysisError> {
        let name = self.synthesize(table, Some(function), line);
        self.reenter(table, name)
    }

    fn reenter(&mut self, table: &ScopeTable, name: String) -> Result<ScopeId, AnalysisError> {
        let id = table
            .find(&name)
            .filter(|id| table.scope(*id).parent() == Some(self.current()))
            .ok_or(AnalysisError::UnknownScope { scope: name })?;
        trace!(scope = %table.scope(id).name(), depth = self.depth(), "enter scope");
        self.stack.push(id);
        Ok(id)
    }

    /// Leaves the current scope, restoring its parent.
    ///
    /// The global scope is never popped; doing so is a traversal bug.
    pub fn pop(&mut self) -> ScopeId {
        assert!(self.stack.len() > 1, "attempted to pop the global scope");
        let id = self.current();
        self.stack.truncate(self.stack.len() - 1);
        trace!(?id, depth = self.depth(), "pop scope");
        id
    }

    /// Name of the function whose scope most closely encloses the current one.
    pub fn enclosing_function<'t>(&self, table: &'t ScopeTable) -> Option<&'t str> {
        self.iter().find_map(|id| table.scope(id).function())
    }

    fn synthesize(&mut self, table: &ScopeTable, base: Option<&str>, line: u32) -> String {
        let base = base.unwrap_or_else(|| table.scope(self.current()).name());
        let name = format!("{}{}", base, line);
        let mut count = self.repeats.get(&name).copied().unwrap_or(0);
        let mut unique = name.clone();
        // `global1#1` on line 2 yields `global1#12`, which a later repeat of
        // `global1` must step over.
        while self.produced.contains(&unique) {
            count += 1;
            unique = format!("{}#{}", name, count);
        }
        self.repeats.insert(name, count);
        self.produced.insert(unique.clone());
        unique
    }
}
