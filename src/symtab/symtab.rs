use std::{collections::HashMap, fmt::Display};

use crate::{ast::types::ExpType, errors::errors::TableError};

use super::builtins::BUILTINS;

/// Name of the root scope.
pub const GLOBAL_SCOPE: &str = "global";

/// Handle of a scope inside the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a symbol's storage slot holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Variables, arrays and parameters get a memory location.
    Variable { location: u32 },
    /// Functions record their parameter types instead.
    Function { params: Vec<ExpType> },
}

/// One declared identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: ExpType,
    /// Line of the declaration.
    pub line: u32,
    pub binding: Binding,
    /// Declaration line followed by every line the name was used on.
    pub lines: Vec<u32>,
}

impl Symbol {
    pub fn location(&self) -> Option<u32> {
        match self.binding {
            Binding::Variable { location } => Some(location),
            Binding::Function { .. } => None,
        }
    }

    pub fn param_count(&self) -> Option<usize> {
        match &self.binding {
            Binding::Variable { .. } => None,
            Binding::Function { params } => Some(params.len()),
        }
    }

    /// The value shown in the dump's location column.
    fn slot(&self) -> usize {
        match &self.binding {
            Binding::Variable { location } => *location as usize,
            Binding::Function { params } => params.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    name: String,
    parent: Option<ScopeId>,
    /// Set on the scope opened by a function declaration.
    function: Option<String>,
    symbols: Vec<Symbol>,
    lookup: HashMap<String, usize>,
}

impl Scope {
    fn new(name: &str, parent: Option<ScopeId>, function: Option<&str>) -> Self {
        Scope {
            name: name.to_string(),
            parent,
            function: function.map(str::to_string),
            symbols: vec![],
            lookup: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.lookup.get(name).map(|index| &self.symbols[*index])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        let index = *self.lookup.get(name)?;
        self.symbols.get_mut(index)
    }

    /// Symbols in insertion order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// Scope table
///
/// Owns every scope of one compilation run. Scopes live in an arena addressed
/// by `ScopeId`, each one pointing at its lexical parent, and are also indexed
/// by their synthesized name so a later pass can find the scopes an earlier
/// pass built.
#[derive(Debug, Clone)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
    scope_lookup: HashMap<String, ScopeId>,
}

impl Default for ScopeTable {
    fn default() -> Self {
        ScopeTable::new()
    }
}

impl ScopeTable {
    /// Creates a table holding only the global scope, seeded with the builtins.
    pub fn new() -> Self {
        let mut table = ScopeTable {
            scopes: vec![],
            scope_lookup: HashMap::new(),
        };
        table.scopes.push(Scope::new(GLOBAL_SCOPE, None, None));
        table.scope_lookup.insert(GLOBAL_SCOPE.to_string(), ScopeId::GLOBAL);
        table.seed_builtins();
        table
    }

    fn seed_builtins(&mut self) {
        for builtin in BUILTINS.iter() {
            self.insert_symbol(
                ScopeId::GLOBAL,
                builtin.name,
                builtin.return_type,
                0,
                Binding::Function {
                    params: builtin.params.clone(),
                },
            );
        }
    }

    pub fn create_scope(&mut self, parent: ScopeId, name: &str) -> Result<ScopeId, TableError> {
        self.add_scope(Scope::new(name, Some(parent), None))
    }

    /// Creates the scope holding the parameters and body of `function`.
    pub fn create_function_scope(&mut self, parent: ScopeId, name: &str, function: &str) -> Result<ScopeId, TableError> {
        self.add_scope(Scope::new(name, Some(parent), Some(function)))
    }

    fn add_scope(&mut self, scope: Scope) -> Result<ScopeId, TableError> {
        if self.scope_lookup.contains_key(&scope.name) {
            return Err(TableError::ScopeAlreadyExists { scope: scope.name });
        }
        let id = ScopeId(self.scopes.len() as u32);
        self.scope_lookup.insert(scope.name.clone(), id);
        self.scopes.push(scope);
        Ok(id)
    }

    /// Removes a scope and its symbols.
    ///
    /// Scopes must be destroyed in the reverse order of their creation, and the
    /// global scope is never destroyed. Anything else is a caller bug.
    pub fn destroy_scope(&mut self, id: ScopeId) {
        assert!(id != ScopeId::GLOBAL, "the global scope cannot be destroyed");
        assert_eq!(
            id.index() + 1,
            self.scopes.len(),
            "scopes must be destroyed in reverse creation order"
        );
        if let Some(scope) = self.scopes.pop() {
            self.scope_lookup.remove(&scope.name);
        }
    }

    /// Destroys every scope but the global one, newest first.
    pub fn unwind(&mut self) {
        while self.scopes.len() > 1 {
            self.destroy_scope(ScopeId(self.scopes.len() as u32 - 1));
        }
    }

    /// Returns the table to its freshly seeded state.
    pub fn reset(&mut self) {
        self.unwind();
        let global = &mut self.scopes[ScopeId::GLOBAL.index()];
        global.symbols.clear();
        global.lookup.clear();
        self.seed_builtins();
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<ScopeId> {
        self.scope_lookup.get(name).copied()
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (ScopeId(index as u32), scope))
    }

    /// Number of live scopes, the global scope included.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Inserts `name` into `scope`.
    ///
    /// A name already present keeps the type and binding of its first
    /// declaration; only `line` is appended to its reference lines.
    pub fn insert_symbol(&mut self, scope: ScopeId, name: &str, ty: ExpType, line: u32, binding: Binding) {
        let scope = &mut self.scopes[scope.index()];
        if let Some(symbol) = scope.get_mut(name) {
            symbol.lines.push(line);
            return;
        }
        scope.lookup.insert(name.to_string(), scope.symbols.len());
        scope.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            line,
            binding,
            lines: vec![line],
        });
    }

    /// Finds `name` in `scope` or the nearest enclosing scope declaring it.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let owner = self.declaring_scope(scope, name)?;
        self.scope(owner).get(name)
    }

    /// Finds `name` in `scope` only.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        self.scope(scope).get(name)
    }

    /// Parameter count of the global function `name`.
    pub fn param_count(&self, name: &str) -> Result<usize, TableError> {
        self.lookup_local(ScopeId::GLOBAL, name)
            .and_then(Symbol::param_count)
            .ok_or_else(|| TableError::NotAFunction { name: name.to_string() })
    }

    /// Records a use of `name` on `line` against the symbol it resolves to.
    pub fn add_reference(&mut self, scope: ScopeId, name: &str, line: u32) -> Result<(), TableError> {
        let not_found = || TableError::NotFound { name: name.to_string() };
        let owner = self.declaring_scope(scope, name).ok_or_else(not_found)?;
        let symbol = self.scopes[owner.index()].get_mut(name).ok_or_else(not_found)?;
        symbol.lines.push(line);
        Ok(())
    }

    fn declaring_scope(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if scope.lookup.contains_key(name) {
                return Some(id);
            }
            current = scope.parent;
        }
        None
    }
}

impl Display for ScopeTable {
    /// Fixed-width listing of every scope and its symbols.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, scope) in self.scopes.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Scope: {}", scope.name)?;
            writeln!(f, "Variable Name  Location   Line Numbers")?;
            writeln!(f, "-------------  --------   ------------")?;
            for symbol in &scope.symbols {
                write!(f, "{:<14} {:<8}  ", symbol.name, symbol.slot())?;
                for line in &symbol.lines {
                    write!(f, "{:>4} ", line)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
