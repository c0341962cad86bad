//! Scope tree and symbol table.
//!
//! Scopes form a tree owned by an arena: every scope lives in an
//! `IndexVec` and refers to its parent by `ScopeId`, so the parent link is
//! a non-owning back-reference and no reference cycles exist. Name lookup
//! walks the parent chain; definition writes only into the target scope.
//!
//! Bindings are kept in an `IndexMap` so the symbol-table report and the
//! final unused-binding pass see them in declaration order, which keeps
//! the diagnostic output deterministic.

use indexmap::IndexMap;
use linterna_par::ast::LitValue;
use linterna_util::{define_idx, IndexVec, Symbol};

define_idx!(ScopeId);

/// Kind of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Function => "function",
            ScopeKind::Block => "block",
        }
    }
}

/// Kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Const,
    Function,
    Parameter,
    Builtin,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Const => "const",
            SymbolKind::Function => "function",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Builtin => "builtin",
        }
    }
}

/// Literal class used by the arithmetic/comparison heuristics.
///
/// This is the only "type inference" the analyzer does: classes are read
/// off literal leaves and remembered for a variable whose initializer was
/// a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitClass {
    Number,
    Str,
    Bool,
    Null,
}

impl LitClass {
    pub fn of(value: &LitValue) -> Self {
        match value {
            LitValue::Number(_) => LitClass::Number,
            LitValue::Str(_) => LitClass::Str,
            LitValue::Bool(_) => LitClass::Bool,
            LitValue::Null => LitClass::Null,
        }
    }
}

/// Metadata of a named binding.
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub kind: SymbolKind,
    /// Declaration position (0/0 for builtins).
    pub line: u32,
    pub column: u32,
    /// Only ever transitions false -> true.
    pub initialized: bool,
    /// Set when the name is read.
    pub used: bool,
    /// Set when the name is an assignment or update target. Assignment
    /// does not count as a use, but an assigned-to binding is exempt from
    /// the unused warning.
    pub assigned: bool,
    /// Installed by the function-hoisting pass.
    pub hoisted: bool,
    /// Preloaded global binding.
    pub builtin: bool,
    /// Ordered parameter names, for functions.
    pub params: Option<Vec<Symbol>>,
    /// Literal class of the initializer, if it was a literal.
    pub lit_class: Option<LitClass>,
}

impl SymbolInfo {
    /// A user binding declared at the given position.
    pub fn new(kind: SymbolKind, line: u32, column: u32, initialized: bool) -> Self {
        Self {
            kind,
            line,
            column,
            initialized,
            used: false,
            assigned: false,
            hoisted: false,
            builtin: false,
            params: None,
            lit_class: None,
        }
    }

    /// A preloaded global binding.
    pub fn preloaded() -> Self {
        Self {
            kind: SymbolKind::Builtin,
            line: 0,
            column: 0,
            initialized: true,
            used: false,
            assigned: false,
            hoisted: false,
            builtin: true,
            params: None,
            lit_class: None,
        }
    }
}

/// A single scope: kind, tree links, and its bindings in declaration
/// order. Each name appears at most once per scope.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub bindings: IndexMap<Symbol, SymbolInfo>,
}

/// Builtins preloaded into the global scope.
pub const BUILTINS: &[&str] = &[
    "console",
    "window",
    "document",
    "Array",
    "Object",
    "String",
    "Number",
    "Boolean",
    "Date",
    "RegExp",
    "Math",
    "JSON",
    "parseInt",
    "parseFloat",
    "isNaN",
    "isFinite",
    "eval",
    "setTimeout",
    "setInterval",
    "clearTimeout",
    "clearInterval",
    "undefined",
    "NaN",
    "Infinity",
];

/// Arena-backed scope tree.
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
}

impl ScopeTree {
    /// Id of the root scope.
    pub const GLOBAL: ScopeId = ScopeId(0);

    /// Creates a tree whose global scope is preloaded with the builtins.
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let mut bindings = IndexMap::new();
        for name in BUILTINS {
            bindings.insert(Symbol::intern(name), SymbolInfo::preloaded());
        }
        scopes.push(Scope {
            kind: ScopeKind::Global,
            parent: None,
            children: Vec::new(),
            bindings,
        });
        Self { scopes }
    }

    /// Creates a child scope and registers it with its parent.
    pub fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = self.scopes.push(Scope {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            bindings: IndexMap::new(),
        });
        self.scopes[parent].children.push(id);
        id
    }

    /// Borrow a scope.
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// Number of scopes in the tree.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Defines a name in the given scope.
    ///
    /// Returns false (without overwriting) if the name already exists
    /// there.
    pub fn define(&mut self, scope: ScopeId, name: Symbol, info: SymbolInfo) -> bool {
        let bindings = &mut self.scopes[scope].bindings;
        if bindings.contains_key(&name) {
            return false;
        }
        bindings.insert(name, info);
        true
    }

    /// Looks a name up in one scope only.
    pub fn lookup_in(&self, scope: ScopeId, name: Symbol) -> Option<&SymbolInfo> {
        self.scopes[scope].bindings.get(&name)
    }

    /// Resolves a name by walking the parent chain; returns the scope
    /// that holds it.
    pub fn resolve(&self, from: ScopeId, name: Symbol) -> Option<ScopeId> {
        let mut current = from;
        loop {
            if self.scopes[current].bindings.contains_key(&name) {
                return Some(current);
            }
            current = self.scopes[current].parent?;
        }
    }

    /// Borrow a symbol in a known scope.
    pub fn symbol(&self, scope: ScopeId, name: Symbol) -> Option<&SymbolInfo> {
        self.scopes[scope].bindings.get(&name)
    }

    /// Mutably borrow a symbol in a known scope.
    pub fn symbol_mut(&mut self, scope: ScopeId, name: Symbol) -> Option<&mut SymbolInfo> {
        self.scopes[scope].bindings.get_mut(&name)
    }

    /// Preorder walk from the given scope.
    pub fn walk<F>(&self, from: ScopeId, f: &mut F)
    where
        F: FnMut(ScopeId, &Scope),
    {
        let scope = &self.scopes[from];
        f(from, scope);
        for &child in &scope.children {
            self.walk(child, f);
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
