//! Scopes and symbols.
//!
//! Scope 0 (the global scope) holds exactly one `Symbol` per declared
//! function — this is the registry a `call`'s callee identifier resolves
//! against, since plain name resolution never scans outer scopes (see
//! `SPEC_FULL.md` §9: "the language therefore has no true global
//! variables"). Every `defun` additionally opens its own scope, whose
//! zeroth symbol is a self-reference to the function being declared
//! (mirroring its entry in scope 0); parameters and locals follow at
//! indices `1..N`. That index doubles as the stack-frame slot used by
//! code generation.

use fax_util::{define_idx, djb2, IndexVec};

define_idx!(ScopeId);

/// The scope every program starts in; holds one `Function` symbol per
/// top-level `defun`.
pub const GLOBAL_SCOPE: ScopeId = ScopeId(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

/// A declared name. Two symbols with the same `name` but different `kind`
/// are distinct entries — see `SPEC_FULL.md` §3.
#[derive(Clone, Copy, Debug)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub kind: SymbolKind,
    pub hash: u64,
}

impl<'a> Symbol<'a> {
    fn new(name: &'a str, kind: SymbolKind) -> Self {
        Self { name, kind, hash: djb2(name.as_bytes()) }
    }
}

/// An ordered list of symbols declared in one scope.
#[derive(Debug, Default)]
pub struct Env<'a> {
    symbols: Vec<Symbol<'a>>,
}

impl<'a> Env<'a> {
    pub fn symbols(&self) -> &[Symbol<'a>] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// The AST-level table of all scopes, indexed by `ScopeId`.
#[derive(Debug)]
pub struct ScopeTable<'a> {
    scopes: IndexVec<ScopeId, Env<'a>>,
}

impl<'a> ScopeTable<'a> {
    /// Creates a table with only the global scope present.
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let global = scopes.push(Env::default());
        debug_assert_eq!(global, GLOBAL_SCOPE);
        Self { scopes }
    }

    pub fn scope(&self, id: ScopeId) -> &Env<'a> {
        &self.scopes[id]
    }

    /// Checked variant of [`Self::scope`], for validating an `inner_id`
    /// that may have come from untrusted interchange text.
    pub fn scope_opt(&self, id: ScopeId) -> Option<&Env<'a>> {
        self.scopes.get(id)
    }

    /// Creates a new, empty scope and returns its id.
    pub fn push_scope(&mut self) -> ScopeId {
        self.scopes.push(Env::default())
    }

    /// Appends `{name, kind}` to `scope` and returns its `inner_id` (its
    /// index within that scope's symbol list).
    pub fn declare(&mut self, scope: ScopeId, name: &'a str, kind: SymbolKind) -> u32 {
        let env = &mut self.scopes[scope];
        let inner_id = env.symbols.len() as u32;
        env.symbols.push(Symbol::new(name, kind));
        inner_id
    }

    /// Returns the `inner_id` of an existing symbol of kind `kind` named
    /// `name` in `scope`, if one was already declared there.
    pub fn find_kind(&self, scope: ScopeId, name: &str, kind: SymbolKind) -> Option<u32> {
        self.scopes[scope]
            .symbols
            .iter()
            .position(|s| s.kind == kind && s.name == name)
            .map(|i| i as u32)
    }

    /// Returns the `inner_id` of an existing `Variable` symbol named `name`
    /// in `scope`, if one was already declared there — the idempotent-add
    /// check an `assignment` statement performs before declaring a new
    /// local.
    pub fn find_variable(&self, scope: ScopeId, name: &str) -> Option<u32> {
        self.find_kind(scope, name, SymbolKind::Variable)
    }

    /// Resolves a bare identifier use (neither an assignment target nor a
    /// call callee) against `scope`: the most recently declared symbol —
    /// of any kind — whose name matches, scanning back-to-front so a local
    /// shadows anything declared earlier in the same scope.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<(u32, SymbolKind)> {
        self.scopes[scope]
            .symbols
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.name == name)
            .map(|(i, s)| (i as u32, s.kind))
    }

    /// Resolves a call's callee against the global function registry.
    pub fn resolve_function(&self, name: &str) -> Option<u32> {
        self.scopes[GLOBAL_SCOPE]
            .symbols
            .iter()
            .position(|s| s.kind == SymbolKind::Function && s.name == name)
            .map(|i| i as u32)
    }

    /// Finds the scope a function's own body was parsed into — distinct
    /// from `resolve_function`'s index into the global registry. Code
    /// generation needs this to look up a callee's slot count at a call
    /// site: every `defun` registers its self-reference as symbol 0 of a
    /// freshly created scope, so the scope whose zeroth symbol matches
    /// `{name, Function}` is the one.
    pub fn function_scope(&self, name: &str) -> Option<ScopeId> {
        self.scopes.iter_enumerated().find_map(|(id, env)| {
            let is_match = env
                .symbols
                .first()
                .is_some_and(|s| s.kind == SymbolKind::Function && s.name == name);
            is_match.then_some(id)
        })
    }
}

impl<'a> Default for ScopeTable<'a> {
    fn default() -> Self {
        Self::new()
    }
}
