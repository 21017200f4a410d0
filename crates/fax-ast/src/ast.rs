//! Ties the node arena and scope table together into one value a parser
//! produces and a code generator reads.

use crate::error::InterchangeError;
use crate::interchange;
use crate::node::{NodeArena, NodeId};
use crate::scope::ScopeTable;

/// A fully parsed program: its node arena, its scope table, and the id of
/// the synthetic `Fake` root.
pub struct Ast<'a> {
    pub arena: NodeArena<'a>,
    pub scopes: ScopeTable<'a>,
    pub root: NodeId,
}

impl<'a> Ast<'a> {
    pub fn new(arena: NodeArena<'a>, scopes: ScopeTable<'a>, root: NodeId) -> Self {
        Self { arena, scopes, root }
    }

    pub fn serialize(&self) -> String {
        interchange::serialize(&self.arena, self.root)
    }

    pub fn parse_interchange(input: &'a str) -> Result<Self, InterchangeError> {
        let (arena, scopes, root) = interchange::parse(input)?;
        Ok(Self { arena, scopes, root })
    }

    /// Testable Property 2.
    pub fn parent_links_are_consistent(&self) -> bool {
        self.arena.parent_links_are_consistent(self.root)
    }

    /// Testable Property 3: every identifier's `(scope_id, inner_id)` pair
    /// indexes somewhere that actually exists.
    pub fn scope_resolution_is_total(&self) -> bool {
        self.arena.identifiers().all(|r| match self.scopes.scope_opt(r.scope_id) {
            Some(env) => (r.inner_id as usize) < env.len(),
            None => false,
        })
    }
}
