//! The AST arena: a single flat index-addressed tree.
//!
//! Nodes are stored by value in an `IndexVec` and reference each other by
//! `NodeId`, not by pointer — replacing a subtree is one index write in the
//! parent, and the whole tree is freed by dropping the arena (see
//! `SPEC_FULL.md` §9).

use fax_lex::{IdentId, Kw, Op, Sep};
use fax_util::{define_idx, IndexVec, Pos};

use crate::scope::{ScopeId, SymbolKind};

define_idx!(NodeId);

/// A resolved identifier occurrence: its spelling, the lexer's
/// per-occurrence id, and the `(scope_id, inner_id)` pair it was bound to
/// during parsing. Resolution happens before the node is created, so an
/// `Identifier` node is always fully resolved — there is no "pending"
/// state to model.
#[derive(Clone, Copy, Debug)]
pub struct IdentRef<'a> {
    pub name: &'a str,
    pub ident: IdentId,
    pub scope_id: ScopeId,
    pub inner_id: u32,
    pub kind: SymbolKind,
}

/// The payload a node carries: `fax_lex::TokenKind`'s variants, plus `Call`
/// (a function-call subtree head) and `Fake` (the synthetic root marker),
/// neither of which a lexed token ever produces on its own.
#[derive(Clone, Copy, Debug)]
pub enum NodeToken<'a> {
    Operator(Op),
    Keyword(Kw),
    Separator(Sep),
    Identifier(IdentRef<'a>),
    NumLiteral(i32),
    Terminator,
    Call,
    Fake,
}

/// One AST node. `parent` is a back-reference only, maintained by
/// `NodeArena::push` — nothing ever decides ownership by consulting it.
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    pub token: NodeToken<'a>,
    pub pos: Pos,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

/// Owns every node in the tree. There is no deletion: the "first error
/// aborts the stage" policy is satisfied by simply dropping the whole
/// arena, so no per-node cleanup bookkeeping exists.
#[derive(Debug, Default)]
pub struct NodeArena<'a> {
    nodes: IndexVec<NodeId, Node<'a>>,
}

impl<'a> NodeArena<'a> {
    pub fn new() -> Self {
        Self { nodes: IndexVec::new() }
    }

    pub fn get(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts a node with the given children, then fixes up each child's
    /// `parent` field to point back at the new node. This is the single
    /// place the parent invariant (Testable Property 2) is established.
    pub fn push(
        &mut self,
        token: NodeToken<'a>,
        pos: Pos,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> NodeId {
        let id = self.nodes.push(Node { token, pos, left, right, parent: None });
        if let Some(l) = left {
            self.nodes[l].parent = Some(id);
        }
        if let Some(r) = right {
            self.nodes[r].parent = Some(id);
        }
        id
    }

    /// Inserts the synthetic `Fake` root over `program`; `root.right` is
    /// unused.
    pub fn push_root(&mut self, program: Option<NodeId>, pos: Pos) -> NodeId {
        self.push(NodeToken::Fake, pos, program, None)
    }

    /// All resolved identifier occurrences reachable from the arena, in
    /// arena order — used to check Testable Property 3 (scope resolution
    /// totality) without a tree walk.
    pub fn identifiers(&self) -> impl Iterator<Item = &IdentRef<'a>> {
        self.nodes.iter().filter_map(|n| match &n.token {
            NodeToken::Identifier(r) => Some(r),
            _ => None,
        })
    }

    /// Testable Property 2: every non-root node's recorded parent actually
    /// has it as a child.
    pub fn parent_links_are_consistent(&self, root: NodeId) -> bool {
        self.nodes.iter_enumerated().all(|(id, node)| {
            if id == root {
                return node.parent.is_none();
            }
            match node.parent {
                None => false,
                Some(p) => self.nodes[p].left == Some(id) || self.nodes[p].right == Some(id),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_sets_child_parent_pointers() {
        let mut arena = NodeArena::new();
        let leaf = arena.push(NodeToken::NumLiteral(1), Pos::START, None, None);
        let parent = arena.push(NodeToken::NumLiteral(2), Pos::START, Some(leaf), None);
        assert_eq!(arena.get(leaf).parent, Some(parent));
    }

    #[test]
    fn root_has_no_parent_and_satisfies_consistency() {
        let mut arena = NodeArena::new();
        let program = arena.push(NodeToken::Terminator, Pos::START, None, None);
        let root = arena.push_root(Some(program), Pos::START);
        assert!(arena.get(root).parent.is_none());
        assert!(arena.parent_links_are_consistent(root));
    }

    #[test]
    fn node_unreachable_from_root_fails_consistency_check() {
        let mut arena = NodeArena::new();
        let _a = arena.push(NodeToken::Terminator, Pos::START, None, None);
        let root = arena.push_root(None, Pos::START);
        // `_a` is not `root` and was never attached as anyone's child, so
        // its `parent` is `None` — the consistency check must reject it.
        assert!(!arena.parent_links_are_consistent(root));
    }
}
