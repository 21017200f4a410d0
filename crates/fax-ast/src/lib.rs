//! fax-ast - The abstract syntax tree: arena, scope table, and the
//! tree-interchange codec shared between `fax-front` and `fax-back`.
//!
//! See `SPEC_FULL.md` §3 for the data model and §6 for the interchange
//! format.

mod ast;
mod error;
mod interchange;
mod node;
mod scope;

pub use ast::Ast;
pub use error::InterchangeError;
pub use interchange::{parse as parse_interchange, serialize};
pub use node::{IdentRef, Node, NodeArena, NodeId, NodeToken};
pub use scope::{Env, ScopeId, ScopeTable, Symbol, SymbolKind, GLOBAL_SCOPE};
