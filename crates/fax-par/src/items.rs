//! Top-level items: `program = func_decl { func_decl }` and `func_decl`.

use fax_ast::{IdentRef, NodeId, NodeToken, ScopeId, SymbolKind, GLOBAL_SCOPE};
use fax_lex::{Kw, Sep};

use crate::{error::ParseError, Parser};

impl<'a> Parser<'a> {
    /// `program = func_decl { func_decl }`, folded left-associatively into
    /// a chain of synthetic `{` nodes, mirroring the binary-operator fold.
    pub(crate) fn parse_program(&mut self) -> Result<NodeId, ParseError> {
        let mut acc = self.parse_func_decl()?;
        while !self.at_terminator() {
            let pos = self.current_pos();
            let next = self.parse_func_decl()?;
            acc = self.arena.push(NodeToken::Separator(Sep::LBrace), pos, Some(acc), Some(next));
        }
        Ok(acc)
    }

    /// `func_decl = 'defun' ident '(' [param_list] ')' block`.
    ///
    /// The function's own identifier is the node's token: `left` is the
    /// parameter list, `right` is the body — see `SPEC_FULL.md` §4.2 step
    /// 2-4. A bare statement at the top level is rejected for free here:
    /// the grammar only ever looks for `defun`, so anything else is an
    /// ordinary `UnexpectedToken`.
    fn parse_func_decl(&mut self) -> Result<NodeId, ParseError> {
        self.expect_kw(Kw::Defun)?;
        let (name, name_pos, ident) = self.expect_identifier()?;

        let fn_scope = self.scopes.push_scope();
        self.scopes.declare(GLOBAL_SCOPE, name, SymbolKind::Function);
        let inner_id = self.scopes.declare(fn_scope, name, SymbolKind::Function);

        let previous_scope = self.current_scope;
        self.current_scope = fn_scope;

        self.expect_sep(Sep::LParen)?;
        let params = self.parse_param_list(fn_scope)?;
        self.expect_sep(Sep::RParen)?;
        let body = self.parse_block()?;

        self.current_scope = previous_scope;

        let token = IdentRef { name, ident, scope_id: fn_scope, inner_id, kind: SymbolKind::Function };
        Ok(self.arena.push(NodeToken::Identifier(token), name_pos, params, body))
    }

    /// `param_list = ident { ',' ident }`, left-leaning `,` chain, `None`
    /// when empty.
    fn parse_param_list(&mut self, scope: ScopeId) -> Result<Option<NodeId>, ParseError> {
        if self.at_sep(Sep::RParen) {
            return Ok(None);
        }
        let mut acc = self.parse_param(scope)?;
        while self.match_sep(Sep::Comma) {
            let pos = self.arena.get(acc).pos;
            let next = self.parse_param(scope)?;
            acc = self.arena.push(NodeToken::Separator(Sep::Comma), pos, Some(acc), Some(next));
        }
        Ok(Some(acc))
    }

    fn parse_param(&mut self, scope: ScopeId) -> Result<NodeId, ParseError> {
        let (name, pos, ident) = self.expect_identifier()?;
        let inner_id = self.scopes.declare(scope, name, SymbolKind::Parameter);
        let token = IdentRef { name, ident, scope_id: scope, inner_id, kind: SymbolKind::Parameter };
        Ok(self.arena.push(NodeToken::Identifier(token), pos, None, None))
    }
}
