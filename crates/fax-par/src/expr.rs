//! Expression grammar: `expr = or`, down through `and`, `eq`, `cmp`, `sum`,
//! `mul`, `pow`, to `primary`. Every level folds left-associatively: start
//! from the next level down, then loop consuming `op right` pairs into
//! `new_node(op, accumulator, right)`.

use fax_ast::{IdentRef, NodeId, NodeToken, SymbolKind, GLOBAL_SCOPE};
use fax_lex::{Op, Sep, TokenKind};

use crate::{error::ParseError, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_and, &[Op::Or])
    }

    fn parse_and(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_eq, &[Op::And])
    }

    fn parse_eq(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_cmp, &[Op::Eq, Op::Neq])
    }

    fn parse_cmp(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_sum, &[Op::Lt, Op::Leq, Op::Gt, Op::Geq])
    }

    fn parse_sum(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_mul, &[Op::Add, Op::Sub])
    }

    fn parse_mul(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_pow, &[Op::Mul, Op::Div])
    }

    fn parse_pow(&mut self) -> Result<NodeId, ParseError> {
        self.parse_left_assoc(Self::parse_primary, &[Op::Pow])
    }

    fn parse_left_assoc(
        &mut self,
        next: fn(&mut Self) -> Result<NodeId, ParseError>,
        ops: &[Op],
    ) -> Result<NodeId, ParseError> {
        let mut acc = next(self)?;
        while let Some(op) = self.current_op() {
            if !ops.contains(&op) {
                break;
            }
            let pos = self.current_pos();
            self.advance();
            let rhs = next(self)?;
            acc = self.arena.push(NodeToken::Operator(op), pos, Some(acc), Some(rhs));
        }
        Ok(acc)
    }

    /// `primary = '(' expr ')' | call | num | ident`. Parenthesized
    /// grouping produces no node of its own — only the inner expression.
    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        if self.match_sep(Sep::LParen) {
            let inner = self.parse_expr()?;
            self.expect_sep(Sep::RParen)?;
            return Ok(inner);
        }

        if let TokenKind::NumLiteral(n) = self.current_kind() {
            let pos = self.current_pos();
            self.advance();
            return Ok(self.arena.push(NodeToken::NumLiteral(n), pos, None, None));
        }

        if matches!(self.current_kind(), TokenKind::Identifier(_)) {
            return self.parse_ident_or_call();
        }

        Err(self.unexpected("an expression".to_string()))
    }

    /// Disambiguates `call` from a plain variable/parameter reference by
    /// one token of lookahead: an identifier directly followed by `(` is a
    /// call, resolved against the global function registry; otherwise it
    /// resolves as a variable or parameter in the current function scope.
    fn parse_ident_or_call(&mut self) -> Result<NodeId, ParseError> {
        let (name, pos, ident) = self.expect_identifier()?;

        if self.match_sep(Sep::LParen) {
            let inner_id = self
                .scopes
                .resolve_function(name)
                .ok_or_else(|| self.unresolved(name, pos))?;
            let callee = IdentRef { name, ident, scope_id: GLOBAL_SCOPE, inner_id, kind: SymbolKind::Function };
            let callee_node = self.arena.push(NodeToken::Identifier(callee), pos, None, None);

            let args = self.parse_arg_list()?;
            self.expect_sep(Sep::RParen)?;
            return Ok(self.arena.push(NodeToken::Call, pos, Some(callee_node), args));
        }

        let (inner_id, kind) = self
            .scopes
            .resolve(self.current_scope, name)
            .ok_or_else(|| self.unresolved(name, pos))?;
        let token = IdentRef { name, ident, scope_id: self.current_scope, inner_id, kind };
        Ok(self.arena.push(NodeToken::Identifier(token), pos, None, None))
    }

    /// `arg_list = expr { ',' expr }`, left-leaning `,` chain, `None` when
    /// empty.
    fn parse_arg_list(&mut self) -> Result<Option<NodeId>, ParseError> {
        if self.at_sep(Sep::RParen) {
            return Ok(None);
        }
        let mut acc = self.parse_expr()?;
        while self.match_sep(Sep::Comma) {
            let pos = self.arena.get(acc).pos;
            let next = self.parse_expr()?;
            acc = self.arena.push(NodeToken::Separator(Sep::Comma), pos, Some(acc), Some(next));
        }
        Ok(Some(acc))
    }
}
