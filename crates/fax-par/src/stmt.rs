//! Statements: `block`, `while`, `if`, and the `;`-terminated forms
//! (`assignment | expr | return | in | out`).
//!
//! `if`/`else` has no dedicated binary-tree shape in `SPEC_FULL.md`, so one
//! is chosen here: a plain `if` stores `left = cond`, `right = then`; an
//! `if`/`else` wraps both arms under a synthetic `Keyword(Else)` node
//! (`left = then`, `right = else`) so the tree stays strictly binary.

use fax_ast::{IdentRef, NodeId, NodeToken, SymbolKind};
use fax_lex::{Kw, Op, Sep, TokenKind};

use crate::{error::ParseError, Parser};

impl<'a> Parser<'a> {
    /// `block = '{' { statement } '}'`.
    pub(crate) fn parse_block(&mut self) -> Result<Option<NodeId>, ParseError> {
        self.expect_sep(Sep::LBrace)?;
        let mut stmts = Vec::new();
        while !self.at_sep(Sep::RBrace) {
            stmts.push(self.parse_statement()?);
        }
        self.expect_sep(Sep::RBrace)?;
        Ok(self.chain_statements(stmts))
    }

    fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        if self.at_kw(Kw::While) {
            return self.parse_while();
        }
        if self.at_kw(Kw::If) {
            return self.parse_if();
        }

        let node = if self.at_kw(Kw::Return) {
            self.parse_return()?
        } else if self.at_kw(Kw::In) {
            self.parse_in()?
        } else if self.at_kw(Kw::Out) {
            self.parse_out()?
        } else if self.is_assignment_start() {
            self.parse_assignment()?
        } else {
            self.parse_expr()?
        };
        self.expect_sep(Sep::Semicolon)?;
        Ok(node)
    }

    fn is_assignment_start(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Identifier(_))
            && self.peek_kind(1) == TokenKind::Operator(Op::Assign)
    }

    /// `assignment = ident '=' expr`. The right-hand side is parsed before
    /// the target variable is declared, so `x = x + 1` reads the binding
    /// `x` had before this statement, not a fresh empty slot — see
    /// `DESIGN.md`'s Open Question decisions.
    fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        let (name, pos, ident) = self.expect_identifier()?;
        self.expect_op(Op::Assign)?;
        let rhs = self.parse_expr()?;

        let inner_id = match self.scopes.find_variable(self.current_scope, name) {
            Some(id) => id,
            None => self.scopes.declare(self.current_scope, name, SymbolKind::Variable),
        };
        let target = IdentRef { name, ident, scope_id: self.current_scope, inner_id, kind: SymbolKind::Variable };
        let target_node = self.arena.push(NodeToken::Identifier(target), pos, None, None);

        Ok(self.arena.push(NodeToken::Operator(Op::Assign), pos, Some(target_node), Some(rhs)))
    }

    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let pos = self.expect_kw(Kw::Return)?;
        let expr = self.parse_expr()?;
        Ok(self.arena.push(NodeToken::Keyword(Kw::Return), pos, Some(expr), None))
    }

    /// `in <ident>` declares the target the same idempotent way an
    /// assignment does — reading external input into a name behaves like
    /// assigning it.
    fn parse_in(&mut self) -> Result<NodeId, ParseError> {
        let pos = self.expect_kw(Kw::In)?;
        let (name, ident_pos, ident) = self.expect_identifier()?;
        let inner_id = match self.scopes.find_variable(self.current_scope, name) {
            Some(id) => id,
            None => self.scopes.declare(self.current_scope, name, SymbolKind::Variable),
        };
        let target = IdentRef { name, ident, scope_id: self.current_scope, inner_id, kind: SymbolKind::Variable };
        let target_node = self.arena.push(NodeToken::Identifier(target), ident_pos, None, None);
        Ok(self.arena.push(NodeToken::Keyword(Kw::In), pos, Some(target_node), None))
    }

    fn parse_out(&mut self) -> Result<NodeId, ParseError> {
        let pos = self.expect_kw(Kw::Out)?;
        let expr = self.parse_expr()?;
        Ok(self.arena.push(NodeToken::Keyword(Kw::Out), pos, Some(expr), None))
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let pos = self.expect_kw(Kw::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(self.arena.push(NodeToken::Keyword(Kw::While), pos, Some(cond), body))
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let pos = self.expect_kw(Kw::If)?;
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;

        if self.at_kw(Kw::Else) {
            let else_pos = self.current_pos();
            self.advance();
            let else_block = self.parse_block()?;
            let wrapper = self.arena.push(NodeToken::Keyword(Kw::Else), else_pos, then_block, else_block);
            return Ok(self.arena.push(NodeToken::Keyword(Kw::If), pos, Some(cond), Some(wrapper)));
        }

        Ok(self.arena.push(NodeToken::Keyword(Kw::If), pos, Some(cond), then_block))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::parse_source;
    use fax_ast::{NodeToken, SymbolKind};
    use fax_lex::Kw;

    #[test]
    fn while_loop_parses_with_condition_and_body() {
        let ast = parse_source("defun main() { while 1 { out 1; } return 0; }").unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn if_without_else_stores_then_block_as_right_child() {
        let ast = parse_source("defun main(n) { if n { return 1; } return 0; }").unwrap();
        let body = ast.arena.get(ast.root);
        let program = ast.arena.get(body.left.unwrap());
        let first_stmt = ast.arena.get(program.right.unwrap());
        let if_node = ast.arena.get(first_stmt.left.unwrap());
        assert!(matches!(if_node.token, NodeToken::Keyword(Kw::If)));
        assert!(if_node.right.is_some());
    }

    #[test]
    fn if_else_wraps_both_arms_under_an_else_node() {
        let ast =
            parse_source("defun main(n) { if n { return 1; } else { return 0; } return 0; }").unwrap();
        let body = ast.arena.get(ast.root);
        let program = ast.arena.get(body.left.unwrap());
        let first_stmt = ast.arena.get(program.right.unwrap());
        let if_node = ast.arena.get(first_stmt.left.unwrap());
        assert!(matches!(if_node.token, NodeToken::Keyword(Kw::If)));
        let wrapper = ast.arena.get(if_node.right.unwrap());
        assert!(matches!(wrapper.token, NodeToken::Keyword(Kw::Else)));
        assert!(wrapper.left.is_some());
        assert!(wrapper.right.is_some());
    }

    #[test]
    fn self_referential_assignment_resolves_to_the_prior_binding() {
        // `n` is a parameter; `n = n + 1` must read that parameter on the
        // right-hand side, not a freshly declared empty variable slot. The
        // assignment then idempotently declares a new `Variable` slot named
        // `n` (no `Variable` `n` existed yet), which shadows the parameter
        // for every read after this statement — so `return n` must resolve
        // to that new slot, not back to the parameter.
        let ast = parse_source("defun main(n) { n = n + 1; return n; }").unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());

        fn ident_ref(node: &fax_ast::Node) -> fax_ast::IdentRef {
            match node.token {
                NodeToken::Identifier(ident) => ident,
                other => panic!("expected an identifier node, got {other:?}"),
            }
        }

        let root = ast.arena.get(ast.root);
        let func = ast.arena.get(root.left.unwrap());
        let param = ident_ref(ast.arena.get(func.left.unwrap()));
        assert_eq!(param.kind, SymbolKind::Parameter);

        let first_stmt = ast.arena.get(func.right.unwrap());
        let assign = ast.arena.get(first_stmt.left.unwrap());
        let target = ident_ref(ast.arena.get(assign.left.unwrap()));
        let sum = ast.arena.get(assign.right.unwrap());
        let rhs = ident_ref(ast.arena.get(sum.left.unwrap()));

        // The right-hand side of `n = n + 1` reads the parameter's own slot.
        assert_eq!(rhs.scope_id, param.scope_id);
        assert_eq!(rhs.inner_id, param.inner_id);
        assert_eq!(rhs.kind, SymbolKind::Parameter);

        // The assignment target is a distinct, freshly declared `Variable`
        // slot, not the parameter it shares a name with.
        assert_eq!(target.kind, SymbolKind::Variable);
        assert_ne!(target.inner_id, param.inner_id);

        let second_stmt = ast.arena.get(first_stmt.right.unwrap());
        let ret = ast.arena.get(second_stmt.left.unwrap());
        let ret_ident = ident_ref(ast.arena.get(ret.left.unwrap()));

        // `return n` reads back the slot the assignment just wrote, i.e.
        // the incremented value, not the original parameter.
        assert_eq!(ret_ident.kind, SymbolKind::Variable);
        assert_eq!(ret_ident.inner_id, target.inner_id);
    }

    #[test]
    fn in_and_out_statements_parse() {
        let ast = parse_source("defun main() { in x; out x; return x; }").unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn bare_expression_statement_requires_trailing_semicolon() {
        let err = parse_source("defun main() { 1 + 1 return 0; }").unwrap_err();
        assert!(format!("{err}").contains("expected"));
    }
}
