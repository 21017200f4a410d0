//! fax-par - Parser (Syntactic Analyzer) with integrated scope resolution
//!
//! ============================================================================
//! PARSING THEORY
//! ============================================================================
//!
//! Parsing analyzes a sequence of tokens to determine its grammatical
//! structure, producing an Abstract Syntax Tree (AST).
//!
//! FORMAL DEFINITION:
//! ------------------
//! Given a grammar G = (N, T, P, S) where
//!   N = non-terminal symbols (`program`, `statement`, `expr`, ...)
//!   T = terminal symbols (the tokens `fax_lex` produces)
//!   P = production rules (the EBNF below)
//!   S = start symbol (`program`)
//!
//! parsing is finding a derivation S ⇒* w for the input token sequence w.
//! This grammar is context-free (Chomsky Type 2): every production's
//! left-hand side is a single non-terminal, so one recursive-descent
//! function per non-terminal suffices — no backtracking, no lookahead
//! beyond one token.
//!
//! GRAMMAR (EBNF; tokens in backticks):
//! -------------------------------------
//! ```ebnf
//! program   = func_decl { func_decl } ;
//! func_decl = "defun" ident "(" [ param_list ] ")" block ;
//! block     = "{" { statement } "}" ;
//! statement = while | if | (assignment | expr | return | in | out) ";" ;
//! expr      = or ;
//! or        = and  { "|"  and } ;
//! and       = eq   { "&"  eq } ;
//! eq        = cmp  { ("=="|"!=") cmp } ;
//! cmp       = sum  { ("<"|"<="|">"|">=") sum } ;
//! sum       = mul  { ("+"|"-") mul } ;
//! mul       = pow  { ("*"|"/") mul } ;
//! pow       = primary { "^" primary } ;
//! primary   = "(" expr ")" | call | num | ident ;
//! call      = ident "(" [ arg_list ] ")" ;
//! ```
//!
//! Every binary-operator level is a LEFT-RECURSIVE rule rewritten as
//! iteration (`sum = mul { op mul }` rather than `sum = sum op mul | mul`)
//! — the standard left-recursion elimination recursive descent requires,
//! since a naive recursive-descent function for `sum := sum + mul | mul`
//! would recurse into itself before consuming any input and never
//! terminate. Each level's parse function instead starts from one operand
//! and loops, folding every subsequent `op operand` pair onto an
//! accumulator (`new_node(op, accumulator, operand)`), which is what makes
//! the resulting subtree left-associative.
//!
//! ALGORITHM: RECURSIVE DESCENT
//! -----------------------------
//! One function per grammar nonterminal (`expr.rs`, `stmt.rs`, `items.rs`).
//! Each function consumes exactly the tokens its production describes and
//! returns the `NodeId` it built:
//! ```
//! fn parse_while(&mut self) -> Result<NodeId, ParseError> {
//!     expect_kw(While);
//!     cond = parse_expr();
//!     body = parse_block();
//!     arena.push(Keyword(While), cond, body)
//! }
//! ```
//!
//! This grammar is LL(1): at any point, the next token alone determines
//! which production applies (`is_assignment_start` is the one place two
//! tokens of lookahead are needed, to tell `ident = expr` apart from a
//! bare `ident` expression statement).
//!
//! There is no error recovery: the first `ParseError` returns straight up
//! through the call stack and the partially built arena is dropped with
//! the `Parser` — a deliberate simplification enabled by Rust's ownership
//! model, not something the grammar itself requires.
//!
//! Scope resolution happens inline, as each identifier is parsed — by the
//! time a node lands in the arena its `Identifier` payload is already
//! fully resolved. See `fax_ast::ScopeTable` for the resolution rules.

mod error;
mod expr;
mod items;
mod stmt;

use fax_ast::{Ast, NodeArena, NodeId, NodeToken, ScopeId, ScopeTable, GLOBAL_SCOPE};
use fax_lex::{IdentId, IdentTable, Kw, Op, Sep, Token, TokenKind};
use fax_util::Pos;

pub use error::ParseError;

/// Parses a complete program from a lexed token stream.
pub fn parse(tokens: Vec<Token>, idents: IdentTable<'_>) -> Result<Ast<'_>, ParseError> {
    Parser::new(tokens, idents).parse_program_root()
}

pub(crate) struct Parser<'a> {
    tokens: Vec<Token>,
    idents: IdentTable<'a>,
    position: usize,
    arena: NodeArena<'a>,
    scopes: ScopeTable<'a>,
    current_scope: ScopeId,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token>, idents: IdentTable<'a>) -> Self {
        Self {
            tokens,
            idents,
            position: 0,
            arena: NodeArena::new(),
            scopes: ScopeTable::new(),
            current_scope: GLOBAL_SCOPE,
        }
    }

    fn parse_program_root(mut self) -> Result<Ast<'a>, ParseError> {
        let program = self.parse_program()?;
        let pos = self.arena.get(program).pos;
        let root = self.arena.push_root(Some(program), pos);
        Ok(Ast::new(self.arena, self.scopes, root))
    }

    // ---- token cursor -----------------------------------------------

    fn current_kind(&self) -> TokenKind {
        self.tokens[self.position].kind
    }

    fn current_pos(&self) -> Pos {
        self.tokens[self.position].pos
    }

    /// One token of lookahead past the current position, clamped to the
    /// last token (the `Terminator` sentinel never advances past itself).
    fn peek_kind(&self, offset: usize) -> TokenKind {
        let idx = (self.position + offset).min(self.tokens.len() - 1);
        self.tokens[idx].kind
    }

    fn current_op(&self) -> Option<Op> {
        match self.current_kind() {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    fn at_sep(&self, sep: Sep) -> bool {
        self.current_kind() == TokenKind::Separator(sep)
    }

    fn at_kw(&self, kw: Kw) -> bool {
        self.current_kind() == TokenKind::Keyword(kw)
    }

    fn at_terminator(&self) -> bool {
        self.current_kind() == TokenKind::Terminator
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.position];
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        tok
    }

    fn match_sep(&mut self, sep: Sep) -> bool {
        if self.at_sep(sep) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_sep(&mut self, sep: Sep) -> Result<Pos, ParseError> {
        if self.at_sep(sep) {
            let pos = self.current_pos();
            self.advance();
            Ok(pos)
        } else {
            Err(self.unexpected(format!("`{}`", sep.mnemonic())))
        }
    }

    fn expect_kw(&mut self, kw: Kw) -> Result<Pos, ParseError> {
        if self.at_kw(kw) {
            let pos = self.current_pos();
            self.advance();
            Ok(pos)
        } else {
            Err(self.unexpected(format!("`{}`", kw.mnemonic())))
        }
    }

    fn expect_op(&mut self, op: Op) -> Result<Pos, ParseError> {
        if self.current_op() == Some(op) {
            let pos = self.current_pos();
            self.advance();
            Ok(pos)
        } else {
            Err(self.unexpected(format!("`{}`", op.mnemonic())))
        }
    }

    fn expect_identifier(&mut self) -> Result<(&'a str, Pos, IdentId), ParseError> {
        let pos = self.current_pos();
        match self.current_kind() {
            TokenKind::Identifier(id) => {
                self.advance();
                let entry = self.idents.get(id);
                Ok((entry.text, pos, id))
            }
            other => Err(ParseError::UnexpectedToken {
                pos,
                expected: "identifier".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn unexpected(&self, expected: String) -> ParseError {
        ParseError::UnexpectedToken {
            pos: self.current_pos(),
            expected,
            found: format!("{:?}", self.current_kind()),
        }
    }

    fn unresolved(&self, name: &str, pos: Pos) -> ParseError {
        ParseError::UnresolvedIdentifier { pos, name: name.to_string() }
    }

    /// Builds the right-leaning `;`-chained spine a block's statements are
    /// stored as, terminated by `None` for an empty remainder.
    fn chain_statements(&mut self, stmts: Vec<NodeId>) -> Option<NodeId> {
        let mut tail = None;
        for id in stmts.into_iter().rev() {
            let pos = self.arena.get(id).pos;
            tail = Some(self.arena.push(NodeToken::Separator(Sep::Semicolon), pos, Some(id), tail));
        }
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn parse_source(src: &str) -> Result<Ast<'_>, ParseError> {
        let (tokens, idents) = fax_lex::lex(src).expect("fixture should lex");
        parse(tokens, idents)
    }

    #[test]
    fn empty_function_body_parses() {
        let ast = parse_source("defun main() { return 0; }").unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn bare_top_level_statement_is_a_syntax_error() {
        let err = parse_source("x = 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    // S1-S4, S6 from `SPEC_FULL.md` §8 — parse-stage portions. `fax-gen`
    // carries the matching assembly-emission assertions.

    #[test]
    fn s1_arithmetic_precedence_parses_and_round_trips_through_scopes() {
        let ast = parse_source("defun main() { out 2 + 3 * 4; return 0; }").unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn s2_if_else_with_comparison_parses() {
        let src = "defun main() { x = 5; if x > 3 { out 1; } else { out 0; } return 0; }";
        let ast = parse_source(src).unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn s3_while_loop_with_counter_parses() {
        let src = "defun main() { i = 0; while i < 5 { out i; i = i + 1; } return 0; }";
        let ast = parse_source(src).unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn s4_call_across_two_functions_resolves_against_the_global_registry() {
        let src = "defun add(a,b) { return a + b; } defun main() { out add(7, 35); return 0; }";
        let ast = parse_source(src).unwrap();
        assert!(ast.parent_links_are_consistent());
        assert!(ast.scope_resolution_is_total());
    }

    #[test]
    fn s6_undeclared_identifier_is_unresolved() {
        let err = parse_source("defun main() { out y; return 0; }").unwrap_err();
        match err {
            ParseError::UnresolvedIdentifier { name, .. } => assert_eq!(name, "y"),
            other => panic!("expected UnresolvedIdentifier, got {other:?}"),
        }
    }
}
