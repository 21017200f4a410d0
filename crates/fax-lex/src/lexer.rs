//! The lexer: character buffer to token stream.

use crate::cursor::{is_alnum, is_digit, is_whitespace, Cursor};
use crate::error::LexError;
use crate::ident_table::IdentTable;
use crate::token::{Token, TokenKind, TOKEN_TABLE};
use fax_util::Pos;

/// Lexes `source` in full, producing the token stream (terminated by a
/// single `Terminator` token) and the identifier table referencing slices
/// of `source`.
///
/// On the first unrecognized byte, returns a `LexError` and discards any
/// tokens produced so far (matching the "first error aborts the stage"
/// policy the whole pipeline follows).
pub fn lex(source: &str) -> Result<(Vec<Token>, IdentTable<'_>), LexError> {
    Lexer::new(source).tokenize()
}

/// Lexer for the fax source language.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    idents: IdentTable<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), idents: IdentTable::new() }
    }

    /// Runs the lexer to completion.
    pub fn tokenize(mut self) -> Result<(Vec<Token>, IdentTable<'a>), LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.cursor.is_at_end() {
                break;
            }
            let pos = Pos::new(self.cursor.line(), self.cursor.col());
            let kind = self.next_kind(pos)?;
            tokens.push(Token::new(kind, pos));
        }
        let end_pos = Pos::new(self.cursor.line(), self.cursor.col());
        tokens.push(Token::new(TokenKind::Terminator, end_pos));
        Ok((tokens, self.idents))
    }

    fn skip_whitespace(&mut self) {
        while is_whitespace(self.cursor.current()) {
            self.cursor.advance();
        }
    }

    fn next_kind(&mut self, pos: Pos) -> Result<TokenKind, LexError> {
        if let Some(kind) = self.match_literal() {
            return Ok(kind);
        }

        let b = self.cursor.current();
        if is_digit(b) {
            return Ok(self.lex_number());
        }
        if b.is_ascii_alphabetic() {
            return Ok(self.lex_identifier());
        }

        Err(LexError { byte: b as char, pos })
    }

    /// Scans `TOKEN_TABLE` linearly for the first literal that is a prefix
    /// of the remaining input. An alphabetic literal (a keyword) only
    /// counts as a match if it is not itself a prefix of a longer
    /// identifier — otherwise `while1` would wrongly split into `while`
    /// and `1`.
    fn match_literal(&mut self) -> Option<TokenKind> {
        for entry in TOKEN_TABLE {
            if self.cursor.starts_with(entry.literal) {
                if entry.is_alpha {
                    let boundary = self.cursor.byte_at(entry.literal.len());
                    if is_alnum(boundary) {
                        continue;
                    }
                }
                self.cursor.advance_by(entry.literal.len());
                return Some(entry.kind);
            }
        }
        None
    }

    /// Consumes the maximal digit run, accumulating `val = val*10 + digit`.
    fn lex_number(&mut self) -> TokenKind {
        let mut val: i32 = 0;
        while is_digit(self.cursor.current()) {
            let digit = (self.cursor.current() - b'0') as i32;
            val = val.wrapping_mul(10).wrapping_add(digit);
            self.cursor.advance();
        }
        TokenKind::NumLiteral(val)
    }

    /// Consumes the maximal `isalnum` run and interns it.
    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.cursor.position();
        while is_alnum(self.cursor.current()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        TokenKind::Identifier(self.idents.intern(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Kw, Op, Sep};

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, _) = lex(src).expect("lex should succeed");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keyword_boundary_does_not_swallow_identifier_prefix() {
        let ks = kinds("while1");
        assert_eq!(ks.len(), 2); // identifier + terminator
        assert!(matches!(ks[0], TokenKind::Identifier(_)));
    }

    #[test]
    fn keyword_is_recognized_at_boundary() {
        let ks = kinds("while (");
        assert_eq!(ks[0], TokenKind::Keyword(Kw::While));
        assert_eq!(ks[1], TokenKind::Separator(Sep::LParen));
    }

    #[test]
    fn comparison_operators_pick_longest_match() {
        assert_eq!(kinds("==")[0], TokenKind::Operator(Op::Eq));
        assert_eq!(kinds("!=")[0], TokenKind::Operator(Op::Neq));
        assert_eq!(kinds(">=")[0], TokenKind::Operator(Op::Geq));
        assert_eq!(kinds("<=")[0], TokenKind::Operator(Op::Leq));
        assert_eq!(kinds("=")[0], TokenKind::Operator(Op::Assign));
        assert_eq!(kinds(">")[0], TokenKind::Operator(Op::Gt));
        assert_eq!(kinds("<")[0], TokenKind::Operator(Op::Lt));
    }

    #[test]
    fn number_accumulates_left_to_right() {
        assert_eq!(kinds("1234")[0], TokenKind::NumLiteral(1234));
    }

    #[test]
    fn unexpected_byte_is_a_lex_error() {
        let err = lex("x = 1 @ 2;").unwrap_err();
        assert_eq!(err.byte, '@');
        assert_eq!(err.pos.line, 1);
        assert_eq!(err.pos.col, 7);
    }

    #[test]
    fn terminator_is_always_appended() {
        let (tokens, _) = lex("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Terminator);
    }

    #[test]
    fn identifiers_with_same_spelling_get_distinct_ids_per_occurrence() {
        let (tokens, idents) = lex("x x").unwrap();
        let TokenKind::Identifier(a) = tokens[0].kind else { panic!() };
        let TokenKind::Identifier(b) = tokens[1].kind else { panic!() };
        assert_ne!(a, b);
        assert_eq!(idents.get(a).text, idents.get(b).text);
    }

    #[test]
    fn token_positions_are_strictly_monotonic() {
        let (tokens, _) = lex("defun main ( ) {\n  out 1 ;\n}").unwrap();
        for w in tokens.windows(2) {
            assert!(w[0].pos < w[1].pos, "{:?} should precede {:?}", w[0].pos, w[1].pos);
        }
    }

    proptest::proptest! {
        #[test]
        fn positions_stay_monotonic_over_arbitrary_identifier_and_number_runs(
            pieces in proptest::collection::vec(proptest::prop_oneof![
                "[a-zA-Z][a-zA-Z0-9]{0,6}",
                "[0-9]{1,5}",
            ], 0..20)
        ) {
            let src = pieces.join(" ");
            if let Ok((tokens, _)) = lex(&src) {
                for w in tokens.windows(2) {
                    prop_assert!(w[0].pos < w[1].pos);
                }
            }
        }
    }
}
