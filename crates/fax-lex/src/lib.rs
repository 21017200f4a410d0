//! fax-lex - Lexical Analyzer (Lexer/Tokenizer)
//!
//! ============================================================================
//! LEXICAL ANALYSIS THEORY
//! ============================================================================
//!
//! Lexical analysis is the first phase of compilation: it transforms a
//! stream of characters into a stream of tokens ("tokenization" or
//! "scanning").
//!
//! FORMAL DEFINITION:
//! ------------------
//! Let Σ be the alphabet (the set of bytes a source file may contain).
//! Let Σ* be the set of all strings over Σ.
//!
//! The lexer is a function:
//!   L: Σ* → T*
//! where T is the set of tokens this crate defines (`Op`, `Kw`, `Sep`, a
//! number literal, or an identifier).
//!
//! PROPERTIES:
//! -----------
//! - Linear time: O(n) in the length of the source, one pass.
//! - Context-free: a token's category never depends on tokens around it.
//! - Maximal munch: at each position the lexer consumes the longest
//!   prefix of the remaining input that matches some token rule — this is
//!   exactly why `TOKEN_TABLE`'s entries must be ordered longest-prefix
//!   first (`<=` before `<`, `!=` has no shorter prefix to collide with).
//!
//! LEXEME vs TOKEN:
//! ----------------
//! - Lexeme: the literal substring matched (`"while"`, `"42"`, `"<="`).
//! - Token: the category plus any payload (`Kw::While`, a number literal's
//!   value, an `Op::Leq`).
//!
//! ============================================================================
//! TOKEN CATEGORIES IN THIS LANGUAGE
//! ============================================================================
//!
//! 1. KEYWORDS — `Kw`: `defun while if else return in out`. Reserved; never
//!    usable as an identifier.
//! 2. IDENTIFIERS — `[a-zA-Z_][a-zA-Z0-9_]*`, not matching a keyword.
//!    Function, parameter, and variable names all share this one lexical
//!    class; `fax_ast::SymbolKind` is what tells them apart, not the lexer.
//! 3. LITERALS — signed decimal integers only. No floats, no strings, no
//!    booleans: the language has exactly one scalar type.
//! 4. OPERATORS — `Op`: arithmetic (`+ - * / ^`), logical (`| &`),
//!    comparison (`== != > < >= <=`), assignment (`=`).
//! 5. SEPARATORS — `Sep`: `( ) , ; { }`. No `[]`, no `::`, no `->`: the
//!    grammar never needs them.
//! 6. Whitespace is skipped and carries no token; there is no end-of-file
//!    token either — the parser simply runs out of positions to read from.
//!
//! ============================================================================
//! IMPLEMENTATION TECHNIQUE
//! ============================================================================
//!
//! This lexer is direct-coded, not table-driven: `Cursor` exposes
//! character-at-a-time peeking and the per-category `lex_*` functions in
//! `lexer.rs` each consume one token, trying the fixed `TOKEN_TABLE` before
//! falling back to the identifier/number paths. A table-driven finite
//! state machine would trade this readability for raw lookup speed, which
//! the single-pass, small-alphabet grammar here doesn't need.
//!
//! Transforms source bytes into a flat, positioned token sequence plus an
//! identifier occurrence table. See `fax_ast` for what consumes this
//! output and `SPEC_FULL.md` §4.1 for the algorithm this module implements.

mod cursor;
mod error;
mod ident_table;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use ident_table::{IdentEntry, IdentTable};
pub use lexer::{lex, Lexer};
pub use token::{IdentId, Kw, LiteralEntry, Op, Sep, Token, TokenKind, TOKEN_TABLE};
