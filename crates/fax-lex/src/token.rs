//! Token types and the fixed operator/keyword/separator table.

use fax_util::Pos;

/// Arithmetic, comparison, and assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Or,
    And,
    Eq,
    Neq,
    Gt,
    Lt,
    Geq,
    Leq,
    Assign,
}

impl Op {
    /// The mnemonic used both in emitted assembly comments and the
    /// tree-interchange format.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Pow => "POW",
            Op::Or => "OR",
            Op::And => "AND",
            Op::Eq => "EQ",
            Op::Neq => "NEQ",
            Op::Gt => "GT",
            Op::Lt => "LT",
            Op::Geq => "GEQ",
            Op::Leq => "LEQ",
            Op::Assign => "ASSIGN",
        }
    }
}

/// Reserved words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kw {
    While,
    If,
    Else,
    Defun,
    Return,
    In,
    Out,
}

impl Kw {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Kw::While => "WHILE",
            Kw::If => "IF",
            Kw::Else => "ELSE",
            Kw::Defun => "DEFUN",
            Kw::Return => "RETURN",
            Kw::In => "IN",
            Kw::Out => "OUT",
        }
    }
}

/// Structural punctuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sep {
    LParen,
    RParen,
    Comma,
    Semicolon,
    LBrace,
    RBrace,
}

impl Sep {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Sep::LParen => "PAR_OPEN",
            Sep::RParen => "PAR_CLOSE",
            Sep::Comma => "COMMA",
            Sep::Semicolon => "SEMI",
            Sep::LBrace => "BRACE_OPEN",
            Sep::RBrace => "BRACE_CLOSE",
        }
    }
}

/// Identity of one identifier occurrence, assigned in lex order.
///
/// Two occurrences of the same spelling at two different source positions
/// get two different `IdentId`s (see `fax_lex::IdentTable`); name equality
/// is decided by byte content, never by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentId(pub u32);

/// The payload of a token, independent of its source position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Operator(Op),
    Keyword(Kw),
    Separator(Sep),
    Identifier(IdentId),
    NumLiteral(i32),
    /// Synthetic end-of-input sentinel appended after the last real token.
    Terminator,
    /// Marks a function-call AST node; never produced directly by the lexer.
    Call,
    /// Placeholder token type used only by the AST's synthetic root.
    Fake,
}

/// A token plus the position of its first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub const fn new(kind: TokenKind, pos: Pos) -> Self {
        Self { kind, pos }
    }
}

/// One entry of the fixed literal table: the literal text and the token
/// kind it produces. `is_alpha` marks entries whose literal must not be
/// followed directly by another alphanumeric byte (keywords) — enforced
/// by `Lexer::match_literal`.
pub struct LiteralEntry {
    pub literal: &'static str,
    pub kind: TokenKind,
    pub is_alpha: bool,
}

macro_rules! lit {
    ($text:literal, $kind:expr, alpha) => {
        LiteralEntry { literal: $text, kind: $kind, is_alpha: true }
    };
    ($text:literal, $kind:expr) => {
        LiteralEntry { literal: $text, kind: $kind, is_alpha: false }
    };
}

/// The fixed operator/keyword/separator table, scanned linearly by the
/// lexer. Longer-prefix literals MUST precede their shorter prefixes
/// (`==` before `=`, `>=` before `>`, `<=` before `<`) — a unit test below
/// walks the table pairwise to enforce this invariant at test time, since
/// a `const fn` string-prefix check over this table is awkward to express.
pub static TOKEN_TABLE: &[LiteralEntry] = &[
    lit!("==", TokenKind::Operator(Op::Eq)),
    lit!("!=", TokenKind::Operator(Op::Neq)),
    lit!(">=", TokenKind::Operator(Op::Geq)),
    lit!("<=", TokenKind::Operator(Op::Leq)),
    lit!("while", TokenKind::Keyword(Kw::While), alpha),
    lit!("defun", TokenKind::Keyword(Kw::Defun), alpha),
    lit!("return", TokenKind::Keyword(Kw::Return), alpha),
    lit!("else", TokenKind::Keyword(Kw::Else), alpha),
    lit!("if", TokenKind::Keyword(Kw::If), alpha),
    lit!("in", TokenKind::Keyword(Kw::In), alpha),
    lit!("out", TokenKind::Keyword(Kw::Out), alpha),
    lit!("+", TokenKind::Operator(Op::Add)),
    lit!("-", TokenKind::Operator(Op::Sub)),
    lit!("*", TokenKind::Operator(Op::Mul)),
    lit!("/", TokenKind::Operator(Op::Div)),
    lit!("^", TokenKind::Operator(Op::Pow)),
    lit!("|", TokenKind::Operator(Op::Or)),
    lit!("&", TokenKind::Operator(Op::And)),
    lit!(">", TokenKind::Operator(Op::Gt)),
    lit!("<", TokenKind::Operator(Op::Lt)),
    lit!("=", TokenKind::Operator(Op::Assign)),
    lit!("(", TokenKind::Separator(Sep::LParen)),
    lit!(")", TokenKind::Separator(Sep::RParen)),
    lit!(",", TokenKind::Separator(Sep::Comma)),
    lit!(";", TokenKind::Separator(Sep::Semicolon)),
    lit!("{", TokenKind::Separator(Sep::LBrace)),
    lit!("}", TokenKind::Separator(Sep::RBrace)),
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable property: no table entry is a strict prefix of a later
    /// entry — if it were, the linear-scan-first-match rule would never
    /// reach the longer literal.
    #[test]
    fn table_orders_longer_prefixes_first() {
        for (i, a) in TOKEN_TABLE.iter().enumerate() {
            for b in &TOKEN_TABLE[i + 1..] {
                assert!(
                    !b.literal.starts_with(a.literal) || a.literal == b.literal,
                    "{:?} (index {i}) is a prefix of later entry {:?}",
                    a.literal,
                    b.literal
                );
            }
        }
    }

    #[test]
    fn mnemonics_are_fixed_and_canonical() {
        assert_eq!(Op::Leq.mnemonic(), "LEQ");
        assert_eq!(Op::Neq.mnemonic(), "NEQ");
    }
}
