//! Byte cursor for traversing source code.
//!
//! The source language is restricted to ASCII punctuation, digits, and
//! `isalnum` identifiers, so the cursor works directly on bytes rather than
//! decoding UTF-8 scalar values — this keeps `advance`/`current` O(1) with
//! no multi-byte-boundary bookkeeping.

/// A cursor over a source byte buffer.
///
/// Tracks byte position plus 1-based line/column, incrementing the line
/// counter on `\n` and resetting the column.
pub struct Cursor<'a> {
    source: &'a [u8],
    position: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            line: 1,
            col: 1,
        }
    }

    /// Returns the byte at the current position, or `\0` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(0)
    }

    /// Returns the byte `offset` bytes ahead of the current position, or
    /// `\0` if that is past the end of input.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.source.get(self.position + offset).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Advances past the current byte, updating line/column bookkeeping.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.current() == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.position += 1;
    }

    /// Advances past the current byte only if it equals `b`; returns whether it matched.
    pub fn match_byte(&mut self, b: u8) -> bool {
        if self.current() == b {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns the source slice from `start` (a byte offset) up to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        std::str::from_utf8(&self.source[start..self.position])
            .expect("token boundaries always fall on ASCII byte positions")
    }

    /// Returns whether the remaining input starts with the given literal.
    pub fn starts_with(&self, literal: &str) -> bool {
        let bytes = literal.as_bytes();
        if self.position + bytes.len() > self.source.len() {
            return false;
        }
        &self.source[self.position..self.position + bytes.len()] == bytes
    }

    /// Advances past exactly `literal.len()` bytes, updating line/col per byte.
    pub fn advance_by(&mut self, len: usize) {
        for _ in 0..len {
            self.advance();
        }
    }
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_alnum(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_line_and_column() {
        let mut c = Cursor::new("ab\ncd");
        assert_eq!((c.line(), c.col()), (1, 1));
        c.advance();
        assert_eq!((c.line(), c.col()), (1, 2));
        c.advance();
        assert_eq!((c.line(), c.col()), (1, 3));
        c.advance(); // consumes '\n'
        assert_eq!((c.line(), c.col()), (2, 1));
    }

    #[test]
    fn starts_with_checks_remaining_input() {
        let c = Cursor::new("== foo");
        assert!(c.starts_with("=="));
        assert!(c.starts_with("="));
        assert!(!c.starts_with("!="));
    }

    #[test]
    fn byte_at_end_is_nul() {
        let c = Cursor::new("a");
        assert_eq!(c.byte_at(5), 0);
    }
}
