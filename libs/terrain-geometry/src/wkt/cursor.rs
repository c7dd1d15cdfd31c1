//! # WKT Cursor
//!
//! Byte cursor over WKT text with whitespace skipping and token readers.

use crate::error::{GeometryError, GeometryResult};

/// Cursor over WKT source text.
///
/// ## Example
///
/// ```rust,ignore
/// let mut cursor = Cursor::new("POLYGON ((0 0");
/// assert_eq!(cursor.keyword().unwrap(), "POLYGON");
/// cursor.expect('(').unwrap();
/// ```
pub(crate) struct Cursor<'a> {
    source: &'a str,
    byte: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, byte: 0 }
    }

    /// Current byte offset.
    pub(crate) fn offset(&self) -> usize {
        self.byte
    }

    pub(crate) fn skip_whitespace(&mut self) {
        let rest = &self.source[self.byte..];
        let trimmed = rest.trim_start();
        self.byte += rest.len() - trimmed.len();
    }

    /// Next non-whitespace character, not consumed.
    pub(crate) fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.source[self.byte..].chars().next()
    }

    pub(crate) fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Consumes `expected` or fails.
    pub(crate) fn expect(&mut self, expected: char) -> GeometryResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.byte += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    /// Consumes `expected` if it is next.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.byte += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Reads an alphabetic keyword, uppercased.
    pub(crate) fn keyword(&mut self) -> GeometryResult<String> {
        self.skip_whitespace();
        let rest = &self.source[self.byte..];
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected a keyword"));
        }
        self.byte += len;
        Ok(rest[..len].to_ascii_uppercase())
    }

    /// True if the next token is an alphabetic keyword.
    pub(crate) fn at_keyword(&mut self) -> bool {
        matches!(self.peek(), Some(c) if c.is_ascii_alphabetic())
    }

    /// Reads a floating point number.
    pub(crate) fn number(&mut self) -> GeometryResult<f64> {
        self.skip_whitespace();
        let start = self.byte;
        let rest = &self.source[start..];
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
            .unwrap_or(rest.len());
        let token = &rest[..len];
        let value = token
            .parse::<f64>()
            .map_err(|_| GeometryError::malformed(format!("invalid number '{}'", token), start))?;
        if !value.is_finite() {
            return Err(GeometryError::malformed(
                format!("non-finite number '{}'", token),
                start,
            ));
        }
        self.byte += len;
        Ok(value)
    }

    /// True if the next token starts a number.
    pub(crate) fn at_number(&mut self) -> bool {
        matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> GeometryError {
        GeometryError::malformed(message, self.byte)
    }
}
