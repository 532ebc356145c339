//! Byte cursor for scanning ASCII syntax inside UTF-8 text.
//!
//! All syntax characters are ASCII, so stopping on one always lands on a
//! char boundary. Predicates passed to [`Cursor::skip_while`] must treat
//! every non-ASCII byte the same way to keep that property.

use memchr::memchr;

/// A forward-only cursor over a string slice.
///
/// # Example
/// ```
/// use smartmark::cursor::Cursor;
///
/// let mut cursor = Cursor::new("  [label]: url");
/// cursor.skip_spaces();
/// assert!(cursor.eat(b'['));
/// let start = cursor.offset();
/// cursor.skip_while(|b| b != b']');
/// assert_eq!(cursor.slice_from(start), "label");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Cursor starting at `offset`, which must be a char boundary.
    #[inline]
    pub fn new_at(input: &'a str, offset: usize) -> Self {
        debug_assert!(input.is_char_boundary(offset.min(input.len())));
        Self {
            input,
            pos: offset.min(input.len()),
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + n).copied()
    }

    /// Advance by `n` bytes, clamped to the end.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek() == Some(b)
    }

    /// Skip bytes while `predicate` holds; returns how many were skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && predicate(bytes[self.pos]) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip ASCII whitespace, newlines included.
    #[inline]
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(|b| b.is_ascii_whitespace())
    }

    /// Skip up to `max` spaces.
    #[inline]
    pub fn skip_spaces_max(&mut self, max: usize) -> usize {
        let mut n = 0;
        while n < max && self.at(b' ') {
            self.pos += 1;
            n += 1;
        }
        n
    }

    #[inline]
    pub fn skip_spaces(&mut self) -> usize {
        self.skip_while(|b| b == b' ')
    }

    /// Consume `b` if it is next.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        if self.at(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `prefix` if the input continues with it.
    #[inline]
    pub fn eat_str(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Input between `start` and the current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    /// Offset of the next `needle` at or after the cursor.
    #[inline]
    pub fn find(&self, needle: u8) -> Option<usize> {
        memchr(needle, self.rest().as_bytes()).map(|i| self.pos + i)
    }
}
