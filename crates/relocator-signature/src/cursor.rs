use crate::error::{Result, SignatureError};

/// Deepest type-argument nesting a signature may have.
pub(crate) const MAX_NESTING: usize = 255;

/// Low-level character reader over signature text.
///
/// Tracks the byte offset of the next character and provides
/// peek/advance primitives for the grammar parser. Every error it
/// produces is tagged with what is being read and where.
pub(crate) struct Cursor<'src> {
    source: &'src str,
    reading: &'static str,
    chars: std::str::Chars<'src>,
    /// Byte offset of the *next* character to be consumed.
    offset: usize,
    /// Open type-argument lists around the current position.
    depth: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str, reading: &'static str) -> Self {
        Self {
            source,
            reading,
            chars: source.chars(),
            offset: 0,
            depth: 0,
        }
    }

    /// Enter a nested type-argument list opened at `offset`.
    pub fn descend(&mut self, offset: usize) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_at(offset, "signature nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Peek at the next character, failing at end of input.
    pub fn current(&self) -> Result<char> {
        self.peek().ok_or_else(|| self.error("unexpected end"))
    }

    /// Consume and return the next character, failing at end of input.
    pub fn advance(&mut self) -> Result<char> {
        let ch = self.chars.next().ok_or_else(|| self.error("unexpected end"))?;
        self.offset += ch.len_utf8();
        Ok(ch)
    }

    /// Consume the next character if it matches `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.chars.next();
            self.offset += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the next character, which must be `expected`.
    pub fn expect(&mut self, expected: char) -> Result<()> {
        let start = self.offset;
        let ch = self.advance()?;
        if ch != expected {
            return Err(SignatureError::malformed(
                self.reading,
                format!("expected '{}' but found '{}'", expected, ch),
                start,
            ));
        }
        Ok(())
    }

    /// True if there are no more characters.
    pub fn is_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Fail unless the whole input has been consumed.
    pub fn end(&self) -> Result<()> {
        if self.is_eof() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing string"))
        }
    }

    /// Slice the source from byte offset `start` to the current offset.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }

    /// The whole input, if `start` is its beginning and everything was consumed.
    pub fn whole_from(&self, start: usize) -> Option<&'src str> {
        if start == 0 && self.is_eof() {
            Some(self.source)
        } else {
            None
        }
    }

    /// Error at the current offset.
    pub fn error(&self, message: impl Into<String>) -> SignatureError {
        SignatureError::malformed(self.reading, message, self.offset)
    }

    /// Error at an earlier offset.
    pub fn error_at(&self, offset: usize, message: impl Into<String>) -> SignatureError {
        SignatureError::malformed(self.reading, message, offset)
    }
}
