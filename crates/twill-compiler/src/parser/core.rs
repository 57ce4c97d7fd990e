//! Parser cursor state and low-level operations.

use crate::directives::Scan;
use crate::ParseError;

/// Nesting ceiling for groups and lookarounds.
///
/// Recursion is bounded so pathological inputs fail with a positioned error
/// instead of blowing the stack.
pub(crate) const MAX_DEPTH: u32 = 256;

/// Character-cursor parser over the pattern body.
///
/// `pos` indexes into the body; errors are reported at `base + pos` so they
/// point into the full original input.
pub(crate) struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pub(crate) pos: usize,
    base: usize,
    extended: bool,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str, scan: &Scan) -> Self {
        Self {
            text,
            chars: text[scan.byte_offset..].chars().collect(),
            pos: 0,
            base: scan.char_offset,
            extended: scan.flags.extended,
            depth: 0,
        }
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, lookahead: usize) -> Option<char> {
        self.chars.get(self.pos + lookahead).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, expected: &str) -> bool {
        let mut lookahead = 0;
        for c in expected.chars() {
            if self.peek_at(lookahead) != Some(c) {
                return false;
            }
            lookahead += 1;
        }
        self.pos += lookahead;
        true
    }

    /// Skip insignificant whitespace and `#` comments in extended mode.
    ///
    /// A no-op otherwise. Never called inside a character class, where
    /// whitespace is always significant.
    pub(crate) fn skip_trivia(&mut self) {
        if !self.extended {
            return;
        }
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '#' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Run of ASCII digits starting at the cursor, saturating on overflow.
    pub(crate) fn read_int(&mut self) -> u32 {
        let mut value: u32 = 0;
        while let Some(c) = self.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            value = value.saturating_mul(10).saturating_add(digit);
            self.pos += 1;
        }
        value
    }

    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.err("Pattern nested too deeply", self.pos));
        }
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth -= 1;
    }

    /// Error at body offset `pos`, translated to the full-input offset.
    pub(crate) fn err(&self, message: impl Into<String>, pos: usize) -> ParseError {
        ParseError::new(message, self.base + pos, self.text)
    }

    pub(crate) fn expect(&mut self, expected: char, message: &str) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.err(message, self.pos))
        }
    }
}
