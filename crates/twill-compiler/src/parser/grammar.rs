//! Grammar productions.
//!
//! Precedence, lowest to highest binding:
//! 1. alternation: `alt := seq ('|' seq)*`
//! 2. sequence: `seq := quantified*`
//! 3. quantified atom: `quantified := atom quantifier?`
//!
//! A quantifier binds only to the immediately preceding atom. Parsing stops
//! at the first error.

use twill_core::ast::{AnchorKind, ClassEscapeKind, ClassMember, Direction, EscapeKind};
use twill_core::{Max, Node};

use super::Parser;
use crate::ParseError;

/// Characters that terminate a literal `{...}` run: anything that starts
/// another atom or a quantifier.
const BRACE_RUN_STOPPERS: &str = "\\(){[]|^$.*+?";

impl Parser<'_> {
    pub(crate) fn parse_pattern(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_alt()?;
        self.skip_trivia();
        if !self.eof() {
            return Err(match self.peek() {
                Some(')') => self.err("Unexpected token", self.pos),
                _ => self.err("Unexpected trailing input", self.pos),
            });
        }
        Ok(node)
    }

    fn parse_alt(&mut self) -> Result<Node, ParseError> {
        self.enter()?;
        let mut branches = vec![self.parse_seq()?];
        self.skip_trivia();
        while self.eat('|') {
            self.skip_trivia();
            branches.push(self.parse_seq()?);
            self.skip_trivia();
        }
        self.exit();
        if branches.len() == 1 {
            Ok(branches.pop().unwrap_or(Node::seq(vec![])))
        } else {
            Ok(Node::Alt {
                alternatives: branches,
            })
        }
    }

    fn parse_seq(&mut self) -> Result<Node, ParseError> {
        let mut parts = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None | Some('|') | Some(')') => break,
                _ => {}
            }
            let atom = self.parse_atom()?;
            parts.push(self.apply_quantifier(atom)?);
        }
        if parts.len() == 1 {
            Ok(parts.pop().unwrap_or(Node::seq(vec![])))
        } else {
            Ok(Node::seq(parts))
        }
    }

    // ---- quantifiers ----

    fn apply_quantifier(&mut self, atom: Node) -> Result<Node, ParseError> {
        self.skip_trivia();
        let Some((min, max)) = self.try_quantifier_bounds()? else {
            return Ok(atom);
        };
        let (lazy, possessive) = if self.eat('?') {
            (true, false)
        } else if self.eat('+') {
            (false, true)
        } else {
            (false, false)
        };
        Ok(Node::Quant {
            target: Box::new(atom),
            min,
            max,
            lazy,
            possessive,
        })
    }

    fn try_quantifier_bounds(&mut self) -> Result<Option<(u32, Max)>, ParseError> {
        match self.peek() {
            Some('*') => {
                self.bump();
                Ok(Some((0, Max::Unbounded)))
            }
            Some('+') => {
                self.bump();
                Ok(Some((1, Max::Unbounded)))
            }
            Some('?') => {
                self.bump();
                Ok(Some((0, Max::Finite(1))))
            }
            Some('{') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.parse_brace_quantifier().map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Brace quantifier body. Only entered when a digit follows the `{`, so
    /// a malformed tail is an error rather than a literal.
    fn parse_brace_quantifier(&mut self) -> Result<(u32, Max), ParseError> {
        let open = self.pos;
        self.bump(); // '{'
        let min = self.read_int();
        if self.eat('}') {
            return Ok((min, Max::Finite(min)));
        }
        if self.eat(',') {
            if self.eat('}') {
                return Ok((min, Max::Unbounded));
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                let max = self.read_int();
                if self.eat('}') {
                    if min > max {
                        return Err(self.err("Invalid quantifier range", open));
                    }
                    return Ok((min, Max::Finite(max)));
                }
            }
        }
        Err(self.err("Incomplete quantifier", self.pos))
    }

    // ---- atoms ----

    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Some('.') => {
                self.bump();
                Ok(Node::Dot)
            }
            Some('^') => {
                self.bump();
                Ok(Node::Anchor {
                    at: AnchorKind::Start,
                })
            }
            Some('$') => {
                self.bump();
                Ok(Node::Anchor {
                    at: AnchorKind::End,
                })
            }
            Some('(') => self.parse_group(),
            Some('[') => self.parse_class(),
            Some('\\') => self.parse_escape(),
            Some(c @ ('*' | '+' | '?')) => {
                Err(self.err(format!("Dangling quantifier '{c}'"), self.pos))
            }
            Some('{') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                Err(self.err("Dangling quantifier '{'", self.pos))
            }
            Some('{') => Ok(self.parse_brace_literal()),
            Some(c) => {
                self.bump();
                Ok(Node::lit(c))
            }
            None => Err(self.err("Unexpected trailing input", self.pos)),
        }
    }

    /// A `{` not starting a quantifier opens a literal run: plain characters
    /// up to and including the first `}`, stopping before anything that
    /// would start another atom. `a{,5}` is `Lit("a")` then `Lit("{,5}")`.
    fn parse_brace_literal(&mut self) -> Node {
        let mut value = String::new();
        self.bump();
        value.push('{');
        while let Some(c) = self.peek() {
            if c == '}' {
                self.bump();
                value.push('}');
                break;
            }
            if BRACE_RUN_STOPPERS.contains(c) {
                break;
            }
            self.bump();
            value.push(c);
        }
        Node::Lit { value }
    }

    // ---- escapes ----

    fn parse_escape(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.bump(); // '\'
        let Some(next) = self.peek() else {
            return Err(self.err("Incomplete escape sequence", start));
        };
        match next {
            '1'..='9' => {
                let index = self.read_int();
                Ok(Node::BackReference {
                    index: Some(index),
                    name: None,
                })
            }
            'b' | 'B' | 'A' | 'Z' | 'z' => {
                self.bump();
                let at = match next {
                    'b' => AnchorKind::WordBoundary,
                    'B' => AnchorKind::NotWordBoundary,
                    'A' => AnchorKind::AbsoluteStart,
                    'Z' => AnchorKind::EndBeforeFinalNewline,
                    _ => AnchorKind::AbsoluteEnd,
                };
                Ok(Node::Anchor { at })
            }
            'k' => {
                self.bump();
                if !self.eat('<') {
                    return Err(self.err("Expected '<' after \\k", self.pos));
                }
                let name_start = self.pos;
                let name = self.read_name('>', "Unterminated named backref")?;
                if !is_identifier(&name) {
                    return Err(self.err("Invalid backreference name", name_start));
                }
                Ok(Node::BackReference {
                    index: None,
                    name: Some(name),
                })
            }
            'd' | 'D' | 'w' | 'W' | 's' | 'S' => {
                self.bump();
                Ok(Node::Escape {
                    kind: shorthand_kind(next),
                    value: None,
                })
            }
            'p' | 'P' => {
                self.bump();
                let name = self.parse_property_name()?;
                Ok(Node::CharClass {
                    negated: false,
                    members: vec![ClassMember::UnicodeProperty {
                        name,
                        negated: next == 'P',
                    }],
                })
            }
            'x' => {
                let value = self.parse_hex_escape()?;
                Ok(Node::Escape {
                    kind: EscapeKind::Hex,
                    value: Some(value),
                })
            }
            'u' | 'U' => {
                let value = self.parse_unicode_escape()?;
                Ok(Node::Escape {
                    kind: EscapeKind::UnicodeCodepoint,
                    value: Some(value),
                })
            }
            '0' | 'n' | 'r' | 't' | 'f' | 'v' => {
                self.bump();
                Ok(Node::Escape {
                    kind: EscapeKind::ControlChar,
                    value: Some(control_char(next)),
                })
            }
            // Identity escape: the next character, taken literally.
            c => {
                self.bump();
                Ok(Node::lit(c))
            }
        }
    }

    fn parse_property_name(&mut self) -> Result<String, ParseError> {
        if !self.eat('{') {
            return Err(self.err("Expected { after \\p/\\P", self.pos));
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '}' {
                break;
            }
            name.push(c);
            self.bump();
        }
        if !self.eat('}') {
            return Err(self.err("Unterminated \\p{...}", self.pos));
        }
        Ok(name)
    }

    /// Character named by a `\xHH` or `\x{...}` escape. The cursor sits on
    /// the `x`.
    fn parse_hex_escape(&mut self) -> Result<char, ParseError> {
        self.bump(); // 'x'
        if self.eat('{') {
            let open = self.pos;
            let digits = self.read_hex_run();
            if !self.eat('}') {
                return Err(self.err("Unterminated \\x{...}", self.pos));
            }
            return self.codepoint(&digits, open, "Invalid \\x{...} escape");
        }
        let mut digits = String::new();
        for _ in 0..2 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    digits.push(c);
                    self.bump();
                }
                _ => return Err(self.err("Invalid \\xHH escape", self.pos)),
            }
        }
        self.codepoint(&digits, self.pos, "Invalid \\xHH escape")
    }

    /// Character named by `\uHHHH`, `\u{...}`, or `\UHHHHHHHH`. The cursor
    /// sits on the `u` or `U`.
    fn parse_unicode_escape(&mut self) -> Result<char, ParseError> {
        let tp = self.bump().unwrap_or('u');
        if tp == 'u' && self.eat('{') {
            let open = self.pos;
            let digits = self.read_hex_run();
            if !self.eat('}') {
                return Err(self.err("Unterminated \\u{...}", self.pos));
            }
            return self.codepoint(&digits, open, "Invalid \\u{...} escape");
        }
        let (count, message) = if tp == 'U' {
            (8, "Invalid \\UHHHHHHHH")
        } else {
            (4, "Invalid \\uHHHH")
        };
        let mut digits = String::new();
        for _ in 0..count {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    digits.push(c);
                    self.bump();
                }
                _ => return Err(self.err(message, self.pos)),
            }
        }
        self.codepoint(&digits, self.pos, message)
    }

    fn read_hex_run(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_hexdigit() {
                break;
            }
            digits.push(c);
            self.bump();
        }
        digits
    }

    /// Hex digits to a scalar value; empty digits name NUL. Surrogates and
    /// out-of-range values are rejected.
    fn codepoint(&self, digits: &str, pos: usize, message: &str) -> Result<char, ParseError> {
        let cp = if digits.is_empty() {
            0
        } else {
            u32::from_str_radix(digits, 16)
                .map_err(|_| self.err(message, pos))?
        };
        char::from_u32(cp).ok_or_else(|| self.err(message, pos))
    }

    // ---- character classes ----

    fn parse_class(&mut self) -> Result<Node, ParseError> {
        self.bump(); // '['
        let negated = self.eat('^');
        let mut members: Vec<ClassMember> = Vec::new();
        let mut at_start = true;

        loop {
            let Some(c) = self.peek() else {
                return Err(self.err("Unterminated character class", self.pos));
            };

            // ']' closes the class except as the very first member.
            if c == ']' && !at_start {
                self.bump();
                break;
            }

            // '-' forms a range only between a preceding literal member and
            // a following non-']' item.
            if c == '-'
                && matches!(members.last(), Some(ClassMember::Literal { .. }))
                && self.peek_at(1).is_some_and(|n| n != ']')
            {
                self.bump();
                let end = self.parse_class_member()?;
                if let ClassMember::Literal { ch: to } = end {
                    let Some(ClassMember::Literal { ch: from }) = members.pop() else {
                        break;
                    };
                    members.push(ClassMember::Range { from, to });
                } else {
                    // No range against a class escape; both stay literal.
                    members.push(ClassMember::Literal { ch: '-' });
                    members.push(end);
                }
                at_start = false;
                continue;
            }

            members.push(self.parse_class_member()?);
            at_start = false;
        }

        Ok(Node::CharClass { negated, members })
    }

    fn parse_class_member(&mut self) -> Result<ClassMember, ParseError> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.err("Unterminated character class", start));
        };
        if c != '\\' {
            return Ok(ClassMember::Literal { ch: c });
        }
        let Some(next) = self.peek() else {
            return Err(self.err("Incomplete escape sequence", start));
        };
        match next {
            'd' | 'D' | 'w' | 'W' | 's' | 'S' => {
                self.bump();
                Ok(ClassMember::EscapeClass {
                    kind: class_escape_kind(next),
                })
            }
            'p' | 'P' => {
                self.bump();
                let name = self.parse_property_name()?;
                Ok(ClassMember::UnicodeProperty {
                    name,
                    negated: next == 'P',
                })
            }
            'x' => {
                let ch = self.parse_hex_escape()?;
                Ok(ClassMember::Literal { ch })
            }
            'u' | 'U' => {
                let ch = self.parse_unicode_escape()?;
                Ok(ClassMember::Literal { ch })
            }
            '0' | 'n' | 'r' | 't' | 'f' | 'v' => {
                self.bump();
                Ok(ClassMember::Literal {
                    ch: control_char(next),
                })
            }
            c => {
                self.bump();
                Ok(ClassMember::Literal { ch: c })
            }
        }
    }

    // ---- groups and lookarounds ----

    fn parse_group(&mut self) -> Result<Node, ParseError> {
        self.bump(); // '('

        if self.peek() == Some('?')
            && self
                .peek_at(1)
                .is_some_and(|c| matches!(c, 'i' | 'm' | 's' | 'x'))
        {
            return Err(self.err("Inline modifiers `(?imsx)` are not supported", self.pos));
        }

        if self.eat_str("?:") {
            let body = self.parse_alt()?;
            self.expect(')', "Unterminated group")?;
            return Ok(Node::Group {
                capturing: false,
                body: Box::new(body),
                name: None,
                atomic: false,
            });
        }

        // Lookbehind tokens must be recognized before "?<name>".
        if self.eat_str("?<=") {
            return self.parse_look_body(Direction::Behind, false);
        }
        if self.eat_str("?<!") {
            return self.parse_look_body(Direction::Behind, true);
        }

        if self.eat_str("?<") {
            let name_start = self.pos;
            let name = self.read_name('>', "Unterminated group name")?;
            if !is_identifier(&name) {
                return Err(self.err("Invalid group name", name_start));
            }
            let body = self.parse_alt()?;
            self.expect(')', "Unterminated group")?;
            return Ok(Node::Group {
                capturing: true,
                body: Box::new(body),
                name: Some(name),
                atomic: false,
            });
        }

        if self.eat_str("?>") {
            let body = self.parse_alt()?;
            self.expect(')', "Unterminated atomic group")?;
            return Ok(Node::Group {
                capturing: false,
                body: Box::new(body),
                name: None,
                atomic: true,
            });
        }

        if self.eat_str("?=") {
            return self.parse_look_body(Direction::Ahead, false);
        }
        if self.eat_str("?!") {
            return self.parse_look_body(Direction::Ahead, true);
        }

        let body = self.parse_alt()?;
        self.expect(')', "Unterminated group")?;
        Ok(Node::Group {
            capturing: true,
            body: Box::new(body),
            name: None,
            atomic: false,
        })
    }

    fn parse_look_body(&mut self, direction: Direction, negated: bool) -> Result<Node, ParseError> {
        let body = self.parse_alt()?;
        let message = match direction {
            Direction::Ahead => "Unterminated lookahead",
            Direction::Behind => "Unterminated lookbehind",
        };
        self.expect(')', message)?;
        Ok(Node::Lookaround {
            direction,
            negated,
            body: Box::new(body),
        })
    }

    fn read_name(&mut self, terminator: char, message: &str) -> Result<String, ParseError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == terminator {
                break;
            }
            name.push(c);
            self.bump();
        }
        if !self.eat(terminator) {
            return Err(self.err(message, self.pos));
        }
        Ok(name)
    }
}

fn shorthand_kind(c: char) -> EscapeKind {
    match c {
        'd' => EscapeKind::Digit,
        'D' => EscapeKind::NotDigit,
        'w' => EscapeKind::Word,
        'W' => EscapeKind::NotWord,
        's' => EscapeKind::Space,
        _ => EscapeKind::NotSpace,
    }
}

fn class_escape_kind(c: char) -> ClassEscapeKind {
    match c {
        'd' => ClassEscapeKind::Digit,
        'D' => ClassEscapeKind::NotDigit,
        'w' => ClassEscapeKind::Word,
        'W' => ClassEscapeKind::NotWord,
        's' => ClassEscapeKind::Space,
        _ => ClassEscapeKind::NotSpace,
    }
}

fn control_char(c: char) -> char {
    match c {
        '0' => '\0',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'f' => '\u{000C}',
        _ => '\u{000B}',
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
