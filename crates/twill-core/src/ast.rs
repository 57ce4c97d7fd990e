//! Abstract syntax tree for Twill patterns.
//!
//! The AST preserves the shape of the source text: adjacent literals stay
//! separate, single-element sequences keep their wrapper, and the anchor
//! alias `NonWordBoundary` survives until lowering. JSON uses a `"type"` tag
//! per node.

use serde::{Deserialize, Serialize};

use crate::Max;

/// One AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Literal text.
    Lit { value: String },
    /// Ordered concatenation.
    Seq { parts: Vec<Node> },
    /// Alternation between two or more branches.
    Alt { alternatives: Vec<Node> },
    /// Repetition of a single target.
    Quant {
        target: Box<Node>,
        min: u32,
        max: Max,
        #[serde(default)]
        lazy: bool,
        #[serde(default)]
        possessive: bool,
    },
    /// Capturing, non-capturing, named, or atomic group.
    Group {
        capturing: bool,
        body: Box<Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        atomic: bool,
    },
    /// Bracketed character class.
    CharClass {
        negated: bool,
        members: Vec<ClassMember>,
    },
    /// Zero-width position assertion.
    Anchor { at: AnchorKind },
    /// Escape sequence outside a character class.
    Escape {
        kind: EscapeKind,
        /// Resolved character for `control-char`, `hex`, and
        /// `unicode-codepoint` escapes.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<char>,
    },
    /// Reference to an earlier capturing group, by index or by name.
    BackReference {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Lookahead or lookbehind assertion.
    Lookaround {
        direction: Direction,
        negated: bool,
        body: Box<Node>,
    },
    /// Any character except newline.
    Dot,
}

/// Member of a character class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClassMember {
    /// Single character.
    Literal {
        #[serde(rename = "char")]
        ch: char,
    },
    /// Inclusive character range.
    Range { from: char, to: char },
    /// Unicode property, `\p{...}` or `\P{...}`.
    UnicodeProperty { name: String, negated: bool },
    /// Shorthand class escape such as `\d` or `\W`.
    EscapeClass { kind: ClassEscapeKind },
}

/// Position asserted by an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorKind {
    /// `^`.
    Start,
    /// `$`.
    End,
    /// `\b`.
    WordBoundary,
    /// `\B`.
    NotWordBoundary,
    /// Accepted alias for [`AnchorKind::NotWordBoundary`]; lowering folds it.
    NonWordBoundary,
    /// `\A`.
    AbsoluteStart,
    /// `\Z`.
    EndBeforeFinalNewline,
    /// `\z`.
    AbsoluteEnd,
}

/// Kind of a top-level escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeKind {
    Digit,
    NotDigit,
    Space,
    NotSpace,
    Word,
    NotWord,
    ControlChar,
    Hex,
    UnicodeCodepoint,
}

/// Shorthand escape allowed inside a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassEscapeKind {
    #[serde(rename = "d")]
    Digit,
    #[serde(rename = "D")]
    NotDigit,
    #[serde(rename = "w")]
    Word,
    #[serde(rename = "W")]
    NotWord,
    #[serde(rename = "s")]
    Space,
    #[serde(rename = "S")]
    NotSpace,
}

/// Direction of a lookaround assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Ahead,
    Behind,
}

impl Node {
    /// Literal node from anything stringly.
    pub fn lit(value: impl Into<String>) -> Self {
        Node::Lit {
            value: value.into(),
        }
    }

    /// Sequence node; callers decide whether to collapse singletons.
    pub fn seq(parts: Vec<Node>) -> Self {
        Node::Seq { parts }
    }
}

/// Parse a JSON-encoded AST.
pub fn from_json(json: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(json)
}
