//! Canonical intermediate representation.
//!
//! The IR is what emitters consume: adjacent literals are merged, singleton
//! sequences and alternations are collapsed, quantifier modes are explicit,
//! and anchors carry only canonical names. JSON uses an `"ir"` tag per node,
//! which is the interchange form shared across bindings.

use serde::{Deserialize, Serialize};

use crate::Max;

/// One IR node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ir")]
pub enum Ir {
    /// Literal text, maximally merged.
    Lit { value: String },
    /// Concatenation with two or more parts (or zero for the empty pattern).
    Seq { parts: Vec<Ir> },
    /// Alternation with two or more branches.
    Alt { branches: Vec<Ir> },
    /// Any character except newline.
    Dot,
    /// Zero-width position assertion, canonical names only.
    Anchor { at: IrAnchor },
    /// Character class.
    CharClass {
        negated: bool,
        items: Vec<IrClassItem>,
    },
    /// Repetition with an explicit mode.
    Quant {
        child: Box<Ir>,
        min: u32,
        max: Max,
        mode: Mode,
    },
    /// Group.
    Group {
        capturing: bool,
        body: Box<Ir>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        atomic: bool,
    },
    /// Backreference; exactly one of the two keys is expected.
    Backref {
        #[serde(rename = "byIndex", default, skip_serializing_if = "Option::is_none")]
        by_index: Option<u32>,
        #[serde(rename = "byName", default, skip_serializing_if = "Option::is_none")]
        by_name: Option<String>,
    },
    /// Lookaround assertion.
    Look { dir: Dir, neg: bool, body: Box<Ir> },
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Item inside an IR character class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ir")]
pub enum IrClassItem {
    /// Inclusive range.
    Range { from: char, to: char },
    /// Single character.
    Char {
        #[serde(rename = "char")]
        ch: char,
    },
    /// Class escape; `property` is set for `p`/`P` kinds.
    Esc {
        #[serde(rename = "type")]
        kind: EscType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        property: Option<String>,
    },
}

/// Escape letter of an [`IrClassItem::Esc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscType {
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
    #[serde(rename = "p")]
    Property,
    #[serde(rename = "P")]
    NotProperty,
}

/// Canonical anchor names; the AST alias is resolved before this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrAnchor {
    Start,
    End,
    WordBoundary,
    NotWordBoundary,
    AbsoluteStart,
    EndBeforeFinalNewline,
    AbsoluteEnd,
}

/// Quantifier matching mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Greedy,
    Lazy,
    Possessive,
}

/// Lookaround direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dir {
    Ahead,
    Behind,
}

impl Ir {
    /// Literal node from anything stringly.
    pub fn lit(value: impl Into<String>) -> Self {
        Ir::Lit {
            value: value.into(),
        }
    }
}

/// Parse a JSON-encoded IR tree.
pub fn from_json(json: &str) -> Result<Ir, serde_json::Error> {
    serde_json::from_str(json)
}

/// Encode an IR tree as compact JSON.
pub fn to_json(ir: &Ir) -> Result<String, serde_json::Error> {
    serde_json::to_string(ir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_round_trips_with_ir_tag() {
        let node = Ir::lit("ab");
        let json = to_json(&node).unwrap();
        assert_eq!(json, r#"{"ir":"Lit","value":"ab"}"#);
        assert_eq!(from_json(&json).unwrap(), node);
    }

    #[test]
    fn quant_serializes_inf_sentinel() {
        let node = Ir::Quant {
            child: Box::new(Ir::lit("a")),
            min: 1,
            max: Max::Unbounded,
            mode: Mode::Lazy,
        };
        let json = to_json(&node).unwrap();
        assert!(json.contains(r#""max":"Inf""#));
        assert!(json.contains(r#""mode":"Lazy""#));
        assert_eq!(from_json(&json).unwrap(), node);
    }

    #[test]
    fn backref_uses_camel_case_keys() {
        let node = Ir::Backref {
            by_index: None,
            by_name: Some("x".into()),
        };
        let json = to_json(&node).unwrap();
        assert_eq!(json, r#"{"ir":"Backref","byName":"x"}"#);
    }

    #[test]
    fn group_omits_false_atomic() {
        let plain = Ir::Group {
            capturing: true,
            body: Box::new(Ir::lit("a")),
            name: None,
            atomic: false,
        };
        assert!(!to_json(&plain).unwrap().contains("atomic"));

        let atomic = Ir::Group {
            capturing: false,
            body: Box::new(Ir::lit("a")),
            name: None,
            atomic: true,
        };
        assert!(to_json(&atomic).unwrap().contains(r#""atomic":true"#));
    }

    #[test]
    fn class_items_round_trip() {
        let class = Ir::CharClass {
            negated: true,
            items: vec![
                IrClassItem::Range { from: 'a', to: 'z' },
                IrClassItem::Char { ch: '-' },
                IrClassItem::Esc {
                    kind: EscType::Property,
                    property: Some("L".into()),
                },
            ],
        };
        let json = to_json(&class).unwrap();
        assert!(json.contains(r#"{"ir":"Esc","type":"p","property":"L"}"#));
        assert_eq!(from_json(&json).unwrap(), class);
    }
}
