//! The lowering pass.
//!
//! Pure and total: any AST lowers to exactly one IR tree, and lowering the
//! same tree twice gives identical output. Canonicalization rules:
//! - `lazy`/`possessive` booleans collapse into one `Mode`
//! - adjacent literals in a sequence merge; nested sequences and
//!   alternations flatten; singletons collapse to their only child
//! - the `NonWordBoundary` anchor alias folds to `NotWordBoundary`
//! - shorthand escapes become single-member character classes; resolved
//!   character escapes become literals

use twill_core::ast::{AnchorKind, ClassEscapeKind, ClassMember, Direction, EscapeKind};
use twill_core::ir::{Dir, EscType, Ir, IrAnchor, IrClassItem, Mode};
use twill_core::Node;

/// Lower one AST node to its canonical IR.
pub fn lower(node: &Node) -> Ir {
    match node {
        Node::Lit { value } => Ir::lit(value.clone()),
        Node::Seq { parts } => lower_seq(parts),
        Node::Alt { alternatives } => lower_alt(alternatives),
        Node::Dot => Ir::Dot,
        Node::Anchor { at } => Ir::Anchor { at: anchor(*at) },
        Node::Escape { kind, value } => lower_escape(*kind, *value),
        Node::CharClass { negated, members } => Ir::CharClass {
            negated: *negated,
            items: members.iter().map(class_item).collect(),
        },
        Node::Quant {
            target,
            min,
            max,
            lazy,
            possessive,
        } => Ir::Quant {
            child: Box::new(lower(target)),
            min: *min,
            max: *max,
            mode: if *lazy {
                Mode::Lazy
            } else if *possessive {
                Mode::Possessive
            } else {
                Mode::Greedy
            },
        },
        Node::Group {
            capturing,
            body,
            name,
            atomic,
        } => Ir::Group {
            capturing: *capturing,
            body: Box::new(lower(body)),
            name: name.clone(),
            atomic: *atomic,
        },
        Node::BackReference { index, name } => Ir::Backref {
            by_index: *index,
            by_name: name.clone(),
        },
        Node::Lookaround {
            direction,
            negated,
            body,
        } => Ir::Look {
            dir: match direction {
                Direction::Ahead => Dir::Ahead,
                Direction::Behind => Dir::Behind,
            },
            neg: *negated,
            body: Box::new(lower(body)),
        },
    }
}

/// Lower sequence parts: flatten nested sequences, merge adjacent literals,
/// collapse a single survivor.
fn lower_seq(parts: &[Node]) -> Ir {
    let mut flat = Vec::with_capacity(parts.len());
    for part in parts {
        match lower(part) {
            Ir::Seq { parts } => flat.extend(parts),
            other => flat.push(other),
        }
    }

    let mut merged: Vec<Ir> = Vec::with_capacity(flat.len());
    for item in flat {
        match (merged.last_mut(), item) {
            (Some(Ir::Lit { value: prev }), Ir::Lit { value }) => prev.push_str(&value),
            (_, item) => merged.push(item),
        }
    }

    if merged.len() == 1 {
        merged.pop().unwrap_or(Ir::Seq { parts: vec![] })
    } else {
        Ir::Seq { parts: merged }
    }
}

/// Lower alternation branches: flatten nested alternations, collapse a
/// single survivor. Literals never merge across branch boundaries.
fn lower_alt(alternatives: &[Node]) -> Ir {
    let mut branches = Vec::with_capacity(alternatives.len());
    for alternative in alternatives {
        match lower(alternative) {
            Ir::Alt { branches: nested } => branches.extend(nested),
            other => branches.push(other),
        }
    }

    if branches.len() == 1 {
        branches.pop().unwrap_or(Ir::Seq { parts: vec![] })
    } else {
        Ir::Alt { branches }
    }
}

fn lower_escape(kind: EscapeKind, value: Option<char>) -> Ir {
    let esc = |kind: EscType| Ir::CharClass {
        negated: false,
        items: vec![IrClassItem::Esc {
            kind,
            property: None,
        }],
    };
    match kind {
        EscapeKind::Digit => esc(EscType::Digit),
        EscapeKind::NotDigit => esc(EscType::NotDigit),
        EscapeKind::Word => esc(EscType::Word),
        EscapeKind::NotWord => esc(EscType::NotWord),
        EscapeKind::Space => esc(EscType::Space),
        EscapeKind::NotSpace => esc(EscType::NotSpace),
        // A resolved character escape is just that character; an absent
        // value lowers to the empty literal rather than failing.
        EscapeKind::ControlChar | EscapeKind::Hex | EscapeKind::UnicodeCodepoint => {
            Ir::lit(value.map(String::from).unwrap_or_default())
        }
    }
}

fn class_item(member: &ClassMember) -> IrClassItem {
    match member {
        ClassMember::Literal { ch } => IrClassItem::Char { ch: *ch },
        ClassMember::Range { from, to } => IrClassItem::Range {
            from: *from,
            to: *to,
        },
        ClassMember::UnicodeProperty { name, negated } => IrClassItem::Esc {
            kind: if *negated {
                EscType::NotProperty
            } else {
                EscType::Property
            },
            property: Some(name.clone()),
        },
        ClassMember::EscapeClass { kind } => IrClassItem::Esc {
            kind: match kind {
                ClassEscapeKind::Digit => EscType::Digit,
                ClassEscapeKind::NotDigit => EscType::NotDigit,
                ClassEscapeKind::Word => EscType::Word,
                ClassEscapeKind::NotWord => EscType::NotWord,
                ClassEscapeKind::Space => EscType::Space,
                ClassEscapeKind::NotSpace => EscType::NotSpace,
            },
            property: None,
        },
    }
}

fn anchor(at: AnchorKind) -> IrAnchor {
    match at {
        AnchorKind::Start => IrAnchor::Start,
        AnchorKind::End => IrAnchor::End,
        AnchorKind::WordBoundary => IrAnchor::WordBoundary,
        // Alias resolution happens here, once.
        AnchorKind::NotWordBoundary | AnchorKind::NonWordBoundary => IrAnchor::NotWordBoundary,
        AnchorKind::AbsoluteStart => IrAnchor::AbsoluteStart,
        AnchorKind::EndBeforeFinalNewline => IrAnchor::EndBeforeFinalNewline,
        AnchorKind::AbsoluteEnd => IrAnchor::AbsoluteEnd,
    }
}
