use twill_core::ast::{AnchorKind, ClassMember, Direction, EscapeKind};
use twill_core::ir::{Dir, EscType, Ir, IrAnchor, IrClassItem, Mode};
use twill_core::{Max, Node};

use super::lower;

fn lit(s: &str) -> Node {
    Node::lit(s)
}

#[test]
fn quantifier_modes_collapse() {
    let quant = |lazy, possessive| Node::Quant {
        target: Box::new(lit("a")),
        min: 0,
        max: Max::Unbounded,
        lazy,
        possessive,
    };
    let mode_of = |node: &Node| match lower(node) {
        Ir::Quant { mode, .. } => mode,
        other => panic!("expected quant, got {other:?}"),
    };
    assert_eq!(mode_of(&quant(false, false)), Mode::Greedy);
    assert_eq!(mode_of(&quant(true, false)), Mode::Lazy);
    assert_eq!(mode_of(&quant(false, true)), Mode::Possessive);
}

#[test]
fn adjacent_literals_merge() {
    let seq = Node::seq(vec![lit("a"), lit("b"), lit("c")]);
    assert_eq!(lower(&seq), Ir::lit("abc"));
}

#[test]
fn literal_merge_is_equivalent_to_preconcatenation() {
    let pieces = Node::seq(vec![lit("st"), lit("r"), lit(""), lit("ing")]);
    let whole = lit("string");
    assert_eq!(lower(&pieces), lower(&whole));
}

#[test]
fn nested_sequences_flatten_before_merging() {
    let seq = Node::seq(vec![
        Node::seq(vec![lit("a"), lit("b")]),
        lit("c"),
        Node::seq(vec![Node::Dot, lit("d")]),
    ]);
    assert_eq!(
        lower(&seq),
        Ir::Seq {
            parts: vec![Ir::lit("abc"), Ir::Dot, Ir::lit("d")],
        }
    );
}

#[test]
fn singleton_sequence_collapses() {
    let seq = Node::seq(vec![Node::Dot]);
    assert_eq!(lower(&seq), Ir::Dot);
}

#[test]
fn literals_never_merge_across_alternation_branches() {
    let alt = Node::Alt {
        alternatives: vec![lit("a"), lit("b")],
    };
    assert_eq!(
        lower(&alt),
        Ir::Alt {
            branches: vec![Ir::lit("a"), Ir::lit("b")],
        }
    );
}

#[test]
fn nested_alternations_flatten() {
    let alt = Node::Alt {
        alternatives: vec![
            Node::Alt {
                alternatives: vec![lit("a"), lit("b")],
            },
            lit("c"),
        ],
    };
    assert_eq!(
        lower(&alt),
        Ir::Alt {
            branches: vec![Ir::lit("a"), Ir::lit("b"), Ir::lit("c")],
        }
    );
}

#[test]
fn anchor_alias_resolves_to_canonical_name() {
    let aliased = Node::Anchor {
        at: AnchorKind::NonWordBoundary,
    };
    let canonical = Node::Anchor {
        at: AnchorKind::NotWordBoundary,
    };
    assert_eq!(
        lower(&aliased),
        Ir::Anchor {
            at: IrAnchor::NotWordBoundary
        }
    );
    assert_eq!(lower(&aliased), lower(&canonical));
}

#[test]
fn shorthand_escape_becomes_single_member_class() {
    let escape = Node::Escape {
        kind: EscapeKind::NotSpace,
        value: None,
    };
    assert_eq!(
        lower(&escape),
        Ir::CharClass {
            negated: false,
            items: vec![IrClassItem::Esc {
                kind: EscType::NotSpace,
                property: None,
            }],
        }
    );
}

#[test]
fn resolved_character_escapes_merge_into_literal_runs() {
    let seq = Node::seq(vec![
        lit("a"),
        Node::Escape {
            kind: EscapeKind::ControlChar,
            value: Some('\n'),
        },
        lit("b"),
    ]);
    assert_eq!(lower(&seq), Ir::lit("a\nb"));
}

#[test]
fn class_members_map_onto_ir_items() {
    let class = Node::CharClass {
        negated: true,
        members: vec![
            ClassMember::Range { from: '0', to: '9' },
            ClassMember::Literal { ch: '-' },
            ClassMember::UnicodeProperty {
                name: "L".into(),
                negated: true,
            },
        ],
    };
    assert_eq!(
        lower(&class),
        Ir::CharClass {
            negated: true,
            items: vec![
                IrClassItem::Range { from: '0', to: '9' },
                IrClassItem::Char { ch: '-' },
                IrClassItem::Esc {
                    kind: EscType::NotProperty,
                    property: Some("L".into()),
                },
            ],
        }
    );
}

#[test]
fn lookaround_and_backref_pass_through() {
    let look = Node::Lookaround {
        direction: Direction::Behind,
        negated: true,
        body: Box::new(lit("a")),
    };
    assert_eq!(
        lower(&look),
        Ir::Look {
            dir: Dir::Behind,
            neg: true,
            body: Box::new(Ir::lit("a")),
        }
    );

    let backref = Node::BackReference {
        index: None,
        name: Some("year".into()),
    };
    assert_eq!(
        lower(&backref),
        Ir::Backref {
            by_index: None,
            by_name: Some("year".into()),
        }
    );
}

#[test]
fn lowering_is_deterministic() {
    let node = Node::seq(vec![
        Node::Anchor {
            at: AnchorKind::Start,
        },
        Node::Quant {
            target: Box::new(lit("a")),
            min: 1,
            max: Max::Finite(3),
            lazy: true,
            possessive: false,
        },
        lit("b"),
        lit("c"),
    ]);
    assert_eq!(lower(&node), lower(&node));
}
