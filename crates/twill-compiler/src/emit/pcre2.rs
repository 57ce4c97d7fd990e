//! The PCRE2 emitter.
//!
//! Walks the IR and renders PCRE2 syntax:
//! - metacharacters in literals and classes are escaped
//! - quantifiers pick the shortest shorthand, then the mode suffix
//! - quantified multi-part children get a non-capturing wrapper to keep
//!   precedence; alternations with two or more branches are always wrapped
//! - enabled flags become a single `(?imsux)` prefix in fixed order
//!
//! The only failure is a backreference carrying neither index nor name,
//! which indicates a malformed IR rather than bad user input.

use twill_core::ir::{Dir, EscType, Ir, IrAnchor, IrClassItem, Mode};
use twill_core::{Flags, Max};

/// Contract violation surfaced by the emitter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("backreference has neither index nor name")]
    EmptyBackref,
}

/// Emit a PCRE2 pattern string from IR, with a flag prefix when any flag is
/// set.
pub fn pcre2(ir: &Ir, flags: &Flags) -> Result<String, EmitError> {
    let mut out = String::new();
    let letters = flags.letters();
    if !letters.is_empty() {
        out.push_str("(?");
        out.push_str(&letters);
        out.push(')');
    }
    emit_node(ir, &mut out)?;
    Ok(out)
}

fn emit_node(ir: &Ir, out: &mut String) -> Result<(), EmitError> {
    match ir {
        Ir::Lit { value } => {
            push_escaped_literal(value, out);
            Ok(())
        }
        Ir::Dot => {
            out.push('.');
            Ok(())
        }
        Ir::Anchor { at } => {
            out.push_str(anchor_text(*at));
            Ok(())
        }
        Ir::Backref { by_index, by_name } => {
            if let Some(name) = by_name {
                out.push_str("\\k<");
                out.push_str(name);
                out.push('>');
                Ok(())
            } else if let Some(index) = by_index {
                out.push('\\');
                out.push_str(&index.to_string());
                Ok(())
            } else {
                Err(EmitError::EmptyBackref)
            }
        }
        Ir::CharClass { negated, items } => {
            emit_class(*negated, items, out);
            Ok(())
        }
        Ir::Seq { parts } => {
            for part in parts {
                emit_node(part, out)?;
            }
            Ok(())
        }
        Ir::Alt { branches } => {
            if let [only] = branches.as_slice() {
                return emit_node(only, out);
            }
            out.push_str("(?:");
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                emit_node(branch, out)?;
            }
            out.push(')');
            Ok(())
        }
        Ir::Quant {
            child,
            min,
            max,
            mode,
        } => {
            if needs_group_for_quant(child) {
                out.push_str("(?:");
                emit_node(child, out)?;
                out.push(')');
            } else {
                emit_node(child, out)?;
            }
            push_quant_suffix(*min, *max, *mode, out);
            Ok(())
        }
        Ir::Group {
            capturing,
            body,
            name,
            atomic,
        } => {
            if *atomic {
                out.push_str("(?>");
            } else if !capturing {
                out.push_str("(?:");
            } else if let Some(name) = name {
                out.push_str("(?<");
                out.push_str(name);
                out.push('>');
            } else {
                out.push('(');
            }
            emit_node(body, out)?;
            out.push(')');
            Ok(())
        }
        Ir::Look { dir, neg, body } => {
            out.push_str(match (dir, neg) {
                (Dir::Ahead, false) => "(?=",
                (Dir::Ahead, true) => "(?!",
                (Dir::Behind, false) => "(?<=",
                (Dir::Behind, true) => "(?<!",
            });
            emit_node(body, out)?;
            out.push(')');
            Ok(())
        }
    }
}

/// Whether a quantified child needs a non-capturing wrapper to bind the
/// quantifier to the whole child.
///
/// Single atoms (classes, dots, groups, backrefs, anchors, one-char
/// literals) bind on their own. Alternations with two or more branches wrap
/// themselves, so they never need another layer; singletons defer to their
/// only element.
fn needs_group_for_quant(child: &Ir) -> bool {
    match child {
        Ir::CharClass { .. }
        | Ir::Dot
        | Ir::Group { .. }
        | Ir::Backref { .. }
        | Ir::Anchor { .. }
        | Ir::Quant { .. } => false,
        Ir::Lit { value } => value.chars().count() > 1,
        Ir::Seq { parts } => match parts.as_slice() {
            [only] => needs_group_for_quant(only),
            _ => true,
        },
        Ir::Alt { branches } => match branches.as_slice() {
            [only] => needs_group_for_quant(only),
            _ => false,
        },
        Ir::Look { .. } => true,
    }
}

/// Shorthand selection in priority order, then the mode suffix.
fn push_quant_suffix(min: u32, max: Max, mode: Mode, out: &mut String) {
    match (min, max) {
        (0, Max::Unbounded) => out.push('*'),
        (1, Max::Unbounded) => out.push('+'),
        (0, Max::Finite(1)) => out.push('?'),
        (m, Max::Unbounded) => {
            out.push('{');
            out.push_str(&m.to_string());
            out.push_str(",}");
        }
        (m, Max::Finite(n)) if m == n => {
            out.push('{');
            out.push_str(&m.to_string());
            out.push('}');
        }
        (m, Max::Finite(n)) => {
            out.push('{');
            out.push_str(&m.to_string());
            out.push(',');
            out.push_str(&n.to_string());
            out.push('}');
        }
    }
    match mode {
        Mode::Greedy => {}
        Mode::Lazy => out.push('?'),
        Mode::Possessive => out.push('+'),
    }
}

/// A class of exactly one shorthand escape prefers the bare shorthand, with
/// negation flipping the letter case (`[^\d]` is `\D`). Everything else
/// renders as a bracket class.
fn emit_class(negated: bool, items: &[IrClassItem], out: &mut String) {
    if let [IrClassItem::Esc { kind, property }] = items {
        match kind {
            EscType::Digit
            | EscType::Word
            | EscType::Space
            | EscType::NotDigit
            | EscType::NotWord
            | EscType::NotSpace => {
                out.push('\\');
                out.push(shorthand_letter(*kind, negated));
                return;
            }
            EscType::Property | EscType::NotProperty => {
                if let Some(property) = property {
                    let positive = matches!(kind, EscType::Property);
                    out.push('\\');
                    out.push(if negated != positive { 'p' } else { 'P' });
                    out.push('{');
                    out.push_str(property);
                    out.push('}');
                    return;
                }
            }
        }
    }

    out.push('[');
    if negated {
        out.push('^');
    }
    for item in items {
        match item {
            IrClassItem::Char { ch } => push_escaped_class_char(*ch, out),
            IrClassItem::Range { from, to } => {
                push_escaped_class_char(*from, out);
                out.push('-');
                push_escaped_class_char(*to, out);
            }
            IrClassItem::Esc { kind, property } => {
                out.push('\\');
                out.push(esc_letter(*kind));
                if let Some(property) = property {
                    out.push('{');
                    out.push_str(property);
                    out.push('}');
                }
            }
        }
    }
    out.push(']');
}

/// Shorthand letter for a single-escape class, case-flipped when the class
/// is negated.
fn shorthand_letter(kind: EscType, negated: bool) -> char {
    let letter = esc_letter(kind);
    if negated {
        if letter.is_ascii_lowercase() {
            letter.to_ascii_uppercase()
        } else {
            letter.to_ascii_lowercase()
        }
    } else {
        letter
    }
}

fn esc_letter(kind: EscType) -> char {
    match kind {
        EscType::Digit => 'd',
        EscType::NotDigit => 'D',
        EscType::Word => 'w',
        EscType::NotWord => 'W',
        EscType::Space => 's',
        EscType::NotSpace => 'S',
        EscType::Property => 'p',
        EscType::NotProperty => 'P',
    }
}

fn anchor_text(at: IrAnchor) -> &'static str {
    match at {
        IrAnchor::Start => "^",
        IrAnchor::End => "$",
        IrAnchor::WordBoundary => "\\b",
        IrAnchor::NotWordBoundary => "\\B",
        IrAnchor::AbsoluteStart => "\\A",
        IrAnchor::EndBeforeFinalNewline => "\\Z",
        IrAnchor::AbsoluteEnd => "\\z",
    }
}

const LITERAL_METACHARS: &str = ".^$|()?*+{}[]\\";

fn push_escaped_literal(value: &str, out: &mut String) {
    for c in value.chars() {
        if LITERAL_METACHARS.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

fn push_escaped_class_char(c: char, out: &mut String) {
    if matches!(c, ']' | '\\' | '-' | '^') {
        out.push('\\');
    }
    out.push(c);
}
