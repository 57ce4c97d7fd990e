use crate::test_utils::err_of;
use crate::shot_err;

#[test]
fn incomplete_brace_quantifier() {
    shot_err!("a{1", @"Incomplete quantifier at position 3");
    shot_err!("a{1,", @"Incomplete quantifier at position 4");
    shot_err!("a{1,2", @"Incomplete quantifier at position 5");
    shot_err!("a{1x}", @"Incomplete quantifier at position 3");
}

#[test]
fn inverted_brace_quantifier_range() {
    shot_err!("a{5,2}", @"Invalid quantifier range at position 1");
}

#[test]
fn dangling_quantifiers() {
    shot_err!("*a", @"Dangling quantifier '*' at position 0");
    shot_err!("a|+b", @"Dangling quantifier '+' at position 2");
    shot_err!("{3}a", @"Dangling quantifier '{' at position 0");
}

#[test]
fn unterminated_delimiters() {
    shot_err!("(a", @"Unterminated group at position 2");
    shot_err!("[ab", @"Unterminated character class at position 3");
    shot_err!("(?=a", @"Unterminated lookahead at position 4");
    shot_err!("(?<!a", @"Unterminated lookbehind at position 5");
    shot_err!("(?>a", @"Unterminated atomic group at position 4");
    shot_err!("(?<name", @"Unterminated group name at position 7");
}

#[test]
fn stray_close_paren() {
    shot_err!("a)", @"Unexpected token at position 1");
}

#[test]
fn inline_modifiers_are_rejected() {
    shot_err!("(?i)a", @"Inline modifiers `(?imsx)` are not supported at position 1");
}

#[test]
fn malformed_named_backref() {
    shot_err!("\\ka", @"Expected '<' after \\k at position 2");
    shot_err!("\\k<x", @"Unterminated named backref at position 4");
    shot_err!("\\k<1a>", @"Invalid backreference name at position 3");
    shot_err!("\\k<>", @"Invalid backreference name at position 3");
}

#[test]
fn invalid_name_positions_point_at_the_name() {
    // Backref and group name errors both point at the start of the name.
    let backref = err_of("ab\\k<1a>");
    assert_eq!(backref.pos, 5);
    let group = err_of("ab(?<1a>c)");
    assert_eq!(group.pos, 5);
}

#[test]
fn invalid_group_name() {
    shot_err!("(?<1a>b)", @"Invalid group name at position 3");
    shot_err!("(?<>b)", @"Invalid group name at position 3");
}

#[test]
fn malformed_hex_and_unicode_escapes() {
    shot_err!("\\x4g", @"Invalid \\xHH escape at position 3");
    shot_err!("\\uDEAD", @"Invalid \\uHHHH at position 6");
    shot_err!("\\u004", @"Invalid \\uHHHH at position 5");
    shot_err!("\\x{110000}", @"Invalid \\x{...} escape at position 3");
    shot_err!("\\x{41", @"Unterminated \\x{...} at position 5");
    shot_err!("\\u{41", @"Unterminated \\u{...} at position 5");
}

#[test]
fn malformed_unicode_property() {
    shot_err!("\\pL", @"Expected { after \\p/\\P at position 2");
    shot_err!("\\p{L", @"Unterminated \\p{...} at position 4");
}

#[test]
fn trailing_backslash() {
    shot_err!("ab\\", @"Incomplete escape sequence at position 2");
}

#[test]
fn unrecognized_flag_points_at_the_letter() {
    shot_err!("%flags q\nab", @"Unrecognized flag 'q' at position 7");
    shot_err!("%flags i,q\nab", @"Unrecognized flag 'q' at position 9");
}

#[test]
fn error_positions_include_directive_offset() {
    // "%flags i\n" is 9 characters, so the bad brace tail sits at 9 + 3.
    shot_err!("%flags i\na{1", @"Incomplete quantifier at position 12");
}

#[test]
fn first_error_wins() {
    shot_err!("a{1b{2", @"Incomplete quantifier at position 3");
}

#[test]
fn errors_carry_hints_and_text() {
    let err = err_of("(a");
    assert_eq!(err.text.as_deref(), Some("(a"));
    let hint = err.hint.expect("unterminated group should carry a hint");
    assert!(hint.contains("Add a matching ')'"));

    let err = err_of("a)");
    let hint = err.hint.expect("stray paren should carry a hint");
    assert!(hint.contains("matching opening '('"));
}

#[test]
fn deep_nesting_fails_with_a_positioned_error() {
    let depth = 300;
    let mut pattern = String::new();
    for _ in 0..depth {
        pattern.push('(');
    }
    pattern.push('a');
    for _ in 0..depth {
        pattern.push(')');
    }
    let err = err_of(&pattern);
    assert_eq!(err.message, "Pattern nested too deeply");
}
