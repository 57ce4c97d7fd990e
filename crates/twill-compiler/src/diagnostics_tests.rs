use crate::test_utils::err_of;
use crate::ParseError;

#[test]
fn display_is_message_and_position() {
    let err = ParseError::new("Unterminated group", 2, "(a");
    assert_eq!(err.to_string(), "Unterminated group at position 2");
}

#[test]
fn render_includes_snippet_and_caret() {
    let err = err_of("(a");
    let rendered = err.printer().render();
    assert!(rendered.contains("Unterminated group"));
    assert!(rendered.contains("(a"));
    assert!(rendered.contains("^"));
}

#[test]
fn render_includes_hint_as_help() {
    let err = err_of("(a");
    let rendered = err.printer().render();
    assert!(rendered.contains("Add a matching ')' to close the group."));
}

#[test]
fn render_with_path_names_the_source() {
    let err = err_of("a{1");
    let rendered = err.printer().path("pattern.twill").render();
    assert!(rendered.contains("pattern.twill"));
}

#[test]
fn colored_render_uses_ansi_codes() {
    let err = err_of("a{1");
    let rendered = err.printer().colored(true).render();
    assert!(rendered.contains("\u{1b}["));
}

#[test]
fn render_without_text_falls_back_to_display() {
    let err = ParseError {
        message: "Unterminated group".into(),
        pos: 2,
        text: None,
        hint: None,
    };
    assert_eq!(err.printer().render(), "Unterminated group at position 2");
}

#[test]
fn render_at_end_of_input_stays_in_bounds() {
    let err = err_of("ab\\");
    let rendered = err.printer().render();
    assert!(rendered.contains("Incomplete escape sequence"));
}

#[test]
fn serializes_without_empty_fields() {
    let err = ParseError {
        message: "Unterminated group".into(),
        pos: 2,
        text: None,
        hint: None,
    };
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(json, r#"{"message":"Unterminated group","pos":2}"#);

    let err = err_of("(a");
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains(r#""text":"(a""#));
    assert!(json.contains(r#""hint":"#));
}
