//! Instructional hints for parse errors.
//!
//! Maps error messages to beginner-friendly suggestions. Matching is by
//! substring, so more specific patterns must come before more general ones
//! ("Unterminated group name" before "Unterminated group").

/// Hint for the given error, or `None` when the message is not recognized.
///
/// `text` and `pos` give the full input and the error offset, used by the
/// few hints that inspect the offending character.
pub fn hint_for(message: &str, text: &str, pos: usize) -> Option<String> {
    if message.contains("Unterminated group name") {
        return Some(
            "Named groups use the syntax (?<name>...). \
             Make sure to close the '<name>' with '>' before the group content."
                .into(),
        );
    }
    if message.contains("Unterminated named backref") {
        return Some(
            "Named backreferences use the syntax \\k<name>. \
             Make sure to close the '<name>' with '>'."
                .into(),
        );
    }
    if message.contains("Unterminated group") {
        return Some(
            "This group was opened with '(' but never closed. \
             Add a matching ')' to close the group."
                .into(),
        );
    }
    if message.contains("Unterminated character class") {
        return Some(
            "This character class was opened with '[' but never closed. \
             Add a matching ']' to close the character class."
                .into(),
        );
    }
    if message.contains("Unterminated lookahead") {
        return Some(
            "This lookahead was opened with '(?=' or '(?!' but never closed. \
             Add a matching ')' to close the lookahead."
                .into(),
        );
    }
    if message.contains("Unterminated lookbehind") {
        return Some(
            "This lookbehind was opened with '(?<=' or '(?<!' but never closed. \
             Add a matching ')' to close the lookbehind."
                .into(),
        );
    }
    if message.contains("Unterminated atomic group") {
        return Some(
            "This atomic group was opened with '(?>' but never closed. \
             Add a matching ')' to close the atomic group."
                .into(),
        );
    }
    if message.contains("Invalid quantifier range") {
        return Some(
            "Quantifier range {m,n} must have m <= n. \
             Check that the minimum value is not greater than the maximum value."
                .into(),
        );
    }
    if message.contains("Incomplete quantifier") {
        return Some(
            "Brace quantifiers use the syntax {m,n} or {n}. \
             Make sure to close the quantifier with '}'."
                .into(),
        );
    }
    if message.contains("Dangling quantifier") {
        let quant = quoted_char(message).unwrap_or('*');
        return Some(format!(
            "The quantifier '{quant}' cannot be at the start of a pattern or group. \
             It must follow a character or group it can quantify."
        ));
    }
    if message.contains("Unrecognized flag") {
        return Some(
            "Unknown flag. Valid flags are: i (case-insensitive), m (multiline), \
             s (dotAll), u (unicode), x (extended/free-spacing)."
                .into(),
        );
    }
    if message.contains("Unexpected token") {
        if text.chars().nth(pos) == Some(')') {
            return Some(
                "This ')' character does not have a matching opening '('. \
                 Did you mean to escape it with '\\)'?"
                    .into(),
            );
        }
        return Some("This character appeared in an unexpected context.".into());
    }
    if message.contains("Unexpected trailing input") {
        return Some(
            "There is unexpected content after the pattern ended. \
             Check for unmatched parentheses or extra characters."
                .into(),
        );
    }
    if message.contains("Invalid group name") {
        return Some(
            "Group names must start with a letter or underscore, followed by \
             letters, digits, or underscores. Use (?<name>...) with a valid identifier."
                .into(),
        );
    }
    if message.contains("Invalid backreference name") {
        return Some(
            "Backreference names must match the name of a capturing group: \
             a letter or underscore followed by letters, digits, or underscores."
                .into(),
        );
    }
    if message.contains("Expected '<' after \\k") {
        return Some(
            "Named backreferences use the syntax \\k<name>. \
             The '<' is required after \\k, like \\k<groupname>."
                .into(),
        );
    }
    if message.contains("Inline modifiers") {
        return Some(
            "Inline modifiers like (?i) are not supported. \
             Instead, use the %flags directive at the start of your pattern: '%flags i'"
                .into(),
        );
    }
    if message.contains("Unterminated \\x{...}") {
        return Some(
            "Variable-length hex escapes use the syntax \\x{...}. \
             Make sure to close the escape with '}'."
                .into(),
        );
    }
    if message.contains("Unterminated \\u{...}") {
        return Some(
            "Variable-length unicode escapes use the syntax \\u{...}. \
             Make sure to close the escape with '}'."
                .into(),
        );
    }
    if message.contains("Unterminated \\p{...}") {
        return Some(
            "Unicode property escapes use the syntax \\p{Property} or \\P{Property}. \
             Make sure to close the property name with '}'."
                .into(),
        );
    }
    if message.contains("Expected { after \\p/\\P") {
        return Some(
            "Unicode property escapes require braces: \\p{Letter} or \\P{Letter}. \
             Use \\p{L} for letters, \\p{N} for numbers, etc."
                .into(),
        );
    }
    if message.contains("Invalid \\x") {
        return Some(
            "Hex escapes must use valid hexadecimal digits (0-9, A-F). \
             Use \\xHH for 2-digit hex codes (e.g., \\x41 for 'A')."
                .into(),
        );
    }
    if message.contains("Invalid \\u") || message.contains("Invalid \\U") {
        return Some(
            "Unicode escapes must use valid hexadecimal digits (0-9, A-F). \
             Use \\uHHHH for 4-digit codes or \\u{...} for variable-length codes."
                .into(),
        );
    }
    if message.contains("Pattern nested too deeply") {
        return Some(
            "Groups and lookarounds are nested past the supported depth. \
             Flatten the pattern or split it into smaller pieces."
                .into(),
        );
    }
    None
}

/// First single-quoted character in the message, if any.
fn quoted_char(message: &str) -> Option<char> {
    let start = message.find('\'')?;
    let mut chars = message[start + 1..].chars();
    let ch = chars.next()?;
    (chars.next() == Some('\'')).then_some(ch)
}
