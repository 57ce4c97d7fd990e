//! Test utilities and snapshot macros.

use twill_core::Node;

use crate::{Error, ParseError};

/// Parse a pattern that must be valid, returning its AST.
pub fn ast_of(pattern: &str) -> Node {
    match crate::parse(pattern) {
        Ok(parsed) => parsed.ast,
        Err(err) => panic!("pattern {pattern:?} should parse: {err}"),
    }
}

/// Parse a pattern that must be invalid, returning the error.
pub fn err_of(pattern: &str) -> ParseError {
    match crate::parse(pattern) {
        Err(Error::Parse(err)) => err,
        Ok(parsed) => panic!("pattern {pattern:?} should fail, got {:?}", parsed.ast),
        Err(other) => panic!("pattern {pattern:?} failed oddly: {other}"),
    }
}

/// Snapshot test for emitted PCRE2 output.
#[macro_export]
macro_rules! shot_pcre {
    ($pattern:literal, @$expected:literal) => {{
        let output = $crate::compile_to_pcre2($pattern).expect("pattern should compile");
        insta::with_settings!({ omit_expression => true }, {
            insta::assert_snapshot!(output, @$expected);
        });
    }};
}

/// Snapshot test for a parse error's message and position.
#[macro_export]
macro_rules! shot_err {
    ($pattern:literal, @$expected:literal) => {{
        let err = $crate::test_utils::err_of($pattern);
        insta::with_settings!({ omit_expression => true }, {
            insta::assert_snapshot!(err.to_string(), @$expected);
        });
    }};
}
