//! Recursive-descent pattern parser.
//!
//! Converts body text plus flags into an AST, or fails with the first error
//! encountered. Positions are character offsets into the full original input,
//! directive block included. This module handles:
//! - Cursor state and trivia skipping (`core`)
//! - Grammar productions for atoms, quantifiers, groups, classes (`grammar`)

mod core;
mod grammar;

#[cfg(test)]
mod errors_tests;

use twill_core::Node;

use crate::directives::Scan;
use crate::ParseError;

pub(crate) use self::core::Parser;

/// Parse the pattern body located by `scan` out of the full input `text`.
pub fn parse_body(text: &str, scan: &Scan) -> Result<Node, ParseError> {
    let mut parser = Parser::new(text, scan);
    parser.parse_pattern()
}
