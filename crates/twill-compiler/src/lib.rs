//! Twill compiler: directive scanner, parser, lowering, and PCRE2 emitter.
//!
//! This crate provides the compilation pipeline for Twill patterns:
//! - `directives` - leading `%flags` / `%lang` / `%engine` lines
//! - `parser` - recursive-descent pattern parser producing the AST
//! - `compile` - lowering from AST to canonical IR
//! - `emit` - PCRE2 string generation
//! - `diagnostics` - error reporting with source snippets and hints
//!
//! The pipeline stops at the first error; every error carries the character
//! offset into the full original input, the input text, and an instructional
//! hint when one is known.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod diagnostics;
pub mod directives;
pub mod emit;
pub mod hints;
pub mod parser;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod diagnostics_tests;

use twill_core::{Flags, Ir, Node};

pub use diagnostics::ParseError;
pub use directives::Directives;
pub use emit::EmitError;

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Output of [`parse`]: the AST plus everything the directive block declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub ast: Node,
    pub flags: Flags,
    pub directives: Directives,
}

/// Output of [`compile`]: the canonical IR plus the declared flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub ir: Ir,
    pub flags: Flags,
    pub directives: Directives,
}

/// Parse a pattern (directive block included) into an AST.
pub fn parse(text: &str) -> Result<Parsed> {
    let scan = directives::scan(text)?;
    let ast = parser::parse_body(text, &scan)?;
    Ok(Parsed {
        ast,
        flags: scan.flags,
        directives: scan.directives,
    })
}

/// Parse a pattern and lower it to the canonical IR.
pub fn compile(text: &str) -> Result<Compiled> {
    let parsed = parse(text)?;
    Ok(Compiled {
        ir: compile::lower(&parsed.ast),
        flags: parsed.flags,
        directives: parsed.directives,
    })
}

/// Compile a pattern all the way to a PCRE2 pattern string.
pub fn compile_to_pcre2(text: &str) -> Result<String> {
    let compiled = compile(text)?;
    Ok(emit::pcre2(&compiled.ir, &compiled.flags)?)
}
