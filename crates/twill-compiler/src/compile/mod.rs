//! Lowering from AST to canonical IR.

mod lower;

#[cfg(test)]
mod lower_tests;

pub use lower::lower;
