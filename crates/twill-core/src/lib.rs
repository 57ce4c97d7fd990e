#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the Twill pattern language.
//!
//! Two layers:
//! - **AST** (`ast::Node`): faithful shape of the source text, produced by the parser
//!   or deserialized from JSON
//! - **IR** (`ir::Ir`): canonical form consumed by emitters, produced by lowering
//!
//! Both layers round-trip through JSON with stable tag fields (`"type"` for the
//! AST, `"ir"` for the IR), so trees can be exchanged across language bindings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod ast;
pub mod flags;
pub mod ir;

pub use ast::Node;
pub use flags::Flags;
pub use ir::Ir;

// ============================================================================
// Common Types
// ============================================================================

/// Upper bound of a quantifier.
///
/// Serializes as a plain integer when finite and as the string `"Inf"` when
/// unbounded, matching the JSON interchange form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Max {
    Finite(u32),
    Unbounded,
}

impl Max {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Max::Unbounded)
    }
}

impl Serialize for Max {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Max::Finite(n) => serializer.serialize_u32(*n),
            Max::Unbounded => serializer.serialize_str("Inf"),
        }
    }
}

impl<'de> Deserialize<'de> for Max {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Finite(u32),
            Sentinel(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Finite(n) => Ok(Max::Finite(n)),
            Repr::Sentinel(s) if s == "Inf" => Ok(Max::Unbounded),
            Repr::Sentinel(s) => Err(D::Error::custom(format!(
                "invalid quantifier max: expected integer or \"Inf\", got \"{s}\""
            ))),
        }
    }
}
