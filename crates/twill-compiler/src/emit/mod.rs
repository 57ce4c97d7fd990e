//! PCRE2 string generation from IR.

mod pcre2;


pub use pcre2::{pcre2, EmitError};
