//! Pattern matching flags.

use serde::{Deserialize, Serialize};

/// The five matching options a pattern can request.
///
/// JSON uses camelCase keys and omits nothing; missing keys deserialize as
/// `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(rename = "ignoreCase", default)]
    pub ignore_case: bool,
    #[serde(default)]
    pub multiline: bool,
    #[serde(rename = "dotAll", default)]
    pub dot_all: bool,
    #[serde(default)]
    pub unicode: bool,
    #[serde(default)]
    pub extended: bool,
}

impl Flags {
    /// Enabled flag letters in the fixed `i`, `m`, `s`, `u`, `x` order.
    pub fn letters(&self) -> String {
        let mut out = String::new();
        if self.ignore_case {
            out.push('i');
        }
        if self.multiline {
            out.push('m');
        }
        if self.dot_all {
            out.push('s');
        }
        if self.unicode {
            out.push('u');
        }
        if self.extended {
            out.push('x');
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        *self == Flags::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_follow_fixed_order() {
        let flags = Flags {
            extended: true,
            ignore_case: true,
            dot_all: true,
            ..Flags::default()
        };
        assert_eq!(flags.letters(), "isx");
        assert_eq!(Flags::default().letters(), "");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let flags: Flags = serde_json::from_str(r#"{"ignoreCase":true}"#).unwrap();
        assert!(flags.ignore_case);
        assert!(!flags.multiline);
        assert!(!flags.extended);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let flags = Flags {
            dot_all: true,
            ..Flags::default()
        };
        let json = serde_json::to_string(&flags).unwrap();
        assert!(json.contains("dotAll"));
        assert!(json.contains("ignoreCase"));
    }
}
