//! Leading directive block.
//!
//! Patterns may start with lines of the form `%directive value`:
//! - `%flags imsux` sets matching flags
//! - `%lang` / `%engine` are opaque hints carried through for tooling
//!
//! Blank lines and `#` comment lines before the body are skipped. Scanning
//! stops at the first line that does not start with `%`; everything from
//! there on is pattern body. Unknown `%` directives are consumed and
//! ignored, but an unrecognized flag letter is an error pointing at the
//! letter itself.

use serde::Serialize;
use twill_core::Flags;

use crate::ParseError;

/// Uninterpreted directive values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Directives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}

/// Result of scanning the directive block off the front of the input.
///
/// Offsets locate the pattern body inside the full input: `char_offset` in
/// characters (the unit of error positions) and `byte_offset` in bytes (for
/// slicing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub flags: Flags,
    pub directives: Directives,
    pub char_offset: usize,
    pub byte_offset: usize,
}

/// Scan the directive block. The only failure is an unrecognized flag letter.
pub fn scan(text: &str) -> Result<Scan, ParseError> {
    let mut flags = Flags::default();
    let mut directives = Directives::default();
    let mut char_offset = 0usize;
    let mut byte_offset = 0usize;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            char_offset += line.chars().count();
            byte_offset += line.len();
            continue;
        }
        if !trimmed.starts_with('%') {
            break;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        while chars[i].is_whitespace() {
            i += 1;
        }
        i += 1; // '%'
        let key_start = i;
        while i < chars.len() && chars[i].is_alphanumeric() {
            i += 1;
        }
        let key: String = chars[key_start..i].iter().collect();

        match key.as_str() {
            "flags" => {
                for (j, &c) in chars.iter().enumerate().skip(i) {
                    if c.is_whitespace() || matches!(c, ',' | '[' | ']') {
                        continue;
                    }
                    match c {
                        'i' => flags.ignore_case = true,
                        'm' => flags.multiline = true,
                        's' => flags.dot_all = true,
                        'u' => flags.unicode = true,
                        'x' => flags.extended = true,
                        _ => {
                            return Err(ParseError::new(
                                format!("Unrecognized flag '{c}'"),
                                char_offset + j,
                                text,
                            ));
                        }
                    }
                }
            }
            "lang" => {
                directives.lang = Some(value_of(&chars[i..]));
            }
            "engine" => {
                directives.engine = Some(value_of(&chars[i..]));
            }
            // Unknown directives are consumed without effect.
            _ => {}
        }

        char_offset += chars.len();
        byte_offset += line.len();
    }

    Ok(Scan {
        flags,
        directives,
        char_offset,
        byte_offset,
    })
}

fn value_of(rest: &[char]) -> String {
    rest.iter().collect::<String>().trim().to_owned()
}
