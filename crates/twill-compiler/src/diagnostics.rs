//! Error type and snippet rendering.
//!
//! Every pipeline failure is a [`ParseError`]: a short message, the character
//! offset into the full original input (directive lines included), the input
//! text itself, and an instructional hint when the message is recognized by
//! the hint table.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use serde::Serialize;

use crate::hints;

/// A compilation error with source position and optional hint.
///
/// `pos` counts characters, not bytes, so positions line up across language
/// bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at position {pos}")]
pub struct ParseError {
    pub message: String,
    pub pos: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ParseError {
    /// Error with the hint resolved from the message.
    pub fn new(message: impl Into<String>, pos: usize, text: &str) -> Self {
        let message = message.into();
        let hint = hints::hint_for(&message, text, pos);
        Self {
            message,
            pos,
            text: Some(text.to_owned()),
            hint,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Render with a source snippet and caret, plus the hint if present.
    pub fn render(&self) -> String {
        self.printer().render()
    }

    pub fn printer(&self) -> ErrorPrinter<'_> {
        ErrorPrinter::new(self)
    }
}

/// Builder-pattern printer for rendering a [`ParseError`].
pub struct ErrorPrinter<'e> {
    error: &'e ParseError,
    path: Option<&'e str>,
    colored: bool,
}

impl<'e> ErrorPrinter<'e> {
    pub fn new(error: &'e ParseError) -> Self {
        Self {
            error,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'e str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let Some(source) = self.error.text.as_deref() else {
            return self.error.to_string();
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let range = char_span(source, self.error.pos);

        let mut snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(range)
                .label(&self.error.message),
        );

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let mut report: Vec<Group> = vec![
            Level::ERROR
                .primary_title(&self.error.message)
                .element(snippet),
        ];

        if let Some(hint) = &self.error.hint {
            report.push(Group::with_title(Level::HELP.secondary_title(hint)));
        }

        renderer.render(&report).to_string()
    }
}

/// Byte range covering the character at char offset `pos`.
///
/// Clamped to the end of the source for errors at end of input.
fn char_span(source: &str, pos: usize) -> std::ops::Range<usize> {
    match source.char_indices().nth(pos) {
        Some((start, ch)) => start..start + ch.len_utf8(),
        None => {
            let len = source.len();
            len.saturating_sub(
                source
                    .chars()
                    .next_back()
                    .map(char::len_utf8)
                    .unwrap_or(0),
            )..len
        }
    }
}
