//! Parse error types.

use quire_diagnostic::{Diagnostic, ErrorCode};
use quire_ir::{Position, Span};

/// What went wrong while reading the markup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("element `<{tag}>` is never closed")]
    UnclosedElement { tag: String },

    #[error("expected `</{expected}>`, found `</{found}>`")]
    MismatchedClosingTag { expected: String, found: String },

    #[error("closing tag `</{tag}>` has no matching opening tag")]
    UnexpectedClosingTag { tag: String },

    #[error("comment is never closed")]
    UnterminatedComment,

    #[error("unclosed `{{` in {location}")]
    UnbalancedInterpolation { location: &'static str },

    #[error("malformed tag: {detail}")]
    MalformedTag { detail: &'static str },
}

impl ParseErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnclosedElement { .. } => ErrorCode::E1001,
            Self::MismatchedClosingTag { .. } => ErrorCode::E1002,
            Self::UnterminatedComment => ErrorCode::E1003,
            Self::UnbalancedInterpolation { .. } => ErrorCode::E1004,
            Self::MalformedTag { .. } => ErrorCode::E1005,
            Self::UnexpectedClosingTag { .. } => ErrorCode::E1006,
        }
    }
}

/// A parse failure with its 1-based source position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({position})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub position: Position,
}

impl ParseError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.kind.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.label());
        match self.note() {
            Some(note) => diagnostic.with_note(note),
            None => diagnostic,
        }
    }

    /// End tags are never implied, so the fix is always explicit.
    fn note(&self) -> Option<String> {
        match &self.kind {
            ParseErrorKind::MismatchedClosingTag { expected, .. } => {
                Some(format!("end tags are not implied; close `<{expected}>` first"))
            }
            ParseErrorKind::UnclosedElement { tag } => {
                Some(format!("add `</{tag}>` or write the tag as `<{tag} />`"))
            }
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnclosedElement { .. } => "opened here",
            ParseErrorKind::MismatchedClosingTag { .. } => "this closing tag",
            ParseErrorKind::UnexpectedClosingTag { .. } => "nothing to close",
            ParseErrorKind::UnterminatedComment => "comment starts here",
            ParseErrorKind::UnbalancedInterpolation { .. } => "this brace",
            ParseErrorKind::MalformedTag { .. } => "here",
        }
    }
}
