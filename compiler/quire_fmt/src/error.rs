//! Formatter errors.
//!
//! Every failure aborts the whole document; there is no partial output.

use quire_diagnostic::CodeFrame;
use quire_ir::Position;
use quire_parse::ParseError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The markup itself is malformed.
    #[error("{error}")]
    Parse {
        #[source]
        error: ParseError,
        frame: String,
    },

    /// An embedded block or interpolation could not be formatted. `position`
    /// is relative to the whole source.
    #[error("{message}")]
    SubFormat {
        message: String,
        position: Position,
        frame: String,
    },

    /// A defect in the formatter, such as printing an unclassified element.
    #[error("internal formatter error: {0}")]
    Invariant(String),
}

impl FormatError {
    pub(crate) fn parse(error: ParseError, source: &str) -> Self {
        let frame = CodeFrame::new(source).render(&error.to_diagnostic());
        FormatError::Parse { error, frame }
    }

    /// Source position the error points at, if it has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            FormatError::Parse { error, .. } => Some(error.position),
            FormatError::SubFormat { position, .. } => Some(*position),
            FormatError::Invariant(_) => None,
        }
    }

    /// Excerpt of the source around [`position`](Self::position).
    pub fn code_frame(&self) -> Option<&str> {
        match self {
            FormatError::Parse { frame, .. } | FormatError::SubFormat { frame, .. } => Some(frame),
            FormatError::Invariant(_) => None,
        }
    }
}
