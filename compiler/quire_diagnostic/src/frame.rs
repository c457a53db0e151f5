//! Source context frames.
//!
//! Renders a [`Diagnostic`] as a plain-text excerpt of the source with the
//! labelled spans underlined. Colour is always off so the output can be
//! embedded in error messages and compared in tests.

use std::ops::Range;

use ariadne::{Config, Label as FrameLabel, Report, ReportKind, Source};

use crate::Diagnostic;

/// Renders diagnostics against one source text.
pub struct CodeFrame<'src> {
    source: &'src str,
    char_len: usize,
}

impl<'src> CodeFrame<'src> {
    pub fn new(source: &'src str) -> Self {
        CodeFrame {
            source,
            char_len: source.chars().count(),
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let offset = diagnostic
            .primary_span()
            .map_or(0, |span| self.char_offset(span.start as usize));

        let mut builder: ariadne::ReportBuilder<'_, Range<usize>> =
            Report::build(ReportKind::Error, (), offset)
                .with_config(Config::default().with_color(false))
                .with_code(diagnostic.code)
                .with_message(&diagnostic.message);

        for label in &diagnostic.labels {
            if let Some(range) = self.label_range(label.span.to_range()) {
                builder = builder.with_label(FrameLabel::new(range).with_message(&label.message));
            }
        }
        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }

        let mut out = Vec::new();
        match builder.finish().write(Source::from(self.source), &mut out) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => diagnostic.to_string(),
        }
    }

    /// Convert a byte span to a non-empty character span inside the source.
    fn label_range(&self, bytes: Range<usize>) -> Option<Range<usize>> {
        if self.char_len == 0 {
            return None;
        }
        let start = self.char_offset(bytes.start).min(self.char_len - 1);
        let end = self.char_offset(bytes.end).clamp(start + 1, self.char_len);
        Some(start..end)
    }

    fn char_offset(&self, byte: usize) -> usize {
        let mut byte = byte.min(self.source.len());
        while byte > 0 && !self.source.is_char_boundary(byte) {
            byte -= 1;
        }
        self.source[..byte].chars().count()
    }
}

#[cfg(test)]
mod tests;
