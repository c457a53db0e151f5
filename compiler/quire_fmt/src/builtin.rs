//! Default sub-formatter.
//!
//! [`BuiltinFormatter`] does not reflow embedded languages. Blocks are
//! validated and re-indented; expressions are re-tokenised and re-emitted
//! with canonical spacing from a declarative rule table.

mod css;
mod lexer;
mod spacing;

use quire_diagnostic::LineIndex;
use quire_doc::builders::{concat, hardline, join, line, text};
use quire_doc::Doc;

use crate::embed::{EmbedFormatter, EmbedHints, EmbedLang, EmbedRequest, SubFormatError};
use lexer::{tokenize, TokenCategory};
use spacing::{space_between, SpaceAction};

#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFormatter;

impl BuiltinFormatter {
    pub fn new() -> Self {
        BuiltinFormatter
    }
}

impl EmbedFormatter for BuiltinFormatter {
    fn format(&mut self, request: &EmbedRequest<'_>) -> Result<Doc, SubFormatError> {
        match request.lang {
            EmbedLang::Expression(_) => format_expression(request.text, request.hints),
            EmbedLang::JavaScript | EmbedLang::TypeScript => {
                tokenize(request.text)?;
                Ok(reindent(request.text))
            }
            EmbedLang::Css => {
                css::check_blocks(request.text, false)?;
                Ok(reindent(request.text))
            }
            EmbedLang::Scss | EmbedLang::Less => {
                css::check_blocks(request.text, true)?;
                Ok(reindent(request.text))
            }
        }
    }
}

/// Re-emit an expression token by token, spaced by [`space_between`].
fn format_expression(source: &str, hints: EmbedHints) -> Result<Doc, SubFormatError> {
    let tokens = tokenize(source)?;
    let mut parts = Vec::new();
    let mut run = String::new();
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        if let Some(prev) = i.checked_sub(1).map(|p| tokens[p]) {
            if prev.category == TokenCategory::LineComment {
                parts.push(text(std::mem::take(&mut run)));
                parts.push(hardline());
            } else if hints.for_binding_target && prev.category == TokenCategory::Comma && depth == 0 {
                parts.push(text(std::mem::take(&mut run)));
                parts.push(line());
            } else if space_between(prev.category, token.category) == SpaceAction::Space {
                run.push(' ');
            }
        }
        run.push_str(token.text);
        if token.category.is_open() {
            depth += 1;
        } else if token.category.is_close() {
            depth = depth.saturating_sub(1);
        }
    }
    if !run.is_empty() {
        parts.push(text(run));
    }
    Ok(concat(parts))
}

/// A block with its common indentation removed, trailing whitespace and
/// surrounding blank lines dropped, and blank runs collapsed to one line.
fn reindent(block: &str) -> Doc {
    let lines: Vec<&str> = block.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let last = lines.iter().rposition(|l| !l.is_empty()).map_or(first, |i| i + 1);
    let body = &lines[first..last];

    let common = body
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut kept: Vec<Doc> = Vec::with_capacity(body.len());
    let mut prev_blank = false;
    for l in body {
        if l.is_empty() {
            if !prev_blank {
                kept.push(text(""));
            }
            prev_blank = true;
        } else {
            kept.push(text(&l[common..]));
            prev_blank = false;
        }
    }
    join(&hardline(), kept)
}

/// An error at `offset` in `source`, with a `(line:col)` suffix.
fn located(source: &str, offset: usize, message: &str) -> SubFormatError {
    let lines = LineIndex::build(source);
    let offset = u32::try_from(offset).unwrap_or(u32::MAX);
    let (line, column) = lines.line_col(source, offset);
    SubFormatError::new(format!("{message} ({line}:{column})"), line, column)
}
