//! Embedded content and interpolations.
//!
//! Script, style and `lang-*` bodies, `{...}` interpolations in text, and
//! dynamic attribute values are handed to an [`EmbedFormatter`]. Its errors
//! are relative to the text it was given; they are mapped back onto the
//! document before surfacing.

use quire_diagnostic::{CodeFrame, Diagnostic, ErrorCode, LineIndex};
use quire_doc::builders::{concat, fill, group, hardline, if_break, indent, line, nil, softline, text};
use quire_doc::Doc;
use quire_ir::{ExpressionDialect, Node, NodeId, Span};
use quire_parse::{find_end_bracket, find_outside_nesting};
use tracing::debug;

use crate::error::FormatError;
use crate::patterns::MESSAGE_LOCATION_RE;
use crate::printer::Printer;

/// Language of a piece of embedded text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmbedLang {
    Css,
    Scss,
    Less,
    JavaScript,
    TypeScript,
    /// A single expression inside `{...}`.
    Expression(ExpressionDialect),
}

/// Context flags passed along with the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmbedHints {
    /// The expression is an attribute value.
    pub in_attribute: bool,
    /// The expression is the binding list of a `#for` directive
    /// (`item, index`), not a standalone expression.
    pub for_binding_target: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct EmbedRequest<'a> {
    pub text: &'a str,
    pub lang: EmbedLang,
    pub hints: EmbedHints,
}

/// A sub-formatter failure. `line` and `column` are 1-based and relative to
/// [`EmbedRequest::text`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SubFormatError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl SubFormatError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        SubFormatError {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Formats the text of embedded regions and expressions.
///
/// Calls are made synchronously in document order.
pub trait EmbedFormatter {
    fn format(&mut self, request: &EmbedRequest<'_>) -> Result<Doc, SubFormatError>;
}

/// The language of an element whose body is handed to a sub-formatter.
pub(crate) fn embedded_lang(node: &Node) -> Option<EmbedLang> {
    if !node.is_element() {
        return None;
    }
    match node.tag.as_str() {
        "style" | "lang-css" => Some(EmbedLang::Css),
        "script" | "lang-js" => Some(EmbedLang::JavaScript),
        "lang-ts" => Some(EmbedLang::TypeScript),
        "lang-scss" => Some(EmbedLang::Scss),
        "lang-less" => Some(EmbedLang::Less),
        _ if node.is_embedded => Some(EmbedLang::Css),
        _ => None,
    }
}

impl<E: EmbedFormatter + ?Sized> Printer<'_, E> {
    pub(crate) fn print_embedded(&mut self, id: NodeId, lang: EmbedLang) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];
        let empty = node.content.trim().is_empty();
        let body = if empty {
            nil()
        } else {
            let request = EmbedRequest {
                text: &node.content,
                lang,
                hints: EmbedHints::default(),
            };
            self.format_sub(&request, node.start_tag_end.offset)?
        };
        let edge = if empty { nil() } else { hardline() };
        Ok(concat(vec![
            group(self.opening_tag(id)?),
            indent(vec![edge.clone(), body]),
            edge,
            self.closing_tag(id),
        ]))
    }

    /// Text runs as a fill: words separated by breakable spaces, with
    /// interpolations glued to the words they touch.
    pub(crate) fn print_text(&mut self, id: NodeId) -> Result<Doc, FormatError> {
        let tree = self.tree;
        let node = &tree[id];
        let content = node.content.trim();
        let leading = node.content.len() - node.content.trim_start().len();
        let base = node.range.start + to_u32(leading);

        let mut words: Vec<Vec<Doc>> = Vec::new();
        let mut word: Vec<Doc> = Vec::new();
        let mut run_start = 0;
        let mut i = 0;
        while i < content.len() {
            let rest = &content[i..];
            let Some(c) = rest.chars().next() else { break };
            if c.is_whitespace() {
                push_run(&mut word, &content[run_start..i]);
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
                i += rest.len() - rest.trim_start().len();
                run_start = i;
            } else if c == '{' {
                push_run(&mut word, &content[run_start..i]);
                let Some(end) = find_end_bracket(content, i + 1) else {
                    return Err(FormatError::Invariant(format!(
                        "unbalanced interpolation in text at {}",
                        node.loc.start
                    )));
                };
                let offset = base + to_u32(i + 1);
                word.push(self.interpolation(&content[i + 1..end], offset, false)?);
                i = end + 1;
                run_start = i;
            } else {
                i += c.len_utf8();
            }
        }
        push_run(&mut word, &content[run_start..]);
        if !word.is_empty() {
            words.push(word);
        }

        if let Some(first) = words.first_mut() {
            first.insert(0, self.opening_prefix(id));
        } else {
            words.push(vec![self.opening_prefix(id)]);
        }
        if let Some(last) = words.last_mut() {
            last.push(self.closing_suffix(id));
        }

        let mut parts = Vec::with_capacity(words.len() * 2);
        for (n, word) in words.into_iter().enumerate() {
            if n > 0 {
                parts.push(line());
            }
            parts.push(concat(word));
        }
        Ok(fill(parts))
    }

    /// `{expr}` for an expression starting at `base` in the source.
    pub(crate) fn interpolation(
        &mut self,
        expr: &str,
        base: u32,
        in_attribute: bool,
    ) -> Result<Doc, FormatError> {
        if expr.trim().is_empty() {
            return Ok(text("{}"));
        }
        let request = EmbedRequest {
            text: expr,
            lang: EmbedLang::Expression(self.ctx.expression_dialect),
            hints: EmbedHints {
                in_attribute,
                for_binding_target: false,
            },
        };
        let inner = self.format_sub(&request, base)?;
        Ok(self.wrap_interpolation(inner))
    }

    /// `#for={item, index of list}`: the binding list and the iterated
    /// expression are formatted separately.
    pub(crate) fn for_directive(&mut self, value: &str, base: u32) -> Result<Doc, FormatError> {
        let Some(of) = find_outside_nesting(value, " of ") else {
            return self.interpolation(value, base, true);
        };
        let dialect = self.ctx.expression_dialect;
        let target = EmbedRequest {
            text: &value[..of],
            lang: EmbedLang::Expression(dialect),
            hints: EmbedHints {
                in_attribute: true,
                for_binding_target: true,
            },
        };
        let target = self.format_sub(&target, base)?;
        let iterable_start = of + " of ".len();
        let iterable = EmbedRequest {
            text: &value[iterable_start..],
            lang: EmbedLang::Expression(dialect),
            hints: EmbedHints {
                in_attribute: true,
                for_binding_target: false,
            },
        };
        let iterable = self.format_sub(&iterable, base + to_u32(iterable_start))?;
        Ok(self.wrap_interpolation(concat(vec![target, text(" of"), line(), iterable])))
    }

    fn wrap_interpolation(&self, inner: Doc) -> Doc {
        let body = if self.config.space_around_interpolation {
            if_break(
                vec![indent(vec![line(), inner.clone()]), line()],
                vec![text(" "), inner, text(" ")],
            )
        } else {
            if_break(vec![indent(vec![softline(), inner.clone()]), softline()], inner)
        };
        group(vec![text("{"), body, text("}")])
    }

    /// Run the sub-formatter on text that starts at `base` in the source.
    fn format_sub(&mut self, request: &EmbedRequest<'_>, base: u32) -> Result<Doc, FormatError> {
        match self.embed.format(request) {
            Ok(doc) => Ok(doc),
            Err(err) => Err(self.remap_error(request.text, base, &err)),
        }
    }

    fn remap_error(&self, sub_text: &str, base: u32, err: &SubFormatError) -> FormatError {
        let sub_lines = LineIndex::build(sub_text);
        let Some(relative) = sub_lines.offset_at(sub_text, err.line, err.column) else {
            return FormatError::Invariant(format!(
                "sub-formatter reported {}:{} outside its input: {}",
                err.line, err.column, err.message
            ));
        };
        let position = self.lines.position(self.source, base + relative);
        let cleaned = MESSAGE_LOCATION_RE.replace_all(&err.message, "");
        let message = format!("{cleaned} ({position})");
        debug!(%message, "sub-formatter failed");

        let end = (position.offset + 1).min(to_u32(self.source.len()));
        let diagnostic = Diagnostic::error(ErrorCode::E2001)
            .with_message(message.clone())
            .with_label(Span::new(position.offset, end.max(position.offset)), "here");
        FormatError::SubFormat {
            message,
            position,
            frame: CodeFrame::new(self.source).render(&diagnostic),
        }
    }
}

fn push_run(word: &mut Vec<Doc>, run: &str) {
    if !run.is_empty() {
        word.push(text(run));
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
