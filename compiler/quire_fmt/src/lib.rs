//! Quire Formatter
//!
//! Whitespace-sensitive formatter for quire markup templates.
//!
//! # Architecture
//!
//! Formatting is a straight pipeline over one document:
//!
//! 1. **Parse** the source into a [`quire_ir::Tree`] and reorder the top
//!    level (script regions first, style regions last)
//! 2. **Classify** every node: tag roles, CSS display, source whitespace
//! 3. **Sensitivity**: decide which boundaries carry significant whitespace
//! 4. **Print**: build one [`quire_doc::Doc`], borrowing tag delimiters
//!    across boundaries where a line break must not render as a space
//! 5. **Layout** the document at the configured width
//!
//! Embedded languages and `{...}` expressions go through an
//! [`EmbedFormatter`]; [`format`] uses the [`BuiltinFormatter`].
//!
//! # Modules
//!
//! - [`config`]: [`FormatConfig`] and its option enums
//! - [`embed`]: the sub-formatter interface
//! - [`builtin`]: the default sub-formatter
//! - [`error`]: [`FormatError`]

mod borrow;
pub mod builtin;
mod children;
mod classify;
pub mod config;
pub mod embed;
pub mod error;
mod patterns;
mod printer;
mod sensitivity;
mod tag;

use quire_diagnostic::LineIndex;
use quire_ir::{DocumentContext, Tree};
use tracing::debug;

pub use builtin::BuiltinFormatter;
pub use classify::IGNORE_DIRECTIVE;
pub use config::{ComponentTagCase, FormatConfig, WhitespaceSensitivity, INDENT_WIDTH, MAX_LINE_WIDTH};
pub use embed::{EmbedFormatter, EmbedHints, EmbedLang, EmbedRequest, SubFormatError};
pub use error::FormatError;

use printer::Printer;

/// Format a document with the built-in sub-formatter.
///
/// # Example
///
/// ```
/// use quire_fmt::{format, FormatConfig};
///
/// let out = format("<p>hello <b>world</b></p>", &FormatConfig::default());
/// assert_eq!(out.as_deref(), Ok("<p>hello <b>world</b></p>\n"));
/// ```
pub fn format(source: &str, config: &FormatConfig) -> Result<String, FormatError> {
    format_with(source, config, &mut BuiltinFormatter::new())
}

/// Format a document, delegating embedded content to `embed`.
///
/// # Errors
///
/// Fails on malformed markup, when `embed` rejects a region or expression,
/// or on an internal invariant violation. No partial output is produced.
pub fn format_with<E: EmbedFormatter + ?Sized>(
    source: &str,
    config: &FormatConfig,
    embed: &mut E,
) -> Result<String, FormatError> {
    let (tree, ctx) = analyze(source, config)?;
    let lines = LineIndex::build(source);
    let doc = Printer::new(&tree, source, &lines, config, ctx, embed).print_document()?;
    debug!("laying out document");
    Ok(quire_doc::print(&doc, &config.print_options()))
}

/// Parse and decorate a document without printing it.
///
/// The returned tree has display, space and sensitivity flags filled in for
/// every node.
pub fn analyze(source: &str, config: &FormatConfig) -> Result<(Tree, DocumentContext), FormatError> {
    debug!(len = source.len(), "parsing");
    let mut tree = quire_parse::parse(source).map_err(|err| FormatError::parse(err, source))?;
    let ctx = tree.reorder_top_level();
    debug!(nodes = tree.len(), ?ctx, "classifying");
    classify::classify(&mut tree, config.whitespace_sensitivity);
    sensitivity::attach_sensitivity(&mut tree);
    Ok((tree, ctx))
}
