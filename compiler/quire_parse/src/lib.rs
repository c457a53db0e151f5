//! Quire Parser
//!
//! Reads whitespace-sensitive markup into a [`quire_ir::Tree`]: elements
//! with attributes, text runs with `{...}` interpolations, comments, raw-text
//! bodies for `script`/`style`/`textarea`/`lang-*`, and void elements.
//!
//! # Modules
//!
//! - [`parser`]: the single-pass tree builder
//! - [`scan`]: bracket matching shared with the formatter
//! - [`error`]: [`ParseError`] and its diagnostic conversion

mod cursor;
pub mod error;
pub mod parser;
pub mod scan;

pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
pub use scan::{find_end_bracket, find_outside_nesting};
