//! Quire IR
//!
//! Node model shared by the parser and the formatter.
//!
//! # Modules
//!
//! - [`span`]: byte spans and line/column positions
//! - [`node`]: node, attribute and display types
//! - [`tree`]: the node arena, top-level reordering and [`DocumentContext`]
//! - [`tags`]: static tag tables resolved into [`TagRoles`]
//! - [`stack`]: stack growth for recursive walks

pub mod node;
pub mod span;
pub mod stack;
pub mod tags;
pub mod tree;

pub use node::{Attribute, AttributeQuote, Display, Node, NodeId, NodeKind};
pub use span::{Position, SourceLoc, Span};
pub use stack::ensure_sufficient_stack;
pub use tags::{LangRegion, TagRoles};
pub use tree::{DocumentContext, ExpressionDialect, Tree};
