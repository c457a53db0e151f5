//! Layout documents and the printer that renders them.
//!
//! Formatting code builds a [`Doc`] describing the preferred breaks of its
//! output; [`print`] then picks a layout that fits the configured width.

mod doc;
pub mod builders;
pub mod printer;

pub use doc::{Doc, GroupId, GroupIds, LineKind};
pub use printer::{print, propagate_breaks, PrintOptions};
