//! Quire Diagnostics
//!
//! Line/column bookkeeping and rendered source frames for parse errors and
//! embedded-content errors.

mod diagnostic;
mod error_code;
pub mod frame;
pub mod line_index;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use frame::CodeFrame;
pub use line_index::LineIndex;
