//! Foundation types for the XQuery toolchain.
//!
//! This module provides fundamental types used by the parser and its hosts:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column and UTF-16 conversion
//!
//! This module has NO dependencies on other xqsyntax modules.

mod span;

pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
