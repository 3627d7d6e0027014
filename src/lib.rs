//! # xquery-syntax
//!
//! Lossless, error-tolerant parser for XQuery 1.0, 3.0 and 3.1, including
//! the Update Facility, the Scripting Extension and the MarkLogic and BaseX
//! vendor extensions.
//!
//! Parsing never fails: every input produces a tree covering all of its
//! text, with `ERROR` nodes where the input does not fit the grammar.
//!
//! ```
//! use xqsyntax::{Dialect, parse};
//!
//! let result = parse("for $x in (1, 2) return $x * 2", &Dialect::default());
//! assert!(result.is_well_formed());
//! assert_eq!(result.syntax().text().to_string(), "for $x in (1, 2) return $x * 2");
//! ```
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Batches of named sources, parallel parsing
//!   ↓
//! parser    → Logos lexer, recursive-descent grammar, rowan CST, AST layer
//!   ↓
//! dialect   → Language versions and vendor extensions
//!   ↓
//! base      → Primitives (TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → dialect → parser → project)
// ============================================================================

/// Foundation types: TextRange, line/column and UTF-16 offsets
pub mod base;

/// Language versions and vendor extensions
pub mod dialect;

/// Parser: Logos lexer, recursive-descent grammar, syntax tree
pub mod parser;

/// Batches of sources parsed together
pub mod project;

// Re-export commonly needed items
pub use parser::keywords;
pub use parser::{Parse, SyntaxError, SyntaxKind, SyntaxNode, parse};

pub use dialect::{Dialect, DialectError, ProductVersion, UpdateVersion, Vendor, XQueryVersion};

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize};
