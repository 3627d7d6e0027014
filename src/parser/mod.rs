//! Rowan-based error-tolerant parser for XQuery
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! This is the rust-analyzer approach: we build a lossless CST that preserves
//! all whitespace and comments, then extract an AST layer on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos, modal) → Tokens with SyntaxKind
//!     ↓
//! Parser + grammar → TreeBuilder → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! ## Error recovery
//!
//! Parsing never fails. Unexpected tokens are wrapped in `ERROR` nodes that
//! carry a [`SyntaxError`], missing tokens are simply absent, and the tree
//! always spans the whole input.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod builder;
pub mod debug_tree;
pub mod errors;
pub mod grammar;
pub mod keywords;
mod lexer;
pub mod rule_parser;
mod syntax_kind;

pub use ast::AstNode;
pub use errors::{ErrorCode, ParseContext, SyntaxError};
pub use lexer::{LexMode, Lexer, Token, tokenize};
pub use parser::{MAX_DEPTH, Parse, parse};
pub use syntax_kind::{
    SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken, XQueryLanguage,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
