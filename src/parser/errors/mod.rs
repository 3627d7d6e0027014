//! Parser error handling module
//!
//! This module provides the diagnostics carried by error nodes:
//! - W3C error codes
//! - Syntax errors rendered as `"<CODE>: <Description>."`
//! - The delimiter context stack
//! - The recovery policy consulted on unexpected tokens

mod codes;
mod context;
mod error;
mod recovery;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{RelatedInfo, SyntaxError, SyntaxErrorBuilder};
pub use recovery::{RecoveryAction, decide};
