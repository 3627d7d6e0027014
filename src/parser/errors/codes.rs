//! Error code definitions for parser diagnostics
//!
//! Codes are the W3C XQuery error codes for static errors the parser can
//! detect from syntax alone:
//! - XPST0003: grammar errors (unexpected and unclosed constructs)
//! - XQST0090: character references to non-XML characters
//! - XQST0118: direct element end tag not matching its start tag

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Static syntax error
    XPST0003,
    /// Invalid XML character reference
    XQST0090,
    /// Mismatched direct element tags
    XQST0118,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "XPST0003")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XPST0003 => "XPST0003",
            Self::XQST0090 => "XQST0090",
            Self::XQST0118 => "XQST0118",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::XPST0003 => "syntax error",
            Self::XQST0090 => "character reference error",
            Self::XQST0118 => "constructor error",
        }
    }

    /// Get the default message for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::XPST0003 => "Unexpected token.",
            Self::XQST0090 => "Invalid XML character reference.",
            Self::XQST0118 => "Closing tag does not match open tag.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
