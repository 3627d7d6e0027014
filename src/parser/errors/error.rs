//! Syntax error type
//!
//! A syntax error is the diagnostic attached to one `ERROR` node. It renders
//! as `"<CODE>: <Description>."`, the text a debug tree prints for the node.

use std::fmt;

use rowan::{TextRange, TextSize};

use super::codes::ErrorCode;

/// Related location information for an error
///
/// Used to point to related source locations, e.g. the start tag of an
/// element whose end tag does not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    /// Create a new related info
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A syntax error attached to an error node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// W3C error code
    pub code: ErrorCode,
    /// Description, ending in a full stop
    pub message: String,
    /// Range of the error node
    pub range: TextRange,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    /// Create a new syntax error
    pub fn new(code: ErrorCode, message: impl Into<String>, range: TextRange) -> Self {
        Self {
            code,
            message: message.into(),
            range,
            related: vec![],
        }
    }

    /// Create an error at a specific offset with zero-width range
    pub fn at_offset(code: ErrorCode, message: impl Into<String>, offset: TextSize) -> Self {
        Self::new(code, message, TextRange::empty(offset))
    }

    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder::new(code)
    }

    /// `XPST0003: Unexpected token.`
    pub fn unexpected_token() -> Self {
        Self::syntax(ErrorCode::XPST0003.default_message())
    }

    /// An `XPST0003` error with a custom description
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::at_offset(ErrorCode::XPST0003, message, TextSize::new(0))
    }

    /// `XPST0003: Unclosed XQuery comment.`
    pub fn unclosed_comment() -> Self {
        Self::syntax("Unclosed XQuery comment.")
    }

    /// `XPST0003: Unclosed string literal.`
    pub fn unclosed_string() -> Self {
        Self::syntax("Unclosed string literal.")
    }

    /// `XPST0003: Unclosed CDATA section.`
    pub fn unclosed_cdata() -> Self {
        Self::syntax("Unclosed CDATA section.")
    }

    /// `XPST0003: Unclosed XML comment.`
    pub fn unclosed_xml_comment() -> Self {
        Self::syntax("Unclosed XML comment.")
    }

    /// `XPST0003: Unclosed processing instruction.`
    pub fn unclosed_pi() -> Self {
        Self::syntax("Unclosed processing instruction.")
    }

    /// `XPST0003: Unclosed pragma.`
    pub fn unclosed_pragma() -> Self {
        Self::syntax("Unclosed pragma.")
    }

    /// `XPST0003: Incomplete entity reference.`
    pub fn incomplete_entity_reference() -> Self {
        Self::syntax("Incomplete entity reference.")
    }

    /// `XPST0003: Unknown entity reference.`
    pub fn unknown_entity_reference() -> Self {
        Self::syntax("Unknown entity reference.")
    }

    /// `XPST0003: Expected closing tag '</name>'.`
    pub fn missing_closing_tag(name: &str) -> Self {
        Self::syntax(format!("Expected closing tag '</{name}>'."))
    }

    /// `XPST0003: Whitespace is not allowed in QNames.`
    pub fn qname_whitespace() -> Self {
        Self::syntax("Whitespace is not allowed in QNames.")
    }

    /// `XPST0003: End of comment marker found without a '(:' start marker.`
    pub fn stray_comment_end() -> Self {
        Self::syntax("End of comment marker found without a '(:' start marker.")
    }

    /// `XQST0090: Invalid XML character reference.`
    pub fn invalid_character_reference() -> Self {
        Self::at_offset(
            ErrorCode::XQST0090,
            ErrorCode::XQST0090.default_message(),
            TextSize::new(0),
        )
    }

    /// `XQST0118: Closing tag '</close>' does not match open tag '<open>'.`
    pub fn mismatched_closing_tag(close: &str, open: &str) -> Self {
        Self::at_offset(
            ErrorCode::XQST0118,
            format!("Closing tag '</{close}>' does not match open tag '<{open}>'."),
            TextSize::new(0),
        )
    }

    /// Add related information
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// Check if this error has related information
    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }

    /// Format the error the way error nodes display it
    pub fn format(&self) -> String {
        format!("{}: {}", self.code, self.message)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Builder for creating syntax errors with related locations
pub struct SyntaxErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    related: Vec<RelatedInfo>,
}

impl SyntaxErrorBuilder {
    /// Create a new builder with an error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            range: None,
            related: vec![],
        }
    }

    /// Set the error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the source range
    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Add related information
    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(message, range));
        self
    }

    /// Build the syntax error, defaulting the message from the code
    pub fn build(self) -> SyntaxError {
        SyntaxError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .range
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code: self.code,
            related: self.related,
        }
    }
}
