//! Parse context tracking for delimiter-aware recovery
//!
//! The parser maintains a stack of the delimited constructs it is inside.
//! A token that closes an enclosing construct is never swallowed by an inner
//! one; the inner construct ends without its closer instead.

use crate::parser::SyntaxKind;

/// A delimited construct the parser is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// At the top level of a module
    #[default]
    TopLevel,
    /// Inside a prolog declaration, up to its `;`
    Declaration,
    /// Inside `( ... )`
    Parenthesized,
    /// Inside a function call argument list
    ArgumentList,
    /// Inside a function declaration or inline function parameter list
    ParamList,
    /// Inside a typed function test `function( ... )`
    TypeList,
    /// Inside a predicate `[ ... ]`
    Predicate,
    /// Inside a square array constructor `[ ... ]`
    SquareArray,
    /// Inside an enclosed expression `{ ... }`
    EnclosedExpr,
    /// Inside a map constructor `map { ... }`
    MapConstructor,
    /// Inside a scripting block `{ ... }`
    Block,
    /// Inside a string constructor interpolation `` `{ ... }` ``
    Interpolation,
}

impl ParseContext {
    /// Get a human-readable description of this context
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::Declaration => "in prolog declaration",
            Self::Parenthesized => "in parenthesized expression",
            Self::ArgumentList => "in argument list",
            Self::ParamList => "in parameter list",
            Self::TypeList => "in function test",
            Self::Predicate => "in predicate",
            Self::SquareArray => "in array constructor",
            Self::EnclosedExpr => "in enclosed expression",
            Self::MapConstructor => "in map constructor",
            Self::Block => "in block",
            Self::Interpolation => "in string interpolation",
        }
    }

    /// The token that ends this construct
    pub fn closer(&self) -> Option<SyntaxKind> {
        match self {
            Self::TopLevel => None,
            Self::Declaration => Some(SyntaxKind::SEMICOLON),
            Self::Parenthesized | Self::ArgumentList | Self::ParamList | Self::TypeList => {
                Some(SyntaxKind::R_PAREN)
            }
            Self::Predicate | Self::SquareArray => Some(SyntaxKind::R_BRACKET),
            Self::EnclosedExpr | Self::MapConstructor | Self::Block => Some(SyntaxKind::R_BRACE),
            Self::Interpolation => Some(SyntaxKind::STRING_INTERPOLATION_CLOSE),
        }
    }

    /// Check if this context separates its items with commas
    pub fn is_comma_separated(&self) -> bool {
        matches!(
            self,
            Self::ArgumentList
                | Self::ParamList
                | Self::TypeList
                | Self::SquareArray
                | Self::MapConstructor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_description() {
        assert_eq!(ParseContext::TopLevel.description(), "at top level");
        assert_eq!(ParseContext::Predicate.description(), "in predicate");
    }

    #[test]
    fn test_closers() {
        assert_eq!(ParseContext::TopLevel.closer(), None);
        assert_eq!(ParseContext::ArgumentList.closer(), Some(SyntaxKind::R_PAREN));
        assert_eq!(ParseContext::MapConstructor.closer(), Some(SyntaxKind::R_BRACE));
        assert_eq!(ParseContext::Declaration.closer(), Some(SyntaxKind::SEMICOLON));
    }

    #[test]
    fn test_default_context() {
        assert_eq!(ParseContext::default(), ParseContext::TopLevel);
    }
}
