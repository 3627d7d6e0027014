//! Recovery decisions
//!
//! Every delimited construct and the module loop consult [`decide`] when the
//! current token is neither a separator nor the expected closer. The decision
//! only depends on its arguments, so recovery is deterministic, and every
//! action other than [`RecoveryAction::Close`] and
//! [`RecoveryAction::AcceptAsAbsence`] consumes at least one token.

use super::context::ParseContext;
use crate::parser::SyntaxKind;

/// What to do with a token that does not fit the current construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// The token closes the innermost construct
    Close,
    /// Leave the token to an enclosing construct; the closer is absent
    AcceptAsAbsence,
    /// Wrap the token in an `XPST0003` error node
    ConsumeAndWrap,
    /// Consume the token as a plain leaf while already recovering
    SkipToSync,
    /// Parse the token as the start of the next item
    Continue,
}

/// Decide how to handle `current`
///
/// `recovering` is true after an error node has been emitted in the current
/// construct and no item has been parsed since. `starts_item` tells whether
/// `current` can begin an item of the innermost construct.
pub fn decide(
    current: SyntaxKind,
    contexts: &[ParseContext],
    recovering: bool,
    starts_item: bool,
) -> RecoveryAction {
    if current == SyntaxKind::EOF {
        return RecoveryAction::AcceptAsAbsence;
    }
    let (innermost, outer) = match contexts.split_last() {
        Some((last, rest)) => (*last, rest),
        None => (ParseContext::TopLevel, &[][..]),
    };
    if innermost.closer() == Some(current) {
        return RecoveryAction::Close;
    }
    if outer.iter().any(|ctx| ctx.closer() == Some(current)) {
        return RecoveryAction::AcceptAsAbsence;
    }
    match (recovering, starts_item) {
        (false, _) => RecoveryAction::ConsumeAndWrap,
        (true, true) => RecoveryAction::Continue,
        (true, false) => RecoveryAction::SkipToSync,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_is_absence() {
        assert_eq!(
            decide(SyntaxKind::EOF, &[ParseContext::Parenthesized], false, false),
            RecoveryAction::AcceptAsAbsence
        );
    }

    #[test]
    fn test_own_closer_closes() {
        assert_eq!(
            decide(SyntaxKind::R_BRACKET, &[ParseContext::TopLevel, ParseContext::Predicate], false, false),
            RecoveryAction::Close
        );
    }

    #[test]
    fn test_outer_closer_is_left_alone() {
        let stack = [
            ParseContext::TopLevel,
            ParseContext::EnclosedExpr,
            ParseContext::Parenthesized,
        ];
        assert_eq!(
            decide(SyntaxKind::R_BRACE, &stack, false, false),
            RecoveryAction::AcceptAsAbsence
        );
    }

    #[test]
    fn test_first_bad_token_is_wrapped() {
        assert_eq!(
            decide(SyntaxKind::BAD_CHARACTER, &[ParseContext::TopLevel], false, false),
            RecoveryAction::ConsumeAndWrap
        );
        assert_eq!(
            decide(SyntaxKind::INTEGER_LITERAL, &[ParseContext::TopLevel], false, true),
            RecoveryAction::ConsumeAndWrap
        );
    }

    #[test]
    fn test_later_tokens_skip_or_continue() {
        assert_eq!(
            decide(SyntaxKind::BAD_CHARACTER, &[ParseContext::TopLevel], true, false),
            RecoveryAction::SkipToSync
        );
        assert_eq!(
            decide(SyntaxKind::DOLLAR, &[ParseContext::TopLevel], true, true),
            RecoveryAction::Continue
        );
    }

    #[test]
    fn test_unmatched_closer_is_unexpected() {
        assert_eq!(
            decide(SyntaxKind::R_BRACKET, &[ParseContext::TopLevel, ParseContext::Parenthesized], false, false),
            RecoveryAction::ConsumeAndWrap
        );
    }
}
