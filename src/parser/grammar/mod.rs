//! Grammar modules for XQuery parsing
//!
//! The parsing functions are generic over [`GrammarParser`] so the grammar
//! never touches the lexer or tree builder directly:
//! - `module` - modules, the prolog and its declarations
//! - `expressions` - operator precedence chain from `Expr` down to `ValueExpr`
//! - `flwor` - FLWOR, quantified, switch, typeswitch, if and try/catch
//! - `paths` - path expressions, steps and node tests
//! - `primary` - primary and postfix expressions
//! - `constructors` - direct and computed node constructors
//! - `types` - sequence types, item types and kind tests
//! - `update` - Update Facility expressions
//! - `scripting` - Scripting Extension statements
//! - `vendor` - MarkLogic and BaseX extensions

pub mod constructors;
pub mod expressions;
pub mod flwor;
pub mod module;
pub mod paths;
pub mod primary;
pub mod scripting;
pub mod types;
pub mod update;
pub mod vendor;

use rowan::TextSize;

use super::builder::Checkpoint;
use super::errors::{ParseContext, RecoveryAction, SyntaxError, decide};
use super::lexer::LexMode;
use super::syntax_kind::SyntaxKind;
use crate::dialect::Dialect;

/// The operations grammar functions need from a parser
pub trait GrammarParser {
    type Snapshot;

    fn dialect(&self) -> &Dialect;

    // Token inspection
    fn current(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    /// Kind of the nth non-trivia token ahead, `EOF` past the end
    fn nth(&self, n: usize) -> SyntaxKind;
    fn nth_text(&self, n: usize) -> &str;
    /// Whether the nth token directly follows the previous one
    fn nth_glued(&self, n: usize) -> bool;
    /// Start offset of the current token
    fn offset(&self) -> TextSize;

    // Token consumption
    fn bump(&mut self);
    /// Re-lex the current token in `mode`
    fn push_lexer_mode(&mut self, mode: LexMode);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&mut self) -> Checkpoint;
    fn snapshot(&mut self) -> Self::Snapshot;
    fn rollback(&mut self, snapshot: Self::Snapshot);
    fn start_error(&mut self, error: SyntaxError);
    fn start_error_at(&mut self, checkpoint: Checkpoint, error: SyntaxError);

    // Recovery state
    fn push_context(&mut self, context: ParseContext);
    fn pop_context(&mut self);
    fn contexts(&self) -> &[ParseContext];
    /// Enter a nested construct; false once the nesting limit is reached
    fn enter(&mut self) -> bool;
    fn leave(&mut self);

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    fn at_eof(&self) -> bool {
        self.current() == SyntaxKind::EOF
    }

    /// Consume the current token if it is `kind`
    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` if present; a missing token is left absent
    fn expect(&mut self, kind: SyntaxKind) -> bool {
        self.eat(kind)
    }

    /// Consume the current token if it is one of `kinds`
    fn eat_any(&mut self, kinds: &[SyntaxKind]) -> bool {
        if self.at_any(kinds) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Zero-width error node at the current position
    fn error_here(&mut self, error: SyntaxError) {
        self.start_error(error);
        self.finish_node();
    }

    /// Wrap the current token in an error node
    fn error_token(&mut self, error: SyntaxError) {
        self.start_error(error);
        self.bump();
        self.finish_node();
    }
}

// =============================================================================
// Names
// =============================================================================

/// NCNames, and keywords used where a name is expected
pub fn is_name_kind(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::NCNAME || kind.is_keyword()
}

pub fn at_name<P: GrammarParser>(p: &P) -> bool {
    is_name_kind(p.current())
}

/// Start of an EQName: a name, or `Q{` where URI-qualified names exist
pub fn at_eqname<P: GrammarParser>(p: &P) -> bool {
    at_name(p) || (p.at(SyntaxKind::BRACED_URI_LITERAL_START) && p.dialect().supports_xquery30())
}

/// Number of tokens the EQName starting `n` tokens ahead spans, if any
///
/// A prefix colon with whitespace around it still joins one name, except
/// directly inside a map constructor where a spaced colon separates the key
/// from the value.
pub fn eqname_len<P: GrammarParser>(p: &P, n: usize) -> Option<usize> {
    let kind = p.nth(n);
    if is_name_kind(kind) {
        let prefixed = p.nth(n + 1) == SyntaxKind::COLON
            && is_name_kind(p.nth(n + 2))
            && (glued_qname(p, n) || spaced_colon_joins_names(p));
        return Some(if prefixed { 3 } else { 1 });
    }
    if kind == SyntaxKind::BRACED_URI_LITERAL_START {
        let mut i = n + 1;
        loop {
            match p.nth(i) {
                SyntaxKind::BRACED_URI_LITERAL_END => break,
                SyntaxKind::EOF => return None,
                _ => i += 1,
            }
        }
        return if is_name_kind(p.nth(i + 1)) && p.nth_glued(i + 1) {
            Some(i + 2 - n)
        } else {
            None
        };
    }
    None
}

/// Prefix, colon and local part `n` tokens ahead with nothing between them
fn glued_qname<P: GrammarParser>(p: &P, n: usize) -> bool {
    p.nth_glued(n + 1) && p.nth_glued(n + 2)
}

fn spaced_colon_joins_names<P: GrammarParser>(p: &P) -> bool {
    p.contexts().last() != Some(&ParseContext::MapConstructor)
}

/// Whether the EQName at the current position is directly followed by `kind`
pub fn at_eqname_followed_by<P: GrammarParser>(p: &P, kind: SyntaxKind) -> bool {
    at_eqname(p) && eqname_len(p, 0).is_some_and(|len| p.nth(len) == kind)
}

/// NCName, prefixed QName or URI-qualified name
///
/// Whitespace around the prefix colon is reported inside the `QNAME` node
/// instead of splitting the name.
pub fn parse_eqname<P: GrammarParser>(p: &mut P) {
    if p.at(SyntaxKind::BRACED_URI_LITERAL_START) {
        p.start_node(SyntaxKind::URI_QUALIFIED_NAME);
        parse_braced_uri_literal(p);
        if at_name(p) && p.nth_glued(0) {
            p.bump();
        }
        p.finish_node();
        return;
    }
    if !at_name(p) {
        return;
    }
    if eqname_len(p, 0) == Some(3) {
        let spaced = !glued_qname(p, 0);
        p.start_node(SyntaxKind::QNAME);
        p.bump();
        p.bump();
        if spaced {
            p.error_here(SyntaxError::qname_whitespace());
        }
        p.bump();
        p.finish_node();
    } else {
        p.start_node(SyntaxKind::NCNAME_REF);
        p.bump();
        p.finish_node();
    }
}

/// Re-lex a `{` in a name position as a braced URI without the `Q` prefix
///
/// Only for positions where `{` cannot open an enclosed expression.
pub fn relex_bare_braced_uri<P: GrammarParser>(p: &mut P) {
    if p.at(SyntaxKind::L_BRACE) && p.dialect().supports_xquery30() {
        p.push_lexer_mode(LexMode::BracedUriStart);
    }
}

/// Name of a declared item
pub fn parse_declared_name<P: GrammarParser>(p: &mut P) {
    relex_bare_braced_uri(p);
    parse_eqname(p);
}

/// Plain NCName, used for namespace prefixes
pub fn parse_ncname<P: GrammarParser>(p: &mut P) {
    if at_name(p) {
        p.start_node(SyntaxKind::NCNAME_REF);
        p.bump();
        p.finish_node();
    }
}

/// `$` followed by a variable name
pub fn parse_var_name<P: GrammarParser>(p: &mut P) {
    if p.expect(SyntaxKind::DOLLAR) {
        relex_bare_braced_uri(p);
    }
    parse_eqname(p);
}

/// Wildcard name test: `*`, `*:local`, `prefix:*` or `Q{uri}*`
pub fn at_wildcard<P: GrammarParser>(p: &P) -> bool {
    match p.current() {
        SyntaxKind::STAR => true,
        SyntaxKind::BRACED_URI_LITERAL_START => {
            let mut i = 1;
            while !matches!(p.nth(i), SyntaxKind::BRACED_URI_LITERAL_END | SyntaxKind::EOF) {
                i += 1;
            }
            p.nth(i + 1) == SyntaxKind::STAR && p.nth_glued(i + 1)
        }
        kind if is_name_kind(kind) => {
            p.nth(1) == SyntaxKind::COLON
                && p.nth_glued(1)
                && p.nth(2) == SyntaxKind::STAR
                && p.nth_glued(2)
        }
        _ => false,
    }
}

pub fn parse_wildcard<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::WILDCARD);
    match p.current() {
        SyntaxKind::STAR => {
            p.bump();
            if p.at(SyntaxKind::COLON) && p.nth_glued(0) && is_name_kind(p.nth(1)) && p.nth_glued(1) {
                p.bump();
                p.bump();
            }
        }
        SyntaxKind::BRACED_URI_LITERAL_START => {
            parse_braced_uri_literal(p);
            p.expect(SyntaxKind::STAR);
        }
        _ => {
            p.bump();
            p.bump();
            p.bump();
        }
    }
    p.finish_node();
}

fn parse_braced_uri_literal<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::BRACED_URI_LITERAL);
    p.bump();
    loop {
        match p.current() {
            SyntaxKind::BRACED_URI_LITERAL_END => {
                p.bump();
                break;
            }
            SyntaxKind::EOF => break,
            SyntaxKind::STRING_LITERAL_CONTENTS => p.bump(),
            _ => parse_reference(p),
        }
    }
    p.finish_node();
}

// =============================================================================
// Literals
// =============================================================================

/// Quoted string literal with its escapes and references
pub fn parse_string_literal<P: GrammarParser>(p: &mut P) {
    if !p.at(SyntaxKind::STRING_LITERAL_START) {
        return;
    }
    p.start_node(SyntaxKind::STRING_LITERAL);
    p.bump();
    loop {
        match p.current() {
            SyntaxKind::STRING_LITERAL_END => {
                p.bump();
                break;
            }
            SyntaxKind::EOF => {
                p.error_here(SyntaxError::unclosed_string());
                break;
            }
            SyntaxKind::STRING_LITERAL_CONTENTS | SyntaxKind::ESCAPED_CHARACTER => p.bump(),
            _ => parse_reference(p),
        }
    }
    p.finish_node();
}

/// Literal in a URI position such as `declare namespace x = "..."`
pub fn parse_uri_literal<P: GrammarParser>(p: &mut P) {
    parse_string_literal(p);
}

const PREDEFINED_ENTITIES: &[&str] = &["lt", "gt", "amp", "quot", "apos"];

/// Entity or character reference, checked for validity
pub fn parse_reference<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::PREDEFINED_ENTITY_REFERENCE => {
            let text = p.current_text();
            let name = text.trim_start_matches('&').trim_end_matches(';');
            if PREDEFINED_ENTITIES.contains(&name) || p.dialect().allows_html_entities() {
                p.bump();
            } else {
                p.error_token(SyntaxError::unknown_entity_reference());
            }
        }
        SyntaxKind::CHARACTER_REFERENCE => {
            if character_reference_value(p.current_text()).is_some_and(is_xml_char) {
                p.bump();
            } else {
                p.error_token(SyntaxError::invalid_character_reference());
            }
        }
        SyntaxKind::PARTIAL_ENTITY_REFERENCE | SyntaxKind::EMPTY_ENTITY_REFERENCE => {
            p.error_token(SyntaxError::incomplete_entity_reference());
        }
        SyntaxKind::EOF => {}
        _ => error_unexpected(p),
    }
}

/// Code point of `&#NN;` or `&#xHH;`
pub fn character_reference_value(text: &str) -> Option<u32> {
    let body = text.strip_prefix("&#")?.strip_suffix(';')?;
    match body.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => body.parse().ok(),
    }
}

/// Characters allowed in XML 1.0 documents
pub fn is_xml_char(c: u32) -> bool {
    matches!(c, 0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF)
}

// =============================================================================
// Recovery
// =============================================================================

/// Wrap the current token in an "unexpected token" error node
pub fn error_unexpected<P: GrammarParser>(p: &mut P) {
    let error = match p.current() {
        SyntaxKind::COMMENT_END_TAG => SyntaxError::stray_comment_end(),
        _ => SyntaxError::unexpected_token(),
    };
    let context = p.contexts().last().copied().unwrap_or_default();
    tracing::debug!(
        kind = ?p.current(),
        offset = ?p.offset(),
        context = context.description(),
        "unexpected token"
    );
    p.error_token(error);
}

/// Outcome of one recovery step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The caller should parse another item here
    Item,
    /// The current token was consumed
    Consumed,
    /// The enclosing construct ends here
    Done,
}

/// Apply the recovery policy to a token that cannot continue the construct
pub fn recover<P: GrammarParser>(p: &mut P, recovering: &mut bool, starts_item: bool) -> Recovery {
    let action = decide(p.current(), p.contexts(), *recovering, starts_item);
    if matches!(action, RecoveryAction::AcceptAsAbsence | RecoveryAction::SkipToSync) {
        tracing::debug!(?action, kind = ?p.current(), offset = ?p.offset(), "recovery");
    }
    match action {
        RecoveryAction::Close => {
            p.bump();
            Recovery::Done
        }
        RecoveryAction::AcceptAsAbsence => Recovery::Done,
        RecoveryAction::ConsumeAndWrap => {
            error_unexpected(p);
            *recovering = true;
            Recovery::Consumed
        }
        RecoveryAction::SkipToSync => {
            p.bump();
            Recovery::Consumed
        }
        RecoveryAction::Continue => Recovery::Item,
    }
}

/// Parse an item, reporting the current token if the item consumed nothing
///
/// Returns whether the item made progress.
pub fn parse_item<P: GrammarParser>(p: &mut P, item: &mut impl FnMut(&mut P)) -> bool {
    let before = p.offset();
    item(p);
    if p.offset() == before && !p.at_eof() {
        error_unexpected(p);
        return false;
    }
    true
}

/// Items up to the closer of `context`, which is consumed when present
///
/// Call with the opening delimiter already consumed. Commas separate items
/// in comma-separated contexts. A token that cannot continue the list goes
/// through the recovery policy.
pub fn parse_delimited<P: GrammarParser>(
    p: &mut P,
    context: ParseContext,
    starts_item: impl Fn(&P) -> bool,
    mut item: impl FnMut(&mut P),
) {
    let closer = context.closer();
    let separated = context.is_comma_separated();
    p.push_context(context);
    let mut expecting = true;
    let mut recovering = false;
    loop {
        let current = p.current();
        if Some(current) == closer {
            p.bump();
            break;
        }
        if separated && current == SyntaxKind::COMMA {
            p.bump();
            expecting = true;
            continue;
        }
        let starts = starts_item(p);
        if starts && expecting {
            recovering = !parse_item(p, &mut item);
            expecting = false;
            continue;
        }
        match recover(p, &mut recovering, starts) {
            Recovery::Item => {
                recovering = !parse_item(p, &mut item);
                expecting = false;
            }
            Recovery::Consumed => {}
            Recovery::Done => break,
        }
    }
    p.pop_context();
}

/// `{ Expr? }` as an `ENCLOSED_EXPR` node
pub fn parse_enclosed_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::ENCLOSED_EXPR);
    if p.eat(SyntaxKind::L_BRACE) {
        parse_delimited(
            p,
            ParseContext::EnclosedExpr,
            expressions::can_start_expr,
            expressions::parse_expr,
        );
    }
    p.finish_node();
}

/// `( Expr )` inline, without a node of its own
pub fn parse_parenthesized_operand<P: GrammarParser>(p: &mut P) {
    if p.eat(SyntaxKind::L_PAREN) {
        parse_delimited(
            p,
            ParseContext::Parenthesized,
            expressions::can_start_expr,
            expressions::parse_expr,
        );
    }
}

/// `as SequenceType`
pub fn parse_type_declaration<P: GrammarParser>(p: &mut P) {
    if p.at(SyntaxKind::AS_KW) {
        p.start_node(SyntaxKind::TYPE_DECLARATION);
        p.bump();
        types::parse_sequence_type(p);
        p.finish_node();
    }
}

/// An expression single that may be missing
pub fn parse_operand<P: GrammarParser>(p: &mut P) {
    if expressions::can_start_expr(p) {
        expressions::parse_expr_single(p);
    }
}
