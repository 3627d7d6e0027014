//! Sequence types, item types and kind tests
//!
//! ```text
//! SequenceType = empty-sequence ( ) | ItemType OccurrenceIndicator?
//! ItemType     = KindTest | item ( ) | FunctionTest | MapTest | ArrayTest
//!              | ( ItemType ) | EQName
//! ```
//!
//! A `SEQUENCE_TYPE` node only wraps an item type that carries an
//! occurrence indicator.

use super::*;

const OCCURRENCE_INDICATORS: &[SyntaxKind] = &[SyntaxKind::QUESTION, SyntaxKind::STAR, SyntaxKind::PLUS];

pub fn parse_sequence_type<P: GrammarParser>(p: &mut P) {
    if p.at(SyntaxKind::EMPTY_SEQUENCE_KW) && p.nth(1) == SyntaxKind::L_PAREN {
        parse_empty_parens_test(p, SyntaxKind::EMPTY_SEQUENCE_TYPE);
        return;
    }
    let cp = p.checkpoint();
    parse_item_type(p);
    if p.at_any(OCCURRENCE_INDICATORS) {
        p.start_node_at(cp, SyntaxKind::SEQUENCE_TYPE);
        p.bump();
        p.finish_node();
    }
}

/// `EQName ?`
pub fn parse_single_type<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::SINGLE_TYPE);
    relex_bare_braced_uri(p);
    parse_eqname(p);
    p.eat(SyntaxKind::QUESTION);
    p.finish_node();
}

pub fn parse_item_type<P: GrammarParser>(p: &mut P) {
    if !p.enter() {
        error_unexpected(p);
        return;
    }
    item_type(p);
    p.leave();
}

fn item_type<P: GrammarParser>(p: &mut P) {
    let dialect = *p.dialect();
    let paren = p.nth(1) == SyntaxKind::L_PAREN;
    match p.current() {
        _ if at_kind_test(p) => parse_kind_test(p),
        SyntaxKind::ITEM_KW if paren => parse_empty_parens_test(p, SyntaxKind::ANY_ITEM_TYPE),
        SyntaxKind::PERCENT if dialect.supports_xquery30() => parse_function_test(p),
        SyntaxKind::FUNCTION_KW if paren && dialect.supports_xquery30() => parse_function_test(p),
        SyntaxKind::MAP_KW if paren && dialect.supports_xquery31() => parse_map_test(p),
        SyntaxKind::ARRAY_KW if paren && dialect.supports_xquery31() => parse_array_test(p),
        SyntaxKind::L_PAREN if dialect.supports_xquery30() => {
            p.start_node(SyntaxKind::PARENTHESIZED_ITEM_TYPE);
            p.bump();
            parse_item_type(p);
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        SyntaxKind::L_BRACE if dialect.supports_xquery30() => {
            relex_bare_braced_uri(p);
            parse_atomic_type(p);
        }
        _ if at_eqname(p) => parse_atomic_type(p),
        _ => {}
    }
}

fn parse_atomic_type<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::ATOMIC_OR_UNION_TYPE);
    parse_eqname(p);
    p.finish_node();
}

// =============================================================================
// Kind tests
// =============================================================================

/// Node kind test keyword followed by `(`
pub fn at_kind_test<P: GrammarParser>(p: &P) -> bool {
    if p.nth(1) != SyntaxKind::L_PAREN {
        return false;
    }
    let dialect = p.dialect();
    match p.current() {
        SyntaxKind::DOCUMENT_NODE_KW
        | SyntaxKind::ELEMENT_KW
        | SyntaxKind::ATTRIBUTE_KW
        | SyntaxKind::SCHEMA_ELEMENT_KW
        | SyntaxKind::SCHEMA_ATTRIBUTE_KW
        | SyntaxKind::PROCESSING_INSTRUCTION_KW
        | SyntaxKind::COMMENT_KW
        | SyntaxKind::TEXT_KW
        | SyntaxKind::NODE_KW => true,
        SyntaxKind::NAMESPACE_NODE_KW => dialect.supports_xquery30(),
        _ => vendor::at_vendor_kind_test(p),
    }
}

pub fn parse_kind_test<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::NODE_KW => parse_empty_parens_test(p, SyntaxKind::ANY_KIND_TEST),
        SyntaxKind::TEXT_KW => parse_empty_parens_test(p, SyntaxKind::TEXT_TEST),
        SyntaxKind::COMMENT_KW => parse_empty_parens_test(p, SyntaxKind::COMMENT_TEST),
        SyntaxKind::NAMESPACE_NODE_KW => {
            parse_empty_parens_test(p, SyntaxKind::NAMESPACE_NODE_TEST)
        }
        SyntaxKind::DOCUMENT_NODE_KW => parse_test_with_args(p, SyntaxKind::DOCUMENT_TEST),
        SyntaxKind::ELEMENT_KW => parse_test_with_args(p, SyntaxKind::ELEMENT_TEST),
        SyntaxKind::ATTRIBUTE_KW => parse_test_with_args(p, SyntaxKind::ATTRIBUTE_TEST),
        SyntaxKind::SCHEMA_ELEMENT_KW => parse_test_with_args(p, SyntaxKind::SCHEMA_ELEMENT_TEST),
        SyntaxKind::SCHEMA_ATTRIBUTE_KW => {
            parse_test_with_args(p, SyntaxKind::SCHEMA_ATTRIBUTE_TEST)
        }
        SyntaxKind::PROCESSING_INSTRUCTION_KW => parse_test_with_args(p, SyntaxKind::PI_TEST),
        _ => vendor::parse_vendor_kind_test(p),
    }
}

/// `keyword ( )`
pub(super) fn parse_empty_parens_test<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    if p.eat(SyntaxKind::L_PAREN) {
        parse_delimited(p, ParseContext::TypeList, |_| false, |_| {});
    }
    p.finish_node();
}

/// `keyword ( (Arg ("," Arg)*)? )` where an argument is a name, wildcard,
/// string literal or nested element test, optionally nillable
pub(super) fn parse_test_with_args<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    if p.eat(SyntaxKind::L_PAREN) {
        parse_delimited(p, ParseContext::TypeList, starts_test_arg, parse_test_arg);
    }
    p.finish_node();
}

fn starts_test_arg<P: GrammarParser>(p: &P) -> bool {
    at_eqname(p) || p.at_any(&[SyntaxKind::STAR, SyntaxKind::STRING_LITERAL_START])
}

fn parse_test_arg<P: GrammarParser>(p: &mut P) {
    if at_kind_test(p) {
        parse_kind_test(p);
    } else if p.at(SyntaxKind::STRING_LITERAL_START) {
        parse_string_literal(p);
    } else if at_wildcard(p) {
        parse_wildcard(p);
    } else {
        parse_eqname(p);
    }
    p.eat(SyntaxKind::QUESTION);
}

// =============================================================================
// Function, map and array tests
// =============================================================================

/// `Annotation* function ( * )` or
/// `Annotation* function ( (SequenceType ("," SequenceType)*)? ) as SequenceType`
fn parse_function_test<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    module::parse_annotations(p);
    let kind = if p.nth(1) == SyntaxKind::L_PAREN && p.nth(2) == SyntaxKind::STAR {
        SyntaxKind::ANY_FUNCTION_TEST
    } else {
        SyntaxKind::TYPED_FUNCTION_TEST
    };
    p.start_node_at(cp, kind);
    p.expect(SyntaxKind::FUNCTION_KW);
    parse_type_arguments(p);
    if kind == SyntaxKind::TYPED_FUNCTION_TEST && p.eat(SyntaxKind::AS_KW) {
        parse_sequence_type(p);
    }
    p.finish_node();
}

/// `map ( * )` or `map ( AtomicOrUnionType , SequenceType )`
fn parse_map_test<P: GrammarParser>(p: &mut P) {
    let kind = if p.nth(2) == SyntaxKind::STAR {
        SyntaxKind::ANY_MAP_TEST
    } else {
        SyntaxKind::TYPED_MAP_TEST
    };
    p.start_node(kind);
    p.bump();
    parse_type_arguments(p);
    p.finish_node();
}

/// `array ( * )` or `array ( SequenceType )`
fn parse_array_test<P: GrammarParser>(p: &mut P) {
    let kind = if p.nth(2) == SyntaxKind::STAR {
        SyntaxKind::ANY_ARRAY_TEST
    } else {
        SyntaxKind::TYPED_ARRAY_TEST
    };
    p.start_node(kind);
    p.bump();
    parse_type_arguments(p);
    p.finish_node();
}

/// `( * )` or `( (SequenceType ("," SequenceType)*)? )`
fn parse_type_arguments<P: GrammarParser>(p: &mut P) {
    if !p.eat(SyntaxKind::L_PAREN) {
        return;
    }
    if p.at(SyntaxKind::STAR) && p.nth(1) == SyntaxKind::R_PAREN {
        p.bump();
        p.bump();
        return;
    }
    parse_delimited(p, ParseContext::TypeList, starts_sequence_type, parse_sequence_type);
}

fn starts_sequence_type<P: GrammarParser>(p: &P) -> bool {
    at_eqname(p) || p.at_any(&[SyntaxKind::L_PAREN, SyntaxKind::PERCENT])
}
