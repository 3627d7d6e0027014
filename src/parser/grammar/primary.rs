//! Primary and postfix expressions

use super::*;

/// Keyword-led primaries and calls, which take precedence over name tests
pub fn at_name_primary<P: GrammarParser>(p: &P) -> bool {
    at_keyword_primary(p)
        || at_eqname_followed_by(p, SyntaxKind::L_PAREN)
        || (p.dialect().supports_xquery30() && at_eqname_followed_by(p, SyntaxKind::HASH))
}

/// Name or URI-qualified name `n` tokens ahead followed by `{`
fn at_named_constructor<P: GrammarParser>(p: &P, n: usize) -> bool {
    eqname_len(p, n).is_some_and(|len| p.nth(n + len) == SyntaxKind::L_BRACE)
}

fn at_keyword_primary<P: GrammarParser>(p: &P) -> bool {
    let dialect = p.dialect();
    let brace = p.nth(1) == SyntaxKind::L_BRACE;
    match p.current() {
        SyntaxKind::ORDERED_KW
        | SyntaxKind::UNORDERED_KW
        | SyntaxKind::DOCUMENT_KW
        | SyntaxKind::TEXT_KW
        | SyntaxKind::COMMENT_KW => brace,
        SyntaxKind::ELEMENT_KW | SyntaxKind::ATTRIBUTE_KW => brace || at_named_constructor(p, 1),
        SyntaxKind::PROCESSING_INSTRUCTION_KW => {
            brace || (is_name_kind(p.nth(1)) && p.nth(2) == SyntaxKind::L_BRACE)
        }
        SyntaxKind::NAMESPACE_KW => {
            dialect.supports_xquery30()
                && (brace || (is_name_kind(p.nth(1)) && p.nth(2) == SyntaxKind::L_BRACE))
        }
        SyntaxKind::MAP_KW | SyntaxKind::ARRAY_KW => brace && dialect.supports_xquery31(),
        SyntaxKind::FUNCTION_KW => p.nth(1) == SyntaxKind::L_PAREN && dialect.supports_xquery30(),
        _ => update::at_updating_call(p) || vendor::at_vendor_primary(p),
    }
}

pub fn parse_primary_expr<P: GrammarParser>(p: &mut P) {
    let dialect = *p.dialect();
    match p.current() {
        kind if kind.is_numeric_literal() => p.bump(),
        SyntaxKind::STRING_LITERAL_START => parse_string_literal(p),
        SyntaxKind::DOLLAR => parse_var_ref(p),
        SyntaxKind::L_PAREN => parse_parenthesized_expr(p),
        SyntaxKind::DOT => {
            p.start_node(SyntaxKind::CONTEXT_ITEM_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::LT
        | SyntaxKind::XML_COMMENT_START
        | SyntaxKind::PI_START
        | SyntaxKind::CDATA_SECTION_START => constructors::parse_direct_constructor(p),
        SyntaxKind::PERCENT if dialect.supports_xquery30() => parse_inline_function_expr(p),
        SyntaxKind::L_BRACKET if dialect.supports_xquery31() => parse_square_array_constructor(p),
        SyntaxKind::QUESTION if dialect.supports_xquery31() => parse_lookup(p, SyntaxKind::UNARY_LOOKUP),
        SyntaxKind::STRING_CONSTRUCTOR_START if dialect.supports_xquery31() => {
            parse_string_constructor(p)
        }
        _ if at_keyword_primary(p) => parse_keyword_primary(p),
        _ if dialect.supports_xquery30() && at_eqname_followed_by(p, SyntaxKind::HASH) => {
            parse_named_function_ref(p)
        }
        _ if at_eqname_followed_by(p, SyntaxKind::L_PAREN) => parse_function_call(p),
        _ => {}
    }
}

fn parse_keyword_primary<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::ORDERED_KW => parse_keyword_enclosed(p, SyntaxKind::ORDERED_EXPR),
        SyntaxKind::UNORDERED_KW => parse_keyword_enclosed(p, SyntaxKind::UNORDERED_EXPR),
        SyntaxKind::MAP_KW => parse_map_constructor(p),
        SyntaxKind::ARRAY_KW => parse_keyword_enclosed(p, SyntaxKind::CURLY_ARRAY_CONSTRUCTOR),
        SyntaxKind::FUNCTION_KW => parse_inline_function_expr(p),
        _ if update::at_updating_call(p) => update::parse_updating_function_call(p),
        _ if vendor::at_vendor_primary(p) => vendor::parse_vendor_primary(p),
        _ => constructors::parse_computed_constructor(p),
    }
}

/// `keyword { Expr? }`
pub(super) fn parse_keyword_enclosed<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    parse_enclosed_expr(p);
    p.finish_node();
}

// =============================================================================
// Postfix
// =============================================================================

fn at_key_specifier<P: GrammarParser>(p: &P, n: usize) -> bool {
    let kind = p.nth(n);
    is_name_kind(kind)
        || matches!(kind, SyntaxKind::INTEGER_LITERAL | SyntaxKind::L_PAREN | SyntaxKind::STAR)
}

fn at_postfix<P: GrammarParser>(p: &P) -> bool {
    match p.current() {
        SyntaxKind::L_BRACKET => true,
        SyntaxKind::L_PAREN => p.dialect().supports_xquery30(),
        SyntaxKind::QUESTION => p.dialect().supports_xquery31() && at_key_specifier(p, 1),
        _ => false,
    }
}

/// `PrimaryExpr (Predicate | ArgumentList | Lookup)*`
pub fn parse_postfix_expr<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    let before = p.offset();
    parse_primary_expr(p);
    if p.offset() == before || !at_postfix(p) {
        return;
    }
    p.start_node_at(cp, SyntaxKind::POSTFIX_EXPR);
    while at_postfix(p) {
        match p.current() {
            SyntaxKind::L_BRACKET => paths::parse_predicate(p),
            SyntaxKind::L_PAREN => parse_argument_list(p),
            _ => parse_lookup(p, SyntaxKind::LOOKUP),
        }
    }
    p.finish_node();
}

/// `? KeySpecifier`
fn parse_lookup<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    match p.current() {
        SyntaxKind::INTEGER_LITERAL | SyntaxKind::STAR => p.bump(),
        SyntaxKind::L_PAREN => parse_parenthesized_expr(p),
        _ => parse_ncname(p),
    }
    p.finish_node();
}

// =============================================================================
// Simple primaries
// =============================================================================

pub fn parse_var_ref<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::VAR_REF);
    parse_var_name(p);
    p.finish_node();
}

/// `( Expr? )`
pub fn parse_parenthesized_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARENTHESIZED_EXPR);
    parse_parenthesized_operand(p);
    p.finish_node();
}

/// `EQName ArgumentList`
pub fn parse_function_call<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_CALL);
    parse_eqname(p);
    parse_argument_list(p);
    p.finish_node();
}

/// `EQName # IntegerLiteral`
fn parse_named_function_ref<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::NAMED_FUNCTION_REF);
    parse_eqname(p);
    p.bump();
    p.expect(SyntaxKind::INTEGER_LITERAL);
    p.finish_node();
}

fn starts_argument<P: GrammarParser>(p: &P) -> bool {
    expressions::can_start_expr(p) || p.at(SyntaxKind::QUESTION)
}

fn parse_argument<P: GrammarParser>(p: &mut P) {
    let placeholder = p.at(SyntaxKind::QUESTION)
        && matches!(p.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN)
        && p.dialect().supports_xquery30();
    if placeholder {
        p.start_node(SyntaxKind::ARGUMENT_PLACEHOLDER);
        p.bump();
        p.finish_node();
    } else {
        expressions::parse_expr_single(p);
    }
}

/// `( (Argument ("," Argument)*)? )`
pub fn parse_argument_list<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARGUMENT_LIST);
    if p.eat(SyntaxKind::L_PAREN) {
        parse_delimited(p, ParseContext::ArgumentList, starts_argument, parse_argument);
    }
    p.finish_node();
}

// =============================================================================
// Functions
// =============================================================================

/// `Annotation* function ParamList TypeDeclaration? { Expr? }`
///
/// Without annotations and without a body, `function(...)` is a call to a
/// function named `function`.
fn parse_inline_function_expr<P: GrammarParser>(p: &mut P) {
    let annotated = p.at(SyntaxKind::PERCENT);
    let snapshot = p.snapshot();
    p.start_node(SyntaxKind::INLINE_FUNCTION_EXPR);
    module::parse_annotations(p);
    p.expect(SyntaxKind::FUNCTION_KW);
    module::parse_param_list(p);
    parse_type_declaration(p);
    if !annotated && !p.at(SyntaxKind::L_BRACE) {
        p.rollback(snapshot);
        parse_function_call(p);
        return;
    }
    parse_enclosed_expr(p);
    p.finish_node();
}

// =============================================================================
// Maps, arrays and string constructors
// =============================================================================

/// `map { (Entry ("," Entry)*)? }`
fn parse_map_constructor<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::MAP_CONSTRUCTOR);
    p.bump();
    parse_map_entries(p);
    p.finish_node();
}

/// `{ (ExprSingle : ExprSingle ("," ...)*)? }`, shared with JSON object nodes
pub(super) fn parse_map_entries<P: GrammarParser>(p: &mut P) {
    if p.eat(SyntaxKind::L_BRACE) {
        parse_delimited(
            p,
            ParseContext::MapConstructor,
            expressions::can_start_expr,
            parse_map_entry,
        );
    }
}

fn parse_map_entry<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::MAP_CONSTRUCTOR_ENTRY);
    expressions::parse_expr_single(p);
    p.expect(SyntaxKind::COLON);
    parse_operand(p);
    p.finish_node();
}

/// `[ (ExprSingle ("," ExprSingle)*)? ]`
fn parse_square_array_constructor<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::SQUARE_ARRAY_CONSTRUCTOR);
    p.bump();
    parse_delimited(
        p,
        ParseContext::SquareArray,
        expressions::can_start_expr,
        expressions::parse_expr_single,
    );
    p.finish_node();
}

/// ``` ``[ ... `{ Expr }` ... ]`` ```
fn parse_string_constructor<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::STRING_CONSTRUCTOR);
    p.bump();
    loop {
        match p.current() {
            SyntaxKind::STRING_CONSTRUCTOR_CONTENTS => p.bump(),
            SyntaxKind::STRING_INTERPOLATION_OPEN => {
                p.start_node(SyntaxKind::STRING_INTERPOLATION);
                p.bump();
                parse_delimited(
                    p,
                    ParseContext::Interpolation,
                    expressions::can_start_expr,
                    expressions::parse_expr,
                );
                p.finish_node();
            }
            SyntaxKind::STRING_CONSTRUCTOR_END => {
                p.bump();
                break;
            }
            _ => break,
        }
    }
    p.finish_node();
}
