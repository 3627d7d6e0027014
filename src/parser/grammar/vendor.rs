//! MarkLogic and BaseX extensions
//!
//! BaseX adds conditional operators above `OrExpr` and an `update` suffix;
//! MarkLogic adds binary and JSON node constructors, and kind tests for
//! binary, JSON and schema component nodes. Each production is only
//! reachable when the dialect enables it; otherwise the keywords stay names.

use super::expressions::wrap_suffix;
use super::*;

/// `OrExpr`, extended with BaseX `c ?? a !! b` and `a ?: b`
pub fn parse_conditional_expr<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    expressions::parse_or_expr(p);
    if !p.dialect().supports_ternary() {
        return;
    }
    match p.current() {
        SyntaxKind::DOUBLE_QUESTION => wrap_suffix(p, cp, SyntaxKind::TERNARY_IF_EXPR, |p| {
            parse_operand(p);
            p.expect(SyntaxKind::DOUBLE_BANG);
            parse_operand(p);
        }),
        SyntaxKind::ELVIS => wrap_suffix(p, cp, SyntaxKind::ELVIS_EXPR, parse_operand),
        _ => {}
    }
}

/// BaseX `operand update (EnclosedExpr | ExprSingle)`, wrapping from `cp`
pub fn parse_update_suffix<P: GrammarParser>(p: &mut P, cp: Checkpoint) {
    if !p.dialect().supports_update_expr() {
        return;
    }
    while p.at(SyntaxKind::UPDATE_KW) {
        wrap_suffix(p, cp, SyntaxKind::UPDATE_EXPR, |p| {
            if p.at(SyntaxKind::L_BRACE) {
                parse_enclosed_expr(p);
            } else {
                parse_operand(p);
            }
        });
    }
}

// =============================================================================
// Primaries
// =============================================================================

const JSON_CONSTRUCTORS: &[SyntaxKind] = &[
    SyntaxKind::OBJECT_NODE_KW,
    SyntaxKind::ARRAY_NODE_KW,
    SyntaxKind::NUMBER_NODE_KW,
    SyntaxKind::BOOLEAN_NODE_KW,
    SyntaxKind::NULL_NODE_KW,
];

pub fn at_vendor_primary<P: GrammarParser>(p: &P) -> bool {
    let dialect = p.dialect();
    let brace = p.nth(1) == SyntaxKind::L_BRACE;
    match p.current() {
        SyntaxKind::BINARY_KW => brace && dialect.supports_binary(),
        kind if JSON_CONSTRUCTORS.contains(&kind) => brace && dialect.supports_json_nodes(),
        SyntaxKind::NON_DETERMINISTIC_KW => {
            dialect.supports_non_deterministic()
                && (matches!(p.nth(1), SyntaxKind::DOLLAR | SyntaxKind::L_PAREN)
                    || eqname_len(p, 1).is_some())
        }
        _ => false,
    }
}

pub fn parse_vendor_primary<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::BINARY_KW => primary::parse_keyword_enclosed(p, SyntaxKind::COMP_BINARY_CONSTRUCTOR),
        SyntaxKind::OBJECT_NODE_KW => {
            p.start_node(SyntaxKind::COMP_OBJECT_NODE_CONSTRUCTOR);
            p.bump();
            primary::parse_map_entries(p);
            p.finish_node();
        }
        SyntaxKind::ARRAY_NODE_KW => {
            primary::parse_keyword_enclosed(p, SyntaxKind::COMP_ARRAY_NODE_CONSTRUCTOR)
        }
        SyntaxKind::NUMBER_NODE_KW => {
            primary::parse_keyword_enclosed(p, SyntaxKind::COMP_NUMBER_NODE_CONSTRUCTOR)
        }
        SyntaxKind::BOOLEAN_NODE_KW => {
            primary::parse_keyword_enclosed(p, SyntaxKind::COMP_BOOLEAN_NODE_CONSTRUCTOR)
        }
        SyntaxKind::NULL_NODE_KW => {
            primary::parse_keyword_enclosed(p, SyntaxKind::COMP_NULL_NODE_CONSTRUCTOR)
        }
        SyntaxKind::NON_DETERMINISTIC_KW => {
            p.start_node(SyntaxKind::NON_DETERMINISTIC_FUNCTION_CALL);
            p.bump();
            primary::parse_postfix_expr(p);
            p.finish_node();
        }
        _ => {}
    }
}

// =============================================================================
// Kind tests
// =============================================================================

const SCHEMA_COMPONENT_TESTS: &[SyntaxKind] = &[
    SyntaxKind::ATTRIBUTE_DECL_KW,
    SyntaxKind::COMPLEX_TYPE_KW,
    SyntaxKind::ELEMENT_DECL_KW,
    SyntaxKind::MODEL_GROUP_KW,
    SyntaxKind::SCHEMA_COMPONENT_KW,
    SyntaxKind::SCHEMA_FACET_KW,
    SyntaxKind::SCHEMA_PARTICLE_KW,
    SyntaxKind::SCHEMA_ROOT_KW,
    SyntaxKind::SCHEMA_TYPE_KW,
    SyntaxKind::SCHEMA_WILDCARD_KW,
    SyntaxKind::SIMPLE_TYPE_KW,
];

/// Vendor kind test keyword; the caller has already seen the `(`
pub fn at_vendor_kind_test<P: GrammarParser>(p: &P) -> bool {
    let dialect = p.dialect();
    match p.current() {
        SyntaxKind::BINARY_KW => dialect.supports_binary(),
        kind if JSON_CONSTRUCTORS.contains(&kind) => dialect.supports_json_nodes(),
        kind if SCHEMA_COMPONENT_TESTS.contains(&kind) => dialect.supports_schema_components(),
        _ => false,
    }
}

pub fn parse_vendor_kind_test<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::BINARY_KW => types::parse_empty_parens_test(p, SyntaxKind::BINARY_TEST),
        SyntaxKind::NULL_NODE_KW => types::parse_empty_parens_test(p, SyntaxKind::JSON_NODE_TEST),
        kind if JSON_CONSTRUCTORS.contains(&kind) => {
            types::parse_test_with_args(p, SyntaxKind::JSON_NODE_TEST)
        }
        kind if SCHEMA_COMPONENT_TESTS.contains(&kind) => {
            types::parse_empty_parens_test(p, SyntaxKind::SCHEMA_COMPONENT_TEST)
        }
        _ => {}
    }
}
