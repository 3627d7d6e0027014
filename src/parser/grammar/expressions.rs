//! Expression parsing
//!
//! `Expr` down to `ValueExpr`, one function per precedence level:
//!
//! ```text
//! Expr        = ExprSingle ("," ExprSingle)*
//! ExprSingle  = FLWOR | Quantified | Switch | Typeswitch | If | TryCatch
//!             | UpdatingExpr | Statement | OrExpr
//! OrExpr      = AndExpr ("or" AndExpr)*
//! AndExpr     = ComparisonExpr ("and" ComparisonExpr)*
//! Comparison  = StringConcat (CompOp StringConcat)?
//! StringConcat= Range ("||" Range)*
//! Range       = Additive ("to" Additive)?
//! Additive    = Multiplicative (("+" | "-") Multiplicative)*
//! Multiplicative = Union (("*" | "div" | "idiv" | "mod") Union)*
//! Union       = IntersectExcept (("union" | "|") IntersectExcept)*
//! IntersectExcept = InstanceOf (("intersect" | "except") InstanceOf)*
//! InstanceOf  = Treat ("instance" "of" SequenceType)?
//! Treat       = Castable ("treat" "as" SequenceType)?
//! Castable    = Cast ("castable" "as" SingleType)?
//! Cast        = TransformWith ("cast" "as" SingleType)?
//! TransformWith = Arrow ("transform" "with" EnclosedExpr)?
//! Arrow       = Unary ("=>" ArrowSpecifier ArgumentList)*
//! Unary       = ("-" | "+")* ValueExpr
//! ValueExpr   = Validate | Extension | SimpleMap
//! SimpleMap   = PathExpr ("!" PathExpr)*
//! ```
//!
//! Operator nodes are only built when the operator is present, so `1` is a
//! bare literal and `1 + 2` an `ADDITIVE_EXPR`. Left-associative levels
//! wrap the previous result through a checkpoint.

use super::*;
use crate::parser::builder::Checkpoint;

const COMPARISON_OPS: &[SyntaxKind] = &[
    SyntaxKind::EQ,
    SyntaxKind::NE,
    SyntaxKind::LT,
    SyntaxKind::LE,
    SyntaxKind::GT,
    SyntaxKind::GE,
    SyntaxKind::EQ_KW,
    SyntaxKind::NE_KW,
    SyntaxKind::LT_KW,
    SyntaxKind::LE_KW,
    SyntaxKind::GT_KW,
    SyntaxKind::GE_KW,
    SyntaxKind::IS_KW,
    SyntaxKind::NODE_BEFORE,
    SyntaxKind::NODE_AFTER,
];

const ADDITIVE_OPS: &[SyntaxKind] = &[SyntaxKind::PLUS, SyntaxKind::MINUS];

const MULTIPLICATIVE_OPS: &[SyntaxKind] = &[
    SyntaxKind::STAR,
    SyntaxKind::DIV_KW,
    SyntaxKind::IDIV_KW,
    SyntaxKind::MOD_KW,
];

const UNION_OPS: &[SyntaxKind] = &[SyntaxKind::UNION_KW, SyntaxKind::PIPE];

const INTERSECT_EXCEPT_OPS: &[SyntaxKind] = &[SyntaxKind::INTERSECT_KW, SyntaxKind::EXCEPT_KW];

/// Whether the current token can begin an expression
pub fn can_start_expr<P: GrammarParser>(p: &P) -> bool {
    let dialect = p.dialect();
    match p.current() {
        SyntaxKind::INTEGER_LITERAL
        | SyntaxKind::DECIMAL_LITERAL
        | SyntaxKind::DOUBLE_LITERAL
        | SyntaxKind::PARTIAL_DOUBLE_LITERAL_EXPONENT
        | SyntaxKind::STRING_LITERAL_START
        | SyntaxKind::DOLLAR
        | SyntaxKind::L_PAREN
        | SyntaxKind::PRAGMA_START
        | SyntaxKind::DOT
        | SyntaxKind::DOT_DOT
        | SyntaxKind::AT
        | SyntaxKind::STAR
        | SyntaxKind::SLASH
        | SyntaxKind::SLASH_SLASH
        | SyntaxKind::MINUS
        | SyntaxKind::PLUS
        | SyntaxKind::XML_COMMENT_START
        | SyntaxKind::PI_START
        | SyntaxKind::CDATA_SECTION_START => true,
        SyntaxKind::LT => constructors::at_direct_element(p),
        SyntaxKind::BRACED_URI_LITERAL_START | SyntaxKind::PERCENT => dialect.supports_xquery30(),
        SyntaxKind::L_BRACKET | SyntaxKind::QUESTION | SyntaxKind::STRING_CONSTRUCTOR_START => {
            dialect.supports_xquery31()
        }
        SyntaxKind::L_BRACE => dialect.supports_scripting(),
        kind => is_name_kind(kind),
    }
}

/// `Expr`, or a statement sequence where scripting is enabled
pub fn parse_expr<P: GrammarParser>(p: &mut P) {
    if p.dialect().supports_scripting() {
        scripting::parse_apply_expr(p);
    } else {
        parse_comma_expr(p);
    }
}

/// `ExprSingle ("," ExprSingle)*`
pub fn parse_comma_expr<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    parse_expr_single(p);
    if p.at(SyntaxKind::COMMA) {
        p.start_node_at(cp, SyntaxKind::EXPR);
        while p.eat(SyntaxKind::COMMA) {
            parse_operand(p);
        }
        p.finish_node();
    }
}

pub fn parse_expr_single<P: GrammarParser>(p: &mut P) {
    if !p.enter() {
        error_unexpected(p);
        return;
    }
    expr_single(p);
    p.leave();
}

fn expr_single<P: GrammarParser>(p: &mut P) {
    // `switch(...)` without a case clause is a function call
    if flwor::at_switch(p) && flwor::parse_switch_expr(p) {
        return;
    }
    if flwor::at_flwor(p) {
        flwor::parse_flwor_expr(p);
    } else if flwor::at_quantified(p) {
        flwor::parse_quantified_expr(p);
    } else if flwor::at_typeswitch(p) {
        flwor::parse_typeswitch_expr(p);
    } else if flwor::at_if(p) {
        flwor::parse_if_expr(p);
    } else if flwor::at_try(p) {
        flwor::parse_try_catch_expr(p);
    } else if update::at_updating_expr(p) {
        update::parse_updating_expr(p);
    } else if scripting::at_statement(p) {
        scripting::parse_statement(p);
    } else {
        vendor::parse_conditional_expr(p);
    }
}

// =============================================================================
// Binary operators
// =============================================================================

/// Left-associative chain of `operand (op operand)*`
fn parse_left_assoc<P: GrammarParser>(
    p: &mut P,
    kind: SyntaxKind,
    ops: &[SyntaxKind],
    operand: fn(&mut P),
) {
    let cp = p.checkpoint();
    operand(p);
    while p.at_any(ops) {
        p.start_node_at(cp, kind);
        p.bump();
        operand(p);
        p.finish_node();
    }
}

/// `operand (op operand)?`
fn parse_non_chaining<P: GrammarParser>(
    p: &mut P,
    kind: SyntaxKind,
    ops: &[SyntaxKind],
    operand: fn(&mut P),
) {
    let cp = p.checkpoint();
    operand(p);
    if p.at_any(ops) {
        p.start_node_at(cp, kind);
        p.bump();
        operand(p);
        p.finish_node();
    }
}

pub fn parse_or_expr<P: GrammarParser>(p: &mut P) {
    parse_left_assoc(p, SyntaxKind::OR_EXPR, &[SyntaxKind::OR_KW], parse_and_expr);
}

fn parse_and_expr<P: GrammarParser>(p: &mut P) {
    parse_left_assoc(p, SyntaxKind::AND_EXPR, &[SyntaxKind::AND_KW], parse_comparison_expr);
}

fn parse_comparison_expr<P: GrammarParser>(p: &mut P) {
    parse_non_chaining(p, SyntaxKind::COMPARISON_EXPR, COMPARISON_OPS, parse_string_concat_expr);
}

fn parse_string_concat_expr<P: GrammarParser>(p: &mut P) {
    if p.dialect().supports_xquery30() {
        parse_left_assoc(p, SyntaxKind::STRING_CONCAT_EXPR, &[SyntaxKind::PIPE_PIPE], parse_range_expr);
    } else {
        parse_range_expr(p);
    }
}

fn parse_range_expr<P: GrammarParser>(p: &mut P) {
    parse_non_chaining(p, SyntaxKind::RANGE_EXPR, &[SyntaxKind::TO_KW], parse_additive_expr);
}

fn parse_additive_expr<P: GrammarParser>(p: &mut P) {
    parse_left_assoc(p, SyntaxKind::ADDITIVE_EXPR, ADDITIVE_OPS, parse_multiplicative_expr);
}

fn parse_multiplicative_expr<P: GrammarParser>(p: &mut P) {
    parse_left_assoc(p, SyntaxKind::MULTIPLICATIVE_EXPR, MULTIPLICATIVE_OPS, parse_union_expr);
}

fn parse_union_expr<P: GrammarParser>(p: &mut P) {
    parse_left_assoc(p, SyntaxKind::UNION_EXPR, UNION_OPS, parse_intersect_except_expr);
}

fn parse_intersect_except_expr<P: GrammarParser>(p: &mut P) {
    parse_left_assoc(
        p,
        SyntaxKind::INTERSECT_EXCEPT_EXPR,
        INTERSECT_EXCEPT_OPS,
        parse_instanceof_expr,
    );
}

// =============================================================================
// Type operators
// =============================================================================

/// `operand keyword keyword Type` where both keywords must be present
fn parse_type_operator<P: GrammarParser>(
    p: &mut P,
    kind: SyntaxKind,
    keywords: [SyntaxKind; 2],
    operand: fn(&mut P),
    ty: fn(&mut P),
) {
    let cp = p.checkpoint();
    operand(p);
    if p.at(keywords[0]) && p.nth(1) == keywords[1] {
        p.start_node_at(cp, kind);
        p.bump();
        p.bump();
        ty(p);
        p.finish_node();
    }
}

fn parse_instanceof_expr<P: GrammarParser>(p: &mut P) {
    parse_type_operator(
        p,
        SyntaxKind::INSTANCEOF_EXPR,
        [SyntaxKind::INSTANCE_KW, SyntaxKind::OF_KW],
        parse_treat_expr,
        types::parse_sequence_type,
    );
}

fn parse_treat_expr<P: GrammarParser>(p: &mut P) {
    parse_type_operator(
        p,
        SyntaxKind::TREAT_EXPR,
        [SyntaxKind::TREAT_KW, SyntaxKind::AS_KW],
        parse_castable_expr,
        types::parse_sequence_type,
    );
}

fn parse_castable_expr<P: GrammarParser>(p: &mut P) {
    parse_type_operator(
        p,
        SyntaxKind::CASTABLE_EXPR,
        [SyntaxKind::CASTABLE_KW, SyntaxKind::AS_KW],
        parse_cast_expr,
        types::parse_single_type,
    );
}

fn parse_cast_expr<P: GrammarParser>(p: &mut P) {
    parse_type_operator(
        p,
        SyntaxKind::CAST_EXPR,
        [SyntaxKind::CAST_KW, SyntaxKind::AS_KW],
        parse_transform_with_expr,
        types::parse_single_type,
    );
}

fn parse_transform_with_expr<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    parse_arrow_expr(p);
    update::parse_transform_with_suffix(p, cp);
    vendor::parse_update_suffix(p, cp);
}

// =============================================================================
// Arrow and unary
// =============================================================================

fn parse_arrow_expr<P: GrammarParser>(p: &mut P) {
    if !p.dialect().supports_xquery31() {
        parse_unary_expr(p);
        return;
    }
    let cp = p.checkpoint();
    parse_unary_expr(p);
    while p.at(SyntaxKind::ARROW) {
        p.start_node_at(cp, SyntaxKind::ARROW_EXPR);
        p.bump();
        parse_arrow_specifier(p);
        if p.at(SyntaxKind::L_PAREN) {
            primary::parse_argument_list(p);
        }
        p.finish_node();
    }
}

/// `EQName | VarRef | ParenthesizedExpr`
fn parse_arrow_specifier<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::DOLLAR => primary::parse_var_ref(p),
        SyntaxKind::L_PAREN => primary::parse_parenthesized_expr(p),
        _ => parse_eqname(p),
    }
}

fn parse_unary_expr<P: GrammarParser>(p: &mut P) {
    if p.at_any(ADDITIVE_OPS) {
        p.start_node(SyntaxKind::UNARY_EXPR);
        while p.eat_any(ADDITIVE_OPS) {}
        parse_value_expr(p);
        p.finish_node();
    } else {
        parse_value_expr(p);
    }
}

// =============================================================================
// Value expressions
// =============================================================================

fn parse_value_expr<P: GrammarParser>(p: &mut P) {
    if at_validate(p) {
        parse_validate_expr(p);
    } else if p.at(SyntaxKind::PRAGMA_START) {
        parse_extension_expr(p);
    } else {
        parse_simple_map_expr(p);
    }
}

fn at_validate<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::VALIDATE_KW)
        && match p.nth(1) {
            SyntaxKind::L_BRACE => true,
            SyntaxKind::LAX_KW | SyntaxKind::STRICT_KW => p.nth(2) == SyntaxKind::L_BRACE,
            SyntaxKind::AS_KW | SyntaxKind::TYPE_KW => p.dialect().supports_xquery30(),
            _ => false,
        }
}

/// `validate (lax | strict | (type | as) TypeName)? { Expr }`
fn parse_validate_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::VALIDATE_EXPR);
    p.bump();
    if !p.eat_any(&[SyntaxKind::LAX_KW, SyntaxKind::STRICT_KW])
        && p.eat_any(&[SyntaxKind::TYPE_KW, SyntaxKind::AS_KW])
    {
        parse_eqname(p);
    }
    parse_enclosed_expr(p);
    p.finish_node();
}

/// `Pragma+ { Expr? }`
fn parse_extension_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::EXTENSION_EXPR);
    while p.at(SyntaxKind::PRAGMA_START) {
        parse_pragma(p);
    }
    parse_enclosed_expr(p);
    p.finish_node();
}

/// `(# EQName contents #)`
fn parse_pragma<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::PRAGMA);
    p.bump();
    parse_eqname(p);
    while p.at(SyntaxKind::PRAGMA_CONTENTS) {
        p.bump();
    }
    if !p.eat(SyntaxKind::PRAGMA_END) {
        p.error_here(SyntaxError::unclosed_pragma());
    }
    p.finish_node();
}

fn parse_simple_map_expr<P: GrammarParser>(p: &mut P) {
    if p.dialect().supports_xquery30() {
        parse_left_assoc(p, SyntaxKind::SIMPLE_MAP_EXPR, &[SyntaxKind::BANG], paths::parse_path_expr);
    } else {
        paths::parse_path_expr(p);
    }
}

/// Wrap everything since `cp` in `kind`, consuming the operator and `rest`
pub(super) fn wrap_suffix<P: GrammarParser>(
    p: &mut P,
    cp: Checkpoint,
    kind: SyntaxKind,
    rest: impl FnOnce(&mut P),
) {
    p.start_node_at(cp, kind);
    p.bump();
    rest(p);
    p.finish_node();
}
