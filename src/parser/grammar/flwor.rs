//! FLWOR and the other keyword-led expressions
//!
//! Every construct here is entered only when its keyword is followed by the
//! token that makes it unambiguous (`for $`, `if (`, `try {`, ...). Anything
//! else falls through to the operator chain, where the keyword is a name.

use super::*;

// =============================================================================
// FLWOR
// =============================================================================

pub fn at_flwor<P: GrammarParser>(p: &P) -> bool {
    match p.current() {
        SyntaxKind::FOR_KW => p.nth(1) == SyntaxKind::DOLLAR || at_window_clause(p),
        SyntaxKind::LET_KW => p.nth(1) == SyntaxKind::DOLLAR,
        _ => false,
    }
}

fn at_window_clause<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::FOR_KW)
        && p.dialect().supports_xquery30()
        && matches!(p.nth(1), SyntaxKind::TUMBLING_KW | SyntaxKind::SLIDING_KW)
        && p.nth(2) == SyntaxKind::WINDOW_KW
}

/// `InitialClause IntermediateClause* ReturnClause`
pub fn parse_flwor_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::FLWOR_EXPR);
    parse_clause(p);
    loop {
        match p.current() {
            SyntaxKind::RETURN_KW => {
                parse_return_clause(p);
                break;
            }
            SyntaxKind::WHERE_KW => parse_where_clause(p),
            SyntaxKind::GROUP_KW if p.nth(1) == SyntaxKind::BY_KW => parse_group_by_clause(p),
            SyntaxKind::ORDER_KW if p.nth(1) == SyntaxKind::BY_KW => parse_order_by_clause(p),
            SyntaxKind::STABLE_KW if p.nth(1) == SyntaxKind::ORDER_KW => parse_order_by_clause(p),
            SyntaxKind::COUNT_KW if p.nth(1) == SyntaxKind::DOLLAR => parse_count_clause(p),
            _ if at_flwor(p) => parse_clause(p),
            _ => break,
        }
    }
    p.finish_node();
}

/// `for`, `let` or window clause
fn parse_clause<P: GrammarParser>(p: &mut P) {
    if at_window_clause(p) {
        parse_window_clause(p);
    } else if p.at(SyntaxKind::FOR_KW) {
        parse_for_clause(p);
    } else {
        parse_let_clause(p);
    }
}

fn parse_for_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_CLAUSE);
    p.bump();
    parse_for_binding(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_for_binding(p);
    }
    p.finish_node();
}

/// `$name TypeDeclaration? AllowingEmpty? PositionalVar? in ExprSingle`
fn parse_for_binding<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::FOR_BINDING);
    parse_var_name(p);
    parse_type_declaration(p);
    if p.at(SyntaxKind::ALLOWING_KW) && p.nth(1) == SyntaxKind::EMPTY_KW {
        p.start_node(SyntaxKind::ALLOWING_EMPTY);
        p.bump();
        p.bump();
        p.finish_node();
    }
    parse_positional_var(p);
    p.expect(SyntaxKind::IN_KW);
    parse_operand(p);
    p.finish_node();
}

fn parse_positional_var<P: GrammarParser>(p: &mut P) {
    if p.at(SyntaxKind::AT_KW) && p.nth(1) == SyntaxKind::DOLLAR {
        p.start_node(SyntaxKind::POSITIONAL_VAR);
        p.bump();
        parse_var_name(p);
        p.finish_node();
    }
}

fn parse_let_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::LET_CLAUSE);
    p.bump();
    parse_let_binding(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_let_binding(p);
    }
    p.finish_node();
}

/// `$name TypeDeclaration? := ExprSingle`
fn parse_let_binding<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::LET_BINDING);
    parse_var_name(p);
    parse_type_declaration(p);
    p.expect(SyntaxKind::COLON_EQ);
    parse_operand(p);
    p.finish_node();
}

/// `for (tumbling | sliding) window $name TypeDeclaration? in ExprSingle
/// WindowStartCondition WindowEndCondition?`
fn parse_window_clause<P: GrammarParser>(p: &mut P) {
    let kind = match p.nth(1) {
        SyntaxKind::SLIDING_KW => SyntaxKind::SLIDING_WINDOW_CLAUSE,
        _ => SyntaxKind::TUMBLING_WINDOW_CLAUSE,
    };
    p.start_node(kind);
    p.bump();
    p.bump();
    p.bump();
    parse_var_name(p);
    parse_type_declaration(p);
    p.expect(SyntaxKind::IN_KW);
    parse_operand(p);
    if p.at(SyntaxKind::START_KW) {
        p.start_node(SyntaxKind::WINDOW_START_CONDITION);
        p.bump();
        parse_window_vars(p);
        p.expect(SyntaxKind::WHEN_KW);
        parse_operand(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::END_KW) || (p.at(SyntaxKind::ONLY_KW) && p.nth(1) == SyntaxKind::END_KW) {
        p.start_node(SyntaxKind::WINDOW_END_CONDITION);
        p.eat(SyntaxKind::ONLY_KW);
        p.bump();
        parse_window_vars(p);
        p.expect(SyntaxKind::WHEN_KW);
        parse_operand(p);
        p.finish_node();
    }
    p.finish_node();
}

/// `$current? PositionalVar? (previous $p)? (next $n)?`
fn parse_window_vars<P: GrammarParser>(p: &mut P) {
    let present = p.at(SyntaxKind::DOLLAR)
        || (p.at(SyntaxKind::AT_KW) && p.nth(1) == SyntaxKind::DOLLAR)
        || (p.at_any(&[SyntaxKind::PREVIOUS_KW, SyntaxKind::NEXT_KW]) && p.nth(1) == SyntaxKind::DOLLAR);
    if !present {
        return;
    }
    p.start_node(SyntaxKind::WINDOW_VARS);
    if p.at(SyntaxKind::DOLLAR) {
        p.start_node(SyntaxKind::CURRENT_ITEM);
        parse_var_name(p);
        p.finish_node();
    }
    parse_positional_var(p);
    for (keyword, kind) in [
        (SyntaxKind::PREVIOUS_KW, SyntaxKind::PREVIOUS_ITEM),
        (SyntaxKind::NEXT_KW, SyntaxKind::NEXT_ITEM),
    ] {
        if p.at(keyword) && p.nth(1) == SyntaxKind::DOLLAR {
            p.start_node(kind);
            p.bump();
            parse_var_name(p);
            p.finish_node();
        }
    }
    p.finish_node();
}

fn parse_where_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHERE_CLAUSE);
    p.bump();
    parse_operand(p);
    p.finish_node();
}

/// `group by GroupingSpec ("," GroupingSpec)*`
fn parse_group_by_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::GROUP_BY_CLAUSE);
    p.bump();
    p.bump();
    parse_grouping_spec(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_grouping_spec(p);
    }
    p.finish_node();
}

/// `$name (TypeDeclaration? := ExprSingle)? (collation URILiteral)?`
fn parse_grouping_spec<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::GROUPING_SPEC);
    parse_var_name(p);
    parse_type_declaration(p);
    if p.eat(SyntaxKind::COLON_EQ) {
        parse_operand(p);
    }
    if p.eat(SyntaxKind::COLLATION_KW) {
        parse_uri_literal(p);
    }
    p.finish_node();
}

/// `stable? order by OrderSpec ("," OrderSpec)*`
fn parse_order_by_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::ORDER_BY_CLAUSE);
    p.eat(SyntaxKind::STABLE_KW);
    p.bump();
    p.expect(SyntaxKind::BY_KW);
    parse_order_spec(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_order_spec(p);
    }
    p.finish_node();
}

fn parse_order_spec<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::ORDER_SPEC);
    parse_operand(p);
    parse_order_modifier(p);
    p.finish_node();
}

/// `(ascending | descending)? (empty (greatest | least))? (collation URILiteral)?`
fn parse_order_modifier<P: GrammarParser>(p: &mut P) {
    let present = p.at_any(&[SyntaxKind::ASCENDING_KW, SyntaxKind::DESCENDING_KW])
        || (p.at(SyntaxKind::EMPTY_KW)
            && matches!(p.nth(1), SyntaxKind::GREATEST_KW | SyntaxKind::LEAST_KW))
        || (p.at(SyntaxKind::COLLATION_KW) && p.nth(1) == SyntaxKind::STRING_LITERAL_START);
    if !present {
        return;
    }
    p.start_node(SyntaxKind::ORDER_MODIFIER);
    p.eat_any(&[SyntaxKind::ASCENDING_KW, SyntaxKind::DESCENDING_KW]);
    if p.eat(SyntaxKind::EMPTY_KW) {
        p.eat_any(&[SyntaxKind::GREATEST_KW, SyntaxKind::LEAST_KW]);
    }
    if p.eat(SyntaxKind::COLLATION_KW) {
        parse_uri_literal(p);
    }
    p.finish_node();
}

fn parse_count_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::COUNT_CLAUSE);
    p.bump();
    parse_var_name(p);
    p.finish_node();
}

fn parse_return_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::RETURN_CLAUSE);
    p.bump();
    parse_operand(p);
    p.finish_node();
}

// =============================================================================
// Quantified
// =============================================================================

pub fn at_quantified<P: GrammarParser>(p: &P) -> bool {
    p.at_any(&[SyntaxKind::SOME_KW, SyntaxKind::EVERY_KW]) && p.nth(1) == SyntaxKind::DOLLAR
}

/// `(some | every) Binding ("," Binding)* satisfies ExprSingle`
pub fn parse_quantified_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::QUANTIFIED_EXPR);
    p.bump();
    parse_quantified_binding(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_quantified_binding(p);
    }
    p.expect(SyntaxKind::SATISFIES_KW);
    parse_operand(p);
    p.finish_node();
}

fn parse_quantified_binding<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::QUANTIFIED_BINDING);
    parse_var_name(p);
    parse_type_declaration(p);
    p.expect(SyntaxKind::IN_KW);
    parse_operand(p);
    p.finish_node();
}

// =============================================================================
// Switch and typeswitch
// =============================================================================

pub fn at_switch<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::SWITCH_KW) && p.nth(1) == SyntaxKind::L_PAREN && p.dialect().supports_switch()
}

/// `switch ( Expr ) SwitchCaseClause+ default return ExprSingle`
///
/// Returns false, having consumed nothing, when no case clause follows the
/// operand, which makes the input a call to a function named `switch`.
pub fn parse_switch_expr<P: GrammarParser>(p: &mut P) -> bool {
    let snapshot = p.snapshot();
    p.start_node(SyntaxKind::SWITCH_EXPR);
    p.bump();
    parse_parenthesized_operand(p);
    if !p.at(SyntaxKind::CASE_KW) {
        p.rollback(snapshot);
        return false;
    }
    while p.at(SyntaxKind::CASE_KW) {
        p.start_node(SyntaxKind::SWITCH_CASE_CLAUSE);
        while p.eat(SyntaxKind::CASE_KW) {
            parse_operand(p);
        }
        p.expect(SyntaxKind::RETURN_KW);
        parse_operand(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::DEFAULT_KW) {
        p.start_node(SyntaxKind::SWITCH_DEFAULT_CLAUSE);
        p.bump();
        p.expect(SyntaxKind::RETURN_KW);
        parse_operand(p);
        p.finish_node();
    }
    p.finish_node();
    true
}

pub fn at_typeswitch<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::TYPESWITCH_KW) && p.nth(1) == SyntaxKind::L_PAREN
}

/// `typeswitch ( Expr ) CaseClause+ default ($var)? return ExprSingle`
pub fn parse_typeswitch_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPESWITCH_EXPR);
    p.bump();
    parse_parenthesized_operand(p);
    while p.at(SyntaxKind::CASE_KW) {
        parse_case_clause(p);
    }
    if p.at(SyntaxKind::DEFAULT_KW) {
        p.start_node(SyntaxKind::DEFAULT_CASE_CLAUSE);
        p.bump();
        if p.at(SyntaxKind::DOLLAR) {
            parse_var_name(p);
        }
        p.expect(SyntaxKind::RETURN_KW);
        parse_operand(p);
        p.finish_node();
    }
    p.finish_node();
}

/// `case ($var as)? SequenceType ("|" SequenceType)* return ExprSingle`
fn parse_case_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::CASE_CLAUSE);
    p.bump();
    if p.at(SyntaxKind::DOLLAR) {
        parse_var_name(p);
        p.expect(SyntaxKind::AS_KW);
    }
    let cp = p.checkpoint();
    types::parse_sequence_type(p);
    if p.at(SyntaxKind::PIPE) && p.dialect().supports_xquery30() {
        p.start_node_at(cp, SyntaxKind::SEQUENCE_TYPE_UNION);
        while p.eat(SyntaxKind::PIPE) {
            types::parse_sequence_type(p);
        }
        p.finish_node();
    }
    p.expect(SyntaxKind::RETURN_KW);
    parse_operand(p);
    p.finish_node();
}

// =============================================================================
// Conditional
// =============================================================================

pub fn at_if<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::IF_KW) && p.nth(1) == SyntaxKind::L_PAREN
}

/// `if ( Expr ) then ExprSingle else ExprSingle`
pub fn parse_if_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::IF_EXPR);
    p.bump();
    parse_parenthesized_operand(p);
    p.expect(SyntaxKind::THEN_KW);
    parse_operand(p);
    p.expect(SyntaxKind::ELSE_KW);
    parse_operand(p);
    p.finish_node();
}

// =============================================================================
// Try/catch
// =============================================================================

pub fn at_try<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::TRY_KW) && p.nth(1) == SyntaxKind::L_BRACE && p.dialect().supports_try_catch()
}

/// `try { Expr? } CatchClause+`
pub fn parse_try_catch_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::TRY_CATCH_EXPR);
    p.start_node(SyntaxKind::TRY_CLAUSE);
    p.bump();
    parse_enclosed_expr(p);
    p.finish_node();
    while p.at(SyntaxKind::CATCH_KW) {
        parse_catch_clause(p);
    }
    p.finish_node();
}

/// `catch CatchErrorList { Expr? }`, or MarkLogic's `catch ($var) { Expr? }`
fn parse_catch_clause<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::CATCH_CLAUSE);
    p.bump();
    if p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::DOLLAR {
        p.bump();
        parse_var_name(p);
        p.expect(SyntaxKind::R_PAREN);
    } else if at_wildcard(p) || at_eqname(p) {
        p.start_node(SyntaxKind::CATCH_ERROR_LIST);
        parse_catch_name_test(p);
        while p.eat(SyntaxKind::PIPE) {
            parse_catch_name_test(p);
        }
        p.finish_node();
    }
    parse_enclosed_expr(p);
    p.finish_node();
}

fn parse_catch_name_test<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::NAME_TEST);
    if at_wildcard(p) {
        parse_wildcard(p);
    } else {
        parse_eqname(p);
    }
    p.finish_node();
}
