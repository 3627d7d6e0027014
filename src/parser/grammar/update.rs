//! XQuery Update Facility
//!
//! ```text
//! InsertExpr    = insert (node | nodes) SourceExpr InsertTarget TargetExpr
//! InsertTarget  = ((as (first | last))? into) | after | before
//! DeleteExpr    = delete (node | nodes) TargetExpr
//! ReplaceExpr   = replace (value of)? node TargetExpr with ExprSingle
//! RenameExpr    = rename node TargetExpr as NewNameExpr
//! TransformExpr = copy CopyBinding ("," CopyBinding)* modify ExprSingle return ExprSingle
//! ```
//!
//! Update 3.0 adds `transform with { ... }` and `invoke updating`.

use super::*;

/// Keyword pair that starts an updating expression in this dialect
pub fn at_updating_expr<P: GrammarParser>(p: &P) -> bool {
    if !p.dialect().supports_update() {
        return false;
    }
    match (p.current(), p.nth(1)) {
        (SyntaxKind::INSERT_KW | SyntaxKind::DELETE_KW, SyntaxKind::NODE_KW | SyntaxKind::NODES_KW) => true,
        (SyntaxKind::REPLACE_KW, SyntaxKind::NODE_KW) => true,
        (SyntaxKind::REPLACE_KW, SyntaxKind::VALUE_KW) => p.nth(2) == SyntaxKind::OF_KW,
        (SyntaxKind::RENAME_KW, SyntaxKind::NODE_KW) => true,
        (SyntaxKind::COPY_KW, SyntaxKind::DOLLAR) => true,
        _ => false,
    }
}

pub fn parse_updating_expr<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::INSERT_KW => parse_insert_expr(p),
        SyntaxKind::DELETE_KW => parse_delete_expr(p),
        SyntaxKind::REPLACE_KW => parse_replace_expr(p),
        SyntaxKind::RENAME_KW => parse_rename_expr(p),
        SyntaxKind::COPY_KW => parse_transform_expr(p),
        _ => {}
    }
}

fn parse_insert_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::INSERT_EXPR);
    p.bump();
    p.bump();
    parse_operand(p);
    parse_insert_target(p);
    parse_operand(p);
    p.finish_node();
}

fn parse_insert_target<P: GrammarParser>(p: &mut P) {
    if !p.at_any(&[
        SyntaxKind::AS_KW,
        SyntaxKind::INTO_KW,
        SyntaxKind::AFTER_KW,
        SyntaxKind::BEFORE_KW,
    ]) {
        return;
    }
    p.start_node(SyntaxKind::INSERT_TARGET);
    if p.eat(SyntaxKind::AS_KW) {
        p.eat_any(&[SyntaxKind::FIRST_KW, SyntaxKind::LAST_KW]);
        p.expect(SyntaxKind::INTO_KW);
    } else {
        p.bump();
    }
    p.finish_node();
}

fn parse_delete_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::DELETE_EXPR);
    p.bump();
    p.bump();
    parse_operand(p);
    p.finish_node();
}

fn parse_replace_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::REPLACE_EXPR);
    p.bump();
    if p.eat(SyntaxKind::VALUE_KW) {
        p.expect(SyntaxKind::OF_KW);
    }
    p.expect(SyntaxKind::NODE_KW);
    parse_operand(p);
    p.expect(SyntaxKind::WITH_KW);
    parse_operand(p);
    p.finish_node();
}

fn parse_rename_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::RENAME_EXPR);
    p.bump();
    p.bump();
    parse_operand(p);
    p.expect(SyntaxKind::AS_KW);
    parse_operand(p);
    p.finish_node();
}

fn parse_transform_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::TRANSFORM_EXPR);
    p.bump();
    parse_copy_binding(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_copy_binding(p);
    }
    p.expect(SyntaxKind::MODIFY_KW);
    parse_operand(p);
    p.expect(SyntaxKind::RETURN_KW);
    parse_operand(p);
    p.finish_node();
}

/// `$name := ExprSingle`
fn parse_copy_binding<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::COPY_BINDING);
    parse_var_name(p);
    p.expect(SyntaxKind::COLON_EQ);
    parse_operand(p);
    p.finish_node();
}

/// `transform with { Expr? }` after an operand, wrapping it from `cp`
pub fn parse_transform_with_suffix<P: GrammarParser>(p: &mut P, cp: Checkpoint) {
    if p.dialect().supports_update30()
        && p.at(SyntaxKind::TRANSFORM_KW)
        && p.nth(1) == SyntaxKind::WITH_KW
    {
        p.start_node_at(cp, SyntaxKind::TRANSFORM_WITH_EXPR);
        p.bump();
        p.bump();
        parse_enclosed_expr(p);
        p.finish_node();
    }
}

// =============================================================================
// Dynamic updating calls
// =============================================================================

pub fn at_updating_call<P: GrammarParser>(p: &P) -> bool {
    p.dialect().supports_update30()
        && p.at(SyntaxKind::INVOKE_KW)
        && p.nth(1) == SyntaxKind::UPDATING_KW
}

/// `invoke updating PrimaryExpr ArgumentList`
pub fn parse_updating_function_call<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::UPDATING_FUNCTION_CALL);
    p.bump();
    p.bump();
    primary::parse_primary_expr(p);
    primary::parse_argument_list(p);
    p.finish_node();
}
