//! XQuery Scripting Extension
//!
//! ```text
//! ApplyExpr      = Expr (";" Expr?)*
//! BlockExpr      = block? { BlockVarDecl* ApplyExpr? }
//! BlockVarDecl   = declare $name TypeDeclaration? (:= ExprSingle)? ("," ...)* ;
//! AssignmentExpr = $name := ExprSingle
//! WhileExpr      = while ( Expr ) BlockExpr
//! ExitExpr       = exit returning ExprSingle
//! BreakExpr      = break loop
//! ContinueExpr   = continue loop
//! ```

use super::*;

/// Expressions separated by `;`, as an `APPLY_EXPR` once a `;` is seen
pub fn parse_apply_expr<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    expressions::parse_comma_expr(p);
    if !at_statement_separator(p) {
        return;
    }
    p.start_node_at(cp, SyntaxKind::APPLY_EXPR);
    while p.eat(SyntaxKind::SEMICOLON) {
        if expressions::can_start_expr(p) {
            expressions::parse_comma_expr(p);
        }
    }
    p.finish_node();
}

/// A `;` that belongs to the statement sequence rather than a declaration
fn at_statement_separator<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::SEMICOLON) && p.contexts().last() != Some(&ParseContext::Declaration)
}

pub fn at_statement<P: GrammarParser>(p: &P) -> bool {
    if !p.dialect().supports_scripting() {
        return false;
    }
    match (p.current(), p.nth(1)) {
        (SyntaxKind::L_BRACE, _) => true,
        (SyntaxKind::BLOCK_KW, SyntaxKind::L_BRACE) => true,
        (SyntaxKind::WHILE_KW, SyntaxKind::L_PAREN) => true,
        (SyntaxKind::EXIT_KW, SyntaxKind::RETURNING_KW) => true,
        (SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW, SyntaxKind::LOOP_KW) => true,
        (SyntaxKind::DOLLAR, _) => {
            eqname_len(p, 1).is_some_and(|len| p.nth(1 + len) == SyntaxKind::COLON_EQ)
        }
        _ => false,
    }
}

pub fn parse_statement<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::L_BRACE | SyntaxKind::BLOCK_KW => parse_block_expr(p),
        SyntaxKind::WHILE_KW => parse_while_expr(p),
        SyntaxKind::EXIT_KW => {
            p.start_node(SyntaxKind::EXIT_EXPR);
            p.bump();
            p.bump();
            parse_operand(p);
            p.finish_node();
        }
        SyntaxKind::BREAK_KW => parse_loop_control(p, SyntaxKind::BREAK_EXPR),
        SyntaxKind::CONTINUE_KW => parse_loop_control(p, SyntaxKind::CONTINUE_EXPR),
        SyntaxKind::DOLLAR => {
            p.start_node(SyntaxKind::ASSIGNMENT_EXPR);
            parse_var_name(p);
            p.expect(SyntaxKind::COLON_EQ);
            parse_operand(p);
            p.finish_node();
        }
        _ => {}
    }
}

/// `break loop` or `continue loop`
fn parse_loop_control<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.bump();
    p.finish_node();
}

fn parse_while_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::WHILE_EXPR);
    p.bump();
    parse_parenthesized_operand(p);
    if p.at(SyntaxKind::L_BRACE) {
        parse_block_expr(p);
    }
    p.finish_node();
}

fn parse_block_expr<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::BLOCK_EXPR);
    p.eat(SyntaxKind::BLOCK_KW);
    if p.eat(SyntaxKind::L_BRACE) {
        while p.at(SyntaxKind::DECLARE_KW) && p.nth(1) == SyntaxKind::DOLLAR {
            parse_block_var_decl(p);
        }
        parse_delimited(
            p,
            ParseContext::Block,
            expressions::can_start_expr,
            expressions::parse_expr,
        );
    }
    p.finish_node();
}

fn parse_block_var_decl<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::BLOCK_VAR_DECL);
    p.bump();
    loop {
        parse_var_name(p);
        parse_type_declaration(p);
        if p.eat(SyntaxKind::COLON_EQ) {
            parse_operand(p);
        }
        if !(p.at(SyntaxKind::COMMA) && p.nth(1) == SyntaxKind::DOLLAR) {
            break;
        }
        p.bump();
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}
