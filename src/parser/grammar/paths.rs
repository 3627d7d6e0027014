//! Path expressions
//!
//! ```text
//! PathExpr     = "/" RelativePath? | "//" RelativePath | RelativePath
//! RelativePath = StepExpr (("/" | "//") StepExpr)*
//! StepExpr     = PostfixExpr | AxisStep
//! AxisStep     = (ForwardStep | ReverseStep) Predicate*
//! ```
//!
//! A `PATH_EXPR` node only appears when a slash does, and a step only gets
//! an `AXIS_STEP` node for an explicit axis or trailing predicates.

use super::*;

const FORWARD_AXES: &[SyntaxKind] = &[
    SyntaxKind::CHILD_KW,
    SyntaxKind::DESCENDANT_KW,
    SyntaxKind::ATTRIBUTE_KW,
    SyntaxKind::SELF_KW,
    SyntaxKind::DESCENDANT_OR_SELF_KW,
    SyntaxKind::FOLLOWING_SIBLING_KW,
    SyntaxKind::FOLLOWING_KW,
    SyntaxKind::NAMESPACE_KW,
];

const REVERSE_AXES: &[SyntaxKind] = &[
    SyntaxKind::PARENT_KW,
    SyntaxKind::ANCESTOR_KW,
    SyntaxKind::PRECEDING_SIBLING_KW,
    SyntaxKind::PRECEDING_KW,
    SyntaxKind::ANCESTOR_OR_SELF_KW,
];

const SLASHES: &[SyntaxKind] = &[SyntaxKind::SLASH, SyntaxKind::SLASH_SLASH];

pub fn parse_path_expr<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::SLASH => {
            p.start_node(SyntaxKind::PATH_EXPR);
            p.bump();
            if can_start_relative_path(p) {
                parse_relative_path(p);
            }
            p.finish_node();
        }
        SyntaxKind::SLASH_SLASH => {
            p.start_node(SyntaxKind::PATH_EXPR);
            p.bump();
            parse_relative_path(p);
            p.finish_node();
        }
        _ => {
            let cp = p.checkpoint();
            parse_step_expr(p);
            if p.at_any(SLASHES) {
                p.start_node_at(cp, SyntaxKind::PATH_EXPR);
                parse_path_tail(p);
                p.finish_node();
            }
        }
    }
}

/// Tokens after a leading `/` that continue the path rather than an operator
fn can_start_relative_path<P: GrammarParser>(p: &P) -> bool {
    !p.at_any(&[SyntaxKind::MINUS, SyntaxKind::PLUS, SyntaxKind::SLASH, SyntaxKind::SLASH_SLASH])
        && expressions::can_start_expr(p)
}

fn parse_relative_path<P: GrammarParser>(p: &mut P) {
    parse_step_expr(p);
    parse_path_tail(p);
}

fn parse_path_tail<P: GrammarParser>(p: &mut P) {
    while p.eat_any(SLASHES) {
        parse_step_expr(p);
    }
}

pub fn parse_step_expr<P: GrammarParser>(p: &mut P) {
    if at_axis_step(p) {
        parse_axis_step(p);
    } else {
        primary::parse_postfix_expr(p);
    }
}

fn at_axis<P: GrammarParser>(p: &P) -> bool {
    (p.at_any(FORWARD_AXES) || p.at_any(REVERSE_AXES)) && p.nth(1) == SyntaxKind::COLON_COLON
}

/// Whether the step at the current token is an axis step rather than a
/// primary expression
pub fn at_axis_step<P: GrammarParser>(p: &P) -> bool {
    match p.current() {
        SyntaxKind::AT | SyntaxKind::DOT_DOT | SyntaxKind::STAR => true,
        _ if at_axis(p) || types::at_kind_test(p) => true,
        _ if primary::at_name_primary(p) => false,
        _ => at_wildcard(p) || at_eqname(p),
    }
}

fn parse_axis_step<P: GrammarParser>(p: &mut P) {
    let cp = p.checkpoint();
    let mut explicit_axis = false;
    match p.current() {
        SyntaxKind::AT => {
            p.start_node(SyntaxKind::ABBREV_FORWARD_STEP);
            p.bump();
            relex_bare_braced_uri(p);
            parse_node_test(p);
            p.finish_node();
        }
        SyntaxKind::DOT_DOT => {
            p.start_node(SyntaxKind::ABBREV_REVERSE_STEP);
            p.bump();
            p.finish_node();
        }
        _ if at_axis(p) => {
            explicit_axis = true;
            let kind = if p.at_any(REVERSE_AXES) {
                SyntaxKind::REVERSE_AXIS
            } else {
                SyntaxKind::FORWARD_AXIS
            };
            p.start_node(kind);
            p.bump();
            p.bump();
            p.finish_node();
            relex_bare_braced_uri(p);
            parse_node_test(p);
        }
        _ => parse_node_test(p),
    }
    if explicit_axis || p.at(SyntaxKind::L_BRACKET) {
        p.start_node_at(cp, SyntaxKind::AXIS_STEP);
        parse_predicates(p);
        p.finish_node();
    }
}

/// `KindTest | NameTest`
fn parse_node_test<P: GrammarParser>(p: &mut P) {
    if types::at_kind_test(p) {
        types::parse_kind_test(p);
    } else if at_wildcard(p) {
        p.start_node(SyntaxKind::NAME_TEST);
        parse_wildcard(p);
        p.finish_node();
    } else if at_eqname(p) {
        p.start_node(SyntaxKind::NAME_TEST);
        parse_eqname(p);
        p.finish_node();
    }
}

pub fn parse_predicates<P: GrammarParser>(p: &mut P) {
    while p.at(SyntaxKind::L_BRACKET) {
        parse_predicate(p);
    }
}

/// `[ Expr ]`
pub fn parse_predicate<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::PREDICATE);
    p.bump();
    parse_delimited(
        p,
        ParseContext::Predicate,
        expressions::can_start_expr,
        expressions::parse_expr,
    );
    p.finish_node();
}
