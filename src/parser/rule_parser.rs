//! Rule-based parser for testing individual grammar rules
//!
//! Runs one production on its own input, without a surrounding module.
//! Useful for testing specific rules in isolation.
//!
//! # Example
//!
//! ```
//! use xqsyntax::Dialect;
//! use xqsyntax::parser::rule_parser::{Rule, parse_rule};
//!
//! let result = parse_rule(Rule::SequenceType, "xs:string*", &Dialect::default());
//! assert!(result.is_ok());
//! assert!(result.fully_consumed());
//! ```

use super::errors::SyntaxError;
use super::grammar::{self, GrammarParser};
use super::parser::{Parse, Parser};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::dialect::Dialect;

/// Grammar rules that can be parsed individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    // === Modules ===
    /// A complete source: version declaration, prolog and body
    Module,
    /// `% name (literals)` annotations
    Annotations,
    /// `( $a as t, ... )`
    ParamList,

    // === Expressions ===
    /// `ExprSingle ("," ExprSingle)*`
    Expr,
    ExprSingle,
    OrExpr,
    FlworExpr,
    QuantifiedExpr,
    SwitchExpr,
    TypeswitchExpr,
    IfExpr,
    TryCatchExpr,
    PathExpr,
    StepExpr,
    PostfixExpr,
    PrimaryExpr,
    Predicate,
    ArgumentList,
    EnclosedExpr,

    // === Constructors ===
    /// `<a>...</a>`, `<!--...-->`, `<?pi ...?>` and CDATA sections
    DirectConstructor,
    ComputedConstructor,

    // === Types ===
    SequenceType,
    ItemType,
    SingleType,
    KindTest,

    // === Extensions ===
    /// Update Facility expressions
    UpdatingExpr,
    /// Scripting statements
    Statement,

    // === Primitives ===
    EQName,
    Wildcard,
    StringLiteral,
    VarRef,
}

/// Parse result for a single rule
#[derive(Debug)]
pub struct RuleParseResult {
    /// The parse result with green tree and errors
    pub parse: Parse,
    /// The rule that was parsed
    pub rule: Rule,
    /// The original input
    pub input: String,
    consumed: bool,
}

impl RuleParseResult {
    /// Check if parsing succeeded without errors
    pub fn is_ok(&self) -> bool {
        self.parse.ok()
    }

    /// Get the errors from parsing
    pub fn errors(&self) -> &[SyntaxError] {
        self.parse.errors()
    }

    /// Get the syntax tree root
    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// Check if the rule consumed the whole input
    pub fn fully_consumed(&self) -> bool {
        self.consumed
    }

    /// Kind of the node the rule produced, if it produced exactly one
    pub fn node_kind(&self) -> Option<SyntaxKind> {
        let mut nodes = self.syntax().children();
        match (nodes.next(), nodes.next()) {
            (Some(node), None) => Some(node.kind()),
            _ => None,
        }
    }
}

/// Parse a specific grammar rule
///
/// Input left over after the rule is wrapped in a single error node.
pub fn parse_rule(rule: Rule, input: &str, dialect: &Dialect) -> RuleParseResult {
    let mut parser = Parser::new(input, *dialect);
    run_rule(rule, &mut parser);
    let consumed = parser.at_eof();
    if !consumed {
        tracing::debug!(?rule, offset = ?parser.offset(), "rule left input unconsumed");
        parser.start_error(SyntaxError::unexpected_token());
        while !parser.at_eof() {
            parser.bump();
        }
        parser.finish_node();
    }
    RuleParseResult {
        parse: parser.finish(),
        rule,
        input: input.to_string(),
        consumed,
    }
}

fn run_rule<P: GrammarParser>(rule: Rule, p: &mut P) {
    use grammar::*;
    match rule {
        Rule::Module => module::parse_module(p),
        Rule::Annotations => module::parse_annotations(p),
        Rule::ParamList => module::parse_param_list(p),
        Rule::Expr => expressions::parse_expr(p),
        Rule::ExprSingle => expressions::parse_expr_single(p),
        Rule::OrExpr => expressions::parse_or_expr(p),
        Rule::FlworExpr => flwor::parse_flwor_expr(p),
        Rule::QuantifiedExpr => flwor::parse_quantified_expr(p),
        Rule::SwitchExpr => {
            if !flwor::parse_switch_expr(p) {
                primary::parse_function_call(p);
            }
        }
        Rule::TypeswitchExpr => flwor::parse_typeswitch_expr(p),
        Rule::IfExpr => flwor::parse_if_expr(p),
        Rule::TryCatchExpr => flwor::parse_try_catch_expr(p),
        Rule::PathExpr => paths::parse_path_expr(p),
        Rule::StepExpr => paths::parse_step_expr(p),
        Rule::PostfixExpr => primary::parse_postfix_expr(p),
        Rule::PrimaryExpr => primary::parse_primary_expr(p),
        Rule::Predicate => paths::parse_predicate(p),
        Rule::ArgumentList => primary::parse_argument_list(p),
        Rule::EnclosedExpr => parse_enclosed_expr(p),
        Rule::DirectConstructor => constructors::parse_direct_constructor(p),
        Rule::ComputedConstructor => constructors::parse_computed_constructor(p),
        Rule::SequenceType => types::parse_sequence_type(p),
        Rule::ItemType => types::parse_item_type(p),
        Rule::SingleType => types::parse_single_type(p),
        Rule::KindTest => types::parse_kind_test(p),
        Rule::UpdatingExpr => update::parse_updating_expr(p),
        Rule::Statement => scripting::parse_statement(p),
        Rule::EQName => parse_eqname(p),
        Rule::Wildcard => parse_wildcard(p),
        Rule::StringLiteral => parse_string_literal(p),
        Rule::VarRef => primary::parse_var_ref(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(rule: Rule, input: &str) -> RuleParseResult {
        parse_rule(rule, input, &Dialect::default())
    }

    #[test]
    fn test_parse_sequence_type() {
        let result = rule(Rule::SequenceType, "element(a)+");
        assert!(result.is_ok(), "errors: {:?}", result.errors());
        assert_eq!(result.node_kind(), Some(SyntaxKind::SEQUENCE_TYPE));
    }

    #[test]
    fn test_parse_flwor() {
        let result = rule(Rule::FlworExpr, "for $x in 1 to 3 return $x");
        assert!(result.is_ok(), "errors: {:?}", result.errors());
        assert!(result.fully_consumed());
        assert_eq!(result.node_kind(), Some(SyntaxKind::FLWOR_EXPR));
    }

    #[test]
    fn test_leftover_input_is_an_error() {
        let result = rule(Rule::VarRef, "$x $y");
        assert!(!result.fully_consumed());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.syntax().text().to_string(), "$x $y");
    }

    #[test]
    fn test_switch_without_cases_is_a_call() {
        let result = rule(Rule::SwitchExpr, "switch(1)");
        assert!(result.is_ok());
        assert_eq!(result.node_kind(), Some(SyntaxKind::FUNCTION_CALL));
    }
}
