//! Parsing single grammar rules in isolation

use rstest::rstest;
use xqsyntax::parser::rule_parser::{Rule, parse_rule};
use xqsyntax::{Dialect, SyntaxKind};

#[rstest]
#[case(Rule::Module, "1", SyntaxKind::MAIN_MODULE)]
#[case(Rule::Module, "module namespace m = \"urn:m\";", SyntaxKind::LIBRARY_MODULE)]
#[case(Rule::Annotations, "%private", SyntaxKind::ANNOTATION)]
#[case(Rule::ParamList, "($a, $b as xs:int)", SyntaxKind::PARAM_LIST)]
#[case(Rule::Expr, "1, 2", SyntaxKind::EXPR)]
#[case(Rule::ExprSingle, "if (1) then 2 else 3", SyntaxKind::IF_EXPR)]
#[case(Rule::OrExpr, "1 or 2", SyntaxKind::OR_EXPR)]
#[case(Rule::OrExpr, "1 and 2", SyntaxKind::AND_EXPR)]
#[case(Rule::FlworExpr, "let $x := 1 return $x", SyntaxKind::FLWOR_EXPR)]
#[case(Rule::QuantifiedExpr, "every $x in 1 satisfies $x", SyntaxKind::QUANTIFIED_EXPR)]
#[case(Rule::SwitchExpr, "switch (1) case 1 return 2 default return 3", SyntaxKind::SWITCH_EXPR)]
#[case(Rule::TypeswitchExpr, "typeswitch (1) case xs:integer return 1 default return 2", SyntaxKind::TYPESWITCH_EXPR)]
#[case(Rule::IfExpr, "if (1) then 2 else 3", SyntaxKind::IF_EXPR)]
#[case(Rule::TryCatchExpr, "try { 1 } catch * { 2 }", SyntaxKind::TRY_CATCH_EXPR)]
#[case(Rule::PathExpr, "/a/b", SyntaxKind::PATH_EXPR)]
#[case(Rule::StepExpr, "child::a[1]", SyntaxKind::AXIS_STEP)]
#[case(Rule::StepExpr, "a", SyntaxKind::NAME_TEST)]
#[case(Rule::PostfixExpr, "$m?key", SyntaxKind::POSTFIX_EXPR)]
#[case(Rule::PrimaryExpr, "(1)", SyntaxKind::PARENTHESIZED_EXPR)]
#[case(Rule::PrimaryExpr, "$x", SyntaxKind::VAR_REF)]
#[case(Rule::Predicate, "[1]", SyntaxKind::PREDICATE)]
#[case(Rule::ArgumentList, "(1, 2)", SyntaxKind::ARGUMENT_LIST)]
#[case(Rule::EnclosedExpr, "{ 1 }", SyntaxKind::ENCLOSED_EXPR)]
#[case(Rule::DirectConstructor, "<a/>", SyntaxKind::DIR_ELEM_CONSTRUCTOR)]
#[case(Rule::DirectConstructor, "<!--c-->", SyntaxKind::DIR_COMMENT_CONSTRUCTOR)]
#[case(Rule::ComputedConstructor, "element a { 1 }", SyntaxKind::COMP_ELEM_CONSTRUCTOR)]
#[case(Rule::ComputedConstructor, "text { 1 }", SyntaxKind::COMP_TEXT_CONSTRUCTOR)]
#[case(Rule::SequenceType, "xs:string*", SyntaxKind::SEQUENCE_TYPE)]
#[case(Rule::SequenceType, "xs:string", SyntaxKind::ATOMIC_OR_UNION_TYPE)]
#[case(Rule::SequenceType, "empty-sequence()", SyntaxKind::EMPTY_SEQUENCE_TYPE)]
#[case(Rule::ItemType, "item()", SyntaxKind::ANY_ITEM_TYPE)]
#[case(Rule::SingleType, "xs:integer?", SyntaxKind::SINGLE_TYPE)]
#[case(Rule::KindTest, "element(a)", SyntaxKind::ELEMENT_TEST)]
#[case(Rule::EQName, "a:b", SyntaxKind::QNAME)]
#[case(Rule::EQName, "Q{urn:u}b", SyntaxKind::URI_QUALIFIED_NAME)]
#[case(Rule::EQName, "a", SyntaxKind::NCNAME_REF)]
#[case(Rule::Wildcard, "*:a", SyntaxKind::WILDCARD)]
#[case(Rule::StringLiteral, "'x'", SyntaxKind::STRING_LITERAL)]
#[case(Rule::VarRef, "$x", SyntaxKind::VAR_REF)]
fn test_rule_produces_node(#[case] rule: Rule, #[case] input: &str, #[case] kind: SyntaxKind) {
    let result = parse_rule(rule, input, &Dialect::default());
    assert!(result.is_ok(), "{:?}: {:?}", rule, result.errors());
    assert!(result.fully_consumed());
    assert_eq!(result.node_kind(), Some(kind));
    assert_eq!(result.syntax().text().to_string(), input);
}

#[rstest]
#[case(Rule::UpdatingExpr, "delete node $x", "3.1+update", SyntaxKind::DELETE_EXPR)]
#[case(Rule::UpdatingExpr, "rename node $x as \"y\"", "3.1+update", SyntaxKind::RENAME_EXPR)]
#[case(Rule::Statement, "while (1) { 2 }", "3.0+scripting", SyntaxKind::WHILE_EXPR)]
#[case(Rule::Statement, "exit returning 1", "3.0+scripting", SyntaxKind::EXIT_EXPR)]
fn test_extension_rules(
    #[case] rule: Rule,
    #[case] input: &str,
    #[case] dialect: &str,
    #[case] kind: SyntaxKind,
) {
    let dialect: Dialect = dialect.parse().unwrap();
    let result = parse_rule(rule, input, &dialect);
    assert!(result.is_ok(), "{:?}: {:?}", rule, result.errors());
    assert_eq!(result.node_kind(), Some(kind));
}

#[test]
fn test_several_annotations_are_several_nodes() {
    let result = parse_rule(Rule::Annotations, "%a %b(1)", &Dialect::default());
    assert!(result.is_ok());
    assert_eq!(result.node_kind(), None);
    assert_eq!(result.syntax().children().count(), 2);
}

#[test]
fn test_trailing_input_is_wrapped_once() {
    let result = parse_rule(Rule::Predicate, "[1] [2]", &Dialect::default());
    assert!(!result.fully_consumed());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.syntax().text().to_string(), "[1] [2]");
}
