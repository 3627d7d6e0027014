//! Keywords are only reserved where the grammar needs them

use rstest::rstest;
use xqsyntax::{Dialect, SyntaxKind, parse};

use crate::helpers::{contains_node, parse_in};

#[rstest]
#[case("for")]
#[case("return")]
#[case("if")]
#[case("declare")]
#[case("xquery")]
#[case("element")]
fn test_lone_keyword_is_a_name_test(#[case] source: &str) {
    let result = parse(source, &Dialect::default());
    assert!(result.is_well_formed(), "{}", result.debug_tree());
    let name = result
        .syntax()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::NAME_TEST)
        .unwrap();
    assert_eq!(name.text().to_string(), source);
}

#[test]
fn test_operator_keyword_between_names() {
    let result = parse("div div div", &Dialect::default());
    assert!(result.is_well_formed(), "{}", result.debug_tree());
    let expr = result
        .syntax()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::MULTIPLICATIVE_EXPR)
        .unwrap();
    let names = expr
        .children()
        .filter(|node| node.kind() == SyntaxKind::NAME_TEST)
        .count();
    assert_eq!(names, 2);
}

#[rstest]
#[case("child/return/for")]
#[case("$for + $return")]
#[case("let $let := 1 return $let")]
#[case("<for if=\"1\"/>")]
#[case("element return { 1 }")]
fn test_keywords_in_name_positions(#[case] source: &str) {
    let result = parse(source, &Dialect::default());
    assert!(result.is_well_formed(), "{}", result.debug_tree());
}

#[test]
fn test_keyword_named_function() {
    let result = parse(
        "declare function local:for($if) { $if }; local:for(1)",
        &Dialect::default(),
    );
    assert!(result.is_well_formed(), "{}", result.debug_tree());
    assert!(contains_node(&result, SyntaxKind::FUNCTION_DECL));
    assert!(contains_node(&result, SyntaxKind::FUNCTION_CALL));
}

#[test]
fn test_switch_without_cases_is_a_call() {
    let result = parse_in("switch(1)", "3.1");
    assert!(result.is_well_formed(), "{}", result.debug_tree());
    assert!(contains_node(&result, SyntaxKind::FUNCTION_CALL));
    assert!(!contains_node(&result, SyntaxKind::SWITCH_EXPR));
}

#[rstest]
#[case("map", "3.0")]
#[case("binary", "3.1")]
#[case("while", "3.1")]
#[case("update", "basex-8.4")]
fn test_extension_keyword_is_a_name_elsewhere(#[case] source: &str, #[case] dialect: &str) {
    let result = parse_in(source, dialect);
    assert!(result.is_well_formed(), "{}", result.debug_tree());
    assert!(contains_node(&result, SyntaxKind::NAME_TEST));
}
