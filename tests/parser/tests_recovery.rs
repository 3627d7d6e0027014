//! Error recovery: absent tokens, error nodes and resynchronization

use rstest::rstest;
use xqsyntax::{Dialect, SyntaxKind, parse};

use crate::helpers::{contains_node, shape, shape_without, top_level_kinds};

// =============================================================================
// Missing mandatory tokens leave only a gap
// =============================================================================

#[rstest]
#[case("if (1) then 2 else 3", "if (1) 2 else 3", SyntaxKind::THEN_KW)]
#[case("if (1) then 2 else 3", "if (1) then 2 3", SyntaxKind::ELSE_KW)]
#[case("for $x in 1 return $x", "for $x 1 return $x", SyntaxKind::IN_KW)]
#[case("let $x := 1 return $x", "let $x 1 return $x", SyntaxKind::COLON_EQ)]
#[case("some $x in (1) satisfies $x", "some $x in (1) $x", SyntaxKind::SATISFIES_KW)]
#[case("declare variable $x := 1; $x", "declare variable $x := 1 $x", SyntaxKind::SEMICOLON)]
#[case("xquery version \"1.0\"; 1", "xquery version \"1.0\" 1", SyntaxKind::SEMICOLON)]
#[case("(1, 2)", "(1, 2", SyntaxKind::R_PAREN)]
#[case("f(1, 2)", "f(1, 2", SyntaxKind::R_PAREN)]
#[case("map { \"a\": 1 }", "map { \"a\" 1 }", SyntaxKind::COLON)]
fn test_missing_token_is_absent(#[case] valid: &str, #[case] broken: &str, #[case] removed: SyntaxKind) {
    let dialect = Dialect::default();
    let valid = parse(valid, &dialect);
    let broken = parse(broken, &dialect);
    assert!(valid.is_well_formed(), "{}", valid.debug_tree());
    assert!(broken.errors().is_empty(), "{}", broken.debug_tree());
    assert_eq!(
        shape_without(&valid.syntax(), &[removed]),
        shape(&broken.syntax())
    );
}

// =============================================================================
// Unexpected tokens
// =============================================================================

#[test]
fn test_first_unexpected_token_is_wrapped() {
    let result = parse("1 ) 2", &Dialect::default());
    assert_eq!(result.errors().len(), 1);
    let error = &result.errors()[0];
    assert_eq!(error.to_string(), "XPST0003: Unexpected token.");
    assert_eq!(u32::from(error.range.start()), 2);
    assert_eq!(u32::from(error.range.end()), 3);
    assert_eq!(result.syntax().text().to_string(), "1 ) 2");
}

#[test]
fn test_only_first_token_of_a_window_is_wrapped() {
    let result = parse("~~~", &Dialect::default());
    let root = result.syntax();
    let errors: Vec<_> = root
        .children()
        .filter(|node| node.kind() == SyntaxKind::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
    let loose: Vec<_> = root
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::BAD_CHARACTER)
        .collect();
    assert_eq!(loose.len(), 2);
    assert!(!result.is_well_formed());
}

#[test]
fn test_outer_closer_ends_inner_construct() {
    // The `]` closes the predicate; the parenthesized expression stays open.
    let result = parse("a[(1]", &Dialect::default());
    assert!(result.errors().is_empty(), "{}", result.debug_tree());
    let predicate = result
        .syntax()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::PREDICATE)
        .unwrap();
    assert_eq!(predicate.text().to_string(), "[(1]");
}

#[test]
fn test_unclosed_string_reports_once() {
    let result = parse("'abc", &Dialect::default());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].message, "Unclosed string literal.");
}

#[test]
fn test_unclosed_comment_is_an_error() {
    let result = parse("1 (: never closed", &Dialect::default());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].message, "Unclosed XQuery comment.");
    assert_eq!(result.syntax().text().to_string(), "1 (: never closed");
}

#[test]
fn test_stray_comment_end() {
    let result = parse("1 :)", &Dialect::default());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(
        result.errors()[0].message,
        "End of comment marker found without a '(:' start marker."
    );
}

#[test]
fn test_unclosed_direct_element() {
    let result = parse("<a>text", &Dialect::default());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].message, "Expected closing tag '</a>'.");
}

#[rstest]
#[case("\"&bogus;\"", "Unknown entity reference.")]
#[case("\"&lt\"", "Incomplete entity reference.")]
#[case("\"&#0;\"", "Invalid XML character reference.")]
fn test_reference_diagnostics(#[case] input: &str, #[case] message: &str) {
    let result = parse(input, &Dialect::default());
    assert_eq!(result.errors().len(), 1, "{}", result.debug_tree());
    assert_eq!(result.errors()[0].message, message);
}

#[test]
fn test_html_entities_allowed_for_marklogic() {
    let dialect: Dialect = "1.0-ml".parse().unwrap();
    let result = parse("\"&nbsp;\"", &dialect);
    assert!(result.is_well_formed(), "{}", result.debug_tree());
}

#[test]
fn test_declared_name_with_spaces() {
    let result = parse("declare function local : f() { 1 }; 1", &Dialect::default());
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].message, "Whitespace is not allowed in QNames.");
}

#[rstest]
#[case("$a : b", SyntaxKind::VAR_REF)]
#[case("declare variable $a : b := 1; 1", SyntaxKind::VAR_DECL)]
#[case("a : b()", SyntaxKind::FUNCTION_CALL)]
#[case("a :b(1)", SyntaxKind::FUNCTION_CALL)]
#[case("element a : b { 1 }", SyntaxKind::COMP_ELEM_CONSTRUCTOR)]
#[case("a : b", SyntaxKind::NAME_TEST)]
#[case("child::a: b", SyntaxKind::NAME_TEST)]
#[case("for $x : y in 1 return 2", SyntaxKind::FOR_BINDING)]
fn test_spaced_qname_is_one_name(#[case] source: &str, #[case] holder: SyntaxKind) {
    let result = parse(source, &Dialect::default());
    assert_eq!(result.errors().len(), 1, "{}", result.debug_tree());
    assert_eq!(result.errors()[0].message, "Whitespace is not allowed in QNames.");
    assert_eq!(top_level_kinds(&result), [SyntaxKind::MAIN_MODULE]);
    let qname = result
        .syntax()
        .descendants()
        .find(|node| node.kind() == SyntaxKind::QNAME)
        .expect("qname node");
    assert_eq!(qname.parent().map(|parent| parent.kind()), Some(holder));
    assert_eq!(result.syntax().text().to_string(), source);
}

#[test]
fn test_spaced_colon_in_map_separates_entry() {
    let dialect: Dialect = "3.1".parse().unwrap();
    let result = parse("map { a : b }", &dialect);
    assert!(result.is_well_formed(), "{}", result.debug_tree());
    assert!(contains_node(&result, SyntaxKind::MAP_CONSTRUCTOR_ENTRY));
    assert!(!contains_node(&result, SyntaxKind::QNAME));
}

#[test]
fn test_deep_nesting_terminates() {
    let source = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || {
            let result = parse(&source, &Dialect::default());
            (result.syntax().text().to_string() == source, result.is_well_formed())
        })
        .unwrap();
    let (lossless, well_formed) = handle.join().unwrap();
    assert!(lossless);
    assert!(!well_formed);
}
