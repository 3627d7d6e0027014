//! Dialect gating: each extension is reachable only where it is enabled

use rstest::rstest;
use xqsyntax::SyntaxKind;

use crate::helpers::{contains_node, parse_in, shape, top_level_kinds};

#[rstest]
#[case("switch (1) case 1 return 2 default return 3", "3.0", "1.0", SyntaxKind::SWITCH_EXPR)]
#[case("map { \"a\": 1 }", "3.1", "3.0", SyntaxKind::MAP_CONSTRUCTOR)]
#[case("try { 1 } catch * { 2 }", "3.0", "1.0", SyntaxKind::TRY_CATCH_EXPR)]
#[case("try { 1 } catch * { 2 }", "1.0-ml", "1.0", SyntaxKind::TRY_CATCH_EXPR)]
#[case("1 || 2", "3.0", "1.0", SyntaxKind::STRING_CONCAT_EXPR)]
#[case("$a => f()", "3.1", "3.0", SyntaxKind::ARROW_EXPR)]
#[case("[1, 2]", "3.1", "3.0", SyntaxKind::SQUARE_ARRAY_CONSTRUCTOR)]
#[case("delete node $x", "3.1+update", "3.1", SyntaxKind::DELETE_EXPR)]
#[case("$a transform with { () }", "3.1+update-3.0", "3.1+update", SyntaxKind::TRANSFORM_WITH_EXPR)]
#[case("while (1) { 2 }", "3.0+scripting", "3.0", SyntaxKind::WHILE_EXPR)]
#[case("binary { \"00\" }", "marklogic", "3.1", SyntaxKind::COMP_BINARY_CONSTRUCTOR)]
#[case("object-node { \"a\": 1 }", "marklogic-8.0", "marklogic-7.0", SyntaxKind::COMP_OBJECT_NODE_CONSTRUCTOR)]
#[case("$x instance of schema-type()", "marklogic-7.0", "marklogic-6.0", SyntaxKind::SCHEMA_COMPONENT_TEST)]
#[case("1 ?? 2 !! 3", "basex", "basex-9.0", SyntaxKind::TERNARY_IF_EXPR)]
#[case("$a ?: 1", "basex", "basex-9.0", SyntaxKind::ELVIS_EXPR)]
#[case("$x update { () }", "basex", "basex-8.4", SyntaxKind::UPDATE_EXPR)]
#[case("non-deterministic $f()", "basex", "basex-8.3", SyntaxKind::NON_DETERMINISTIC_FUNCTION_CALL)]
#[case("Q{urn:x}a", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("${urn:x}v", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("declare function {urn:x}f() { 1 }; 1", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("declare %{urn:x}a variable $v := 1; $v", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("1 instance of {urn:x}t", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("1 cast as {urn:x}t?", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("@{urn:x}a", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
#[case("child::{urn:x}a", "3.0", "1.0", SyntaxKind::URI_QUALIFIED_NAME)]
fn test_extension_is_gated(
    #[case] source: &str,
    #[case] enabled: &str,
    #[case] disabled: &str,
    #[case] kind: SyntaxKind,
) {
    let on = parse_in(source, enabled);
    assert!(on.is_well_formed(), "{}", on.debug_tree());
    assert!(contains_node(&on, kind), "{}", on.debug_tree());

    let off = parse_in(source, disabled);
    assert!(!contains_node(&off, kind), "{}", off.debug_tree());
    assert_eq!(off.syntax().text().to_string(), source);
}

#[rstest]
#[case("for $x in (1, 2, 3) where $x > 1 order by $x descending return $x")]
#[case("declare variable $v := <a b=\"{1}\">text</a>; $v/@b")]
#[case("typeswitch ($x) case xs:string return 1 default $d return $d")]
#[case("some $x in //item satisfies $x/@id = \"1\"")]
#[case("if ($a) then element e { text { \"t\" } } else ()")]
#[case("-$a instance of xs:integer?")]
#[case("map")]
#[case("array/map")]
#[case("function")]
#[case("try")]
#[case("try/switch")]
#[case("child::function")]
#[case("$map + $array")]
#[case("Q")]
#[case("Q/Q")]
#[case("element Q { 1 }")]
#[case("for $function in $try return $function")]
#[case("declare function local:map($array) { $array }; local:map(1)")]
fn test_newer_versions_keep_older_trees(#[case] source: &str) {
    let v10 = parse_in(source, "1.0");
    assert!(v10.is_well_formed(), "{}", v10.debug_tree());
    let reference = shape(&v10.syntax());
    for version in ["3.0", "3.1"] {
        let newer = parse_in(source, version);
        assert!(newer.is_well_formed(), "{version}: {}", newer.debug_tree());
        assert_eq!(shape(&newer.syntax()), reference, "differs under {version}");
    }
}

#[test]
fn test_q_brace_is_a_name_in_xquery_10() {
    let parse = parse_in("element Q{1}", "1.0");
    assert!(parse.is_well_formed(), "{}", parse.debug_tree());
    assert!(contains_node(&parse, SyntaxKind::COMP_ELEM_CONSTRUCTOR));
    assert!(contains_node(&parse, SyntaxKind::ENCLOSED_EXPR));
    assert!(!contains_node(&parse, SyntaxKind::URI_QUALIFIED_NAME));
}

#[rstest]
#[case("element {\"a\"} { 1 }")]
#[case("attribute {$n} {()}")]
fn test_computed_name_stays_an_expression(#[case] source: &str) {
    let parse = parse_in(source, "3.0");
    assert!(parse.is_well_formed(), "{}", parse.debug_tree());
    assert!(!contains_node(&parse, SyntaxKind::URI_QUALIFIED_NAME));
    let enclosed = parse
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::ENCLOSED_EXPR)
        .count();
    assert_eq!(enclosed, 2);
}

#[test]
fn test_marklogic_transactions() {
    let parse = parse_in("1; 2", "marklogic");
    assert!(parse.is_well_formed(), "{}", parse.debug_tree());
    assert_eq!(
        top_level_kinds(&parse),
        [
            SyntaxKind::MAIN_MODULE,
            SyntaxKind::TRANSACTION_SEPARATOR,
            SyntaxKind::MAIN_MODULE,
        ]
    );
}

#[test]
fn test_semicolon_is_not_a_separator_in_plain_xquery() {
    let parse = parse_in("1; 2", "3.1");
    assert!(!parse.is_well_formed());
    assert!(!contains_node(&parse, SyntaxKind::TRANSACTION_SEPARATOR));
}

#[test]
fn test_scripting_statement_sequence() {
    let parse = parse_in("$i := $i + 1; $i", "3.0+scripting");
    assert!(parse.is_well_formed(), "{}", parse.debug_tree());
    assert!(contains_node(&parse, SyntaxKind::APPLY_EXPR));
    assert!(contains_node(&parse, SyntaxKind::ASSIGNMENT_EXPR));
    assert!(!contains_node(&parse, SyntaxKind::TRANSACTION_SEPARATOR));
}

#[test]
fn test_marklogic_private_function() {
    let parse = parse_in("declare private function local:f() { 1 }; local:f()", "1.0-ml");
    assert!(parse.is_well_formed(), "{}", parse.debug_tree());
    assert!(contains_node(&parse, SyntaxKind::COMPATIBILITY_ANNOTATION));
}

#[rstest]
#[case("1.0", "1.0")]
#[case("3.1+update", "3.1+update")]
#[case("basex-8.5", "basex-8.5")]
#[case("marklogic-9.0+scripting", "marklogic-9.0+scripting")]
fn test_dialect_display_round_trips(#[case] input: &str, #[case] expected: &str) {
    let dialect: xqsyntax::Dialect = input.parse().unwrap();
    assert_eq!(dialect.to_string(), expected);
}

#[rstest]
#[case("4.0")]
#[case("3.1+turbo")]
#[case("basex-x")]
#[case("")]
fn test_bad_dialect_strings(#[case] input: &str) {
    assert!(input.parse::<xqsyntax::Dialect>().is_err());
}
