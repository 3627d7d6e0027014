//! Tokenizer behaviour seen from outside the parser

use rstest::rstest;
use xqsyntax::keywords::{KEYWORDS, keyword_kind, keyword_text, kind_to_name};
use xqsyntax::parser::tokenize;
use xqsyntax::{SyntaxKind, TextSize};

#[rstest]
#[case("for $x in (1, 2) return $x")]
#[case("declare function local:f($a as xs:string?) { $a }; local:f(\"x\")")]
#[case("\"unterminated &amp")]
#[case("(: open (: nested :)")]
#[case("Q{http://example.com}name ``[text `{ 1 }` more]``")]
#[case("(# ext:pragma contents #) { 1 }")]
#[case("1.5e 2e+ .3 4. ~ \u{1F600}")]
#[case("")]
fn test_tokens_tile_the_input(#[case] source: &str) {
    let mut expected = TextSize::new(0);
    let mut joined = String::new();
    for token in tokenize(source) {
        assert_eq!(token.offset, expected, "gap before {:?}", token);
        assert!(!token.text.is_empty());
        expected = token.end();
        joined.push_str(token.text);
    }
    assert_eq!(joined, source);
}

#[test]
fn test_keyword_tables_agree() {
    for &(text, kind) in KEYWORDS {
        assert_eq!(keyword_kind(text), Some(kind), "{text}");
        assert_eq!(keyword_text(kind), Some(text), "{kind:?}");
        assert!(kind.is_keyword(), "{kind:?}");
    }
    assert_eq!(keyword_kind("notakeyword"), None);
    assert_eq!(keyword_text(SyntaxKind::NCNAME), None);
}

#[rstest]
#[case("object-node", SyntaxKind::OBJECT_NODE_KW)]
#[case("non-deterministic", SyntaxKind::NON_DETERMINISTIC_KW)]
#[case("schema-type", SyntaxKind::SCHEMA_TYPE_KW)]
#[case("preceding-sibling", SyntaxKind::PRECEDING_SIBLING_KW)]
#[case("object", SyntaxKind::NCNAME)]
#[case("For", SyntaxKind::NCNAME)]
fn test_hyphenated_keywords_lex_whole(#[case] source: &str, #[case] kind: SyntaxKind) {
    let tokens: Vec<_> = tokenize(source).collect();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, kind);
}

#[test]
fn test_operators_prefer_longest_match() {
    let kinds: Vec<_> = tokenize("a<<b>=c!!d??e=>f||g")
        .map(|t| t.kind)
        .filter(|k| *k != SyntaxKind::NCNAME)
        .collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::NODE_BEFORE,
            SyntaxKind::GE,
            SyntaxKind::DOUBLE_BANG,
            SyntaxKind::DOUBLE_QUESTION,
            SyntaxKind::ARROW,
            SyntaxKind::PIPE_PIPE,
        ]
    );
}

#[test]
fn test_kind_names_for_diagnostics() {
    assert_eq!(kind_to_name(SyntaxKind::R_PAREN), "')'");
    assert_eq!(kind_to_name(SyntaxKind::EOF), "end of file");
    assert_eq!(kind_to_name(SyntaxKind::NCNAME), "name");
}
