//! Property tests: every input parses, losslessly, in every dialect

use proptest::prelude::*;
use xqsyntax::{Dialect, SyntaxKind};

use crate::helpers::{parse_in, shape_without};

const DIALECTS: &[&str] = &[
    "1.0",
    "3.0",
    "3.1",
    "3.1+update-3.0",
    "3.0+scripting",
    "marklogic",
    "basex",
];

const VOCABULARY: &[&str] = &[
    "for", "let", "$", "x", "in", ":=", "return", "if", "then", "else", "(", ")", "[", "]", "{",
    "}", ",", ";", "1", "2.5", "+", "-", "*", "/", "//", "=", "or", "and", "map", "array", "?",
    "=>", "!", "|", "||", "a", "b:c", ":", "::", "child", "@", ".", "..", "element", "function",
    "#", "%", "switch", "case", "default", "try", "catch", "declare", "variable", "instance",
    "of", "as", "xs:integer", "delete", "node", "while", "update", "binary", "??", "!!", "?:",
];

fn token_soup() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40)
}

fn any_dialect() -> impl Strategy<Value = &'static str> {
    prop::sample::select(DIALECTS)
}

proptest! {
    #[test]
    fn any_text_round_trips(source in "\\PC{0,60}", dialect in any_dialect()) {
        let parse = parse_in(&source, dialect);
        prop_assert_eq!(parse.syntax().text().to_string(), source);
        prop_assert_eq!(parse.syntax().kind(), SyntaxKind::MODULE);
    }

    #[test]
    fn token_soup_round_trips(tokens in token_soup(), dialect in any_dialect()) {
        let source = tokens.join(" ");
        let parse = parse_in(&source, dialect);
        prop_assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn well_formed_means_no_errors_anywhere(tokens in token_soup(), dialect in any_dialect()) {
        let source = tokens.join(" ");
        let parse = parse_in(&source, dialect);
        let has_error_node = parse
            .syntax()
            .descendants()
            .any(|node| node.kind() == SyntaxKind::ERROR);
        let has_bad_token = parse
            .syntax()
            .descendants_with_tokens()
            .any(|element| element.kind().is_bad_token());
        prop_assert_eq!(
            parse.is_well_formed(),
            parse.errors().is_empty() && !has_error_node && !has_bad_token
        );
    }

    #[test]
    fn whitespace_amount_does_not_change_structure(tokens in token_soup(), dialect in any_dialect()) {
        let narrow = parse_in(&tokens.join(" "), dialect);
        let wide = parse_in(&tokens.join(" \n\t "), dialect);
        // Literal contents such as a braced URI keep their whitespace verbatim
        let literal = [SyntaxKind::STRING_LITERAL_CONTENTS];
        prop_assert_eq!(
            shape_without(&narrow.syntax(), &literal),
            shape_without(&wide.syntax(), &literal)
        );
        prop_assert_eq!(narrow.errors().len(), wide.errors().len());
    }

    #[test]
    fn debug_tree_covers_the_input(source in "\\PC{0,40}") {
        let parse = xqsyntax::parse(&source, &Dialect::default());
        let tree = parse.debug_tree();
        let utf16_len = source.encode_utf16().count();
        let header = format!("XQueryModuleImpl[FILE(0:{utf16_len})]");
        prop_assert!(tree.starts_with(&header), "{}", tree);
    }
}
