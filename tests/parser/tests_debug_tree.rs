//! Exact renderings of small trees in the debug format

use xqsyntax::{Dialect, parse};

fn debug(source: &str) -> String {
    parse(source, &Dialect::default()).debug_tree()
}

#[test]
fn test_empty_input() {
    assert_eq!(debug(""), "XQueryModuleImpl[FILE(0:0)]\n");
}

#[test]
fn test_bad_characters() {
    let expected = "\
XQueryModuleImpl[FILE(0:3)]
   PsiErrorElementImpl[ERROR_ELEMENT(0:1)]('XPST0003: Unexpected token.')
      LeafPsiElement[BAD_CHARACTER(0:1)]('~')
   LeafPsiElement[BAD_CHARACTER(1:2)]('\\uFFFE')
   LeafPsiElement[BAD_CHARACTER(2:3)]('\\uFFFF')
";
    assert_eq!(debug("~\u{FFFE}\u{FFFF}"), expected);
}

#[test]
fn test_invalid_markup_token() {
    let expected = "\
XQueryModuleImpl[FILE(0:2)]
   PsiErrorElementImpl[ERROR_ELEMENT(0:2)]('XPST0003: Unexpected token.')
      LeafPsiElement[XQUERY_INVALID(0:2)]('<!')
";
    assert_eq!(debug("<!"), expected);
}

#[test]
fn test_additive_expression() {
    let expected = "\
XQueryModuleImpl[FILE(0:5)]
   XQueryMainModuleImpl[XQUERY_MAIN_MODULE(0:5)]
      XQueryQueryBodyImpl[XQUERY_QUERY_BODY(0:5)]
         XQueryAdditiveExprImpl[XQUERY_ADDITIVE_EXPR(0:5)]
            LeafPsiElement[XQUERY_INTEGER_LITERAL(0:1)]('1')
            PsiWhiteSpaceImpl[WHITE_SPACE(1:2)](' ')
            LeafPsiElement[XQUERY_PLUS(2:3)]('+')
            PsiWhiteSpaceImpl[WHITE_SPACE(3:4)](' ')
            LeafPsiElement[XQUERY_INTEGER_LITERAL(4:5)]('2')
";
    assert_eq!(debug("1 + 2"), expected);
}

#[test]
fn test_leading_comment_belongs_to_module() {
    let expected = "\
XQueryModuleImpl[FILE(0:8)]
   PsiCommentImpl[XQUERY_COMMENT(0:7)]('(: c :)')
   XQueryMainModuleImpl[XQUERY_MAIN_MODULE(7:8)]
      XQueryQueryBodyImpl[XQUERY_QUERY_BODY(7:8)]
         LeafPsiElement[XQUERY_INTEGER_LITERAL(7:8)]('1')
";
    assert_eq!(debug("(: c :)1"), expected);
}

#[test]
fn test_offsets_count_utf16_units() {
    let expected = "\
XQueryModuleImpl[FILE(0:5)]
   XQueryMainModuleImpl[XQUERY_MAIN_MODULE(0:5)]
      XQueryQueryBodyImpl[XQUERY_QUERY_BODY(0:5)]
         XQueryStringLiteralImpl[XQUERY_STRING_LITERAL(0:5)]
            LeafPsiElement[XQUERY_STRING_LITERAL_START(0:1)]('\"')
            LeafPsiElement[XQUERY_STRING_LITERAL_CONTENTS(1:4)]('\u{e9}\u{1d11e}')
            LeafPsiElement[XQUERY_STRING_LITERAL_END(4:5)]('\"')
";
    assert_eq!(debug("\"\u{e9}\u{1d11e}\""), expected);
}

#[test]
fn test_version_decl_without_semicolon() {
    let expected = "\
XQueryModuleImpl[FILE(0:22)]
   XQueryVersionDeclImpl[XQUERY_VERSION_DECL(0:20)]
      LeafPsiElement[XQUERY_XQUERY_KW(0:6)]('xquery')
      PsiWhiteSpaceImpl[WHITE_SPACE(6:7)](' ')
      LeafPsiElement[XQUERY_VERSION_KW(7:14)]('version')
      PsiWhiteSpaceImpl[WHITE_SPACE(14:15)](' ')
      XQueryStringLiteralImpl[XQUERY_STRING_LITERAL(15:20)]
         LeafPsiElement[XQUERY_STRING_LITERAL_START(15:16)]('\"')
         LeafPsiElement[XQUERY_STRING_LITERAL_CONTENTS(16:19)]('1.0')
         LeafPsiElement[XQUERY_STRING_LITERAL_END(19:20)]('\"')
   PsiWhiteSpaceImpl[WHITE_SPACE(20:21)](' ')
   XQueryMainModuleImpl[XQUERY_MAIN_MODULE(21:22)]
      XQueryQueryBodyImpl[XQUERY_QUERY_BODY(21:22)]
         LeafPsiElement[XQUERY_INTEGER_LITERAL(21:22)]('1')
";
    assert_eq!(debug("xquery version \"1.0\" 1"), expected);
}

#[test]
fn test_line_breaks_are_escaped() {
    let tree = debug("1\n\t,2");
    assert!(
        tree.contains("PsiWhiteSpaceImpl[WHITE_SPACE(1:3)]('\\n\\t')"),
        "{tree}"
    );
}

#[test]
fn test_error_nodes_show_their_own_message() {
    let tree = debug("<a></b>");
    assert!(
        tree.contains("('XQST0118: Closing tag '</b>' does not match open tag '<a>'.')"),
        "{tree}"
    );
}
