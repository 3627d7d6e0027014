//! Keyword tables
//!
//! Every XQuery keyword is also a valid NCName. The lexer produces the keyword
//! kind and the grammar decides, per position, whether it acts as a keyword or
//! as a name.

use super::syntax_kind::SyntaxKind;

macro_rules! keywords {
    ($($text:literal => $kind:ident),* $(,)?) => {
        /// All keywords with their source text
        pub const KEYWORDS: &[(&str, SyntaxKind)] = &[$(($text, SyntaxKind::$kind)),*];

        /// Map an NCName to its keyword kind, if it is one
        pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
            match text {
                $($text => Some(SyntaxKind::$kind),)*
                _ => None,
            }
        }

        /// Source text of a keyword kind
        pub fn keyword_text(kind: SyntaxKind) -> Option<&'static str> {
            match kind {
                $(SyntaxKind::$kind => Some($text),)*
                _ => None,
            }
        }
    };
}

keywords! {
    "after" => AFTER_KW,
    "allowing" => ALLOWING_KW,
    "ancestor" => ANCESTOR_KW,
    "ancestor-or-self" => ANCESTOR_OR_SELF_KW,
    "and" => AND_KW,
    "array" => ARRAY_KW,
    "array-node" => ARRAY_NODE_KW,
    "as" => AS_KW,
    "ascending" => ASCENDING_KW,
    "assignable" => ASSIGNABLE_KW,
    "at" => AT_KW,
    "attribute" => ATTRIBUTE_KW,
    "attribute-decl" => ATTRIBUTE_DECL_KW,
    "base-uri" => BASE_URI_KW,
    "before" => BEFORE_KW,
    "binary" => BINARY_KW,
    "block" => BLOCK_KW,
    "boolean-node" => BOOLEAN_NODE_KW,
    "boundary-space" => BOUNDARY_SPACE_KW,
    "break" => BREAK_KW,
    "by" => BY_KW,
    "case" => CASE_KW,
    "cast" => CAST_KW,
    "castable" => CASTABLE_KW,
    "catch" => CATCH_KW,
    "child" => CHILD_KW,
    "collation" => COLLATION_KW,
    "comment" => COMMENT_KW,
    "complex-type" => COMPLEX_TYPE_KW,
    "construction" => CONSTRUCTION_KW,
    "context" => CONTEXT_KW,
    "continue" => CONTINUE_KW,
    "copy" => COPY_KW,
    "copy-namespaces" => COPY_NAMESPACES_KW,
    "count" => COUNT_KW,
    "decimal-format" => DECIMAL_FORMAT_KW,
    "decimal-separator" => DECIMAL_SEPARATOR_KW,
    "declare" => DECLARE_KW,
    "default" => DEFAULT_KW,
    "delete" => DELETE_KW,
    "descendant" => DESCENDANT_KW,
    "descendant-or-self" => DESCENDANT_OR_SELF_KW,
    "descending" => DESCENDING_KW,
    "digit" => DIGIT_KW,
    "div" => DIV_KW,
    "document" => DOCUMENT_KW,
    "document-node" => DOCUMENT_NODE_KW,
    "element" => ELEMENT_KW,
    "element-decl" => ELEMENT_DECL_KW,
    "else" => ELSE_KW,
    "empty" => EMPTY_KW,
    "empty-sequence" => EMPTY_SEQUENCE_KW,
    "encoding" => ENCODING_KW,
    "end" => END_KW,
    "eq" => EQ_KW,
    "every" => EVERY_KW,
    "except" => EXCEPT_KW,
    "exit" => EXIT_KW,
    "exponent-separator" => EXPONENT_SEPARATOR_KW,
    "external" => EXTERNAL_KW,
    "first" => FIRST_KW,
    "following" => FOLLOWING_KW,
    "following-sibling" => FOLLOWING_SIBLING_KW,
    "for" => FOR_KW,
    "function" => FUNCTION_KW,
    "ge" => GE_KW,
    "greatest" => GREATEST_KW,
    "group" => GROUP_KW,
    "grouping-separator" => GROUPING_SEPARATOR_KW,
    "gt" => GT_KW,
    "idiv" => IDIV_KW,
    "if" => IF_KW,
    "import" => IMPORT_KW,
    "in" => IN_KW,
    "infinity" => INFINITY_KW,
    "inherit" => INHERIT_KW,
    "insert" => INSERT_KW,
    "instance" => INSTANCE_KW,
    "intersect" => INTERSECT_KW,
    "into" => INTO_KW,
    "invoke" => INVOKE_KW,
    "is" => IS_KW,
    "item" => ITEM_KW,
    "last" => LAST_KW,
    "lax" => LAX_KW,
    "le" => LE_KW,
    "least" => LEAST_KW,
    "let" => LET_KW,
    "loop" => LOOP_KW,
    "lt" => LT_KW,
    "map" => MAP_KW,
    "minus-sign" => MINUS_SIGN_KW,
    "mod" => MOD_KW,
    "model-group" => MODEL_GROUP_KW,
    "modify" => MODIFY_KW,
    "module" => MODULE_KW,
    "namespace" => NAMESPACE_KW,
    "namespace-node" => NAMESPACE_NODE_KW,
    "NaN" => NAN_KW,
    "ne" => NE_KW,
    "next" => NEXT_KW,
    "no-inherit" => NO_INHERIT_KW,
    "no-preserve" => NO_PRESERVE_KW,
    "node" => NODE_KW,
    "nodes" => NODES_KW,
    "non-deterministic" => NON_DETERMINISTIC_KW,
    "null-node" => NULL_NODE_KW,
    "number-node" => NUMBER_NODE_KW,
    "object-node" => OBJECT_NODE_KW,
    "of" => OF_KW,
    "only" => ONLY_KW,
    "option" => OPTION_KW,
    "or" => OR_KW,
    "order" => ORDER_KW,
    "ordered" => ORDERED_KW,
    "ordering" => ORDERING_KW,
    "parent" => PARENT_KW,
    "pattern-separator" => PATTERN_SEPARATOR_KW,
    "per-mille" => PER_MILLE_KW,
    "percent" => PERCENT_KW,
    "preceding" => PRECEDING_KW,
    "preceding-sibling" => PRECEDING_SIBLING_KW,
    "preserve" => PRESERVE_KW,
    "previous" => PREVIOUS_KW,
    "private" => PRIVATE_KW,
    "processing-instruction" => PROCESSING_INSTRUCTION_KW,
    "rename" => RENAME_KW,
    "replace" => REPLACE_KW,
    "return" => RETURN_KW,
    "returning" => RETURNING_KW,
    "revalidation" => REVALIDATION_KW,
    "satisfies" => SATISFIES_KW,
    "schema" => SCHEMA_KW,
    "schema-attribute" => SCHEMA_ATTRIBUTE_KW,
    "schema-component" => SCHEMA_COMPONENT_KW,
    "schema-element" => SCHEMA_ELEMENT_KW,
    "schema-facet" => SCHEMA_FACET_KW,
    "schema-particle" => SCHEMA_PARTICLE_KW,
    "schema-root" => SCHEMA_ROOT_KW,
    "schema-type" => SCHEMA_TYPE_KW,
    "schema-wildcard" => SCHEMA_WILDCARD_KW,
    "self" => SELF_KW,
    "sequential" => SEQUENTIAL_KW,
    "simple" => SIMPLE_KW,
    "simple-type" => SIMPLE_TYPE_KW,
    "skip" => SKIP_KW,
    "sliding" => SLIDING_KW,
    "some" => SOME_KW,
    "stable" => STABLE_KW,
    "start" => START_KW,
    "strict" => STRICT_KW,
    "strip" => STRIP_KW,
    "stylesheet" => STYLESHEET_KW,
    "switch" => SWITCH_KW,
    "text" => TEXT_KW,
    "then" => THEN_KW,
    "to" => TO_KW,
    "transform" => TRANSFORM_KW,
    "treat" => TREAT_KW,
    "try" => TRY_KW,
    "tumbling" => TUMBLING_KW,
    "type" => TYPE_KW,
    "typeswitch" => TYPESWITCH_KW,
    "unassignable" => UNASSIGNABLE_KW,
    "union" => UNION_KW,
    "unordered" => UNORDERED_KW,
    "update" => UPDATE_KW,
    "updating" => UPDATING_KW,
    "validate" => VALIDATE_KW,
    "value" => VALUE_KW,
    "variable" => VARIABLE_KW,
    "version" => VERSION_KW,
    "when" => WHEN_KW,
    "where" => WHERE_KW,
    "while" => WHILE_KW,
    "window" => WINDOW_KW,
    "with" => WITH_KW,
    "xquery" => XQUERY_KW,
    "zero-digit" => ZERO_DIGIT_KW,
}

/// Human-readable name of a token kind, used in diagnostics and logs
pub fn kind_to_name(kind: SyntaxKind) -> &'static str {
    use SyntaxKind::*;
    if let Some(text) = keyword_quoted(kind) {
        return text;
    }
    match kind {
        WHITESPACE => "whitespace",
        COMMENT | UNCLOSED_COMMENT => "comment",
        BAD_CHARACTER => "bad character",
        INVALID => "invalid token",
        EOF => "end of file",
        INTEGER_LITERAL | DECIMAL_LITERAL | DOUBLE_LITERAL | PARTIAL_DOUBLE_LITERAL_EXPONENT => {
            "number"
        }
        STRING_LITERAL_START | STRING_LITERAL_END => "quote",
        NCNAME => "name",
        L_PAREN => "'('",
        R_PAREN => "')'",
        L_BRACE => "'{'",
        R_BRACE => "'}'",
        L_BRACKET => "'['",
        R_BRACKET => "']'",
        COMMA => "','",
        SEMICOLON => "';'",
        COLON => "':'",
        COLON_COLON => "'::'",
        COLON_EQ => "':='",
        DOT => "'.'",
        DOT_DOT => "'..'",
        DOLLAR => "'$'",
        AT => "'@'",
        HASH => "'#'",
        PERCENT => "'%'",
        QUESTION => "'?'",
        STAR => "'*'",
        PLUS => "'+'",
        MINUS => "'-'",
        SLASH => "'/'",
        SLASH_SLASH => "'//'",
        PIPE => "'|'",
        PIPE_PIPE => "'||'",
        EQ | XML_EQUAL => "'='",
        NE => "'!='",
        LT | XML_TAG_OPEN => "'<'",
        LE => "'<='",
        GT | XML_TAG_CLOSE => "'>'",
        GE => "'>='",
        NODE_BEFORE => "'<<'",
        NODE_AFTER => "'>>'",
        BANG => "'!'",
        ARROW => "'=>'",
        ELVIS => "'?:'",
        DOUBLE_QUESTION => "'??'",
        DOUBLE_BANG => "'!!'",
        COMMENT_END_TAG => "':)'",
        PRAGMA_START => "'(#'",
        PRAGMA_END => "'#)'",
        XML_END_TAG_OPEN => "'</'",
        XML_EMPTY_TAG_CLOSE => "'/>'",
        XML_COMMENT_START => "'<!--'",
        XML_COMMENT_END => "'-->'",
        PI_START => "'<?'",
        PI_END => "'?>'",
        CDATA_SECTION_START => "'<![CDATA['",
        CDATA_SECTION_END => "']]>'",
        STRING_CONSTRUCTOR_START => "'``['",
        STRING_CONSTRUCTOR_END => "']``'",
        STRING_INTERPOLATION_OPEN => "'`{'",
        STRING_INTERPOLATION_CLOSE => "'}`'",
        BRACED_URI_LITERAL_START => "'Q{'",
        BRACED_URI_LITERAL_END => "'}'",
        _ => "token",
    }
}

fn keyword_quoted(kind: SyntaxKind) -> Option<&'static str> {
    macro_rules! quoted {
        ($($kind:ident => $text:literal),* $(,)?) => {
            match kind {
                $(SyntaxKind::$kind => Some($text),)*
                _ => None,
            }
        };
    }
    if !kind.is_keyword() {
        return None;
    }
    // Only the keywords that appear in parser diagnostics need a quoted form.
    quoted! {
        AS_KW => "'as'",
        AT_KW => "'at'",
        BY_KW => "'by'",
        CASE_KW => "'case'",
        CATCH_KW => "'catch'",
        DEFAULT_KW => "'default'",
        ELSE_KW => "'else'",
        END_KW => "'end'",
        EXTERNAL_KW => "'external'",
        FOR_KW => "'for'",
        FUNCTION_KW => "'function'",
        IN_KW => "'in'",
        LET_KW => "'let'",
        MODIFY_KW => "'modify'",
        NAMESPACE_KW => "'namespace'",
        NODE_KW => "'node'",
        OF_KW => "'of'",
        RETURN_KW => "'return'",
        RETURNING_KW => "'returning'",
        SATISFIES_KW => "'satisfies'",
        START_KW => "'start'",
        THEN_KW => "'then'",
        VERSION_KW => "'version'",
        WHEN_KW => "'when'",
        WITH_KW => "'with'",
    }
    .or(Some("keyword"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_round_trips() {
        for (text, kind) in KEYWORDS {
            assert_eq!(keyword_kind(text), Some(*kind));
            assert_eq!(keyword_text(*kind), Some(*text));
            assert!(kind.is_keyword(), "{text} is not in the keyword range");
        }
    }

    #[test]
    fn non_keywords() {
        assert_eq!(keyword_kind("forx"), None);
        assert_eq!(keyword_kind("FOR"), None);
        assert_eq!(keyword_kind("nan"), None);
        assert_eq!(keyword_kind("NaN"), Some(SyntaxKind::NAN_KW));
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_to_name(SyntaxKind::RETURN_KW), "'return'");
        assert_eq!(kind_to_name(SyntaxKind::WINDOW_KW), "keyword");
        assert_eq!(kind_to_name(SyntaxKind::R_PAREN), "')'");
        assert_eq!(kind_to_name(SyntaxKind::NCNAME), "name");
    }
}
