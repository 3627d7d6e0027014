//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all node and token kinds in the XQuery syntax tree,
//! covering XQuery 1.0/3.0/3.1, the Update Facility, Scripting and the
//! MarkLogic and BaseX vendor extensions.

/// All syntax kinds (tokens and nodes) in XQuery
///
/// Tokens are leaves (names, keywords, literals, punctuation, XML text).
/// Nodes are composite (declarations, expressions, constructors, types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,          // (: ... :)
    UNCLOSED_COMMENT, // (: ... <EOF>

    // =========================================================================
    // ANOMALIES
    // =========================================================================
    BAD_CHARACTER,
    INVALID, // <!
    EOF,

    // =========================================================================
    // LITERALS
    // =========================================================================
    INTEGER_LITERAL,                  // 42
    DECIMAL_LITERAL,                  // 4.2
    DOUBLE_LITERAL,                   // 4.2e1
    PARTIAL_DOUBLE_LITERAL_EXPONENT,  // 4.2e
    STRING_LITERAL_START,             // " or '
    STRING_LITERAL_CONTENTS,
    STRING_LITERAL_END,
    ESCAPED_CHARACTER,                // "" or '' inside a literal
    PREDEFINED_ENTITY_REFERENCE,      // &lt;
    CHARACTER_REFERENCE,              // &#60; &#x3C;
    PARTIAL_ENTITY_REFERENCE,         // &lt  &#60  &
    EMPTY_ENTITY_REFERENCE,           // &;  &#;  &#x;
    BRACED_URI_LITERAL_START,         // Q{ or {
    BRACED_URI_LITERAL_END,           // }
    STRING_CONSTRUCTOR_START,         // ``[
    STRING_CONSTRUCTOR_CONTENTS,
    STRING_CONSTRUCTOR_END,           // ]``
    STRING_INTERPOLATION_OPEN,        // `{
    STRING_INTERPOLATION_CLOSE,       // }`

    // =========================================================================
    // NAMES
    // =========================================================================
    NCNAME,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,         // (
    R_PAREN,         // )
    L_BRACE,         // {
    R_BRACE,         // }
    L_BRACKET,       // [
    R_BRACKET,       // ]
    COMMA,           // ,
    SEMICOLON,       // ;
    COLON,           // :
    COLON_COLON,     // ::
    COLON_EQ,        // :=
    DOT,             // .
    DOT_DOT,         // ..
    DOLLAR,          // $
    AT,              // @
    HASH,            // #
    PERCENT,         // %
    QUESTION,        // ?
    STAR,            // *
    PLUS,            // +
    MINUS,           // -
    SLASH,           // /
    SLASH_SLASH,     // //
    PIPE,            // |
    PIPE_PIPE,       // ||
    EQ,              // =
    NE,              // !=
    LT,              // <
    LE,              // <=
    GT,              // >
    GE,              // >=
    NODE_BEFORE,     // <<
    NODE_AFTER,      // >>
    BANG,            // !
    ARROW,           // =>
    ELVIS,           // ?:
    DOUBLE_QUESTION, // ??
    DOUBLE_BANG,     // !!
    COMMENT_END_TAG, // :) without an opening (:
    PRAGMA_START,    // (#
    PRAGMA_CONTENTS,
    PRAGMA_END,      // #)

    // =========================================================================
    // DIRECT XML CONSTRUCTORS
    // =========================================================================
    XML_TAG_OPEN,            // <
    XML_END_TAG_OPEN,        // </
    XML_TAG_CLOSE,           // >
    XML_EMPTY_TAG_CLOSE,     // />
    XML_EQUAL,               // = between attribute name and value
    XML_ATTRIBUTE_VALUE_START,
    XML_ATTRIBUTE_VALUE_CONTENTS,
    XML_ATTRIBUTE_VALUE_END,
    XML_ELEMENT_CONTENTS,
    ESCAPED_BRACE,           // {{ or }}
    XML_COMMENT_START,       // <!--
    XML_COMMENT_CONTENTS,
    XML_COMMENT_END,         // -->
    PI_START,                // <?
    PI_CONTENTS,
    PI_END,                  // ?>
    CDATA_SECTION_START,     // <![CDATA[
    CDATA_SECTION_CONTENTS,
    CDATA_SECTION_END,       // ]]>

    // =========================================================================
    // KEYWORDS (XQuery, Update Facility, Scripting, MarkLogic, BaseX)
    // =========================================================================
    AFTER_KW,
    ALLOWING_KW,
    ANCESTOR_KW,
    ANCESTOR_OR_SELF_KW,
    AND_KW,
    ARRAY_KW,
    ARRAY_NODE_KW,
    AS_KW,
    ASCENDING_KW,
    ASSIGNABLE_KW,
    AT_KW,
    ATTRIBUTE_KW,
    ATTRIBUTE_DECL_KW,
    BASE_URI_KW,
    BEFORE_KW,
    BINARY_KW,
    BLOCK_KW,
    BOOLEAN_NODE_KW,
    BOUNDARY_SPACE_KW,
    BREAK_KW,
    BY_KW,
    CASE_KW,
    CAST_KW,
    CASTABLE_KW,
    CATCH_KW,
    CHILD_KW,
    COLLATION_KW,
    COMMENT_KW,
    COMPLEX_TYPE_KW,
    CONSTRUCTION_KW,
    CONTEXT_KW,
    CONTINUE_KW,
    COPY_KW,
    COPY_NAMESPACES_KW,
    COUNT_KW,
    DECIMAL_FORMAT_KW,
    DECIMAL_SEPARATOR_KW,
    DECLARE_KW,
    DEFAULT_KW,
    DELETE_KW,
    DESCENDANT_KW,
    DESCENDANT_OR_SELF_KW,
    DESCENDING_KW,
    DIGIT_KW,
    DIV_KW,
    DOCUMENT_KW,
    DOCUMENT_NODE_KW,
    ELEMENT_KW,
    ELEMENT_DECL_KW,
    ELSE_KW,
    EMPTY_KW,
    EMPTY_SEQUENCE_KW,
    ENCODING_KW,
    END_KW,
    EQ_KW,
    EVERY_KW,
    EXCEPT_KW,
    EXIT_KW,
    EXPONENT_SEPARATOR_KW,
    EXTERNAL_KW,
    FIRST_KW,
    FOLLOWING_KW,
    FOLLOWING_SIBLING_KW,
    FOR_KW,
    FUNCTION_KW,
    GE_KW,
    GREATEST_KW,
    GROUP_KW,
    GROUPING_SEPARATOR_KW,
    GT_KW,
    IDIV_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    INFINITY_KW,
    INHERIT_KW,
    INSERT_KW,
    INSTANCE_KW,
    INTERSECT_KW,
    INTO_KW,
    INVOKE_KW,
    IS_KW,
    ITEM_KW,
    LAST_KW,
    LAX_KW,
    LE_KW,
    LEAST_KW,
    LET_KW,
    LOOP_KW,
    LT_KW,
    MAP_KW,
    MINUS_SIGN_KW,
    MOD_KW,
    MODEL_GROUP_KW,
    MODIFY_KW,
    MODULE_KW,
    NAMESPACE_KW,
    NAMESPACE_NODE_KW,
    NAN_KW,
    NE_KW,
    NEXT_KW,
    NO_INHERIT_KW,
    NO_PRESERVE_KW,
    NODE_KW,
    NODES_KW,
    NON_DETERMINISTIC_KW,
    NULL_NODE_KW,
    NUMBER_NODE_KW,
    OBJECT_NODE_KW,
    OF_KW,
    ONLY_KW,
    OPTION_KW,
    OR_KW,
    ORDER_KW,
    ORDERED_KW,
    ORDERING_KW,
    PARENT_KW,
    PATTERN_SEPARATOR_KW,
    PER_MILLE_KW,
    PERCENT_KW,
    PRECEDING_KW,
    PRECEDING_SIBLING_KW,
    PRESERVE_KW,
    PREVIOUS_KW,
    PRIVATE_KW,
    PROCESSING_INSTRUCTION_KW,
    RENAME_KW,
    REPLACE_KW,
    RETURN_KW,
    RETURNING_KW,
    REVALIDATION_KW,
    SATISFIES_KW,
    SCHEMA_KW,
    SCHEMA_ATTRIBUTE_KW,
    SCHEMA_COMPONENT_KW,
    SCHEMA_ELEMENT_KW,
    SCHEMA_FACET_KW,
    SCHEMA_PARTICLE_KW,
    SCHEMA_ROOT_KW,
    SCHEMA_TYPE_KW,
    SCHEMA_WILDCARD_KW,
    SELF_KW,
    SEQUENTIAL_KW,
    SIMPLE_KW,
    SIMPLE_TYPE_KW,
    SKIP_KW,
    SLIDING_KW,
    SOME_KW,
    STABLE_KW,
    START_KW,
    STRICT_KW,
    STRIP_KW,
    STYLESHEET_KW,
    SWITCH_KW,
    TEXT_KW,
    THEN_KW,
    TO_KW,
    TRANSFORM_KW,
    TREAT_KW,
    TRY_KW,
    TUMBLING_KW,
    TYPE_KW,
    TYPESWITCH_KW,
    UNASSIGNABLE_KW,
    UNION_KW,
    UNORDERED_KW,
    UPDATE_KW,
    UPDATING_KW,
    VALIDATE_KW,
    VALUE_KW,
    VARIABLE_KW,
    VERSION_KW,
    WHEN_KW,
    WHERE_KW,
    WHILE_KW,
    WINDOW_KW,
    WITH_KW,
    XQUERY_KW,
    ZERO_DIGIT_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    MODULE,
    VERSION_DECL,
    MAIN_MODULE,
    LIBRARY_MODULE,
    MODULE_DECL,
    TRANSACTION_SEPARATOR,
    PROLOG,
    QUERY_BODY,

    // Prolog declarations
    DEFAULT_NAMESPACE_DECL,
    NAMESPACE_DECL,
    BOUNDARY_SPACE_DECL,
    DEFAULT_COLLATION_DECL,
    BASE_URI_DECL,
    CONSTRUCTION_DECL,
    ORDERING_MODE_DECL,
    EMPTY_ORDER_DECL,
    COPY_NAMESPACES_DECL,
    DECIMAL_FORMAT_DECL,
    DF_PROPERTY,
    REVALIDATION_DECL,
    SCHEMA_IMPORT,
    SCHEMA_PREFIX,
    MODULE_IMPORT,
    STYLESHEET_IMPORT,
    LOCATION_URIS,
    CONTEXT_ITEM_DECL,
    ANNOTATED_DECL,
    ANNOTATION,
    COMPATIBILITY_ANNOTATION,
    VAR_DECL,
    FUNCTION_DECL,
    PARAM_LIST,
    PARAM,
    OPTION_DECL,

    // Names
    NCNAME_REF,
    QNAME,
    URI_QUALIFIED_NAME,
    BRACED_URI_LITERAL,
    WILDCARD,

    // Expressions
    EXPR,
    ENCLOSED_EXPR,
    FLWOR_EXPR,
    FOR_CLAUSE,
    FOR_BINDING,
    LET_CLAUSE,
    LET_BINDING,
    ALLOWING_EMPTY,
    POSITIONAL_VAR,
    TUMBLING_WINDOW_CLAUSE,
    SLIDING_WINDOW_CLAUSE,
    WINDOW_START_CONDITION,
    WINDOW_END_CONDITION,
    WINDOW_VARS,
    CURRENT_ITEM,
    PREVIOUS_ITEM,
    NEXT_ITEM,
    WHERE_CLAUSE,
    GROUP_BY_CLAUSE,
    GROUPING_SPEC,
    ORDER_BY_CLAUSE,
    ORDER_SPEC,
    ORDER_MODIFIER,
    COUNT_CLAUSE,
    RETURN_CLAUSE,
    QUANTIFIED_EXPR,
    QUANTIFIED_BINDING,
    SWITCH_EXPR,
    SWITCH_CASE_CLAUSE,
    SWITCH_DEFAULT_CLAUSE,
    TYPESWITCH_EXPR,
    CASE_CLAUSE,
    DEFAULT_CASE_CLAUSE,
    SEQUENCE_TYPE_UNION,
    IF_EXPR,
    TRY_CATCH_EXPR,
    TRY_CLAUSE,
    CATCH_CLAUSE,
    CATCH_ERROR_LIST,
    OR_EXPR,
    AND_EXPR,
    COMPARISON_EXPR,
    STRING_CONCAT_EXPR,
    RANGE_EXPR,
    ADDITIVE_EXPR,
    MULTIPLICATIVE_EXPR,
    UNION_EXPR,
    INTERSECT_EXCEPT_EXPR,
    INSTANCEOF_EXPR,
    TREAT_EXPR,
    CASTABLE_EXPR,
    CAST_EXPR,
    ARROW_EXPR,
    UNARY_EXPR,
    SIMPLE_MAP_EXPR,
    VALIDATE_EXPR,
    EXTENSION_EXPR,
    PRAGMA,
    PATH_EXPR,
    AXIS_STEP,
    FORWARD_AXIS,
    REVERSE_AXIS,
    ABBREV_FORWARD_STEP,
    ABBREV_REVERSE_STEP,
    NAME_TEST,
    PREDICATE,
    POSTFIX_EXPR,
    ARGUMENT_LIST,
    ARGUMENT_PLACEHOLDER,
    LOOKUP,
    UNARY_LOOKUP,
    PARENTHESIZED_EXPR,
    CONTEXT_ITEM_EXPR,
    STRING_LITERAL,
    VAR_REF,
    FUNCTION_CALL,
    NAMED_FUNCTION_REF,
    INLINE_FUNCTION_EXPR,
    ORDERED_EXPR,
    UNORDERED_EXPR,
    MAP_CONSTRUCTOR,
    MAP_CONSTRUCTOR_ENTRY,
    SQUARE_ARRAY_CONSTRUCTOR,
    CURLY_ARRAY_CONSTRUCTOR,
    STRING_CONSTRUCTOR,
    STRING_INTERPOLATION,

    // Direct and computed constructors
    DIR_ELEM_CONSTRUCTOR,
    DIR_ATTRIBUTE,
    DIR_ATTRIBUTE_VALUE,
    DIR_COMMENT_CONSTRUCTOR,
    DIR_PI_CONSTRUCTOR,
    CDATA_SECTION,
    COMP_DOC_CONSTRUCTOR,
    COMP_ELEM_CONSTRUCTOR,
    COMP_ATTR_CONSTRUCTOR,
    COMP_NAMESPACE_CONSTRUCTOR,
    COMP_TEXT_CONSTRUCTOR,
    COMP_COMMENT_CONSTRUCTOR,
    COMP_PI_CONSTRUCTOR,
    COMP_BINARY_CONSTRUCTOR,
    COMP_OBJECT_NODE_CONSTRUCTOR,
    COMP_ARRAY_NODE_CONSTRUCTOR,
    COMP_NUMBER_NODE_CONSTRUCTOR,
    COMP_BOOLEAN_NODE_CONSTRUCTOR,
    COMP_NULL_NODE_CONSTRUCTOR,

    // Types
    TYPE_DECLARATION,
    SEQUENCE_TYPE,
    EMPTY_SEQUENCE_TYPE,
    SINGLE_TYPE,
    ATOMIC_OR_UNION_TYPE,
    ANY_ITEM_TYPE,
    PARENTHESIZED_ITEM_TYPE,
    ANY_KIND_TEST,
    DOCUMENT_TEST,
    TEXT_TEST,
    COMMENT_TEST,
    NAMESPACE_NODE_TEST,
    PI_TEST,
    ATTRIBUTE_TEST,
    SCHEMA_ATTRIBUTE_TEST,
    ELEMENT_TEST,
    SCHEMA_ELEMENT_TEST,
    ANY_FUNCTION_TEST,
    TYPED_FUNCTION_TEST,
    ANY_MAP_TEST,
    TYPED_MAP_TEST,
    ANY_ARRAY_TEST,
    TYPED_ARRAY_TEST,
    BINARY_TEST,
    JSON_NODE_TEST,
    SCHEMA_COMPONENT_TEST,

    // Update Facility
    INSERT_EXPR,
    INSERT_TARGET,
    DELETE_EXPR,
    REPLACE_EXPR,
    RENAME_EXPR,
    TRANSFORM_EXPR,
    COPY_BINDING,
    TRANSFORM_WITH_EXPR,
    UPDATING_FUNCTION_CALL,

    // Scripting
    BLOCK_EXPR,
    BLOCK_VAR_DECL,
    ASSIGNMENT_EXPR,
    WHILE_EXPR,
    EXIT_EXPR,
    BREAK_EXPR,
    CONTINUE_EXPR,
    APPLY_EXPR,

    // BaseX
    UPDATE_EXPR,
    TERNARY_IF_EXPR,
    ELVIS_EXPR,
    NON_DETERMINISTIC_FUNCTION_CALL,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT | Self::UNCLOSED_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AFTER_KW as u16) && (self as u16) <= (Self::ZERO_DIGIT_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::PRAGMA_END as u16)
    }

    /// Check if this is a numeric literal
    pub fn is_numeric_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER_LITERAL
                | Self::DECIMAL_LITERAL
                | Self::DOUBLE_LITERAL
                | Self::PARTIAL_DOUBLE_LITERAL_EXPONENT
        )
    }

    /// Tokens that make a tree ill-formed even outside an error node
    pub fn is_bad_token(self) -> bool {
        matches!(self, Self::BAD_CHARACTER | Self::INVALID)
    }

    /// Tokens produced by the lexer (as opposed to composite nodes)
    pub fn is_token(self) -> bool {
        (self as u16) < (Self::MODULE as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XQueryLanguage {}

impl rowan::Language for XQueryLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<XQueryLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<XQueryLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<XQueryLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<XQueryLanguage>;
