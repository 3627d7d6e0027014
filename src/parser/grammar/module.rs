//! Modules and the prolog
//!
//! ```text
//! Module        = VersionDecl? (LibraryModule | MainModule)
//! MainModule    = Prolog? QueryBody
//! LibraryModule = ModuleDecl Prolog?
//! Prolog        = (Setter | Import | NamespaceDecl | DefaultNamespaceDecl)*
//!                 (AnnotatedDecl | ContextItemDecl | OptionDecl)*
//! ```
//!
//! The prolog loop accepts declarations in any order; ordering is a static
//! rule, not a syntactic one. Where transactions are supported, `;` may
//! separate several complete modules in one source.

use super::*;

/// Parse a whole source into the already open `MODULE` node
pub fn parse_module<P: GrammarParser>(p: &mut P) {
    let mut recovering = false;
    let mut expecting = true;
    loop {
        if p.at_eof() {
            break;
        }
        if at_transaction_separator(p) {
            p.start_node(SyntaxKind::TRANSACTION_SEPARATOR);
            p.bump();
            p.finish_node();
            expecting = true;
            continue;
        }
        let starts = can_start_module_part(p);
        if starts && expecting {
            recovering = !parse_item(p, &mut parse_module_part);
            expecting = false;
            continue;
        }
        match recover(p, &mut recovering, starts) {
            Recovery::Item => {
                recovering = !parse_item(p, &mut parse_module_part);
            }
            Recovery::Consumed => {}
            Recovery::Done => break,
        }
    }
}

fn at_transaction_separator<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::SEMICOLON) && p.dialect().supports_transaction_separator()
}

/// Keywords that start a module part even where they cannot start an expression
const MODULE_PART_STARTS: &[SyntaxKind] = &[
    SyntaxKind::DECLARE_KW,
    SyntaxKind::IMPORT_KW,
    SyntaxKind::MODULE_KW,
    SyntaxKind::XQUERY_KW,
];

fn can_start_module_part<P: GrammarParser>(p: &P) -> bool {
    p.at_any(MODULE_PART_STARTS) || expressions::can_start_expr(p)
}

/// Version declaration and the module that follows it
fn parse_module_part<P: GrammarParser>(p: &mut P) {
    if at_version_decl(p) {
        parse_version_decl(p);
    }
    if at_module_decl(p) {
        parse_library_module(p);
    } else if at_prolog_decl(p) || expressions::can_start_expr(p) {
        parse_main_module(p);
    }
}

// =============================================================================
// Module structure
// =============================================================================

fn at_version_decl<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::XQUERY_KW) && matches!(p.nth(1), SyntaxKind::VERSION_KW | SyntaxKind::ENCODING_KW)
}

/// `xquery (version StringLiteral (encoding StringLiteral)? | encoding StringLiteral) ;`
fn parse_version_decl<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::VERSION_DECL);
    p.push_context(ParseContext::Declaration);
    p.bump();
    if p.eat(SyntaxKind::VERSION_KW) {
        parse_string_literal(p);
    }
    if p.eat(SyntaxKind::ENCODING_KW) {
        parse_string_literal(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.pop_context();
    p.finish_node();
}

fn at_module_decl<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::MODULE_KW) && p.nth(1) == SyntaxKind::NAMESPACE_KW
}

fn parse_library_module<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::LIBRARY_MODULE);
    p.start_node(SyntaxKind::MODULE_DECL);
    p.push_context(ParseContext::Declaration);
    p.bump();
    p.bump();
    parse_ncname(p);
    p.expect(SyntaxKind::EQ);
    parse_uri_literal(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.pop_context();
    p.finish_node();
    parse_prolog(p);
    p.finish_node();
}

fn parse_main_module<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::MAIN_MODULE);
    parse_prolog(p);
    if expressions::can_start_expr(p) {
        p.start_node(SyntaxKind::QUERY_BODY);
        expressions::parse_expr(p);
        p.finish_node();
    }
    p.finish_node();
}

// =============================================================================
// Prolog
// =============================================================================

fn parse_prolog<P: GrammarParser>(p: &mut P) {
    if !at_prolog_decl(p) {
        return;
    }
    p.start_node(SyntaxKind::PROLOG);
    while at_prolog_decl(p) {
        p.push_context(ParseContext::Declaration);
        parse_prolog_decl(p);
        p.pop_context();
    }
    p.finish_node();
}

const ANNOTATED_DECL_STARTS: &[SyntaxKind] = &[
    SyntaxKind::VARIABLE_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::PERCENT,
    SyntaxKind::UPDATING_KW,
    SyntaxKind::SEQUENTIAL_KW,
    SyntaxKind::SIMPLE_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::ASSIGNABLE_KW,
    SyntaxKind::UNASSIGNABLE_KW,
];

fn at_prolog_decl<P: GrammarParser>(p: &P) -> bool {
    match (p.current(), p.nth(1)) {
        (SyntaxKind::DECLARE_KW, next) => matches!(
            next,
            SyntaxKind::DEFAULT_KW
                | SyntaxKind::NAMESPACE_KW
                | SyntaxKind::BOUNDARY_SPACE_KW
                | SyntaxKind::BASE_URI_KW
                | SyntaxKind::CONSTRUCTION_KW
                | SyntaxKind::ORDERING_KW
                | SyntaxKind::COPY_NAMESPACES_KW
                | SyntaxKind::DECIMAL_FORMAT_KW
                | SyntaxKind::CONTEXT_KW
                | SyntaxKind::OPTION_KW
                | SyntaxKind::REVALIDATION_KW
        ) || ANNOTATED_DECL_STARTS.contains(&next),
        (SyntaxKind::IMPORT_KW, SyntaxKind::SCHEMA_KW | SyntaxKind::MODULE_KW) => true,
        (SyntaxKind::IMPORT_KW, SyntaxKind::STYLESHEET_KW) => p.dialect().supports_marklogic_prolog(),
        _ => false,
    }
}

fn parse_prolog_decl<P: GrammarParser>(p: &mut P) {
    match (p.current(), p.nth(1), p.nth(2)) {
        (SyntaxKind::IMPORT_KW, SyntaxKind::SCHEMA_KW, _) => parse_schema_import(p),
        (SyntaxKind::IMPORT_KW, SyntaxKind::MODULE_KW, _) => parse_module_import(p),
        (SyntaxKind::IMPORT_KW, _, _) => parse_stylesheet_import(p),
        (_, SyntaxKind::DEFAULT_KW, SyntaxKind::ELEMENT_KW | SyntaxKind::FUNCTION_KW) => {
            parse_simple_decl(p, SyntaxKind::DEFAULT_NAMESPACE_DECL, |p| {
                p.bump();
                p.bump();
                p.expect(SyntaxKind::NAMESPACE_KW);
                parse_uri_literal(p);
            })
        }
        (_, SyntaxKind::DEFAULT_KW, SyntaxKind::COLLATION_KW) => {
            parse_simple_decl(p, SyntaxKind::DEFAULT_COLLATION_DECL, |p| {
                p.bump();
                p.bump();
                parse_uri_literal(p);
            })
        }
        (_, SyntaxKind::DEFAULT_KW, SyntaxKind::ORDER_KW) => {
            parse_simple_decl(p, SyntaxKind::EMPTY_ORDER_DECL, |p| {
                p.bump();
                p.bump();
                p.expect(SyntaxKind::EMPTY_KW);
                p.eat_any(&[SyntaxKind::GREATEST_KW, SyntaxKind::LEAST_KW]);
            })
        }
        (_, SyntaxKind::DEFAULT_KW, _) | (_, SyntaxKind::DECIMAL_FORMAT_KW, _) => {
            parse_decimal_format_decl(p)
        }
        (_, SyntaxKind::NAMESPACE_KW, _) => parse_simple_decl(p, SyntaxKind::NAMESPACE_DECL, |p| {
            p.bump();
            parse_ncname(p);
            p.expect(SyntaxKind::EQ);
            parse_uri_literal(p);
        }),
        (_, SyntaxKind::BOUNDARY_SPACE_KW, _) => {
            parse_simple_decl(p, SyntaxKind::BOUNDARY_SPACE_DECL, |p| {
                p.bump();
                p.eat_any(&[SyntaxKind::PRESERVE_KW, SyntaxKind::STRIP_KW]);
            })
        }
        (_, SyntaxKind::BASE_URI_KW, _) => parse_simple_decl(p, SyntaxKind::BASE_URI_DECL, |p| {
            p.bump();
            parse_uri_literal(p);
        }),
        (_, SyntaxKind::CONSTRUCTION_KW, _) => {
            parse_simple_decl(p, SyntaxKind::CONSTRUCTION_DECL, |p| {
                p.bump();
                p.eat_any(&[SyntaxKind::PRESERVE_KW, SyntaxKind::STRIP_KW]);
            })
        }
        (_, SyntaxKind::ORDERING_KW, _) => {
            parse_simple_decl(p, SyntaxKind::ORDERING_MODE_DECL, |p| {
                p.bump();
                p.eat_any(&[SyntaxKind::ORDERED_KW, SyntaxKind::UNORDERED_KW]);
            })
        }
        (_, SyntaxKind::COPY_NAMESPACES_KW, _) => {
            parse_simple_decl(p, SyntaxKind::COPY_NAMESPACES_DECL, |p| {
                p.bump();
                p.eat_any(&[SyntaxKind::PRESERVE_KW, SyntaxKind::NO_PRESERVE_KW]);
                p.expect(SyntaxKind::COMMA);
                p.eat_any(&[SyntaxKind::INHERIT_KW, SyntaxKind::NO_INHERIT_KW]);
            })
        }
        (_, SyntaxKind::CONTEXT_KW, _) => parse_simple_decl(p, SyntaxKind::CONTEXT_ITEM_DECL, |p| {
            p.bump();
            p.expect(SyntaxKind::ITEM_KW);
            parse_type_declaration(p);
            parse_initializer(p);
        }),
        (_, SyntaxKind::OPTION_KW, _) => parse_simple_decl(p, SyntaxKind::OPTION_DECL, |p| {
            p.bump();
            parse_declared_name(p);
            parse_string_literal(p);
        }),
        (_, SyntaxKind::REVALIDATION_KW, _) => {
            parse_simple_decl(p, SyntaxKind::REVALIDATION_DECL, |p| {
                p.bump();
                p.eat_any(&[SyntaxKind::STRICT_KW, SyntaxKind::LAX_KW, SyntaxKind::SKIP_KW]);
            })
        }
        _ => parse_annotated_decl(p),
    }
}

/// `declare` followed by `body` and `;`, as one `kind` node
fn parse_simple_decl<P: GrammarParser>(p: &mut P, kind: SyntaxKind, body: impl FnOnce(&mut P)) {
    p.start_node(kind);
    p.bump();
    body(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// `:= ExprSingle`, `external`, or `external := ExprSingle`
fn parse_initializer<P: GrammarParser>(p: &mut P) {
    let external = p.eat(SyntaxKind::EXTERNAL_KW);
    if p.eat(SyntaxKind::COLON_EQ) || (!external && expressions::can_start_expr(p)) {
        parse_operand(p);
    }
}

const DF_PROPERTIES: &[SyntaxKind] = &[
    SyntaxKind::DECIMAL_SEPARATOR_KW,
    SyntaxKind::GROUPING_SEPARATOR_KW,
    SyntaxKind::INFINITY_KW,
    SyntaxKind::MINUS_SIGN_KW,
    SyntaxKind::NAN_KW,
    SyntaxKind::PERCENT_KW,
    SyntaxKind::PER_MILLE_KW,
    SyntaxKind::ZERO_DIGIT_KW,
    SyntaxKind::DIGIT_KW,
    SyntaxKind::PATTERN_SEPARATOR_KW,
    SyntaxKind::EXPONENT_SEPARATOR_KW,
];

/// `declare (decimal-format EQName | default decimal-format) (Property = StringLiteral)*`
fn parse_decimal_format_decl<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::DECIMAL_FORMAT_DECL);
    p.bump();
    if p.eat(SyntaxKind::DEFAULT_KW) {
        p.expect(SyntaxKind::DECIMAL_FORMAT_KW);
    } else {
        p.bump();
        parse_declared_name(p);
    }
    while p.at_any(DF_PROPERTIES) && p.nth(1) == SyntaxKind::EQ {
        p.start_node(SyntaxKind::DF_PROPERTY);
        p.bump();
        p.bump();
        parse_string_literal(p);
        p.finish_node();
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

// =============================================================================
// Imports
// =============================================================================

/// `import schema SchemaPrefix? URILiteral LocationURIs? ;`
fn parse_schema_import<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::SCHEMA_IMPORT);
    p.bump();
    p.bump();
    if p.at(SyntaxKind::NAMESPACE_KW) {
        p.start_node(SyntaxKind::SCHEMA_PREFIX);
        p.bump();
        parse_ncname(p);
        p.expect(SyntaxKind::EQ);
        p.finish_node();
    } else if p.at(SyntaxKind::DEFAULT_KW) {
        p.start_node(SyntaxKind::SCHEMA_PREFIX);
        p.bump();
        p.expect(SyntaxKind::ELEMENT_KW);
        p.expect(SyntaxKind::NAMESPACE_KW);
        p.finish_node();
    }
    parse_uri_literal(p);
    parse_location_uris(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// `import module (namespace NCName =)? URILiteral LocationURIs? ;`
fn parse_module_import<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::MODULE_IMPORT);
    p.bump();
    p.bump();
    if p.eat(SyntaxKind::NAMESPACE_KW) {
        parse_ncname(p);
        p.expect(SyntaxKind::EQ);
    }
    parse_uri_literal(p);
    parse_location_uris(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// MarkLogic `import stylesheet at URILiteral ;`
fn parse_stylesheet_import<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::STYLESHEET_IMPORT);
    p.bump();
    p.bump();
    p.expect(SyntaxKind::AT_KW);
    parse_uri_literal(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// `at URILiteral ("," URILiteral)*`
fn parse_location_uris<P: GrammarParser>(p: &mut P) {
    if !p.at(SyntaxKind::AT_KW) {
        return;
    }
    p.start_node(SyntaxKind::LOCATION_URIS);
    p.bump();
    parse_uri_literal(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_uri_literal(p);
    }
    p.finish_node();
}

// =============================================================================
// Variables and functions
// =============================================================================

const COMPATIBILITY_ANNOTATIONS: &[SyntaxKind] = &[
    SyntaxKind::UPDATING_KW,
    SyntaxKind::SEQUENTIAL_KW,
    SyntaxKind::SIMPLE_KW,
    SyntaxKind::PRIVATE_KW,
    SyntaxKind::ASSIGNABLE_KW,
    SyntaxKind::UNASSIGNABLE_KW,
];

/// `declare Annotation* CompatibilityAnnotation? (VarDecl | FunctionDecl) ;`
fn parse_annotated_decl<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::ANNOTATED_DECL);
    p.bump();
    parse_annotations(p);
    while p.at_any(COMPATIBILITY_ANNOTATIONS) {
        p.start_node(SyntaxKind::COMPATIBILITY_ANNOTATION);
        p.bump();
        p.finish_node();
    }
    match p.current() {
        SyntaxKind::VARIABLE_KW => parse_var_decl(p),
        SyntaxKind::FUNCTION_KW => parse_function_decl(p),
        _ => {}
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// `variable $name TypeDeclaration? (:= ExprSingle | external (:= ExprSingle)?)`
fn parse_var_decl<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::VAR_DECL);
    p.bump();
    parse_var_name(p);
    parse_type_declaration(p);
    parse_initializer(p);
    p.finish_node();
}

/// `function EQName ParamList TypeDeclaration? (FunctionBody | external)`
fn parse_function_decl<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::FUNCTION_DECL);
    p.bump();
    parse_declared_name(p);
    parse_param_list(p);
    parse_type_declaration(p);
    if !p.eat(SyntaxKind::EXTERNAL_KW) && p.at(SyntaxKind::L_BRACE) {
        parse_enclosed_expr(p);
    }
    p.finish_node();
}

/// `% EQName ( ( Literal ("," Literal)* ) )?`
pub fn parse_annotations<P: GrammarParser>(p: &mut P) {
    while p.at(SyntaxKind::PERCENT) {
        p.start_node(SyntaxKind::ANNOTATION);
        p.bump();
        parse_declared_name(p);
        if p.eat(SyntaxKind::L_PAREN) {
            parse_delimited(p, ParseContext::ArgumentList, starts_annotation_value, |p| {
                if p.at(SyntaxKind::STRING_LITERAL_START) {
                    parse_string_literal(p);
                } else {
                    p.bump();
                }
            });
        }
        p.finish_node();
    }
}

fn starts_annotation_value<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::STRING_LITERAL_START) || p.current().is_numeric_literal()
}

/// `( (Param ("," Param)*)? )`
pub fn parse_param_list<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAM_LIST);
    if p.eat(SyntaxKind::L_PAREN) {
        parse_delimited(
            p,
            ParseContext::ParamList,
            |p| p.at(SyntaxKind::DOLLAR),
            |p| {
                p.start_node(SyntaxKind::PARAM);
                parse_var_name(p);
                parse_type_declaration(p);
                p.finish_node();
            },
        );
    }
    p.finish_node();
}
