//! Typed accessors over parsed modules

use rowan::NodeOrToken;
use xqsyntax::parser::AstNode;
use xqsyntax::parser::ast::{DirElemConstructor, Module, ModulePart, Prolog, QName};
use xqsyntax::{Dialect, SyntaxKind, parse};

use crate::helpers::parse_in;

fn module(source: &str) -> Module {
    Module::cast(parse(source, &Dialect::default()).syntax()).unwrap()
}

fn main_prolog(source: &str) -> Prolog {
    module(source).main_module().unwrap().prolog().unwrap()
}

#[test]
fn test_prolog_declarations_in_order() {
    let prolog = main_prolog(
        r#"declare namespace ex = "http://example.com/ex";
declare default element namespace "http://example.com/default";
declare variable $x := 1;
declare function local:f() { 2 };
$x"#,
    );
    let kinds: Vec<_> = prolog.declarations().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::NAMESPACE_DECL,
            SyntaxKind::DEFAULT_NAMESPACE_DECL,
            SyntaxKind::ANNOTATED_DECL,
            SyntaxKind::ANNOTATED_DECL,
        ]
    );
    assert_eq!(prolog.variables().count(), 1);
    assert_eq!(prolog.functions().count(), 1);
}

#[test]
fn test_namespace_decl() {
    let prolog = main_prolog(r#"declare namespace ex = "http://example.com/ex"; 1"#);
    let decl = prolog.namespace_decls().next().unwrap();
    assert_eq!(decl.prefix().as_deref(), Some("ex"));
    assert_eq!(decl.uri().as_deref(), Some("http://example.com/ex"));
}

#[test]
fn test_module_import_locations() {
    let prolog = main_prolog(
        r#"import module namespace m = "urn:m" at "a.xqy", "b.xqy"; m:f()"#,
    );
    let import = prolog.module_imports().next().unwrap();
    assert_eq!(import.prefix().as_deref(), Some("m"));
    assert_eq!(import.namespace_uri().as_deref(), Some("urn:m"));
    assert_eq!(import.locations(), ["a.xqy", "b.xqy"]);
}

#[test]
fn test_var_decl_parts() {
    let prolog = main_prolog(
        r#"declare variable $a as xs:string external;
declare variable $b := "two";
declare variable $c := 3;
1"#,
    );
    let vars: Vec<_> = prolog.variables().collect();
    assert_eq!(vars.len(), 3);

    assert_eq!(vars[0].name().unwrap().text(), "a");
    assert!(vars[0].is_external());
    assert!(vars[0].type_declaration().is_some());
    assert!(vars[0].value().is_none());

    assert_eq!(vars[1].value().unwrap().kind(), SyntaxKind::STRING_LITERAL);

    match vars[2].value().unwrap() {
        NodeOrToken::Token(token) => assert_eq!(token.text(), "3"),
        NodeOrToken::Node(node) => panic!("expected a literal token, got {:?}", node.kind()),
    }
}

#[test]
fn test_external_function() {
    let prolog = main_prolog("declare function local:f($a) as item()* external; 1");
    let function = prolog.functions().next().unwrap();
    assert!(function.is_external());
    assert!(function.body().is_none());
    assert!(function.return_type().is_some());
    let param = function.params().next().unwrap();
    assert_eq!(param.name().unwrap().text(), "a");
    assert!(param.type_declaration().is_none());
}

#[test]
fn test_annotation_values() {
    let prolog = main_prolog(r#"declare %rest:path("/items", 2) function local:f() { 1 }; 1"#);
    let decl = prolog.annotated_decls().next().unwrap();
    let annotation = decl.annotations().next().unwrap();
    assert_eq!(annotation.name().unwrap().text(), "rest:path");
    assert_eq!(annotation.values(), ["/items", "2"]);
}

#[test]
fn test_compatibility_annotation() {
    let parse = parse_in("declare updating function local:f() { () }; 1", "3.1+update");
    let module = Module::cast(parse.syntax()).unwrap();
    let prolog = module.main_module().unwrap().prolog().unwrap();
    let decl = prolog.annotated_decls().next().unwrap();
    assert_eq!(
        decl.compatibility_annotations().collect::<Vec<_>>(),
        [SyntaxKind::UPDATING_KW]
    );
    assert_eq!(decl.annotations().count(), 0);
}

#[test]
fn test_query_body_expr() {
    let body = module("1").main_module().unwrap().query_body().unwrap();
    assert_eq!(body.expr().unwrap().kind(), SyntaxKind::INTEGER_LITERAL);

    let body = module("1 + 2").main_module().unwrap().query_body().unwrap();
    assert_eq!(body.expr().unwrap().kind(), SyntaxKind::ADDITIVE_EXPR);
}

#[test]
fn test_module_parts_across_transactions() {
    let parse = parse_in("1; module namespace m = \"urn:m\";", "marklogic");
    let module = Module::cast(parse.syntax()).unwrap();
    let parts: Vec<_> = module.parts().collect();
    assert_eq!(parts.len(), 2);
    assert!(matches!(parts[0], ModulePart::Main(_)));
    assert!(matches!(parts[1], ModulePart::Library(_)));
}

#[test]
fn test_qname_forms() {
    let m = module("a:b, c");
    let names: Vec<_> = m.syntax().descendants().filter_map(QName::cast).collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names[0].prefix().as_deref(), Some("a"));
    assert_eq!(names[0].local_name().as_deref(), Some("b"));
    assert_eq!(names[1].prefix(), None);
    assert_eq!(names[1].local_name().as_deref(), Some("c"));
}

#[test]
fn test_accessors_on_malformed_input() {
    let m = module("declare function local:f(");
    let prolog = m.main_module().unwrap().prolog().unwrap();
    let function = prolog.functions().next().unwrap();
    assert_eq!(function.name().unwrap().text(), "local:f");
    assert_eq!(function.params().count(), 0);
    assert!(function.body().is_none());
}

#[test]
fn test_nested_direct_elements() {
    let m = module(r#"<a><b id="x"/><c>{1}</c></a>"#);
    let outer = m
        .syntax()
        .descendants()
        .find_map(DirElemConstructor::cast)
        .unwrap();
    assert!(!outer.is_self_closing());
    let inner: Vec<_> = outer.elements().collect();
    assert_eq!(inner.len(), 2);
    assert_eq!(inner[0].open_name().as_deref(), Some("b"));
    assert_eq!(inner[0].attributes().next().unwrap().name().as_deref(), Some("id"));
    assert_eq!(inner[1].close_name().as_deref(), Some("c"));
}
