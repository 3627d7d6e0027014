//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for XQuery syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Accessors return `None` for parts the parser left absent, so they work on
//! malformed trees too.

use super::grammar::character_reference_value;
use super::syntax_kind::SyntaxKind;
use super::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helpers
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<N: AstNode>(node: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
    node.children().filter_map(N::cast)
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

// ============================================================================
// Modules
// ============================================================================

ast_node!(Module, MODULE);

impl Module {
    /// The first version declaration
    pub fn version_decl(&self) -> Option<VersionDecl> {
        child(&self.0)
    }

    /// Main and library modules, in source order
    pub fn parts(&self) -> impl Iterator<Item = ModulePart> + use<> {
        children(&self.0)
    }

    pub fn main_module(&self) -> Option<MainModule> {
        child(&self.0)
    }

    pub fn library_module(&self) -> Option<LibraryModule> {
        child(&self.0)
    }
}

/// A main or library module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModulePart {
    Main(MainModule),
    Library(LibraryModule),
}

impl AstNode for ModulePart {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::MAIN_MODULE | SyntaxKind::LIBRARY_MODULE)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::MAIN_MODULE => Some(Self::Main(MainModule(node))),
            SyntaxKind::LIBRARY_MODULE => Some(Self::Library(LibraryModule(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Main(n) => n.syntax(),
            Self::Library(n) => n.syntax(),
        }
    }
}

ast_node!(VersionDecl, VERSION_DECL);

impl VersionDecl {
    /// The literal after `version`
    pub fn version(&self) -> Option<String> {
        self.literal_after(SyntaxKind::VERSION_KW)
    }

    /// The literal after `encoding`
    pub fn encoding(&self) -> Option<String> {
        self.literal_after(SyntaxKind::ENCODING_KW)
    }

    fn literal_after(&self, keyword: SyntaxKind) -> Option<String> {
        let mut seen = false;
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == keyword => seen = true,
                rowan::NodeOrToken::Node(n) if seen => return StringLiteral::cast(n).map(|s| s.value()),
                _ => {}
            }
        }
        None
    }
}

ast_node!(MainModule, MAIN_MODULE);

impl MainModule {
    pub fn prolog(&self) -> Option<Prolog> {
        child(&self.0)
    }

    pub fn query_body(&self) -> Option<QueryBody> {
        child(&self.0)
    }
}

ast_node!(LibraryModule, LIBRARY_MODULE);

impl LibraryModule {
    pub fn module_decl(&self) -> Option<ModuleDecl> {
        child(&self.0)
    }

    pub fn prolog(&self) -> Option<Prolog> {
        child(&self.0)
    }
}

ast_node!(ModuleDecl, MODULE_DECL);

impl ModuleDecl {
    pub fn prefix(&self) -> Option<String> {
        child::<QName>(&self.0).map(|n| n.text())
    }

    pub fn namespace_uri(&self) -> Option<String> {
        child::<StringLiteral>(&self.0).map(|s| s.value())
    }
}

ast_node!(QueryBody, QUERY_BODY);

impl QueryBody {
    /// The body's expression; a lone literal or name token is an element too
    pub fn expr(&self) -> Option<SyntaxElement> {
        self.0
            .children_with_tokens()
            .find(|e| !e.kind().is_trivia())
    }
}

// ============================================================================
// Prolog
// ============================================================================

ast_node!(Prolog, PROLOG);

impl Prolog {
    /// Every declaration and import, in source order
    pub fn declarations(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|n| n.kind() != SyntaxKind::ERROR)
    }

    pub fn namespace_decls(&self) -> impl Iterator<Item = NamespaceDecl> + use<> {
        children(&self.0)
    }

    pub fn module_imports(&self) -> impl Iterator<Item = ModuleImport> + use<> {
        children(&self.0)
    }

    pub fn annotated_decls(&self) -> impl Iterator<Item = AnnotatedDecl> + use<> {
        children(&self.0)
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDecl> + use<> {
        self.annotated_decls().filter_map(|d| d.function_decl())
    }

    pub fn variables(&self) -> impl Iterator<Item = VarDecl> + use<> {
        self.annotated_decls().filter_map(|d| d.var_decl())
    }
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    pub fn prefix(&self) -> Option<String> {
        child::<QName>(&self.0).map(|n| n.text())
    }

    pub fn uri(&self) -> Option<String> {
        child::<StringLiteral>(&self.0).map(|s| s.value())
    }
}

ast_node!(ModuleImport, MODULE_IMPORT);

impl ModuleImport {
    pub fn prefix(&self) -> Option<String> {
        child::<QName>(&self.0).map(|n| n.text())
    }

    pub fn namespace_uri(&self) -> Option<String> {
        child::<StringLiteral>(&self.0).map(|s| s.value())
    }

    /// URIs after `at`
    pub fn locations(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::LOCATION_URIS)
            .flat_map(|n| children::<StringLiteral>(&n))
            .map(|s| s.value())
            .collect()
    }
}

ast_node!(AnnotatedDecl, ANNOTATED_DECL);

impl AnnotatedDecl {
    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + use<> {
        children(&self.0)
    }

    /// `updating`, `sequential`, `private` and the like
    pub fn compatibility_annotations(&self) -> impl Iterator<Item = SyntaxKind> + use<> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::COMPATIBILITY_ANNOTATION)
            .filter_map(|n| tokens(&n).next())
            .map(|t| t.kind())
    }

    pub fn var_decl(&self) -> Option<VarDecl> {
        child(&self.0)
    }

    pub fn function_decl(&self) -> Option<FunctionDecl> {
        child(&self.0)
    }
}

ast_node!(Annotation, ANNOTATION);

impl Annotation {
    pub fn name(&self) -> Option<QName> {
        child(&self.0)
    }

    pub fn values(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| match e {
                rowan::NodeOrToken::Node(n) => StringLiteral::cast(n).map(|s| s.value()),
                rowan::NodeOrToken::Token(t) if t.kind().is_numeric_literal() => {
                    Some(t.text().to_string())
                }
                _ => None,
            })
            .collect()
    }
}

ast_node!(VarDecl, VAR_DECL);

impl VarDecl {
    pub fn name(&self) -> Option<QName> {
        child(&self.0)
    }

    pub fn type_declaration(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::TYPE_DECLARATION)
    }

    pub fn is_external(&self) -> bool {
        has_token(&self.0, SyntaxKind::EXTERNAL_KW)
    }

    /// The initializing expression, if any
    pub fn value(&self) -> Option<SyntaxElement> {
        self.0
            .children_with_tokens()
            .skip_while(|e| !QName::can_cast(e.kind()))
            .skip(1)
            .find(|e| {
                !e.kind().is_trivia()
                    && !matches!(
                        e.kind(),
                        SyntaxKind::TYPE_DECLARATION | SyntaxKind::EXTERNAL_KW | SyntaxKind::COLON_EQ
                    )
            })
    }
}

ast_node!(FunctionDecl, FUNCTION_DECL);

impl FunctionDecl {
    pub fn name(&self) -> Option<QName> {
        child(&self.0)
    }

    pub fn params(&self) -> impl Iterator<Item = Param> + use<> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::PARAM_LIST)
            .flat_map(|n| children::<Param>(&n).collect::<Vec<_>>())
    }

    /// Annotations on the enclosing declaration
    pub fn annotations(&self) -> Vec<Annotation> {
        self.0
            .parent()
            .and_then(AnnotatedDecl::cast)
            .map(|d| d.annotations().collect())
            .unwrap_or_default()
    }

    pub fn return_type(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::TYPE_DECLARATION)
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::ENCLOSED_EXPR)
    }

    pub fn is_external(&self) -> bool {
        has_token(&self.0, SyntaxKind::EXTERNAL_KW)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn name(&self) -> Option<QName> {
        child(&self.0)
    }

    pub fn type_declaration(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::TYPE_DECLARATION)
    }
}

// ============================================================================
// Names and literals
// ============================================================================

/// An NCName, prefixed QName or URI-qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName(SyntaxNode);

impl AstNode for QName {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::NCNAME_REF | SyntaxKind::QNAME | SyntaxKind::URI_QUALIFIED_NAME
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl QName {
    pub fn prefix(&self) -> Option<String> {
        if self.0.kind() != SyntaxKind::QNAME {
            return None;
        }
        tokens(&self.0).next().map(|t| t.text().to_string())
    }

    pub fn local_name(&self) -> Option<String> {
        tokens(&self.0)
            .filter(|t| t.kind() != SyntaxKind::COLON)
            .last()
            .map(|t| t.text().to_string())
    }

    /// Namespace URI of a `Q{uri}local` name
    pub fn uri(&self) -> Option<String> {
        let literal = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::BRACED_URI_LITERAL)?;
        Some(decode_literal(&literal))
    }

    /// The name as written, without whitespace or comments
    pub fn text(&self) -> String {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .collect()
    }
}

ast_node!(StringLiteral, STRING_LITERAL);

impl StringLiteral {
    /// The literal's value with quotes removed and escapes and references
    /// decoded
    pub fn value(&self) -> String {
        decode_literal(&self.0)
    }
}

/// Decode the contents of a string or braced URI literal
fn decode_literal(node: &SyntaxNode) -> String {
    let mut value = String::new();
    for token in node.descendants_with_tokens().filter_map(|e| e.into_token()) {
        let text = token.text();
        match token.kind() {
            SyntaxKind::STRING_LITERAL_START
            | SyntaxKind::STRING_LITERAL_END
            | SyntaxKind::BRACED_URI_LITERAL_START
            | SyntaxKind::BRACED_URI_LITERAL_END => {}
            SyntaxKind::ESCAPED_CHARACTER => value.push_str(&text[..1]),
            SyntaxKind::PREDEFINED_ENTITY_REFERENCE => value.push_str(predefined_entity(text)),
            SyntaxKind::CHARACTER_REFERENCE => {
                match character_reference_value(text).and_then(char::from_u32) {
                    Some(c) => value.push(c),
                    None => value.push_str(text),
                }
            }
            _ => value.push_str(text),
        }
    }
    value
}

fn predefined_entity(text: &str) -> &str {
    match text {
        "&lt;" => "<",
        "&gt;" => ">",
        "&amp;" => "&",
        "&quot;" => "\"",
        "&apos;" => "'",
        other => other,
    }
}

// ============================================================================
// Direct constructors
// ============================================================================

ast_node!(DirElemConstructor, DIR_ELEM_CONSTRUCTOR);

impl DirElemConstructor {
    /// Name in the start tag
    pub fn open_name(&self) -> Option<String> {
        child::<QName>(&self.0).map(|n| n.text())
    }

    /// Name in the end tag, also when it does not match the start tag
    pub fn close_name(&self) -> Option<String> {
        let mut in_end_tag = false;
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::XML_END_TAG_OPEN => {
                    in_end_tag = true;
                }
                rowan::NodeOrToken::Node(n) if in_end_tag => {
                    return QName::cast(n.clone())
                        .or_else(|| child::<QName>(&n))
                        .map(|name| name.text());
                }
                _ => {}
            }
        }
        None
    }

    pub fn is_self_closing(&self) -> bool {
        has_token(&self.0, SyntaxKind::XML_EMPTY_TAG_CLOSE)
    }

    pub fn attributes(&self) -> impl Iterator<Item = DirAttribute> + use<> {
        children(&self.0)
    }

    /// Nested element constructors
    pub fn elements(&self) -> impl Iterator<Item = DirElemConstructor> + use<> {
        children(&self.0)
    }
}

ast_node!(DirAttribute, DIR_ATTRIBUTE);

impl DirAttribute {
    pub fn name(&self) -> Option<String> {
        child::<QName>(&self.0).map(|n| n.text())
    }

    /// The value between the quotes, as written
    pub fn raw_value(&self) -> Option<String> {
        let value = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::DIR_ATTRIBUTE_VALUE)?;
        let text = value.text().to_string();
        let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
        Some(inner.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dialect;
    use crate::parser::parse;

    fn module(source: &str) -> Module {
        let parse = parse(source, &Dialect::default());
        Module::cast(parse.syntax()).unwrap()
    }

    #[test]
    fn test_version_decl_values() {
        let m = module(r#"xquery version "3.1" encoding "UTF-8"; 1"#);
        let decl = m.version_decl().unwrap();
        assert_eq!(decl.version().as_deref(), Some("3.1"));
        assert_eq!(decl.encoding().as_deref(), Some("UTF-8"));
    }

    #[test]
    fn test_library_module() {
        let m = module(r#"module namespace ex = "http://example.com";"#);
        let lib = m.library_module().unwrap();
        let decl = lib.module_decl().unwrap();
        assert_eq!(decl.prefix().as_deref(), Some("ex"));
        assert_eq!(decl.namespace_uri().as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_function_decl() {
        let m = module("declare %private function local:f($a as xs:int, $b) { $a }; 1");
        let prolog = m.main_module().unwrap().prolog().unwrap();
        let f = prolog.functions().next().unwrap();
        let name = f.name().unwrap();
        assert_eq!(name.prefix().as_deref(), Some("local"));
        assert_eq!(name.local_name().as_deref(), Some("f"));
        assert_eq!(f.params().count(), 2);
        assert_eq!(f.annotations().len(), 1);
        assert!(f.body().is_some());
        assert!(!f.is_external());
    }

    #[test]
    fn test_string_literal_value() {
        let m = module(r#""a""b&amp;&#65;""#);
        let literal = m
            .syntax()
            .descendants()
            .find_map(StringLiteral::cast)
            .unwrap();
        assert_eq!(literal.value(), "a\"b&A");
    }

    #[test]
    fn test_uri_qualified_name() {
        let m = module("Q{http://example.com}f()");
        let name = m.syntax().descendants().find_map(QName::cast).unwrap();
        assert_eq!(name.uri().as_deref(), Some("http://example.com"));
        assert_eq!(name.local_name().as_deref(), Some("f"));
        assert_eq!(name.prefix(), None);
    }

    #[test]
    fn test_dir_elem_names() {
        let m = module(r#"<a x="1"><b/></c>"#);
        let elem = m
            .syntax()
            .descendants()
            .find_map(DirElemConstructor::cast)
            .unwrap();
        assert_eq!(elem.open_name().as_deref(), Some("a"));
        assert_eq!(elem.close_name().as_deref(), Some("c"));
        assert_eq!(elem.attributes().next().unwrap().raw_value().as_deref(), Some("1"));
        assert!(elem.elements().next().unwrap().is_self_closing());
    }
}
