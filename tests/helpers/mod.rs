#![allow(dead_code)]

use rowan::{NodeOrToken, WalkEvent};
use xqsyntax::{Dialect, Parse, SyntaxKind, SyntaxNode, parse};

/// Parse under a dialect written as e.g. `"3.0+update"` or `"marklogic-8.0"`
pub fn parse_in(source: &str, dialect: &str) -> Parse {
    let dialect: Dialect = dialect.parse().expect("valid dialect string");
    parse(source, &dialect)
}

/// Non-trivia structure of a tree, one kind per line, indented by depth
pub fn shape(node: &SyntaxNode) -> String {
    shape_without(node, &[])
}

/// Like [`shape`], leaving out tokens of the given kinds
pub fn shape_without(node: &SyntaxNode, removed: &[SyntaxKind]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for event in node.preorder_with_tokens() {
        match event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => {
                out.push_str(&"  ".repeat(depth));
                out.push_str(&format!("{:?}\n", node.kind()));
                depth += 1;
            }
            WalkEvent::Enter(NodeOrToken::Token(token)) => {
                if token.kind().is_trivia() || removed.contains(&token.kind()) {
                    continue;
                }
                out.push_str(&"  ".repeat(depth));
                out.push_str(&format!("{:?} {:?}\n", token.kind(), token.text()));
            }
            WalkEvent::Leave(NodeOrToken::Node(_)) => depth -= 1,
            WalkEvent::Leave(NodeOrToken::Token(_)) => {}
        }
    }
    out
}

/// Whether any node in the tree has `kind`
pub fn contains_node(parse: &Parse, kind: SyntaxKind) -> bool {
    parse.syntax().descendants().any(|node| node.kind() == kind)
}

/// Kinds of the nodes directly under the root
pub fn top_level_kinds(parse: &Parse) -> Vec<SyntaxKind> {
    parse.syntax().children().map(|node| node.kind()).collect()
}
