//! Indented textual rendering of a syntax tree
//!
//! One line per node or token, indented by three spaces per level:
//!
//! ```text
//! XQueryModuleImpl[FILE(0:3)]
//!    PsiErrorElementImpl[ERROR_ELEMENT(0:1)]('XPST0003: Unexpected token.')
//!       LeafPsiElement[BAD_CHARACTER(0:1)]('~')
//! ```
//!
//! Offsets count UTF-16 code units. Error nodes show their diagnostic, which
//! is matched to the node by preorder position.

use std::fmt::Write;

use rowan::WalkEvent;

use super::errors::SyntaxError;
use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::base::LineIndex;

const INDENT: &str = "   ";

/// Render `root` with the diagnostics of its error nodes
pub fn debug_tree(root: &SyntaxNode, errors: &[SyntaxError]) -> String {
    let text = root.text().to_string();
    let index = LineIndex::new(&text);
    let mut errors = errors.iter();
    let mut out = String::new();
    let mut depth = 0usize;
    for event in root.preorder_with_tokens() {
        match event {
            WalkEvent::Enter(element) => {
                let (start, end) = index.utf16_range(element.text_range());
                for _ in 0..depth {
                    out.push_str(INDENT);
                }
                match element {
                    rowan::NodeOrToken::Node(node) => {
                        let message = match node.kind() {
                            SyntaxKind::ERROR => errors.next().map(ToString::to_string),
                            _ => None,
                        };
                        write_node(&mut out, node.kind(), start, end, message.as_deref());
                    }
                    rowan::NodeOrToken::Token(token) => write_token(&mut out, &token, start, end),
                }
                out.push('\n');
                depth += 1;
            }
            WalkEvent::Leave(_) => depth -= 1,
        }
    }
    out
}

fn write_node(out: &mut String, kind: SyntaxKind, start: u32, end: u32, message: Option<&str>) {
    let _ = match kind {
        SyntaxKind::MODULE => write!(out, "XQueryModuleImpl[FILE({start}:{end})]"),
        SyntaxKind::ERROR => write!(
            out,
            "PsiErrorElementImpl[ERROR_ELEMENT({start}:{end})]('{}')",
            escape(message.unwrap_or_default())
        ),
        _ => {
            let name = kind_name(kind);
            write!(
                out,
                "XQuery{}Impl[XQUERY_{name}({start}:{end})]",
                pascal_case(&name)
            )
        }
    };
}

fn write_token(out: &mut String, token: &SyntaxToken, start: u32, end: u32) {
    let text = escape(token.text());
    let _ = match token.kind() {
        SyntaxKind::WHITESPACE => write!(out, "PsiWhiteSpaceImpl[WHITE_SPACE({start}:{end})]('{text}')"),
        SyntaxKind::COMMENT | SyntaxKind::UNCLOSED_COMMENT => {
            write!(out, "PsiCommentImpl[XQUERY_COMMENT({start}:{end})]('{text}')")
        }
        SyntaxKind::BAD_CHARACTER => write!(out, "LeafPsiElement[BAD_CHARACTER({start}:{end})]('{text}')"),
        kind => write!(
            out,
            "LeafPsiElement[XQUERY_{}({start}:{end})]('{text}')",
            kind_name(kind)
        ),
    };
}

fn kind_name(kind: SyntaxKind) -> String {
    format!("{kind:?}")
}

/// `FLWOR_EXPR` -> `FlworExpr`
fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

/// Escape line breaks, tabs, control characters and noncharacters
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if needs_unicode_escape(c) => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn needs_unicode_escape(c: char) -> bool {
    let cp = c as u32;
    c.is_control() || (0xFDD0..=0xFDEF).contains(&cp) || (cp & 0xFFFE) == 0xFFFE
}
