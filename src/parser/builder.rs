//! Tree builder with rollback
//!
//! Children are kept on a flat stack. Completing a node wraps every child
//! pushed since its checkpoint into one green node, the way rowan's
//! `GreenNodeBuilder` does, so a checkpoint taken before parsing an operand
//! can later become the start of a binary expression. Because nothing is
//! shared until the final node is built, rolling back to a checkpoint is a
//! truncation of the stacks.
//!
//! Error nodes carry their [`SyntaxError`]. Errors are stored in the order
//! their nodes start, so the final list is in preorder.

use rowan::{GreenNode, GreenToken, NodeOrToken, TextRange, TextSize};

use super::errors::SyntaxError;
use super::syntax_kind::SyntaxKind;

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// A position in the child stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    children: usize,
    errors: usize,
    open: usize,
    text_pos: TextSize,
}

#[derive(Debug, Clone)]
struct OpenNode {
    kind: SyntaxKind,
    checkpoint: Checkpoint,
    error: Option<usize>,
}

/// Arena of finished children and open nodes
#[derive(Debug, Default)]
pub struct TreeBuilder {
    children: Vec<(TextSize, GreenElement)>,
    open: Vec<OpenNode>,
    errors: Vec<SyntaxError>,
    text_pos: TextSize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the text consumed so far
    pub fn text_pos(&self) -> TextSize {
        self.text_pos
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            children: self.children.len(),
            errors: self.errors.len(),
            open: self.open.len(),
            text_pos: self.text_pos,
        }
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        let token = GreenToken::new(kind.into(), text);
        self.children.push((self.text_pos, NodeOrToken::Token(token)));
        self.text_pos += TextSize::of(text);
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        let checkpoint = self.checkpoint();
        self.open.push(OpenNode {
            kind,
            checkpoint,
            error: None,
        });
    }

    /// Start a node that adopts every child pushed since `checkpoint`
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        debug_assert!(checkpoint.children <= self.children.len());
        self.open.push(OpenNode {
            kind,
            checkpoint,
            error: None,
        });
    }

    pub fn start_error(&mut self, error: SyntaxError) {
        let checkpoint = self.checkpoint();
        self.start_error_at(checkpoint, error);
    }

    /// Start an error node that adopts every child pushed since `checkpoint`
    ///
    /// Errors of nodes completed after the checkpoint are nested inside the
    /// new node, so inserting before them keeps the preorder.
    pub fn start_error_at(&mut self, checkpoint: Checkpoint, error: SyntaxError) {
        let index = checkpoint.errors.min(self.errors.len());
        self.errors.insert(index, error);
        self.open.push(OpenNode {
            kind: SyntaxKind::ERROR,
            checkpoint,
            error: Some(index),
        });
    }

    pub fn finish_node(&mut self) {
        let Some(node) = self.open.pop() else {
            tracing::warn!("finish_node without an open node");
            return;
        };
        let first = node.checkpoint.children.min(self.children.len());
        let start = self
            .children
            .get(first)
            .map_or(self.text_pos, |(offset, _)| *offset);
        let green = GreenNode::new(
            node.kind.into(),
            self.children.drain(first..).map(|(_, element)| element),
        );
        if let Some(error) = node.error.and_then(|index| self.errors.get_mut(index)) {
            error.range = TextRange::new(start, self.text_pos);
        }
        self.children.push((start, NodeOrToken::Node(green)));
    }

    /// Discard everything built since `checkpoint`
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.children.truncate(checkpoint.children);
        self.errors.truncate(checkpoint.errors);
        self.open.truncate(checkpoint.open);
        self.text_pos = checkpoint.text_pos;
    }

    /// Close any open nodes and return the root with its errors
    pub fn finish(mut self) -> (GreenNode, Vec<SyntaxError>) {
        while !self.open.is_empty() {
            self.finish_node();
        }
        if let [(_, NodeOrToken::Node(node))] = self.children.as_slice() {
            return (node.clone(), self.errors);
        }
        let root = GreenNode::new(
            SyntaxKind::MODULE.into(),
            self.children.drain(..).map(|(_, element)| element),
        );
        (root, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::syntax_kind::SyntaxNode;

    fn build(f: impl FnOnce(&mut TreeBuilder)) -> (SyntaxNode, Vec<SyntaxError>) {
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::MODULE);
        f(&mut builder);
        builder.finish_node();
        let (green, errors) = builder.finish();
        (SyntaxNode::new_root(green), errors)
    }

    #[test]
    fn test_start_node_at_wraps_previous_children() {
        let (root, _) = build(|b| {
            let cp = b.checkpoint();
            b.token(SyntaxKind::INTEGER_LITERAL, "1");
            b.token(SyntaxKind::PLUS, "+");
            b.token(SyntaxKind::INTEGER_LITERAL, "2");
            b.start_node_at(cp, SyntaxKind::ADDITIVE_EXPR);
            b.finish_node();
        });
        let child = root.first_child().map(|n| n.kind());
        assert_eq!(child, Some(SyntaxKind::ADDITIVE_EXPR));
        assert_eq!(root.text().to_string(), "1+2");
    }

    #[test]
    fn test_rollback_discards_nodes_and_errors() {
        let (root, errors) = build(|b| {
            let cp = b.checkpoint();
            b.start_error(SyntaxError::unexpected_token());
            b.token(SyntaxKind::BAD_CHARACTER, "~");
            b.finish_node();
            b.rollback(cp);
            b.token(SyntaxKind::NCNAME, "a");
        });
        assert!(errors.is_empty());
        assert_eq!(root.text().to_string(), "a");
    }

    #[test]
    fn test_error_ranges_and_preorder() {
        let (_, errors) = build(|b| {
            b.token(SyntaxKind::WHITESPACE, " ");
            let cp = b.checkpoint();
            b.start_error(SyntaxError::syntax("Inner."));
            b.token(SyntaxKind::BAD_CHARACTER, "~");
            b.finish_node();
            b.start_error_at(cp, SyntaxError::syntax("Outer."));
            b.finish_node();
            b.start_error(SyntaxError::unclosed_string());
            b.finish_node();
        });
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["Outer.", "Inner.", "Unclosed string literal."]);
        assert_eq!(errors[0].range, TextRange::new(1.into(), 2.into()));
        assert_eq!(errors[2].range, TextRange::empty(2.into()));
    }
}
