//! Recursive descent parser for XQuery
//!
//! Builds a rowan GreenNode tree from the modal lexer's tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Tokens are pulled lazily because the lexer mode depends on what the
//! grammar has seen. The parser keeps exactly one lookahead token, together
//! with the trivia before it and the lexer states around it. Trivia is
//! flushed into the tree when a node starts or a token is consumed, so
//! leading trivia lands before a node and trailing trivia after it.

use rowan::{GreenNode, TextSize};

use super::builder::{Checkpoint, TreeBuilder};
use super::errors::{ParseContext, SyntaxError};
use super::grammar::{self, GrammarParser};
use super::lexer::{LexMode, Lexer, Token};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::dialect::Dialect;

/// Nesting depth past which the current token is reported as unexpected
pub const MAX_DEPTH: usize = 128;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Diagnostics in error-node preorder
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Check if parsing produced no error nodes
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// No error nodes and no bad-character or invalid leaves
    pub fn is_well_formed(&self) -> bool {
        self.ok()
            && !self
                .syntax()
                .descendants_with_tokens()
                .any(|element| element.kind().is_bad_token())
    }

    /// Render the tree in the indented debug format
    pub fn debug_tree(&self) -> String {
        super::debug_tree::debug_tree(&self.syntax(), &self.errors)
    }
}

/// Parse an XQuery module with the given dialect
///
/// Always returns a tree covering the whole input.
pub fn parse(source: &str, dialect: &Dialect) -> Parse {
    tracing::debug!(len = source.len(), %dialect, "parse start");
    let mut parser = Parser::new(source, *dialect);
    grammar::module::parse_module(&mut parser);
    let parse = parser.finish();
    tracing::debug!(errors = parse.errors.len(), "parse done");
    parse
}

/// The next non-trivia token and the trivia in front of it
#[derive(Debug, Clone)]
struct Lookahead<'a> {
    trivia: Vec<Token<'a>>,
    /// Lexer state after the trivia, before the token
    at_token: Lexer<'a>,
    token: Option<Token<'a>>,
    /// Lexer state after the token
    after: Lexer<'a>,
}

impl<'a> Lookahead<'a> {
    fn scan(lexer: &Lexer<'a>) -> Self {
        let mut lexer = lexer.clone();
        let mut trivia = Vec::new();
        loop {
            let before = lexer.clone();
            match lexer.next_token() {
                Some(token) if token.kind.is_trivia() => trivia.push(token),
                token => {
                    return Self {
                        trivia,
                        at_token: before,
                        token,
                        after: lexer,
                    };
                }
            }
        }
    }
}

/// Saved parser state for trial parses
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    checkpoint: Checkpoint,
    lexer: Lexer<'a>,
    lookahead: Lookahead<'a>,
    contexts: usize,
    depth: usize,
    prev_end: TextSize,
}

/// The parser state
pub(crate) struct Parser<'a> {
    source: &'a str,
    dialect: Dialect,
    lexer: Lexer<'a>,
    lookahead: Lookahead<'a>,
    builder: TreeBuilder,
    contexts: Vec<ParseContext>,
    depth: usize,
    prev_end: TextSize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, dialect: Dialect) -> Self {
        let lexer = Lexer::with_dialect(source, &dialect);
        let lookahead = Lookahead::scan(&lexer);
        let mut builder = TreeBuilder::new();
        builder.start_node(SyntaxKind::MODULE);
        Self {
            source,
            dialect,
            lexer,
            lookahead,
            builder,
            contexts: vec![ParseContext::TopLevel],
            depth: 0,
            prev_end: TextSize::new(0),
        }
    }

    pub(crate) fn finish(mut self) -> Parse {
        // Anything a grammar entry point left behind stays in the tree.
        while self.lookahead.token.is_some() {
            self.bump();
        }
        self.drain_trivia();
        debug_assert_eq!(self.builder.text_pos(), TextSize::of(self.source));
        let (green, errors) = self.builder.finish();
        Parse { green, errors }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn nth_token(&self, n: usize) -> Option<Token<'a>> {
        if n == 0 {
            return self.lookahead.token.clone();
        }
        let mut lexer = self.lookahead.after.clone();
        let mut remaining = n;
        while let Some(token) = lexer.next_token() {
            if token.kind.is_trivia() {
                continue;
            }
            remaining -= 1;
            if remaining == 0 {
                return Some(token);
            }
        }
        None
    }

    fn current_kind(&self) -> SyntaxKind {
        self.lookahead
            .token
            .as_ref()
            .map_or(SyntaxKind::EOF, |token| token.kind)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn drain_trivia(&mut self) {
        if self.lookahead.trivia.is_empty() {
            return;
        }
        let trivia = std::mem::take(&mut self.lookahead.trivia);
        for token in trivia {
            if token.kind == SyntaxKind::UNCLOSED_COMMENT {
                self.builder.start_error(SyntaxError::unclosed_comment());
                self.builder.token(token.kind, token.text);
                self.builder.finish_node();
            } else {
                self.builder.token(token.kind, token.text);
            }
        }
        self.lexer = self.lookahead.at_token.clone();
    }

    fn bump_token(&mut self) {
        let Some(token) = self.lookahead.token.clone() else {
            return;
        };
        self.drain_trivia();
        self.builder.token(token.kind, token.text);
        self.prev_end = token.end();
        self.lexer = self.lookahead.after.clone();
        self.lookahead = Lookahead::scan(&self.lexer);
    }

    fn switch_mode(&mut self, mode: LexMode) {
        self.drain_trivia();
        self.lexer = self.lookahead.at_token.clone();
        self.lexer.push_mode(mode);
        self.lookahead = Lookahead::scan(&self.lexer);
    }
}

// =============================================================================
// Trait implementation - the grammar modules drive the parser through this
// =============================================================================

impl<'a> GrammarParser for Parser<'a> {
    type Snapshot = Snapshot<'a>;

    fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    fn current(&self) -> SyntaxKind {
        self.current_kind()
    }

    fn current_text(&self) -> &str {
        self.lookahead.token.as_ref().map_or("", |token| token.text)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map_or(SyntaxKind::EOF, |token| token.kind)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.nth_token(n).map_or("", |token| token.text)
    }

    fn nth_glued(&self, n: usize) -> bool {
        let Some(token) = self.nth_token(n) else {
            return false;
        };
        let previous_end = match n {
            0 => Some(self.prev_end),
            _ => self.nth_token(n - 1).map(|previous| previous.end()),
        };
        previous_end == Some(token.offset)
    }

    fn offset(&self) -> TextSize {
        self.lookahead
            .token
            .as_ref()
            .map_or(TextSize::of(self.source), |token| token.offset)
    }

    fn bump(&mut self) {
        self.bump_token();
    }

    fn push_lexer_mode(&mut self, mode: LexMode) {
        self.switch_mode(mode);
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind);
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }

    fn snapshot(&mut self) -> Snapshot<'a> {
        self.drain_trivia();
        Snapshot {
            checkpoint: self.builder.checkpoint(),
            lexer: self.lexer.clone(),
            lookahead: self.lookahead.clone(),
            contexts: self.contexts.len(),
            depth: self.depth,
            prev_end: self.prev_end,
        }
    }

    fn rollback(&mut self, snapshot: Snapshot<'a>) {
        tracing::trace!(offset = ?self.offset(), to = ?snapshot.prev_end, "rollback");
        self.builder.rollback(snapshot.checkpoint);
        self.lexer = snapshot.lexer;
        self.lookahead = snapshot.lookahead;
        self.contexts.truncate(snapshot.contexts);
        self.depth = snapshot.depth;
        self.prev_end = snapshot.prev_end;
    }

    fn start_error(&mut self, error: SyntaxError) {
        self.drain_trivia();
        self.builder.start_error(error);
    }

    fn start_error_at(&mut self, checkpoint: Checkpoint, error: SyntaxError) {
        self.builder.start_error_at(checkpoint, error);
    }

    fn push_context(&mut self, context: ParseContext) {
        self.contexts.push(context);
    }

    fn pop_context(&mut self) {
        if self.contexts.len() > 1 {
            self.contexts.pop();
        }
    }

    fn contexts(&self) -> &[ParseContext] {
        &self.contexts
    }

    fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            tracing::debug!(offset = ?self.offset(), "nesting limit reached");
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
