//! Modal lexer for XQuery
//!
//! Expression text is tokenized with logos. The XML-like and string
//! sub-languages (string literals, braced URIs, direct constructors, comments,
//! processing instructions, CDATA, pragmas and string constructors) are
//! scanned by hand, driven by a stack of [`LexMode`]s.
//!
//! The lexer switches modes itself for every self-delimiting construct. The
//! context-dependent switches, a `<` that starts a direct element
//! constructor and a `{` that starts a bare braced URI, are requested by the
//! parser through [`Lexer::push_mode`]. The lexer is `Clone`, so a copy is a
//! checkpoint.
//!
//! `Q{` only opens a braced URI where URI-qualified names exist; XQuery 1.0
//! reads it as the name `Q` followed by `{`.

use super::syntax_kind::SyntaxKind;
use crate::dialect::Dialect;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Sub-lexing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexMode {
    /// XQuery expression text (the initial mode, and inside `{ }`)
    Expr,
    /// Expression inside a string constructor interpolation `` `{ ... }` ``
    Interpolation,
    /// Contents of a `"` string literal
    QuotString,
    /// Contents of a `'` string literal
    AposString,
    /// A `{` opening a braced URI without the `Q` prefix
    BracedUriStart,
    /// Contents of a braced URI literal
    BracedUri,
    /// Contents of a ``` ``[ ... ]`` ``` string constructor
    StringConstructor,
    /// Pragma name after `(#`
    PragmaName { seen_name: bool },
    /// Pragma contents up to `#)`
    PragmaContents,
    /// Inside a direct element start tag
    StartTag,
    /// Attribute value delimited by `"`
    AttrQuot,
    /// Attribute value delimited by `'`
    AttrApos,
    /// Direct element content
    ElemContent,
    /// Inside a direct element end tag
    EndTag,
    /// Direct comment constructor contents
    XmlComment,
    /// Processing instruction target
    PiTarget,
    /// Processing instruction contents
    PiContents,
    /// CDATA section contents
    Cdata,
}

/// Restartable, modal lexer
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    modes: Vec<LexMode>,
    uri_qualified_names: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            modes: vec![LexMode::Expr],
            uri_qualified_names: true,
        }
    }

    /// A lexer that only reads `Q{` as a braced URI where `dialect` has
    /// URI-qualified names
    pub fn with_dialect(source: &'a str, dialect: &Dialect) -> Self {
        Self {
            uri_qualified_names: dialect.supports_xquery30(),
            ..Self::new(source)
        }
    }

    /// Byte offset of the next token
    pub fn offset(&self) -> TextSize {
        TextSize::new(self.offset as u32)
    }

    /// The active mode
    pub fn mode(&self) -> LexMode {
        self.modes.last().copied().unwrap_or(LexMode::Expr)
    }

    /// Enter a mode chosen by the parser
    pub fn push_mode(&mut self, mode: LexMode) {
        tracing::trace!(?mode, offset = self.offset, "push lexer mode");
        self.modes.push(mode);
    }

    /// Text following the next token start
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Lex the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        if rest.is_empty() {
            return None;
        }
        let (kind, len) = match self.mode() {
            LexMode::Expr | LexMode::Interpolation => self.lex_expr(rest),
            LexMode::QuotString => self.lex_string(rest, '"'),
            LexMode::AposString => self.lex_string(rest, '\''),
            LexMode::BracedUriStart => self.lex_braced_uri_start(rest),
            LexMode::BracedUri => self.lex_braced_uri(rest),
            LexMode::StringConstructor => self.lex_string_constructor(rest),
            LexMode::PragmaName { seen_name } => self.lex_pragma_name(rest, seen_name),
            LexMode::PragmaContents => self.lex_pragma_contents(rest),
            LexMode::StartTag => self.lex_start_tag(rest),
            LexMode::AttrQuot => self.lex_attribute_value(rest, '"'),
            LexMode::AttrApos => self.lex_attribute_value(rest, '\''),
            LexMode::ElemContent => self.lex_element_content(rest),
            LexMode::EndTag => self.lex_end_tag(rest),
            LexMode::XmlComment => self.lex_until(rest, "-->", SyntaxKind::XML_COMMENT_CONTENTS, SyntaxKind::XML_COMMENT_END),
            LexMode::PiTarget => self.lex_pi_target(rest),
            LexMode::PiContents => self.lex_until(rest, "?>", SyntaxKind::PI_CONTENTS, SyntaxKind::PI_END),
            LexMode::Cdata => self.lex_until(rest, "]]>", SyntaxKind::CDATA_SECTION_CONTENTS, SyntaxKind::CDATA_SECTION_END),
        };
        debug_assert!(len > 0, "lexer must always make progress");
        let len = len.max(1).min(rest.len());
        let text = &rest[..len];
        let offset = TextSize::new(self.offset as u32);
        self.offset += len;
        Some(Token { kind, text, offset })
    }

    fn push(&mut self, mode: LexMode) {
        self.modes.push(mode);
    }

    fn pop(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    fn replace(&mut self, mode: LexMode) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
        self.modes.push(mode);
    }

    // =========================================================================
    // Expression mode
    // =========================================================================

    fn lex_expr(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("(:") {
            return scan_comment(rest);
        }
        let mut inner = ExprToken::lexer(rest);
        let token = match inner.next() {
            Some(Ok(token)) => token,
            _ => return bad_character(rest),
        };
        let len = inner.span().end;
        let interpolation = self.mode() == LexMode::Interpolation;
        match token {
            ExprToken::Name => {
                let kind = super::keywords::keyword_kind(&rest[..len]).unwrap_or(SyntaxKind::NCNAME);
                (kind, len)
            }
            ExprToken::Quot => {
                self.push(LexMode::QuotString);
                (SyntaxKind::STRING_LITERAL_START, len)
            }
            ExprToken::Apos => {
                self.push(LexMode::AposString);
                (SyntaxKind::STRING_LITERAL_START, len)
            }
            ExprToken::BracedUriStart if !self.uri_qualified_names => (SyntaxKind::NCNAME, 1),
            ExprToken::BracedUriStart => {
                self.push(LexMode::BracedUri);
                (SyntaxKind::BRACED_URI_LITERAL_START, len)
            }
            ExprToken::StringConstructorStart => {
                self.push(LexMode::StringConstructor);
                (SyntaxKind::STRING_CONSTRUCTOR_START, len)
            }
            ExprToken::PragmaStart => {
                self.push(LexMode::PragmaName { seen_name: false });
                (SyntaxKind::PRAGMA_START, len)
            }
            ExprToken::XmlCommentStart => {
                self.push(LexMode::XmlComment);
                (SyntaxKind::XML_COMMENT_START, len)
            }
            ExprToken::PiStart => {
                self.push(LexMode::PiTarget);
                (SyntaxKind::PI_START, len)
            }
            ExprToken::CdataStart => {
                self.push(LexMode::Cdata);
                (SyntaxKind::CDATA_SECTION_START, len)
            }
            ExprToken::LBrace => {
                self.push(LexMode::Expr);
                (SyntaxKind::L_BRACE, len)
            }
            ExprToken::RBrace => {
                if self.mode() == LexMode::Expr {
                    self.pop();
                }
                (SyntaxKind::R_BRACE, len)
            }
            ExprToken::InterpolationClose if interpolation => {
                self.pop();
                (SyntaxKind::STRING_INTERPOLATION_CLOSE, len)
            }
            ExprToken::InterpolationClose => {
                if self.mode() == LexMode::Expr {
                    self.pop();
                }
                (SyntaxKind::R_BRACE, 1)
            }
            // `as xs:int?:= 1` is an occurrence indicator followed by `:=`
            ExprToken::Elvis if rest[len..].starts_with('=') => (SyntaxKind::QUESTION, 1),
            other => (other.kind(), len),
        }
    }

    // =========================================================================
    // String literals and braced URIs
    // =========================================================================

    fn lex_string(&mut self, rest: &str, quote: char) -> (SyntaxKind, usize) {
        if rest.starts_with(quote) {
            if rest[1..].starts_with(quote) {
                return (SyntaxKind::ESCAPED_CHARACTER, 2);
            }
            self.pop();
            return (SyntaxKind::STRING_LITERAL_END, 1);
        }
        if rest.starts_with('&') {
            return scan_reference(rest);
        }
        let len = run_until(rest, |s| s.starts_with(quote) || s.starts_with('&'));
        (SyntaxKind::STRING_LITERAL_CONTENTS, len)
    }

    fn lex_braced_uri_start(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with('{') {
            self.replace(LexMode::BracedUri);
            return (SyntaxKind::BRACED_URI_LITERAL_START, 1);
        }
        self.pop();
        self.lex_expr(rest)
    }

    fn lex_braced_uri(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with('}') {
            self.pop();
            return (SyntaxKind::BRACED_URI_LITERAL_END, 1);
        }
        if rest.starts_with('&') {
            return scan_reference(rest);
        }
        let len = run_until(rest, |s| s.starts_with('}') || s.starts_with('&'));
        (SyntaxKind::STRING_LITERAL_CONTENTS, len)
    }

    fn lex_string_constructor(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("]``") {
            self.pop();
            return (SyntaxKind::STRING_CONSTRUCTOR_END, 3);
        }
        if rest.starts_with("`{") {
            self.push(LexMode::Interpolation);
            return (SyntaxKind::STRING_INTERPOLATION_OPEN, 2);
        }
        let len = run_until(rest, |s| s.starts_with("]``") || s.starts_with("`{"));
        (SyntaxKind::STRING_CONSTRUCTOR_CONTENTS, len)
    }

    // =========================================================================
    // Pragmas
    // =========================================================================

    fn lex_pragma_name(&mut self, rest: &str, seen_name: bool) -> (SyntaxKind, usize) {
        if rest.starts_with("#)") {
            self.pop();
            return (SyntaxKind::PRAGMA_END, 2);
        }
        let ws = scan_whitespace(rest);
        if ws > 0 {
            if seen_name {
                self.replace(LexMode::PragmaContents);
            }
            return (SyntaxKind::WHITESPACE, ws);
        }
        if rest.starts_with("Q{") && self.uri_qualified_names {
            self.replace(LexMode::PragmaName { seen_name: true });
            self.push(LexMode::BracedUri);
            return (SyntaxKind::BRACED_URI_LITERAL_START, 2);
        }
        let name = scan_ncname(rest);
        if name > 0 {
            self.replace(LexMode::PragmaName { seen_name: true });
            let kind = super::keywords::keyword_kind(&rest[..name]).unwrap_or(SyntaxKind::NCNAME);
            return (kind, name);
        }
        if rest.starts_with(':') {
            return (SyntaxKind::COLON, 1);
        }
        // Anything else starts the contents directly.
        self.replace(LexMode::PragmaContents);
        self.lex_pragma_contents(rest)
    }

    fn lex_pragma_contents(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("#)") {
            self.pop();
            return (SyntaxKind::PRAGMA_END, 2);
        }
        let len = run_until(rest, |s| s.starts_with("#)"));
        (SyntaxKind::PRAGMA_CONTENTS, len)
    }

    // =========================================================================
    // Direct constructors
    // =========================================================================

    fn lex_start_tag(&mut self, rest: &str) -> (SyntaxKind, usize) {
        let ws = scan_whitespace(rest);
        if ws > 0 {
            return (SyntaxKind::WHITESPACE, ws);
        }
        let name = scan_ncname(rest);
        if name > 0 {
            return (SyntaxKind::NCNAME, name);
        }
        if rest.starts_with("/>") {
            self.pop();
            return (SyntaxKind::XML_EMPTY_TAG_CLOSE, 2);
        }
        match rest.as_bytes()[0] {
            b'<' => (SyntaxKind::XML_TAG_OPEN, 1),
            b'>' => {
                self.replace(LexMode::ElemContent);
                (SyntaxKind::XML_TAG_CLOSE, 1)
            }
            b':' => (SyntaxKind::COLON, 1),
            b'=' => (SyntaxKind::XML_EQUAL, 1),
            b'"' => {
                self.push(LexMode::AttrQuot);
                (SyntaxKind::XML_ATTRIBUTE_VALUE_START, 1)
            }
            b'\'' => {
                self.push(LexMode::AttrApos);
                (SyntaxKind::XML_ATTRIBUTE_VALUE_START, 1)
            }
            _ => bad_character(rest),
        }
    }

    fn lex_attribute_value(&mut self, rest: &str, quote: char) -> (SyntaxKind, usize) {
        if rest.starts_with(quote) {
            if rest[1..].starts_with(quote) {
                return (SyntaxKind::ESCAPED_CHARACTER, 2);
            }
            self.pop();
            return (SyntaxKind::XML_ATTRIBUTE_VALUE_END, 1);
        }
        if let Some(token) = self.lex_common_content(rest) {
            return token;
        }
        let len = run_until(rest, |s| {
            s.starts_with(quote) || s.starts_with(['{', '}', '&'])
        });
        (SyntaxKind::XML_ATTRIBUTE_VALUE_CONTENTS, len)
    }

    fn lex_element_content(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("</") {
            self.replace(LexMode::EndTag);
            return (SyntaxKind::XML_END_TAG_OPEN, 2);
        }
        if rest.starts_with("<!--") {
            self.push(LexMode::XmlComment);
            return (SyntaxKind::XML_COMMENT_START, 4);
        }
        if rest.starts_with("<![CDATA[") {
            self.push(LexMode::Cdata);
            return (SyntaxKind::CDATA_SECTION_START, 9);
        }
        if rest.starts_with("<?") {
            self.push(LexMode::PiTarget);
            return (SyntaxKind::PI_START, 2);
        }
        if rest.starts_with('<') {
            if starts_with_name(&rest[1..]) {
                self.push(LexMode::StartTag);
                return (SyntaxKind::XML_TAG_OPEN, 1);
            }
            return (SyntaxKind::BAD_CHARACTER, 1);
        }
        if let Some(token) = self.lex_common_content(rest) {
            return token;
        }
        let len = run_until(rest, |s| s.starts_with(['<', '{', '}', '&']));
        (SyntaxKind::XML_ELEMENT_CONTENTS, len)
    }

    /// Braces and references shared by attribute values and element content
    fn lex_common_content(&mut self, rest: &str) -> Option<(SyntaxKind, usize)> {
        if rest.starts_with("{{") || rest.starts_with("}}") {
            return Some((SyntaxKind::ESCAPED_BRACE, 2));
        }
        if rest.starts_with('{') {
            self.push(LexMode::Expr);
            return Some((SyntaxKind::L_BRACE, 1));
        }
        if rest.starts_with('}') {
            return Some((SyntaxKind::R_BRACE, 1));
        }
        if rest.starts_with('&') {
            return Some(scan_reference(rest));
        }
        None
    }

    fn lex_end_tag(&mut self, rest: &str) -> (SyntaxKind, usize) {
        let ws = scan_whitespace(rest);
        if ws > 0 {
            return (SyntaxKind::WHITESPACE, ws);
        }
        let name = scan_ncname(rest);
        if name > 0 {
            return (SyntaxKind::NCNAME, name);
        }
        match rest.as_bytes()[0] {
            b'>' => {
                self.pop();
                (SyntaxKind::XML_TAG_CLOSE, 1)
            }
            b':' => (SyntaxKind::COLON, 1),
            _ => bad_character(rest),
        }
    }

    fn lex_pi_target(&mut self, rest: &str) -> (SyntaxKind, usize) {
        if rest.starts_with("?>") {
            self.pop();
            return (SyntaxKind::PI_END, 2);
        }
        let ws = scan_whitespace(rest);
        if ws > 0 {
            self.replace(LexMode::PiContents);
            return (SyntaxKind::WHITESPACE, ws);
        }
        let name = scan_ncname(rest);
        if name > 0 {
            return (SyntaxKind::NCNAME, name);
        }
        self.replace(LexMode::PiContents);
        self.lex_until(rest, "?>", SyntaxKind::PI_CONTENTS, SyntaxKind::PI_END)
    }

    fn lex_until(
        &mut self,
        rest: &str,
        terminator: &str,
        contents: SyntaxKind,
        end: SyntaxKind,
    ) -> (SyntaxKind, usize) {
        if rest.starts_with(terminator) {
            self.pop();
            return (end, terminator.len());
        }
        let len = rest.find(terminator).unwrap_or(rest.len());
        (contents, len)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize a source lazily, starting in expression mode
///
/// A `<` is always an operator here; only the parser knows when it opens a
/// direct element constructor.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

// =============================================================================
// Scanning helpers
// =============================================================================

/// XML `NameStartChar` without the colon
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | 'a'..='z' | '_'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

/// XML `NameChar` without the colon
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c, '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Whether `text` begins with an NCName
pub fn starts_with_name(text: &str) -> bool {
    text.chars().next().is_some_and(is_name_start_char)
}

fn scan_ncname(rest: &str) -> usize {
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, c)) if is_name_start_char(c) => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !is_name_char(c))
        .map_or(rest.len(), |(i, _)| i)
}

fn scan_whitespace(rest: &str) -> usize {
    rest.bytes()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .unwrap_or(rest.len())
}

/// Length of the run of characters before `stop` matches, at least one character
fn run_until(rest: &str, stop: impl Fn(&str) -> bool) -> usize {
    let mut indices = rest.char_indices().skip(1);
    indices
        .find(|&(i, _)| stop(&rest[i..]))
        .map_or(rest.len(), |(i, _)| i)
}

fn bad_character(rest: &str) -> (SyntaxKind, usize) {
    let len = rest.chars().next().map_or(1, char::len_utf8);
    (SyntaxKind::BAD_CHARACTER, len)
}

/// Nested `(: ... :)` comment
fn scan_comment(rest: &str) -> (SyntaxKind, usize) {
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'(', b':') => {
                depth += 1;
                i += 2;
            }
            (b':', b')') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return (SyntaxKind::COMMENT, i);
                }
            }
            _ => i += 1,
        }
    }
    (SyntaxKind::UNCLOSED_COMMENT, rest.len())
}

/// Entity or character reference starting at `&`
fn scan_reference(rest: &str) -> (SyntaxKind, usize) {
    let body = &rest[1..];
    if let Some(numeric) = body.strip_prefix('#') {
        let (digits, prefix) = match numeric.strip_prefix('x') {
            Some(hex) => (hex.bytes().take_while(u8::is_ascii_hexdigit).count(), 3),
            None => (numeric.bytes().take_while(u8::is_ascii_digit).count(), 2),
        };
        let len = prefix + digits;
        return match (digits, rest[len..].starts_with(';')) {
            (0, true) => (SyntaxKind::EMPTY_ENTITY_REFERENCE, len + 1),
            (_, true) => (SyntaxKind::CHARACTER_REFERENCE, len + 1),
            (_, false) => (SyntaxKind::PARTIAL_ENTITY_REFERENCE, len),
        };
    }
    if body.starts_with(';') {
        return (SyntaxKind::EMPTY_ENTITY_REFERENCE, 2);
    }
    let name = scan_ncname(body);
    if name > 0 && body[name..].starts_with(';') {
        return (SyntaxKind::PREDEFINED_ENTITY_REFERENCE, name + 2);
    }
    (SyntaxKind::PARTIAL_ENTITY_REFERENCE, name + 1)
}

// =============================================================================
// Expression-mode tokens
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum ExprToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[A-Za-z_\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}][A-Za-z_\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}\-.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}]*")]
    Name,

    // =========================================================================
    // NUMBERS
    // =========================================================================
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"\.[0-9]+|[0-9]+\.[0-9]*")]
    Decimal,

    #[regex(r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)[eE][+-]?[0-9]+")]
    Double,

    #[regex(r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)[eE][+-]?")]
    PartialDouble,

    // =========================================================================
    // MODE ENTRY
    // =========================================================================
    #[token("\"")]
    Quot,
    #[token("'")]
    Apos,
    #[token("Q{")]
    BracedUriStart,
    #[token("``[")]
    StringConstructorStart,
    #[token("}`")]
    InterpolationClose,
    #[token("(#")]
    PragmaStart,
    #[token("#)")]
    PragmaEnd,
    #[token("<!--")]
    XmlCommentStart,
    #[token("<?")]
    PiStart,
    #[token("<![CDATA[")]
    CdataStart,
    #[token("<!")]
    Invalid,
    #[token(":)")]
    CommentEnd,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(":=")]
    ColonEq,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("$")]
    Dollar,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("%")]
    Percent,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("=")]
    Eq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("<<")]
    NodeBefore,
    #[token(">>")]
    NodeAfter,
    #[token("!")]
    Bang,
    #[token("=>")]
    Arrow,
    #[token("?:")]
    Elvis,
    #[token("??")]
    DoubleQuestion,
    #[token("!!")]
    DoubleBang,
}

impl ExprToken {
    fn kind(self) -> SyntaxKind {
        use ExprToken::*;
        match self {
            Whitespace => SyntaxKind::WHITESPACE,
            Name => SyntaxKind::NCNAME,
            Integer => SyntaxKind::INTEGER_LITERAL,
            Decimal => SyntaxKind::DECIMAL_LITERAL,
            Double => SyntaxKind::DOUBLE_LITERAL,
            PartialDouble => SyntaxKind::PARTIAL_DOUBLE_LITERAL_EXPONENT,
            Quot | Apos => SyntaxKind::STRING_LITERAL_START,
            BracedUriStart => SyntaxKind::BRACED_URI_LITERAL_START,
            StringConstructorStart => SyntaxKind::STRING_CONSTRUCTOR_START,
            InterpolationClose => SyntaxKind::STRING_INTERPOLATION_CLOSE,
            PragmaStart => SyntaxKind::PRAGMA_START,
            PragmaEnd => SyntaxKind::PRAGMA_END,
            XmlCommentStart => SyntaxKind::XML_COMMENT_START,
            PiStart => SyntaxKind::PI_START,
            CdataStart => SyntaxKind::CDATA_SECTION_START,
            Invalid => SyntaxKind::INVALID,
            CommentEnd => SyntaxKind::COMMENT_END_TAG,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Comma => SyntaxKind::COMMA,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            ColonColon => SyntaxKind::COLON_COLON,
            ColonEq => SyntaxKind::COLON_EQ,
            Dot => SyntaxKind::DOT,
            DotDot => SyntaxKind::DOT_DOT,
            Dollar => SyntaxKind::DOLLAR,
            At => SyntaxKind::AT,
            Hash => SyntaxKind::HASH,
            Percent => SyntaxKind::PERCENT,
            Question => SyntaxKind::QUESTION,
            Star => SyntaxKind::STAR,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Slash => SyntaxKind::SLASH,
            SlashSlash => SyntaxKind::SLASH_SLASH,
            Pipe => SyntaxKind::PIPE,
            PipePipe => SyntaxKind::PIPE_PIPE,
            Eq => SyntaxKind::EQ,
            Ne => SyntaxKind::NE,
            Lt => SyntaxKind::LT,
            Le => SyntaxKind::LE,
            Gt => SyntaxKind::GT,
            Ge => SyntaxKind::GE,
            NodeBefore => SyntaxKind::NODE_BEFORE,
            NodeAfter => SyntaxKind::NODE_AFTER,
            Bang => SyntaxKind::BANG,
            Arrow => SyntaxKind::ARROW,
            Elvis => SyntaxKind::ELVIS,
            DoubleQuestion => SyntaxKind::DOUBLE_QUESTION,
            DoubleBang => SyntaxKind::DOUBLE_BANG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).map(|t| t.text).collect()
    }

    #[test]
    fn test_lex_flwor_keywords() {
        assert_eq!(
            kinds("for $x in 1"),
            vec![
                SyntaxKind::FOR_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::DOLLAR,
                SyntaxKind::NCNAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IN_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::INTEGER_LITERAL,
            ]
        );
    }

    #[test]
    fn test_lex_hyphenated_names() {
        assert_eq!(kinds("ancestor-or-self"), vec![SyntaxKind::ANCESTOR_OR_SELF_KW]);
        assert_eq!(kinds("a-1"), vec![SyntaxKind::NCNAME]);
        assert_eq!(kinds("a - 1").len(), 5);
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(kinds("12"), vec![SyntaxKind::INTEGER_LITERAL]);
        assert_eq!(kinds("1.5"), vec![SyntaxKind::DECIMAL_LITERAL]);
        assert_eq!(kinds(".5"), vec![SyntaxKind::DECIMAL_LITERAL]);
        assert_eq!(kinds("1.5e-3"), vec![SyntaxKind::DOUBLE_LITERAL]);
        assert_eq!(kinds("1e"), vec![SyntaxKind::PARTIAL_DOUBLE_LITERAL_EXPONENT]);
        assert_eq!(kinds(".."), vec![SyntaxKind::DOT_DOT]);
    }

    #[test]
    fn test_lex_nested_comment() {
        assert_eq!(kinds("(: a (: b :) c :)"), vec![SyntaxKind::COMMENT]);
        assert_eq!(kinds("(: a (: b :)"), vec![SyntaxKind::UNCLOSED_COMMENT]);
        assert_eq!(kinds(":)"), vec![SyntaxKind::COMMENT_END_TAG]);
    }

    #[test]
    fn test_lex_string_literal() {
        assert_eq!(
            kinds(r#""a""b&lt;&#60;&#;&amp""#),
            vec![
                SyntaxKind::STRING_LITERAL_START,
                SyntaxKind::STRING_LITERAL_CONTENTS,
                SyntaxKind::ESCAPED_CHARACTER,
                SyntaxKind::STRING_LITERAL_CONTENTS,
                SyntaxKind::PREDEFINED_ENTITY_REFERENCE,
                SyntaxKind::CHARACTER_REFERENCE,
                SyntaxKind::EMPTY_ENTITY_REFERENCE,
                SyntaxKind::PARTIAL_ENTITY_REFERENCE,
                SyntaxKind::STRING_LITERAL_END,
            ]
        );
    }

    #[test]
    fn test_lex_unclosed_string_covers_input() {
        assert_eq!(texts("'abc"), vec!["'", "abc"]);
    }

    #[test]
    fn test_lex_noncharacters_are_separate() {
        assert_eq!(
            kinds("~\u{FFFE}\u{FFFF}"),
            vec![SyntaxKind::BAD_CHARACTER, SyntaxKind::BAD_CHARACTER, SyntaxKind::BAD_CHARACTER]
        );
    }

    #[test]
    fn test_lex_invalid_markup() {
        assert_eq!(kinds("<!"), vec![SyntaxKind::INVALID]);
        assert_eq!(kinds("<!--x-->"), vec![
            SyntaxKind::XML_COMMENT_START,
            SyntaxKind::XML_COMMENT_CONTENTS,
            SyntaxKind::XML_COMMENT_END,
        ]);
    }

    #[test]
    fn test_lex_braced_uri() {
        assert_eq!(
            kinds("Q{http://x}y"),
            vec![
                SyntaxKind::BRACED_URI_LITERAL_START,
                SyntaxKind::STRING_LITERAL_CONTENTS,
                SyntaxKind::BRACED_URI_LITERAL_END,
                SyntaxKind::NCNAME,
            ]
        );
    }

    #[test]
    fn test_lex_q_brace_without_uri_qualified_names() {
        let dialect: Dialect = "1.0".parse().unwrap();
        let kinds: Vec<_> = Lexer::with_dialect("Q{1}", &dialect).map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::NCNAME,
                SyntaxKind::L_BRACE,
                SyntaxKind::INTEGER_LITERAL,
                SyntaxKind::R_BRACE,
            ]
        );
        let dialect: Dialect = "3.0".parse().unwrap();
        let first = Lexer::with_dialect("Q{1}", &dialect).next().map(|t| t.kind);
        assert_eq!(first, Some(SyntaxKind::BRACED_URI_LITERAL_START));
    }

    #[test]
    fn test_lex_bare_braced_uri_after_push() {
        let mut lexer = Lexer::new("{urn:x}y }");
        lexer.push_mode(LexMode::BracedUriStart);
        let kinds: Vec<_> = lexer.map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::BRACED_URI_LITERAL_START,
                SyntaxKind::STRING_LITERAL_CONTENTS,
                SyntaxKind::BRACED_URI_LITERAL_END,
                SyntaxKind::NCNAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::R_BRACE,
            ]
        );
    }

    #[test]
    fn test_lex_string_constructor() {
        assert_eq!(
            kinds("``[a`{ $x }`b]``"),
            vec![
                SyntaxKind::STRING_CONSTRUCTOR_START,
                SyntaxKind::STRING_CONSTRUCTOR_CONTENTS,
                SyntaxKind::STRING_INTERPOLATION_OPEN,
                SyntaxKind::WHITESPACE,
                SyntaxKind::DOLLAR,
                SyntaxKind::NCNAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::STRING_INTERPOLATION_CLOSE,
                SyntaxKind::STRING_CONSTRUCTOR_CONTENTS,
                SyntaxKind::STRING_CONSTRUCTOR_END,
            ]
        );
    }

    #[test]
    fn test_lex_pragma() {
        assert_eq!(
            kinds("(# ext:option a b #)"),
            vec![
                SyntaxKind::PRAGMA_START,
                SyntaxKind::WHITESPACE,
                SyntaxKind::NCNAME,
                SyntaxKind::COLON,
                SyntaxKind::OPTION_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::PRAGMA_CONTENTS,
                SyntaxKind::PRAGMA_END,
            ]
        );
    }

    #[test]
    fn test_lex_direct_element_after_push() {
        let mut lexer = Lexer::new("<a b='{1}'>x{{</a>");
        lexer.push_mode(LexMode::StartTag);
        let kinds: Vec<_> = lexer.map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::XML_TAG_OPEN,
                SyntaxKind::NCNAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::NCNAME,
                SyntaxKind::XML_EQUAL,
                SyntaxKind::XML_ATTRIBUTE_VALUE_START,
                SyntaxKind::L_BRACE,
                SyntaxKind::INTEGER_LITERAL,
                SyntaxKind::R_BRACE,
                SyntaxKind::XML_ATTRIBUTE_VALUE_END,
                SyntaxKind::XML_TAG_CLOSE,
                SyntaxKind::XML_ELEMENT_CONTENTS,
                SyntaxKind::ESCAPED_BRACE,
                SyntaxKind::XML_END_TAG_OPEN,
                SyntaxKind::NCNAME,
                SyntaxKind::XML_TAG_CLOSE,
            ]
        );
    }

    #[test]
    fn test_lex_occurrence_before_assignment() {
        assert_eq!(
            kinds("int?:="),
            vec![SyntaxKind::NCNAME, SyntaxKind::QUESTION, SyntaxKind::COLON_EQ]
        );
        assert_eq!(kinds("?:"), vec![SyntaxKind::ELVIS]);
    }

    #[test]
    fn test_lex_lossless() {
        let input = "let $x := <a>{ \"s\" }</a> (: c :) return $x";
        let joined: String = tokenize(input).map(|t| t.text).collect();
        assert_eq!(joined, input);
    }
}
