//! Direct and computed node constructors
//!
//! Direct constructors run the lexer in its XML modes. The expression lexer
//! sees `<` as a less-than operator, so an element start re-lexes it as a
//! tag opener; from there the lexer follows the tags by itself until the
//! element's end tag or `/>` returns it to expression mode.

use super::*;

/// `<` directly followed by a name
pub fn at_direct_element<P: GrammarParser>(p: &P) -> bool {
    p.at(SyntaxKind::LT) && is_name_kind(p.nth(1)) && p.nth_glued(1)
}

pub fn parse_direct_constructor<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::LT if at_direct_element(p) => {
            p.push_lexer_mode(LexMode::StartTag);
            parse_dir_elem_constructor(p);
        }
        SyntaxKind::XML_TAG_OPEN => parse_dir_elem_constructor(p),
        SyntaxKind::XML_COMMENT_START => parse_dir_comment_constructor(p),
        SyntaxKind::PI_START => parse_dir_pi_constructor(p),
        SyntaxKind::CDATA_SECTION_START => parse_cdata_section(p),
        _ => {}
    }
}

// =============================================================================
// Elements
// =============================================================================

/// Element name in a start or end tag, returned as written
fn parse_xml_name<P: GrammarParser>(p: &mut P) -> String {
    let mut name = String::new();
    if !p.at(SyntaxKind::NCNAME) {
        return name;
    }
    let prefixed = p.nth(1) == SyntaxKind::COLON
        && p.nth_glued(1)
        && p.nth(2) == SyntaxKind::NCNAME
        && p.nth_glued(2);
    p.start_node(if prefixed {
        SyntaxKind::QNAME
    } else {
        SyntaxKind::NCNAME_REF
    });
    name.push_str(p.current_text());
    p.bump();
    if prefixed {
        name.push(':');
        p.bump();
        name.push_str(p.current_text());
        p.bump();
    }
    p.finish_node();
    name
}

/// `< QName DirAttribute* (/> | > DirElemContent* </ QName >)`
fn parse_dir_elem_constructor<P: GrammarParser>(p: &mut P) {
    if !p.enter() {
        error_unexpected(p);
        return;
    }
    p.start_node(SyntaxKind::DIR_ELEM_CONSTRUCTOR);
    p.bump();
    let open_name = parse_xml_name(p);
    let mut recovering = false;
    loop {
        match p.current() {
            SyntaxKind::NCNAME => {
                parse_dir_attribute(p);
                recovering = false;
            }
            SyntaxKind::XML_TAG_CLOSE | SyntaxKind::XML_EMPTY_TAG_CLOSE | SyntaxKind::EOF => break,
            _ if recovering => p.bump(),
            _ => {
                error_unexpected(p);
                recovering = true;
            }
        }
    }
    if p.eat(SyntaxKind::XML_TAG_CLOSE) {
        parse_dir_elem_content(p, &open_name);
    } else if !p.eat(SyntaxKind::XML_EMPTY_TAG_CLOSE) {
        p.error_here(SyntaxError::missing_closing_tag(&open_name));
    }
    p.finish_node();
    p.leave();
}

/// `QName = "value"`
fn parse_dir_attribute<P: GrammarParser>(p: &mut P) {
    p.start_node(SyntaxKind::DIR_ATTRIBUTE);
    parse_xml_name(p);
    p.expect(SyntaxKind::XML_EQUAL);
    if p.at(SyntaxKind::XML_ATTRIBUTE_VALUE_START) {
        p.start_node(SyntaxKind::DIR_ATTRIBUTE_VALUE);
        p.bump();
        loop {
            match p.current() {
                SyntaxKind::XML_ATTRIBUTE_VALUE_END => {
                    p.bump();
                    break;
                }
                SyntaxKind::XML_ATTRIBUTE_VALUE_CONTENTS
                | SyntaxKind::ESCAPED_CHARACTER
                | SyntaxKind::ESCAPED_BRACE => p.bump(),
                SyntaxKind::L_BRACE => parse_enclosed_expr(p),
                SyntaxKind::EOF => break,
                _ => parse_reference(p),
            }
        }
        p.finish_node();
    }
    p.finish_node();
}

fn parse_dir_elem_content<P: GrammarParser>(p: &mut P, open_name: &str) {
    loop {
        match p.current() {
            SyntaxKind::XML_ELEMENT_CONTENTS | SyntaxKind::ESCAPED_BRACE => p.bump(),
            SyntaxKind::L_BRACE => parse_enclosed_expr(p),
            SyntaxKind::XML_TAG_OPEN => parse_dir_elem_constructor(p),
            SyntaxKind::XML_COMMENT_START => parse_dir_comment_constructor(p),
            SyntaxKind::PI_START => parse_dir_pi_constructor(p),
            SyntaxKind::CDATA_SECTION_START => parse_cdata_section(p),
            SyntaxKind::XML_END_TAG_OPEN => {
                parse_end_tag(p, open_name);
                return;
            }
            SyntaxKind::EOF => {
                p.error_here(SyntaxError::missing_closing_tag(open_name));
                return;
            }
            _ => parse_reference(p),
        }
    }
}

/// `</ QName >`, reporting a name that differs from the start tag
fn parse_end_tag<P: GrammarParser>(p: &mut P, open_name: &str) {
    p.bump();
    let cp = p.checkpoint();
    let close_name = parse_xml_name(p);
    if !close_name.is_empty() && close_name != open_name {
        p.start_error_at(cp, SyntaxError::mismatched_closing_tag(&close_name, open_name));
        p.finish_node();
    }
    let mut recovering = false;
    while !p.at_any(&[SyntaxKind::XML_TAG_CLOSE, SyntaxKind::EOF]) {
        if recovering {
            p.bump();
        } else {
            error_unexpected(p);
            recovering = true;
        }
    }
    p.expect(SyntaxKind::XML_TAG_CLOSE);
}

// =============================================================================
// Comments, processing instructions and CDATA
// =============================================================================

/// `opener contents* closer`, with a diagnostic when input ends first
fn parse_delimited_text<P: GrammarParser>(
    p: &mut P,
    kind: SyntaxKind,
    end: SyntaxKind,
    unclosed: fn() -> SyntaxError,
) {
    p.start_node(kind);
    p.bump();
    while !p.at_any(&[end, SyntaxKind::EOF]) {
        p.bump();
    }
    if !p.eat(end) {
        p.error_here(unclosed());
    }
    p.finish_node();
}

fn parse_dir_comment_constructor<P: GrammarParser>(p: &mut P) {
    parse_delimited_text(
        p,
        SyntaxKind::DIR_COMMENT_CONSTRUCTOR,
        SyntaxKind::XML_COMMENT_END,
        SyntaxError::unclosed_xml_comment,
    );
}

fn parse_dir_pi_constructor<P: GrammarParser>(p: &mut P) {
    parse_delimited_text(
        p,
        SyntaxKind::DIR_PI_CONSTRUCTOR,
        SyntaxKind::PI_END,
        SyntaxError::unclosed_pi,
    );
}

fn parse_cdata_section<P: GrammarParser>(p: &mut P) {
    parse_delimited_text(
        p,
        SyntaxKind::CDATA_SECTION,
        SyntaxKind::CDATA_SECTION_END,
        SyntaxError::unclosed_cdata,
    );
}

// =============================================================================
// Computed constructors
// =============================================================================

pub fn parse_computed_constructor<P: GrammarParser>(p: &mut P) {
    match p.current() {
        SyntaxKind::DOCUMENT_KW => primary::parse_keyword_enclosed(p, SyntaxKind::COMP_DOC_CONSTRUCTOR),
        SyntaxKind::TEXT_KW => primary::parse_keyword_enclosed(p, SyntaxKind::COMP_TEXT_CONSTRUCTOR),
        SyntaxKind::COMMENT_KW => {
            primary::parse_keyword_enclosed(p, SyntaxKind::COMP_COMMENT_CONSTRUCTOR)
        }
        SyntaxKind::ELEMENT_KW => parse_named_constructor(p, SyntaxKind::COMP_ELEM_CONSTRUCTOR),
        SyntaxKind::ATTRIBUTE_KW => parse_named_constructor(p, SyntaxKind::COMP_ATTR_CONSTRUCTOR),
        SyntaxKind::NAMESPACE_KW => {
            parse_named_constructor(p, SyntaxKind::COMP_NAMESPACE_CONSTRUCTOR)
        }
        SyntaxKind::PROCESSING_INSTRUCTION_KW => {
            parse_named_constructor(p, SyntaxKind::COMP_PI_CONSTRUCTOR)
        }
        _ => {}
    }
}

/// `keyword (EQName | { Expr }) { Expr? }`
fn parse_named_constructor<P: GrammarParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    if p.at(SyntaxKind::L_BRACE) {
        parse_enclosed_expr(p);
    } else {
        parse_eqname(p);
    }
    parse_enclosed_expr(p);
    p.finish_node();
}
