//! Selector matching engine
//!
//! Parses a selector string into simple/compound/complex form and resolves
//! it against a scope node. The supported grammar is the one selector
//! generation emits: type, universal, id, class, attribute presence/value,
//! `:nth-child(n)`, compounds of those, and the single-space descendant
//! combinator.
//!
//! Matching walks bottom-up: the rightmost compound must match the
//! candidate itself, every earlier compound must match some element
//! ancestor. The ancestor walk never crosses a non-element node, so shadow
//! boundaries isolate their contents.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId};

/// A single selector condition on one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `div`
    Type(String),
    /// `*`
    Universal,
    /// `#main`
    Id(String),
    /// `.active`
    Class(String),
    /// `[name]` or `[name="value"]`
    Attribute {
        name: String,
        value: Option<String>,
    },
    /// `:nth-child(n)`, 1-based over element siblings only
    NthChild(usize),
}

/// Juxtaposed simple selectors, all of which must hold on one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

/// Compounds joined by the descendant combinator, subject last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
}

/// Parse a selector string
pub fn parse(selector: &str) -> Result<ComplexSelector> {
    let mut parser = Parser::new(selector);
    parser.skip_whitespace();
    if parser.peek().is_none() {
        return Err(parser.error("empty selector"));
    }

    let mut compounds = Vec::new();
    loop {
        let mut parts = vec![parser.parse_simple()?];
        while let Some(c) = parser.peek() {
            if c.is_whitespace() {
                break;
            }
            parts.push(parser.parse_simple()?);
        }
        compounds.push(CompoundSelector { parts });

        parser.skip_whitespace();
        if parser.peek().is_none() {
            break;
        }
    }

    Ok(ComplexSelector { compounds })
}

/// All element descendants of `scope` matching `selector`, in document
/// order. The scope node itself is never part of the match set.
pub fn match_all(arena: &DomArena, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
    let complex = parse(selector)?;

    let mut matches = Vec::new();
    for candidate in arena.descendants(scope)? {
        if arena.get(candidate)?.is_element() && matches_complex(arena, candidate, &complex)? {
            matches.push(candidate);
        }
    }
    Ok(matches)
}

fn matches_complex(arena: &DomArena, node_id: NodeId, complex: &ComplexSelector) -> Result<bool> {
    let (subject, ancestors) = complex
        .compounds
        .split_last()
        .ok_or_else(|| DomError::DocumentError("complex selector without subject".to_string()))?;

    if !matches_compound(arena, node_id, subject)? {
        return Ok(false);
    }

    // For descendant-only chains, binding each compound to the nearest
    // matching ancestor is complete: anything a farther binding could match
    // is still above the nearer one.
    let mut current = node_id;
    for compound in ancestors.iter().rev() {
        let mut bound = None;
        let mut cursor = current;
        while let Some(parent_id) = arena.get(cursor)?.parent_id {
            if !arena.get(parent_id)?.is_element() {
                break;
            }
            if matches_compound(arena, parent_id, compound)? {
                bound = Some(parent_id);
                break;
            }
            cursor = parent_id;
        }
        match bound {
            Some(parent_id) => current = parent_id,
            None => return Ok(false),
        }
    }

    Ok(true)
}

fn matches_compound(arena: &DomArena, node_id: NodeId, compound: &CompoundSelector) -> Result<bool> {
    let node = arena.get(node_id)?;
    if !node.is_element() {
        return Ok(false);
    }
    for simple in &compound.parts {
        if !matches_simple(arena, node_id, node, simple)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches_simple(
    arena: &DomArena,
    node_id: NodeId,
    node: &DomNode,
    simple: &SimpleSelector,
) -> Result<bool> {
    Ok(match simple {
        SimpleSelector::Type(name) => node.node_name.eq_ignore_ascii_case(name),
        SimpleSelector::Universal => true,
        SimpleSelector::Id(id) => node.attr("id") == Some(id.as_str()),
        SimpleSelector::Class(class) => node.has_class(class),
        SimpleSelector::Attribute { name, value } => match value {
            Some(value) => node.attr(name) == Some(value.as_str()),
            None => node.attributes.contains_key(name.as_str()),
        },
        SimpleSelector::NthChild(n) => arena.element_ordinal(node_id)? == Some(*n),
    })
}

/// Character classes per CSS ident rules, relaxed to also accept interior
/// digits and hyphens uniformly (the generator escapes everything else)
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn error(&self, message: impl Into<String>) -> DomError {
        DomError::selector_parse(self.input, self.pos, message)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_simple(&mut self) -> Result<SimpleSelector> {
        match self.peek() {
            Some('#') => {
                self.bump();
                Ok(SimpleSelector::Id(self.parse_ident()?))
            }
            Some('.') => {
                self.bump();
                Ok(SimpleSelector::Class(self.parse_ident()?))
            }
            Some('*') => {
                self.bump();
                Ok(SimpleSelector::Universal)
            }
            Some('[') => {
                self.bump();
                self.parse_attribute()
            }
            Some(':') => {
                self.bump();
                self.parse_nth_child()
            }
            Some(c) if c == '\\' || is_ident_char(c) => {
                Ok(SimpleSelector::Type(self.parse_ident()?))
            }
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of selector")),
        }
    }

    fn parse_attribute(&mut self) -> Result<SimpleSelector> {
        self.skip_whitespace();
        let name = self.parse_ident()?;
        self.skip_whitespace();

        match self.peek() {
            Some(']') => {
                self.bump();
                Ok(SimpleSelector::Attribute { name, value: None })
            }
            Some('=') => {
                self.bump();
                self.skip_whitespace();
                if self.bump() != Some('"') {
                    return Err(self.error("expected quoted attribute value"));
                }
                let value = self.parse_string()?;
                self.skip_whitespace();
                if self.bump() != Some(']') {
                    return Err(self.error("expected `]`"));
                }
                Ok(SimpleSelector::Attribute {
                    name,
                    value: Some(value),
                })
            }
            _ => Err(self.error("expected `]` or `=`")),
        }
    }

    fn parse_nth_child(&mut self) -> Result<SimpleSelector> {
        let name = self.parse_ident()?;
        if !name.eq_ignore_ascii_case("nth-child") {
            return Err(self.error(format!("unsupported pseudo-class `:{name}`")));
        }
        if self.bump() != Some('(') {
            return Err(self.error("expected `(`"));
        }

        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.bump() != Some(')') {
            return Err(self.error("expected `)`"));
        }

        let ordinal: usize = digits
            .parse()
            .map_err(|_| self.error("expected an nth-child ordinal"))?;
        if ordinal == 0 {
            return Err(self.error("nth-child ordinals are 1-based"));
        }
        Ok(SimpleSelector::NthChild(ordinal))
    }

    fn parse_ident(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.peek() {
                Some('\\') => {
                    self.bump();
                    out.push(self.parse_escape()?);
                }
                Some(c) if is_ident_char(c) => {
                    self.bump();
                    out.push(c);
                }
                _ => break,
            }
        }
        if out.is_empty() {
            return Err(self.error("expected identifier"));
        }
        Ok(out)
    }

    /// Inverse of CSS escaping: either a hex escape with an optional single
    /// whitespace terminator, or a literal escaped character
    fn parse_escape(&mut self) -> Result<char> {
        let first = self.peek().ok_or_else(|| self.error("dangling escape"))?;
        if !first.is_ascii_hexdigit() {
            self.bump();
            return Ok(first);
        }

        let mut hex = String::new();
        while hex.len() < 6 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }

        let code = u32::from_str_radix(&hex, 16)
            .map_err(|_| self.error("invalid hex escape"))?;
        Ok(char::from_u32(code).unwrap_or('\u{FFFD}'))
    }

    fn parse_string(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.parse_escape()?),
                Some(c) => out.push(c),
            }
        }
    }
}
