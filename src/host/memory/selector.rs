//! Minimal CSS selector matching for the in-memory host.
//!
//! Supports selector lists of compound selectors: an optional tag name
//! followed by any number of `.class`, `#id`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]` and `[attr*="v"]` parts. Combinators are not supported.

use std::iter::Peekable;
use std::str::Chars;

use super::MemElement;

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectorList(Vec<Compound>);

impl SelectorList {
    /// Returns `None` for selectors outside the supported subset.
    pub(crate) fn parse(selector: &str) -> Option<Self> {
        let compounds = selector
            .split(',')
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        Some(Self(compounds))
    }

    pub(crate) fn matches(&self, element: &MemElement) -> bool {
        self.0.iter().any(|compound| compound.matches(element))
    }
}

impl Compound {
    fn matches(&self, element: &MemElement) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.classes.contains(class)) {
            return false;
        }
        self.attrs.iter().all(|attr| {
            let Some(value) = element.attribute(&attr.name) else {
                return false;
            };
            match &attr.op {
                AttrOp::Exists => true,
                AttrOp::Equals(expected) => value == expected.as_str(),
                AttrOp::Prefix(prefix) => value.starts_with(prefix.as_str()),
                AttrOp::Contains(needle) => value.contains(needle.as_str()),
            }
        })
    }
}

fn parse_compound(input: &str) -> Option<Compound> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut chars = input.chars().peekable();
    let mut compound = Compound::default();

    if chars.peek() == Some(&'*') {
        chars.next();
    } else {
        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            compound.tag = Some(tag);
        }
    }

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                let class = take_ident(&mut chars);
                if class.is_empty() {
                    return None;
                }
                compound.classes.push(class);
            }
            '#' => {
                let id = take_ident(&mut chars);
                if id.is_empty() {
                    return None;
                }
                compound.id = Some(id);
            }
            '[' => {
                let mut body = String::new();
                let mut closed = false;
                for ch in chars.by_ref() {
                    if ch == ']' {
                        closed = true;
                        break;
                    }
                    body.push(ch);
                }
                if !closed {
                    return None;
                }
                compound.attrs.push(parse_attr(&body)?);
            }
            _ => return None,
        }
    }

    Some(compound)
}

fn parse_attr(body: &str) -> Option<AttrMatch> {
    let (name, op) = if let Some((name, value)) = body.split_once("^=") {
        (name, AttrOp::Prefix(unquote(value)))
    } else if let Some((name, value)) = body.split_once("*=") {
        (name, AttrOp::Contains(unquote(value)))
    } else if let Some((name, value)) = body.split_once('=') {
        (name, AttrOp::Equals(unquote(value)))
    } else {
        (body, AttrOp::Exists)
    };

    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(AttrMatch {
        name: name.to_string(),
        op,
    })
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
        .to_string()
}

fn take_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&ch) = chars.peek() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            ident.push(ch);
            chars.next();
        } else {
            break;
        }
    }
    ident
}
