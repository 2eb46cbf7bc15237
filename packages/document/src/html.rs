//! Lenient HTML parser producing document nodes
//!
//! Recovers from unbalanced markup the way browsers do: unknown closing tags
//! are ignored, unclosed elements are closed at end of input. `<style>`
//! blocks are lifted out so their rules can join the stylesheet.

use crate::lexer::{AttrToken, MarkupToken};
use crate::node::{Node, NodeKind};
use logos::{Lexer, Logos};
use tracing::debug;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements that are text components even when empty
const TEXT_ELEMENTS: &[&str] = &[
    "a", "b", "blockquote", "button", "code", "em", "figcaption", "h1", "h2", "h3", "h4", "h5",
    "h6", "i", "label", "li", "p", "pre", "small", "span", "strong", "td", "textarea", "th",
    "title",
];

/// Opening one of these closes an open element of the same name
const SELF_NESTING_CLOSERS: &[&str] = &["li", "p", "option", "tr", "td", "th", "dt", "dd"];

pub(crate) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub(crate) fn is_raw_text(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Result of parsing a markup source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMarkup {
    /// Top-level nodes (the body's children for full documents)
    pub nodes: Vec<Node>,

    /// Raw text of every `<style>` block, in source order
    pub styles: Vec<String>,
}

/// Parse markup into nodes
pub fn parse_html(source: &str) -> ParsedMarkup {
    let mut parser = HtmlParser {
        lexer: MarkupToken::lexer(source),
        stack: Vec::new(),
        roots: Vec::new(),
        styles: Vec::new(),
    };
    parser.run();
    parser.finish()
}

struct HtmlParser<'src> {
    lexer: Lexer<'src, MarkupToken<'src>>,
    stack: Vec<Node>,
    roots: Vec<Node>,
    styles: Vec<String>,
}

impl<'src> HtmlParser<'src> {
    fn run(&mut self) {
        while let Some(result) = self.lexer.next() {
            match result {
                Ok(MarkupToken::Comment(_)) | Ok(MarkupToken::Declaration(_)) => {}
                Ok(MarkupToken::Text(text)) => self.push_text(text),
                Ok(MarkupToken::OpenTag(raw)) => self.open_tag(raw),
                Ok(MarkupToken::CloseTag(raw)) => self.close_tag(raw),
                Err(_) => {
                    // Stray '<' or a tag cut off by end of input
                    let text = self.lexer.slice();
                    self.push_text(text);
                }
            }
        }
    }

    fn finish(mut self) -> ParsedMarkup {
        while !self.stack.is_empty() {
            self.pop_element();
        }

        drop_blank_text(&mut self.roots);
        ParsedMarkup {
            nodes: extract_body(self.roots),
            styles: self.styles,
        }
    }

    fn push_text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };

        if let Some(last) = siblings.last_mut() {
            if last.tag.is_none() {
                last.content.push_str(&decoded);
                return;
            }
        }
        siblings.push(Node::text(decoded));
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn open_tag(&mut self, raw: &str) {
        let (name, attributes, self_closing) = parse_open_tag(raw);

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            let content = self.consume_raw_text(&name);
            if name == "style" {
                self.styles.push(content);
                return;
            }
            // Escapable raw text (textarea, title) still carries entities
            let content = if is_raw_text(&name) {
                content
            } else {
                decode_entities(&content)
            };
            let mut node = Node::element(name);
            node.attributes = attributes;
            node.content = content;
            self.push_node(classify(node));
            return;
        }

        if SELF_NESTING_CLOSERS.contains(&name.as_str())
            && self.stack.last().and_then(|n| n.tag.as_deref()) == Some(name.as_str())
        {
            self.pop_element();
        }

        let mut node = Node::element(name);
        node.attributes = attributes;

        let is_void_tag = node.tag.as_deref().map(is_void).unwrap_or(false);
        if is_void_tag || self_closing {
            self.push_node(classify(node));
        } else {
            self.stack.push(node);
        }
    }

    fn close_tag(&mut self, raw: &str) {
        let name = tag_name(&raw[2..]);
        let Some(depth) = self
            .stack
            .iter()
            .rposition(|n| n.tag.as_deref() == Some(name.as_str()))
        else {
            debug!(tag = %name, "Ignoring unmatched closing tag");
            return;
        };

        while self.stack.len() > depth {
            self.pop_element();
        }
    }

    fn pop_element(&mut self) {
        if let Some(node) = self.stack.pop() {
            let node = classify(node);
            self.push_node(node);
        }
    }

    /// Take everything up to the matching close tag verbatim
    fn consume_raw_text(&mut self, name: &str) -> String {
        let rest = self.lexer.remainder();
        let lowered = rest.to_ascii_lowercase();
        let needle = format!("</{}", name);

        let (content_len, consumed) = match lowered.find(&needle) {
            Some(start) => {
                let close_end = lowered[start..]
                    .find('>')
                    .map(|i| start + i + 1)
                    .unwrap_or(rest.len());
                (start, close_end)
            }
            None => (rest.len(), rest.len()),
        };

        let content = rest[..content_len].to_string();
        self.lexer.bump(consumed);
        content
    }
}

/// Decide whether a finished element is a text component
fn classify(mut node: Node) -> Node {
    let Some(tag) = node.tag.as_deref() else {
        return node;
    };

    if is_void(tag) || tag == "script" {
        node.kind = NodeKind::Element;
        return node;
    }

    let only_text = node.children.iter().all(|c| c.tag.is_none());
    if !only_text {
        drop_blank_text(&mut node.children);
    }
    if only_text && (!node.children.is_empty() || TEXT_ELEMENTS.contains(&tag)) {
        let text: String = node.children.drain(..).map(|c| c.content).collect();
        node.content.push_str(&text);
        node.kind = NodeKind::Text;
    } else {
        node.kind = NodeKind::Element;
    }
    node
}

/// Whitespace between elements does not become a node
fn drop_blank_text(nodes: &mut Vec<Node>) {
    nodes.retain(|n| n.tag.is_some() || !n.content.trim().is_empty());
}

/// Full documents contribute only the children of `<body>`
fn extract_body(roots: Vec<Node>) -> Vec<Node> {
    let has_document_root = roots
        .iter()
        .any(|n| matches!(n.tag.as_deref(), Some("html") | Some("body")));
    if !has_document_root {
        return roots;
    }

    let mut nodes = Vec::new();
    for root in roots {
        match root.tag.as_deref() {
            Some("html") => {
                let mut found_body = false;
                let mut loose = Vec::new();
                for child in into_child_nodes(root) {
                    match child.tag.as_deref() {
                        Some("body") => {
                            found_body = true;
                            nodes.extend(into_child_nodes(child));
                        }
                        Some("head") => {}
                        _ => loose.push(child),
                    }
                }
                if !found_body {
                    nodes.extend(loose);
                }
            }
            Some("body") => nodes.extend(into_child_nodes(root)),
            Some("head") => {}
            _ if root.tag.is_none() && root.content.trim().is_empty() => {}
            _ => nodes.push(root),
        }
    }
    nodes
}

/// Children of a container, recovering text that classification folded into content
fn into_child_nodes(node: Node) -> Vec<Node> {
    if node.kind == NodeKind::Text {
        if node.content.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(node.content)]
        }
    } else {
        node.children
    }
}

fn tag_name(raw: &str) -> String {
    raw.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '.' | '-'))
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Split `<tag a="b" c>` into its name, attributes and self-closing flag
fn parse_open_tag(raw: &str) -> (String, Vec<(String, String)>, bool) {
    let inner = &raw[1..raw.len() - 1];
    let name = tag_name(inner);
    let rest = &inner[name.len()..];

    let mut attributes: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;
    let mut pending: Option<String> = None;
    let mut lexer = AttrToken::lexer(rest);

    while let Some(token) = lexer.next() {
        match token {
            Ok(AttrToken::Word(word)) => {
                if let Some(prev) = pending.replace(word.to_ascii_lowercase()) {
                    push_attribute(&mut attributes, prev, String::new());
                }
                self_closing = false;
            }
            Ok(AttrToken::Eq) => {
                let value = read_attribute_value(&mut lexer);
                if let Some(name) = pending.take() {
                    push_attribute(&mut attributes, name, decode_entities(&value));
                }
            }
            Ok(AttrToken::Slash) => self_closing = true,
            Ok(AttrToken::DoubleQuoted(_)) | Ok(AttrToken::SingleQuoted(_)) | Err(_) => {}
        }
    }

    if let Some(name) = pending.take() {
        push_attribute(&mut attributes, name, String::new());
    }

    (name, attributes, self_closing)
}

/// Read a value after `=`: a quoted string or adjacent unquoted pieces
fn read_attribute_value<'src>(lexer: &mut Lexer<'src, AttrToken<'src>>) -> String {
    let mut value = String::new();
    let mut end: Option<usize> = None;

    loop {
        let mut peek = lexer.clone();
        let Some(Ok(token)) = peek.next() else {
            break;
        };
        let span = peek.span();
        if let Some(end) = end {
            if span.start != end {
                break;
            }
        }

        match token {
            AttrToken::DoubleQuoted(text) | AttrToken::SingleQuoted(text) if end.is_none() => {
                *lexer = peek;
                return text.to_string();
            }
            AttrToken::Word(text) => value.push_str(text),
            AttrToken::Slash => value.push('/'),
            _ => break,
        }
        end = Some(span.end);
        *lexer = peek;
    }

    value
}

fn push_attribute(attributes: &mut Vec<(String, String)>, name: String, value: String) {
    // First occurrence wins, as in browsers
    if !attributes.iter().any(|(existing, _)| *existing == name) {
        attributes.push((name, value));
    }
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
