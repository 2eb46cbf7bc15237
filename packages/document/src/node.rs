//! Document tree nodes and the HTML they render to

use crate::html::{escape_attribute, escape_text, is_raw_text, is_void};
use serde::{Deserialize, Serialize};

/// Attribute holding a node's identifier
pub const IDENTIFIER_ATTRIBUTE: &str = "id";

/// How a node's content is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Content is the node's text (bare text nodes and textual elements)
    Text,
    /// Structural element; content renders ahead of the children
    Element,
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,

    /// Tag name, `None` for bare text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Attributes in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,

    /// Authoritative text content
    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Bare text node
    pub fn text(content: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Text,
            tag: None,
            attributes: Vec::new(),
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Structural element with no content or children
    pub fn element(tag: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Element,
            tag: Some(tag.into()),
            attributes: Vec::new(),
            content: String::new(),
            children: Vec::new(),
        }
    }

    /// Textual element such as `<h1>` or `<p>`
    pub fn text_element(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Text,
            tag: Some(tag.into()),
            attributes: Vec::new(),
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_id(self, identifier: impl Into<String>) -> Self {
        self.with_attr(IDENTIFIER_ATTRIBUTE, identifier)
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Value of the identifier attribute, if any
    pub fn identifier(&self) -> Option<&str> {
        self.attribute(IDENTIFIER_ATTRIBUTE)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Render this node. Output is derived from the model only.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        let Some(tag) = &self.tag else {
            out.push_str(&escape_text(&self.content));
            return;
        };

        out.push('<');
        out.push_str(tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
        }
        out.push('>');

        if is_void(tag) {
            return;
        }

        if is_raw_text(tag) {
            out.push_str(&self.content);
        } else {
            out.push_str(&escape_text(&self.content));
        }
        for child in &self.children {
            child.write_html(out);
        }

        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_reads_id_attribute() {
        let node = Node::text_element("h1", "Hi").with_id("Title");
        assert_eq!(node.identifier(), Some("Title"));
        assert_eq!(Node::text("loose").identifier(), None);
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut node = Node::element("div").with_attr("class", "a").with_id("x");
        node.set_attribute("class", "b");

        assert_eq!(
            node.attributes,
            vec![
                ("class".to_string(), "b".to_string()),
                ("id".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_text_element_escapes_content() {
        let node = Node::text_element("p", "a < b & c").with_id("P");
        assert_eq!(node.to_html(), r#"<p id="P">a &lt; b &amp; c</p>"#);
    }

    #[test]
    fn test_render_element_content_precedes_children() {
        let node = Node::element("section")
            .with_content("Intro")
            .with_child(Node::text_element("p", "Body"));

        assert_eq!(node.to_html(), "<section>Intro<p>Body</p></section>");
    }

    #[test]
    fn test_render_void_and_boolean_attributes() {
        let node = Node::element("input").with_attr("disabled", "").with_attr("value", "\"q\"");
        assert_eq!(node.to_html(), r#"<input disabled value="&quot;q&quot;">"#);
    }

    #[test]
    fn test_subtree_len() {
        let node = Node::element("ul")
            .with_child(Node::text_element("li", "a"))
            .with_child(Node::text_element("li", "b"));
        assert_eq!(node.subtree_len(), 3);
    }
}
