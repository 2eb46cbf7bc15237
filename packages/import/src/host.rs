//! Capabilities the import flow needs from the host editor's document

use blockkit_document::{Document, Node, NodeKind, ParseError};

/// The host's document tree, as seen by the merger and patcher
pub trait DocumentHost {
    /// Replace the whole body with parsed markup
    fn set_components(&mut self, markup: &str);

    /// Parse `css` and append its rules, returning how many were added
    fn add_rules(&mut self, css: &str) -> Result<usize, ParseError>;

    /// Remove every stylesheet rule
    fn clear_rules(&mut self);

    /// Call `visit` with every node whose identifier equals `identifier`,
    /// returning the number of matches
    fn visit_identifier(
        &mut self,
        identifier: &str,
        visit: &mut dyn FnMut(ComponentRef<'_>),
    ) -> usize;
}

/// Transient handle to one matched node
///
/// Only the content can be written; the tree's shape is out of reach.
#[derive(Debug)]
pub struct ComponentRef<'a> {
    node: &'a mut Node,
}

impl<'a> ComponentRef<'a> {
    pub fn new(node: &'a mut Node) -> Self {
        Self { node }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.node.identifier()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    pub fn tag(&self) -> Option<&str> {
        self.node.tag.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.node.content
    }

    /// Write the node's authoritative content
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.node.content = content.into();
    }

    /// Current markup of the node, derived from the model
    pub fn render(&self) -> String {
        self.node.to_html()
    }
}

impl DocumentHost for Document {
    fn set_components(&mut self, markup: &str) {
        Document::set_components(self, markup);
    }

    fn add_rules(&mut self, css: &str) -> Result<usize, ParseError> {
        Document::add_rules(self, css)
    }

    fn clear_rules(&mut self) {
        Document::clear_rules(self);
    }

    fn visit_identifier(
        &mut self,
        identifier: &str,
        visit: &mut dyn FnMut(ComponentRef<'_>),
    ) -> usize {
        self.visit_identifier_mut(identifier, |node| visit(ComponentRef::new(node)))
    }
}
