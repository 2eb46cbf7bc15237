use crate::document::Document;
use crate::node::Node;

/// Visitor pattern for traversing the document tree immutably
///
/// Default implementations walk the entire tree depth-first in document
/// order. Override `visit_node` to act on nodes.
pub trait Visitor<'doc>: Sized {
    fn visit_document(&mut self, doc: &'doc Document) {
        walk_document(self, doc);
    }

    fn visit_node(&mut self, node: &'doc Node) {
        walk_node(self, node);
    }
}

/// Mutable visitor pattern for editing nodes in place
///
/// Visitors may change node content and attributes. Adding or removing
/// children while walking is not supported.
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        walk_document_mut(self, doc);
    }

    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }
}

pub fn walk_document<'doc, V: Visitor<'doc>>(visitor: &mut V, doc: &'doc Document) {
    for node in &doc.body {
        visitor.visit_node(node);
    }
}

pub fn walk_node<'doc, V: Visitor<'doc>>(visitor: &mut V, node: &'doc Node) {
    for child in &node.children {
        visitor.visit_node(child);
    }
}

pub fn walk_document_mut<V: VisitorMut>(visitor: &mut V, doc: &mut Document) {
    for node in &mut doc.body {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    for child in &mut node.children {
        visitor.visit_node_mut(child);
    }
}

/// Collects every node carrying a given identifier
pub(crate) struct IdentifierFinder<'doc, 'id> {
    pub identifier: &'id str,
    pub found: Vec<&'doc Node>,
}

impl<'doc, 'id> Visitor<'doc> for IdentifierFinder<'doc, 'id> {
    fn visit_node(&mut self, node: &'doc Node) {
        if node.identifier() == Some(self.identifier) {
            self.found.push(node);
        }
        walk_node(self, node);
    }
}

/// Hands every node carrying a given identifier to a callback
pub(crate) struct IdentifierVisitor<'id, F> {
    pub identifier: &'id str,
    pub callback: F,
    pub matched: usize,
}

impl<'id, F: FnMut(&mut Node)> VisitorMut for IdentifierVisitor<'id, F> {
    fn visit_node_mut(&mut self, node: &mut Node) {
        if node.identifier() == Some(self.identifier) {
            (self.callback)(node);
            self.matched += 1;
        }
        walk_node_mut(self, node);
    }
}

/// Lists identifiers in document order, duplicates included
#[derive(Default)]
pub(crate) struct IdentifierCollector {
    pub identifiers: Vec<String>,
}

impl<'doc> Visitor<'doc> for IdentifierCollector {
    fn visit_node(&mut self, node: &'doc Node) {
        if let Some(identifier) = node.identifier() {
            self.identifiers.push(identifier.to_string());
        }
        walk_node(self, node);
    }
}
