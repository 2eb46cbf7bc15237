//! # Document
//!
//! The tree and stylesheet behind one editor canvas.
//!
//! ## Mutation paths
//!
//! ```text
//! set_components ──► body replaced     (destructive)
//! add_rules      ──► rules appended    (additive)
//! visit_identifier_mut ──► content written on matching nodes
//! ```
//!
//! Rendering (`to_html`, `to_css`) always re-derives output from the model,
//! so every mutation path above is reflected the next time it is read.

use crate::css::{parse_css, Stylesheet};
use crate::error::ParseResult;
use crate::html::parse_html;
use crate::node::Node;
use crate::visitor::{IdentifierCollector, IdentifierFinder, IdentifierVisitor, Visitor, VisitorMut};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level nodes of the body
    pub body: Vec<Node>,

    pub stylesheet: Stylesheet,

    /// Increments on each mutation
    pub version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from markup (version 0)
    pub fn from_html(markup: &str) -> Self {
        let mut doc = Self::new();
        doc.set_components(markup);
        doc.version = 0;
        doc
    }

    /// Replace the whole body with parsed `markup`
    ///
    /// `<style>` blocks found in the markup are appended to the stylesheet,
    /// skipping rules it already holds so reapplying the same markup is stable.
    pub fn set_components(&mut self, markup: &str) {
        let parsed = parse_html(markup);
        info!(
            nodes = parsed.nodes.len(),
            styles = parsed.styles.len(),
            "Replacing document body"
        );

        self.body = parsed.nodes;
        for style in &parsed.styles {
            let rules = match parse_css(style) {
                Ok(rules) => rules,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed <style> block");
                    continue;
                }
            };
            for rule in rules {
                if self.stylesheet.rules().contains(&rule) {
                    debug!(selectors = %rule.selectors, "Rule already present");
                    continue;
                }
                self.stylesheet.push(rule);
            }
        }
        self.version += 1;
    }

    /// Parse `css` and append its rules
    pub fn add_rules(&mut self, css: &str) -> ParseResult<usize> {
        let added = self.stylesheet.add_rules(css)?;
        debug!(added, total = self.stylesheet.len(), "Appended CSS rules");
        self.version += 1;
        Ok(added)
    }

    pub fn clear_rules(&mut self) {
        self.stylesheet.clear();
        self.version += 1;
    }

    /// Empty both the body and the stylesheet
    pub fn clear(&mut self) {
        self.body.clear();
        self.stylesheet.clear();
        self.version += 1;
    }

    /// Call `callback` on every node whose identifier equals `identifier`
    /// (exact, case-sensitive). Returns the number of matches.
    pub fn visit_identifier_mut<F: FnMut(&mut Node)>(&mut self, identifier: &str, callback: F) -> usize {
        let mut visitor = IdentifierVisitor {
            identifier,
            callback,
            matched: 0,
        };
        visitor.visit_document_mut(self);

        if visitor.matched > 0 {
            self.version += 1;
        }
        visitor.matched
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Vec<&Node> {
        let mut finder = IdentifierFinder {
            identifier,
            found: Vec::new(),
        };
        finder.visit_document(self);
        finder.found
    }

    /// Every identifier in document order
    pub fn identifiers(&self) -> Vec<String> {
        let mut collector = IdentifierCollector::default();
        collector.visit_document(self);
        collector.identifiers
    }

    pub fn node_count(&self) -> usize {
        self.body.iter().map(Node::subtree_len).sum()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.body {
            node.write_html(&mut out);
        }
        out
    }

    pub fn to_css(&self) -> String {
        self.stylesheet.to_css()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn test_set_components_replaces_body() {
        let mut doc = Document::from_html("<p id=\"a\">one</p>");
        doc.set_components("<h1 id=\"b\">two</h1>");

        assert_eq!(doc.body.len(), 1);
        assert!(doc.find_by_identifier("a").is_empty());
        assert_eq!(doc.find_by_identifier("b").len(), 1);
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_set_components_moves_styles_into_stylesheet() {
        let mut doc = Document::new();
        doc.add_rules(".kept{a:b}").unwrap();
        doc.set_components("<style>.new{c:d}</style><p>x</p>");

        assert_eq!(doc.stylesheet.len(), 2);
        assert_eq!(doc.to_css(), ".kept{a:b;}.new{c:d;}");
    }

    #[test]
    fn test_reapplying_markup_does_not_duplicate_styles() {
        let markup = r#"<style>.hero{color:red}</style><h1 id="t">x</h1>"#;
        let mut doc = Document::new();

        doc.set_components(markup);
        doc.set_components(markup);

        assert_eq!(doc.stylesheet.len(), 1);
        assert_eq!(doc.to_css(), ".hero{color:red;}");
        assert_eq!(doc.find_by_identifier("t").len(), 1);
        assert_eq!(doc.version, 2);
    }

    #[test]
    fn test_visit_identifier_mut_counts_all_matches() {
        let mut doc = Document::from_html(
            r#"<p id="dup">a</p><div id="x"><p id="dup">b</p></div><p id="Dup">c</p>"#,
        );

        let matched = doc.visit_identifier_mut("dup", |node| node.content = "z".to_string());

        assert_eq!(matched, 2);
        assert_eq!(
            doc.to_html(),
            r#"<p id="dup">z</p><div id="x"><p id="dup">z</p></div><p id="Dup">c</p>"#
        );
    }

    #[test]
    fn test_visit_identifier_mut_without_match_keeps_version() {
        let mut doc = Document::from_html("<p id=\"a\">a</p>");
        let before = doc.clone();

        assert_eq!(doc.visit_identifier_mut("missing", |_| {}), 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_nested_matches_both_visited() {
        let mut doc = Document::from_html(r#"<div id="n"><div id="n"><p>t</p></div></div>"#);
        let mut kinds = Vec::new();
        doc.visit_identifier_mut("n", |node| kinds.push(node.kind));
        assert_eq!(kinds, vec![NodeKind::Element, NodeKind::Element]);
    }

    #[test]
    fn test_identifiers_and_node_count() {
        let doc = Document::from_html(r#"<div id="a"><p id="b">x</p><p>y</p></div>"#);
        assert_eq!(doc.identifiers(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(doc.node_count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut doc = Document::from_html("<style>a{b:c}</style><p>x</p>");
        doc.clear();
        assert!(doc.body.is_empty());
        assert!(doc.stylesheet.is_empty());
    }
}
