//! # Blockkit Document
//!
//! The document tree behind the page-builder canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ lexer: markup/css text → tokens (logos)     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ html / css: tokens → Node tree / CssRule    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: body + stylesheet                 │
//! │  - replace body, append rules               │
//! │  - address nodes by identifier              │
//! │  - render HTML/CSS from the model           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The model is the source of truth**: rendered markup is always derived
//!    from [`Node::content`] and children, never cached separately.
//! 2. **Lenient markup**: HTML parsing never fails, unknown or unbalanced
//!    tags are recovered the way browsers do.
//! 3. **Strict structure for CSS**: unbalanced braces are reported as
//!    [`ParseError`]s so callers can skip the contribution.
//!
//! ## Usage
//!
//! ```rust
//! use blockkit_document::Document;
//!
//! let mut doc = Document::from_html(r#"<h1 id="Title">Old</h1>"#);
//! doc.add_rules("h1 { color: red; }").unwrap();
//!
//! doc.visit_identifier_mut("Title", |node| node.content = "New".to_string());
//! assert_eq!(doc.to_html(), r#"<h1 id="Title">New</h1>"#);
//! assert_eq!(doc.to_css(), "h1{color:red;}");
//! ```

pub mod css;
pub mod document;
pub mod error;
pub mod html;
pub mod lexer;
pub mod node;
pub mod visitor;

pub use css::{parse_css, CssRule, Declaration, Stylesheet};
pub use document::Document;
pub use error::{ParseError, ParseResult};
pub use html::{parse_html, ParsedMarkup};
pub use node::{Node, NodeKind};
pub use visitor::{Visitor, VisitorMut};
