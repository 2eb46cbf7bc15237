//! Integration tests for the document model

use blockkit_document::{parse_css, Document, Node, NodeKind};

const PAGE: &str = r#"
    <header id="top">
        <h1 id="Title">Welcome</h1>
        <p id="Lead" class="lead">First &amp; foremost</p>
    </header>
    <main>
        <img src="hero.png" alt="Hero">
        <ul id="features">
            <li id="f1">Fast</li>
            <li id="f2">Small</li>
        </ul>
    </main>
"#;

#[test]
fn test_replacing_body_twice_is_idempotent() {
    let mut doc = Document::from_html("<p id=\"old\">gone</p>");

    doc.set_components(PAGE.trim());
    let first = doc.body.clone();
    doc.set_components(PAGE.trim());

    assert_eq!(doc.body, first);
    assert!(doc.find_by_identifier("old").is_empty());
}

#[test]
fn test_stylesheets_concatenate_in_order() {
    let s1 = ".a { color: red } .b { color: green }";
    let s2 = "@media print { .a { display: none } } .c { color: blue }";

    let mut doc = Document::new();
    doc.add_rules(s1).unwrap();
    doc.add_rules(s2).unwrap();

    let mut expected = parse_css(s1).unwrap();
    expected.extend(parse_css(s2).unwrap());
    assert_eq!(doc.stylesheet.rules(), expected.as_slice());
}

#[test]
fn test_page_structure() {
    let doc = Document::from_html(PAGE);

    assert_eq!(doc.body.len(), 2);
    assert_eq!(
        doc.identifiers(),
        vec!["top", "Title", "Lead", "features", "f1", "f2"]
    );

    let lead = doc.find_by_identifier("Lead");
    assert_eq!(lead[0].kind, NodeKind::Text);
    assert_eq!(lead[0].content, "First & foremost");
    assert_eq!(lead[0].attribute("class"), Some("lead"));
}

#[test]
fn test_rendering_follows_model_edits() {
    let mut doc = Document::from_html(PAGE);

    doc.visit_identifier_mut("Title", |node| node.content = "Hello <you>".to_string());
    doc.visit_identifier_mut("features", |node| node.content = "Why:".to_string());

    let html = doc.to_html();
    assert!(html.contains(r#"<h1 id="Title">Hello &lt;you&gt;</h1>"#));
    assert!(html.contains(r#"<ul id="features">Why:<li id="f1">Fast</li>"#));

    // Re-parsing what we rendered yields the same model
    let reparsed = Document::from_html(&html);
    assert_eq!(reparsed.find_by_identifier("Title")[0].content, "Hello <you>");
}

#[test]
fn test_document_serializes_to_json() {
    let doc = Document::from_html(r#"<p id="a">x</p>"#);
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["body"][0]["kind"], "text");
    assert_eq!(json["body"][0]["tag"], "p");
    assert_eq!(json["body"][0]["content"], "x");

    let back: Document = serde_json::from_value(json).unwrap();
    assert_eq!(back.body[0], Node::text_element("p", "x").with_id("a"));
}
