use termdom::markup::{decode_entities, parse};
use termdom::{Child, Document, DomError, Element};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_nested_elements_and_attributes() {
    let children = parse(r#"<select-menu title="Pick one"><select-item value=1 text='Alpha' disabled/></select-menu>"#)
        .unwrap();

    assert_eq!(children.len(), 1);
    let menu = children[0].as_element().unwrap();
    assert_eq!(menu.tag, "select-menu");
    assert_eq!(menu.get_attr("title"), Some("Pick one"));

    let item = menu.children[0].as_element().unwrap();
    assert_eq!(item.tag, "select-item");
    assert_eq!(item.get_attr("value"), Some("1"));
    assert_eq!(item.get_attr("text"), Some("Alpha"));
    assert_eq!(item.get_attr("disabled"), Some(""));
    assert!(item.children.is_empty());
}

#[test]
fn test_parse_text_and_entities() {
    let children = parse("<p>a &amp; b &lt;c&gt; &#65;&#x42; &unknown;</p>").unwrap();
    let p = children[0].as_element().unwrap();
    assert_eq!(
        p.children,
        vec![Child::Text("a & b <c> AB &unknown;".to_string())]
    );
}

#[test]
fn test_parse_skips_comments_and_doctype() {
    let children = parse("<!doctype html><!-- note --><div>x</div>").unwrap();
    assert_eq!(children, vec![Child::Element(Element::div().text("x"))]);
}

#[test]
fn test_parse_void_and_raw_text_elements() {
    let children = parse("<div>a<br>b<style>.x > .y { }</style></div>").unwrap();
    let div = children[0].as_element().unwrap();
    assert_eq!(div.children.len(), 4);
    assert_eq!(div.children[1], Child::Element(Element::new("br")));
    assert_eq!(
        div.children[3],
        Child::Element(Element::new("style").text(".x > .y { }"))
    );
}

#[test]
fn test_parse_lowercases_names() {
    let children = parse("<DIV Data-Value=\"X\"></div>").unwrap();
    let div = children[0].as_element().unwrap();
    assert_eq!(div.tag, "div");
    assert_eq!(div.get_attr("data-value"), Some("X"));
}

#[test]
fn test_decode_entities_passthrough() {
    assert_eq!(decode_entities("plain"), "plain");
    assert_eq!(decode_entities("&quot;q&apos;"), "\"q'");
    assert_eq!(decode_entities("a & b"), "a & b");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_mismatched_closing_tag() {
    let err = parse("<div><span></div>").unwrap_err();
    match err {
        DomError::Markup { position, message } => {
            assert_eq!(position, 11);
            assert!(message.contains("</span>"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unclosed_and_stray_tags() {
    assert!(matches!(
        parse("<div><span></span>"),
        Err(DomError::Markup { position: 0, .. })
    ));
    assert!(matches!(
        parse("text</div>"),
        Err(DomError::Markup { position: 4, .. })
    ));
    assert!(matches!(parse("<div"), Err(DomError::Markup { .. })));
    assert!(matches!(parse("<!-- open"), Err(DomError::Markup { .. })));
}

#[test]
fn test_syntax_error_reports_position_and_expectation() {
    match parse("<div a=>x</div>").unwrap_err() {
        DomError::Markup { position, message } => {
            assert_eq!(position, 7);
            assert!(message.contains("attribute value"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }

    assert!(matches!(
        parse("a < b"),
        Err(DomError::Markup { position: 2, .. })
    ));
}

#[test]
fn test_unquoted_value_keeps_inner_slashes() {
    let children = parse("<a href=x/y/>").unwrap();
    let a = children[0].as_element().unwrap();
    assert_eq!(a.get_attr("href"), Some("x/y"));
    assert!(a.children.is_empty());
}

// ============================================================================
// Mounting
// ============================================================================

#[test]
fn test_append_markup_mounts_into_document() {
    let mut doc = Document::new();
    let body = doc.body();
    let nodes = doc
        .append_markup(body, "<ul class=\"list\"><li>one</li><li>two</li></ul>tail")
        .unwrap();

    assert_eq!(nodes.len(), 2);
    assert!(doc.has_class(nodes[0], "list"));
    assert_eq!(doc.text_content(nodes[0]), "onetwo");
    assert_eq!(doc.text_data(nodes[1]), Some("tail"));
    assert_eq!(doc.query_selector_all(body, "li").unwrap().len(), 2);
}
