use termdom::{ClassList, Document, DomError, Element, Lifecycle, NodeId};

fn mounted(doc: &mut Document, template: Element) -> NodeId {
    let body = doc.body();
    doc.mount(body, &template).unwrap()
}

// ============================================================================
// Tree Structure
// ============================================================================

#[test]
fn test_new_document_has_connected_body() {
    let doc = Document::new();
    assert_eq!(doc.parent(doc.body()), Some(doc.root()));
    assert_eq!(doc.tag(doc.body()), Some("body"));
    assert!(doc.is_connected(doc.body()));
}

#[test]
fn test_append_and_remove() {
    let mut doc = Document::new();
    let list = mounted(&mut doc, Element::div().id("list"));
    let a = doc.create_element("span");
    let b = doc.create_text("hello");

    doc.append_child(list, a).unwrap();
    doc.append_child(list, b).unwrap();
    assert_eq!(doc.children(list), &[a, b]);
    assert!(doc.is_connected(a));
    assert!(doc.contains(list, b));
    assert_eq!(doc.child_elements(list), vec![a]);

    doc.remove(a).unwrap();
    assert_eq!(doc.children(list), &[b]);
    assert!(!doc.is_connected(a));
    assert_eq!(doc.parent(a), None);
}

#[test]
fn test_append_moves_existing_child() {
    let mut doc = Document::new();
    let first = mounted(&mut doc, Element::div());
    let second = mounted(&mut doc, Element::div());
    let child = doc.mount(first, &Element::span()).unwrap();

    doc.append_child(second, child).unwrap();

    assert!(doc.children(first).is_empty());
    assert_eq!(doc.children(second), &[child]);
}

#[test]
fn test_append_rejects_cycles_and_text_parents() {
    let mut doc = Document::new();
    let outer = mounted(&mut doc, Element::div());
    let inner = doc.mount(outer, &Element::div()).unwrap();
    let text = doc.create_text("x");

    assert!(matches!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        doc.append_child(text, inner),
        Err(DomError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_unknown_node_is_an_error() {
    let mut doc = Document::new();
    let other = {
        let mut scratch = Document::new();
        for _ in 0..10 {
            scratch.create_element("div");
        }
        scratch.create_element("div")
    };

    assert!(!doc.exists(other));
    assert!(matches!(
        doc.set_attribute(other, "a", "b"),
        Err(DomError::UnknownNode(_))
    ));
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_attribute_round_trip() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div().attr("value", "1"));

    assert_eq!(doc.get_attribute(el, "value").as_deref(), Some("1"));
    doc.set_attribute(el, "value", "").unwrap();
    assert_eq!(doc.get_attribute(el, "value").as_deref(), Some(""));
    assert!(doc.has_attribute(el, "value"));

    assert!(doc.remove_attribute(el, "value").unwrap());
    assert!(!doc.remove_attribute(el, "value").unwrap());
    assert_eq!(doc.get_attribute(el, "value"), None);
}

#[test]
fn test_attribute_names_are_case_insensitive() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div());

    doc.set_attribute(el, "Data-Value", "x").unwrap();
    assert_eq!(doc.get_attribute(el, "data-value").as_deref(), Some("x"));
    assert_eq!(doc.attribute_names(el), vec!["data-value".to_string()]);
}

#[test]
fn test_attribute_reads_use_the_same_case_folding_as_writes() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div());

    doc.set_attribute(el, "Title", "y").unwrap();
    assert_eq!(doc.get_attribute(el, "Title").as_deref(), Some("y"));
    assert_eq!(doc.get_attribute(el, "TITLE").as_deref(), Some("y"));
    assert!(doc.has_attribute(el, "Title"));

    assert!(doc.remove_attribute(el, "tItLe").unwrap());
    assert!(!doc.has_attribute(el, "Title"));
}

#[test]
fn test_class_attribute_reflects_class_list() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div().attr("class", "a b").class("c"));

    assert_eq!(doc.get_attribute(el, "class").as_deref(), Some("a b c"));
    doc.set_attribute(el, "class", "x  y").unwrap();
    assert!(doc.has_class(el, "x"));
    assert!(!doc.has_class(el, "a"));
    assert_eq!(doc.get_attribute(el, "class").as_deref(), Some("x y"));
}

// ============================================================================
// Class List
// ============================================================================

#[test]
fn test_class_list_operations() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div());

    assert!(doc.add_class(el, "active").unwrap());
    assert!(!doc.add_class(el, "active").unwrap());
    assert!(doc.has_class(el, "active"));

    assert!(!doc.toggle_class(el, "active").unwrap());
    assert!(!doc.has_class(el, "active"));
    assert!(doc.toggle_class(el, "active").unwrap());

    assert!(doc.remove_class(el, "active").unwrap());
    assert!(!doc.remove_class(el, "active").unwrap());
}

#[test]
fn test_class_list_parse_dedupes() {
    let list = ClassList::parse(" a b  a c ");
    assert_eq!(list.to_string(), "a b c");
    assert_eq!(list.iter().count(), 3);
}

#[test]
fn test_classes_on_text_node_fail() {
    let mut doc = Document::new();
    let text = doc.create_text("x");
    assert!(matches!(
        doc.add_class(text, "a"),
        Err(DomError::NotAnElement(_))
    ));
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_text_content() {
    let mut doc = Document::new();
    let el = mounted(
        &mut doc,
        Element::div().text("a").child(Element::span().text("b")).text("c"),
    );

    assert_eq!(doc.text_content(el), "abc");

    doc.set_text_content(el, "replaced").unwrap();
    assert_eq!(doc.text_content(el), "replaced");
    assert_eq!(doc.children(el).len(), 1);

    doc.set_text_content(el, "").unwrap();
    assert!(doc.children(el).is_empty());
}

#[test]
fn test_set_text_content_rewrites_single_text_child_in_place() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::span().text("before"));
    let text = doc.children(el)[0];
    let count = doc.node_count();

    for i in 0..100 {
        doc.set_text_content(el, &format!("label {i}")).unwrap();
    }

    assert_eq!(doc.children(el), &[text]);
    assert_eq!(doc.text_data(text), Some("label 99"));
    assert_eq!(doc.node_count(), count);
}

// ============================================================================
// Node Storage
// ============================================================================

#[test]
fn test_remove_children_frees_subtrees() {
    let mut doc = Document::new();
    let list = mounted(&mut doc, Element::div());
    let baseline = doc.node_count();
    let item = doc
        .mount(list, &Element::div().child(Element::span().text("x")))
        .unwrap();
    let span = doc.children(item)[0];
    let shadow = doc.attach_shadow(span).unwrap();
    let inner = doc.mount(shadow, &Element::div()).unwrap();
    doc.add_event_listener(inner, termdom::EventKind::Click, |_, _| {})
        .unwrap();
    doc.add_event_listener(list, termdom::EventKind::Click, |_, _| {})
        .unwrap();

    doc.remove_children(list).unwrap();

    assert_eq!(doc.node_count(), baseline);
    for id in [item, span, shadow, inner] {
        assert!(!doc.exists(id));
    }
    assert!(matches!(
        doc.set_attribute(item, "a", "b"),
        Err(DomError::UnknownNode(_))
    ));
    assert_eq!(doc.listener_count(), 1);
    assert!(doc.exists(list));
}

#[test]
fn test_freed_slot_does_not_revive_old_id() {
    let mut doc = Document::new();
    let list = mounted(&mut doc, Element::div());
    let old = doc.mount(list, &Element::div()).unwrap();

    doc.remove_children(list).unwrap();
    let new = doc.mount(list, &Element::div()).unwrap();

    assert_ne!(old, new);
    assert!(!doc.exists(old));
    assert!(doc.exists(new));
}

#[test]
fn test_removed_node_stays_alive_for_reinsertion() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div().text("kept"));

    doc.remove(el).unwrap();
    assert!(doc.exists(el));

    let body = doc.body();
    doc.append_child(body, el).unwrap();
    assert_eq!(doc.text_content(el), "kept");
}

// ============================================================================
// Lifecycle Records
// ============================================================================

#[test]
fn test_lifecycle_connected_in_tree_order() {
    let mut doc = Document::new();
    let outer = doc.build(&Element::div().child(Element::span()).child(Element::div()));
    let children = doc.child_elements(outer);

    doc.append_child(doc.body(), outer).unwrap();

    assert_eq!(
        doc.take_lifecycle(),
        vec![
            Lifecycle::Connected(outer),
            Lifecycle::Connected(children[0]),
            Lifecycle::Connected(children[1]),
        ]
    );
    assert!(!doc.has_pending_lifecycle());
}

#[test]
fn test_lifecycle_detached_changes_are_silent() {
    let mut doc = Document::new();
    let el = doc.create_element("div");
    doc.set_attribute(el, "title", "x").unwrap();
    doc.add_class(el, "a").unwrap();
    assert!(doc.take_lifecycle().is_empty());
}

#[test]
fn test_lifecycle_attribute_changes() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div().attr("title", "old"));
    doc.take_lifecycle();

    doc.set_attribute(el, "title", "new").unwrap();
    doc.remove_attribute(el, "title").unwrap();
    doc.add_class(el, "active").unwrap();
    // No change, no record.
    doc.add_class(el, "active").unwrap();

    assert_eq!(
        doc.take_lifecycle(),
        vec![
            Lifecycle::AttributeChanged {
                element: el,
                name: "title".into(),
                old: Some("old".into()),
                new: Some("new".into()),
            },
            Lifecycle::AttributeChanged {
                element: el,
                name: "title".into(),
                old: Some("new".into()),
                new: None,
            },
            Lifecycle::AttributeChanged {
                element: el,
                name: "class".into(),
                old: None,
                new: Some("active".into()),
            },
        ]
    );
}

#[test]
fn test_lifecycle_disconnected_on_remove() {
    let mut doc = Document::new();
    let el = mounted(&mut doc, Element::div().child(Element::span()));
    let span = doc.child_elements(el)[0];
    doc.take_lifecycle();

    doc.remove(el).unwrap();

    assert_eq!(
        doc.take_lifecycle(),
        vec![Lifecycle::Disconnected(el), Lifecycle::Disconnected(span)]
    );
}

#[test]
fn test_lifecycle_includes_shadow_tree_before_light_children() {
    let mut doc = Document::new();
    let host = doc.build(&Element::new("x-host").child(Element::span()));
    let light = doc.child_elements(host)[0];
    let shadow = doc.attach_shadow(host).unwrap();
    let inner = doc.mount(shadow, &Element::div()).unwrap();
    assert!(doc.take_lifecycle().is_empty());

    doc.append_child(doc.body(), host).unwrap();

    assert_eq!(
        doc.take_lifecycle(),
        vec![
            Lifecycle::Connected(host),
            Lifecycle::Connected(inner),
            Lifecycle::Connected(light),
        ]
    );
}
