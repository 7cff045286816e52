use std::cell::RefCell;
use std::rc::Rc;

use termdom::{Document, DomError, Element, EventKind, MouseButton, NodeId};

type Log = Rc<RefCell<Vec<String>>>;

struct Fixture {
    doc: Document,
    host: NodeId,
    shadow: NodeId,
    inner: NodeId,
    light: NodeId,
}

/// `body > x-host[#shadow: div.inner > slot] > span.light`
fn fixture() -> Fixture {
    let mut doc = Document::new();
    let host = doc
        .mount(
            doc.body(),
            &Element::new("x-host").child(Element::span().class("light").text("light")),
        )
        .unwrap();
    let light = doc.child_elements(host)[0];
    let shadow = doc.attach_shadow(host).unwrap();
    let inner = doc
        .mount(shadow, &Element::div().class("inner").child(Element::slot()))
        .unwrap();
    Fixture {
        doc,
        host,
        shadow,
        inner,
        light,
    }
}

fn record(doc: &mut Document, node: NodeId, name: &'static str, log: &Log) {
    let log = Rc::clone(log);
    doc.add_event_listener(node, EventKind::Click, move |_, event| {
        log.borrow_mut().push(format!(
            "{name}:{}",
            event.target().index()
        ));
    })
    .unwrap();
}

// ============================================================================
// Composed Path
// ============================================================================

#[test]
fn test_composed_path_crosses_shadow_root() {
    let f = fixture();
    let path = f.doc.composed_path(f.inner);
    assert_eq!(
        path,
        vec![f.inner, f.shadow, f.host, f.doc.body(), f.doc.root()]
    );
}

#[test]
fn test_composed_path_of_slotted_node_goes_through_slot() {
    let f = fixture();
    let slot = f.doc.query_selector(f.shadow, "slot").unwrap().unwrap();
    let path = f.doc.composed_path(f.light);
    assert_eq!(
        path,
        vec![
            f.light,
            slot,
            f.inner,
            f.shadow,
            f.host,
            f.doc.body(),
            f.doc.root()
        ]
    );
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_bubbles_to_document() {
    let mut f = fixture();
    let log: Log = Rc::default();
    record(&mut f.doc, f.inner, "inner", &log);
    record(&mut f.doc, f.host, "host", &log);
    let root = f.doc.root();
    record(&mut f.doc, root, "document", &log);

    let outcome = f
        .doc
        .dispatch_click(f.inner, 3, 4, MouseButton::Left)
        .unwrap();

    assert_eq!(outcome.invoked, 3);
    assert!(!outcome.propagation_stopped);
    // Listeners outside the shadow tree see the host as the target.
    assert_eq!(
        *log.borrow(),
        vec![
            format!("inner:{}", f.inner.index()),
            format!("host:{}", f.host.index()),
            format!("document:{}", f.host.index()),
        ]
    );
}

#[test]
fn test_dispatch_from_slotted_node_keeps_light_target() {
    let mut f = fixture();
    let log: Log = Rc::default();
    record(&mut f.doc, f.inner, "inner", &log);
    let root = f.doc.root();
    record(&mut f.doc, root, "document", &log);

    f.doc
        .dispatch_click(f.light, 0, 0, MouseButton::Left)
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            format!("inner:{}", f.light.index()),
            format!("document:{}", f.light.index()),
        ]
    );
}

#[test]
fn test_event_carries_position_and_current_target() {
    let mut f = fixture();
    let seen = Rc::new(RefCell::new(None));
    let seen_clone = Rc::clone(&seen);
    f.doc
        .add_event_listener(f.host, EventKind::Click, move |_, event| {
            *seen_clone.borrow_mut() = Some((
                event.position(),
                event.current_target(),
                event.original_target(),
                event.button(),
                event.composed_path().len(),
            ));
        })
        .unwrap();

    f.doc
        .dispatch_click(f.inner, 7, 2, MouseButton::Right)
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        Some(((7, 2), f.host, f.inner, MouseButton::Right, 5))
    );
}

#[test]
fn test_stop_propagation() {
    let mut f = fixture();
    let log: Log = Rc::default();
    f.doc
        .add_event_listener(f.inner, EventKind::Click, |_, event| event.stop_propagation())
        .unwrap();
    record(&mut f.doc, f.inner, "inner", &log);
    record(&mut f.doc, f.host, "host", &log);

    let outcome = f
        .doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();

    assert!(outcome.propagation_stopped);
    assert_eq!(outcome.invoked, 2, "listeners on the same node still run");
    assert_eq!(*log.borrow(), vec![format!("inner:{}", f.inner.index())]);
}

#[test]
fn test_listener_can_mutate_document() {
    let mut f = fixture();
    f.doc
        .add_event_listener(f.inner, EventKind::Click, |doc, event| {
            doc.toggle_class(event.current_target(), "active").unwrap();
        })
        .unwrap();

    f.doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();
    assert!(f.doc.has_class(f.inner, "active"));
    f.doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();
    assert!(!f.doc.has_class(f.inner, "active"));
}

// ============================================================================
// Listener Removal
// ============================================================================

#[test]
fn test_remove_event_listener() {
    let mut f = fixture();
    let log: Log = Rc::default();
    record(&mut f.doc, f.inner, "kept", &log);
    let id = f
        .doc
        .add_event_listener(f.inner, EventKind::Click, |_, _| panic!("removed"))
        .unwrap();

    assert_eq!(f.doc.listener_count(), 2);
    assert_eq!(f.doc.listeners_on(f.inner), 2);
    assert!(f.doc.remove_event_listener(id));
    assert!(!f.doc.remove_event_listener(id));
    assert_eq!(f.doc.listener_count(), 1);

    f.doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_listener_removed_during_dispatch_is_skipped() {
    let mut f = fixture();
    let later = Rc::new(RefCell::new(None));
    let later_clone = Rc::clone(&later);
    f.doc
        .add_event_listener(f.inner, EventKind::Click, move |doc, _| {
            if let Some(id) = *later_clone.borrow() {
                doc.remove_event_listener(id);
            }
        })
        .unwrap();
    let id = f
        .doc
        .add_event_listener(f.host, EventKind::Click, |_, _| panic!("should be skipped"))
        .unwrap();
    *later.borrow_mut() = Some(id);

    let outcome = f
        .doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();
    assert_eq!(outcome.invoked, 1);
}

#[test]
fn test_listener_added_during_dispatch_waits() {
    let mut f = fixture();
    let count = Rc::new(RefCell::new(0));
    let count_clone = Rc::clone(&count);
    let host = f.host;
    f.doc
        .add_event_listener(f.inner, EventKind::Click, move |doc, _| {
            let count = Rc::clone(&count_clone);
            doc.add_event_listener(host, EventKind::Click, move |_, _| {
                *count.borrow_mut() += 1;
            })
            .unwrap();
        })
        .unwrap();

    f.doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();
    assert_eq!(*count.borrow(), 0);

    f.doc
        .dispatch_click(f.inner, 0, 0, MouseButton::Left)
        .unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_unknown_targets_are_errors() {
    let mut doc = Document::new();
    let mut other = Document::new();
    let stray = (0..5).map(|_| other.create_element("div")).last().unwrap();

    assert!(matches!(
        doc.dispatch_click(stray, 0, 0, MouseButton::Left),
        Err(DomError::UnknownNode(_))
    ));
    assert!(matches!(
        doc.add_event_listener(stray, EventKind::Click, |_, _| {}),
        Err(DomError::UnknownNode(_))
    ));
}
