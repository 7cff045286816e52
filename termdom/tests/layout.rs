use termdom::render::render_to_buffer;
use termdom::{
    hit_test, hit_test_any, layout, Buffer, Color, Direction, Document, Edges, Element, NodeId,
    Rect, Rgb, Style, StyleSheet, Visibility,
};

fn mount(doc: &mut Document, template: Element) -> NodeId {
    let body = doc.body();
    doc.mount(body, &template).unwrap()
}

// ============================================================================
// Flow Layout
// ============================================================================

#[test]
fn test_column_children_stack_and_stretch() {
    let mut doc = Document::new();
    let list = mount(
        &mut doc,
        Element::div()
            .style(Style::new().gap(1).padding(Edges::all(1)))
            .child(Element::div().text("one"))
            .child(Element::div().text("two")),
    );
    let children = doc.child_elements(list);

    let result = layout(&doc, Rect::new(0, 0, 20, 10));

    assert_eq!(result.get(&doc.body()), Some(&Rect::new(0, 0, 20, 10)));
    assert_eq!(result.get(&list), Some(&Rect::new(0, 0, 20, 5)));
    assert_eq!(result.get(&children[0]), Some(&Rect::new(1, 1, 18, 1)));
    assert_eq!(result.get(&children[1]), Some(&Rect::new(1, 3, 18, 1)));
}

#[test]
fn test_row_children_take_intrinsic_width() {
    let mut doc = Document::new();
    let row = mount(
        &mut doc,
        Element::div()
            .style(Style::new().direction(Direction::Row).gap(2))
            .child(Element::span().text("ab"))
            .child(Element::span().text("cde")),
    );
    let children = doc.child_elements(row);

    let result = layout(&doc, Rect::new(0, 0, 20, 3));

    assert_eq!(result.get(&children[0]), Some(&Rect::new(0, 0, 2, 1)));
    assert_eq!(result.get(&children[1]), Some(&Rect::new(4, 0, 3, 1)));
}

#[test]
fn test_display_none_is_skipped() {
    let mut doc = Document::new();
    let hidden = mount(
        &mut doc,
        Element::div().style(Style::new().display(termdom::Display::None)).text("x"),
    );

    let result = layout(&doc, Rect::new(0, 0, 10, 3));
    assert_eq!(result.get(&hidden), None);
}

#[test]
fn test_shadow_root_replaces_host_children() {
    let mut doc = Document::new();
    let host = mount(&mut doc, Element::new("x-host").text("light"));
    let shadow = doc.attach_shadow(host).unwrap();
    let inner = doc
        .mount(shadow, &Element::div().text("[").child(Element::slot()).text("]"))
        .unwrap();

    let result = layout(&doc, Rect::new(0, 0, 10, 5));

    assert!(result.get(&inner).is_some());
    let texts: Vec<_> = result
        .boxes()
        .iter()
        .filter_map(|b| b.text.as_deref())
        .collect();
    assert_eq!(texts, vec!["[", "light", "]"]);
}

// ============================================================================
// Stylesheets
// ============================================================================

#[test]
fn test_shadow_stylesheet_is_scoped() {
    let mut doc = Document::new();
    let outside = mount(&mut doc, Element::div().class("row").text("out"));
    let host = mount(&mut doc, Element::new("x-host"));
    let shadow = doc.attach_shadow(host).unwrap();
    let inside = doc
        .mount(shadow, &Element::div().class("row").text("in"))
        .unwrap();
    doc.set_shadow_stylesheet(
        shadow,
        StyleSheet::new()
            .rule(".row", Style::new().background(Color::hex(0x2c3e50)))
            .unwrap(),
    )
    .unwrap();

    assert_eq!(
        doc.cascaded_style(inside).background,
        Some(Color::hex(0x2c3e50))
    );
    assert_eq!(doc.cascaded_style(outside).background, None);
}

#[test]
fn test_later_rules_and_inline_styles_win() {
    let mut doc = Document::new();
    let el = mount(
        &mut doc,
        Element::div()
            .class("a")
            .class("b")
            .style(Style::new().gap(3)),
    );
    doc.set_stylesheet(
        StyleSheet::new()
            .rule(".a", Style::new().gap(1).padding(Edges::all(1)))
            .unwrap()
            .rule(".b", Style::new().gap(2))
            .unwrap(),
    );

    let style = doc.cascaded_style(el);
    assert_eq!(style.gap, Some(3));
    assert_eq!(style.padding, Some(Edges::all(1)));

    doc.set_inline_style(el, Style::new()).unwrap();
    assert_eq!(doc.cascaded_style(el).gap, Some(2));
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_returns_deepest_element() {
    let mut doc = Document::new();
    let outer = mount(
        &mut doc,
        Element::div()
            .style(Style::new().padding(Edges::all(1)))
            .child(Element::div().text("inner")),
    );
    let inner = doc.child_elements(outer)[0];
    let result = layout(&doc, Rect::new(0, 0, 20, 5));

    assert_eq!(hit_test(&result, 2, 1), Some(inner));
    assert_eq!(hit_test(&result, 0, 0), Some(outer));
    assert_eq!(hit_test(&result, 15, 4), Some(doc.body()));
    assert_eq!(hit_test(&result, 50, 50), None);

    let text = doc.children(inner)[0];
    assert_eq!(hit_test_any(&result, 2, 1), Some(text));
}

#[test]
fn test_hit_test_prefers_absolute_overlay() {
    let mut doc = Document::new();
    let below = mount(&mut doc, Element::div().text("below"));
    let overlay = doc
        .mount(
            below,
            &Element::div()
                .style(Style::new().absolute(1, 0))
                .text("overlay"),
        )
        .unwrap();
    let after = mount(&mut doc, Element::div().text("after"));
    let result = layout(&doc, Rect::new(0, 0, 20, 5));

    assert_eq!(result.get(&overlay), Some(&Rect::new(0, 1, 7, 1)));
    assert_eq!(result.get(&after), Some(&Rect::new(0, 1, 20, 1)));
    assert_eq!(hit_test(&result, 3, 1), Some(overlay));
    assert_eq!(hit_test(&result, 10, 1), Some(after));
}

#[test]
fn test_hit_test_skips_hidden_boxes() {
    let mut doc = Document::new();
    let visible = mount(&mut doc, Element::div().text("visible"));
    doc.mount(
        visible,
        &Element::div()
            .style(Style::new().absolute(0, 0).visibility(Visibility::Hidden))
            .text("hidden"),
    )
    .unwrap();
    let result = layout(&doc, Rect::new(0, 0, 20, 5));

    assert_eq!(hit_test(&result, 1, 0), Some(visible));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_text_and_background() {
    let mut doc = Document::new();
    mount(
        &mut doc,
        Element::div()
            .style(Style::new().background(Color::rgb(1, 2, 3)))
            .text("Title"),
    );
    let result = layout(&doc, Rect::new(0, 0, 8, 2));
    let mut buf = Buffer::new(8, 2);

    render_to_buffer(&result, &mut buf);

    assert_eq!(buf.row_text(0), "Title   ");
    assert_eq!(buf.get(6, 0).unwrap().bg, Rgb::new(1, 2, 3));
    assert_eq!(buf.get(0, 0).unwrap().bg, Rgb::new(1, 2, 3));
    assert_eq!(buf.get(0, 1).unwrap().bg, Rgb::default());
}

#[test]
fn test_render_truncates_long_text() {
    let mut doc = Document::new();
    mount(
        &mut doc,
        Element::div()
            .style(Style::new().direction(Direction::Row))
            .text("abcdefghij"),
    );
    let result = layout(&doc, Rect::new(0, 0, 5, 1));
    let mut buf = Buffer::new(5, 1);

    render_to_buffer(&result, &mut buf);

    assert_eq!(buf.row_text(0), "abcd…");
}

#[test]
fn test_render_hidden_overlay_leaves_content() {
    let mut doc = Document::new();
    let base = mount(&mut doc, Element::div().text("base"));
    doc.mount(
        base,
        &Element::div()
            .style(
                Style::new()
                    .absolute(0, 0)
                    .visibility(Visibility::Hidden)
                    .background(Color::rgb(9, 9, 9)),
            )
            .text("gone"),
    )
    .unwrap();
    let result = layout(&doc, Rect::new(0, 0, 6, 1));
    let mut buf = Buffer::new(6, 1);

    render_to_buffer(&result, &mut buf);

    assert_eq!(buf.row_text(0), "base  ");
    assert_eq!(buf.get(0, 0).unwrap().bg, Rgb::default());
}
