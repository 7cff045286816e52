//! Box layout over the flattened tree.
//!
//! Shadow hosts lay out their shadow root's children, slots lay out their
//! assigned nodes. Boxes stack along their direction with gap and padding;
//! column children stretch to the parent's inner width, row children take
//! their intrinsic width. Absolute boxes are placed at their offset from the
//! parent box and do not take part in flow.

mod rect;

use std::collections::HashMap;

pub use rect::Rect;

use crate::document::{Document, NodeId};
use crate::style::ComputedStyle;
use crate::text::{collapse_whitespace, display_width};
use crate::types::{Direction, Display, Position};

/// One laid-out node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub node: NodeId,
    pub rect: Rect,
    pub style: ComputedStyle,
    /// Paint order within the same z-index.
    pub tree_order: usize,
    /// Collapsed text for text nodes.
    pub text: Option<String>,
    /// Element that receives pointer events for this box. Text boxes
    /// forward to the element they were laid out in.
    pub hit_target: NodeId,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    rects: HashMap<NodeId, Rect>,
    boxes: Vec<LayoutBox>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Rect> {
        self.rects.get(id)
    }

    /// Record a box. Boxes inserted later paint above earlier ones with the same z-index.
    pub fn insert(
        &mut self,
        node: NodeId,
        rect: Rect,
        style: ComputedStyle,
        text: Option<String>,
        hit_target: NodeId,
    ) {
        self.rects.insert(node, rect);
        self.boxes.push(LayoutBox {
            node,
            rect,
            style,
            tree_order: self.boxes.len(),
            text,
            hit_target,
        });
    }

    /// Boxes in tree order.
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Boxes back to front: by z-index, then tree order.
    pub fn paint_order(&self) -> Vec<&LayoutBox> {
        let mut boxes: Vec<_> = self.boxes.iter().collect();
        boxes.sort_by_key(|b| (b.style.z_index, b.tree_order));
        boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Lay out the document body inside `available`.
pub fn layout(doc: &Document, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    let body = doc.body();
    let style = ComputedStyle::resolve(&ComputedStyle::default(), &doc.cascaded_style(body));
    if style.display != Display::None {
        place(doc, body, available, &style, &mut result);
    }
    result
}

enum FlowItem {
    Element(NodeId, ComputedStyle),
    Text(NodeId, String),
}

fn place(
    doc: &Document,
    node: NodeId,
    rect: Rect,
    style: &ComputedStyle,
    result: &mut LayoutResult,
) {
    result.insert(node, rect, *style, None, node);

    let inner = rect.inset(style.padding);
    let is_row = style.direction == Direction::Row;

    let (flow, absolute) = flow_children(doc, node, style);

    let mut cursor = 0u16;
    for (index, item) in flow.into_iter().enumerate() {
        if index > 0 {
            cursor = cursor.saturating_add(style.gap);
        }
        let (width, height) = measure_item(doc, &item);

        let child_rect = if is_row {
            let x = inner.x.saturating_add(cursor);
            let available = inner.right().saturating_sub(x);
            cursor = cursor.saturating_add(width);
            Rect::new(x, inner.y, width.min(available), inner.height)
        } else {
            let y = inner.y.saturating_add(cursor);
            cursor = cursor.saturating_add(height);
            let width = match item {
                FlowItem::Text(..) => width.min(inner.width),
                FlowItem::Element(..) => inner.width,
            };
            Rect::new(inner.x, y, width, height)
        };

        match item {
            FlowItem::Text(id, text) => {
                result.insert(id, child_rect, *style, Some(text), node);
            }
            FlowItem::Element(id, child_style) => {
                place(doc, id, child_rect, &child_style, result);
            }
        }
    }

    for (id, child_style) in absolute {
        let (width, height) = measure_element(doc, id, &child_style);
        let child_rect = Rect::new(rect.x, rect.y, width, height)
            .offset(child_style.left, child_style.top);
        place(doc, id, child_rect, &child_style, result);
    }
}

/// Split the flattened children of `node` into flow items and absolute boxes.
fn flow_children(
    doc: &Document,
    node: NodeId,
    style: &ComputedStyle,
) -> (Vec<FlowItem>, Vec<(NodeId, ComputedStyle)>) {
    let mut flow = Vec::new();
    let mut absolute = Vec::new();

    for child in doc.flat_children(node) {
        if let Some(text) = doc.text_data(child) {
            let text = collapse_whitespace(text);
            if !text.is_empty() {
                flow.push(FlowItem::Text(child, text));
            }
            continue;
        }
        if !doc.is_element(child) {
            continue;
        }

        let child_style = ComputedStyle::resolve(style, &doc.cascaded_style(child));
        match (child_style.display, child_style.position) {
            (Display::None, _) => {}
            (_, Position::Absolute) => absolute.push((child, child_style)),
            (_, Position::Static) => flow.push(FlowItem::Element(child, child_style)),
        }
    }

    (flow, absolute)
}

fn measure_item(doc: &Document, item: &FlowItem) -> (u16, u16) {
    match item {
        FlowItem::Text(_, text) => (display_width(text) as u16, 1),
        FlowItem::Element(id, style) => measure_element(doc, *id, style),
    }
}

/// Intrinsic size of an element's border box.
fn measure_element(doc: &Document, node: NodeId, style: &ComputedStyle) -> (u16, u16) {
    let (flow, _) = flow_children(doc, node, style);
    let is_row = style.direction == Direction::Row;

    let mut main = 0u16;
    let mut cross = 0u16;
    let count = flow.len();
    for item in &flow {
        let (width, height) = measure_item(doc, item);
        if is_row {
            main = main.saturating_add(width);
            cross = cross.max(height);
        } else {
            main = main.saturating_add(height);
            cross = cross.max(width);
        }
    }
    main = main.saturating_add(style.gap.saturating_mul(count.saturating_sub(1) as u16));

    let (width, height) = if is_row { (main, cross) } else { (cross, main) };
    (
        width.saturating_add(style.padding.x_total()),
        height.saturating_add(style.padding.y_total()),
    )
}
