use crate::document::NodeId;
use crate::layout::LayoutResult;

/// Find the topmost visible element at the given coordinates.
///
/// Boxes are checked front to back (highest z-index, then latest in tree
/// order), so overlays win over the content beneath them and children win
/// over their parents. Text boxes report the element they were laid out in.
pub fn hit_test(layout: &LayoutResult, x: u16, y: u16) -> Option<NodeId> {
    layout
        .paint_order()
        .into_iter()
        .rev()
        .filter(|b| b.style.is_visible())
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.hit_target)
}

/// Like [`hit_test`] but returns the node that owns the box, text nodes included.
pub fn hit_test_any(layout: &LayoutResult, x: u16, y: u16) -> Option<NodeId> {
    layout
        .paint_order()
        .into_iter()
        .rev()
        .filter(|b| b.style.is_visible())
        .find(|b| b.rect.contains(x, y))
        .map(|b| b.node)
}
