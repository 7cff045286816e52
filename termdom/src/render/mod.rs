//! Paint a [`LayoutResult`] into a [`Buffer`].

use crate::buffer::Buffer;
use crate::layout::LayoutResult;
use crate::text::truncate_to_width;

/// Paint laid-out boxes into `buf`, back to front.
///
/// Elements fill their background; text boxes draw their text over whatever
/// background is already there. Hidden boxes are skipped.
pub fn render_to_buffer(layout: &LayoutResult, buf: &mut Buffer) {
    let mut painted = 0usize;

    for item in layout.paint_order() {
        if !item.style.is_visible() || item.rect.is_empty() {
            continue;
        }
        match (&item.text, item.style.background) {
            (Some(text), _) => {
                let line = truncate_to_width(text, usize::from(item.rect.width));
                buf.put_line(item.rect.x, item.rect.y, item.rect.right(), &line, &item.style);
            }
            (None, Some(bg)) => buf.fill(item.rect, bg),
            (None, None) => continue,
        }
        painted += 1;
    }

    log::trace!("render: painted {painted} of {} boxes", layout.len());
}
