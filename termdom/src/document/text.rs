use super::node::NodeKind;
use super::{Document, NodeId};
use crate::error::Result;
use crate::text::collapse_whitespace;

impl Document {
    /// Concatenated data of every light-tree text descendant.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            match self.nodes.get(node).map(|n| &n.kind) {
                Some(NodeKind::Text(text)) => out.push_str(text),
                Some(_) => stack.extend(self.children(node).iter().rev()),
                None => {}
            }
        }
        out
    }

    /// Replace the children of `id` with a single text node (none for an empty string).
    ///
    /// On a text node, or an element whose only child is a text node, the
    /// existing data is rewritten in place. Replaced children are freed.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<()> {
        let target = match self.node(id)?.children.as_slice() {
            [only] if self.is_text(*only) && !text.is_empty() => *only,
            _ => id,
        };
        if let NodeKind::Text(data) = &mut self.node_mut(target)?.kind {
            text.clone_into(data);
            return Ok(());
        }

        self.remove_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// The text a reader would see: the flattened tree's text with whitespace
    /// collapsed and trimmed, skipping elements that are not displayed.
    pub fn rendered_text(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.collect_rendered(id, &mut raw);
        collapse_whitespace(&raw)
    }

    fn collect_rendered(&self, id: NodeId, out: &mut String) {
        if let Some(text) = self.text_data(id) {
            out.push_str(text);
            return;
        }
        if self.is_element(id)
            && self.cascaded_style(id).display == Some(crate::types::Display::None)
        {
            return;
        }
        for child in self.flat_children(id) {
            self.collect_rendered(child, out);
        }
    }
}
