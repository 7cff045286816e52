use super::node::{NodeKind, ShadowRootData};
use super::{Document, NodeId};
use crate::error::{DomError, Result};
use crate::style::StyleSheet;

impl Document {
    /// Give `host` an encapsulated rendering root.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId> {
        let existing = self.element_mut(host)?.shadow_root;
        if existing.is_some() {
            return Err(DomError::ShadowRootExists(host));
        }

        let root = self.push_node(NodeKind::ShadowRoot(ShadowRootData {
            host,
            stylesheet: StyleSheet::default(),
        }));
        self.element_mut(host)?.shadow_root = Some(root);
        log::trace!("attached shadow root {root} to {host}");
        Ok(root)
    }

    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.element_data(host)?.shadow_root
    }

    pub fn is_shadow_root(&self, id: NodeId) -> bool {
        self.shadow_host(id).is_some()
    }

    /// Host element of a shadow root.
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        match &self.nodes.get(root)?.kind {
            NodeKind::ShadowRoot(data) => Some(data.host),
            _ => None,
        }
    }

    pub fn shadow_stylesheet(&self, root: NodeId) -> Option<&StyleSheet> {
        match &self.nodes.get(root)?.kind {
            NodeKind::ShadowRoot(data) => Some(&data.stylesheet),
            _ => None,
        }
    }

    /// Replace the stylesheet scoped to a shadow root.
    pub fn set_shadow_stylesheet(&mut self, root: NodeId, stylesheet: StyleSheet) -> Result<()> {
        match &mut self.node_mut(root)?.kind {
            NodeKind::ShadowRoot(data) => {
                data.stylesheet = stylesheet;
                Ok(())
            }
            _ => Err(DomError::NotAnElement(root)),
        }
    }

    /// Topmost light-tree ancestor: the document, a shadow root, or a detached node.
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// The shadow root whose tree contains `id`, if any.
    pub fn containing_shadow_root(&self, id: NodeId) -> Option<NodeId> {
        let root = self.tree_root(id);
        self.is_shadow_root(root).then_some(root)
    }

    /// Parent in the composed tree: the slot a node is assigned to, else its
    /// light parent, else the host for a shadow root.
    pub fn composed_parent(&self, id: NodeId) -> Option<NodeId> {
        self.assigned_slot(id)
            .or_else(|| self.parent(id))
            .or_else(|| self.shadow_host(id))
    }

    /// The slot in the parent's shadow tree that projects `id`, if any.
    pub fn assigned_slot(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let shadow = self.shadow_root(parent)?;
        let name = self.get_attribute(id, "slot").unwrap_or_default();
        self.descendants(shadow).find(|candidate| {
            self.tag(*candidate) == Some("slot")
                && self.get_attribute(*candidate, "name").unwrap_or_default() == name
        })
    }

    /// Inclusive containment across shadow boundaries.
    pub fn contains_composed(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.composed_parent(id);
        }
        false
    }

    /// Host children a `slot` receives.
    ///
    /// Elements with a `slot="name"` attribute go to the slot with the same
    /// `name`; everything else goes to the unnamed default slot. Empty for
    /// slots outside a shadow tree.
    pub fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
        if self.tag(slot) != Some("slot") {
            return Vec::new();
        }
        let Some(host) = self
            .containing_shadow_root(slot)
            .and_then(|root| self.shadow_host(root))
        else {
            return Vec::new();
        };

        let name = self.get_attribute(slot, "name").unwrap_or_default();
        self.children(host)
            .iter()
            .copied()
            .filter(|child| self.get_attribute(*child, "slot").unwrap_or_default() == name)
            .collect()
    }

    /// Children in the flattened tree used for layout and rendered text.
    ///
    /// A shadow host exposes its shadow root's children; a slot exposes its
    /// assigned nodes, or its own children as fallback when nothing is assigned.
    pub fn flat_children(&self, id: NodeId) -> Vec<NodeId> {
        if let Some(root) = self.shadow_root(id) {
            return self.children(root).to_vec();
        }
        if self.tag(id) == Some("slot") && self.containing_shadow_root(id).is_some() {
            let assigned = self.assigned_nodes(id);
            if !assigned.is_empty() {
                return assigned;
            }
        }
        self.children(id).to_vec()
    }
}
