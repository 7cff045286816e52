//! The retained document tree.
//!
//! A [`Document`] owns every node in an arena and hands out [`NodeId`]s.
//! Elements carry attributes, a class list and an inline style, and may host a
//! shadow root: an encapsulated subtree that replaces the host's children when
//! the tree is flattened for layout, with `slot` elements projecting the
//! host's children back in.

mod dispatch;
mod lifecycle;
mod node;
mod query;
mod shadow;
mod text;

use std::collections::BTreeMap;
use std::fmt;

use slotmap::SlotMap;

pub use lifecycle::Lifecycle;
pub use node::{ClassList, NodeId};
use node::{ElementData, NodeData, NodeKind};

use crate::element::{Child, Element};
use crate::error::{DomError, Result};
use crate::event::{EventKind, Listener, ListenerId};
use crate::style::{Style, StyleSheet};

struct Registration {
    node: NodeId,
    kind: EventKind,
    listener: Listener,
}

pub struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    body: NodeId,
    stylesheet: StyleSheet,
    listeners: BTreeMap<ListenerId, Registration>,
    next_listener: u64,
    lifecycle: Vec<Lifecycle>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("pending_lifecycle", &self.lifecycle.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new(NodeKind::Document));
        let mut doc = Self {
            nodes,
            root,
            body: root,
            stylesheet: StyleSheet::default(),
            listeners: BTreeMap::new(),
            next_listener: 0,
            lifecycle: Vec::new(),
        };
        let body = doc.create_element("body");
        doc.nodes[body].parent = Some(root);
        doc.nodes[root].children.push(body);
        doc.body = body;
        doc
    }

    /// The document node. Listeners here see every bubbling event.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // -------------------------------------------------------------------------
    // Node access
    // -------------------------------------------------------------------------

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(DomError::UnknownNode(id))
    }

    pub(crate) fn element_data(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(data) => Ok(data),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element_data(id).is_some()
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id).map(|n| &n.kind), Some(NodeKind::Text(_)))
    }

    /// Lower-case tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element_data(id).map(|data| data.tag.as_str())
    }

    /// Character data of a text node.
    pub fn text_data(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(NodeData::new(kind))
    }

    /// Build a detached subtree from a template.
    pub fn build(&mut self, template: &Element) -> NodeId {
        let id = self.create_element(&template.tag);
        if let NodeKind::Element(data) = &mut self.nodes[id].kind {
            for (name, value) in &template.attributes {
                if name == "class" {
                    for class in value.split_whitespace() {
                        data.classes.add(class);
                    }
                } else {
                    data.attributes.push((name.clone(), value.clone()));
                }
            }
            for class in &template.classes {
                data.classes.add(class);
            }
            data.style = template.style.clone();
        }

        for child in &template.children {
            let child_id = match child {
                Child::Element(element) => self.build(element),
                Child::Text(text) => self.create_text(text.clone()),
            };
            self.nodes[child_id].parent = Some(id);
            self.nodes[id].children.push(child_id);
        }
        id
    }

    /// Build a template and append it to `parent`.
    pub fn mount(&mut self, parent: NodeId, template: &Element) -> Result<NodeId> {
        let id = self.build(template);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Build and append a list of template children (elements or text).
    pub fn mount_children(&mut self, parent: NodeId, children: &[Child]) -> Result<Vec<NodeId>> {
        let mut mounted = Vec::with_capacity(children.len());
        for child in children {
            let id = match child {
                Child::Element(element) => self.build(element),
                Child::Text(text) => self.create_text(text.clone()),
            };
            self.append_child(parent, id)?;
            mounted.push(id);
        }
        Ok(mounted)
    }

    // -------------------------------------------------------------------------
    // Tree structure
    // -------------------------------------------------------------------------

    /// Light-tree parent. For top-level nodes of a shadow tree this is the shadow root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// Parent if it is an element. Stops at shadow roots and the document.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|parent| self.is_element(*parent))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children only.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    /// Append `child` to `parent`, moving it if it is already in a tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_ok = matches!(
            self.node(parent)?.kind,
            NodeKind::Document | NodeKind::Element(_) | NodeKind::ShadowRoot(_)
        );
        let child_ok = matches!(
            self.node(child)?.kind,
            NodeKind::Element(_) | NodeKind::Text(_)
        );
        if !parent_ok || !child_ok || self.contains_composed(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        if self.node(child)?.parent.is_some() {
            self.remove(child)?;
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);

        if self.is_connected(parent) {
            self.record_subtree(child, true);
        }
        Ok(())
    }

    /// Detach `child` from its parent. Detached nodes keep their id and subtree.
    pub fn remove(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        let was_connected = self.is_connected(child);

        self.nodes[parent].children.retain(|c| *c != child);
        self.nodes[child].parent = None;

        if was_connected {
            self.record_subtree(child, false);
        }
        Ok(())
    }

    /// Remove every child of `parent` and free the removed subtrees.
    ///
    /// Ids into the freed subtrees stop resolving and listeners registered
    /// on them are dropped.
    pub fn remove_children(&mut self, parent: NodeId) -> Result<()> {
        let children = self.node(parent)?.children.clone();
        for child in children {
            self.remove(child)?;
            self.free_subtree(child);
        }
        Ok(())
    }

    /// Free a detached node, its light subtree and any shadow trees inside it.
    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        let mut freed = 0usize;
        while let Some(node) = stack.pop() {
            let Some(data) = self.nodes.remove(node) else {
                continue;
            };
            if let NodeKind::Element(ElementData {
                shadow_root: Some(shadow),
                ..
            }) = &data.kind
            {
                stack.push(*shadow);
            }
            stack.extend(data.children);
            freed += 1;
        }
        self.listeners
            .retain(|_, registration| self.nodes.contains_key(registration.node));
        log::trace!("freed {freed} nodes under {id}");
    }

    /// Number of live nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the node is reachable from the document through parents and shadow hosts.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.composed_parent(node);
        }
        false
    }

    /// Inclusive light-tree containment. Does not look into shadow trees.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Queue lifecycle records for every element in the subtree, in
    /// shadow-including tree order: host, its shadow tree, then its children.
    fn record_subtree(&mut self, id: NodeId, connected: bool) {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let data = &self.nodes[node];
            if let NodeKind::Element(element) = &data.kind {
                self.lifecycle.push(if connected {
                    Lifecycle::Connected(node)
                } else {
                    Lifecycle::Disconnected(node)
                });
                // Pushed in reverse so the shadow tree comes out before the light children.
                stack.extend(data.children.iter().rev());
                if let Some(shadow) = element.shadow_root {
                    stack.extend(self.nodes[shadow].children.iter().rev());
                }
            } else {
                stack.extend(data.children.iter().rev());
            }
        }
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Read an attribute. Names are case-insensitive; `class` reflects the class list.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let data = self.element_data(id)?;
        let name = name.to_ascii_lowercase();
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.to_string());
        }
        data.attribute(&name).map(str::to_string)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Attribute names in insertion order (`class` first when present).
    pub fn attribute_names(&self, id: NodeId) -> Vec<String> {
        let Some(data) = self.element_data(id) else {
            return Vec::new();
        };
        let class = (!data.classes.is_empty()).then(|| "class".to_string());
        class
            .into_iter()
            .chain(data.attributes.iter().map(|(name, _)| name.clone()))
            .collect()
    }

    /// Set an attribute. Names are case-insensitive and stored lower-case.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let old = self.get_attribute(id, &name);
        let data = self.element_mut(id)?;

        if name == "class" {
            data.classes = ClassList::parse(value);
        } else if let Some(slot) = data.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value.to_string();
        } else {
            data.attributes.push((name.clone(), value.to_string()));
        }

        self.record_attribute(id, name, old, Some(value.to_string()));
        Ok(())
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool> {
        let name = name.to_ascii_lowercase();
        let old = self.get_attribute(id, &name);
        let data = self.element_mut(id)?;

        if name == "class" {
            data.classes = ClassList::default();
        } else {
            data.attributes.retain(|(key, _)| *key != name);
        }

        let existed = old.is_some();
        if existed {
            self.record_attribute(id, name, old, None);
        }
        Ok(existed)
    }

    fn record_attribute(
        &mut self,
        element: NodeId,
        name: String,
        old: Option<String>,
        new: Option<String>,
    ) {
        if self.is_connected(element) {
            self.lifecycle.push(Lifecycle::AttributeChanged {
                element,
                name,
                old,
                new,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Class list
    // -------------------------------------------------------------------------

    pub fn class_list(&self, id: NodeId) -> Option<&ClassList> {
        self.element_data(id).map(|data| &data.classes)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).is_some_and(|list| list.contains(class))
    }

    /// Returns true if the class was added.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        self.update_classes(id, |list| list.add(class))
    }

    /// Returns true if the class was removed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        self.update_classes(id, |list| list.remove(class))
    }

    /// Flip a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        self.update_classes(id, |list| list.toggle(class))
    }

    fn update_classes(&mut self, id: NodeId, f: impl FnOnce(&mut ClassList) -> bool) -> Result<bool> {
        let old = self.get_attribute(id, "class");
        let data = self.element_mut(id)?;
        let result = f(&mut data.classes);
        let new = (!data.classes.is_empty()).then(|| data.classes.to_string());
        if old != new {
            self.record_attribute(id, "class".to_string(), old, new);
        }
        Ok(result)
    }

    // -------------------------------------------------------------------------
    // Styles
    // -------------------------------------------------------------------------

    pub fn inline_style(&self, id: NodeId) -> Option<&Style> {
        self.element_data(id).map(|data| &data.style)
    }

    pub fn set_inline_style(&mut self, id: NodeId, style: Style) -> Result<()> {
        self.element_mut(id)?.style = style;
        Ok(())
    }

    /// Stylesheet applying to the light tree.
    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    pub fn set_stylesheet(&mut self, stylesheet: StyleSheet) {
        self.stylesheet = stylesheet;
    }

    /// The declared style of an element: tag defaults, then matching rules of
    /// its tree scope in source order, then its inline style.
    pub fn cascaded_style(&self, id: NodeId) -> Style {
        let Some(data) = self.element_data(id) else {
            return Style::default();
        };

        let mut style = tag_defaults(&data.tag);
        let sheet = match self.containing_shadow_root(id) {
            Some(root) => self.shadow_stylesheet(root).unwrap_or(&self.stylesheet),
            None => &self.stylesheet,
        };
        for rule in sheet.rules() {
            if rule.selector.matches(self, id) {
                style.merge(&rule.style);
            }
        }
        style.merge(&data.style);
        style
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Drain queued lifecycle records in the order they happened.
    pub fn take_lifecycle(&mut self) -> Vec<Lifecycle> {
        std::mem::take(&mut self.lifecycle)
    }

    pub fn has_pending_lifecycle(&self) -> bool {
        !self.lifecycle.is_empty()
    }
}

fn tag_defaults(tag: &str) -> Style {
    use crate::types::{Direction, Display};

    match tag {
        "span" | "b" | "i" | "em" | "strong" => Style::new().direction(Direction::Row),
        "style" | "script" | "template" => Style::new().display(Display::None),
        _ => Style::new(),
    }
}
