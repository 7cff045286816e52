use std::fmt;

use slotmap::new_key_type;

use crate::style::{Style, StyleSheet};

new_key_type! {
    /// Handle to a node stored in a [`Document`](super::Document).
    ///
    /// Ids are generational: once a node is freed its id stops resolving,
    /// even after the slot is reused. Detaching with
    /// [`Document::remove`](super::Document::remove) keeps the node alive so it
    /// can be inserted again.
    pub struct NodeId;
}

impl NodeId {
    /// Slot index in the arena, stable while the node lives.
    pub fn index(self) -> usize {
        (self.0.as_ffi() & 0xffff_ffff) as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#n{}", self.index())
    }
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind,
        }
    }
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
    ShadowRoot(ShadowRootData),
}

#[derive(Debug)]
pub(crate) struct ElementData {
    pub tag: String,
    /// Attributes in insertion order. `class` is kept in `classes` instead.
    pub attributes: Vec<(String, String)>,
    pub classes: ClassList,
    pub style: Style,
    pub shadow_root: Option<NodeId>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: ClassList::default(),
            style: Style::default(),
            shadow_root: None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug)]
pub(crate) struct ShadowRootData {
    pub host: NodeId,
    pub stylesheet: StyleSheet,
}

/// Ordered set of class names on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn parse(value: &str) -> Self {
        let mut list = Self::default();
        for class in value.split_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Returns true if the class was not present before.
    pub fn add(&mut self, class: &str) -> bool {
        if self.contains(class) {
            return false;
        }
        self.0.push(class.to_string());
        true
    }

    /// Returns true if the class was present.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != class);
        self.0.len() != before
    }

    /// Flip a class. Returns whether it is present afterwards.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.remove(class) {
            false
        } else {
            self.0.push(class.to_string());
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}
