//! Capabilities shared by containers and items.
//!
//! Both component types hold references into the owning container's shadow
//! root and flip the open marker on its list region and icon together.

use termdom::{Document, NodeId};

use crate::container::SelectMenu;
use crate::error::{Result, SelectMenuError};
use crate::item::SelectItem;

/// Attribute naming the container of an item placed outside of it.
pub const MENU_ATTRIBUTE: &str = "menu";

/// The nodes of a rendered container that components act on.
///
/// Plain ids into the document, resolved on every connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerParts {
    /// The `select-menu` element.
    pub host: NodeId,
    /// `.select-toggle`, which carries `data-value` and `data-label`.
    pub toggle: NodeId,
    /// The toggle's label `span`. Optional: writes to it are skipped when absent.
    pub label: Option<NodeId>,
    /// `.select-list`, the region holding the projected items.
    pub list: NodeId,
    /// `.toggle-icon`
    pub icon: NodeId,
}

impl ContainerParts {
    /// The nodes whose active class encodes the open state.
    pub fn state_nodes(&self) -> [NodeId; 2] {
        [self.list, self.icon]
    }
}

/// Resolve and expose the parts of an owning container.
pub trait ContainerPartsLookup {
    fn container_parts(&self) -> &ContainerParts;

    /// Look up the parts inside `host`'s shadow root.
    fn locate_container_parts(doc: &Document, host: NodeId) -> Result<ContainerParts>
    where
        Self: Sized,
    {
        let shadow = doc
            .shadow_root(host)
            .ok_or(SelectMenuError::MissingShadowRoot(host))?;

        let part = |selector: &str, part: &'static str| -> Result<NodeId> {
            doc.query_selector(shadow, selector)?
                .ok_or(SelectMenuError::MissingPart { part })
        };
        let toggle = part(".select-toggle", "toggle")?;
        let list = part(".select-list", "list")?;
        let icon = part(".toggle-icon", "icon")?;
        let label = label_span(doc, toggle);

        Ok(ContainerParts {
            host,
            toggle,
            label,
            list,
            icon,
        })
    }
}

/// The toggle's direct `span` child, if it still has one.
pub fn label_span(doc: &Document, toggle: NodeId) -> Option<NodeId> {
    doc.child_elements(toggle)
        .into_iter()
        .find(|child| doc.tag(*child) == Some("span"))
}

/// The `select-menu` that `item` belongs to: its nearest container ancestor,
/// or else the container whose `id` the item's `menu` attribute names.
///
/// `None` for anything that is not a `select-item`. Connection state is not
/// checked.
pub fn item_owner(doc: &Document, item: NodeId) -> Option<NodeId> {
    if doc.tag(item) != Some(SelectItem::TAG) {
        return None;
    }
    let ancestor = std::iter::successors(doc.parent_element(item), |node| {
        doc.parent_element(*node)
    })
    .find(|node| doc.tag(*node) == Some(SelectMenu::TAG));
    if ancestor.is_some() {
        return ancestor;
    }

    let id = doc.get_attribute(item, MENU_ATTRIBUTE)?;
    doc.descendants(doc.root()).find(|node| {
        doc.tag(*node) == Some(SelectMenu::TAG)
            && doc.get_attribute(*node, "id").as_deref() == Some(id.as_str())
    })
}

/// Flip or force the open marker on a set of nodes.
pub trait ActiveStateToggle {
    /// Flip `class` on every node. Callers pass the list region and the icon
    /// together so they never drift apart.
    fn toggle_active_state(doc: &mut Document, nodes: &[NodeId], class: &str) -> Result<()>
    where
        Self: Sized,
    {
        for node in nodes {
            doc.toggle_class(*node, class)?;
        }
        Ok(())
    }

    /// Add or remove `class` on every node.
    fn set_active_state(
        doc: &mut Document,
        nodes: &[NodeId],
        class: &str,
        active: bool,
    ) -> Result<()>
    where
        Self: Sized,
    {
        for node in nodes {
            if active {
                doc.add_class(*node, class)?;
            } else {
                doc.remove_class(*node, class)?;
            }
        }
        Ok(())
    }
}
