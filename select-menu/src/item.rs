//! The `select-item` row.

use termdom::{Document, Edges, Element, EventKind, ListenerId, NodeId, Style, StyleSheet};

use crate::config::{SelectMenuConfig, SelectMenuTheme};
use crate::container::{DATA_LABEL, DATA_VALUE};
use crate::error::Result;
use crate::parts::{
    ActiveStateToggle, ContainerParts, ContainerPartsLookup, item_owner, label_span,
};

const ROW_SELECTOR: &str = ".select-list-item";

/// A connected item. Clicking its row writes the item into the owning
/// container's toggle and flips the container's open state.
#[derive(Debug)]
pub struct SelectItem {
    host: NodeId,
    parts: ContainerParts,
    active_class: String,
    rows: Vec<NodeId>,
    listeners: Vec<ListenerId>,
}

impl ContainerPartsLookup for SelectItem {
    fn container_parts(&self) -> &ContainerParts {
        &self.parts
    }
}

impl ActiveStateToggle for SelectItem {}

impl SelectItem {
    pub const TAG: &'static str = "select-item";
    pub const OBSERVED_ATTRIBUTES: &'static [&'static str] = &["value", "text"];

    // -------------------------------------------------------------------------
    // Attribute accessors
    // -------------------------------------------------------------------------

    pub fn value(doc: &Document, host: NodeId) -> Option<String> {
        doc.get_attribute(host, "value")
    }

    pub fn set_value(doc: &mut Document, host: NodeId, value: &str) -> Result<()> {
        Ok(doc.set_attribute(host, "value", value)?)
    }

    pub fn text(doc: &Document, host: NodeId) -> Option<String> {
        doc.get_attribute(host, "text")
    }

    pub fn set_text(doc: &mut Document, host: NodeId, text: &str) -> Result<()> {
        Ok(doc.set_attribute(host, "text", text)?)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Render the row into `host`'s shadow root and wire it to the container
    /// rendered in `owner`.
    pub fn connect(
        doc: &mut Document,
        host: NodeId,
        owner: NodeId,
        config: &SelectMenuConfig,
    ) -> Result<Self> {
        let shadow = match doc.shadow_root(host) {
            Some(shadow) => {
                doc.remove_children(shadow)?;
                shadow
            }
            None => doc.attach_shadow(host)?,
        };

        let value = Self::value(doc, host);
        let text = Self::text(doc, host);
        doc.set_shadow_stylesheet(shadow, stylesheet(&config.theme, &config.active_class)?)?;
        doc.mount(shadow, &row_template(value.as_deref(), text.as_deref()))?;

        let parts = Self::locate_container_parts(doc, owner)?;
        let rows = doc.query_selector_all(shadow, ROW_SELECTOR)?;
        let mut listeners = Vec::with_capacity(rows.len());
        for &row in &rows {
            let class = config.active_class.clone();
            listeners.push(doc.add_event_listener(row, EventKind::Click, move |doc, _| {
                log::debug!("item {host} activated");
                if let Err(err) = Self::activate_row(doc, row, &parts, &class) {
                    log::warn!("failed to activate item {host}: {err}");
                }
            })?);
        }

        log::debug!("connected select-item {host} to {owner} with value {value:?}");
        Ok(Self {
            host,
            parts,
            active_class: config.active_class.clone(),
            rows,
            listeners,
        })
    }

    pub fn disconnect(&mut self, doc: &mut Document) {
        for id in self.listeners.drain(..) {
            doc.remove_event_listener(id);
        }
        log::debug!("disconnected select-item {}", self.host);
    }

    /// Reflect a changed `value` or `text` onto the rendered row.
    pub fn attribute_changed(
        &self,
        doc: &mut Document,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        if !Self::OBSERVED_ATTRIBUTES.contains(&name) {
            return Ok(());
        }
        for &row in &self.rows {
            match value {
                Some(value) => doc.set_attribute(row, name, value)?,
                None => {
                    doc.remove_attribute(row, name)?;
                }
            }
            let fallback = match name {
                "text" => doc.query_selector(row, "slot")?,
                _ => None,
            };
            if let Some(slot) = fallback {
                doc.set_text_content(slot, value.unwrap_or_default())?;
            }
        }
        Ok(())
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    /// The owning container's `select-menu` element.
    pub fn owner(&self) -> NodeId {
        self.parts.host
    }

    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    /// Run the click behaviour of the first row without dispatching an event.
    pub fn activate(&self, doc: &mut Document) -> Result<()> {
        match self.rows.first() {
            Some(&row) => Self::activate_row(doc, row, &self.parts, &self.active_class),
            None => Ok(()),
        }
    }

    /// Write the row into the container's toggle, then flip the open state.
    ///
    /// Label, displayed text and value are written separately, in that order.
    /// Afterwards the row is the only one of the container's rows carrying
    /// the active class.
    fn activate_row(
        doc: &mut Document,
        row: NodeId,
        parts: &ContainerParts,
        class: &str,
    ) -> Result<()> {
        let label = doc.get_attribute(row, "text").unwrap_or_default();
        doc.set_attribute(parts.toggle, DATA_LABEL, &label)?;

        if let Some(span) = label_span(doc, parts.toggle) {
            let text = doc.rendered_text(row);
            doc.set_text_content(span, &text)?;
        }

        let value = doc.get_attribute(row, "value").unwrap_or_default();
        doc.set_attribute(parts.toggle, DATA_VALUE, &value)?;

        Self::toggle_active_state(doc, &parts.state_nodes(), class)?;
        Self::mark_selected_row(doc, parts.host, row, class)
    }

    fn mark_selected_row(
        doc: &mut Document,
        owner: NodeId,
        selected: NodeId,
        class: &str,
    ) -> Result<()> {
        let shadows: Vec<NodeId> = doc
            .descendants(doc.root())
            .filter(|node| item_owner(doc, *node) == Some(owner))
            .filter_map(|item| doc.shadow_root(item))
            .collect();
        for shadow in shadows {
            for row in doc.query_selector_all(shadow, ROW_SELECTOR)? {
                Self::set_active_state(doc, &[row], class, row == selected)?;
            }
        }
        Ok(())
    }
}

fn row_template(value: Option<&str>, text: Option<&str>) -> Element {
    let mut row = Element::div().class("select-list-item");
    if let Some(value) = value {
        row = row.attr("value", value);
    }
    if let Some(text) = text {
        row = row.attr("text", text);
    }
    let slot = match text {
        Some(text) if !text.is_empty() => Element::slot().text(text),
        _ => Element::slot(),
    };
    row.child(slot)
}

fn stylesheet(theme: &SelectMenuTheme, active: &str) -> Result<StyleSheet> {
    let sheet = StyleSheet::new()
        .rule(
            ".select-list-item",
            Style::new()
                .padding(Edges::new(0, 2, 0, 1))
                .background(theme.list_background)
                .foreground(theme.list_foreground),
        )?
        .rule(
            &format!(".select-list-item.{active}"),
            Style::new().background(theme.accent),
        )?;
    Ok(sheet)
}
