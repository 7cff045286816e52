//! The `select-menu` container.

use termdom::{
    Direction, Document, Edges, Element, EventKind, ListenerId, NodeId, Style, StyleSheet,
    Visibility,
};

use crate::config::{SelectMenuConfig, SelectMenuTheme};
use crate::error::Result;
use crate::parts::{
    ActiveStateToggle, ContainerParts, ContainerPartsLookup, item_owner, label_span,
};

/// Attribute on the toggle holding the selected item's value.
pub const DATA_VALUE: &str = "data-value";
/// Attribute on the toggle holding the selected item's `text`.
pub const DATA_LABEL: &str = "data-label";

/// What the last activated item wrote into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The item's `text` attribute.
    pub label: String,
    /// The item row's rendered text, as shown in the toggle.
    pub text: String,
    /// The item's `value` attribute, empty when it had none.
    pub value: String,
}

/// A connected container: a toggle showing the title or current selection,
/// and a list region projecting the host's children that opens below it.
#[derive(Debug)]
pub struct SelectMenu {
    parts: ContainerParts,
    active_class: String,
    placeholder: String,
    listeners: Vec<ListenerId>,
}

impl ContainerPartsLookup for SelectMenu {
    fn container_parts(&self) -> &ContainerParts {
        &self.parts
    }
}

impl ActiveStateToggle for SelectMenu {}

impl SelectMenu {
    pub const TAG: &'static str = "select-menu";
    pub const OBSERVED_ATTRIBUTES: &'static [&'static str] = &["title"];

    /// Render into `host`'s shadow root and start listening for clicks.
    ///
    /// A host that already has a shadow root is re-rendered from scratch.
    pub fn connect(doc: &mut Document, host: NodeId, config: &SelectMenuConfig) -> Result<Self> {
        let shadow = match doc.shadow_root(host) {
            Some(shadow) => {
                doc.remove_children(shadow)?;
                shadow
            }
            None => doc.attach_shadow(host)?,
        };

        let title = title_or_placeholder(doc.get_attribute(host, "title"), &config.placeholder);
        doc.set_shadow_stylesheet(shadow, stylesheet(&config.theme, &config.active_class)?)?;
        doc.mount(shadow, &toggle_template(&title))?;
        doc.mount(shadow, &Element::div().class("select-list").child(Element::slot()))?;

        let parts = Self::locate_container_parts(doc, host)?;
        let class = config.active_class.clone();
        let mut listeners = Vec::with_capacity(2);

        listeners.push(doc.add_event_listener(parts.toggle, EventKind::Click, {
            let class = class.clone();
            move |doc, _| {
                log::debug!("toggle clicked on {}", parts.host);
                if let Err(err) = Self::toggle_active_state(doc, &parts.state_nodes(), &class) {
                    log::warn!("failed to toggle {}: {err}", parts.host);
                }
            }
        })?);

        if config.close_on_outside_click {
            let root = doc.root();
            listeners.push(doc.add_event_listener(root, EventKind::Click, move |doc, event| {
                let open = doc.has_class(parts.list, &class);
                // Items bound through `menu` count as inside wherever they sit.
                let inside = event.composed_path().iter().any(|node| {
                    *node == parts.host || item_owner(doc, *node) == Some(parts.host)
                });
                if !open || inside {
                    return;
                }
                log::debug!("outside click closes {}", parts.host);
                if let Err(err) = Self::toggle_active_state(doc, &parts.state_nodes(), &class) {
                    log::warn!("failed to close {}: {err}", parts.host);
                }
            })?);
        }

        log::debug!("connected select-menu {host} with title {title:?}");
        Ok(Self {
            parts,
            active_class: config.active_class.clone(),
            placeholder: config.placeholder.clone(),
            listeners,
        })
    }

    /// Release every listener acquired by [`SelectMenu::connect`].
    pub fn disconnect(&mut self, doc: &mut Document) {
        for id in self.listeners.drain(..) {
            doc.remove_event_listener(id);
        }
        log::debug!("disconnected select-menu {}", self.parts.host);
    }

    /// React to a change of an observed attribute.
    ///
    /// A new `title` replaces the label until the first selection is made.
    pub fn attribute_changed(
        &self,
        doc: &mut Document,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        if name != "title" || self.selection(doc).is_some() {
            return Ok(());
        }
        if let Some(label) = label_span(doc, self.parts.toggle) {
            let title = title_or_placeholder(value.map(str::to_string), &self.placeholder);
            doc.set_text_content(label, &title)?;
        }
        Ok(())
    }

    pub fn host(&self) -> NodeId {
        self.parts.host
    }

    pub fn parts(&self) -> &ContainerParts {
        &self.parts
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.parts.list, &self.active_class)
    }

    pub fn open(&self, doc: &mut Document) -> Result<()> {
        Self::set_active_state(doc, &self.parts.state_nodes(), &self.active_class, true)
    }

    pub fn close(&self, doc: &mut Document) -> Result<()> {
        Self::set_active_state(doc, &self.parts.state_nodes(), &self.active_class, false)
    }

    pub fn toggle(&self, doc: &mut Document) -> Result<()> {
        Self::toggle_active_state(doc, &self.parts.state_nodes(), &self.active_class)
    }

    /// Text currently shown in the toggle.
    pub fn label_text(&self, doc: &Document) -> Option<String> {
        label_span(doc, self.parts.toggle).map(|label| doc.text_content(label))
    }

    /// The current selection, or `None` until an item has been activated.
    pub fn selection(&self, doc: &Document) -> Option<Selection> {
        let toggle = self.parts.toggle;
        let label = doc.get_attribute(toggle, DATA_LABEL)?;
        Some(Selection {
            label,
            text: self.label_text(doc).unwrap_or_default(),
            value: doc.get_attribute(toggle, DATA_VALUE).unwrap_or_default(),
        })
    }
}

fn title_or_placeholder(title: Option<String>, placeholder: &str) -> String {
    title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

fn toggle_template(title: &str) -> Element {
    Element::div()
        .class("select-toggle")
        .attr(DATA_VALUE, "")
        .child(Element::span().text(title))
        .child(
            Element::div()
                .class("toggle-icon")
                .child(Element::span().class("chevron-up").text("▲"))
                .child(Element::span().class("chevron-down").text("▼")),
        )
}

fn stylesheet(theme: &SelectMenuTheme, active: &str) -> Result<StyleSheet> {
    let sheet = StyleSheet::new()
        .rule(
            ".select-toggle",
            Style::new()
                .direction(Direction::Row)
                .gap(2)
                .padding(Edges::new(0, 0, 0, 1))
                .background(theme.accent)
                .foreground(theme.toggle_foreground),
        )?
        .rule(
            ".toggle-icon",
            Style::new()
                .direction(Direction::Row)
                .padding(Edges::horizontal(1))
                .background(theme.icon_background),
        )?
        .rule(".toggle-icon .chevron-up", Style::new().dim())?
        .rule(".toggle-icon .chevron-down", Style::new().foreground(theme.accent))?
        .rule(
            &format!(".toggle-icon.{active} .chevron-up"),
            Style {
                dim: Some(false),
                ..Style::new().foreground(theme.accent)
            },
        )?
        .rule(
            &format!(".toggle-icon.{active} .chevron-down"),
            Style::new().foreground(theme.toggle_foreground).dim(),
        )?
        .rule(
            ".select-list",
            Style::new()
                .absolute(1, 0)
                .z_index(10)
                .visibility(Visibility::Hidden)
                .background(theme.separator)
                .foreground(theme.list_foreground),
        )?
        .rule(".select-list > slot", Style::new().gap(1))?
        .rule(
            &format!(".select-list.{active}"),
            Style::new().visibility(Visibility::Visible),
        )?;
    Ok(sheet)
}
