//! Upgrades `select-menu` and `select-item` elements as they come and go.

use std::collections::{BTreeMap, BTreeSet};

use termdom::{Document, Lifecycle, NodeId};

use crate::config::SelectMenuConfig;
use crate::container::SelectMenu;
use crate::error::{Result, SelectMenuError};
use crate::item::SelectItem;
use crate::parts::item_owner;

/// Drives component lifecycles from a document's lifecycle records.
///
/// Call [`ComponentRegistry::process`] after mounting markup and after every
/// dispatched event.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    config: SelectMenuConfig,
    menus: BTreeMap<NodeId, SelectMenu>,
    items: BTreeMap<NodeId, SelectItem>,
    /// Connected items waiting for their container to connect.
    orphans: BTreeSet<NodeId>,
}

impl ComponentRegistry {
    pub fn new(config: SelectMenuConfig) -> Self {
        Self {
            config,
            menus: BTreeMap::new(),
            items: BTreeMap::new(),
            orphans: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &SelectMenuConfig {
        &self.config
    }

    /// Drain and handle every pending lifecycle record, including records
    /// produced while handling them.
    ///
    /// Every record is handled even when one fails; the first failure is returned.
    pub fn process(&mut self, doc: &mut Document) -> Result<()> {
        let mut first_error = None;
        loop {
            let records = doc.take_lifecycle();
            if records.is_empty() {
                break;
            }
            for record in records {
                if let Err(err) = self.handle(doc, record) {
                    log::warn!("lifecycle handling failed: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn handle(&mut self, doc: &mut Document, record: Lifecycle) -> Result<()> {
        match record {
            Lifecycle::Connected(element) => self.connected(doc, element),
            Lifecycle::Disconnected(element) => {
                self.disconnected(doc, element);
                Ok(())
            }
            Lifecycle::AttributeChanged {
                element, name, new, ..
            } => self.attribute_changed(doc, element, &name, new.as_deref()),
        }
    }

    fn connected(&mut self, doc: &mut Document, element: NodeId) -> Result<()> {
        let tag = doc.tag(element).map(str::to_string);
        match tag.as_deref() {
            Some(SelectMenu::TAG) => {
                self.disconnected(doc, element);
                let menu = SelectMenu::connect(doc, element, &self.config)?;
                self.menus.insert(element, menu);
                self.adopt_items(doc, element)?;
            }
            Some(SelectItem::TAG) => {
                self.disconnected(doc, element);
                let owner = match self.owner_of(doc, element) {
                    Ok(owner) => owner,
                    Err(err) => {
                        self.orphans.insert(element);
                        return Err(err);
                    }
                };
                let item = SelectItem::connect(doc, element, owner, &self.config)?;
                self.items.insert(element, item);
            }
            _ => {}
        }
        Ok(())
    }

    /// Tear down `element`. Items owned by a departing container are torn
    /// down with it and wait for the container to come back.
    fn disconnected(&mut self, doc: &mut Document, element: NodeId) {
        self.orphans.remove(&element);
        if let Some(mut menu) = self.menus.remove(&element) {
            menu.disconnect(doc);
            let owned: Vec<NodeId> = self
                .items
                .values()
                .filter(|item| item.owner() == element)
                .map(SelectItem::host)
                .collect();
            for host in owned {
                if let Some(mut item) = self.items.remove(&host) {
                    item.disconnect(doc);
                }
                self.orphans.insert(host);
            }
        }
        if let Some(mut item) = self.items.remove(&element) {
            item.disconnect(doc);
        }
    }

    /// Connect every live item that resolves to the freshly connected `host`,
    /// reconnecting items still wired to its previous rendering.
    fn adopt_items(&mut self, doc: &mut Document, host: NodeId) -> Result<()> {
        self.orphans.retain(|item| doc.exists(*item));
        let candidates: Vec<NodeId> = self
            .orphans
            .iter()
            .copied()
            .chain(
                self.items
                    .values()
                    .filter(|item| item.owner() == host)
                    .map(SelectItem::host),
            )
            .filter(|item| doc.is_connected(*item) && item_owner(doc, *item) == Some(host))
            .collect();

        let mut first_error = None;
        for host_item in candidates {
            self.orphans.remove(&host_item);
            if let Some(mut stale) = self.items.remove(&host_item) {
                stale.disconnect(doc);
            }
            match SelectItem::connect(doc, host_item, host, &self.config) {
                Ok(item) => {
                    log::debug!("select-item {host_item} adopted by {host}");
                    self.items.insert(host_item, item);
                }
                Err(err) => {
                    log::warn!("failed to adopt select-item {host_item}: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn attribute_changed(
        &mut self,
        doc: &mut Document,
        element: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let menu = self
            .menus
            .get(&element)
            .filter(|_| SelectMenu::OBSERVED_ATTRIBUTES.contains(&name));
        if let Some(menu) = menu {
            menu.attribute_changed(doc, name, value)?;
        }

        let item = self
            .items
            .get(&element)
            .filter(|_| SelectItem::OBSERVED_ATTRIBUTES.contains(&name));
        if let Some(item) = item {
            item.attribute_changed(doc, name, value)?;
        }
        Ok(())
    }

    /// The connected container owning `item`.
    fn owner_of(&self, doc: &Document, item: NodeId) -> Result<NodeId> {
        item_owner(doc, item)
            .filter(|menu| self.menus.contains_key(menu))
            .ok_or(SelectMenuError::ContainerNotFound { item })
    }

    pub fn menu(&self, host: NodeId) -> Option<&SelectMenu> {
        self.menus.get(&host)
    }

    pub fn item(&self, host: NodeId) -> Option<&SelectItem> {
        self.items.get(&host)
    }

    /// Connected containers in node order.
    pub fn menus(&self) -> impl Iterator<Item = &SelectMenu> {
        self.menus.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &SelectItem> {
        self.items.values()
    }

    /// Connected items whose container is not connected yet, in node order.
    pub fn orphans(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.orphans.iter().copied()
    }
}
