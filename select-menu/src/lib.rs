//! A dropdown selector built from two cooperating elements.
//!
//! A `select-menu` container renders a toggle (current title or selection plus
//! a chevron) and a list region that projects its `select-item` children.
//! Clicking the toggle opens and closes the list, clicking an item writes the
//! item into the toggle and closes it, and clicking anywhere else closes an
//! open menu.
//!
//! ```ignore
//! let mut doc = Document::new();
//! let mut registry = ComponentRegistry::new(SelectMenuConfig::default());
//! doc.append_markup(doc.body(), r#"<select-menu title="Pick one">
//!     <select-item value="1" text="Alpha">Alpha-row</select-item>
//! </select-menu>"#)?;
//! registry.process(&mut doc)?;
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod item;
pub mod parts;
pub mod registry;

pub use config::{SelectMenuConfig, SelectMenuTheme};
pub use container::{DATA_LABEL, DATA_VALUE, SelectMenu, Selection};
pub use error::{Result, SelectMenuError};
pub use item::SelectItem;
pub use parts::{ActiveStateToggle, ContainerParts, ContainerPartsLookup, MENU_ATTRIBUTE, item_owner};
pub use registry::ComponentRegistry;
