//! Declarative element templates.
//!
//! An [`Element`] describes a subtree before it exists in a document; build it
//! with [`Document::mount`](crate::Document::mount). Components use templates
//! to render their shadow trees, and the markup parser produces them.

mod content;
mod node;

pub use content::Child;
pub use node::Element;
