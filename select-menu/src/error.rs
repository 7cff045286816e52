//! Errors raised while setting up select menu components.

use termdom::{DomError, NodeId};
use thiserror::Error;

/// Failures that prevent a component from connecting.
///
/// Listener bodies never return these; problems inside a click handler are
/// logged and the handler gives up.
#[derive(Debug, Error)]
pub enum SelectMenuError {
    /// An item has no enclosing container and no `menu` attribute naming a
    /// connected one.
    #[error("no connected select-menu owns item {item}")]
    ContainerNotFound { item: NodeId },

    /// A container was asked for its parts before it rendered.
    #[error("element {0} has no shadow root")]
    MissingShadowRoot(NodeId),

    /// The container's rendered markup lacks a required part.
    #[error("select-menu is missing its {part} part")]
    MissingPart { part: &'static str },

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, SelectMenuError>;
