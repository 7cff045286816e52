//! Errors raised by document operations.

use thiserror::Error;

use crate::document::NodeId;

/// Errors that can occur while building, querying or mutating a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not belong to this document.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// The operation needs an element but got a text node, shadow root or the document.
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// `attach_shadow` was called twice on the same host.
    #[error("Element {0} already hosts a shadow root")]
    ShadowRootExists(NodeId),

    /// The insertion would produce an invalid tree (cycle, or a child that cannot be inserted).
    #[error("Cannot insert {child} into {parent}")]
    HierarchyRequest {
        /// The would-be parent.
        parent: NodeId,
        /// The rejected child.
        child: NodeId,
    },

    /// A selector string could not be parsed.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector as given.
        selector: String,
        /// What the parser tripped over.
        reason: String,
    },

    /// Markup could not be parsed.
    #[error("Markup error at byte {position}: {message}")]
    Markup {
        /// Byte offset into the source.
        position: usize,
        /// Description of the problem.
        message: String,
    },
}

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, DomError>;
