use super::NodeId;

/// Element lifecycle records, queued by the document and drained with
/// [`Document::take_lifecycle`](super::Document::take_lifecycle).
///
/// Records are only produced for elements that are (or just stopped being)
/// connected, i.e. reachable from the document node through parents and
/// shadow hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// The element became connected.
    Connected(NodeId),
    /// The element stopped being connected.
    Disconnected(NodeId),
    /// An attribute was set or removed on a connected element.
    AttributeChanged {
        element: NodeId,
        name: String,
        old: Option<String>,
        new: Option<String>,
    },
}
