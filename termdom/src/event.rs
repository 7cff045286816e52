//! Events and listeners.

use std::cell::Cell;
use std::rc::Rc;

use crate::document::{Document, NodeId};

/// Kinds of events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

/// Handle returned by [`Document::add_event_listener`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// A listener callback. The document is handed in mutably so handlers can
/// rewrite the tree they were dispatched from.
pub type Listener = Rc<dyn Fn(&mut Document, &Event)>;

/// A dispatched event as seen by one listener.
#[derive(Debug, Clone)]
pub struct Event {
    pub(crate) kind: EventKind,
    pub(crate) target: NodeId,
    pub(crate) original_target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) path: Rc<[NodeId]>,
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) button: MouseButton,
    pub(crate) propagation_stopped: Cell<bool>,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The target as visible from the listener's tree scope.
    ///
    /// Targets inside a shadow tree are reported as their host to listeners
    /// outside that shadow tree.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node the event was originally dispatched to.
    pub fn original_target(&self) -> NodeId {
        self.original_target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    /// Target first, document last, crossing shadow roots to their hosts.
    pub fn composed_path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    /// Stop the event after the listeners of the current node have run.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Summary of a finished dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Number of listeners that ran.
    pub invoked: usize,
    /// The composed path the event travelled.
    pub path: Vec<NodeId>,
    pub propagation_stopped: bool,
}
