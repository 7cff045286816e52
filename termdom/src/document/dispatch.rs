use std::cell::Cell;
use std::rc::Rc;

use super::{Document, NodeId, Registration};
use crate::error::{DomError, Result};
use crate::event::{DispatchOutcome, Event, EventKind, ListenerId, MouseButton};

impl Document {
    /// Register a listener on `node`. Listeners on the document node see
    /// every event that bubbles.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        listener: impl Fn(&mut Document, &Event) + 'static,
    ) -> Result<ListenerId> {
        if !self.exists(node) {
            return Err(DomError::UnknownNode(node));
        }

        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(
            id,
            Registration {
                node,
                kind,
                listener: Rc::new(listener),
            },
        );
        log::trace!("added {kind:?} listener {id:?} on {node}");
        Ok(id)
    }

    /// Returns true if the listener existed.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners registered directly on `node`.
    pub fn listeners_on(&self, node: NodeId) -> usize {
        self.listeners.values().filter(|r| r.node == node).count()
    }

    /// Target first, document last. Shadow roots are followed by their host.
    pub fn composed_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(id) = current {
            path.push(id);
            current = self.composed_parent(id);
        }
        path
    }

    /// Retarget `target` for a listener on `observer`: while the target sits in
    /// a shadow tree the observer is not part of, replace it with that tree's host.
    pub fn retarget(&self, target: NodeId, observer: NodeId) -> NodeId {
        let mut current = target;
        loop {
            let root = self.tree_root(current);
            match self.shadow_host(root) {
                Some(host) if !self.contains_composed(root, observer) => current = host,
                _ => return current,
            }
        }
    }

    pub fn dispatch_click(
        &mut self,
        target: NodeId,
        x: u16,
        y: u16,
        button: MouseButton,
    ) -> Result<DispatchOutcome> {
        self.dispatch(EventKind::Click, target, x, y, button)
    }

    /// Run the listeners along the composed path of `target`, bubbling from
    /// the target up to the document.
    ///
    /// Listeners are snapshotted up front, so listeners added during dispatch
    /// wait for the next event; listeners removed during dispatch are skipped.
    pub fn dispatch(
        &mut self,
        kind: EventKind,
        target: NodeId,
        x: u16,
        y: u16,
        button: MouseButton,
    ) -> Result<DispatchOutcome> {
        if !self.exists(target) {
            return Err(DomError::UnknownNode(target));
        }

        let path: Rc<[NodeId]> = self.composed_path(target).into();
        let snapshot: Vec<_> = path
            .iter()
            .map(|node| {
                self.listeners
                    .iter()
                    .filter(|(_, r)| r.node == *node && r.kind == kind)
                    .map(|(id, r)| (*id, Rc::clone(&r.listener)))
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut event = Event {
            kind,
            target,
            original_target: target,
            current_target: target,
            path: Rc::clone(&path),
            x,
            y,
            button,
            propagation_stopped: Cell::new(false),
        };

        log::trace!("dispatching {kind:?} to {target} along {} nodes", path.len());

        let mut invoked = 0;
        for (node, listeners) in path.iter().zip(snapshot) {
            if listeners.is_empty() {
                continue;
            }
            event.current_target = *node;
            event.target = self.retarget(target, *node);
            for (id, listener) in listeners {
                if !self.listeners.contains_key(&id) {
                    continue;
                }
                (*listener)(self, &event);
                invoked += 1;
            }
            if event.propagation_stopped() {
                break;
            }
        }

        Ok(DispatchOutcome {
            invoked,
            path: path.to_vec(),
            propagation_stopped: event.propagation_stopped(),
        })
    }
}
