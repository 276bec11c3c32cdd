use std::rc::Rc;

use super::{Document, NodeId};

/// Identifies one registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Handler invoked for an event on the node it was registered on.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Event)>;

/// An interaction travelling from its target up through the ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    target: NodeId,
    current_target: NodeId,
    propagation_stopped: bool,
}

impl Event {
    pub(crate) fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
            current_target: target,
            propagation_stopped: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node the event was dispatched on.
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listeners are running right now.
    pub const fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub(crate) const fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }

    /// Keep the event from reaching further ancestors. Remaining listeners
    /// on the current node still run.
    pub const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

pub(crate) struct Registration {
    pub(crate) id: ListenerId,
    pub(crate) node: NodeId,
    pub(crate) event: String,
    pub(crate) listener: Listener,
}
