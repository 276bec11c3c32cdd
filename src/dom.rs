//! In-memory element tree the dialog controller operates on.
//!
//! A [`Document`] owns every node, their inline styles and the listeners
//! attached to them. Events dispatched on a node bubble up through its
//! ancestors until a listener stops propagation. Queries return a
//! [`Selection`], and every operation on an empty selection does nothing,
//! so callers never have to check whether an element exists.

pub mod css;
mod event;
pub mod layout;
mod node;
mod selector;

use std::rc::Rc;

use tracing::{trace, warn};

pub use event::{Event, Listener, ListenerId};
pub use layout::{Layout, Rect};
pub use node::{Node, NodeId, Style};
pub use selector::Selector;

use event::Registration;

/// Size of the visible area in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
    viewport: Viewport,
    listeners: Vec<Registration>,
    next_listener: u64,
}

impl Document {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            nodes: vec![Node::new("body")],
            body: NodeId(0),
            viewport: Viewport { width, height },
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub const fn body(&self) -> NodeId {
        self.body
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Create a detached element. Attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.node(parent).is_none() || self.is_ancestor(child, parent) {
            warn!(%parent, %child, "Refusing to append node");
            return;
        }
        if let Some(old_parent) = self.node(child).and_then(Node::parent) {
            if let Some(old) = self.node_mut(old_parent) {
                old.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(node) = self.node_mut(node) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(node) = self.node_mut(node) {
            node.id = Some(id.to_string());
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(node) = self.node_mut(node) {
            node.text = Some(text.to_string());
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(Node::text)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(node) {
            node.style.set(property, value);
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).and_then(|n| n.style().get(property))
    }

    pub fn show(&mut self, node: NodeId) {
        if let Some(node) = self.node_mut(node) {
            let display = node.shown_display();
            node.style.set("display", display);
        }
    }

    pub fn hide(&mut self, node: NodeId) {
        self.set_style(node, "display", "none");
    }

    /// Whether the node is attached to the body and neither it nor any of its
    /// ancestors is hidden.
    pub fn is_displayed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.node(id) else {
                return false;
            };
            if n.is_hidden() {
                return false;
            }
            if id == self.body {
                return true;
            }
            current = n.parent();
        }
        false
    }

    /// Ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(node).and_then(Node::parent), |id| {
            self.node(*id).and_then(Node::parent)
        })
    }

    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|id| id == candidate)
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(scope)
            .map(|n| n.children().iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children().iter().rev().copied());
            }
        }
        out
    }

    /// Descendants of `scope` matching `selector`. An unparsable selector
    /// yields an empty selection.
    pub fn query(&self, scope: NodeId, selector: &str) -> Selection {
        let Some(parsed) = Selector::parse(selector) else {
            warn!(selector, "Ignoring unsupported selector");
            return Selection::empty();
        };
        let nodes = self
            .descendants(scope)
            .into_iter()
            .filter(|&id| {
                self.node(id).is_some_and(|node| {
                    parsed.matches(node, self.ancestors(id).filter_map(|a| self.node(a)))
                })
            })
            .collect();
        Selection { nodes }
    }

    /// Query the whole document.
    pub fn query_document(&self, selector: &str) -> Selection {
        self.query(self.body, selector)
    }

    /// A selection holding just `node`, or nothing if it does not exist.
    pub fn select(&self, node: NodeId) -> Selection {
        if self.node(node).is_some() {
            Selection { nodes: vec![node] }
        } else {
            Selection::empty()
        }
    }

    /// Rendered height of the node in cells, `None` when it is not rendered.
    pub fn height(&self, node: NodeId) -> Option<u16> {
        Layout::compute(self)
            .rect(node)
            .map(|rect| u16::try_from(rect.height.max(0)).unwrap_or(u16::MAX))
    }

    /// Topmost rendered node at the cell `(x, y)`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<NodeId> {
        Layout::compute(self).hit_test(i32::from(x), i32::from(y))
    }

    pub fn on(
        &mut self,
        node: NodeId,
        event: &str,
        listener: impl Fn(&mut Self, &mut Event) + 'static,
    ) -> ListenerId {
        self.on_shared(node, event, Rc::new(listener))
    }

    pub fn on_shared(&mut self, node: NodeId, event: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Registration {
            id,
            node,
            event: event.to_string(),
            listener,
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|r| r.id != id);
        self.listeners.len() != before
    }

    /// Number of listeners registered on `node` for `event`.
    pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
        self.listeners
            .iter()
            .filter(|r| r.node == node && r.event == event)
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|r| r.id == id)
    }

    /// Fire `event` at `target` and let it bubble.
    ///
    /// Listeners of a node run in registration order. Listeners added while
    /// the event is being handled do not see it; listeners removed before
    /// their turn are skipped.
    pub fn dispatch(&mut self, target: NodeId, event: &str) -> Event {
        trace!(%target, event, "Dispatching event");
        let mut ev = Event::new(event, target);
        let mut current = self.node(target).map(|_| target);

        while let Some(node) = current {
            ev.set_current_target(node);
            let handlers: Vec<(ListenerId, Listener)> = self
                .listeners
                .iter()
                .filter(|r| r.node == node && r.event == event)
                .map(|r| (r.id, Rc::clone(&r.listener)))
                .collect();

            for (id, handler) in handlers {
                if self.is_registered(id) {
                    handler(self, &mut ev);
                }
            }

            if ev.is_propagation_stopped() {
                break;
            }
            current = self.node(node).and_then(Node::parent);
        }

        ev
    }
}

/// An ordered set of nodes. Operations apply to every node and do nothing
/// when the set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    pub const fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Descendants of any selected node matching `selector`, without
    /// duplicates.
    pub fn find(&self, doc: &Document, selector: &str) -> Self {
        let mut nodes: Vec<NodeId> = Vec::new();
        for &scope in &self.nodes {
            for id in doc.query(scope, selector).nodes {
                if !nodes.contains(&id) {
                    nodes.push(id);
                }
            }
        }
        Self { nodes }
    }

    pub fn show(&self, doc: &mut Document) {
        for &node in &self.nodes {
            doc.show(node);
        }
    }

    pub fn hide(&self, doc: &mut Document) {
        for &node in &self.nodes {
            doc.hide(node);
        }
    }

    pub fn css(&self, doc: &mut Document, property: &str, value: &str) {
        for &node in &self.nodes {
            doc.set_style(node, property, value);
        }
    }

    pub fn set_text(&self, doc: &mut Document, text: &str) {
        for &node in &self.nodes {
            doc.set_text(node, text);
        }
    }

    /// Rendered height of the first node.
    pub fn height(&self, doc: &Document) -> Option<u16> {
        self.first().and_then(|node| doc.height(node))
    }

    /// Attach `listener` to every node. Returns one id per node.
    pub fn on(
        &self,
        doc: &mut Document,
        event: &str,
        listener: impl Fn(&mut Document, &mut Event) + 'static,
    ) -> Vec<ListenerId> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let shared: Listener = Rc::new(listener);
        self.nodes
            .iter()
            .map(|&node| doc.on_shared(node, event, Rc::clone(&shared)))
            .collect()
    }
}
