//! In-memory host DOM.
//!
//! This is the platform layer the element runtime sits on: an arena node
//! tree with attribute lists, shadow roots, per-node event listener lists
//! and a window-scope listener list, plus capture/bubble event dispatch
//! that crosses shadow boundaries.
//!
//! The arena is append-only: removing or replacing a subtree detaches it
//! from its parent but leaves the slots in place. Documents here live for
//! the length of a test or an embedding session, so reclaiming slots is
//! not worth the bookkeeping.

pub mod parser;
pub mod selector;

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::PropValue;

// =============================================================================
// Handles and Ids
// =============================================================================

/// Shared handle to a document. Single-threaded by design.
pub type DomHandle = Rc<RefCell<Dom>>;

/// Event listener callback. Listener identity (for removal) is `Rc`
/// pointer identity, mirroring the host platform's unsubscribe contract.
pub type ListenerFn = Rc<dyn Fn(&Event)>;

/// Index of a node in the document arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node is.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// The document root (node 0, exactly one per document).
    Document,
    /// An element with a tag name.
    Element { tag: String },
    /// The encapsulated content root of a custom element.
    ShadowRoot,
    /// A text node.
    Text { text: String },
}

/// Where a listener hangs: the window scope or a concrete node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTarget {
    /// The global window scope, outermost on every dispatch path.
    Window,
    /// A node in the document.
    Node(NodeId),
}

// =============================================================================
// Events
// =============================================================================

/// A dispatched event: a name, an optional payload, and the node it was
/// emitted from (`None` for window-origin events).
#[derive(Clone)]
pub struct Event {
    /// Event name, matched exactly against listener registrations.
    pub name: String,
    /// Optional broadcast payload.
    pub payload: Option<PropValue>,
    /// Origin node, `None` when emitted on the window scope.
    pub target: Option<NodeId>,
}

impl Event {
    /// Create a payload-less event originating at `target`.
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            payload: None,
            target: Some(target),
        }
    }

    /// Create a payload-less event on the window scope.
    pub fn window(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
            target: None,
        }
    }
}

struct Listener {
    event: String,
    callback: ListenerFn,
    capture: bool,
}

struct NodeData {
    kind: NodeKind,
    attrs: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    shadow_root: Option<NodeId>,
    listeners: Vec<Listener>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
            parent: None,
            children: Vec::new(),
            shadow_root: None,
            listeners: Vec::new(),
        }
    }
}

// =============================================================================
// Dom
// =============================================================================

/// An in-memory document: arena of nodes plus the window listener scope.
pub struct Dom {
    nodes: Vec<NodeData>,
    window_listeners: Vec<Listener>,
}

impl Dom {
    /// Create a fresh document. Node 0 is the document root.
    pub fn new() -> DomHandle {
        let dom = Dom {
            nodes: vec![NodeData::new(NodeKind::Document)],
            window_listeners: Vec::new(),
        };
        Rc::new(RefCell::new(dom))
    }

    /// The document root node.
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    // =========================================================================
    // Tree construction
    // =========================================================================

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::new(NodeKind::Element {
            tag: tag.to_string(),
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::new(NodeKind::Text {
            text: text.to_string(),
        }))
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Remove `node` from its parent's child list. The subtree stays
    /// intact and can be re-appended.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node(node).parent {
            self.node_mut(parent).children.retain(|&c| c != node);
            self.node_mut(node).parent = None;
        }
    }

    /// Drop every child of `node`. The orphaned subtrees stay in the arena.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    /// Attach a shadow root to `host` (or return the existing one).
    ///
    /// The shadow root's parent link points at the host so dispatch paths
    /// climb out of the shadow tree, but it is not one of the host's
    /// light-DOM children.
    pub fn attach_shadow(&mut self, host: NodeId) -> NodeId {
        if let Some(shadow) = self.node(host).shadow_root {
            return shadow;
        }
        let shadow = self.push(NodeData::new(NodeKind::ShadowRoot));
        self.node_mut(shadow).parent = Some(host);
        self.node_mut(host).shadow_root = Some(shadow);
        shadow
    }

    /// The shadow root of `host`, if one was attached.
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.node(host).shadow_root
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Tag name, for element nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    /// Text content, for text nodes.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Child nodes in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Parent node. A shadow root's parent is its host.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Current attribute value, if present.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node)
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    /// Whether the attribute is present.
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.node(node).attrs.iter().any(|(k, _)| k == name)
    }

    /// Set an attribute without triggering any lifecycle observation.
    ///
    /// This is the write path used by property mirroring; the observing
    /// path is `Element::set_attribute`.
    pub fn set_attribute_raw(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.node_mut(node).attrs;
        if let Some(entry) = attrs.iter_mut().find(|(k, _)| k == name) {
            entry.1 = value.to_string();
        } else {
            attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Remove an attribute without triggering any lifecycle observation.
    pub fn remove_attribute_raw(&mut self, node: NodeId, name: &str) {
        self.node_mut(node).attrs.retain(|(k, _)| k != name);
    }

    // =========================================================================
    // Event listeners
    // =========================================================================

    fn scope(&self, target: EventTarget) -> &Vec<Listener> {
        match target {
            EventTarget::Window => &self.window_listeners,
            EventTarget::Node(id) => &self.node(id).listeners,
        }
    }

    fn scope_mut(&mut self, target: EventTarget) -> &mut Vec<Listener> {
        match target {
            EventTarget::Window => &mut self.window_listeners,
            EventTarget::Node(id) => &mut self.node_mut(id).listeners,
        }
    }

    /// Subscribe `callback` to `event` on `target`.
    pub fn add_event_listener(
        &mut self,
        target: EventTarget,
        event: &str,
        callback: ListenerFn,
        capture: bool,
    ) {
        self.scope_mut(target).push(Listener {
            event: event.to_string(),
            callback,
            capture,
        });
    }

    /// Unsubscribe a previously added listener. Matching is by event name,
    /// capture flag and `Rc` pointer identity; absent listeners are a
    /// silent no-op.
    pub fn remove_event_listener(
        &mut self,
        target: EventTarget,
        event: &str,
        callback: &ListenerFn,
        capture: bool,
    ) {
        self.scope_mut(target).retain(|l| {
            !(l.event == event && l.capture == capture && Rc::ptr_eq(&l.callback, callback))
        });
    }

    /// Number of listeners for `event` on `target`, both phases.
    pub fn listener_count(&self, target: EventTarget, event: &str) -> usize {
        self.scope(target).iter().filter(|l| l.event == event).count()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

fn collect(listeners: &[Listener], name: &str, capture: bool, out: &mut Vec<ListenerFn>) {
    for l in listeners {
        if l.event == name && l.capture == capture {
            out.push(l.callback.clone());
        }
    }
}

/// Dispatch an event along the composed path of its target.
///
/// Phase order: window capture, ancestors outermost-in (capture), target
/// (capture then bubble), ancestors innermost-out (bubble), window bubble.
/// Shadow boundaries are crossed because a shadow root's parent is its
/// host element.
///
/// The matching listener list is snapshotted before any handler runs, so
/// handlers may re-render and mutate listener lists re-entrantly.
pub fn dispatch(dom: &DomHandle, event: &Event) {
    let callbacks: Vec<ListenerFn> = {
        let dom = dom.borrow();
        let mut chain = Vec::new();
        let mut cursor = event.target;
        while let Some(id) = cursor {
            chain.push(id);
            cursor = dom.parent(id);
        }

        let mut out = Vec::new();
        collect(&dom.window_listeners, &event.name, true, &mut out);
        for id in chain.iter().skip(1).rev() {
            collect(&dom.node(*id).listeners, &event.name, true, &mut out);
        }
        if let Some(target) = chain.first() {
            collect(&dom.node(*target).listeners, &event.name, true, &mut out);
            collect(&dom.node(*target).listeners, &event.name, false, &mut out);
        }
        for id in chain.iter().skip(1) {
            collect(&dom.node(*id).listeners, &event.name, false, &mut out);
        }
        collect(&dom.window_listeners, &event.name, false, &mut out);
        out
    };

    for callback in callbacks {
        callback(event);
    }
}

/// Dispatch an event on the window scope only.
pub fn dispatch_window(dom: &DomHandle, event: &Event) {
    let callbacks: Vec<ListenerFn> = {
        let dom = dom.borrow();
        let mut out = Vec::new();
        collect(&dom.window_listeners, &event.name, true, &mut out);
        collect(&dom.window_listeners, &event.name, false, &mut out);
        out
    };
    for callback in callbacks {
        callback(event);
    }
}
