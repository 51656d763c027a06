//! Custom element instances.
//!
//! An [`Element`] is one live instance of a [`Component`] definition: the
//! host node, its shadow root, the two property registries, the declared
//! event bindings and the render cache. The submodules hold the moving
//! parts:
//!
//! - [`reactive`] - the signal-backed reactive property registry
//! - [`attrs`] - attribute-linked properties
//! - [`render`] - compose + cache + replace shadow content
//! - [`bindings`] - capture-phase event binding attach/detach
//! - [`lifecycle`] - the four host lifecycle hooks

pub mod attrs;
pub mod bindings;
pub mod lifecycle;
pub mod reactive;
pub mod render;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use heck::{ToKebabCase, ToLowerCamelCase};
use spark_signals::Signal;

use crate::dom::{self, DomHandle, Event, NodeId};
use crate::types::PropValue;

use bindings::LiveBinding;
pub use bindings::TargetRef;
pub use lifecycle::LifecycleState;

// =============================================================================
// Author surface
// =============================================================================

/// Shared handle to a live element.
pub type ElementHandle = Rc<RefCell<Element>>;

/// Declared event handler. Receives the element the binding belongs to
/// and the event being delivered.
pub type EventHandler = Rc<dyn Fn(&mut Element, &Event)>;

/// Declaration of a reactive property: name, initial value, and whether
/// writes mirror to the matching dash-case attribute.
#[derive(Clone, Debug)]
pub struct ReactiveDecl {
    pub name: String,
    pub initial: PropValue,
    pub mirror: bool,
}

impl ReactiveDecl {
    /// A reactive property without attribute mirroring.
    pub fn new(name: impl Into<String>, initial: impl Into<PropValue>) -> Self {
        Self {
            name: name.into(),
            initial: initial.into(),
            mirror: false,
        }
    }

    /// A reactive property that mirrors every write to its attribute.
    pub fn mirrored(name: impl Into<String>, initial: impl Into<PropValue>) -> Self {
        Self {
            name: name.into(),
            initial: initial.into(),
            mirror: true,
        }
    }
}

/// Declaration of an attribute-linked property: name plus an optional
/// default applied only when the attribute is absent at registration.
#[derive(Clone, Debug)]
pub struct AttrDecl {
    pub name: String,
    pub default: Option<PropValue>,
}

impl AttrDecl {
    /// An attribute-linked property with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// An attribute-linked property with a default value.
    pub fn with_default(name: impl Into<String>, default: impl Into<PropValue>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

/// Declaration of an event binding: target, event name, handler.
#[derive(Clone)]
pub struct BindingDecl {
    pub target: TargetRef,
    pub event: String,
    pub handler: EventHandler,
}

impl BindingDecl {
    pub fn new(target: TargetRef, event: impl Into<String>, handler: EventHandler) -> Self {
        Self {
            target,
            event: event.into(),
            handler,
        }
    }
}

/// A component definition. Every method is optional; a unit struct with
/// an empty impl is a valid (if inert) component.
///
/// `styles` and `template` produce opaque markup strings - there is no
/// interpolation language. They receive the element so they can read the
/// current property values.
pub trait Component {
    /// CSS for the shadow content. Non-empty output is wrapped in a
    /// `<style>` element ahead of the template output.
    fn styles(&self, el: &Element) -> Option<String> {
        let _ = el;
        None
    }

    /// Markup for the shadow content. `None` renders the passive
    /// content-projection placeholder `<slot></slot>`.
    fn template(&self, el: &Element) -> Option<String> {
        let _ = el;
        None
    }

    /// Reactive property declarations, registered in order at first attach.
    fn reactive(&self) -> Vec<ReactiveDecl> {
        Vec::new()
    }

    /// Attribute-linked property declarations, registered after the
    /// reactive ones.
    fn attributes(&self) -> Vec<AttrDecl> {
        Vec::new()
    }

    /// Event binding declarations. Declared once; attached and detached
    /// around every shadow-content replacement.
    fn bindings(&self) -> Vec<BindingDecl> {
        Vec::new()
    }
}

// =============================================================================
// Element
// =============================================================================

/// One live custom element instance.
pub struct Element {
    dom: DomHandle,
    node: NodeId,
    shadow: NodeId,
    component: Rc<dyn Component>,
    self_ref: Weak<RefCell<Element>>,

    state: LifecycleState,
    /// Registries run exactly once, on the first attach.
    initialized: bool,

    /// Compact names owned by either registry; first registration wins.
    claimed: HashSet<String>,
    reactive_props: HashMap<String, Signal<PropValue>>,
    /// Reactive props that mirror writes to their attribute.
    mirrored: HashSet<String>,
    /// Attribute value snapshots taken at registration time. The setter
    /// compares against these, not the live attribute (see `attrs`).
    attr_snapshots: HashMap<String, Option<String>>,

    bindings: Vec<LiveBinding>,
    /// Whether the declared bindings are currently attached. Keeps
    /// attach/detach exactly paired.
    bound: bool,

    /// Last composed string written to the shadow tree.
    cached_render: Option<String>,
}

impl Element {
    /// Create a detached element for `component`, with its shadow root
    /// attached. Lifecycle hooks have not run yet.
    pub fn create(dom: &DomHandle, tag: &str, component: Rc<dyn Component>) -> ElementHandle {
        let (node, shadow) = {
            let mut d = dom.borrow_mut();
            let node = d.create_element(tag);
            let shadow = d.attach_shadow(node);
            (node, shadow)
        };
        Rc::new_cyclic(|self_ref| {
            RefCell::new(Element {
                dom: dom.clone(),
                node,
                shadow,
                component,
                self_ref: self_ref.clone(),
                state: LifecycleState::Created,
                initialized: false,
                claimed: HashSet::new(),
                reactive_props: HashMap::new(),
                mirrored: HashSet::new(),
                attr_snapshots: HashMap::new(),
                bindings: Vec::new(),
                bound: false,
                cached_render: None,
            })
        })
    }

    /// The host node in the document.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The shadow root the renderer writes into.
    pub fn shadow_root(&self) -> NodeId {
        self.shadow
    }

    /// Handle to the document this element lives in.
    pub fn dom(&self) -> DomHandle {
        self.dom.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The composed string of the last executed render, if any.
    pub fn cached_render(&self) -> Option<&str> {
        self.cached_render.as_deref()
    }

    // =========================================================================
    // Attribute surface (observing path)
    // =========================================================================

    /// Read an attribute off the host node.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.dom.borrow().attribute(self.node, name)
    }

    /// Write an attribute on the host node and run the attribute-change
    /// observation in [`lifecycle`], the way an external mutation would.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let old = self.dom.borrow().attribute(self.node, name);
        self.dom.borrow_mut().set_attribute_raw(self.node, name, value);
        self.attribute_changed(name, old.as_deref(), value);
    }

    // =========================================================================
    // Broadcast
    // =========================================================================

    /// Emit a named event with an optional payload from the host node.
    /// Ancestors (and global capture listeners) observe it.
    pub fn broadcast(&self, name: &str, payload: Option<PropValue>) {
        let event = Event {
            name: name.to_string(),
            payload,
            target: Some(self.node),
        };
        dom::dispatch(&self.dom, &event);
    }

    /// Emit a named event on the window scope, observable document-wide.
    pub fn broadcast_global(&self, name: &str, payload: Option<PropValue>) {
        let event = Event {
            name: name.to_string(),
            payload,
            target: None,
        };
        dom::dispatch_window(&self.dom, &event);
    }
}

// =============================================================================
// Name codec
// =============================================================================

/// Compact property form: `user-name` → `userName`. Registry keys use this.
pub(crate) fn compact(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Dash-delimited attribute form: `userName` → `user-name`.
pub(crate) fn dashed(name: &str) -> String {
    name.to_kebab_case()
}
