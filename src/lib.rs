//! # umbra
//!
//! Reactive custom element runtime with a headless document model.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! reactive property cells.
//!
//! ## Architecture
//!
//! Components are trait objects declaring properties, event bindings and a
//! template; each live element instance owns its host node, a shadow root and
//! the registered property state. Writes to reactive or attribute-linked
//! properties funnel into one render pass:
//!
//! ```text
//! set_prop / set_attr_prop / attribute_changed
//!     → compose styles + template
//!     → cache check (exact string identity)
//!     → detach bindings → replace shadow content → reattach bindings
//! ```
//!
//! All event bindings subscribe in the capture phase, so ancestor and global
//! listeners observe events emitted from inside shadow trees.
//!
//! ## Modules
//!
//! - [`types`] - the property value model ([`PropValue`])
//! - [`dom`] - headless document: nodes, attributes, markup, selectors, dispatch
//! - [`element`] - element instances, property registries, rendering, lifecycle
//! - [`registry`] - tag-to-component definitions
//! - [`mount`] - create/attach/detach/adopt entry points

pub mod dom;
pub mod element;
pub mod mount;
pub mod registry;
pub mod types;

// Re-export commonly used items
pub use types::PropValue;

pub use dom::{
    dispatch, dispatch_window, Dom, DomHandle, Event, EventTarget, ListenerFn, NodeId,
};

pub use element::{
    AttrDecl, BindingDecl, Component, Element, ElementHandle, EventHandler, LifecycleState,
    ReactiveDecl, TargetRef,
};

pub use registry::{tag_name, ComponentFactory, Registry};
