//! Host lifecycle hooks.
//!
//! Four entry points drive an element's life: `connected` when the host
//! enters a document, `disconnected` when it leaves, `adopted` when it
//! moves between documents, and `attribute_changed` when a host
//! attribute is written through the observing path.
//!
//! Property and binding registration runs exactly once, on the first
//! `connected` call, in declaration order: reactive properties, then
//! attribute-linked properties, then bindings. Later attaches reuse the
//! registered state.

use log::trace;

use super::Element;
use crate::types::PropValue;

/// Where an element currently stands in its host lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created but never attached to a document.
    Created,
    /// Currently attached to a document.
    Attached,
    /// Previously attached, currently removed.
    Detached,
}

impl Element {
    /// Host entered a document. First call registers the component's
    /// declarations; every call renders. When the render is suppressed
    /// by the cache the bindings are reattached directly, so a detached
    /// element that comes back with unchanged content still listens.
    pub fn connected(&mut self) {
        if !self.initialized {
            let component = self.component.clone();
            for decl in component.reactive() {
                self.register_reactive(&decl.name, decl.initial, decl.mirror);
            }
            for decl in component.attributes() {
                self.register_attr_linked(&decl.name, decl.default);
            }
            self.declare_bindings();
            self.initialized = true;
        }

        self.state = LifecycleState::Attached;
        if !self.render() {
            self.attach_bindings();
        }
    }

    /// Host left the document. Bindings come off; registered properties
    /// and the render cache survive for a later reattach.
    pub fn disconnected(&mut self) {
        self.detach_bindings();
        self.state = LifecycleState::Detached;
    }

    /// Host moved into another document context. Re-renders against the
    /// cache; unchanged content reattaches bindings directly, the same
    /// way `connected` does.
    pub fn adopted(&mut self) {
        self.state = LifecycleState::Attached;
        if !self.render() {
            self.attach_bindings();
        }
    }

    /// A host attribute was written through the observing path. Equal
    /// old and new values are dropped before any routing. Otherwise the
    /// write is forwarded into whichever registry owns the name: the
    /// reactive setter (as a string value) or the attribute-linked
    /// setter. Unregistered names are ignored.
    pub(crate) fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: &str) {
        if old == Some(new) {
            return;
        }
        let key = super::compact(name);
        if self.reactive_props.contains_key(&key) {
            self.set_prop(name, PropValue::Str(new.to_string()));
        } else if self.attr_snapshots.contains_key(&key) {
            self.set_attr_prop(name, new);
        } else {
            trace!("attribute '{name}' changed but no property observes it");
        }
    }
}
