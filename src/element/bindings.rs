//! Event binding manager.
//!
//! A binding declaration names a target, an event and a handler. The
//! target is a tagged variant resolved through one function, in a fixed
//! order: document, window, the host element itself, else a selector
//! string run against the shadow tree's current children. Selector
//! resolution is late-bound - it happens at every attach and detach, so
//! DOM mutations between binds are respected.
//!
//! All subscriptions are capture-phase, uniformly: bindings on ancestor
//! or global targets observe events from shadow-internal sources before
//! anything else can intercept them. Listener identity is the adapter's
//! `Rc` pointer, created once per declaration, so attach and detach
//! always address the same subscription.

use std::rc::Rc;

use log::debug;

use super::Element;
use crate::dom::{Event, EventTarget, ListenerFn};

/// Declared origin of an event binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetRef {
    /// The component's host element.
    Host,
    /// The global window scope.
    Window,
    /// The document object.
    Document,
    /// A selector resolved against the shadow tree at bind time.
    Selector(String),
}

/// Direction of a bind call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BindMode {
    Attach,
    Detach,
}

/// A declared binding plus its stable listener adapter.
pub(crate) struct LiveBinding {
    target: TargetRef,
    event: String,
    adapter: ListenerFn,
}

impl Element {
    /// Materialize the component's binding declarations. Runs once, at
    /// first attach; the declared set is immutable afterwards.
    pub(crate) fn declare_bindings(&mut self) {
        for decl in self.component.clone().bindings() {
            let weak = self.self_ref.clone();
            let handler = decl.handler.clone();
            let adapter: ListenerFn = Rc::new(move |event: &Event| {
                let Some(el) = weak.upgrade() else {
                    return;
                };
                match el.try_borrow_mut() {
                    Ok(mut el) => handler(&mut el, event),
                    Err(_) => debug!("re-entrant delivery of '{}' skipped", event.name),
                }
            });
            self.bindings.push(LiveBinding {
                target: decl.target,
                event: decl.event,
                adapter,
            });
        }
    }

    /// Resolve a target descriptor to concrete listener scopes, at call
    /// time. A selector matching nothing resolves to the empty set.
    fn resolve(&self, target: &TargetRef) -> Vec<EventTarget> {
        match target {
            TargetRef::Document => vec![EventTarget::Node(self.dom.borrow().document())],
            TargetRef::Window => vec![EventTarget::Window],
            TargetRef::Host => vec![EventTarget::Node(self.node)],
            TargetRef::Selector(selector) => {
                let found = self.dom.borrow().query_all(self.shadow, selector);
                if found.is_empty() {
                    debug!("selector '{selector}' matched no nodes, binding skipped");
                }
                found.into_iter().map(EventTarget::Node).collect()
            }
        }
    }

    /// Attach or detach one binding on its freshly resolved targets.
    pub(crate) fn bind(&self, binding: &LiveBinding, mode: BindMode) {
        let targets = self.resolve(&binding.target);
        let mut dom = self.dom.borrow_mut();
        for target in targets {
            match mode {
                BindMode::Attach => {
                    dom.add_event_listener(target, &binding.event, binding.adapter.clone(), true);
                }
                BindMode::Detach => {
                    dom.remove_event_listener(target, &binding.event, &binding.adapter, true);
                }
            }
        }
    }

    /// Attach every declared binding. Idempotent at the set level: if
    /// the set is already attached this is a no-op, keeping attach and
    /// detach exactly paired.
    pub(crate) fn attach_bindings(&mut self) {
        if self.bound {
            return;
        }
        for binding in &self.bindings {
            self.bind(binding, BindMode::Attach);
        }
        self.bound = true;
    }

    /// Detach every declared binding. No-op when not attached.
    pub(crate) fn detach_bindings(&mut self) {
        if !self.bound {
            return;
        }
        for binding in &self.bindings {
            self.bind(binding, BindMode::Detach);
        }
        self.bound = false;
    }
}
