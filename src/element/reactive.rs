//! Reactive property registry.
//!
//! Each declared property lives in a `spark_signals::Signal` cell keyed by
//! the compact form of its name. Reads return the current value; writes
//! run through [`Element::set_prop`], which gates on strict inequality,
//! mirrors to the attribute when configured, and triggers a render.
//!
//! Registration is idempotent by absence-check: a name already claimed by
//! either registry is silently left alone, whatever the new declaration
//! says. First registration wins.

use log::debug;
use spark_signals::{Signal, signal};

use super::{Element, compact, dashed};
use crate::types::PropValue;

impl Element {
    /// Register a reactive property. No-op if `name` (compact form) is
    /// already claimed. When `mirror` is set, the matching dash-case
    /// attribute is written immediately with the initial value's string
    /// form.
    pub(crate) fn register_reactive(&mut self, name: &str, initial: PropValue, mirror: bool) {
        let key = compact(name);
        if self.claimed.contains(&key) {
            debug!("property '{key}' already registered, skipping reactive declaration");
            return;
        }
        self.claimed.insert(key.clone());

        if mirror {
            self.mirrored.insert(key.clone());
            self.dom
                .borrow_mut()
                .set_attribute_raw(self.node, &dashed(name), &initial.to_string());
        }
        self.reactive_props.insert(key, signal(initial));
    }

    /// Current value of a reactive property, or `None` if no such
    /// property is registered.
    pub fn prop(&self, name: &str) -> Option<PropValue> {
        self.reactive_props.get(&compact(name)).map(Signal::get)
    }

    /// The underlying signal cell of a reactive property, for wiring
    /// into deriveds or effects outside the element.
    pub fn prop_signal(&self, name: &str) -> Option<Signal<PropValue>> {
        self.reactive_props.get(&compact(name)).cloned()
    }

    /// Write a reactive property.
    ///
    /// A value strictly equal to the stored one is a silent no-op: no
    /// render, no attribute write. Otherwise the cell is updated, the
    /// attribute is mirrored (if configured) with the value's string
    /// form, and a render is triggered. Writes to unregistered names are
    /// silently dropped.
    pub fn set_prop(&mut self, name: &str, value: impl Into<PropValue>) {
        let key = compact(name);
        let value = value.into();
        let Some(cell) = self.reactive_props.get(&key) else {
            debug!("set_prop on unregistered property '{key}' ignored");
            return;
        };
        if cell.get() == value {
            return;
        }
        cell.set(value.clone());

        if self.mirrored.contains(&key) {
            self.dom
                .borrow_mut()
                .set_attribute_raw(self.node, &dashed(name), &value.to_string());
        }
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::super::{Component, Element};
    use crate::dom::Dom;
    use crate::types::PropValue;

    struct Inert;
    impl Component for Inert {}

    fn element() -> (crate::dom::DomHandle, super::super::ElementHandle) {
        let dom = Dom::new();
        let el = Element::create(&dom, "x-test", Rc::new(Inert));
        (dom, el)
    }

    #[test]
    fn test_register_and_read() {
        let (_dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("count", PropValue::Int(0), false);
        assert_eq!(el.prop("count"), Some(PropValue::Int(0)));
        assert_eq!(el.prop("missing"), None);
    }

    #[test]
    fn test_registration_is_first_wins() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("count", PropValue::Int(1), false);
        // second declaration, different initial and mirroring - ignored
        el.register_reactive("count", PropValue::Int(9), true);

        assert_eq!(el.prop("count"), Some(PropValue::Int(1)));
        assert!(!dom.borrow().has_attribute(el.node(), "count"));

        // mirroring was not adopted from the losing declaration either
        el.set_prop("count", 2);
        assert!(!dom.borrow().has_attribute(el.node(), "count"));
    }

    #[test]
    fn test_mirror_writes_attribute_at_registration() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("count", PropValue::Int(7), true);
        assert_eq!(
            dom.borrow().attribute(el.node(), "count"),
            Some("7".to_string())
        );
    }

    #[test]
    fn test_equal_write_is_noop() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("count", PropValue::Int(0), true);
        dom.borrow_mut().remove_attribute_raw(el.node(), "count");

        // equal value: no attribute rewrite, no render
        el.set_prop("count", 0);
        assert!(!dom.borrow().has_attribute(el.node(), "count"));
        assert!(el.cached_render().is_none());
    }

    #[test]
    fn test_distinct_write_mirrors_and_renders() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("count", PropValue::Int(0), true);
        el.set_prop("count", 1);
        assert_eq!(el.prop("count"), Some(PropValue::Int(1)));
        assert_eq!(
            dom.borrow().attribute(el.node(), "count"),
            Some("1".to_string())
        );
        assert!(el.cached_render().is_some());
    }

    #[test]
    fn test_dash_name_registers_compact_key() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("user-name", PropValue::from("ada"), true);
        // attribute uses the dash form, property the compact form
        assert_eq!(
            dom.borrow().attribute(el.node(), "user-name"),
            Some("ada".to_string())
        );
        assert_eq!(el.prop("userName"), Some(PropValue::from("ada")));
        assert_eq!(el.prop("user-name"), Some(PropValue::from("ada")));
    }

    #[test]
    fn test_prop_signal_tracks_writes() {
        let (_dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("count", PropValue::Int(0), false);
        let sig = el.prop_signal("count").unwrap();
        el.set_prop("count", 5);
        assert_eq!(sig.get(), PropValue::Int(5));
    }
}
