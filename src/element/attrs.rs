//! Attribute-linked property registry.
//!
//! These properties have no internal value cell: the host node's
//! attribute list is the storage. Registration records an in-memory
//! snapshot of the attribute's value at that moment, and the setter
//! compares incoming writes against that snapshot - not the live
//! attribute. The upshot is that only writes equal to the original
//! snapshot value are suppressed; a redundant write of a later value
//! still triggers a render. This matches the source platform exactly and
//! is preserved for behavioral parity (see DESIGN.md for the correction
//! candidate).

use log::debug;

use super::{Element, compact, dashed};
use crate::types::PropValue;

impl Element {
    /// Register an attribute-linked property. No-op if `name` (compact
    /// form) is already claimed. A supplied default is written to the
    /// attribute only when the attribute is absent; an existing value is
    /// authoritative and the default is discarded.
    pub(crate) fn register_attr_linked(&mut self, name: &str, default: Option<PropValue>) {
        let key = compact(name);
        if self.claimed.contains(&key) {
            debug!("property '{key}' already registered, skipping attribute declaration");
            return;
        }
        self.claimed.insert(key.clone());

        let dash = dashed(name);
        let snapshot = {
            let mut dom = self.dom.borrow_mut();
            if !dom.has_attribute(self.node, &dash) {
                if let Some(default) = default {
                    dom.set_attribute_raw(self.node, &dash, &default.to_string());
                }
            }
            dom.attribute(self.node, &dash)
        };
        self.attr_snapshots.insert(key, snapshot);
    }

    /// Current attribute string of an attribute-linked property, or
    /// `None` when the attribute is absent (the unset sentinel) or no
    /// such property is registered. Never falls back to the registration
    /// default.
    pub fn attr_prop(&self, name: &str) -> Option<String> {
        let key = compact(name);
        if !self.attr_snapshots.contains_key(&key) {
            return None;
        }
        self.dom.borrow().attribute(self.node, &dashed(name))
    }

    /// Write an attribute-linked property: sets the attribute and
    /// triggers a render, unless the incoming value equals the snapshot
    /// taken at registration time (the documented suppression quirk).
    /// Writes to unregistered names are silently dropped.
    pub fn set_attr_prop(&mut self, name: &str, value: &str) {
        let key = compact(name);
        let Some(snapshot) = self.attr_snapshots.get(&key) else {
            debug!("set_attr_prop on unregistered property '{key}' ignored");
            return;
        };
        if snapshot.as_deref() == Some(value) {
            debug!("write of registration-time value to '{key}' suppressed");
            return;
        }
        self.dom
            .borrow_mut()
            .set_attribute_raw(self.node, &dashed(name), value);
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::super::{Component, Element, ElementHandle};
    use crate::dom::{Dom, DomHandle};
    use crate::types::PropValue;

    struct Inert;
    impl Component for Inert {}

    fn element() -> (DomHandle, ElementHandle) {
        let dom = Dom::new();
        let el = Element::create(&dom, "x-test", Rc::new(Inert));
        (dom, el)
    }

    #[test]
    fn test_default_creates_absent_attribute() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_attr_linked("kind", Some(PropValue::from("plain")));
        assert_eq!(
            dom.borrow().attribute(el.node(), "kind"),
            Some("plain".to_string())
        );
        assert_eq!(el.attr_prop("kind"), Some("plain".to_string()));
    }

    #[test]
    fn test_existing_attribute_beats_default() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        dom.borrow_mut()
            .set_attribute_raw(el.node(), "kind", "fancy");
        el.register_attr_linked("kind", Some(PropValue::from("plain")));
        assert_eq!(el.attr_prop("kind"), Some("fancy".to_string()));
    }

    #[test]
    fn test_no_default_leaves_attribute_unset() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_attr_linked("kind", None);
        assert!(!dom.borrow().has_attribute(el.node(), "kind"));
        assert_eq!(el.attr_prop("kind"), None);
    }

    #[test]
    fn test_unset_sentinel_after_external_removal() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_attr_linked("kind", Some(PropValue::from("plain")));
        dom.borrow_mut().remove_attribute_raw(el.node(), "kind");
        // never the original default once the attribute is gone
        assert_eq!(el.attr_prop("kind"), None);
    }

    #[test]
    fn test_snapshot_quirk() {
        let (dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_attr_linked("kind", Some(PropValue::from("plain")));

        // write of the registration-time value: suppressed, no render
        el.set_attr_prop("kind", "plain");
        assert!(el.cached_render().is_none());

        // distinct value: written + rendered
        el.set_attr_prop("kind", "fancy");
        assert_eq!(
            dom.borrow().attribute(el.node(), "kind"),
            Some("fancy".to_string())
        );
        assert!(el.cached_render().is_some());

        // redundant write of the *current* value is NOT suppressed: the
        // comparison is against the registration snapshot, not the live
        // attribute. Preserved quirk.
        let before = el.cached_render().map(str::to_string);
        el.set_attr_prop("kind", "fancy");
        assert_eq!(
            dom.borrow().attribute(el.node(), "kind"),
            Some("fancy".to_string())
        );
        // the render re-ran (it was only cache-suppressed at the DOM
        // level because the composed output is unchanged)
        assert_eq!(el.cached_render().map(str::to_string), before);

        // the original snapshot value still suppresses later on
        el.set_attr_prop("kind", "plain");
        assert_eq!(
            dom.borrow().attribute(el.node(), "kind"),
            Some("fancy".to_string())
        );
    }

    #[test]
    fn test_first_registration_wins_across_registries() {
        let (_dom, el) = element();
        let mut el = el.borrow_mut();
        el.register_reactive("kind", PropValue::from("reactive"), false);
        el.register_attr_linked("kind", Some(PropValue::from("attr")));

        // the reactive registry owns the name; the attribute registry
        // declaration was a no-op
        assert_eq!(el.prop("kind"), Some(PropValue::from("reactive")));
        assert_eq!(el.attr_prop("kind"), None);
    }
}
