//! Mount API - element creation and document placement.
//!
//! Thin entry points tying the registry, the document and the element
//! lifecycle together: `create` instantiates a defined component,
//! `attach`/`detach` move the host in and out of the document tree and
//! run the matching lifecycle hook, `adopt` signals a document move.
//!
//! # Example
//!
//! ```ignore
//! use umbra::{Dom, Registry, mount};
//!
//! let dom = Dom::new();
//! let el = mount::create(&dom, &registry, "x-counter")?;
//! mount::attach(&dom, &el);
//! // ... later
//! mount::detach(&dom, &el);
//! ```

use log::debug;

use crate::dom::DomHandle;
use crate::element::{Element, ElementHandle};
use crate::registry::Registry;

/// Instantiate a defined component as a detached element. Returns `None`
/// (with a log line) when the tag has no definition. No lifecycle hook
/// runs yet.
pub fn create(dom: &DomHandle, registry: &Registry, tag: &str) -> Option<ElementHandle> {
    let Some(component) = registry.instantiate(tag) else {
        debug!("no definition for tag '{tag}'");
        return None;
    };
    Some(Element::create(dom, tag, component))
}

/// Append the element's host under the document root and run the
/// connect hook.
pub fn attach(dom: &DomHandle, el: &ElementHandle) {
    let (document, node) = {
        let dom = dom.borrow();
        (dom.document(), el.borrow().node())
    };
    dom.borrow_mut().append_child(document, node);
    el.borrow_mut().connected();
}

/// Remove the element's host from the tree and run the disconnect hook.
pub fn detach(dom: &DomHandle, el: &ElementHandle) {
    let node = el.borrow().node();
    dom.borrow_mut().detach(node);
    el.borrow_mut().disconnected();
}

/// Signal that the element moved into another document context.
pub fn adopt(el: &ElementHandle) {
    el.borrow_mut().adopted();
}
