//! Template renderer.
//!
//! Composes the component's style and markup output into one string and
//! writes it into the shadow root, gated by exact string identity against
//! the previous composed output. A cache hit does nothing at all: no
//! listener churn, no DOM write. A miss runs the fixed sequence
//! detach-bindings → replace-content → reattach-bindings.

use log::trace;

use super::Element;

impl Element {
    /// Run one render pass. Returns whether the shadow content was
    /// actually replaced.
    pub(crate) fn render(&mut self) -> bool {
        let composed = self.compose();
        if self.cached_render.as_deref() == Some(composed.as_str()) {
            trace!("render unchanged, skipping replacement");
            return false;
        }

        self.detach_bindings();
        self.dom.borrow_mut().set_markup(self.shadow, &composed);
        self.cached_render = Some(composed);
        self.attach_bindings();
        true
    }

    /// Forced re-render entry point. This does NOT bypass the cache
    /// comparison: textually identical composed output never rebuilds
    /// the shadow content, even when forced.
    pub fn rerender(&mut self) {
        self.render();
    }

    fn compose(&self) -> String {
        let component = self.component.clone();
        let mut out = String::new();
        if let Some(css) = component.styles(self) {
            if !css.is_empty() {
                out.push_str("<style>");
                out.push_str(&css);
                out.push_str("</style>");
            }
        }
        match component.template(self) {
            Some(markup) => out.push_str(&markup),
            None => out.push_str("<slot></slot>"),
        }
        out
    }
}
