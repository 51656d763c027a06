//! Component registry - tag names to component factories.
//!
//! Definitions map a custom tag name to a factory producing fresh
//! component instances. Names are normalized to their dash-delimited
//! form, so `"MyButton"`, `"myButton"` and `"my-button"` all address the
//! same definition. The first definition of a name wins; later attempts
//! are dropped with a warning.
//!
//! # Example
//!
//! ```ignore
//! use umbra::{Registry, mount};
//!
//! let mut registry = Registry::new();
//! registry.define("x-counter", || Rc::new(Counter));
//!
//! let el = mount::create(&dom, &registry, "x-counter");
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use heck::ToKebabCase;
use log::warn;

use crate::element::Component;

/// Produces one fresh component instance per element.
pub type ComponentFactory = Box<dyn Fn() -> Rc<dyn Component>>;

/// Normalized tag form used as the registry key: `MyButton` → `my-button`.
pub fn tag_name(name: &str) -> String {
    name.to_kebab_case()
}

/// Tag-to-factory map for custom element definitions.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, ComponentFactory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a component under `tag`. A tag already defined keeps its
    /// original factory; the new one is dropped.
    pub fn define<F, C>(&mut self, tag: &str, factory: F)
    where
        F: Fn() -> Rc<C> + 'static,
        C: Component + 'static,
    {
        let key = tag_name(tag);
        if self.factories.contains_key(&key) {
            warn!("tag '{key}' already defined, keeping the original definition");
            return;
        }
        self.factories.insert(
            key,
            Box::new(move || {
                let component: Rc<dyn Component> = factory();
                component
            }),
        );
    }

    /// Define several components at once.
    pub fn define_all<I, F, C>(&mut self, defs: I)
    where
        I: IntoIterator<Item = (&'static str, F)>,
        F: Fn() -> Rc<C> + 'static,
        C: Component + 'static,
    {
        for (tag, factory) in defs {
            self.define(tag, factory);
        }
    }

    /// Whether `tag` (any name form) has a definition.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(&tag_name(tag))
    }

    /// Produce a fresh component instance for `tag`, or `None` when the
    /// tag is undefined.
    pub fn instantiate(&self, tag: &str) -> Option<Rc<dyn Component>> {
        self.factories.get(&tag_name(tag)).map(|factory| factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Component, ReactiveDecl};

    struct A;
    impl Component for A {}

    struct B;
    impl Component for B {
        fn reactive(&self) -> Vec<ReactiveDecl> {
            vec![ReactiveDecl::new("marker", 1)]
        }
    }

    #[test]
    fn test_define_and_instantiate() {
        let mut registry = Registry::new();
        registry.define("x-a", || Rc::new(A));

        assert!(registry.contains("x-a"));
        assert!(registry.instantiate("x-a").is_some());
        assert!(registry.instantiate("x-b").is_none());
    }

    #[test]
    fn test_name_forms_collapse() {
        let mut registry = Registry::new();
        registry.define("MyButton", || Rc::new(A));

        assert!(registry.contains("my-button"));
        assert!(registry.contains("myButton"));
        assert!(registry.instantiate("my-button").is_some());
    }

    #[test]
    fn test_first_definition_wins() {
        let mut registry = Registry::new();
        registry.define("x-a", || Rc::new(A));
        registry.define("x-a", || Rc::new(B));

        // the original (declaration-free) factory is still in place
        let component = registry.instantiate("x-a").unwrap();
        assert!(component.reactive().is_empty());
    }

    #[test]
    fn test_define_all() {
        fn make() -> Rc<A> {
            Rc::new(A)
        }

        let mut registry = Registry::new();
        registry.define_all([("x-a", make as fn() -> Rc<A>), ("x-b", make)]);
        assert!(registry.contains("x-a"));
        assert!(registry.contains("x-b"));
    }
}
