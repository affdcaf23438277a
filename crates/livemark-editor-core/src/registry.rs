//! Component registry seen from the decoration engine.
//!
//! The embedding application registers its MDX components at startup. The
//! engine only needs to know which capitalised tag names are registered;
//! how a component is drawn is the renderer's business.

use std::collections::{BTreeSet, HashSet};

use smol_str::SmolStr;

/// Answers whether a component name is registered.
pub trait ComponentRegistry {
    fn is_known(&self, name: &str) -> bool;
}

/// Unit type implementation - nothing is registered.
impl ComponentRegistry for () {
    fn is_known(&self, _name: &str) -> bool {
        false
    }
}

impl ComponentRegistry for [&str] {
    fn is_known(&self, name: &str) -> bool {
        self.iter().any(|known| *known == name)
    }
}

impl ComponentRegistry for [SmolStr] {
    fn is_known(&self, name: &str) -> bool {
        self.iter().any(|known| known == name)
    }
}

impl ComponentRegistry for Vec<SmolStr> {
    fn is_known(&self, name: &str) -> bool {
        self.as_slice().is_known(name)
    }
}

impl ComponentRegistry for HashSet<SmolStr> {
    fn is_known(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ComponentRegistry for BTreeSet<SmolStr> {
    fn is_known(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T: ComponentRegistry + ?Sized> ComponentRegistry for &T {
    fn is_known(&self, name: &str) -> bool {
        (**self).is_known(name)
    }
}

impl<T: ComponentRegistry> ComponentRegistry for Option<T> {
    fn is_known(&self, name: &str) -> bool {
        self.as_ref().is_some_and(|registry| registry.is_known(name))
    }
}
