//! Registry of active bindings, keyed by control
//!
//! Lives on the UI/event path only. The shared handle is
//! `Rc<RefCell<BindingRegistry>>`, which is `!Send`, so the registry cannot be
//! moved onto the render thread by accident.

use crate::binding::ParameterBinding;
use faderlink_core::ControlId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Registry shared between the view and its input adapter
pub type SharedRegistry = Rc<RefCell<BindingRegistry>>;

/// At most one binding per [`ControlId`]
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: HashMap<ControlId, ParameterBinding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a new registry in the shared handle
    pub fn shared() -> SharedRegistry {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Insert a binding, replacing any previous binding for the same control
    pub fn add(&mut self, binding: ParameterBinding) {
        let id = binding.control_id();
        if self.bindings.insert(id, binding).is_some() {
            log::debug!("registry: Replaced binding for control {}", id);
        }
    }

    pub fn find(&self, id: ControlId) -> Option<&ParameterBinding> {
        self.bindings.get(&id)
    }

    pub fn remove(&mut self, id: ControlId) -> Option<ParameterBinding> {
        self.bindings.remove(&id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.bindings.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Registered control ids, in no particular order
    pub fn control_ids(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.bindings.keys().copied()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn constant(id: u32, value: f32) -> ParameterBinding {
        ParameterBinding::direct(ControlId(id), move || value, |_| {})
    }

    #[test]
    fn test_find_absent_returns_none() {
        let registry = BindingRegistry::new();
        assert!(registry.find(ControlId(9999)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_replaces_existing_binding() {
        let mut registry = BindingRegistry::new();
        registry.add(constant(1, 0.1));
        registry.add(constant(1, 0.9));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find(ControlId(1)).map(|b| b.get()), Some(0.9));
    }

    #[test]
    fn test_found_binding_writes_through() {
        let value = Rc::new(Cell::new(0.0_f32));
        let sink = value.clone();
        let mut registry = BindingRegistry::new();
        registry.add(ParameterBinding::direct(ControlId(5), || 0.0, move |v| sink.set(v)));

        if let Some(binding) = registry.find(ControlId(5)) {
            binding.set(0.75);
        }
        assert_eq!(value.get(), 0.75);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = BindingRegistry::new();
        registry.add(constant(1, 0.0));
        registry.add(constant(2, 0.0));
        registry.add(constant(3, 0.0));

        assert!(registry.remove(ControlId(2)).is_some());
        assert!(!registry.contains(ControlId(2)));

        let mut ids: Vec<_> = registry.control_ids().collect();
        ids.sort();
        assert_eq!(ids, [ControlId(1), ControlId(3)]);

        registry.clear();
        assert!(registry.is_empty());
    }
}
