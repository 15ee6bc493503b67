//! Z-order and active-window tracking.
//!
//! `order` runs from least to most recently focused; focusing pushes to the end. Stacking values
//! come from a counter that only grows, so the active window always holds the highest value and
//! values are never handed out twice in a session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{model::WindowId, window_registry::WindowRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusStack {
    order: Vec<WindowId>,
    active: Option<WindowId>,
    z_counter: u32,
    z_indices: BTreeMap<WindowId, u32>,
}

impl Default for FocusStack {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FocusStack {
    pub fn new(z_index_base: u32) -> Self {
        Self {
            order: Vec::new(),
            active: None,
            z_counter: z_index_base,
            z_indices: BTreeMap::new(),
        }
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn is_active(&self, id: WindowId) -> bool {
        self.active == Some(id)
    }

    /// Focuses and raises `id`, returning the stacking value it was given.
    ///
    /// Returns `None` without changing anything when `id` is not registered or is minimized.
    pub fn set_active(&mut self, registry: &WindowRegistry, id: WindowId) -> Option<u32> {
        if !registry.is_visible(id) {
            return None;
        }
        if let Some(index) = self.order.iter().position(|entry| *entry == id) {
            self.order.remove(index);
        }
        self.order.push(id);
        self.active = Some(id);
        self.z_counter = self.z_counter.saturating_add(1);
        self.z_indices.insert(id, self.z_counter);
        Some(self.z_counter)
    }

    /// Clears the active mark from `id` (if it holds it) and re-derives the active window.
    ///
    /// Call after the registry reflects the window being minimized or removed. Returns the newly
    /// activated window and its stacking value, if one was found.
    pub fn remove_active(
        &mut self,
        registry: &WindowRegistry,
        id: WindowId,
    ) -> Option<(WindowId, u32)> {
        if self.active != Some(id) {
            return None;
        }
        self.active = None;
        self.rederive_active(registry)
    }

    /// Drops `id` from the stack entirely. Returns whether it was the active window.
    pub fn forget(&mut self, id: WindowId) -> bool {
        self.order.retain(|entry| *entry != id);
        self.z_indices.remove(&id);
        if self.active == Some(id) {
            self.active = None;
            return true;
        }
        false
    }

    /// Clears the active window without touching stacking order.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Activates the most recently focused visible window, or clears focus when none remain.
    pub fn rederive_active(&mut self, registry: &WindowRegistry) -> Option<(WindowId, u32)> {
        let candidate = self.most_recent_first().find(|id| registry.is_visible(*id));
        match candidate {
            Some(id) => self.set_active(registry, id).map(|z| (id, z)),
            None => {
                self.active = None;
                None
            }
        }
    }

    /// Ids from least to most recently focused.
    pub fn topological_order(&self) -> &[WindowId] {
        &self.order
    }

    pub fn most_recent_first(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.order.iter().rev().copied()
    }

    pub fn z_index(&self, id: WindowId) -> Option<u32> {
        self.z_indices.get(&id).copied()
    }
}
