// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Body storage with stable indices
//!
//! Bodies live in a slot vector in registration order. Removing a body
//! leaves a tombstone behind instead of shifting the remaining slots, so
//! identifiers handed out earlier stay valid and iteration order (which is
//! also integration order) never changes. Slots are not reused.

use crate::ecs::ComponentId;
use crate::physics::Body;

/// Slot arena of bodies
#[derive(Debug, Default)]
pub struct BodySet {
    slots: Vec<Option<Body>>,
    live: usize,
}

impl BodySet {
    /// Create an empty set
    pub fn new() -> Self {
        BodySet::default()
    }

    /// Create an empty set with room for `capacity` bodies
    pub fn with_capacity(capacity: usize) -> Self {
        BodySet {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Append a body and return its identifier
    pub fn insert(&mut self, body: Body) -> ComponentId {
        let id = ComponentId::new(self.slots.len());
        self.slots.push(Some(body));
        self.live += 1;
        id
    }

    /// Tombstone a body, returning it if it was live
    pub fn remove(&mut self, id: ComponentId) -> Option<Body> {
        let body = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(body)
    }

    /// Get a live body
    pub fn get(&self, id: ComponentId) -> Option<&Body> {
        self.slots.get(id.index())?.as_ref()
    }

    /// Get a live body mutably
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Body> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    /// Whether `id` refers to a live body
    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether there are no live bodies
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots, tombstones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over live bodies in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Body)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|body| (ComponentId::new(i), body)))
    }

    /// Iterate mutably over live bodies in registration order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ComponentId, &mut Body)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|body| (ComponentId::new(i), body)))
    }

    /// Borrow two distinct live bodies mutably at once
    ///
    /// Returns `None` if `first == second` or either slot is a tombstone.
    pub fn pair_mut(
        &mut self,
        first: ComponentId,
        second: ComponentId,
    ) -> Option<(&mut Body, &mut Body)> {
        let (i, j) = (first.index(), second.index());
        if i == j || i >= self.slots.len() || j >= self.slots.len() {
            return None;
        }
        let (low, high) = (i.min(j), i.max(j));
        let (head, tail) = self.slots.split_at_mut(high);
        let low_body = head[low].as_mut()?;
        let high_body = tail[0].as_mut()?;
        if i < j {
            Some((low_body, high_body))
        } else {
            Some((high_body, low_body))
        }
    }

    /// Identifiers of all live bodies in registration order
    pub fn ids(&self) -> Vec<ComponentId> {
        self.iter().map(|(id, _)| id).collect()
    }
}
