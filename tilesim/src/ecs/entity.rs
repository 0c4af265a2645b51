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
//! Entity handles
//!
//! An entity is a lightweight generational handle. It owns no simulation
//! state itself; the engine keeps, per entity, one [`ComponentRef`] for each
//! component kind attached to it, pointing into the system that stores the
//! component.

use crate::ecs::ComponentId;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

/// Entity handle with generational index support for safe references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u64,
    generation: u32,
}

impl Entity {
    /// Create an entity handle from its index and generation
    pub fn new(index: u64, generation: u32) -> Self {
        Entity { index, generation }
    }

    /// Slot index of this entity
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, gen: {})", self.index, self.generation)
    }
}

/// Where an attached component lives
///
/// `system` is the engine slot of the exact system instance the component
/// registered with, so the reference stays valid even if a different
/// instance is later attached under the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub(crate) system: usize,
    pub(crate) id: ComponentId,
}

impl ComponentRef {
    /// Identifier of the component inside its system
    pub fn id(&self) -> ComponentId {
        self.id
    }
}

/// Component table of a single entity: at most one component per kind
#[derive(Debug, Default)]
pub struct EntityRecord {
    components: HashMap<TypeId, ComponentRef>,
}

impl EntityRecord {
    /// Record a component, returning the one it replaces
    pub(crate) fn insert(&mut self, kind: TypeId, component: ComponentRef) -> Option<ComponentRef> {
        self.components.insert(kind, component)
    }

    pub(crate) fn remove(&mut self, kind: TypeId) -> Option<ComponentRef> {
        self.components.remove(&kind)
    }

    /// Look up the component of a kind
    pub fn get(&self, kind: TypeId) -> Option<ComponentRef> {
        self.components.get(&kind).copied()
    }

    /// Whether a component of this kind is attached
    pub fn contains(&self, kind: TypeId) -> bool {
        self.components.contains_key(&kind)
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether nothing is attached
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = ComponentRef> + '_ {
        self.components.drain().map(|(_, component)| component)
    }
}
