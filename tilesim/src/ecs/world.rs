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
//! Entity table
//!
//! The world tracks which entities are alive and which components each of
//! them has. Component data itself is owned by the systems.

use crate::ecs::entity::{ComponentRef, EntityRecord};
use crate::ecs::Entity;
use std::any::TypeId;
use std::collections::HashMap;

/// Registry of live entities and their component tables
#[derive(Debug, Default)]
pub struct World {
    next_entity_index: u64,
    entity_generations: Vec<u32>,
    free_indices: Vec<u64>,
    records: HashMap<Entity, EntityRecord>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World::default()
    }

    /// Create a new entity with no components
    ///
    /// Indices freed by [`destroy_entity`](World::destroy_entity) are reused
    /// (most recently freed first) under their bumped generation.
    pub fn create_entity(&mut self) -> Entity {
        let index = match self.free_indices.pop() {
            Some(index) => index,
            None => {
                let index = self.next_entity_index;
                self.next_entity_index += 1;
                self.entity_generations.push(0);
                index
            }
        };

        let entity = Entity::new(index, self.entity_generations[index as usize]);
        self.records.insert(entity, EntityRecord::default());
        entity
    }

    /// Destroy an entity, returning its component table
    ///
    /// The generation counter is bumped so stale handles stop matching.
    pub fn destroy_entity(&mut self, entity: Entity) -> Option<EntityRecord> {
        let record = self.records.remove(&entity)?;
        if let Some(generation) = self.entity_generations.get_mut(entity.index() as usize) {
            *generation = generation.wrapping_add(1);
        }
        self.free_indices.push(entity.index());
        Some(record)
    }

    /// Check if an entity is alive
    pub fn is_entity_alive(&self, entity: Entity) -> bool {
        self.records.contains_key(&entity)
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.records.len()
    }

    /// Get an iterator over all alive entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.records.keys()
    }

    /// Component table of an entity
    pub fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        self.records.get(&entity)
    }

    pub(crate) fn record_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        self.records.get_mut(&entity)
    }

    /// Where the component of type `C` attached to `entity` lives
    pub fn component_ref<C: 'static>(&self, entity: Entity) -> Option<ComponentRef> {
        self.records.get(&entity)?.get(TypeId::of::<C>())
    }

    /// Whether `entity` has a component of type `C`
    pub fn has<C: 'static>(&self, entity: Entity) -> bool {
        self.records
            .get(&entity)
            .is_some_and(|record| record.contains(TypeId::of::<C>()))
    }
}
