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
//! Components
//!
//! A component is a piece of per-entity state owned by exactly one system.
//! Each component type names the system kind it needs; attaching it through
//! the engine resolves that kind in the registry and hands the component to
//! the system, which stores it and returns a [`ComponentId`].

use crate::ecs::{Entity, System, SystemKind};
use crate::error::EngineError;
use std::fmt;

/// Identifier of a component inside the system that stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Create an identifier from a raw slot index
    pub fn new(index: usize) -> Self {
        ComponentId(index)
    }

    /// The raw slot index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Trait that all components must implement
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use tilesim::ecs::{Component, ComponentId, Engine, Entity, System, SystemKind};
/// use tilesim::EngineError;
///
/// #[derive(Default)]
/// struct Scores {
///     values: Vec<u32>,
/// }
///
/// impl System for Scores {
///     fn kind(&self) -> SystemKind { SystemKind::Custom("scores") }
///     fn update_loop(&self) -> &str { "variable" }
///     fn update(&mut self, _delta: f64) {}
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
///
/// struct Score(u32);
///
/// impl Component for Score {
///     const SYSTEM: SystemKind = SystemKind::Custom("scores");
///     type System = Scores;
///
///     fn register(self, _owner: Entity, system: &mut Scores) -> Result<ComponentId, EngineError> {
///         system.values.push(self.0);
///         Ok(ComponentId::new(system.values.len() - 1))
///     }
///
///     fn fetch(_system: &Scores, _id: ComponentId) -> Option<&Self> { None }
///     fn fetch_mut(_system: &mut Scores, _id: ComponentId) -> Option<&mut Self> { None }
/// }
///
/// let mut engine = Engine::default();
/// engine.attach(Scores::default()).unwrap();
/// let player = engine.create_entity();
/// engine.attach_component(player, Score(10)).unwrap();
/// assert!(engine.has::<Score>(player));
/// ```
pub trait Component: Sized + 'static {
    /// Registry kind of the system that stores this component
    const SYSTEM: SystemKind;

    /// Concrete type of that system
    type System: System;

    /// Move the component into its system
    ///
    /// Implementations validate the component first and must leave the
    /// system untouched when they return an error.
    fn register(self, owner: Entity, system: &mut Self::System) -> Result<ComponentId, EngineError>;

    /// Borrow a stored component
    fn fetch(system: &Self::System, id: ComponentId) -> Option<&Self>;

    /// Borrow a stored component mutably
    fn fetch_mut(system: &mut Self::System, id: ComponentId) -> Option<&mut Self>;
}
