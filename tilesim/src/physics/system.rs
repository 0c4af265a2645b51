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
//! The physics system
//!
//! [`Physics`] owns the level and every body registered with it. It runs on
//! the fixed loop: each tick first integrates all bodies in registration
//! order, then resolves collisions between every pair of them.

use crate::config::LevelConfig;
use crate::ecs::{Component, ComponentId, Entity, System, SystemKind};
use crate::error::{BodyError, EngineError};
use crate::math::Vector;
use crate::physics::{collision, integrate, Body, BodySet, Level};
use std::any::Any;

/// Fixed-loop system integrating bodies on a tile grid
pub struct Physics {
    level: Level,
    bodies: BodySet,
    ticks: u64,
}

impl Physics {
    /// Create a physics system over a freshly generated `width x height` level
    pub fn new(width: usize, height: usize) -> Self {
        Physics::with_level(Level::generate(width, height))
    }

    /// Create a physics system over a level generated from `config`
    pub fn from_config(config: &LevelConfig) -> Self {
        Physics::with_level(Level::from_config(config))
    }

    /// Create a physics system over an existing level
    pub fn with_level(level: Level) -> Self {
        Physics {
            level,
            bodies: BodySet::new(),
            ticks: 0,
        }
    }

    /// The level bodies move on
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// All registered bodies
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no bodies are registered
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of fixed ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Validate a body and register it
    ///
    /// The spawn tile is checked first, then the radius, then the mass.
    /// Nothing is registered when validation fails.
    pub fn insert(&mut self, body: Body) -> Result<ComponentId, BodyError> {
        let position = body.position();
        if self.level.tile_at(position).is_none() {
            return Err(BodyError::NoTile {
                x: position.x,
                y: position.y,
            });
        }
        if !(body.radius() > 0.0 && body.radius().is_finite()) {
            return Err(BodyError::InvalidRadius(body.radius()));
        }
        if !(body.mass() > 0.0 && body.mass().is_finite()) {
            return Err(BodyError::InvalidMass(body.mass()));
        }

        let kind = body.kind();
        let id = self.bodies.insert(body);
        log::debug!("Registered {:?} body {:?} at {}", kind, id, position);
        Ok(id)
    }

    /// Remove a body, leaving its slot tombstoned
    pub fn remove(&mut self, id: ComponentId) -> Option<Body> {
        let body = self.bodies.remove(id)?;
        log::debug!("Removed body {:?}", id);
        Some(body)
    }

    /// Get a body
    pub fn body(&self, id: ComponentId) -> Option<&Body> {
        self.bodies.get(id)
    }

    /// Get a body mutably
    pub fn body_mut(&mut self, id: ComponentId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    /// Replace the external force on a body, returning false if it is gone
    pub fn set_force(&mut self, id: ComponentId, force: impl Into<Vector>) -> bool {
        match self.bodies.get_mut(id) {
            Some(body) => {
                body.set_force(force);
                true
            }
            None => false,
        }
    }

    /// Advance the simulation by one fixed tick of `delta` seconds
    ///
    /// Returns the number of collision impulses applied.
    pub fn step(&mut self, delta: f64) -> usize {
        let delta = Vector::splat(delta);
        for (_, body) in self.bodies.iter_mut() {
            integrate(body, &self.level, delta);
        }
        self.ticks += 1;
        collision::collide_all(&mut self.bodies)
    }
}

impl System for Physics {
    fn kind(&self) -> SystemKind {
        SystemKind::Physics
    }

    fn update_loop(&self) -> &str {
        "fixed"
    }

    fn update(&mut self, delta: f64) {
        self.step(delta);
    }

    fn detach(&mut self, id: ComponentId) -> bool {
        self.remove(id).is_some()
    }

    fn name(&self) -> &str {
        "Physics"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Component for Body {
    const SYSTEM: SystemKind = SystemKind::Physics;
    type System = Physics;

    fn register(mut self, owner: Entity, system: &mut Physics) -> Result<ComponentId, EngineError> {
        self.set_owner(owner);
        Ok(system.insert(self)?)
    }

    fn fetch(system: &Physics, id: ComponentId) -> Option<&Self> {
        system.body(id)
    }

    fn fetch_mut(system: &mut Physics, id: ComponentId) -> Option<&mut Self> {
        system.body_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn open_physics() -> Physics {
        Physics::with_level(Level::from_fn(10, 10, |_, _| 0.5))
    }

    #[test]
    fn test_generated_level_size() {
        let physics = Physics::new(12, 8);
        assert_eq!(physics.level().size(), (12, 8));
        assert!(physics.is_empty());
    }

    #[test]
    fn test_insert_rejects_position_without_tile() {
        let mut physics = open_physics();
        let err = physics.insert(Body::dynamic((-3.0, 2.0), 0.5, 1.0)).unwrap_err();
        assert_eq!(err, BodyError::NoTile { x: -3.0, y: 2.0 });
        assert!(physics.is_empty());
    }

    #[test]
    fn test_insert_rejects_bad_radius_and_mass() {
        let mut physics = open_physics();
        assert_eq!(
            physics.insert(Body::dynamic((1.0, 1.0), 0.0, 1.0)),
            Err(BodyError::InvalidRadius(0.0))
        );
        assert_eq!(
            physics.insert(Body::dynamic((1.0, 1.0), 0.5, -2.0)),
            Err(BodyError::InvalidMass(-2.0))
        );
        assert!(matches!(
            physics.insert(Body::dynamic((1.0, 1.0), f64::NAN, 1.0)),
            Err(BodyError::InvalidRadius(_))
        ));
        assert_eq!(physics.bodies().slot_count(), 0);
    }

    #[test]
    fn test_missing_tile_is_reported_before_bad_shape() {
        let mut physics = open_physics();
        assert_eq!(
            physics.insert(Body::dynamic((20.0, 1.0), 0.0, -1.0)),
            Err(BodyError::NoTile { x: 20.0, y: 1.0 })
        );
        assert_eq!(
            physics.insert(Body::dynamic((1.0, 1.0), -1.0, -1.0)),
            Err(BodyError::InvalidRadius(-1.0))
        );
        assert_eq!(physics.bodies().slot_count(), 0);
    }

    #[test]
    fn test_solid_spawn_tile_is_allowed() {
        let mut physics = Physics::with_level(Level::from_fn(3, 3, |_, _| 1.0));
        assert!(physics.insert(Body::fixed((1.0, 1.0), 0.5, 1.0)).is_ok());
    }

    #[test]
    fn test_step_integrates_then_collides() {
        let mut physics = open_physics();
        let a = physics
            .insert(Body::dynamic((2.0, 2.0), 0.5, 1.0).with_velocity((1.0, 0.0)))
            .unwrap();
        let b = physics.insert(Body::dynamic((2.3, 2.0), 0.5, 1.0)).unwrap();

        let impulses = physics.step(1.0 / 60.0);
        assert_eq!(impulses, 1);
        assert_eq!(physics.ticks(), 1);

        // Integration slowed `a` before the equal-mass exchange
        let slowed = 1.0 - 10.0 / 60.0;
        assert_relative_eq!(physics.body(a).unwrap().velocity().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(physics.body(b).unwrap().velocity().x, slowed, epsilon = 1e-12);
    }

    #[test]
    fn test_removed_body_no_longer_simulated() {
        let mut physics = open_physics();
        let a = physics
            .insert(Body::dynamic((2.0, 2.0), 0.5, 1.0).with_velocity((1.0, 0.0)))
            .unwrap();
        let b = physics.insert(Body::dynamic((2.3, 2.0), 0.5, 1.0)).unwrap();

        assert!(physics.remove(b).is_some());
        assert_eq!(physics.step(1.0 / 60.0), 0);
        assert!(physics.body(b).is_none());
        assert!(physics.body(a).unwrap().velocity().x > 0.0);
        assert!(!physics.set_force(b, (1.0, 0.0)));
    }

    #[test]
    fn test_set_force_drives_body() {
        let mut physics = open_physics();
        let a = physics.insert(Body::dynamic((5.0, 5.0), 0.5, 1.0)).unwrap();
        assert!(physics.set_force(a, (40.0, 0.0)));
        for _ in 0..10 {
            physics.step(1.0 / 60.0);
        }
        let body = physics.body(a).unwrap();
        assert!(body.position().x > 5.0);
        assert_eq!(body.position().y, 5.0);
    }

    #[test]
    fn test_declares_fixed_loop() {
        let physics = open_physics();
        assert_eq!(physics.update_loop(), "fixed");
        assert_eq!(physics.kind(), SystemKind::Physics);
    }
}
