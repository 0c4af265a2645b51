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
//! Bodies and their per-kind update policy
//!
//! Every body carries the same kinematic state; what differs between kinds is
//! how a fixed tick advances it:
//!
//! - [`BodyKind::Fixed`]: never moves.
//! - [`BodyKind::Dynamic`]: drag and the accumulated force are integrated into
//!   velocity, then position advances one axis at a time against the tile grid.
//! - [`BodyKind::Kinetic`]: moved by scripts through [`Body::set_position`];
//!   the physics tick leaves it alone.
//!
//! Collisions between bodies are resolved separately, see
//! [`collision`](crate::physics::collision).

use crate::ecs::Entity;
use crate::math::Vector;
use crate::physics::Level;

/// Linear drag applied to dynamic bodies, per axis. Negative so that it
/// opposes velocity.
pub const DRAG_COEFFICIENT: Vector = Vector::splat(-10.0);

/// Update policy of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Immovable
    Fixed,
    /// Force-driven, collides with solid tiles
    Dynamic,
    /// Script-driven, ignores forces and tiles
    Kinetic,
}

/// Kinematic state of a simulated body
///
/// Construct with [`Body::fixed`], [`Body::dynamic`] or [`Body::kinetic`] and
/// hand it to [`Physics::insert`](crate::physics::Physics::insert) (or attach
/// it to an entity through the engine), which validates it against the level.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    kind: BodyKind,
    owner: Option<Entity>,
    position: Vector,
    velocity: Vector,
    force: Vector,
    radius: f64,
    mass: f64,
}

impl Body {
    /// Create a body at rest
    pub fn new(kind: BodyKind, position: impl Into<Vector>, radius: f64, mass: f64) -> Self {
        Body {
            kind,
            owner: None,
            position: position.into(),
            velocity: Vector::ZERO,
            force: Vector::ZERO,
            radius,
            mass,
        }
    }

    /// Create an immovable body
    pub fn fixed(position: impl Into<Vector>, radius: f64, mass: f64) -> Self {
        Body::new(BodyKind::Fixed, position, radius, mass)
    }

    /// Create a force-driven body
    pub fn dynamic(position: impl Into<Vector>, radius: f64, mass: f64) -> Self {
        Body::new(BodyKind::Dynamic, position, radius, mass)
    }

    /// Create a script-driven body
    pub fn kinetic(position: impl Into<Vector>, radius: f64, mass: f64) -> Self {
        Body::new(BodyKind::Kinetic, position, radius, mass)
    }

    /// Start the body with an initial velocity
    pub fn with_velocity(mut self, velocity: impl Into<Vector>) -> Self {
        self.velocity = velocity.into();
        self
    }

    /// Update policy
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Entity this body is attached to, if it was attached through the engine
    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Entity) {
        self.owner = Some(owner);
    }

    /// Current position
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// External force applied on every tick until replaced
    pub fn force(&self) -> Vector {
        self.force
    }

    /// Collision diameter; two bodies touch at half the sum of their radii
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Replace the external force
    ///
    /// Physics never clears the force; whoever drives the body is expected
    /// to set it every tick (zero included).
    pub fn set_force(&mut self, force: impl Into<Vector>) {
        self.force = force.into();
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: impl Into<Vector>) {
        self.velocity = velocity.into();
    }

    /// Teleport the body; intended for kinetic bodies
    ///
    /// The target is not checked against the level.
    pub fn set_position(&mut self, position: impl Into<Vector>) {
        self.position = position.into();
    }

    pub(crate) fn velocity_mut(&mut self) -> &mut Vector {
        &mut self.velocity
    }
}

/// Advance one body by a fixed tick
///
/// `delta` is the tick length broadcast to both axes.
pub fn integrate(body: &mut Body, level: &Level, delta: Vector) {
    match body.kind {
        BodyKind::Fixed | BodyKind::Kinetic => {}
        BodyKind::Dynamic => integrate_dynamic(body, level, delta),
    }
}

fn integrate_dynamic(body: &mut Body, level: &Level, delta: Vector) {
    let forces = DRAG_COEFFICIENT * body.velocity + body.force;
    let acceleration = forces / body.mass;
    body.velocity += acceleration * delta;

    if body.velocity == Vector::ZERO {
        return;
    }

    let next = body.position + body.velocity * delta;
    // Each axis is tested with the other axis held at its current value, so a
    // body pressed against a wall keeps sliding along it.
    let horizontal = level.is_passable(next.x, body.position.y);
    let vertical = level.is_passable(body.position.x, next.y);
    if horizontal {
        body.position.x = next.x;
    }
    if vertical {
        body.position.y = next.y;
    }
}
