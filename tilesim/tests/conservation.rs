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
//! Conservation properties of the collision response

use approx::assert_relative_eq;
use tilesim::physics::collision::{collide_all, resolve_pair, total_kinetic_energy, total_momentum};
use tilesim::physics::{Body, BodySet, Level, Physics};
use tilesim::Vector;

/// Pseudo-random but reproducible velocities
fn velocity(seed: usize) -> (f64, f64) {
    let a = (seed as f64 * 12.9898).sin() * 43758.5453;
    let b = (seed as f64 * 78.233).sin() * 12345.6789;
    (a.fract() * 4.0 - 2.0, b.fract() * 4.0 - 2.0)
}

#[test]
fn test_equal_masses_exchange_normal_components() {
    let mut a = Body::kinetic((0.0, 0.0), 1.0, 3.0).with_velocity((2.0, 1.0));
    let mut b = Body::kinetic((0.3, 0.0), 1.0, 3.0).with_velocity((-1.0, -0.5));

    assert!(resolve_pair(&mut a, &mut b));

    // Normal is along x; tangential components are untouched
    assert_relative_eq!(a.velocity().x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity().x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(a.velocity().y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(b.velocity().y, -0.5, epsilon = 1e-12);
}

#[test]
fn test_momentum_along_normal_is_conserved() {
    let mut a = Body::kinetic((1.0, 1.0), 1.0, 1.5).with_velocity((1.0, 0.25));
    let mut b = Body::kinetic((1.3, 1.2), 1.0, 4.0).with_velocity((-0.5, -0.75));
    let normal = (a.position() - b.position()).unit();

    let before = a.velocity().dot(normal) * a.mass() + b.velocity().dot(normal) * b.mass();
    let energy_before = total_kinetic_energy([&a, &b]);
    assert!(resolve_pair(&mut a, &mut b));
    let after = a.velocity().dot(normal) * a.mass() + b.velocity().dot(normal) * b.mass();

    assert_relative_eq!(before, after, epsilon = 1e-12);
    assert_relative_eq!(energy_before, total_kinetic_energy([&a, &b]), epsilon = 1e-12);
}

#[test]
fn test_crowd_conserves_momentum_and_energy() {
    let mut bodies = BodySet::new();
    for i in 0..40 {
        let position = ((i % 8) as f64 * 0.4, (i / 8) as f64 * 0.4);
        let mass = 1.0 + (i % 3) as f64;
        bodies.insert(Body::kinetic(position, 1.0, mass).with_velocity(velocity(i)));
    }

    let momentum = total_momentum(bodies.iter().map(|(_, b)| b));
    let energy = total_kinetic_energy(bodies.iter().map(|(_, b)| b));

    let impulses = collide_all(&mut bodies);
    assert!(impulses > 0);

    let momentum_after = total_momentum(bodies.iter().map(|(_, b)| b));
    let energy_after = total_kinetic_energy(bodies.iter().map(|(_, b)| b));
    assert_relative_eq!(momentum.x, momentum_after.x, epsilon = 1e-9);
    assert_relative_eq!(momentum.y, momentum_after.y, epsilon = 1e-9);
    assert_relative_eq!(energy, energy_after, epsilon = 1e-9);
}

#[test]
fn test_separating_pair_is_left_alone() {
    let mut a = Body::kinetic((0.0, 0.0), 1.0, 1.0).with_velocity((-1.0, 0.0));
    let mut b = Body::kinetic((0.2, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0));
    assert!(!resolve_pair(&mut a, &mut b));
    assert_eq!(a.velocity(), Vector::new(-1.0, 0.0));
    assert_eq!(b.velocity(), Vector::new(1.0, 0.0));
}

#[test]
fn test_resting_pair_is_left_alone() {
    let mut a = Body::kinetic((0.0, 0.0), 1.0, 1.0);
    let mut b = Body::kinetic((0.2, 0.0), 1.0, 1.0);
    assert!(!resolve_pair(&mut a, &mut b));
    assert_eq!(a.velocity(), Vector::ZERO);
}

#[test]
fn test_contact_distance_is_half_the_radius_sum() {
    // Radii 1.0 and 1.0 collide within a distance of 1.0, not 2.0
    let mut near = Body::kinetic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0));
    let mut far = Body::kinetic((1.5, 0.0), 1.0, 1.0);
    assert!(!resolve_pair(&mut near, &mut far));

    let mut touching = Body::kinetic((0.5, 0.0), 1.0, 1.0);
    assert!(resolve_pair(&mut near, &mut touching));
}

#[test]
fn test_fixed_body_gains_velocity_but_keeps_position() {
    let level = Level::from_fn(8, 8, |_, _| 0.5);
    let mut physics = Physics::with_level(level);
    let wall = physics.insert(Body::fixed((4.0, 4.0), 1.0, 10.0)).unwrap();
    physics
        .insert(Body::kinetic((3.7, 4.0), 1.0, 1.0).with_velocity((3.0, 0.0)))
        .unwrap();

    let momentum = total_momentum(physics.bodies().iter().map(|(_, b)| b));
    assert_eq!(physics.step(1.0 / 60.0), 1);
    let momentum_after = total_momentum(physics.bodies().iter().map(|(_, b)| b));

    assert_relative_eq!(momentum.x, momentum_after.x, epsilon = 1e-12);
    let wall = physics.body(wall).unwrap();
    assert!(wall.velocity().x > 0.0);
    assert_eq!(wall.position(), Vector::new(4.0, 4.0));
}
