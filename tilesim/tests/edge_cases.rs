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
//! Edge case tests for vectors, levels and body construction
//!
//! Tests boundary conditions, degenerate values, and unusual scenarios

use tilesim::ecs::ComponentId;
use tilesim::physics::{Body, Level, Physics, Tile};
use tilesim::{BodyError, Vector};

const DT: f64 = 1.0 / 60.0;

#[test]
fn test_unit_of_zero_vector_is_zero() {
    let unit = Vector::new(0.0, 0.0).unit();
    assert_eq!(unit.x, 0.0);
    assert_eq!(unit.y, 0.0);
    assert!(unit.is_finite());
}

#[test]
fn test_unit_has_length_one() {
    let unit = Vector::new(3.0, -4.0).unit();
    assert_eq!(unit, Vector::new(0.6, -0.8));
    assert!((unit.norm() - 1.0).abs() < 1e-12);
}

#[test]
fn test_tile_solidity_boundaries() {
    assert!(Tile::new(0, 0, 0.25).is_solid());
    assert!(Tile::new(0, 0, 0.75).is_solid());
    assert!(!Tile::new(0, 0, 0.5).is_solid());
    assert!(!Tile::new(0, 0, 0.2500001).is_solid());
    assert!(Tile::new(0, 0, 0.0).is_solid());
    assert!(Tile::new(0, 0, 1.0).is_solid());
}

#[test]
fn test_lookup_outside_grid_is_absent() {
    let level = Level::from_fn(3, 2, |_, _| 0.5);
    assert!(level.lookup(-0.6, 0.0).is_none());
    assert!(level.lookup(0.0, 2.0).is_none());
    assert!(level.lookup(3.0, 0.0).is_none());
    assert!(level.lookup(f64::NAN, 0.0).is_none());
    assert!(level.lookup(f64::INFINITY, 0.0).is_none());
    // -0.4 rounds to 0 and 2.4 to 2
    assert!(level.lookup(-0.4, 0.0).is_some());
    assert!(level.lookup(2.4, 1.4).is_some());
}

#[test]
fn test_lookup_rounds_half_to_even() {
    let level = Level::from_fn(4, 1, |x, _| x as f64);
    assert_eq!(level.lookup(0.5, 0.0).unwrap().x(), 0);
    assert_eq!(level.lookup(1.5, 0.0).unwrap().x(), 2);
    assert_eq!(level.lookup(2.5, 0.0).unwrap().x(), 2);
}

#[test]
fn test_empty_level_has_no_tiles() {
    let level = Level::from_fn(0, 0, |_, _| 0.5);
    assert_eq!(level.size(), (0, 0));
    assert!(level.lookup(0.0, 0.0).is_none());
}

#[test]
fn test_body_without_tile_is_rejected() {
    let mut physics = Physics::with_level(Level::from_fn(5, 5, |_, _| 0.5));
    let err = physics.insert(Body::dynamic((10.0, 2.0), 0.5, 1.0)).unwrap_err();
    assert!(matches!(err, BodyError::NoTile { .. }));
    assert!(physics.is_empty());
    assert_eq!(physics.bodies().slot_count(), 0);
}

#[test]
fn test_body_on_solid_tile_is_accepted() {
    // Only existence is checked; solidity just blocks movement
    let mut physics = Physics::with_level(Level::from_fn(5, 5, |_, _| 1.0));
    assert!(physics.insert(Body::fixed((2.0, 2.0), 0.5, 1.0)).is_ok());
}

#[test]
fn test_non_positive_radius_and_mass_are_rejected() {
    let mut physics = Physics::with_level(Level::from_fn(5, 5, |_, _| 0.5));
    for radius in [0.0, -1.0, f64::NAN] {
        let err = physics.insert(Body::dynamic((1.0, 1.0), radius, 1.0)).unwrap_err();
        assert!(matches!(err, BodyError::InvalidRadius(_)));
    }
    for mass in [0.0, -2.0, f64::INFINITY] {
        let err = physics.insert(Body::dynamic((1.0, 1.0), 0.5, mass)).unwrap_err();
        assert!(matches!(err, BodyError::InvalidMass(_)));
    }
    assert!(physics.is_empty());
}

#[test]
fn test_diagonal_move_into_corner_blocks_one_axis() {
    // Solid column at x = 3, everything else open
    let level = Level::from_fn(6, 6, |x, _| if x == 3 { 1.0 } else { 0.5 });
    let mut physics = Physics::with_level(level);
    let id = physics
        .insert(Body::dynamic((2.49, 2.0), 0.5, 1.0).with_velocity((60.0, 60.0)))
        .unwrap();

    physics.step(DT);

    let body = physics.body(id).unwrap();
    // x would land in the solid column; y is free
    assert_eq!(body.position().x, 2.49);
    assert!(body.position().y > 2.0);
}

#[test]
fn test_diagonal_move_into_floor_blocks_other_axis() {
    let level = Level::from_fn(6, 6, |_, y| if y == 3 { 0.0 } else { 0.5 });
    let mut physics = Physics::with_level(level);
    let id = physics
        .insert(Body::dynamic((2.0, 2.49), 0.5, 1.0).with_velocity((60.0, 60.0)))
        .unwrap();

    physics.step(DT);

    let body = physics.body(id).unwrap();
    assert!(body.position().x > 2.0);
    assert_eq!(body.position().y, 2.49);
}

#[test]
fn test_body_at_grid_edge_cannot_leave() {
    let mut physics = Physics::with_level(Level::from_fn(3, 3, |_, _| 0.5));
    let id = physics
        .insert(Body::dynamic((2.4, 1.0), 0.5, 1.0).with_velocity((60.0, 0.0)))
        .unwrap();
    physics.step(DT);
    assert_eq!(physics.body(id).unwrap().position().x, 2.4);
}

#[test]
fn test_kinetic_and_fixed_bodies_ignore_forces() {
    let mut physics = Physics::with_level(Level::from_fn(5, 5, |_, _| 0.5));
    let kinetic = physics
        .insert(Body::kinetic((1.0, 1.0), 0.5, 1.0).with_velocity((5.0, 0.0)))
        .unwrap();
    let fixed = physics.insert(Body::fixed((3.0, 3.0), 0.5, 1.0)).unwrap();
    physics.set_force(kinetic, (100.0, 0.0));
    physics.set_force(fixed, (100.0, 0.0));

    for _ in 0..10 {
        physics.step(DT);
    }

    assert_eq!(physics.body(kinetic).unwrap().position(), Vector::new(1.0, 1.0));
    assert_eq!(physics.body(kinetic).unwrap().velocity(), Vector::new(5.0, 0.0));
    assert_eq!(physics.body(fixed).unwrap().position(), Vector::new(3.0, 3.0));
}

#[test]
fn test_removed_body_leaves_tombstone() {
    let mut physics = Physics::with_level(Level::from_fn(5, 5, |_, _| 0.5));
    let first = physics.insert(Body::dynamic((1.0, 1.0), 0.5, 1.0)).unwrap();
    let second = physics.insert(Body::dynamic((3.0, 3.0), 0.5, 1.0)).unwrap();

    assert!(physics.remove(first).is_some());
    assert!(physics.remove(first).is_none());
    assert!(!physics.set_force(first, (1.0, 0.0)));

    // Identifiers are never reused
    let third = physics.insert(Body::dynamic((2.0, 2.0), 0.5, 1.0)).unwrap();
    assert_eq!(third, ComponentId::new(2));
    assert_eq!(physics.body(second).unwrap().position(), Vector::new(3.0, 3.0));
    assert_eq!(physics.len(), 2);
    assert_eq!(physics.bodies().slot_count(), 3);

    // Stepping skips the tombstone
    physics.step(DT);
    assert_eq!(physics.ticks(), 1);
}
