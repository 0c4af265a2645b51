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
//! Pairwise elastic collision response
//!
//! Every unordered pair of bodies is tested (no broad phase). Two bodies are
//! in contact when the distance between their centres is at most half the sum
//! of their radii. Contacting pairs that are approaching along the contact
//! normal exchange momentum with the one-dimensional elastic collision formula
//! along that normal; the tangential components are kept. Overlap is not
//! corrected, and body kind is ignored: a fixed body still has its velocity
//! changed even though it will never act on it.

use crate::math::Vector;
use crate::physics::{Body, BodySet};

/// Post-collision normal speeds of two masses in a 1D elastic collision
///
/// ```
/// use tilesim::physics::collision::elastic_normal;
///
/// // Equal masses swap their speeds
/// assert_eq!(elastic_normal(1.0, 3.0, 1.0, -2.0), (-2.0, 3.0));
/// ```
pub fn elastic_normal(mass_a: f64, speed_a: f64, mass_b: f64, speed_b: f64) -> (f64, f64) {
    let total = mass_a + mass_b;
    let a = ((mass_a - mass_b) * speed_a + 2.0 * mass_b * speed_b) / total;
    let b = ((mass_b - mass_a) * speed_b + 2.0 * mass_a * speed_a) / total;
    (a, b)
}

/// Resolve a single pair, returning whether an impulse was applied
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> bool {
    let difference = a.position() - b.position();
    let distance = difference.norm();
    let maximum = (a.radius() + b.radius()) / 2.0;
    if distance > maximum {
        return false;
    }

    let normal = difference.unit();
    let relative = a.velocity() - b.velocity();
    // Zero relative velocity or coincident centres give a zero dot product,
    // and separating pairs a positive one
    if normal.dot(relative.unit()) >= 0.0 {
        return false;
    }

    let tangent = normal.perpendicular();
    let (va, vb) = (a.velocity(), b.velocity());
    let (a_normal, a_tangent) = (va.dot(normal), va.dot(tangent));
    let (b_normal, b_tangent) = (vb.dot(normal), vb.dot(tangent));
    let (a_after, b_after) = elastic_normal(a.mass(), a_normal, b.mass(), b_normal);

    *a.velocity_mut() = normal * a_after + tangent * a_tangent;
    *b.velocity_mut() = normal * b_after + tangent * b_tangent;

    log::trace!(
        "Collision impulse: normal {} speeds ({:.4}, {:.4}) -> ({:.4}, {:.4})",
        normal,
        a_normal,
        b_normal,
        a_after,
        b_after
    );
    true
}

/// Resolve every unordered pair of live bodies in registration order
///
/// Pairs are visited as `(i, j)` with `i < j`; later pairs see velocities
/// already changed by earlier ones. Returns the number of impulses applied.
pub fn collide_all(bodies: &mut BodySet) -> usize {
    let ids = bodies.ids();
    let mut impulses = 0;
    for (n, &first) in ids.iter().enumerate() {
        for &second in &ids[n + 1..] {
            if let Some((a, b)) = bodies.pair_mut(first, second) {
                if resolve_pair(a, b) {
                    impulses += 1;
                }
            }
        }
    }
    impulses
}

/// Total momentum of a set of bodies
pub fn total_momentum<'a>(bodies: impl IntoIterator<Item = &'a Body>) -> Vector {
    bodies
        .into_iter()
        .fold(Vector::ZERO, |sum, body| sum + body.velocity() * body.mass())
}

/// Total kinetic energy of a set of bodies
pub fn total_kinetic_energy<'a>(bodies: impl IntoIterator<Item = &'a Body>) -> f64 {
    bodies
        .into_iter()
        .map(|body| 0.5 * body.mass() * body.velocity().norm2())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_masses_exchange_normal_speed() {
        let mut a = Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 0.5));
        let mut b = Body::dynamic((0.5, 0.0), 1.0, 1.0).with_velocity((-2.0, 0.0));
        assert!(resolve_pair(&mut a, &mut b));

        // Normal is the x axis; tangential y speed is untouched
        assert_relative_eq!(a.velocity().x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(a.velocity().y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(b.velocity().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.velocity().y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_momentum_and_energy_conserved() {
        let mut a = Body::dynamic((0.0, 0.0), 1.0, 3.0).with_velocity((2.0, 1.0));
        let mut b = Body::dynamic((0.3, 0.4), 1.0, 0.5).with_velocity((-1.0, -0.5));
        let before_p = total_momentum([&a, &b]);
        let before_e = total_kinetic_energy([&a, &b]);

        assert!(resolve_pair(&mut a, &mut b));

        let after_p = total_momentum([&a, &b]);
        let after_e = total_kinetic_energy([&a, &b]);
        assert_relative_eq!(before_p.x, after_p.x, epsilon = 1e-12);
        assert_relative_eq!(before_p.y, after_p.y, epsilon = 1e-12);
        assert_relative_eq!(before_e, after_e, epsilon = 1e-12);
    }

    #[test]
    fn test_separating_pair_is_skipped() {
        let mut a = Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((-1.0, 0.0));
        let mut b = Body::dynamic((0.5, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0));
        assert!(!resolve_pair(&mut a, &mut b));
        assert_eq!(a.velocity(), Vector::new(-1.0, 0.0));
        assert_eq!(b.velocity(), Vector::new(1.0, 0.0));
    }

    #[test]
    fn test_zero_relative_velocity_is_skipped() {
        let mut a = Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 1.0));
        let mut b = Body::dynamic((0.5, 0.0), 1.0, 1.0).with_velocity((1.0, 1.0));
        assert!(!resolve_pair(&mut a, &mut b));
    }

    #[test]
    fn test_coincident_centres_are_skipped() {
        let mut a = Body::dynamic((1.0, 1.0), 1.0, 1.0).with_velocity((1.0, 0.0));
        let mut b = Body::dynamic((1.0, 1.0), 1.0, 1.0);
        assert!(!resolve_pair(&mut a, &mut b));
    }

    #[test]
    fn test_exact_touch_collides() {
        // distance == (r_a + r_b) / 2
        let mut a = Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0));
        let mut b = Body::dynamic((1.0, 0.0), 1.0, 1.0);
        assert!(resolve_pair(&mut a, &mut b));

        let mut c = Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0));
        let mut d = Body::dynamic((1.01, 0.0), 1.0, 1.0);
        assert!(!resolve_pair(&mut c, &mut d));
    }

    #[test]
    fn test_fixed_body_velocity_changes() {
        let mut a = Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0));
        let mut wall = Body::fixed((0.5, 0.0), 1.0, 2.0);
        assert!(resolve_pair(&mut a, &mut wall));
        assert!(wall.velocity().x > 0.0);
    }

    #[test]
    fn test_collide_all_visits_each_pair_once() {
        let mut set = BodySet::new();
        set.insert(Body::dynamic((0.0, 0.0), 1.0, 1.0).with_velocity((1.0, 0.0)));
        set.insert(Body::dynamic((0.4, 0.0), 1.0, 1.0));
        set.insert(Body::dynamic((10.0, 10.0), 1.0, 1.0));
        assert_eq!(collide_all(&mut set), 1);
    }
}
