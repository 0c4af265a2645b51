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
//! Two-dimensional vector type
//!
//! `Vector` is a plain `Copy` value with componentwise arithmetic. Every
//! binary operator accepts either another `Vector` or an `f64`; a scalar
//! operand is broadcast to both axes, so `v * 2.0` and `v * Vector::splat(2.0)`
//! are the same operation.
//!
//! Equality is tolerance-based (see [`EPSILON`]). It is meant for direction
//! and "is this zero" checks, not for hashing, and it is not transitive at
//! the tolerance boundary.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Per-axis tolerance used by `Vector` equality
pub const EPSILON: f64 = 1e-4;

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use tilesim::math::Vector;
///
/// let v = Vector::new(3.0, 4.0);
/// assert_eq!(v.norm(), 5.0);
/// assert_eq!(v * 2.0, Vector::new(6.0, 8.0));
/// assert_eq!(Vector::ZERO.unit(), Vector::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vector {
    /// The zero vector
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// Create a vector with the same value on both axes
    pub const fn splat(value: f64) -> Self {
        Vector { x: value, y: value }
    }

    /// Dot product
    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length
    pub fn norm(self) -> f64 {
        self.norm2().sqrt()
    }

    /// Squared Euclidean length
    pub fn norm2(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector pointing in the same direction
    ///
    /// The zero vector (within [`EPSILON`]) maps to the zero vector instead
    /// of dividing by zero.
    pub fn unit(self) -> Vector {
        if self == Vector::ZERO {
            Vector::ZERO
        } else {
            self / self.norm()
        }
    }

    /// The vector rotated by 90 degrees: `(-y, x)`
    pub fn perpendicular(self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Componentwise floored division
    pub fn floor_div(self, rhs: impl Into<Vector>) -> Vector {
        let rhs = rhs.into();
        Vector::new((self.x / rhs.x).floor(), (self.y / rhs.y).floor())
    }

    /// Distance between two points
    pub fn distance(self, other: Vector) -> f64 {
        (self - other).norm()
    }

    /// Squared distance between two points
    pub fn distance2(self, other: Vector) -> f64 {
        (self - other).norm2()
    }

    /// Manhattan (taxicab) distance between two points
    pub fn manhattan(self, other: Vector) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Check that both components are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

impl From<f64> for Vector {
    fn from(value: f64) -> Self {
        Vector::splat(value)
    }
}

impl From<Vector> for (f64, f64) {
    fn from(v: Vector) -> Self {
        (v.x, v.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

// Generates the by-vector and by-scalar forms of a componentwise operator
// plus its compound-assignment counterpart.
macro_rules! componentwise {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $sym:tt) => {
        impl $op<Vector> for Vector {
            type Output = Vector;

            fn $method(self, rhs: Vector) -> Vector {
                Vector::new(self.x $sym rhs.x, self.y $sym rhs.y)
            }
        }

        impl $op<f64> for Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                Vector::new(self.x $sym rhs, self.y $sym rhs)
            }
        }

        impl $assign<Vector> for Vector {
            fn $assign_method(&mut self, rhs: Vector) {
                *self = *self $sym rhs;
            }
        }

        impl $assign<f64> for Vector {
            fn $assign_method(&mut self, rhs: f64) {
                *self = *self $sym rhs;
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);
componentwise!(Mul, mul, MulAssign, mul_assign, *);
componentwise!(Div, div, DivAssign, div_assign, /);
