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
//! Tile-grid physics
//!
//! This module provides the physics side of the engine:
//! - Procedural tile levels built from layered noise
//! - Fixed, dynamic and kinetic bodies
//! - Axis-separated movement against solid tiles
//! - Brute-force pairwise elastic collisions

pub mod noise;
pub mod collision;
mod arena;
mod body;
mod level;
mod system;

pub use arena::BodySet;
pub use body::{integrate, Body, BodyKind, DRAG_COEFFICIENT};
pub use level::{Level, Tile, WALKABLE_MAX, WALKABLE_MIN};
pub use system::Physics;
