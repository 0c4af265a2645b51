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
//! # tilesim
//!
//! A small game-engine core: an entity/component/system registry with a
//! fixed-timestep main loop, and a 2D physics system for round bodies moving
//! over a procedurally generated tile level.
//!
//! ## Features
//!
//! - **ECS core**: one system per kind, each driven by the fixed or variable loop
//! - **Deterministic stepping**: fixed systems always advance in whole fixed ticks
//! - **Terrain**: simplex-noise height maps with solid and walkable tiles
//! - **Physics**: drag, axis-separated wall blocking and elastic circle collisions
//! - **Configuration**: TOML settings for the loop and level generation
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use tilesim::{Engine, Physics};
//! use tilesim::physics::{Body, Level};
//!
//! let mut engine = Engine::default();
//! engine.attach(Physics::with_level(Level::from_fn(8, 8, |_, _| 0.5)))?;
//!
//! let ball = engine.create_entity();
//! engine.attach_component(ball, Body::dynamic((2.0, 2.0), 0.5, 1.0).with_velocity((1.0, 0.0)))?;
//!
//! engine.frame(Duration::from_millis(100));
//! assert!(engine.get::<Body>(ball).unwrap().position().x > 2.0);
//! # Ok::<(), tilesim::EngineError>(())
//! ```

#![warn(missing_docs)]

/// TOML-backed settings
pub mod config;
/// Entity Component System implementation
pub mod ecs;
/// Error types
pub mod error;
/// 2D vector math
pub mod math;
/// Tile level generation and body simulation
pub mod physics;

pub use ecs::{Engine, Entity};
pub use error::{BodyError, ConfigError, EngineError};
pub use math::Vector;
pub use physics::Physics;
