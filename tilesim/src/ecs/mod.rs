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
//! Entity Component System (ECS) core
//!
//! This module provides the engine skeleton:
//! - Entity identifiers and the per-entity component table
//! - The `System` and `Component` contracts
//! - Fixed and variable update loops driven by the [`Engine`]

mod component;
mod engine;
mod entity;
mod surface;
mod system;
mod timing;
mod world;

pub use component::{Component, ComponentId};
pub use engine::{Engine, FrameReport, Prefab, StopHandle};
pub use entity::{ComponentRef, Entity, EntityRecord};
pub use surface::{Headless, Surface};
pub use system::{System, SystemKind, UpdateLoop};
pub use timing::{Clock, FrameStats, SteppedClock, SystemClock};
pub use world::World;
