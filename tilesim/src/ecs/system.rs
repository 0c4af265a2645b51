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
//! System execution framework
//!
//! Systems own their components and advance them in `update`. Every system
//! declares a registry kind (one live instance per kind) and the loop it runs
//! on: `"fixed"` systems are stepped in constant-size ticks, `"variable"`
//! systems once per rendered frame.

use crate::ecs::ComponentId;
use crate::error::EngineError;
use std::any::Any;
use std::fmt;
use std::str::FromStr;

/// Registry key of a system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    /// Body integration and collisions
    Physics,
    /// Device polling and action mapping
    Input,
    /// Drawing
    Graphics,
    /// Any other system, identified by name
    Custom(&'static str),
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemKind::Physics => write!(f, "Physics"),
            SystemKind::Input => write!(f, "Input"),
            SystemKind::Graphics => write!(f, "Graphics"),
            SystemKind::Custom(name) => write!(f, "Custom({})", name),
        }
    }
}

/// Which loop of the engine drives a system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateLoop {
    /// Constant-size ticks, independent of frame rate
    Fixed,
    /// Once per frame with the simulated time consumed by that frame
    Variable,
}

impl FromStr for UpdateLoop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(UpdateLoop::Fixed),
            "variable" => Ok(UpdateLoop::Variable),
            other => Err(other.to_string()),
        }
    }
}

impl UpdateLoop {
    /// Parse the loop a system declares
    pub fn of(system: &dyn System) -> Result<UpdateLoop, EngineError> {
        system
            .update_loop()
            .parse()
            .map_err(|designation| EngineError::InvalidLoop {
                system: system.name().to_string(),
                designation,
            })
    }
}

/// Trait for systems driven by the engine loop
pub trait System: Any + Send + Sync {
    /// Registry kind of this system
    fn kind(&self) -> SystemKind;

    /// Loop designation: `"fixed"` or `"variable"`
    ///
    /// Anything else makes [`Engine::attach`](crate::ecs::Engine::attach) fail.
    fn update_loop(&self) -> &str;

    /// Advance the system by `delta` seconds
    fn update(&mut self, delta: f64);

    /// Drop a component this system stores, returning whether it existed
    fn detach(&mut self, _id: ComponentId) -> bool {
        false
    }

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Upcast for typed access
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
