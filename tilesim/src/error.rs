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
//! Error types
//!
//! Configuration problems are reported as values at construction time.
//! Lookup misses (an absent tile, an unattached component) are not errors
//! and are represented with `Option` instead.

use crate::ecs::{Entity, SystemKind};
use thiserror::Error;

/// Failure to register a body with the physics system
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    /// The spawn position does not map to a tile of the level
    #[error("invalid position ({x}, {y}): no tile at that location")]
    NoTile {
        /// Requested x coordinate
        x: f64,
        /// Requested y coordinate
        y: f64,
    },

    /// Radius must be positive and finite
    #[error("invalid radius {0}")]
    InvalidRadius(f64),

    /// Mass must be positive and finite
    #[error("invalid mass {0}")]
    InvalidMass(f64),
}

/// Failure to load or validate settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings text is not valid TOML for the expected schema
    #[error("parse error: {0}")]
    Parse(String),

    /// A value is out of its accepted range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },
}

/// Errors raised by the engine registry
#[derive(Debug, Error)]
pub enum EngineError {
    /// A system declared a loop other than `"fixed"` or `"variable"`
    #[error("system `{system}` declares loop `{designation}`; loop must be fixed or variable")]
    InvalidLoop {
        /// Name of the rejected system
        system: String,
        /// The designation it declared
        designation: String,
    },

    /// A component requires a system kind that was never attached
    #[error("no system attached for kind {0}")]
    SystemNotAttached(SystemKind),

    /// The system registered under a kind is not of the type a component expects
    #[error("system registered as {kind} is not a `{expected}`")]
    SystemMismatch {
        /// Kind the component looked up
        kind: SystemKind,
        /// Type name the component expected
        expected: &'static str,
    },

    /// The entity was destroyed or never created by this engine
    #[error("{0} is not alive")]
    DeadEntity(Entity),

    /// Body registration failed
    #[error(transparent)]
    Body(#[from] BodyError),

    /// Settings were rejected
    #[error(transparent)]
    Config(#[from] ConfigError),
}
