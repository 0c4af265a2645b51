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
//! Output surface owned by the engine
//!
//! The engine holds the display resource for the lifetime of the main loop
//! and closes it exactly once when the loop stops. Rendering systems draw to
//! it through their own handles; the engine only manages its lifecycle.

/// Display resource with an explicit close
pub trait Surface: Send {
    /// Release the resource
    fn close(&mut self);

    /// Whether the resource is still open
    fn is_open(&self) -> bool;
}

/// Surface that renders nowhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headless {
    open: bool,
}

impl Headless {
    /// Create an open headless surface
    pub fn new() -> Self {
        Headless { open: true }
    }
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Headless {
    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
