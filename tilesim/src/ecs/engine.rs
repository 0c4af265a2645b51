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
//! The engine: system registry, entity/component wiring and the main loop
//!
//! The engine owns every system. Systems are attached once per
//! [`SystemKind`] and sorted into the fixed or variable loop by their
//! declared designation. Entities are created through the engine and
//! components are attached to them through the engine, which routes each
//! component to the system its type asks for.
//!
//! # Main loop
//!
//! Each frame measures the real time since the previous frame (clamped to
//! `max_frame_time`), adds it to an accumulator and drains the accumulator in
//! fixed steps, running every fixed-loop system once per step. The variable
//! loop then runs once with the simulated time actually consumed. Fixed-loop
//! systems therefore always advance in exact multiples of the fixed step,
//! whatever the frame rate. The accumulator counts whole nanoseconds, so
//! splitting the same real time into frames differently never changes the
//! number of fixed steps taken.
//!
//! ```
//! use std::time::Duration;
//! use tilesim::ecs::Engine;
//! use tilesim::physics::{Body, Physics};
//!
//! let mut engine = Engine::default();
//! engine.attach(Physics::new(16, 16)).unwrap();
//!
//! let ball = engine.create_entity();
//! engine
//!     .attach_component(ball, Body::kinetic((3.0, 4.0), 0.5, 1.0))
//!     .unwrap();
//!
//! let report = engine.frame(Duration::from_millis(40));
//! assert_eq!(report.fixed_ticks, 3);
//! assert_eq!(engine.get::<Body>(ball).unwrap().position().x, 3.0);
//! ```

use crate::config::EngineConfig;
use crate::ecs::entity::ComponentRef;
use crate::ecs::timing::{Clock, FrameStats, SystemClock};
use crate::ecs::{Component, Entity, Surface, System, SystemKind, UpdateLoop, World};
use crate::error::EngineError;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared flag that ends the main loop at the next frame boundary
///
/// Clone it into any system that needs to stop the engine (an input system
/// reacting to a quit key, a scripted scenario that has finished).
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request the loop to stop after the current frame
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the loop is (still) running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn start(&self) {
        self.running.store(true, Ordering::Release);
    }
}

/// Recipe for a kind of entity
///
/// A prefab receives a freshly created entity and attaches whatever
/// components make up that kind of object.
pub trait Prefab {
    /// Attach this prefab's components to `entity`
    fn assemble(self, engine: &mut Engine, entity: Entity) -> Result<(), EngineError>;
}

/// What one frame of the main loop did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Fixed steps run this frame
    pub fixed_ticks: u32,
    /// Simulated seconds handed to the variable loop
    pub variable_delta: f64,
    /// Whether the measured frame time hit the clamp
    pub clamped: bool,
}

/// System registry, entity table and fixed-timestep main loop
pub struct Engine {
    config: EngineConfig,
    systems: Vec<Box<dyn System>>,
    registry: HashMap<SystemKind, usize>,
    fixed: Vec<usize>,
    variable: Vec<usize>,
    world: World,
    clock: Box<dyn Clock>,
    surface: Option<Box<dyn Surface>>,
    running: StopHandle,
    fixed_step: Duration,
    max_frame: Duration,
    accumulator: Duration,
    stats: FrameStats,
}

impl Engine {
    /// Create an engine with validated settings and a wall clock
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Engine::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let fixed_step = config.fixed_step();
        let stats = FrameStats::new(config.fixed_timestep, config.frame_time_smoothing);
        log::info!(
            "Initializing engine `{}` (fixed step {:?})",
            config.title,
            fixed_step
        );
        Engine {
            max_frame: config.max_frame(),
            config,
            systems: Vec::new(),
            registry: HashMap::new(),
            fixed: Vec::new(),
            variable: Vec::new(),
            world: World::new(),
            clock: Box::new(SystemClock::new()),
            surface: None,
            running: StopHandle::default(),
            fixed_step,
            accumulator: fixed_step,
            stats,
        }
    }

    /// Replace the frame clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Hand the engine a display resource to close when the loop stops
    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Settings the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Attach a system
    ///
    /// The system is classified by its loop designation and becomes the
    /// registered instance of its kind. Attaching a second instance of a kind
    /// replaces the registry entry, but the first instance stays in its loop
    /// and keeps being updated.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidLoop`] if the designation is neither `"fixed"`
    /// nor `"variable"`; nothing is registered in that case.
    pub fn attach<S: System>(&mut self, system: S) -> Result<&mut S, EngineError> {
        let update_loop = UpdateLoop::of(&system)?;
        let kind = system.kind();
        let slot = self.systems.len();
        log::debug!("Attaching {} as {} on the {:?} loop", system.name(), kind, update_loop);

        self.systems.push(Box::new(system));
        match update_loop {
            UpdateLoop::Fixed => self.fixed.push(slot),
            UpdateLoop::Variable => self.variable.push(slot),
        }
        if self.registry.insert(kind, slot).is_some() {
            log::warn!("System kind {} attached again; the previous instance keeps running", kind);
        }

        self.systems[slot]
            .as_any_mut()
            .downcast_mut::<S>()
            .ok_or(EngineError::SystemMismatch {
                kind,
                expected: std::any::type_name::<S>(),
            })
    }

    /// The registered system of a kind
    pub fn system_of(&self, kind: SystemKind) -> Option<&dyn System> {
        let slot = *self.registry.get(&kind)?;
        self.systems.get(slot).map(|system| system.as_ref())
    }

    /// The registered system of type `S`
    ///
    /// If instances of `S` are registered under several kinds, the most
    /// recently attached one is returned. Use [`system_of`](Engine::system_of)
    /// to pick a kind explicitly.
    pub fn system<S: System>(&self) -> Option<&S> {
        let slot = self.slot_of::<S>()?;
        self.systems[slot].as_any().downcast_ref::<S>()
    }

    /// The registered system of type `S`, mutably
    ///
    /// Resolves like [`system`](Engine::system).
    pub fn system_mut<S: System>(&mut self) -> Option<&mut S> {
        let slot = self.slot_of::<S>()?;
        self.systems[slot].as_any_mut().downcast_mut::<S>()
    }

    fn slot_of<S: System>(&self) -> Option<usize> {
        self.registry
            .values()
            .copied()
            .filter(|&slot| self.systems[slot].as_any().is::<S>())
            .max()
    }

    /// Total number of system instances, replaced ones included
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Number of fixed-loop system instances
    pub fn fixed_system_count(&self) -> usize {
        self.fixed.len()
    }

    /// Number of variable-loop system instances
    pub fn variable_system_count(&self) -> usize {
        self.variable.len()
    }

    /// The entity table
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Create an entity with no components
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.world.create_entity();
        log::debug!("Created {}", entity);
        entity
    }

    /// Create an entity and let `prefab` attach its components
    ///
    /// If assembly fails, the half-built entity is destroyed (detaching
    /// anything already attached) and the error is returned.
    pub fn create_entity_from<P: Prefab>(&mut self, prefab: P) -> Result<Entity, EngineError> {
        let entity = self.create_entity();
        if let Err(err) = prefab.assemble(self, entity) {
            self.destroy_entity(entity);
            return Err(err);
        }
        Ok(entity)
    }

    /// Destroy an entity and detach all of its components from their systems
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(mut record) = self.world.destroy_entity(entity) else {
            return false;
        };
        for component in record.drain() {
            if let Some(system) = self.systems.get_mut(component.system) {
                system.detach(component.id);
            }
        }
        log::debug!("Destroyed {}", entity);
        true
    }

    /// Attach a component to an entity
    ///
    /// The component is registered with the system attached under
    /// `C::SYSTEM`. An entity holds one component per type: attaching a
    /// second one of the same type replaces the entity's reference, while the
    /// earlier component stays registered with its system.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DeadEntity`] if the entity is not alive
    /// - [`EngineError::SystemNotAttached`] if no system of the required kind exists
    /// - [`EngineError::SystemMismatch`] if that system is of another type
    /// - whatever the component's own validation reports
    pub fn attach_component<C: Component>(
        &mut self,
        entity: Entity,
        component: C,
    ) -> Result<ComponentRef, EngineError> {
        if !self.world.is_entity_alive(entity) {
            return Err(EngineError::DeadEntity(entity));
        }
        let slot = *self
            .registry
            .get(&C::SYSTEM)
            .ok_or(EngineError::SystemNotAttached(C::SYSTEM))?;
        let system = self.systems[slot]
            .as_any_mut()
            .downcast_mut::<C::System>()
            .ok_or(EngineError::SystemMismatch {
                kind: C::SYSTEM,
                expected: std::any::type_name::<C::System>(),
            })?;

        let id = component.register(entity, system)?;
        let component = ComponentRef { system: slot, id };
        if let Some(record) = self.world.record_mut(entity) {
            if let Some(previous) = record.insert(TypeId::of::<C>(), component) {
                log::debug!(
                    "{} replaced its {} ({} stays registered)",
                    entity,
                    std::any::type_name::<C>(),
                    previous.id
                );
            }
        }
        Ok(component)
    }

    /// Detach the component of type `C` from an entity and its system
    pub fn detach<C: Component>(&mut self, entity: Entity) -> bool {
        let Some(component) = self
            .world
            .record_mut(entity)
            .and_then(|record| record.remove(TypeId::of::<C>()))
        else {
            return false;
        };
        self.systems
            .get_mut(component.system)
            .is_some_and(|system| system.detach(component.id))
    }

    /// Whether `entity` has a component of type `C`
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        self.world.has::<C>(entity)
    }

    /// The component of type `C` attached to `entity`
    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        let component = self.world.component_ref::<C>(entity)?;
        let system = self
            .systems
            .get(component.system)?
            .as_any()
            .downcast_ref::<C::System>()?;
        C::fetch(system, component.id)
    }

    /// The component of type `C` attached to `entity`, mutably
    pub fn get_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        let component = self.world.component_ref::<C>(entity)?;
        let system = self
            .systems
            .get_mut(component.system)?
            .as_any_mut()
            .downcast_mut::<C::System>()?;
        C::fetch_mut(system, component.id)
    }

    /// Handle for stopping the loop from inside a system
    pub fn stop_handle(&self) -> StopHandle {
        self.running.clone()
    }

    /// Whether the main loop is running
    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Run the main loop until stopped
    ///
    /// The loop checks the running flag once per frame, so a stop requested
    /// during a frame takes effect after that frame completes. The engine is
    /// then [stopped](Engine::stop).
    pub fn start(&mut self) {
        log::info!(
            "Starting main loop ({} fixed, {} variable systems)",
            self.fixed.len(),
            self.variable.len()
        );
        self.running.start();
        self.clock.restart();
        while self.running.is_running() {
            let elapsed = self.clock.elapsed();
            self.clock.restart();
            self.frame(elapsed);
        }
        self.stop();
    }

    /// Run one iteration of the loop body for `elapsed` real time
    pub fn frame(&mut self, elapsed: Duration) -> FrameReport {
        let clamped = elapsed > self.max_frame;
        if clamped {
            log::warn!("Frame took {:?}; accounting for {:?} only", elapsed, self.max_frame);
        }
        self.accumulator += elapsed.min(self.max_frame);

        let delta = self.config.fixed_timestep;
        let mut fixed_ticks = 0u32;
        while self.accumulator >= self.fixed_step {
            self.accumulator -= self.fixed_step;
            fixed_ticks += 1;
            for &slot in &self.fixed {
                self.systems[slot].update(delta);
            }
        }

        let variable_delta = f64::from(fixed_ticks) * delta;
        for &slot in &self.variable {
            self.systems[slot].update(variable_delta);
        }
        self.stats.record(variable_delta, fixed_ticks);

        FrameReport {
            fixed_ticks,
            variable_delta,
            clamped,
        }
    }

    /// Stop the loop and release the display resource
    ///
    /// The surface is closed the first time this is called.
    pub fn stop(&mut self) {
        match self.framerate() {
            Some(fps) => log::info!("Average framerate: {:.1} fps", fps),
            None => log::info!("Average framerate: n/a"),
        }
        self.running.stop();
        if let Some(mut surface) = self.surface.take() {
            surface.close();
            log::info!("Display closed");
        }
    }

    /// Whether the engine still holds an open display
    pub fn has_surface(&self) -> bool {
        self.surface.as_ref().is_some_and(|surface| surface.is_open())
    }

    /// Frame rate derived from the smoothed frame time
    pub fn framerate(&self) -> Option<f64> {
        self.stats.framerate()
    }

    /// Frame timing statistics
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Real time not yet consumed by fixed steps
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::build(EngineConfig::default())
    }
}
