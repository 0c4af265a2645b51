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
//! Tile walk demo
//!
//! Generates a noise level, drops a few balls on walkable tiles and runs the
//! main loop headless for a few simulated seconds, logging where the balls
//! end up.
//!
//! Run with `RUST_LOG=info cargo run --example tile_walk [settings.toml]`.

use std::any::Any;
use tilesim::config::Settings;
use tilesim::ecs::{Engine, Headless, Prefab, SteppedClock, StopHandle, System, SystemKind};
use tilesim::physics::{Body, Physics};
use tilesim::{Entity, EngineError, Vector};

/// A ball rolling with an initial push
struct Ball {
    position: Vector,
    push: Vector,
}

impl Prefab for Ball {
    fn assemble(self, engine: &mut Engine, entity: Entity) -> Result<(), EngineError> {
        let body = Body::dynamic(self.position, 0.8, 1.0).with_velocity(self.push);
        engine.attach_component(entity, body)?;
        Ok(())
    }
}

/// Variable-loop system that ends the run after a fixed number of frames
struct Countdown {
    frames_left: u32,
    elapsed: f64,
    handle: StopHandle,
}

impl System for Countdown {
    fn kind(&self) -> SystemKind {
        SystemKind::Custom("countdown")
    }

    fn update_loop(&self) -> &str {
        "variable"
    }

    fn update(&mut self, delta: f64) {
        self.elapsed += delta;
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            log::info!("Countdown finished after {:.2} simulated seconds", self.elapsed);
            self.handle.stop();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut engine = Engine::new(settings.engine.clone())?
        .with_clock(SteppedClock::new(settings.engine.fixed_step()))
        .with_surface(Headless::new());
    let handle = engine.stop_handle();

    let physics = engine.attach(Physics::from_config(&settings.level))?;
    let open: Vec<Vector> = physics
        .level()
        .tiles()
        .filter(|tile| !tile.is_solid())
        .map(|tile| tile.position())
        .collect();
    println!(
        "Level {}x{}: {} walkable tiles",
        settings.level.width,
        settings.level.height,
        open.len()
    );

    let mut balls = Vec::new();
    for (i, &position) in open.iter().step_by(open.len().max(8) / 8).take(8).enumerate() {
        let angle = i as f64 * std::f64::consts::FRAC_PI_4;
        let push = Vector::new(angle.cos(), angle.sin()) * 4.0;
        balls.push(engine.create_entity_from(Ball { position, push })?);
    }

    engine.attach(Countdown {
        frames_left: 300,
        elapsed: 0.0,
        handle,
    })?;
    engine.start();

    for ball in balls {
        if let Some(body) = engine.get::<Body>(ball) {
            println!("{} rests at {} (speed {:.3})", ball, body.position(), body.velocity().norm());
        }
    }
    if let Some(physics) = engine.system::<Physics>() {
        println!("{} fixed ticks simulated", physics.ticks());
    }
    Ok(())
}
