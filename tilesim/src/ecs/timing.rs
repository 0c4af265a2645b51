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
//! Frame clocks and frame-time statistics

use std::time::{Duration, Instant};

/// Source of elapsed real time for the main loop
pub trait Clock: Send {
    /// Time since the last restart
    fn elapsed(&self) -> Duration;

    /// Start measuring from now
    fn restart(&mut self);
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    /// Create a clock that starts measuring now
    pub fn new() -> Self {
        SystemClock {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn restart(&mut self) {
        self.started = Instant::now();
    }
}

/// Clock that reports the same elapsed time on every frame
///
/// Useful for deterministic drivers (replays, tests, headless runs) that want
/// the main loop without depending on real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteppedClock {
    step: Duration,
}

impl SteppedClock {
    /// Create a clock that advances by `step` per frame
    pub fn new(step: Duration) -> Self {
        SteppedClock { step }
    }
}

impl Clock for SteppedClock {
    fn elapsed(&self) -> Duration {
        self.step
    }

    fn restart(&mut self) {}
}

/// Smoothed frame-time tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    smoothed: f64,
    weight: f64,
    frames: u64,
    fixed_ticks: u64,
}

impl FrameStats {
    /// Start tracking from an initial frame time, blending new samples with
    /// `1 - weight`
    pub fn new(initial: f64, weight: f64) -> Self {
        FrameStats {
            smoothed: initial,
            weight,
            frames: 0,
            fixed_ticks: 0,
        }
    }

    /// Account for one frame that consumed `delta` simulated seconds in
    /// `ticks` fixed steps
    pub fn record(&mut self, delta: f64, ticks: u32) {
        self.smoothed = self.smoothed * self.weight + delta * (1.0 - self.weight);
        self.frames += 1;
        self.fixed_ticks += u64::from(ticks);
    }

    /// Exponential moving average of the frame time, in seconds
    pub fn frame_time(&self) -> f64 {
        self.smoothed
    }

    /// Frames per second derived from the smoothed frame time
    pub fn framerate(&self) -> Option<f64> {
        if self.smoothed > 0.0 {
            Some(1.0 / self.smoothed)
        } else {
            None
        }
    }

    /// Frames recorded so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fixed ticks recorded so far
    pub fn fixed_ticks(&self) -> u64 {
        self.fixed_ticks
    }
}
