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
//! Procedurally generated tile grid
//!
//! A [`Level`] is a fixed `width x height` grid of immutable [`Tile`]s built
//! once from layered noise. Tiles are addressed by real-valued positions that
//! are rounded to the nearest cell, so every in-bounds point maps to exactly
//! one tile.

use crate::config::LevelConfig;
use crate::math::Vector;
use crate::physics::noise::scaled_octave_noise_2d;

/// Lower edge of the walkable height band (exclusive)
pub const WALKABLE_MIN: f64 = 0.25;

/// Upper edge of the walkable height band (exclusive)
pub const WALKABLE_MAX: f64 = 0.75;

/// One cell of the level grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    x: usize,
    y: usize,
    height: f64,
}

impl Tile {
    /// Create a tile at grid coordinates `(x, y)` with the given terrain height
    pub fn new(x: usize, y: usize, height: f64) -> Self {
        Tile { x, y, height }
    }

    /// Column index
    pub fn x(&self) -> usize {
        self.x
    }

    /// Row index
    pub fn y(&self) -> usize {
        self.y
    }

    /// Terrain height in `[0, 1]`
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Cell coordinates as a vector
    pub fn position(&self) -> Vector {
        Vector::new(self.x as f64, self.y as f64)
    }

    /// Whether bodies are blocked by this tile
    ///
    /// Only the open band `0.25 < height < 0.75` is passable; both edges of
    /// the band are solid.
    pub fn is_solid(&self) -> bool {
        !(WALKABLE_MIN < self.height && self.height < WALKABLE_MAX)
    }
}

/// Fixed-size grid of tiles
#[derive(Debug, Clone)]
pub struct Level {
    width: usize,
    height: usize,
    /// Row-major: index = y * width + x
    tiles: Vec<Tile>,
}

impl Level {
    /// Generate a level with the default terrain parameters
    pub fn generate(width: usize, height: usize) -> Self {
        Level::from_config(&LevelConfig {
            width,
            height,
            ..LevelConfig::default()
        })
    }

    /// Generate a level from explicit terrain parameters
    ///
    /// Each cell `(x, y)` samples the noise at exactly `(x, y)`; the result
    /// only depends on the configuration.
    pub fn from_config(config: &LevelConfig) -> Self {
        let level = Level::from_fn(config.width, config.height, |x, y| {
            scaled_octave_noise_2d(
                config.octaves,
                config.persistence,
                config.frequency,
                0.0,
                1.0,
                x as f64,
                y as f64,
            )
        });
        log::debug!(
            "Generated {}x{} level ({} solid tiles)",
            level.width,
            level.height,
            level.tiles().filter(|t| t.is_solid()).count()
        );
        level
    }

    /// Build a level from a height function evaluated at every cell
    ///
    /// ```
    /// use tilesim::physics::Level;
    ///
    /// // A corridor open only along the middle row
    /// let level = Level::from_fn(5, 3, |_, y| if y == 1 { 0.5 } else { 1.0 });
    /// assert!(!level.lookup(2.0, 1.0).unwrap().is_solid());
    /// assert!(level.lookup(2.0, 0.0).unwrap().is_solid());
    /// ```
    pub fn from_fn<F>(width: usize, height: usize, mut height_at: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(x, y, height_at(x, y)));
            }
        }
        Level { width, height, tiles }
    }

    /// Grid dimensions as `(width, height)`
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile containing the point `(x, y)`
    ///
    /// Coordinates are rounded to the nearest cell, ties to even. Points
    /// outside `[0, width) x [0, height)` after rounding have no tile.
    pub fn lookup(&self, x: f64, y: f64) -> Option<&Tile> {
        let column = cell_index(x, self.width)?;
        let row = cell_index(y, self.height)?;
        self.tiles.get(row * self.width + column)
    }

    /// Tile containing `position`
    pub fn tile_at(&self, position: Vector) -> Option<&Tile> {
        self.lookup(position.x, position.y)
    }

    /// Whether a body may occupy `(x, y)`: a tile exists there and is not solid
    pub fn is_passable(&self, x: f64, y: f64) -> bool {
        self.lookup(x, y).is_some_and(|tile| !tile.is_solid())
    }

    /// Iterate over every tile in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

fn cell_index(coordinate: f64, extent: usize) -> Option<usize> {
    let rounded = coordinate.round_ties_even();
    // NaN fails both comparisons
    if rounded >= 0.0 && rounded < extent as f64 {
        Some(rounded as usize)
    } else {
        None
    }
}
