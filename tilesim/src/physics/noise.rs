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
//! Deterministic 2D gradient noise
//!
//! Terrain heights are sampled from simplex noise over a fixed permutation
//! table, so the same coordinates always produce the same value. Several
//! octaves are layered: each octave doubles the sampling frequency and scales
//! the amplitude by `persistence`, and the sum is normalised by the total
//! amplitude before being mapped into the requested range.

/// Ken Perlin's reference permutation of `0..=255`
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Edge midpoints of a cube; only the x and y components are used in 2D
const GRADIENTS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

fn perm(index: i64) -> i64 {
    i64::from(PERMUTATION[(index & 255) as usize])
}

fn corner(gradient: i64, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let (gx, gy) = GRADIENTS[(gradient % 12) as usize];
        let t2 = t * t;
        t2 * t2 * (gx * x + gy * y)
    }
}

/// Single-octave simplex noise in `[-1, 1]`
pub fn raw_noise_2d(x: f64, y: f64) -> f64 {
    let f2 = 0.5 * (3.0_f64.sqrt() - 1.0);
    let g2 = (3.0 - 3.0_f64.sqrt()) / 6.0;

    // Skew into simplex cell space to find the containing cell
    let s = (x + y) * f2;
    let i = (x + s).floor() as i64;
    let j = (y + s).floor() as i64;

    let t = (i + j) as f64 * g2;
    let x0 = x - (i as f64 - t);
    let y0 = y - (j as f64 - t);

    // Lower or upper triangle of the cell
    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f64 + g2;
    let y1 = y0 - j1 as f64 + g2;
    let x2 = x0 - 1.0 + 2.0 * g2;
    let y2 = y0 - 1.0 + 2.0 * g2;

    let ii = i & 255;
    let jj = j & 255;
    let gi0 = perm(ii + perm(jj));
    let gi1 = perm(ii + i1 + perm(jj + j1));
    let gi2 = perm(ii + 1 + perm(jj + 1));

    let n = corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2);
    (70.0 * n).clamp(-1.0, 1.0)
}

/// Layered simplex noise in `[-1, 1]`
///
/// Returns 0.0 when `octaves` is zero.
pub fn octave_noise_2d(octaves: u32, persistence: f64, frequency: f64, x: f64, y: f64) -> f64 {
    let mut total = 0.0;
    let mut frequency = frequency;
    let mut amplitude = 1.0;
    let mut max_amplitude = 0.0;

    for _ in 0..octaves {
        total += raw_noise_2d(x * frequency, y * frequency) * amplitude;
        frequency *= 2.0;
        max_amplitude += amplitude;
        amplitude *= persistence;
    }

    if max_amplitude == 0.0 {
        0.0
    } else {
        total / max_amplitude
    }
}

/// Layered simplex noise mapped into `[low, high]`
///
/// # Examples
///
/// ```
/// use tilesim::physics::noise::scaled_octave_noise_2d;
///
/// let h = scaled_octave_noise_2d(3, 0.3, 0.05, 0.0, 1.0, 4.0, 7.0);
/// assert!((0.0..=1.0).contains(&h));
/// assert_eq!(h, scaled_octave_noise_2d(3, 0.3, 0.05, 0.0, 1.0, 4.0, 7.0));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn scaled_octave_noise_2d(
    octaves: u32,
    persistence: f64,
    frequency: f64,
    low: f64,
    high: f64,
    x: f64,
    y: f64,
) -> f64 {
    let value = octave_noise_2d(octaves, persistence, frequency, x, y);
    let scaled = value * (high - low) / 2.0 + (high + low) / 2.0;
    scaled.clamp(low.min(high), high.max(low))
}
