// Copyright 2026 Daniel Pelikan
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

//! Perceptual intensity curve.

use std::f64::consts::E;

/// Map a normalized intensity on [0, 1] to a motor value on
/// [`min_intensity`, `max_intensity`].
///
/// The curve is `(e^x - 1) / (e - 1)`, which is 0 at x = 0 and 1 at x = 1 and
/// grows slowly at low input, so small steps near zero stay subtle. Inputs at
/// or below 0 (and NaN) return `min_intensity`, inputs at or above 1 return
/// `max_intensity`. The scaled result is truncated toward zero.
pub fn map_intensity(linear_intensity: f64, min_intensity: u8, max_intensity: u8) -> u8 {
    if linear_intensity.is_nan() || linear_intensity <= 0.0 {
        return min_intensity;
    }
    if linear_intensity >= 1.0 {
        return max_intensity;
    }

    let min = f64::from(min_intensity);
    let max = f64::from(max_intensity);
    let scaled = linear_intensity.exp_m1() / (E - 1.0) * (max - min) + min;

    // `as` truncates toward zero
    scaled as u8
}
