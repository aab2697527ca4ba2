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

//! Two-actuator interpolation illusion.
//!
//! A single point of vibration anywhere around the wrist is simulated by
//! driving the two actuators that bracket it. Actuators sit at evenly spaced
//! positions `0, 1/(n-1), ..., 1`; the intensity is split between the pair
//! with a square-root (constant-power) crossfade on the distance to each.

use super::frame::MotorFrame;
use super::intensity::map_intensity;
use crate::error::HapticsError;

/// Compute the motor frame that places a vibration of `linear_intensity` at
/// `location` on a device with `num_motors` actuators.
///
/// At most two adjacent entries of the result are non-zero. A non-positive
/// intensity yields an all-zero frame for any location.
///
/// # Errors
///
/// [`HapticsError::NoMotors`] if `num_motors` is 0 and
/// [`HapticsError::LocationOutOfRange`] if `location` is not within [0, 1].
pub fn map_illusion(
    linear_intensity: f64,
    location: f64,
    min_intensity: u8,
    max_intensity: u8,
    num_motors: usize,
) -> Result<MotorFrame, HapticsError> {
    if num_motors == 0 {
        return Err(HapticsError::NoMotors);
    }

    let mut frame = MotorFrame::zeros(num_motors);
    if linear_intensity.is_nan() || linear_intensity <= 0.0 {
        return Ok(frame);
    }

    if !(0.0..=1.0).contains(&location) {
        return Err(HapticsError::LocationOutOfRange(location));
    }

    let motor_intensity = f64::from(map_intensity(
        linear_intensity,
        min_intensity,
        max_intensity,
    ));
    let motor_location = location * (num_motors - 1) as f64;

    let lower = motor_location.floor();
    let upper = motor_location.ceil();
    let lower_activation = crossfade(motor_intensity, (motor_location - lower).abs());
    let upper_activation = crossfade(motor_intensity, (motor_location - upper).abs());

    // When the location sits exactly on an actuator both indices coincide and
    // the second write wins; both activations are equal in that case.
    frame.set(lower as usize, lower_activation);
    frame.set(upper as usize, upper_activation);

    Ok(frame)
}

/// Share of `intensity` given to an actuator `distance` away (0..=1).
fn crossfade(intensity: f64, distance: f64) -> u8 {
    (intensity * (1.0 - distance).sqrt()) as u8
}
