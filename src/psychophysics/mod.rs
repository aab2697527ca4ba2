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

//! Psychophysics engine.
//!
//! Pure, stateless mappings from a desired intensity and location to
//! per-motor activation values.

mod frame;
mod illusion;
mod intensity;

pub use frame::MotorFrame;
pub use illusion::map_illusion;
pub use intensity::map_intensity;

use crate::bluetooth::ble_constants::buzz;
use crate::error::HapticsError;

/// Actuator layout and intensity range of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    pub num_motors: usize,
    pub min_intensity: u8,
    pub max_intensity: u8,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            num_motors: buzz::NUM_MOTORS,
            min_intensity: buzz::MIN_INTENSITY,
            max_intensity: buzz::MAX_INTENSITY,
        }
    }
}

impl DeviceProfile {
    /// Scale a normalized intensity into this device's range.
    pub fn intensity(&self, linear_intensity: f64) -> u8 {
        map_intensity(linear_intensity, self.min_intensity, self.max_intensity)
    }

    /// Illusion frame for this device.
    pub fn illusion(&self, linear_intensity: f64, location: f64) -> Result<MotorFrame, HapticsError> {
        map_illusion(
            linear_intensity,
            location,
            self.min_intensity,
            self.max_intensity,
            self.num_motors,
        )
    }

    /// Frame with every motor off.
    pub fn silent_frame(&self) -> MotorFrame {
        MotorFrame::zeros(self.num_motors)
    }
}
