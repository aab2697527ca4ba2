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

//! Error types.

use uuid::Uuid;

/// Failures of the link to the device.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Error reported by the Bluetooth stack.
    #[error("Bluetooth error: {0}")]
    Bluetooth(String),

    /// The device is not (or no longer) connected.
    #[error("Device disconnected")]
    Disconnected,

    /// No device matching the name filter was discovered.
    #[error("No device found matching '{0}'")]
    DeviceNotFound(String),

    /// The connected device does not expose a required characteristic.
    #[error("Characteristic {0} not found")]
    CharacteristicNotFound(Uuid),

    /// Discovery did not complete in time.
    #[error("Scan timed out")]
    ScanTimeout,
}

#[cfg(feature = "bluetooth")]
impl From<bluer::Error> for TransportError {
    fn from(e: bluer::Error) -> Self {
        Self::Bluetooth(e.to_string())
    }
}

/// Invalid input to the haptics engine or a malformed motor frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HapticsError {
    #[error("Location {0} is outside [0, 1]")]
    LocationOutOfRange(f64),

    #[error("Device must have at least one motor")]
    NoMotors,

    #[error("Motor value {value} at index {index} is outside [0, 255]")]
    ValueOutOfRange { index: usize, value: i64 },

    #[error("Motor frame has {actual} values, device has {expected} motors")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Motor frame sequence is empty")]
    EmptySequence,
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Haptics(#[from] HapticsError),
}

pub type Result<T> = std::result::Result<T, Error>;
