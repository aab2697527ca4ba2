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

//! BLE service and characteristic UUIDs for Neosensory devices.

use uuid::Uuid;

/// UART-style GATT service exposing the device CLI.
pub const SERVICE_UUID: Uuid = Uuid::from_u128(0x6e400001_b5a3_f393_e0a9_e50e24dcca9e);

/// Command RX characteristic UUID (host writes commands here).
/// Properties: Write
pub const COMMAND_RX_UUID: Uuid = Uuid::from_u128(0x6e400002_b5a3_f393_e0a9_e50e24dcca9e);

/// Response TX characteristic UUID (device sends responses here).
/// Properties: Notify
pub const RESPONSE_TX_UUID: Uuid = Uuid::from_u128(0x6e400003_b5a3_f393_e0a9_e50e24dcca9e);

/// Neosensory Buzz reference values.
pub mod buzz {
    use std::time::Duration;

    /// Substring of the advertised name used to find a Buzz.
    pub const NAME_FILTER: &str = "Buzz";

    /// Actuators around the wrist.
    pub const NUM_MOTORS: usize = 4;

    pub const MIN_INTENSITY: u8 = 0;
    pub const MAX_INTENSITY: u8 = 255;

    /// Playback period of frames queued by a single vibrate command.
    pub const FRAME_PERIOD: Duration = Duration::from_millis(16);
}
