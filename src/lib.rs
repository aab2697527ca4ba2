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

//! Control and haptics library for the Neosensory Buzz wristband.
//!
//! [`psychophysics`] computes per-motor intensities, including the
//! two-actuator illusion that places a vibration anywhere around the wrist.
//! [`bluetooth`] turns device operations into CLI command lines and writes
//! them through a [`Transport`](bluetooth::Transport).

pub mod bluetooth;
pub mod config;
pub mod error;
pub mod logging;
pub mod psychophysics;

pub use bluetooth::{Command, NeoDevice, Notification, RecordingTransport, Transport};
pub use error::{Error, HapticsError, Result, TransportError};
pub use psychophysics::{map_illusion, map_intensity, DeviceProfile, MotorFrame};
