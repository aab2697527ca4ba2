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

//! Command layer for a connected Neosensory device.
//!
//! Every operation formats one or more CLI lines and hands them to the
//! transport. Nothing is retried and authorization is not tracked locally:
//! privileged commands sent before `auth as developer` + `accept` are
//! rejected by the device and the rejection only shows up as notification
//! text.

use tracing::{debug, info, warn};

use super::protocol::Command;
use super::transport::{NotificationHandler, Transport};
use crate::error::{HapticsError, Result};
use crate::psychophysics::{DeviceProfile, MotorFrame};

/// Handle to a connected Neosensory device.
pub struct NeoDevice<T> {
    transport: T,
    profile: DeviceProfile,
}

impl<T: Transport> NeoDevice<T> {
    /// Wrap a connected transport, assuming a Buzz layout.
    pub fn new(transport: T) -> Self {
        Self::with_profile(transport, DeviceProfile::default())
    }

    pub fn with_profile(transport: T, profile: DeviceProfile) -> Self {
        Self { transport, profile }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Swap in a new transport, returning the old one.
    pub fn set_transport(&mut self, transport: T) -> T {
        std::mem::replace(&mut self.transport, transport)
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Route device notifications to `handler`.
    pub async fn enable_notifications(&self, handler: NotificationHandler) -> Result<()> {
        self.transport.subscribe(handler).await?;
        info!("Notifications enabled");
        Ok(())
    }

    /// Send an arbitrary CLI command. CRLF is appended when missing.
    pub async fn send_command(&self, command: &str) -> Result<()> {
        self.send(Command::Raw(command.to_string())).await
    }

    pub async fn request_developer_authorization(&self) -> Result<()> {
        info!("Requesting developer authorization");
        self.send(Command::AuthAsDeveloper).await
    }

    /// Agree to the developer API terms; unlocks audio and motor commands.
    pub async fn accept_developer_api_terms(&self) -> Result<()> {
        self.send(Command::Accept).await
    }

    /// (Re)start microphone acquisition and the on-device algorithm.
    pub async fn start_audio(&self) -> Result<()> {
        self.send(Command::AudioStart).await
    }

    /// Same wire command as [`start_audio`](Self::start_audio).
    pub async fn resume_device_algorithm(&self) -> Result<()> {
        info!("Resuming device algorithm");
        self.start_audio().await
    }

    /// Stop microphone acquisition, then clear the motor queue.
    pub async fn stop_audio(&self) -> Result<()> {
        self.send(Command::AudioStop).await?;
        self.clear_motor_queue().await
    }

    /// Battery level arrives later as a notification.
    pub async fn get_battery_level(&self) -> Result<()> {
        self.send(Command::BatterySoc).await
    }

    /// Device and firmware info arrives later as a notification.
    pub async fn get_device_info(&self) -> Result<()> {
        self.send(Command::DeviceInfo).await
    }

    pub async fn clear_motor_queue(&self) -> Result<()> {
        self.send(Command::MotorsClearQueue).await
    }

    pub async fn enable_motors(&self) -> Result<()> {
        self.send(Command::MotorsStart).await
    }

    /// Clear the queue and shut down the motor drivers.
    pub async fn disable_motors(&self) -> Result<()> {
        self.send(Command::MotorsStop).await
    }

    /// Turn every motor off with a zero frame (drivers stay enabled).
    pub async fn stop_motors(&self) -> Result<()> {
        self.vibrate_motors(&self.profile.silent_frame()).await
    }

    /// Hand motor control from the on-device algorithm to the host.
    pub async fn pause_device_algorithm(&self) -> Result<()> {
        info!("Pausing device algorithm");
        self.stop_audio().await?;
        self.enable_motors().await
    }

    /// Drive the motors with `frame`.
    ///
    /// The device holds the last frame until the next one arrives.
    pub async fn vibrate_motors(&self, frame: &MotorFrame) -> Result<()> {
        self.check_frame(frame)?;
        self.send(Command::vibrate(frame)).await
    }

    /// Queue several frames in one command; the device plays them back at
    /// [`FRAME_PERIOD`](super::ble_constants::buzz::FRAME_PERIOD).
    pub async fn vibrate_motor_sequence(&self, frames: &[MotorFrame]) -> Result<()> {
        if frames.is_empty() {
            return Err(HapticsError::EmptySequence.into());
        }
        for frame in frames {
            self.check_frame(frame)?;
        }
        self.send(Command::vibrate_sequence(frames)).await
    }

    /// Compute and send the illusion frame for a point at `location`.
    pub async fn vibrate_illusion(&self, linear_intensity: f64, location: f64) -> Result<()> {
        let frame = self.profile.illusion(linear_intensity, location)?;
        self.vibrate_motors(&frame).await
    }

    fn check_frame(&self, frame: &MotorFrame) -> std::result::Result<(), HapticsError> {
        frame.validate(self.profile.num_motors).map_err(|e| {
            warn!("Rejected motor frame: {}", e);
            e
        })
    }

    async fn send(&self, command: Command) -> Result<()> {
        let line = command.to_line();
        debug!("Sending: {}", line.trim_end());
        self.transport.write(line.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bluetooth::transport::RecordingTransport;
    use crate::error::{Error, TransportError};

    fn device() -> NeoDevice<RecordingTransport> {
        NeoDevice::new(RecordingTransport::new())
    }

    #[tokio::test]
    async fn test_simple_commands() {
        let device = device();
        device.request_developer_authorization().await.unwrap();
        device.accept_developer_api_terms().await.unwrap();
        device.get_battery_level().await.unwrap();
        device.get_device_info().await.unwrap();
        device.enable_motors().await.unwrap();
        device.disable_motors().await.unwrap();

        assert_eq!(
            device.transport().lines(),
            vec![
                "auth as developer\r\n",
                "accept\r\n",
                "device battery_soc\r\n",
                "device info\r\n",
                "motors start\r\n",
                "motors stop\r\n",
            ]
        );
    }

    #[tokio::test]
    async fn test_compound_commands() {
        let device = device();
        device.stop_audio().await.unwrap();
        assert_eq!(
            device.transport().lines(),
            vec!["audio stop\r\n", "motors clear_queue\r\n"]
        );

        device.transport().clear();
        device.pause_device_algorithm().await.unwrap();
        assert_eq!(
            device.transport().lines(),
            vec!["audio stop\r\n", "motors clear_queue\r\n", "motors start\r\n"]
        );

        device.transport().clear();
        device.resume_device_algorithm().await.unwrap();
        device.start_audio().await.unwrap();
        assert_eq!(
            device.transport().lines(),
            vec!["audio start\r\n", "audio start\r\n"]
        );
    }

    #[tokio::test]
    async fn test_vibrate_motors_frame() {
        let device = device();
        device
            .vibrate_motors(&MotorFrame::from([10, 20, 30, 40]))
            .await
            .unwrap();
        assert_eq!(
            device.transport().written(),
            vec![b"motors vibrate \"ChQeKA==\"\r\n".to_vec()]
        );
    }

    #[tokio::test]
    async fn test_stop_motors_uses_profile_length() {
        let profile = DeviceProfile {
            num_motors: 6,
            ..DeviceProfile::default()
        };
        let device = NeoDevice::with_profile(RecordingTransport::new(), profile);
        device.stop_motors().await.unwrap();
        assert_eq!(
            device.transport().commands(),
            vec![Command::MotorsVibrate(vec![0; 6])]
        );
    }

    #[tokio::test]
    async fn test_rejects_wrong_frame_length() {
        let device = device();
        let result = device.vibrate_motors(&MotorFrame::from([1, 2, 3])).await;
        assert!(matches!(
            result,
            Err(Error::Haptics(HapticsError::LengthMismatch {
                expected: 4,
                actual: 3
            }))
        ));
        assert!(device.transport().written().is_empty());
    }

    #[tokio::test]
    async fn test_vibrate_sequence() {
        let device = device();
        let frames = [MotorFrame::from([255, 0, 0, 0]), MotorFrame::from([0, 255, 0, 0])];
        device.vibrate_motor_sequence(&frames).await.unwrap();
        assert_eq!(
            device.transport().commands(),
            vec![Command::MotorsVibrate(vec![255, 0, 0, 0, 0, 255, 0, 0])]
        );

        let result = device.vibrate_motor_sequence(&[]).await;
        assert!(matches!(
            result,
            Err(Error::Haptics(HapticsError::EmptySequence))
        ));

        let mixed = [MotorFrame::zeros(4), MotorFrame::zeros(5)];
        assert!(device.vibrate_motor_sequence(&mixed).await.is_err());
        assert_eq!(device.transport().written().len(), 1);
    }

    #[tokio::test]
    async fn test_vibrate_illusion() {
        let device = device();
        device.vibrate_illusion(1.0, 0.5).await.unwrap();
        assert_eq!(
            device.transport().commands(),
            vec![Command::MotorsVibrate(vec![0, 180, 180, 0])]
        );

        let result = device.vibrate_illusion(1.0, 1.5).await;
        assert!(matches!(
            result,
            Err(Error::Haptics(HapticsError::LocationOutOfRange(_)))
        ));
    }

    #[tokio::test]
    async fn test_send_command_appends_crlf() {
        let device = device();
        device.send_command("config get").await.unwrap();
        device.send_command("device info\r\n").await.unwrap();
        device.send_command("audio stop\n").await.unwrap();
        assert_eq!(
            device.transport().lines(),
            vec!["config get\r\n", "device info\r\n", "audio stop\r\n"]
        );
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let device = device();
        device.transport().disconnect();
        let result = device.accept_developer_api_terms().await;
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Disconnected))
        ));

        // compound operation stops at the first failure
        let result = device.stop_audio().await;
        assert!(result.is_err());
        assert!(device.transport().written().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_error_propagates() {
        let device = device();
        device.transport().disconnect();

        let result = device.enable_notifications(Box::new(|_| {})).await;
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Disconnected))
        ));
        assert!(!device.transport().has_subscriber());
    }

    #[tokio::test]
    async fn test_set_transport() {
        let mut device = device();
        device.accept_developer_api_terms().await.unwrap();

        let old = device.set_transport(RecordingTransport::new());
        assert_eq!(old.lines(), vec!["accept\r\n"]);
        assert!(device.transport().written().is_empty());
    }
}
