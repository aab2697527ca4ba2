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

//! Transport abstraction between the command layer and the radio link.

use parking_lot::Mutex;
use std::borrow::Cow;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::ble_constants::RESPONSE_TX_UUID;
use super::protocol::Command;
use crate::error::TransportError;

/// A notification frame pushed by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Characteristic the frame arrived on.
    pub characteristic: Uuid,
    pub data: Vec<u8>,
}

impl Notification {
    pub fn new(characteristic: Uuid, data: Vec<u8>) -> Self {
        Self {
            characteristic,
            data,
        }
    }

    /// Payload as text (the device CLI answers in ASCII).
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

/// Callback receiving every notification after subscription.
pub type NotificationHandler = Box<dyn FnMut(Notification) + Send + 'static>;

/// Capability to talk to a connected device.
///
/// Writes go to the command characteristic; notifications from the response
/// characteristic are pushed to a single registered handler.
pub trait Transport: Send + Sync {
    /// Write raw bytes to the command characteristic.
    fn write(&self, data: &[u8]) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Register the notification handler and start notifications.
    fn subscribe(
        &self,
        handler: NotificationHandler,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn write(&self, data: &[u8]) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).write(data)
    }

    fn subscribe(
        &self,
        handler: NotificationHandler,
    ) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).subscribe(handler)
    }
}

/// In-memory transport that records writes and lets the caller inject
/// notifications.
#[derive(Default)]
pub struct RecordingTransport {
    written: Mutex<Vec<Vec<u8>>>,
    handler: Mutex<Option<NotificationHandler>>,
    disconnected: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write so far, in order.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().clone()
    }

    /// Writes decoded as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.written
            .lock()
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    /// Writes parsed back into commands.
    pub fn commands(&self) -> Vec<Command> {
        self.lines()
            .iter()
            .filter_map(|line| Command::parse(line))
            .collect()
    }

    pub fn clear(&self) {
        self.written.lock().clear();
    }

    /// Make subsequent operations fail with [`TransportError::Disconnected`].
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }

    pub fn reconnect(&self) {
        self.disconnected.store(false, Ordering::SeqCst);
    }

    pub fn has_subscriber(&self) -> bool {
        self.handler.lock().is_some()
    }

    /// Deliver a notification to the subscribed handler.
    ///
    /// Returns `false` when nobody is subscribed.
    pub fn notify(&self, data: &[u8]) -> bool {
        match self.handler.lock().as_mut() {
            Some(handler) => {
                handler(Notification::new(RESPONSE_TX_UUID, data.to_vec()));
                true
            }
            None => false,
        }
    }

    fn check_connected(&self) -> Result<(), TransportError> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(TransportError::Disconnected);
        }
        Ok(())
    }
}

impl Transport for RecordingTransport {
    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        self.check_connected()?;
        debug!("Recorded write: {} bytes", data.len());
        self.written.lock().push(data.to_vec());
        Ok(())
    }

    async fn subscribe(&self, handler: NotificationHandler) -> Result<(), TransportError> {
        self.check_connected()?;
        *self.handler.lock() = Some(handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_writes() {
        let transport = RecordingTransport::new();
        transport.write(b"accept\r\n").await.unwrap();
        transport.write(b"device info\r\n").await.unwrap();

        assert_eq!(transport.lines(), vec!["accept\r\n", "device info\r\n"]);
        assert_eq!(
            transport.commands(),
            vec![Command::Accept, Command::DeviceInfo]
        );

        transport.clear();
        assert!(transport.written().is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_write_fails() {
        let transport = RecordingTransport::new();
        transport.disconnect();

        let result = transport.write(b"accept\r\n").await;
        assert!(matches!(result, Err(TransportError::Disconnected)));
        assert!(transport.written().is_empty());

        transport.reconnect();
        assert!(transport.write(b"accept\r\n").await.is_ok());
    }

    #[tokio::test]
    async fn test_notifications_reach_handler() {
        let transport = RecordingTransport::new();
        assert!(!transport.notify(b"ignored"));

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        transport
            .subscribe(Box::new(move |n: Notification| {
                sink.lock().push(n.text().into_owned())
            }))
            .await
            .unwrap();

        assert!(transport.has_subscriber());
        assert!(transport.notify(b"battery 87\r\n"));
        assert_eq!(*received.lock(), vec!["battery 87\r\n".to_string()]);
    }
}
