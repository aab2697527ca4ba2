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

//! BlueZ-backed transport: discovery, connection and characteristic access.

use bluer::gatt::remote::Characteristic;
use bluer::{Adapter, AdapterEvent, Address, Device, Session};
use futures::{pin_mut, StreamExt};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use super::ble_constants::{COMMAND_RX_UUID, RESPONSE_TX_UUID};
use super::transport::{Notification, NotificationHandler, Transport};
use crate::error::TransportError;

/// Connection to a Neosensory device through the default Bluetooth adapter.
pub struct BleTransport {
    _session: Session,
    device: Device,
    command_rx: Characteristic,
    response_tx: Characteristic,
    notify_task: Mutex<Option<JoinHandle<()>>>,
}

impl BleTransport {
    /// Scan for a device whose name contains `name_filter` and connect to it.
    pub async fn connect(name_filter: &str, scan_timeout: Duration) -> Result<Self, TransportError> {
        let session = Session::new().await?;
        info!("BlueZ session created");

        let adapter = session.default_adapter().await?;
        info!("Using Bluetooth adapter: {}", adapter.name());

        if !adapter.is_powered().await? {
            info!("Powering on Bluetooth adapter...");
            adapter.set_powered(true).await?;
        }

        info!("Scanning for '{}'...", name_filter);
        let device = tokio::time::timeout(scan_timeout, find_device(&adapter, name_filter))
            .await
            .map_err(|_| TransportError::ScanTimeout)??;

        Self::attach(session, device).await
    }

    /// Connect to a known device address.
    pub async fn connect_address(address: Address) -> Result<Self, TransportError> {
        let session = Session::new().await?;
        let adapter = session.default_adapter().await?;
        let device = adapter.device(address)?;
        Self::attach(session, device).await
    }

    async fn attach(session: Session, device: Device) -> Result<Self, TransportError> {
        if !device.is_connected().await? {
            info!("Connecting to {}...", device.address());
            device.connect().await?;
        }
        info!("Connected to {}", device.address());

        let command_rx = find_characteristic(&device, COMMAND_RX_UUID).await?;
        let response_tx = find_characteristic(&device, RESPONSE_TX_UUID).await?;
        debug!("Command and response characteristics resolved");

        Ok(Self {
            _session: session,
            device,
            command_rx,
            response_tx,
            notify_task: Mutex::new(None),
        })
    }

    pub fn address(&self) -> Address {
        self.device.address()
    }

    pub async fn is_connected(&self) -> Result<bool, TransportError> {
        Ok(self.device.is_connected().await?)
    }

    /// Stop notifications and drop the link.
    pub async fn disconnect(&self) -> Result<(), TransportError> {
        if let Some(task) = self.notify_task.lock().take() {
            task.abort();
        }
        self.device.disconnect().await?;
        info!("Disconnected from {}", self.device.address());
        Ok(())
    }
}

impl Transport for BleTransport {
    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        self.command_rx.write(data).await?;
        Ok(())
    }

    async fn subscribe(&self, mut handler: NotificationHandler) -> Result<(), TransportError> {
        let stream = self.response_tx.notify().await?;

        let task = tokio::spawn(async move {
            pin_mut!(stream);
            while let Some(data) = stream.next().await {
                debug!("Notification: {} bytes", data.len());
                handler(Notification::new(RESPONSE_TX_UUID, data));
            }
            info!("Notification stream ended");
        });

        if let Some(previous) = self.notify_task.lock().replace(task) {
            previous.abort();
        }
        info!("Subscribed to {}", RESPONSE_TX_UUID);
        Ok(())
    }
}

impl Drop for BleTransport {
    fn drop(&mut self) {
        if let Some(task) = self.notify_task.lock().take() {
            task.abort();
        }
    }
}

/// Wait for a discovered device whose name contains `name_filter`.
async fn find_device(adapter: &Adapter, name_filter: &str) -> Result<Device, TransportError> {
    let events = adapter.discover_devices().await?;
    pin_mut!(events);

    while let Some(event) = events.next().await {
        if let AdapterEvent::DeviceAdded(address) = event {
            let device = adapter.device(address)?;
            if let Some(name) = device.name().await? {
                debug!("Discovered {} ({})", name, address);
                if name.contains(name_filter) {
                    info!("Found {} at {}", name, address);
                    return Ok(device);
                }
            }
        }
    }

    Err(TransportError::DeviceNotFound(name_filter.to_string()))
}

async fn find_characteristic(device: &Device, uuid: Uuid) -> Result<Characteristic, TransportError> {
    for service in device.services().await? {
        for characteristic in service.characteristics().await? {
            if characteristic.uuid().await? == uuid {
                return Ok(characteristic);
            }
        }
    }
    Err(TransportError::CharacteristicNotFound(uuid))
}
