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

//! Buzz demo driver.
//!
//! Usage: buzz [pattern|illusion|info]

use anyhow::Result;
use std::env;
use std::time::Duration;
use tracing::{error, info};

use neosensory_buzz::bluetooth::{BleTransport, NeoDevice, Notification};
use neosensory_buzz::config::Config;
use neosensory_buzz::{logging, MotorFrame};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logging::init(&config.logging.level);

    info!("Starting buzz v{}...", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("illusion");
    if !matches!(mode, "pattern" | "illusion" | "info") {
        println!("Unknown mode: {}", mode);
        println!("Usage: buzz [pattern|illusion|info]");
        return Ok(());
    }

    let transport =
        BleTransport::connect(&config.device.name_filter, config.device.scan_timeout()).await?;
    let device = NeoDevice::with_profile(transport, config.device.profile());

    device
        .enable_notifications(Box::new(|n: Notification| {
            info!("Device: {}", n.text().trim_end());
        }))
        .await?;

    // Give the device a moment before the first command.
    tokio::time::sleep(Duration::from_secs(1)).await;

    device.request_developer_authorization().await?;
    device.accept_developer_api_terms().await?;

    if mode == "info" {
        device.get_device_info().await?;
        device.get_battery_level().await?;
        tokio::time::sleep(Duration::from_secs(2)).await;
        device.transport().disconnect().await?;
        return Ok(());
    }

    device.pause_device_algorithm().await?;

    let result = match mode {
        "pattern" => run_pattern(&device, &config).await,
        _ => run_illusion(&device, &config).await,
    };
    if let Err(e) = &result {
        error!("Demo stopped: {}", e);
    }

    if let Err(e) = device.stop_motors().await {
        error!("Failed to stop motors: {}", e);
    }
    if let Err(e) = device.resume_device_algorithm().await {
        error!("Failed to resume device algorithm: {}", e);
    }
    if let Err(e) = device.transport().disconnect().await {
        error!("Failed to disconnect: {}", e);
    }

    info!("buzz stopped");
    result
}

/// Rotate a rising value across the motors.
async fn run_pattern(device: &NeoDevice<BleTransport>, config: &Config) -> Result<()> {
    let num_motors = config.device.num_motors;
    anyhow::ensure!(num_motors > 0, "device.num_motors must be at least 1");
    let mut values = vec![0u8; num_motors];
    let mut index = 0;
    let mut value: u8 = 0;
    let mut interval = tokio::time::interval(config.illusion.frame_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                device.vibrate_motors(&MotorFrame::new(values.clone())).await?;
                index = (index + 1) % num_motors;
                value = ((u16::from(value) + 20) % 255) as u8;
                values[index] = value;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                return Ok(());
            }
        }
    }
}

/// Sweep an illusory point around the wrist.
async fn run_illusion(device: &NeoDevice<BleTransport>, config: &Config) -> Result<()> {
    let intensity = config.illusion.intensity;
    let step = config.illusion.location_step;
    let mut location: f64 = 0.0;
    let mut interval = tokio::time::interval(config.illusion.frame_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                device.vibrate_illusion(intensity, location).await?;
                location = (location + step).rem_euclid(1.0);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                return Ok(());
            }
        }
    }
}
