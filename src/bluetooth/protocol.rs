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

//! Device CLI command lines and their wire encoding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::psychophysics::MotorFrame;

/// Terminator of every command line.
pub const LINE_ENDING: &str = "\r\n";

/// Commands understood by the device CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AuthAsDeveloper,
    Accept,
    AudioStart,
    AudioStop,
    BatterySoc,
    DeviceInfo,
    MotorsClearQueue,
    MotorsStart,
    MotorsStop,
    /// Raw intensity bytes of one or more concatenated frames.
    MotorsVibrate(Vec<u8>),
    /// Arbitrary command text.
    Raw(String),
}

impl Command {
    /// Vibrate command for a single frame.
    pub fn vibrate(frame: &MotorFrame) -> Self {
        Self::MotorsVibrate(frame.as_bytes().to_vec())
    }

    /// Vibrate command carrying several frames; the device queues them.
    pub fn vibrate_sequence(frames: &[MotorFrame]) -> Self {
        Self::MotorsVibrate(
            frames
                .iter()
                .flat_map(|frame| frame.as_bytes().iter().copied())
                .collect(),
        )
    }

    /// Command keyword without arguments.
    pub fn keyword(&self) -> &str {
        match self {
            Self::AuthAsDeveloper => "auth as developer",
            Self::Accept => "accept",
            Self::AudioStart => "audio start",
            Self::AudioStop => "audio stop",
            Self::BatterySoc => "device battery_soc",
            Self::DeviceInfo => "device info",
            Self::MotorsClearQueue => "motors clear_queue",
            Self::MotorsStart => "motors start",
            Self::MotorsStop => "motors stop",
            Self::MotorsVibrate(_) => "motors vibrate",
            Self::Raw(text) => text.trim_end_matches(['\r', '\n']),
        }
    }

    /// Full CRLF-terminated command line.
    pub fn to_line(&self) -> String {
        match self {
            Self::MotorsVibrate(bytes) => {
                format!("{} \"{}\"{}", self.keyword(), BASE64.encode(bytes), LINE_ENDING)
            }
            _ => format!("{}{}", self.keyword(), LINE_ENDING),
        }
    }

    /// Bytes written to the command characteristic.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_line().into_bytes()
    }

    /// Parse a command line. Unknown commands come back as [`Command::Raw`].
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let command = match line {
            "auth as developer" => Self::AuthAsDeveloper,
            "accept" => Self::Accept,
            "audio start" => Self::AudioStart,
            "audio stop" => Self::AudioStop,
            "device battery_soc" => Self::BatterySoc,
            "device info" => Self::DeviceInfo,
            "motors clear_queue" => Self::MotorsClearQueue,
            "motors start" => Self::MotorsStart,
            "motors stop" => Self::MotorsStop,
            _ => match line.strip_prefix("motors vibrate ") {
                Some(arg) => {
                    let encoded = arg.trim().trim_matches('"');
                    Self::MotorsVibrate(BASE64.decode(encoded).ok()?)
                }
                None => Self::Raw(line.to_string()),
            },
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lines() {
        assert_eq!(Command::AuthAsDeveloper.to_line(), "auth as developer\r\n");
        assert_eq!(Command::Accept.to_line(), "accept\r\n");
        assert_eq!(Command::AudioStart.to_line(), "audio start\r\n");
        assert_eq!(Command::AudioStop.to_line(), "audio stop\r\n");
        assert_eq!(Command::BatterySoc.to_line(), "device battery_soc\r\n");
        assert_eq!(Command::DeviceInfo.to_line(), "device info\r\n");
        assert_eq!(Command::MotorsClearQueue.to_line(), "motors clear_queue\r\n");
        assert_eq!(Command::MotorsStart.to_line(), "motors start\r\n");
        assert_eq!(Command::MotorsStop.to_line(), "motors stop\r\n");
    }

    #[test]
    fn test_vibrate_encoding() {
        let frame = MotorFrame::from([10, 20, 30, 40]);
        assert_eq!(
            Command::vibrate(&frame).to_bytes(),
            b"motors vibrate \"ChQeKA==\"\r\n".to_vec()
        );
        assert_eq!(
            Command::vibrate(&MotorFrame::zeros(4)).to_line(),
            "motors vibrate \"AAAAAA==\"\r\n"
        );
    }

    #[test]
    fn test_vibrate_sequence_concatenates() {
        let frames = [MotorFrame::from([1, 2, 3, 4]), MotorFrame::from([5, 6, 7, 8])];
        assert_eq!(
            Command::vibrate_sequence(&frames),
            Command::MotorsVibrate(vec![1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn test_raw_command_terminated_once() {
        assert_eq!(Command::Raw("device info".into()).to_line(), "device info\r\n");
        assert_eq!(
            Command::Raw("device info\r\n".into()).to_line(),
            "device info\r\n"
        );
        assert_eq!(Command::Raw("device info\n".into()).to_line(), "device info\r\n");
        assert_eq!(Command::Raw("device info\r".into()).to_line(), "device info\r\n");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("accept\r\n"), Some(Command::Accept));
        assert_eq!(
            Command::parse("motors vibrate \"ChQeKA==\"\r\n"),
            Some(Command::MotorsVibrate(vec![10, 20, 30, 40]))
        );
        assert_eq!(
            Command::parse("config get"),
            Some(Command::Raw("config get".into()))
        );
        assert_eq!(Command::parse("motors vibrate \"!!\""), None);
        assert_eq!(Command::parse("  \r\n"), None);
    }
}
