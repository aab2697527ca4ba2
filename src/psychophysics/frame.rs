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

//! Motor frame: one activation byte per actuator.

use std::ops::Index;

use crate::error::HapticsError;

/// Full vector of per-actuator intensities sent to the device in one command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MotorFrame {
    values: Vec<u8>,
}

impl MotorFrame {
    /// Create a frame from raw activation bytes.
    pub fn new(values: Vec<u8>) -> Self {
        Self { values }
    }

    /// All-zero frame for `num_motors` actuators.
    pub fn zeros(num_motors: usize) -> Self {
        Self {
            values: vec![0; num_motors],
        }
    }

    /// Build a frame from wider integers, rejecting anything outside [0, 255].
    pub fn from_values(values: &[i64]) -> Result<Self, HapticsError> {
        let values = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u8::try_from(value).map_err(|_| HapticsError::ValueOutOfRange { index, value })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        Ok(Self { values })
    }

    /// Number of actuators covered by this frame.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.values
    }

    /// Number of actuators with a non-zero activation.
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// Check that the frame fits a device with `num_motors` actuators.
    pub fn validate(&self, num_motors: usize) -> Result<(), HapticsError> {
        if self.values.len() != num_motors {
            return Err(HapticsError::LengthMismatch {
                expected: num_motors,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn set(&mut self, index: usize, value: u8) {
        self.values[index] = value;
    }
}

impl Index<usize> for MotorFrame {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.values[index]
    }
}

impl From<Vec<u8>> for MotorFrame {
    fn from(values: Vec<u8>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[u8; N]> for MotorFrame {
    fn from(values: [u8; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl From<MotorFrame> for Vec<u8> {
    fn from(frame: MotorFrame) -> Self {
        frame.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let frame = MotorFrame::zeros(4);
        assert_eq!(frame.as_bytes(), &[0, 0, 0, 0]);
        assert_eq!(frame.active_count(), 0);
    }

    #[test]
    fn test_from_values_rejects_out_of_range() {
        assert_eq!(
            MotorFrame::from_values(&[0, 128, 256, 3]),
            Err(HapticsError::ValueOutOfRange {
                index: 2,
                value: 256
            })
        );
        assert_eq!(
            MotorFrame::from_values(&[-1]),
            Err(HapticsError::ValueOutOfRange {
                index: 0,
                value: -1
            })
        );

        let frame = MotorFrame::from_values(&[0, 255, 17, 1]).unwrap();
        assert_eq!(frame.as_bytes(), &[0, 255, 17, 1]);
    }

    #[test]
    fn test_validate_length() {
        let frame = MotorFrame::from([1, 2, 3]);
        assert!(frame.validate(3).is_ok());
        assert_eq!(
            frame.validate(4),
            Err(HapticsError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
