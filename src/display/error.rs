/*
 *  display/error.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error types for display subsystem
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::error::Error;
use std::fmt;

/// Anything that can go wrong between a composed frame and the glass
#[derive(Debug)]
pub enum DisplayError {
    InitializationFailed(String),
    SpiError(String),
    /// DC or reset line, chip or line request
    GpioError(String),
    InvalidConfiguration(String),
    UnsupportedOperation,
    InvalidRotation(u16),
    /// Packed frame does not match the panel geometry
    BufferSizeMismatch { expected: usize, actual: usize },
    DrawingError(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) => write!(f, "panel bring-up failed: {}", msg),
            DisplayError::SpiError(msg) => write!(f, "SPI transfer failed: {}", msg),
            DisplayError::GpioError(msg) => write!(f, "GPIO line failed: {}", msg),
            DisplayError::InvalidConfiguration(msg) => write!(f, "bad panel configuration: {}", msg),
            DisplayError::UnsupportedOperation => write!(f, "panel does not support this operation"),
            DisplayError::InvalidRotation(degrees) => {
                write!(f, "rotation {} not one of 0, 90, 180, 270", degrees)
            }
            DisplayError::BufferSizeMismatch { expected, actual } => {
                write!(f, "frame is {} bytes, panel wants {}", actual, expected)
            }
            DisplayError::DrawingError(msg) => write!(f, "rasterizing frame: {}", msg),
        }
    }
}

impl Error for DisplayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DisplayError::BufferSizeMismatch { expected: 32768, actual: 10 }.to_string(),
            "frame is 10 bytes, panel wants 32768"
        );
        assert_eq!(
            DisplayError::InvalidRotation(45).to_string(),
            "rotation 45 not one of 0, 90, 180, 270"
        );
        assert_eq!(
            DisplayError::SpiError("EIO".into()).to_string(),
            "SPI transfer failed: EIO"
        );
    }
}
