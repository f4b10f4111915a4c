/*
 *  display/drivers/mock.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display driver for running without hardware
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

use std::sync::{Arc, Mutex, MutexGuard};

use crate::display::error::DisplayError;
use crate::display::traits::{ColorDepth, DisplayCapabilities, DisplayDriver};

/// Mock display driver
///
/// Records every operation and keeps the last frame written so tests
/// (and `--driver mock` dry runs) can inspect what the panel would show.
#[derive(Debug, Clone)]
pub struct MockDriver {
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<MockDriverState>>,
}

/// Shared state, cloned out via [`MockDriver::state`]
#[derive(Debug, Default)]
pub struct MockDriverState {
    pub init_count: usize,
    pub write_count: usize,
    pub clear_count: usize,
    pub last_brightness: Option<u8>,
    pub last_invert: Option<bool>,
    pub is_initialized: bool,
    /// Last full frame received by write_buffer
    pub last_buffer: Vec<u8>,
    pub bytes_written: usize,

    pub simulate_write_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockDriverState {
    /// Rgb565 value at (x, y) of the last frame, if any
    pub fn pixel_rgb565(&self, width: u32, x: u32, y: u32) -> Option<u16> {
        let i = (y as usize * width as usize + x as usize) * 2;
        let hi = *self.last_buffer.get(i)?;
        let lo = *self.last_buffer.get(i + 1)?;
        Some(u16::from_be_bytes([hi, lo]))
    }

    /// Count of non-zero pixels in the last frame
    pub fn lit_pixels(&self, depth: ColorDepth) -> usize {
        match depth {
            ColorDepth::Monochrome => self
                .last_buffer
                .iter()
                .map(|b| b.count_ones() as usize)
                .sum(),
            ColorDepth::Rgb565 => self
                .last_buffer
                .chunks_exact(2)
                .filter(|px| px[0] != 0 || px[1] != 0)
                .count(),
        }
    }
}

impl MockDriver {
    /// 128x128 Rgb565, the SSD1351 geometry
    pub fn new() -> Self {
        Self::new_with_size(128, 128, ColorDepth::Rgb565)
    }

    pub fn new_with_size(width: u32, height: u32, color_depth: ColorDepth) -> Self {
        Self {
            capabilities: DisplayCapabilities {
                width,
                height,
                color_depth,
                supports_brightness: true,
                supports_invert: true,
            },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Handle on the shared state for inspection
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    // a panicked test thread must not wedge the others
    fn lock(&self) -> MutexGuard<'_, MockDriverState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("simulated init failure".to_string()));
        }
        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError> {
        self.lock().last_brightness = Some(value);
        Ok(())
    }

    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let expected = self
            .capabilities
            .color_depth
            .frame_bytes(self.capabilities.width, self.capabilities.height);
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }

        let mut state = self.lock();
        if state.simulate_write_failure {
            return Err(DisplayError::SpiError("simulated write failure".to_string()));
        }
        state.write_count += 1;
        state.bytes_written += buffer.len();
        state.last_buffer.clear();
        state.last_buffer.extend_from_slice(buffer);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lock().clear_count += 1;
        let caps = &self.capabilities;
        let blank = vec![0u8; caps.color_depth.frame_bytes(caps.width, caps.height)];
        self.write_buffer(&blank)
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.lock().last_invert = Some(inverted);
        Ok(())
    }
}
