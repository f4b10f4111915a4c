/*
 *  display/traits.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for display driver abstraction
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

use crate::display::error::DisplayError;

/// Pixel formats a panel accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    /// 1 bit per pixel, 8 pixels per byte (LSB first)
    Monochrome,

    /// 16 bit RGB565, 2 bytes per pixel (MSB first)
    /// Used by: SSD1351
    Rgb565,
}

impl ColorDepth {
    /// Bytes needed for a full frame of `width` x `height`
    pub fn frame_bytes(self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match self {
            ColorDepth::Monochrome => pixels.div_ceil(8),
            ColorDepth::Rgb565 => pixels * 2,
        }
    }
}

/// Display capabilities and metadata
#[derive(Debug, Clone)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Pixel format expected by write_buffer
    pub color_depth: ColorDepth,

    /// Whether the display supports brightness control
    pub supports_brightness: bool,

    /// Whether the display supports inversion
    pub supports_invert: bool,
}

/// Minimal hardware abstraction - all display drivers must implement this trait
///
/// A driver only ever receives complete frames through `write_buffer`;
/// composing happens off-screen so the panel never shows a partial frame.
pub trait DisplayDriver: Send {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Initialize the display hardware
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Set display brightness (0-255)
    fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError>;

    /// Push one full frame, packed per `capabilities().color_depth`
    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), DisplayError> {
        let caps = self.capabilities();
        let blank = vec![0u8; caps.color_depth.frame_bytes(caps.width, caps.height)];
        self.write_buffer(&blank)
    }

    /// Set display inversion (if supported)
    fn set_invert(&mut self, _inverted: bool) -> Result<(), DisplayError> {
        Err(DisplayError::UnsupportedOperation)
    }
}

impl<D: DisplayDriver + ?Sized> DisplayDriver for Box<D> {
    fn capabilities(&self) -> &DisplayCapabilities {
        (**self).capabilities()
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        (**self).init()
    }

    fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError> {
        (**self).set_brightness(value)
    }

    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        (**self).write_buffer(buffer)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        (**self).set_invert(inverted)
    }
}
