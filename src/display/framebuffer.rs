/*
 *  display/framebuffer.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Back buffer with enum dispatch over the panel pixel format
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

use embedded_graphics::pixelcolor::{BinaryColor, IntoStorage, Rgb565};
use embedded_graphics::prelude::*;

use crate::display::color::Color;
use crate::display::error::DisplayError;
use crate::display::traits::ColorDepth;
use crate::display::vframebuf::VarFrameBuf;

/// Panel mounting rotation, applied while packing the back buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: u16) -> Result<Self, DisplayError> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(DisplayError::InvalidRotation(other)),
        }
    }

    /// Quarter turns swap the logical axes
    pub fn is_transposed(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Logical canvas size for a physical panel size
    pub fn logical_size(&self, physical: Size) -> Size {
        if self.is_transposed() {
            Size::new(physical.height, physical.width)
        } else {
            physical
        }
    }

    /// Logical pixel that lands on physical (px, py) of a pw x ph panel
    fn source(&self, px: usize, py: usize, pw: usize, ph: usize) -> (usize, usize) {
        match self {
            Rotation::Deg0 => (px, py),
            Rotation::Deg90 => (py, pw - 1 - px),
            Rotation::Deg180 => (pw - 1 - px, ph - 1 - py),
            Rotation::Deg270 => (ph - 1 - py, px),
        }
    }
}

/// Logical back buffer, one variant per supported color depth
pub enum FrameBuffer {
    /// 1-bit per pixel
    Mono(VarFrameBuf<BinaryColor>),
    /// 16-bit RGB 5-6-5
    Rgb(VarFrameBuf<Rgb565>),
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, depth: ColorDepth) -> Self {
        match depth {
            ColorDepth::Monochrome => {
                FrameBuffer::Mono(VarFrameBuf::new(width, height, BinaryColor::Off))
            }
            ColorDepth::Rgb565 => {
                FrameBuffer::Rgb(VarFrameBuf::new(width, height, Rgb565::BLACK))
            }
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            FrameBuffer::Mono(fb) => (fb.width() as u32, fb.height() as u32),
            FrameBuffer::Rgb(fb) => (fb.width() as u32, fb.height() as u32),
        }
    }

    pub fn color_depth(&self) -> ColorDepth {
        match self {
            FrameBuffer::Mono(_) => ColorDepth::Monochrome,
            FrameBuffer::Rgb(_) => ColorDepth::Rgb565,
        }
    }

    pub fn clear(&mut self, color: Color) {
        match self {
            FrameBuffer::Mono(fb) => fb.fill(color.to_binary()),
            FrameBuffer::Rgb(fb) => fb.fill(color.to_rgb565()),
        }
    }

    /// Pack for write_buffer() in panel order.
    ///
    /// Monochrome packs 8 pixels per byte, LSB first. Rgb565 emits two
    /// bytes per pixel, high byte first.
    pub fn to_packed_bytes(&self, rotation: Rotation) -> Vec<u8> {
        let (lw, lh) = self.dimensions();
        let (pw, ph) = if rotation.is_transposed() {
            (lh as usize, lw as usize)
        } else {
            (lw as usize, lh as usize)
        };
        let depth = self.color_depth();
        let mut bytes = vec![0u8; depth.frame_bytes(pw as u32, ph as u32)];

        for py in 0..ph {
            for px in 0..pw {
                let (lx, ly) = rotation.source(px, py, pw, ph);
                let i = py * pw + px;
                match self {
                    FrameBuffer::Mono(fb) => {
                        if fb.get(lx, ly).is_some_and(|c| c.is_on()) {
                            bytes[i / 8] |= 1 << (i % 8);
                        }
                    }
                    FrameBuffer::Rgb(fb) => {
                        if let Some(c) = fb.get(lx, ly) {
                            bytes[i * 2..i * 2 + 2].copy_from_slice(&c.into_storage().to_be_bytes());
                        }
                    }
                }
            }
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_rgb(fb: &mut FrameBuffer, x: i32, y: i32, c: Rgb565) {
        if let FrameBuffer::Rgb(inner) = fb {
            inner.draw_iter([Pixel(Point::new(x, y), c)]).unwrap();
        }
    }

    fn rgb_at(bytes: &[u8], pw: usize, x: usize, y: usize) -> u16 {
        let i = (y * pw + x) * 2;
        u16::from_be_bytes([bytes[i], bytes[i + 1]])
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0).unwrap(), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::Deg270);
        assert!(matches!(
            Rotation::from_degrees(45),
            Err(DisplayError::InvalidRotation(45))
        ));
    }

    #[test]
    fn test_rgb_packing_is_big_endian() {
        let mut fb = FrameBuffer::new(2, 1, ColorDepth::Rgb565);
        set_rgb(&mut fb, 0, 0, Rgb565::RED);
        let bytes = fb.to_packed_bytes(Rotation::Deg0);
        assert_eq!(bytes.len(), 4);
        assert_eq!(&bytes[0..2], &[0xF8, 0x00]);
        assert_eq!(&bytes[2..4], &[0x00, 0x00]);
    }

    #[test]
    fn test_rotation_180_mirrors_corner() {
        let mut fb = FrameBuffer::new(4, 3, ColorDepth::Rgb565);
        set_rgb(&mut fb, 0, 0, Rgb565::WHITE);
        let bytes = fb.to_packed_bytes(Rotation::Deg180);
        assert_eq!(rgb_at(&bytes, 4, 3, 2), 0xFFFF);
        assert_eq!(rgb_at(&bytes, 4, 0, 0), 0x0000);
    }

    #[test]
    fn test_rotation_90_transposes() {
        // logical 4 wide x 2 high lands on a 2 wide x 4 high panel
        let mut fb = FrameBuffer::new(4, 2, ColorDepth::Rgb565);
        set_rgb(&mut fb, 0, 0, Rgb565::WHITE);
        let bytes = fb.to_packed_bytes(Rotation::Deg90);
        assert_eq!(bytes.len(), 2 * 4 * 2);
        // logical top-left goes to the physical top-right
        assert_eq!(rgb_at(&bytes, 2, 1, 0), 0xFFFF);
        assert_eq!(rgb_at(&bytes, 2, 0, 0), 0x0000);
    }

    #[test]
    fn test_mono_packing_lsb_first() {
        let mut fb = FrameBuffer::new(8, 2, ColorDepth::Monochrome);
        if let FrameBuffer::Mono(inner) = &mut fb {
            inner.draw_iter([Pixel(Point::new(1, 0), BinaryColor::On)]).unwrap();
            inner.draw_iter([Pixel(Point::new(7, 1), BinaryColor::On)]).unwrap();
        }
        assert_eq!(fb.to_packed_bytes(Rotation::Deg0), vec![0b0000_0010, 0b1000_0000]);
    }
}
