/*
 *  display/surface.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Rasterizes a frame off-screen and commits it in one write
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

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use log::{debug, info};

use crate::display::color::{Color, Palette};
use crate::display::error::DisplayError;
use crate::display::framebuffer::{FrameBuffer, Rotation};
use crate::display::traits::DisplayDriver;
use crate::render::frame::{DrawCommand, Frame};

/// Where composed frames go.
///
/// `commit` either shows the whole frame or fails; a partial frame is
/// never visible.
pub trait DisplaySurface {
    /// Logical drawing area, after rotation
    fn size(&self) -> Size;

    fn commit(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Clear the panel to the background
    fn blank(&mut self) -> Result<(), DisplayError>;
}

/// Back buffer in front of a panel driver
pub struct FramebufferSurface<D: DisplayDriver> {
    driver: D,
    back: FrameBuffer,
    rotation: Rotation,
    palette: Palette,
}

impl<D: DisplayDriver> FramebufferSurface<D> {
    pub fn new(driver: D, rotation: Rotation) -> Self {
        let caps = driver.capabilities();
        let logical = rotation.logical_size(Size::new(caps.width, caps.height));
        let back = FrameBuffer::new(logical.width, logical.height, caps.color_depth);
        Self { driver, back, rotation, palette: Palette::default() }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Initialize the panel and apply the optional startup settings
    pub fn bring_up(&mut self, brightness: Option<u8>, invert: Option<bool>) -> Result<(), DisplayError> {
        self.driver.init()?;
        if let Some(level) = brightness {
            if self.driver.capabilities().supports_brightness {
                self.driver.set_brightness(level)?;
            }
        }
        if let Some(invert) = invert {
            if self.driver.capabilities().supports_invert {
                self.driver.set_invert(invert)?;
            }
        }
        let (w, h) = self.back.dimensions();
        info!("Panel ready, {}x{} logical, rotation {:?}", w, h, self.rotation);
        Ok(())
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn rasterize(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.back.clear(self.palette.background);
        let palette = self.palette;
        match &mut self.back {
            FrameBuffer::Mono(fb) => draw_frame(fb, frame, &palette, |c: Color| c.to_binary()),
            FrameBuffer::Rgb(fb) => draw_frame(fb, frame, &palette, |c: Color| c.to_rgb565()),
        }
    }
}

fn draw_frame<T, C>(
    target: &mut T,
    frame: &Frame,
    palette: &Palette,
    convert: impl Fn(Color) -> C,
) -> Result<(), DisplayError>
where
    T: DrawTarget<Color = C>,
    C: PixelColor,
    T::Error: core::fmt::Debug,
{
    for command in frame {
        match command {
            DrawCommand::Text(line) => {
                let style = MonoTextStyle::new(line.font.mono_font(), convert(palette.resolve(line.ink)));
                Text::with_baseline(&line.text, line.origin, style, Baseline::Top)
                    .draw(target)
                    .map_err(|e| DisplayError::DrawingError(format!("{:?}", e)))?;
            }
            DrawCommand::FillRect { top_left, size, ink } => {
                Rectangle::new(*top_left, *size)
                    .into_styled(PrimitiveStyle::with_fill(convert(palette.resolve(*ink))))
                    .draw(target)
                    .map_err(|e| DisplayError::DrawingError(format!("{:?}", e)))?;
            }
        }
    }
    Ok(())
}

impl<D: DisplayDriver> DisplaySurface for FramebufferSurface<D> {
    fn size(&self) -> Size {
        let (w, h) = self.back.dimensions();
        Size::new(w, h)
    }

    fn commit(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.rasterize(frame)?;
        let bytes = self.back.to_packed_bytes(self.rotation);
        debug!("commit {} commands, {} bytes", frame.len(), bytes.len());
        self.driver.write_buffer(&bytes)
    }

    fn blank(&mut self) -> Result<(), DisplayError> {
        self.back.clear(self.palette.background);
        self.driver.clear()
    }
}
