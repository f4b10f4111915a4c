/*
 *  display/vframebuf.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime-sized back buffer for embedded-graphics
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Row-major pixel store; writes outside the canvas are dropped
#[derive(Debug, Clone)]
pub struct VarFrameBuf<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

impl<C: PixelColor> VarFrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[C] { &self.buf }

    pub fn fill(&mut self, color: C) {
        self.buf.fill(color);
    }

    /// Pixel at (x,y), None when off canvas
    pub fn get(&self, x: usize, y: usize) -> Option<C> {
        if x < self.w && y < self.h {
            Some(self.buf[y * self.w + x])
        } else {
            None
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl<C: PixelColor> OriginDimensions for VarFrameBuf<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor> DrawTarget for VarFrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // colors arrive in row-major order over the whole area, clip each point
        for (p, c) in area.points().zip(colors) {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        if let Some(bottom_right) = clipped.bottom_right() {
            let (x0, x1) = (clipped.top_left.x as usize, bottom_right.x as usize);
            for y in clipped.top_left.y as usize..=bottom_right.y as usize {
                let row = y * self.w;
                self.buf[row + x0..=row + x1].fill(color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_out_of_bounds_dropped() {
        let mut fb = VarFrameBuf::new(4, 4, BinaryColor::Off);
        let pixels = [
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(4, 0), BinaryColor::On),
            Pixel(Point::new(1, 1), BinaryColor::On),
        ];
        fb.draw_iter(pixels).unwrap();
        assert_eq!(fb.as_slice().iter().filter(|c| c.is_on()).count(), 1);
        assert_eq!(fb.get(1, 1), Some(BinaryColor::On));
    }

    #[test]
    fn test_fill_contiguous_clips_partial_area() {
        let mut fb = VarFrameBuf::new(4, 4, BinaryColor::Off);
        // 3x2 area hanging off the right edge by one column
        let area = Rectangle::new(Point::new(2, 1), Size::new(3, 2));
        fb.fill_contiguous(&area, core::iter::repeat(BinaryColor::On)).unwrap();
        assert_eq!(fb.get(2, 1), Some(BinaryColor::On));
        assert_eq!(fb.get(3, 2), Some(BinaryColor::On));
        // nothing wrapped onto the next row
        assert_eq!(fb.get(0, 2), Some(BinaryColor::Off));
        assert_eq!(fb.get(0, 3), Some(BinaryColor::Off));
        assert_eq!(fb.as_slice().iter().filter(|c| c.is_on()).count(), 4);
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut fb = VarFrameBuf::new(8, 8, BinaryColor::Off);
        Rectangle::new(Point::new(6, 6), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.as_slice().iter().filter(|c| c.is_on()).count(), 4);
    }
}
