/*
 *  display/color.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel colors and the tier palette
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

use embedded_graphics::pixelcolor::{BinaryColor, Rgb565, Rgb888};

use crate::render::{ColorTier, Ink};

/// Color that adapts to the panel's pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Green,
    Amber,
    Red,
    /// Custom 8-bit per channel value
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn to_rgb888(&self) -> Rgb888 {
        match self {
            Color::Black => Rgb888::new(0, 0, 0),
            Color::White => Rgb888::new(255, 255, 255),
            Color::Green => Rgb888::new(0, 255, 0),
            Color::Amber => Rgb888::new(255, 191, 0),
            Color::Red => Rgb888::new(255, 0, 0),
            Color::Rgb(r, g, b) => Rgb888::new(*r, *g, *b),
        }
    }

    pub fn to_rgb565(&self) -> Rgb565 {
        Rgb565::from(self.to_rgb888())
    }

    /// Anything not black lights the pixel on a monochrome panel
    pub fn to_binary(&self) -> BinaryColor {
        match self {
            Color::Black | Color::Rgb(0, 0, 0) => BinaryColor::Off,
            _ => BinaryColor::On,
        }
    }
}

/// Maps frame inks to panel colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub plain: Color,
    pub nominal: Color,
    pub warning: Color,
    pub critical: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Black,
            plain: Color::White,
            nominal: Color::Green,
            warning: Color::Amber,
            critical: Color::Red,
        }
    }
}

impl Palette {
    pub fn resolve(&self, ink: Ink) -> Color {
        match ink {
            Ink::Plain => self.plain,
            Ink::Tier(ColorTier::Nominal) => self.nominal,
            Ink::Tier(ColorTier::Warning) => self.warning,
            Ink::Tier(ColorTier::Critical) => self.critical,
        }
    }
}
