/*
 *  display/text.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Font selection and rendered text width
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

use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_7X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::renderer::TextRenderer;
use serde::{Deserialize, Serialize};

/// Font used for a text run.
///
/// Latin-1 variants so the degree sign renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRef {
    #[default]
    Small,
    Large,
}

impl FontRef {
    pub fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            FontRef::Small => &FONT_6X10,
            FontRef::Large => &FONT_7X13,
        }
    }

    /// Glyph cell height in pixels
    pub fn height(self) -> u32 {
        self.mono_font().character_size.height
    }
}

/// Rendered pixel width of a string
pub trait TextMeasure {
    fn width(&self, text: &str, font: FontRef) -> u32;
}

/// Measures with embedded-graphics mono font metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoTextMeasure;

impl TextMeasure for MonoTextMeasure {
    fn width(&self, text: &str, font: FontRef) -> u32 {
        // color plays no part in metrics
        let style = MonoTextStyle::new(font.mono_font(), BinaryColor::On);
        style
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
            .width
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn width(&self, text: &str, font: FontRef) -> u32 {
        (**self).width(text, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_widths() {
        let m = MonoTextMeasure;
        assert_eq!(m.width("", FontRef::Small), 0);
        assert_eq!(m.width("CPU", FontRef::Small), 18);
        assert_eq!(m.width("CPU", FontRef::Large), 21);
    }

    #[test]
    fn test_degree_sign_is_one_glyph() {
        let m = MonoTextMeasure;
        assert_eq!(m.width("55.0°C", FontRef::Small), 6 * 6);
    }

    #[test]
    fn test_font_heights() {
        assert_eq!(FontRef::Small.height(), 10);
        assert_eq!(FontRef::Large.height(), 13);
    }
}
