/*
 *  display/mod.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel abstraction, back buffer and drivers
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

// Core trait definitions
pub mod traits;
pub mod error;

// Off-screen drawing
pub mod color;
pub mod text;
pub mod vframebuf;
pub mod framebuffer;
pub mod surface;

pub mod drivers;
pub mod factory;

// Re-exports for convenience
pub use traits::{ColorDepth, DisplayCapabilities, DisplayDriver};
pub use error::DisplayError;
pub use color::{Color, Palette};
pub use text::{FontRef, MonoTextMeasure, TextMeasure};
pub use framebuffer::{FrameBuffer, Rotation};
pub use surface::{DisplaySurface, FramebufferSurface};
pub use factory::{BoxedDriver, DisplayDriverFactory};
