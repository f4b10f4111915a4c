/*
 *  render/frame.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Draw commands making up one refresh
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

use embedded_graphics::prelude::{Point, Size};

use crate::display::text::FontRef;
use super::tier::ColorTier;

/// How a primitive is colored. The surface's palette resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ink {
    /// Labels, separators and uncolored values
    Plain,
    /// Severity colored value
    Tier(ColorTier),
}

/// One positioned text run (top-left origin, top baseline)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub origin: Point,
    pub ink: Ink,
    pub font: FontRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Text(LayoutLine),
    FillRect {
        top_left: Point,
        size: Size,
        ink: Ink,
    },
}

/// Ordered draw list for a single refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { commands: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn push_text(&mut self, text: impl Into<String>, origin: Point, ink: Ink, font: FontRef) {
        self.commands.push(DrawCommand::Text(LayoutLine {
            text: text.into(),
            origin,
            ink,
            font,
        }));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Text runs only, in draw order
    pub fn lines(&self) -> impl Iterator<Item = &LayoutLine> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(line) => Some(line),
            _ => None,
        })
    }

    /// First text run with exactly this content
    pub fn find_text(&self, text: &str) -> Option<&LayoutLine> {
        self.lines().find(|l| l.text == text)
    }

    /// Top-left corner of every primitive, in draw order
    pub fn anchors(&self) -> Vec<Point> {
        self.commands
            .iter()
            .map(|c| match c {
                DrawCommand::Text(line) => line.origin,
                DrawCommand::FillRect { top_left, .. } => *top_left,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
