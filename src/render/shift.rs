/*
 *  render/shift.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Burn-in avoidance - walks the frame origin around a small square
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

use embedded_graphics::prelude::Point;

pub const DEFAULT_MAX_SHIFT: i32 = 4;
pub const DEFAULT_SHIFT_STEP: i32 = 2;
pub const DEFAULT_SHIFT_INTERVAL: u32 = 60;

/// Direction the origin is currently drifting in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Right,
    Down,
    Left,
    Up,
}

impl ShiftDirection {
    /// Next leg of the square path
    pub fn next(self) -> Self {
        match self {
            ShiftDirection::Right => ShiftDirection::Down,
            ShiftDirection::Down => ShiftDirection::Left,
            ShiftDirection::Left => ShiftDirection::Up,
            ShiftDirection::Up => ShiftDirection::Right,
        }
    }

    fn delta(self, step: i32) -> (i32, i32) {
        match self {
            ShiftDirection::Right => (step, 0),
            ShiftDirection::Down => (0, step),
            ShiftDirection::Left => (-step, 0),
            ShiftDirection::Up => (0, -step),
        }
    }
}

/// Tunables for the drift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftParams {
    /// Offsets stay within +/- this many pixels on both axes
    pub max_shift: i32,
    /// Pixels moved per step
    pub step: i32,
    /// Cycles between steps
    pub interval: u32,
}

impl Default for ShiftParams {
    fn default() -> Self {
        Self {
            max_shift: DEFAULT_MAX_SHIFT,
            step: DEFAULT_SHIFT_STEP,
            interval: DEFAULT_SHIFT_INTERVAL,
        }
    }
}

/// What a call to [`ShiftState::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftEvent {
    /// Counting towards the next check
    Idle,
    /// Moved one step in the current direction
    Stepped,
    /// Hit the bound, now heading in the given direction
    Turned(ShiftDirection),
}

/// Origin offset for the whole frame.
///
/// Starts at (0,0) heading right. Every `interval` cycles the active axis
/// moves by `step`; a step that would leave the +/- `max_shift` square is
/// dropped and the direction turns instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftState {
    params: ShiftParams,
    dx: i32,
    dy: i32,
    direction: ShiftDirection,
    counter: u32,
}

impl ShiftState {
    pub fn new(params: ShiftParams) -> Self {
        Self {
            params,
            dx: 0,
            dy: 0,
            direction: ShiftDirection::Right,
            counter: 0,
        }
    }

    pub fn params(&self) -> &ShiftParams {
        &self.params
    }

    /// Current (dx, dy) as a point
    pub fn offset(&self) -> Point {
        Point::new(self.dx, self.dy)
    }

    pub fn direction(&self) -> ShiftDirection {
        self.direction
    }

    /// Cycles counted since the last check
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Count one cycle, stepping or turning when the interval is reached
    pub fn advance(&mut self) -> ShiftEvent {
        self.counter += 1;
        if self.counter < self.params.interval {
            return ShiftEvent::Idle;
        }
        self.counter = 0;

        let (ddx, ddy) = self.direction.delta(self.params.step);
        let (nx, ny) = (self.dx + ddx, self.dy + ddy);
        if nx.abs() > self.params.max_shift || ny.abs() > self.params.max_shift {
            self.direction = self.direction.next();
            ShiftEvent::Turned(self.direction)
        } else {
            self.dx = nx;
            self.dy = ny;
            ShiftEvent::Stepped
        }
    }
}

impl Default for ShiftState {
    fn default() -> Self {
        Self::new(ShiftParams::default())
    }
}
