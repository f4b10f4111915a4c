/*
 *  render/heartbeat.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Liveness marker phase counter
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

pub const DEFAULT_ANIMATION_PERIOD: u32 = 10;

/// Frame index in `[0, period)` moving the heartbeat marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    phase: u32,
    period: u32,
}

impl AnimationState {
    /// A zero period is treated as 1 (marker never moves)
    pub fn new(period: u32) -> Self {
        Self { phase: 0, period: period.max(1) }
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Step to the next phase, wrapping at the period. Returns the new phase.
    pub fn advance(&mut self) -> u32 {
        self.phase = (self.phase + 1) % self.period;
        self.phase
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_PERIOD)
    }
}
