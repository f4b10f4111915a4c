/*
 *  render/mod.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Status render engine - color policy, drift, heartbeat and page layout
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

pub mod tier;
pub mod shift;
pub mod heartbeat;
pub mod frame;
pub mod layout;

pub use tier::{ColorTier, container_status_tier, disk_tier, temperature_tier, utilization_tier};
pub use shift::{ShiftDirection, ShiftEvent, ShiftParams, ShiftState};
pub use heartbeat::AnimationState;
pub use frame::{DrawCommand, Frame, Ink, LayoutLine};
pub use layout::{LayoutConfig, LayoutEngine, LineValue, MarkerStyle, MetricLine, Token};
