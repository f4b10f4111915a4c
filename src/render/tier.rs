/*
 *  render/tier.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Severity tiers - maps metric readings to nominal/warning/critical
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

/// Severity classification that drives text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTier {
    Nominal,
    Warning,
    Critical,
}

/// CPU temperature (°C) at which the reading turns to warning
pub const TEMP_WARNING_C: f64 = 60.0;
/// CPU temperature (°C) at which the reading turns critical
pub const TEMP_CRITICAL_C: f64 = 70.0;
/// Utilization (%) above which the reading turns to warning
pub const UTIL_WARNING_PCT: f64 = 60.0;
/// Utilization (%) at which the reading turns critical
pub const UTIL_CRITICAL_PCT: f64 = 80.0;
/// Disk fill (%) above which the reading turns to warning
pub const DISK_WARNING_PCT: f64 = 80.0;
/// Disk fill (%) at which the reading turns critical
pub const DISK_CRITICAL_PCT: f64 = 90.0;

/// Tier for a CPU temperature in Celsius.
///
/// 60°C itself is already a warning.
pub fn temperature_tier(celsius: f64) -> ColorTier {
    if celsius >= TEMP_CRITICAL_C {
        ColorTier::Critical
    } else if celsius >= TEMP_WARNING_C {
        ColorTier::Warning
    } else {
        ColorTier::Nominal
    }
}

/// Tier for a utilization percentage (cpu, ram, swap).
///
/// Unlike temperature, exactly 60% is still nominal. Values outside
/// 0..=100 are classified as-is.
pub fn utilization_tier(percent: f64) -> ColorTier {
    if percent >= UTIL_CRITICAL_PCT {
        ColorTier::Critical
    } else if percent > UTIL_WARNING_PCT {
        ColorTier::Warning
    } else {
        ColorTier::Nominal
    }
}

/// Tier for a filesystem fill percentage.
///
/// Same shape as [`utilization_tier`], shifted up: a 70% full root
/// filesystem is normal.
pub fn disk_tier(percent: f64) -> ColorTier {
    if percent >= DISK_CRITICAL_PCT {
        ColorTier::Critical
    } else if percent > DISK_WARNING_PCT {
        ColorTier::Warning
    } else {
        ColorTier::Nominal
    }
}

/// Tier for a container run-state string as reported by the engine.
pub fn container_status_tier(status: &str) -> ColorTier {
    match status {
        "running" => ColorTier::Nominal,
        "exited" | "stopped" => ColorTier::Critical,
        _ => ColorTier::Warning,
    }
}
