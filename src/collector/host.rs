/*
 *  collector/host.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host readings: uptime, thermal zone, cpu, memory, disk
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

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use sysinfo::{Disks, System};

use crate::metrics::AcquireError;

/// Kernel thermal zones report millidegrees Celsius
pub fn parse_millidegrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<i64>().ok().map(|m| m as f64 / 1000.0)
}

/// Read one thermal zone file as degrees Celsius
pub fn read_temperature(path: &Path) -> Result<f64, AcquireError> {
    let raw = fs::read_to_string(path).map_err(|source| AcquireError::Temperature {
        path: path.to_path_buf(),
        source,
    })?;
    parse_millidegrees(&raw).ok_or_else(|| AcquireError::MalformedTemperature {
        path: path.to_path_buf(),
        raw: raw.trim().to_string(),
    })
}

/// `used` as a percentage of `total`, 0 for an empty total
pub fn percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

pub struct HostProbe {
    sys: System,
    disks: Disks,
    thermal_zone: PathBuf,
    disk_mount: PathBuf,
}

impl HostProbe {
    pub fn new(thermal_zone: PathBuf, disk_mount: PathBuf) -> Self {
        let mut sys = System::new();
        // first sample is the baseline for the next usage delta
        sys.refresh_cpu_usage();
        Self {
            sys,
            disks: Disks::new_with_refreshed_list(),
            thermal_zone,
            disk_mount,
        }
    }

    pub fn uptime(&self) -> Duration {
        Duration::from_secs(System::uptime())
    }

    pub fn cpu_temperature(&self) -> Result<f64, AcquireError> {
        read_temperature(&self.thermal_zone)
    }

    /// Usage since the previous call
    pub fn cpu_percent(&mut self) -> f64 {
        self.sys.refresh_cpu_usage();
        self.sys.global_cpu_usage() as f64
    }

    /// (ram %, swap %)
    pub fn memory_percent(&mut self) -> (f64, f64) {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let used = total.saturating_sub(self.sys.available_memory());
        (
            percent(used, total),
            percent(self.sys.used_swap(), self.sys.total_swap()),
        )
    }

    /// Usage of the filesystem holding the configured mount point
    pub fn disk_percent(&mut self) -> f64 {
        self.disks.refresh(false);
        // deepest mount point that contains the target
        let disk = self
            .disks
            .list()
            .iter()
            .filter(|d| self.disk_mount.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().components().count());
        match disk {
            Some(d) => {
                let total = d.total_space();
                let used = total.saturating_sub(d.available_space());
                debug!("disk {} {}/{} bytes", d.mount_point().display(), used, total);
                percent(used, total)
            }
            None => {
                warn!("no filesystem found for {}", self.disk_mount.display());
                0.0
            }
        }
    }
}
