/*
 *  metrics.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Per-cycle metrics snapshot and the source capability that produces it
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

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Status reported for a watched container the engine does not know
pub const CONTAINER_NOT_FOUND: &str = "Not Found";
/// Status reported when the container engine could not be asked
pub const CONTAINER_UNAVAILABLE: &str = "unavailable";
/// Rendered latency when the probe got no reply in time
pub const LATENCY_TIMEOUT: &str = "timeout";

/// Run state of one watched container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStatus {
    pub name: String,
    pub status: String,
}

impl ContainerStatus {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self { name: name.into(), status: status.into() }
    }
}

/// Round trip to the probe host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Latency {
    Millis(f64),
    Timeout,
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Latency::Millis(ms) => write!(f, "{:.0} ms", ms),
            Latency::Timeout => f.write_str(LATENCY_TIMEOUT),
        }
    }
}

/// One consistent set of readings for a single refresh.
///
/// Percentages are 0-100 but are not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub uptime: Duration,
    pub cpu_temp_c: f64,
    pub cpu_pct: f64,
    pub ram_pct: f64,
    pub swap_pct: f64,
    pub disk_pct: f64,
    pub containers: Vec<ContainerStatus>,
    /// `None` when no latency probe is configured
    pub latency: Option<Latency>,
}

/// A reading failed with no sentinel to fall back on; the cycle is dropped.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("temperature sensor {} unreadable: {source}", path.display())]
    Temperature {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("temperature sensor {} returned {raw:?}", path.display())]
    MalformedTemperature { path: PathBuf, raw: String },
    #[error("metric acquisition took longer than {0:?}")]
    Deadline(Duration),
}

/// Produces one snapshot per refresh cycle.
///
/// Individual readings fail soft (sentinels above); only readings without a
/// sentinel surface as [`AcquireError`].
#[allow(async_fn_in_trait)]
pub trait MetricsSource {
    async fn snapshot(&mut self) -> Result<MetricsSnapshot, AcquireError>;
}
