/*
 *  collector/mod.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Live metrics source for the panel
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

pub mod docker;
pub mod host;
pub mod ping;

use std::time::Instant;

use log::debug;

use crate::config::WatchSettings;
use crate::metrics::{AcquireError, MetricsSnapshot, MetricsSource};

pub use docker::ContainerProbe;
pub use host::HostProbe;
pub use ping::LatencyProbe;

/// Reads this host, its containers and the network path.
///
/// The thermal zone is the one reading without a sentinel, so it is taken
/// first and a failure there drops the whole snapshot.
pub struct HostCollector {
    host: HostProbe,
    containers: ContainerProbe,
    latency: Option<LatencyProbe>,
}

impl HostCollector {
    pub fn new(host: HostProbe, containers: ContainerProbe, latency: Option<LatencyProbe>) -> Self {
        Self { host, containers, latency }
    }

    pub fn from_settings(watch: &WatchSettings, show_latency: bool) -> Self {
        let latency = show_latency.then(|| LatencyProbe::new(watch.ping_host.clone(), watch.ping_timeout));
        Self::new(
            HostProbe::new(watch.thermal_zone.clone(), watch.disk_mount.clone()),
            ContainerProbe::new(watch.containers.clone(), watch.docker_timeout),
            latency,
        )
    }
}

impl MetricsSource for HostCollector {
    async fn snapshot(&mut self) -> Result<MetricsSnapshot, AcquireError> {
        let started = Instant::now();
        let cpu_temp_c = self.host.cpu_temperature()?;
        let uptime = self.host.uptime();
        let cpu_pct = self.host.cpu_percent();
        let (ram_pct, swap_pct) = self.host.memory_percent();
        let disk_pct = self.host.disk_percent();

        // slow probes run side by side, each bounded by its own timeout
        let (containers, latency) = tokio::join!(self.containers.statuses(), async {
            match &self.latency {
                Some(probe) => Some(probe.measure().await),
                None => None,
            }
        });

        debug!("snapshot acquired in {:?}", started.elapsed());
        Ok(MetricsSnapshot {
            uptime,
            cpu_temp_c,
            cpu_pct,
            ram_pct,
            swap_pct,
            disk_pct,
            containers,
            latency,
        })
    }
}
