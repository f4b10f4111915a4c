// Shared fixtures for the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use hamons::metrics::{AcquireError, ContainerStatus, Latency, MetricsSnapshot, MetricsSource};

/// cpu 45, temp 55.0, ram 50, swap 10, disk 70, one container up and one
/// down, 23 ms to the probe host
pub fn scenario_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        uptime: Duration::from_secs(3 * 86_400 + 4 * 3600 + 5 * 60 + 6),
        cpu_temp_c: 55.0,
        cpu_pct: 45.0,
        ram_pct: 50.0,
        swap_pct: 10.0,
        disk_pct: 70.0,
        containers: vec![
            ContainerStatus::new("homeassistant", "running"),
            ContainerStatus::new("hassio_supervisor", "exited"),
        ],
        latency: Some(Latency::Millis(23.0)),
    }
}

pub fn temperature_failure() -> AcquireError {
    AcquireError::MalformedTemperature {
        path: PathBuf::from("/sys/class/thermal/thermal_zone0/temp"),
        raw: String::new(),
    }
}

pub enum Step {
    Ready(MetricsSnapshot),
    Fail,
    /// Answer only after the given delay
    Slow(Duration, MetricsSnapshot),
}

/// Replays a fixed script, then keeps returning the scenario snapshot
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    pub calls: usize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps: steps.into(), calls: 0 }
    }

    pub fn steady() -> Self {
        Self::new(Vec::new())
    }
}

impl MetricsSource for ScriptedSource {
    async fn snapshot(&mut self) -> Result<MetricsSnapshot, AcquireError> {
        self.calls += 1;
        match self.steps.pop_front() {
            Some(Step::Ready(s)) => Ok(s),
            Some(Step::Fail) => Err(temperature_failure()),
            Some(Step::Slow(delay, s)) => {
                tokio::time::sleep(delay).await;
                Ok(s)
            }
            None => Ok(scenario_snapshot()),
        }
    }
}
