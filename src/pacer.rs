/*
 *  pacer.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Sleep between refresh cycles
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
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How the pause after a cycle is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Full period after every cycle; slow probes stretch the cadence
    #[default]
    FixedDelay,
    /// Period measured from cycle start; a late cycle is followed immediately
    FixedPeriod,
}

#[derive(Debug, Clone)]
pub struct Pacer {
    pacing: Pacing,
    period: Duration,
}

impl Pacer {
    pub fn new(pacing: Pacing, period: Duration) -> Self {
        Self { pacing, period }
    }

    pub fn period(&self) -> Duration { self.period }
    pub fn pacing(&self) -> Pacing { self.pacing }

    /// Time to sleep before the next cycle
    #[inline]
    pub fn pause(&self, cycle_start: Instant, now: Instant) -> Duration {
        match self.pacing {
            Pacing::FixedDelay => self.period,
            Pacing::FixedPeriod => (cycle_start + self.period).saturating_duration_since(now),
        }
    }

    /// How far a cycle ran past its period, if it did
    pub fn overrun(&self, cycle_start: Instant, now: Instant) -> Option<Duration> {
        let spent = now.saturating_duration_since(cycle_start);
        spent.checked_sub(self.period).filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_ignores_cycle_cost() {
        let pacer = Pacer::new(Pacing::FixedDelay, Duration::from_secs(1));
        let start = Instant::now();
        let now = start + Duration::from_millis(700);
        assert_eq!(pacer.pause(start, now), Duration::from_secs(1));
    }

    #[test]
    fn test_fixed_period_subtracts_cycle_cost() {
        let pacer = Pacer::new(Pacing::FixedPeriod, Duration::from_secs(1));
        let start = Instant::now();
        assert_eq!(pacer.pause(start, start + Duration::from_millis(300)), Duration::from_millis(700));
        // late cycle, go again straight away
        assert_eq!(pacer.pause(start, start + Duration::from_millis(1500)), Duration::ZERO);
    }

    #[test]
    fn test_overrun() {
        let pacer = Pacer::new(Pacing::FixedPeriod, Duration::from_secs(1));
        let start = Instant::now();
        assert_eq!(pacer.overrun(start, start + Duration::from_millis(999)), None);
        assert_eq!(pacer.overrun(start, start + Duration::from_secs(1)), None);
        assert_eq!(
            pacer.overrun(start, start + Duration::from_millis(1250)),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_pacing_serde_names() {
        let p: Pacing = serde_yaml::from_str("fixed_period").unwrap();
        assert_eq!(p, Pacing::FixedPeriod);
        assert_eq!(serde_yaml::to_string(&Pacing::FixedDelay).unwrap().trim(), "fixed_delay");
    }
}
