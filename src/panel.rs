/*
 *  panel.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Refresh loop: acquire, lay out, commit, sleep
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

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use thiserror::Error;
use tokio::time::{sleep, timeout};

use crate::config::PanelSettings;
use crate::display::error::DisplayError;
use crate::display::surface::DisplaySurface;
use crate::display::text::TextMeasure;
use crate::metrics::{AcquireError, MetricsSource};
use crate::pacer::Pacer;
use crate::render::heartbeat::AnimationState;
use crate::render::layout::LayoutEngine;
use crate::render::shift::{ShiftEvent, ShiftState};

/// Errors that end the refresh loop
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("display flush failed: {0}")]
    Flush(#[from] DisplayError),
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Frame committed to the panel
    Flushed { commands: usize },
    /// No snapshot this cycle, the panel keeps the previous frame
    Skipped(AcquireError),
}

/// Owns the panel state and drives one refresh per cycle
pub struct StatusPanel<S, D, M>
where
    S: MetricsSource,
    D: DisplaySurface,
    M: TextMeasure,
{
    source: S,
    surface: D,
    engine: LayoutEngine<M>,
    shift: ShiftState,
    animation: AnimationState,
    pacer: Pacer,
    acquire_deadline: Duration,
    cycles: u64,
}

impl<S, D, M> StatusPanel<S, D, M>
where
    S: MetricsSource,
    D: DisplaySurface,
    M: TextMeasure,
{
    pub fn new(source: S, surface: D, engine: LayoutEngine<M>, settings: &PanelSettings) -> Self {
        Self {
            source,
            surface,
            engine,
            shift: ShiftState::new(settings.shift),
            animation: AnimationState::new(settings.animation_period),
            pacer: Pacer::new(settings.pacing, settings.cycle_delay),
            acquire_deadline: settings.acquire_deadline,
            cycles: 0,
        }
    }

    pub fn shift(&self) -> &ShiftState { &self.shift }
    pub fn animation(&self) -> &AnimationState { &self.animation }
    pub fn surface(&self) -> &D { &self.surface }
    pub fn cycles(&self) -> u64 { self.cycles }

    /// One refresh.
    ///
    /// Shift and animation advance before acquisition so a skipped cycle
    /// still counts towards the next burn-in step. Only a flush failure is
    /// returned as an error.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        self.cycles += 1;
        match self.shift.advance() {
            ShiftEvent::Turned(direction) => debug!("burn-in shift now heading {:?}", direction),
            ShiftEvent::Stepped => debug!("burn-in shift offset {:?}", self.shift.offset()),
            ShiftEvent::Idle => {}
        }
        self.animation.advance();

        let started = Instant::now();
        let snapshot = match timeout(self.acquire_deadline, self.source.snapshot()).await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                warn!("cycle {} skipped: {}", self.cycles, e);
                return Ok(CycleOutcome::Skipped(e));
            }
            Err(_) => {
                let e = AcquireError::Deadline(self.acquire_deadline);
                warn!("cycle {} skipped: {}", self.cycles, e);
                return Ok(CycleOutcome::Skipped(e));
            }
        };
        let acquired = started.elapsed();

        let frame = self.engine.compose(&snapshot, self.shift.offset(), &self.animation);
        self.surface.commit(&frame).map_err(|e| {
            error!("cycle {} flush failed: {}", self.cycles, e);
            CycleError::Flush(e)
        })?;
        debug!(
            "cycle {} acquire {:?} flush {:?}",
            self.cycles,
            acquired,
            started.elapsed().saturating_sub(acquired)
        );
        Ok(CycleOutcome::Flushed { commands: frame.len() })
    }

    /// Refresh until a flush fails, or for `max_cycles` when given
    pub async fn run(&mut self, max_cycles: Option<u64>) -> Result<(), CycleError> {
        info!(
            "refresh every {:?} ({:?}), acquisition deadline {:?}",
            self.pacer.period(),
            self.pacer.pacing(),
            self.acquire_deadline
        );
        let mut remaining = max_cycles;
        loop {
            let cycle_start = Instant::now();
            self.run_cycle().await?;

            if let Some(n) = remaining.as_mut() {
                *n = n.saturating_sub(1);
                if *n == 0 {
                    return Ok(());
                }
            }

            let now = Instant::now();
            if let Some(late) = self.pacer.overrun(cycle_start, now) {
                debug!("cycle {} ran {:?} over its period", self.cycles, late);
            }
            sleep(self.pacer.pause(cycle_start, now)).await;
        }
    }

    /// Clear the panel
    pub fn blank(&mut self) -> Result<(), CycleError> {
        self.surface.blank()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockDriver;
    use crate::display::framebuffer::Rotation;
    use crate::display::surface::FramebufferSurface;
    use crate::display::text::MonoTextMeasure;
    use crate::metrics::{ContainerStatus, Latency, MetricsSnapshot};
    use crate::render::layout::LayoutConfig;
    use crate::config::Config;
    use std::path::PathBuf;

    struct Fixed(Option<MetricsSnapshot>);

    impl MetricsSource for Fixed {
        async fn snapshot(&mut self) -> Result<MetricsSnapshot, AcquireError> {
            self.0.clone().ok_or_else(|| AcquireError::MalformedTemperature {
                path: PathBuf::from("/tmp/temp"),
                raw: String::new(),
            })
        }
    }

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            uptime: Duration::from_secs(3600),
            cpu_temp_c: 50.0,
            cpu_pct: 10.0,
            ram_pct: 20.0,
            swap_pct: 0.0,
            disk_pct: 30.0,
            containers: vec![ContainerStatus::new("homeassistant", "running")],
            latency: Some(Latency::Millis(12.0)),
        }
    }

    fn panel(
        source: Fixed,
        driver: MockDriver,
    ) -> StatusPanel<Fixed, FramebufferSurface<MockDriver>, MonoTextMeasure> {
        let settings = Config::default().panel_settings();
        let engine = LayoutEngine::new(LayoutConfig::for_display(128, 128), MonoTextMeasure);
        StatusPanel::new(source, FramebufferSurface::new(driver, Rotation::Deg0), engine, &settings)
    }

    #[tokio::test]
    async fn test_cycle_flushes_once() {
        let driver = MockDriver::new();
        let state = driver.state();
        let mut panel = panel(Fixed(Some(snapshot())), driver);

        let outcome = panel.run_cycle().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::Flushed { commands } if commands > 0));
        assert_eq!(state.lock().unwrap().write_count, 1);
        assert_eq!(panel.animation().phase(), 1);
        assert_eq!(panel.shift().counter(), 1);
    }

    #[tokio::test]
    async fn test_failed_acquisition_skips_but_advances() {
        let driver = MockDriver::new();
        let state = driver.state();
        let mut panel = panel(Fixed(None), driver);

        let outcome = panel.run_cycle().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::Skipped(AcquireError::MalformedTemperature { .. })));
        assert_eq!(state.lock().unwrap().write_count, 0);
        assert_eq!(panel.animation().phase(), 1);
        assert_eq!(panel.shift().counter(), 1);
    }

    #[tokio::test]
    async fn test_flush_failure_is_fatal() {
        let driver = MockDriver::new();
        driver.state().lock().unwrap().simulate_write_failure = true;
        let mut panel = panel(Fixed(Some(snapshot())), driver);
        assert!(matches!(panel.run_cycle().await, Err(CycleError::Flush(_))));
        assert!(panel.run(None).await.is_err());
    }

    #[tokio::test]
    async fn test_run_bounded() {
        let driver = MockDriver::new();
        let state = driver.state();
        let mut panel = panel(Fixed(Some(snapshot())), driver);
        panel.run(Some(1)).await.unwrap();
        assert_eq!(panel.cycles(), 1);
        assert_eq!(state.lock().unwrap().write_count, 1);
    }
}
