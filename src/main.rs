/*
 *  main.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Startup wiring, signal handling and shutdown
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

use anyhow::Context;
use env_logger::Env;
use log::{error, info, warn};
use tokio::signal::unix::{signal, SignalKind};

use hamons::collector::HostCollector;
use hamons::config::{self, Config};
use hamons::display::{
    BoxedDriver, DisplayDriverFactory, DisplaySurface, FramebufferSurface, MonoTextMeasure, Rotation,
};
use hamons::panel::StatusPanel;
use hamons::render::LayoutEngine;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

type Panel = StatusPanel<HostCollector, FramebufferSurface<BoxedDriver>, MonoTextMeasure>;

/// Waits for SIGINT, SIGTERM or SIGHUP and logs which one arrived.
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

/// Resolves once a shutdown signal arrives; never when signals cannot be hooked
async fn shutdown_requested() {
    if let Err(e) = signal_handler().await {
        warn!("signal handling unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Open the panel and the probes, then blank the panel
fn bring_up(cfg: &Config) -> anyhow::Result<Panel> {
    let display = cfg.display_config();
    let settings = cfg.panel_settings();
    let watch = cfg.watch_settings();

    let rotation = Rotation::from_degrees(display.rotate_deg.unwrap_or(0))
        .context("display rotation")?;
    let driver = DisplayDriverFactory::create_from_config(&display)
        .context("creating display driver")?;
    let mut surface = FramebufferSurface::new(driver, rotation);
    surface
        .bring_up(display.brightness, display.invert)
        .context("initializing display")?;
    surface.blank().context("clearing display")?;

    let size = surface.size();
    let engine = LayoutEngine::new(settings.layout_for(size.width, size.height), MonoTextMeasure);

    info!(
        "watching containers {:?}, latency to {}",
        watch.containers,
        if settings.show_latency { watch.ping_host.as_str() } else { "(off)" }
    );
    let collector = HostCollector::from_settings(&watch, settings.show_latency);

    Ok(StatusPanel::new(collector, surface, engine, &settings))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (cfg, cli) = config::load()?;

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("This is {}, status at a glance", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let mut panel = bring_up(&cfg)?;
    let max_cycles = cli.once.then_some(1);

    let outcome = tokio::select! {
        result = panel.run(max_cycles) => result,
        _ = shutdown_requested() => Ok(()),
    };

    if let Err(e) = outcome {
        error!("{}, exiting for a restart", e);
        std::process::exit(1);
    }

    info!("Main application exiting. Clearing display.");
    if let Err(e) = panel.blank() {
        warn!("could not clear display on exit: {}", e);
    }
    Ok(())
}
