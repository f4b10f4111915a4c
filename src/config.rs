/*
 *  config.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Defaults, YAML file and CLI overrides, layered and validated
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

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::drivers::ssd1351::{SSD1351_HEIGHT, SSD1351_WIDTH};
use crate::display::text::FontRef;
use crate::pacer::Pacing;
use crate::render::layout::{DEFAULT_MARGIN, LayoutConfig, MarkerStyle};
use crate::render::heartbeat::DEFAULT_ANIMATION_PERIOD;
use crate::render::shift::{DEFAULT_MAX_SHIFT, DEFAULT_SHIFT_INTERVAL, DEFAULT_SHIFT_STEP, ShiftParams};

pub const DEFAULT_CYCLE_DELAY_MS: u64 = 1000;
pub const DEFAULT_ACQUIRE_DEADLINE_MS: u64 = 5000;
pub const DEFAULT_DOCKER_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_PING_HOST: &str = "8.8.8.8";
pub const DEFAULT_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";
pub const DEFAULT_DISK_MOUNT: &str = "/";
pub const DEFAULT_CONTAINERS: [&str; 2] = ["homeassistant", "hassio_supervisor"];

pub const DEFAULT_SPI_BUS: &str = "/dev/spidev0.0";
pub const DEFAULT_SPI_SPEED_HZ: u32 = 8_000_000;
pub const DEFAULT_GPIO_CHIP: &str = "/dev/gpiochip0";
pub const DEFAULT_DC_PIN: u32 = 24;
pub const DEFAULT_RST_PIN: u32 = 25;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration, every field optional so layers can merge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
    pub panel: Option<PanelConfig>,
    pub watch: Option<WatchConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub rotate_deg: Option<u16>,
    pub invert: Option<bool>,
    pub brightness: Option<u8>,     // 0-255
    pub driver: Option<DriverKind>,
    pub bus: Option<BusConfig>,
}

/// Cycle pacing, burn-in shift and layout options
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PanelConfig {
    pub cycle_delay_ms: Option<u64>,
    pub pacing: Option<Pacing>,
    pub acquire_deadline_ms: Option<u64>,
    pub margin: Option<i32>,
    pub max_shift: Option<i32>,
    pub shift_step: Option<i32>,
    pub shift_interval: Option<u32>,
    pub animation_period: Option<u32>,
    pub marker: Option<MarkerStyle>,
    pub font: Option<FontRef>,
    pub show_latency: Option<bool>,
}

/// What gets probed each cycle
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WatchConfig {
    pub containers: Option<Vec<String>>,
    pub docker_timeout_ms: Option<u64>,
    pub ping_host: Option<String>,
    pub ping_timeout_ms: Option<u64>,
    pub thermal_zone: Option<PathBuf>,
    pub disk_mount: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BusConfig {
    Spi {
        bus: String,               // e.g. "/dev/spidev0.0"
        speed_hz: Option<u32>,
        dc_pin: u32,               // line offset on gpio_chip
        rst_pin: u32,
        gpio_chip: Option<String>, // e.g. "/dev/gpiochip0"
    },
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig::Spi {
            bus: DEFAULT_SPI_BUS.to_string(),
            speed_hz: Some(DEFAULT_SPI_SPEED_HZ),
            dc_pin: DEFAULT_DC_PIN,
            rst_pin: DEFAULT_RST_PIN,
            gpio_chip: Some(DEFAULT_GPIO_CHIP.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    Ssd1351,
    /// In-memory panel, nothing leaves the process
    Mock,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "hamons", version, about = "HaMonS host and container status panel")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub display_rotate_deg: Option<u16>,
    #[arg(long, action = ArgAction::Set)]
    pub display_invert: Option<bool>,
    #[arg(long, value_enum)]
    pub driver: Option<DriverKind>,
    /// container to watch, repeatable; replaces the configured list
    #[arg(long = "container")]
    pub containers: Vec<String>,
    #[arg(long)]
    pub ping_host: Option<String>,
    /// run a single cycle and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub once: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Resolved panel options with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSettings {
    pub cycle_delay: Duration,
    pub pacing: Pacing,
    pub acquire_deadline: Duration,
    pub margin: i32,
    pub shift: ShiftParams,
    pub animation_period: u32,
    pub marker: MarkerStyle,
    pub font: FontRef,
    pub show_latency: bool,
}

impl PanelSettings {
    /// Page geometry for a panel of the given logical size
    pub fn layout_for(&self, width: u32, height: u32) -> LayoutConfig {
        LayoutConfig {
            margin: self.margin,
            marker: self.marker,
            show_latency: self.show_latency,
            ..LayoutConfig::for_display(width, height).with_font(self.font)
        }
    }
}

/// Resolved probe options with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
    pub containers: Vec<String>,
    pub docker_timeout: Duration,
    pub ping_host: String,
    pub ping_timeout: Duration,
    pub thermal_zone: PathBuf,
    pub disk_mount: PathBuf,
}

impl Config {
    pub fn panel_settings(&self) -> PanelSettings {
        let p = self.panel.clone().unwrap_or_default();
        PanelSettings {
            cycle_delay: Duration::from_millis(p.cycle_delay_ms.unwrap_or(DEFAULT_CYCLE_DELAY_MS)),
            pacing: p.pacing.unwrap_or_default(),
            acquire_deadline: Duration::from_millis(
                p.acquire_deadline_ms.unwrap_or(DEFAULT_ACQUIRE_DEADLINE_MS),
            ),
            margin: p.margin.unwrap_or(DEFAULT_MARGIN),
            shift: ShiftParams {
                max_shift: p.max_shift.unwrap_or(DEFAULT_MAX_SHIFT),
                step: p.shift_step.unwrap_or(DEFAULT_SHIFT_STEP),
                interval: p.shift_interval.unwrap_or(DEFAULT_SHIFT_INTERVAL),
            },
            animation_period: p.animation_period.unwrap_or(DEFAULT_ANIMATION_PERIOD),
            marker: p.marker.unwrap_or_default(),
            font: p.font.unwrap_or_default(),
            show_latency: p.show_latency.unwrap_or(true),
        }
    }

    pub fn watch_settings(&self) -> WatchSettings {
        let w = self.watch.clone().unwrap_or_default();
        WatchSettings {
            containers: w
                .containers
                .unwrap_or_else(|| DEFAULT_CONTAINERS.iter().map(|s| s.to_string()).collect()),
            docker_timeout: Duration::from_millis(w.docker_timeout_ms.unwrap_or(DEFAULT_DOCKER_TIMEOUT_MS)),
            ping_host: w.ping_host.unwrap_or_else(|| DEFAULT_PING_HOST.to_string()),
            ping_timeout: Duration::from_millis(w.ping_timeout_ms.unwrap_or(DEFAULT_PING_TIMEOUT_MS)),
            thermal_zone: w.thermal_zone.unwrap_or_else(|| PathBuf::from(DEFAULT_THERMAL_ZONE)),
            disk_mount: w.disk_mount.unwrap_or_else(|| PathBuf::from(DEFAULT_DISK_MOUNT)),
        }
    }

    /// Display group, empty when not configured
    pub fn display_config(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    /// Panel size as the page sees it, after rotation
    pub fn logical_size(&self) -> (u32, u32) {
        let d = self.display_config();
        let width = d.width.unwrap_or(SSD1351_WIDTH);
        let height = d.height.unwrap_or(SSD1351_HEIGHT);
        match d.rotate_deg {
            Some(90) | Some(270) => (height, width),
            _ => (width, height),
        }
    }
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok((cfg, cli))
}

/// Layer defaults, file and `cli` into a validated config.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/hamons/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/hamons/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/hamons.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["hamons.yaml", "config.yaml", "config/hamons.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.panel, src.panel) {
        (None, Some(c)) => dst.panel = Some(c),
        (Some(d), Some(s)) => merge_panel(d, s),
        _ => {}
    }
    match (&mut dst.watch, src.watch) {
        (None, Some(c)) => dst.watch = Some(c),
        (Some(d), Some(s)) => merge_watch(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.rotate_deg.is_some()  { dst.rotate_deg = src.rotate_deg; }
    if src.invert.is_some()      { dst.invert = src.invert; }
    if src.brightness.is_some()  { dst.brightness = src.brightness; }
    if src.driver.is_some()      { dst.driver = src.driver; }
    if src.bus.is_some()         { dst.bus = src.bus; }
}

fn merge_panel(dst: &mut PanelConfig, src: PanelConfig) {
    if src.cycle_delay_ms.is_some()      { dst.cycle_delay_ms = src.cycle_delay_ms; }
    if src.pacing.is_some()              { dst.pacing = src.pacing; }
    if src.acquire_deadline_ms.is_some() { dst.acquire_deadline_ms = src.acquire_deadline_ms; }
    if src.margin.is_some()              { dst.margin = src.margin; }
    if src.max_shift.is_some()           { dst.max_shift = src.max_shift; }
    if src.shift_step.is_some()          { dst.shift_step = src.shift_step; }
    if src.shift_interval.is_some()      { dst.shift_interval = src.shift_interval; }
    if src.animation_period.is_some()    { dst.animation_period = src.animation_period; }
    if src.marker.is_some()              { dst.marker = src.marker; }
    if src.font.is_some()                { dst.font = src.font; }
    if src.show_latency.is_some()        { dst.show_latency = src.show_latency; }
}

fn merge_watch(dst: &mut WatchConfig, src: WatchConfig) {
    if src.containers.is_some()        { dst.containers = src.containers; }
    if src.docker_timeout_ms.is_some() { dst.docker_timeout_ms = src.docker_timeout_ms; }
    if src.ping_host.is_some()         { dst.ping_host = src.ping_host; }
    if src.ping_timeout_ms.is_some()   { dst.ping_timeout_ms = src.ping_timeout_ms; }
    if src.thermal_zone.is_some()      { dst.thermal_zone = src.thermal_zone; }
    if src.disk_mount.is_some()        { dst.disk_mount = src.disk_mount; }
}

pub fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.debug {
        cfg.log_level = Some("debug".to_string());
    } else if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.display_rotate_deg.is_some()
        || cli.display_invert.is_some()
        || cli.driver.is_some();
    if any_display {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.display_width.is_some()       { display.width = cli.display_width; }
        if cli.display_height.is_some()      { display.height = cli.display_height; }
        if cli.display_rotate_deg.is_some()  { display.rotate_deg = cli.display_rotate_deg; }
        if cli.display_invert.is_some()      { display.invert = cli.display_invert; }
        if cli.driver.is_some()              { display.driver = cli.driver; }
    }

    if !cli.containers.is_empty() || cli.ping_host.is_some() {
        let watch = cfg.watch.get_or_insert_with(WatchConfig::default);
        if !cli.containers.is_empty() { watch.containers = Some(cli.containers.clone()); }
        if cli.ping_host.is_some()    { watch.ping_host = cli.ping_host.clone(); }
    }
}

/// Invariants the render loop relies on
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if let Some(rot) = display.rotate_deg {
            match rot {
                0 | 90 | 180 | 270 => {},
                _ => return Err(ConfigError::Validation("display rotate_deg must be 0|90|180|270".into()))
            }
        }
    }

    let panel = cfg.panel_settings();
    if panel.shift.interval == 0 {
        return Err(ConfigError::Validation("panel shift_interval must be > 0".into()));
    }
    if panel.shift.max_shift < 0 || panel.shift.step <= 0 {
        return Err(ConfigError::Validation("panel max_shift must be >= 0 and shift_step > 0".into()));
    }
    if panel.animation_period == 0 {
        return Err(ConfigError::Validation("panel animation_period must be > 0".into()));
    }
    if panel.margin < panel.shift.max_shift {
        return Err(ConfigError::Validation(format!(
            "panel margin {} is smaller than max_shift {}, content would leave the panel",
            panel.margin, panel.shift.max_shift
        )));
    }
    if panel.cycle_delay.is_zero() || panel.acquire_deadline.is_zero() {
        return Err(ConfigError::Validation("panel cycle_delay_ms and acquire_deadline_ms must be > 0".into()));
    }

    let watch = cfg.watch_settings();
    if panel.show_latency && watch.ping_host.trim().is_empty() {
        return Err(ConfigError::Validation("watch ping_host must be set when show_latency is on".into()));
    }

    // container lookups run side by side, alongside the ping
    let slowest_probe = if panel.show_latency {
        watch.docker_timeout.max(watch.ping_timeout)
    } else {
        watch.docker_timeout
    };
    if panel.acquire_deadline <= slowest_probe {
        return Err(ConfigError::Validation(format!(
            "panel acquire_deadline_ms {} must exceed the slowest probe timeout {}",
            panel.acquire_deadline.as_millis(),
            slowest_probe.as_millis()
        )));
    }

    let (width, height) = cfg.logical_size();
    let capacity = panel.layout_for(width, height).container_capacity();
    if watch.containers.len() > capacity {
        return Err(ConfigError::Validation(format!(
            "{} containers watched but a {}x{} panel has room for {}",
            watch.containers.len(), width, height, capacity
        )));
    }
    Ok(())
}
