/*
 *  render/layout.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layout engine - turns a metrics snapshot into a positioned, colored frame
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

use std::time::Duration;

use embedded_graphics::prelude::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::display::text::{FontRef, TextMeasure};
use crate::metrics::MetricsSnapshot;
use super::frame::{DrawCommand, Frame, Ink};
use super::heartbeat::AnimationState;
use super::tier::{self, ColorTier};

/// Between the two halves of a composite value
pub const SEPARATOR: &str = " / ";

pub const DEFAULT_MARGIN: i32 = 4;
pub const DEFAULT_MARKER_SIZE: u32 = 6;

/// Where the heartbeat marker lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Slides one pixel right per animation phase along the bottom edge
    #[default]
    Sweep,
    /// Parked in the bottom right corner
    Corner,
}

/// Geometry of the status page.
///
/// `margin` insets every side. Keep it at or above the maximum shift so the
/// drifting block never leaves the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    pub margin: i32,
    pub line_spacing: i32,
    pub font: FontRef,
    pub marker: MarkerStyle,
    pub marker_size: u32,
    pub show_latency: bool,
}

impl LayoutConfig {
    /// Defaults for a panel of the given size
    pub fn for_display(width: u32, height: u32) -> Self {
        let font = FontRef::Small;
        Self {
            width,
            height,
            margin: DEFAULT_MARGIN,
            line_spacing: font.height() as i32 + 2,
            font,
            marker: MarkerStyle::Sweep,
            marker_size: DEFAULT_MARKER_SIZE,
            show_latency: true,
        }
    }

    /// Same page set in another font, rows spaced to match
    pub fn with_font(self, font: FontRef) -> Self {
        Self { font, line_spacing: font.height() as i32 + 2, ..self }
    }

    /// Text rows that fit above the heartbeat marker
    pub fn row_capacity(&self) -> usize {
        let marker_top = self.height as i32 - self.margin - self.marker_size as i32;
        let room = marker_top - self.margin - self.font.height() as i32;
        if room < 0 || self.line_spacing <= 0 {
            return 0;
        }
        (room / self.line_spacing) as usize + 1
    }

    /// Rows left for the container block once the metric lines are placed
    pub fn container_capacity(&self) -> usize {
        self.row_capacity()
            .saturating_sub(standard_lines(self.show_latency).len())
    }

    /// x where labels start
    pub fn label_x(&self, offset: Point) -> i32 {
        self.margin + offset.x
    }

    /// x where right-aligned values end (exclusive)
    pub fn right_edge(&self, offset: Point) -> i32 {
        self.width as i32 - self.margin + offset.x
    }

    /// Top of the given row
    pub fn row_y(&self, row: usize, offset: Point) -> i32 {
        self.margin + row as i32 * self.line_spacing + offset.y
    }
}

/// A run of value text with its own color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub ink: Ink,
}

impl Token {
    pub fn new(text: impl Into<String>, ink: Ink) -> Self {
        Self { text: text.into(), ink }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Ink::Plain)
    }
}

/// A numeric reading with its formatting and color policy
#[derive(Debug, Clone, Copy)]
pub struct Gauge {
    pub read: fn(&MetricsSnapshot) -> f64,
    pub format: fn(f64) -> String,
    pub policy: fn(f64) -> ColorTier,
}

impl Gauge {
    fn token(&self, snapshot: &MetricsSnapshot) -> Token {
        let value = (self.read)(snapshot);
        Token::new((self.format)(value), Ink::Tier((self.policy)(value)))
    }
}

/// Right-hand side of a metric line
#[derive(Debug, Clone, Copy)]
pub enum LineValue {
    /// Uncolored text; `None` leaves the line out
    Plain(fn(&MetricsSnapshot) -> Option<String>),
    Gauge(Gauge),
    /// Two gauges joined by [`SEPARATOR`], each keeping its own color
    Pair(Gauge, Gauge),
}

impl LineValue {
    pub fn tokens(&self, snapshot: &MetricsSnapshot) -> Option<Vec<Token>> {
        match self {
            LineValue::Plain(read) => read(snapshot).map(|text| vec![Token::plain(text)]),
            LineValue::Gauge(gauge) => Some(vec![gauge.token(snapshot)]),
            LineValue::Pair(left, right) => Some(vec![
                left.token(snapshot),
                Token::plain(SEPARATOR),
                right.token(snapshot),
            ]),
        }
    }
}

/// One row of the status page: label on the left, value on the right
#[derive(Debug, Clone, Copy)]
pub struct MetricLine {
    pub label: &'static str,
    pub value: LineValue,
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_celsius(value: f64) -> String {
    format!("{:.1}°C", value)
}

/// `3d 04:05:06`, or `04:05:06` under a day
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, h, m, s)
    } else {
        format!("{:02}:{:02}:{:02}", h, m, s)
    }
}

fn uptime_text(s: &MetricsSnapshot) -> Option<String> {
    Some(format_uptime(s.uptime))
}

fn latency_text(s: &MetricsSnapshot) -> Option<String> {
    s.latency.map(|l| l.to_string())
}

pub const CPU_GAUGE: Gauge = Gauge {
    read: read_cpu,
    format: format_percent,
    policy: tier::utilization_tier,
};

pub const TEMP_GAUGE: Gauge = Gauge {
    read: read_temp,
    format: format_celsius,
    policy: tier::temperature_tier,
};

pub const RAM_GAUGE: Gauge = Gauge {
    read: read_ram,
    format: format_percent,
    policy: tier::utilization_tier,
};

pub const SWAP_GAUGE: Gauge = Gauge {
    read: read_swap,
    format: format_percent,
    policy: tier::utilization_tier,
};

pub const DISK_GAUGE: Gauge = Gauge {
    read: read_disk,
    format: format_percent,
    policy: tier::disk_tier,
};

fn read_cpu(s: &MetricsSnapshot) -> f64 { s.cpu_pct }
fn read_temp(s: &MetricsSnapshot) -> f64 { s.cpu_temp_c }
fn read_ram(s: &MetricsSnapshot) -> f64 { s.ram_pct }
fn read_swap(s: &MetricsSnapshot) -> f64 { s.swap_pct }
fn read_disk(s: &MetricsSnapshot) -> f64 { s.disk_pct }

pub const UPTIME_LINE: MetricLine = MetricLine { label: "Up", value: LineValue::Plain(uptime_text) };
pub const CPU_LINE: MetricLine = MetricLine { label: "CPU", value: LineValue::Pair(CPU_GAUGE, TEMP_GAUGE) };
pub const MEMORY_LINE: MetricLine = MetricLine { label: "Mem", value: LineValue::Pair(RAM_GAUGE, SWAP_GAUGE) };
pub const DISK_LINE: MetricLine = MetricLine { label: "Disk", value: LineValue::Gauge(DISK_GAUGE) };
pub const LATENCY_LINE: MetricLine = MetricLine { label: "Ping", value: LineValue::Plain(latency_text) };

/// Metric rows in page order; the container block follows them
pub fn standard_lines(show_latency: bool) -> Vec<MetricLine> {
    let mut lines = vec![UPTIME_LINE, CPU_LINE, MEMORY_LINE, DISK_LINE];
    if show_latency {
        lines.push(LATENCY_LINE);
    }
    lines
}

/// Builds the frame for one refresh.
///
/// Pure: the same snapshot, offset and animation phase always give the
/// same frame.
pub struct LayoutEngine<M: TextMeasure> {
    config: LayoutConfig,
    lines: Vec<MetricLine>,
    measure: M,
}

impl<M: TextMeasure> LayoutEngine<M> {
    pub fn new(config: LayoutConfig, measure: M) -> Self {
        let lines = standard_lines(config.show_latency);
        Self { config, lines, measure }
    }

    pub fn with_lines(config: LayoutConfig, measure: M, lines: Vec<MetricLine>) -> Self {
        Self { config, lines, measure }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn lines(&self) -> &[MetricLine] {
        &self.lines
    }

    /// Lay out every metric line, the container block and the heartbeat
    /// marker, all moved by `offset`.
    pub fn compose(
        &self,
        snapshot: &MetricsSnapshot,
        offset: Point,
        animation: &AnimationState,
    ) -> Frame {
        let rows = self.lines.len() + snapshot.containers.len();
        let mut frame = Frame::with_capacity(rows * 4 + 1);
        let mut row = 0;

        for line in &self.lines {
            let Some(tokens) = line.value.tokens(snapshot) else {
                continue;
            };
            self.labeled_row(&mut frame, row, offset, line.label, &tokens);
            row += 1;
        }

        for container in &snapshot.containers {
            let ink = Ink::Tier(tier::container_status_tier(&container.status));
            let tokens = [Token::new(container.status.clone(), ink)];
            self.labeled_row(&mut frame, row, offset, &container.name, &tokens);
            row += 1;
        }

        frame.push(self.marker(offset, animation));
        frame
    }

    /// Label at the left origin, value tokens packed against the right edge.
    /// The label is cut short rather than run into the value.
    fn labeled_row(
        &self,
        frame: &mut Frame,
        row: usize,
        offset: Point,
        label: &str,
        tokens: &[Token],
    ) {
        let font = self.config.font;
        let y = self.config.row_y(row, offset);
        let right = self.config.right_edge(offset);
        let label_x = self.config.label_x(offset);

        let widths: Vec<i32> = tokens
            .iter()
            .map(|t| self.measure.width(&t.text, font) as i32)
            .collect();
        let total: i32 = widths.iter().sum();
        let gap = self.measure.width(" ", font) as i32;

        let label = self.fit(label, right - total - gap - label_x);
        if !label.is_empty() {
            frame.push_text(label, Point::new(label_x, y), Ink::Plain, font);
        }

        let mut x = right - total;
        for (token, width) in tokens.iter().zip(widths) {
            frame.push_text(token.text.clone(), Point::new(x, y), token.ink, font);
            x += width;
        }
    }

    /// Longest prefix of `text` no wider than `room`
    fn fit<'t>(&self, text: &'t str, room: i32) -> &'t str {
        if room <= 0 {
            return "";
        }
        let font = self.config.font;
        if self.measure.width(text, font) as i32 <= room {
            return text;
        }
        let mut fitted = "";
        for (idx, ch) in text.char_indices() {
            let candidate = &text[..idx + ch.len_utf8()];
            if self.measure.width(candidate, font) as i32 > room {
                break;
            }
            fitted = candidate;
        }
        fitted
    }

    fn marker(&self, offset: Point, animation: &AnimationState) -> DrawCommand {
        let size = self.config.marker_size as i32;
        let right = self.config.right_edge(offset);
        let y = self.config.height as i32 - self.config.margin - size + offset.y;
        let x = match self.config.marker {
            MarkerStyle::Sweep => {
                right - size - (animation.period() as i32 - 1) + animation.phase() as i32
            }
            MarkerStyle::Corner => right - size,
        };
        DrawCommand::FillRect {
            top_left: Point::new(x, y),
            size: Size::new(self.config.marker_size, self.config.marker_size),
            ink: Ink::Plain,
        }
    }
}
