/*
 *  tests/display_integration.rs
 *
 *  Frames pushed through the back buffer onto the mock panel
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 */

mod common;

use embedded_graphics::pixelcolor::IntoStorage;
use embedded_graphics::prelude::*;

use hamons::display::drivers::mock::{MockDriver, MockDriverState};
use hamons::display::{Color, ColorDepth, DisplaySurface, FramebufferSurface, MonoTextMeasure, Rotation};
use hamons::render::{AnimationState, LayoutConfig, LayoutEngine, LayoutLine, MarkerStyle};

fn rgb(color: Color) -> u16 {
    color.to_rgb565().into_storage()
}

/// Does any pixel inside the text run's box carry `color`?
fn line_has_color(state: &MockDriverState, line: &LayoutLine, color: Color) -> bool {
    let width = line.text.chars().count() as i32 * 6;
    (line.origin.y..line.origin.y + 10).any(|y| {
        (line.origin.x..line.origin.x + width).any(|x| {
            state.pixel_rgb565(128, x as u32, y as u32) == Some(rgb(color))
        })
    })
}

#[test]
fn scenario_colors_reach_the_panel() {
    let driver = MockDriver::new();
    let state = driver.state();
    let mut surface = FramebufferSurface::new(driver, Rotation::Deg0);
    let engine = LayoutEngine::new(LayoutConfig::for_display(128, 128), MonoTextMeasure);

    let frame = engine.compose(&common::scenario_snapshot(), Point::zero(), &AnimationState::default());
    surface.commit(&frame).unwrap();

    let state = state.lock().unwrap();
    let exited = frame.find_text("exited").unwrap();
    assert!(line_has_color(&state, exited, Color::Red));
    assert!(!line_has_color(&state, exited, Color::Green));

    let running = frame.find_text("running").unwrap();
    assert!(line_has_color(&state, running, Color::Green));

    let uptime = frame.find_text("3d 04:05:06").unwrap();
    assert!(line_has_color(&state, uptime, Color::White));
}

#[test]
fn rotation_180_mirrors_the_marker() {
    let driver = MockDriver::new();
    let state = driver.state();
    let mut surface = FramebufferSurface::new(driver, Rotation::Deg180);
    let config = LayoutConfig {
        marker: MarkerStyle::Corner,
        ..LayoutConfig::for_display(128, 128)
    };
    let engine = LayoutEngine::new(config, MonoTextMeasure);

    let frame = engine.compose(&common::scenario_snapshot(), Point::zero(), &AnimationState::default());
    surface.commit(&frame).unwrap();

    // logical marker spans 118..124 on both axes, so physically 4..10
    let state = state.lock().unwrap();
    assert_eq!(state.pixel_rgb565(128, 5, 5), Some(rgb(Color::White)));
    assert_eq!(state.pixel_rgb565(128, 60, 10), Some(0));
}

#[test]
fn blank_after_a_frame_leaves_nothing_lit() {
    let driver = MockDriver::new();
    let state = driver.state();
    let mut surface = FramebufferSurface::new(driver, Rotation::Deg0);
    let engine = LayoutEngine::new(LayoutConfig::for_display(128, 128), MonoTextMeasure);

    let frame = engine.compose(&common::scenario_snapshot(), Point::zero(), &AnimationState::default());
    surface.commit(&frame).unwrap();
    assert!(state.lock().unwrap().lit_pixels(ColorDepth::Rgb565) > 0);

    surface.blank().unwrap();
    assert_eq!(state.lock().unwrap().lit_pixels(ColorDepth::Rgb565), 0);
}

#[test]
fn monochrome_panel_packs_one_bit_per_pixel() {
    let driver = MockDriver::new_with_size(128, 64, ColorDepth::Monochrome);
    let state = driver.state();
    let mut surface = FramebufferSurface::new(driver, Rotation::Deg0);
    let config = LayoutConfig { show_latency: false, ..LayoutConfig::for_display(128, 64) };
    let engine = LayoutEngine::new(config, MonoTextMeasure);

    let mut snapshot = common::scenario_snapshot();
    snapshot.containers.truncate(0);
    let frame = engine.compose(&snapshot, Point::zero(), &AnimationState::default());
    surface.commit(&frame).unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.last_buffer.len(), 1024);
    assert!(state.lit_pixels(ColorDepth::Monochrome) >= 36);
}
