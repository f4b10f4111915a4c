/*
 *  tests/layout_properties.rs
 *
 *  Layout behavior with real font metrics
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 */

mod common;

use embedded_graphics::prelude::*;

use hamons::display::{FontRef, MonoTextMeasure, TextMeasure};
use hamons::metrics::{ContainerStatus, Latency};
use hamons::render::{
    AnimationState, ColorTier, DrawCommand, Ink, LayoutConfig, LayoutEngine, ShiftParams, ShiftState,
};

fn engine() -> LayoutEngine<MonoTextMeasure> {
    LayoutEngine::new(LayoutConfig::for_display(128, 128), MonoTextMeasure)
}

fn ink_of(frame: &hamons::render::Frame, text: &str) -> Ink {
    frame.find_text(text).unwrap_or_else(|| panic!("no run {text:?}")).ink
}

#[test]
fn scenario_tiers() {
    let frame = engine().compose(&common::scenario_snapshot(), Point::zero(), &AnimationState::default());

    assert_eq!(ink_of(&frame, "45.0%"), Ink::Tier(ColorTier::Nominal));
    assert_eq!(ink_of(&frame, "55.0°C"), Ink::Tier(ColorTier::Nominal));
    assert_eq!(ink_of(&frame, "50.0%"), Ink::Tier(ColorTier::Nominal));
    assert_eq!(ink_of(&frame, "10.0%"), Ink::Tier(ColorTier::Nominal));
    assert_eq!(ink_of(&frame, "70.0%"), Ink::Tier(ColorTier::Nominal));
    assert_eq!(ink_of(&frame, "running"), Ink::Tier(ColorTier::Nominal));
    assert_eq!(ink_of(&frame, "exited"), Ink::Tier(ColorTier::Critical));
    assert_eq!(ink_of(&frame, "23 ms"), Ink::Plain);
}

#[test]
fn unknown_container_is_warning() {
    let mut snapshot = common::scenario_snapshot();
    snapshot.containers = vec![ContainerStatus::new("ghost", "Not Found")];
    let frame = engine().compose(&snapshot, Point::zero(), &AnimationState::default());
    assert_eq!(ink_of(&frame, "Not Found"), Ink::Tier(ColorTier::Warning));
}

#[test]
fn latency_timeout_rendered_verbatim() {
    let mut snapshot = common::scenario_snapshot();
    snapshot.latency = Some(Latency::Timeout);
    let frame = engine().compose(&snapshot, Point::zero(), &AnimationState::default());
    assert_eq!(ink_of(&frame, "timeout"), Ink::Plain);
}

#[test]
fn composite_tokens_are_contiguous_and_right_aligned() {
    let frame = engine().compose(&common::scenario_snapshot(), Point::zero(), &AnimationState::default());
    let measure = MonoTextMeasure;
    let cpu = frame.find_text("45.0%").unwrap();
    let sep = frame.lines().find(|l| l.text == " / " && l.origin.y == cpu.origin.y).unwrap();
    let temp = frame.find_text("55.0°C").unwrap();

    assert_eq!(sep.origin.x, cpu.origin.x + measure.width("45.0%", FontRef::Small) as i32);
    assert_eq!(temp.origin.x, sep.origin.x + measure.width(" / ", FontRef::Small) as i32);
    assert_eq!(temp.origin.x + measure.width("55.0°C", FontRef::Small) as i32, 124);
}

#[test]
fn block_moves_rigidly_with_the_shift() {
    let engine = engine();
    let snapshot = common::scenario_snapshot();
    let animation = AnimationState::default();
    let base = engine.compose(&snapshot, Point::zero(), &animation).anchors();

    for offset in [Point::new(2, 0), Point::new(4, 4), Point::new(-4, 2), Point::new(0, -4)] {
        let moved = engine.compose(&snapshot, offset, &animation).anchors();
        assert_eq!(moved.len(), base.len());
        for (a, b) in base.iter().zip(&moved) {
            assert_eq!(*b - *a, offset);
        }
    }
}

#[test]
fn right_edge_never_overflows() {
    let engine = engine();
    let measure = MonoTextMeasure;
    let mut shift = ShiftState::new(ShiftParams { interval: 1, ..ShiftParams::default() });

    // long values up to the full display width
    for len in [1usize, 5, 12, 20, 21] {
        let mut snapshot = common::scenario_snapshot();
        snapshot.containers = vec![ContainerStatus::new("c", "x".repeat(len))];

        for _ in 0..24 {
            shift.advance();
            let frame = engine.compose(&snapshot, shift.offset(), &AnimationState::default());
            for line in frame.lines() {
                let w = measure.width(&line.text, line.font) as i32;
                assert!(line.origin.x + w <= 128, "{:?} overflows at {:?}", line.text, shift.offset());
            }
            for cmd in &frame {
                if let DrawCommand::FillRect { top_left, size, .. } = cmd {
                    assert!(top_left.x >= 0 && top_left.x + size.width as i32 <= 128);
                    assert!(top_left.y >= 0 && top_left.y + size.height as i32 <= 128);
                }
            }
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let engine = engine();
    let snapshot = common::scenario_snapshot();
    let mut animation = AnimationState::default();
    animation.advance();
    animation.advance();
    let a = engine.compose(&snapshot, Point::new(2, -2), &animation);
    let b = engine.compose(&snapshot, Point::new(2, -2), &animation);
    assert_eq!(a, b);
}

#[test]
fn marker_sweeps_with_the_heartbeat() {
    let engine = engine();
    let snapshot = common::scenario_snapshot();
    let mut animation = AnimationState::default();
    let mut xs = Vec::new();
    for _ in 0..10 {
        let frame = engine.compose(&snapshot, Point::zero(), &animation);
        if let Some(DrawCommand::FillRect { top_left, .. }) = frame.commands().last() {
            xs.push(top_left.x);
        }
        animation.advance();
    }
    assert_eq!(xs.len(), 10);
    assert!(xs.windows(2).all(|w| w[1] == w[0] + 1));
    // last phase parks the marker against the right edge
    assert_eq!(xs[9] + 6, 124);
}
