// Host-side tests for the damped scroll tracker.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scroll {
    include!("../src/scroll.rs");
}

use scroll::*;

#[test]
fn raw_offset_maps_scroll_range_to_unit_interval() {
    assert_eq!(raw_offset(0.0, 5000.0, 1000.0), 0.0);
    assert!((raw_offset(2000.0, 5000.0, 1000.0) - 0.5).abs() < 1e-6);
    assert_eq!(raw_offset(4000.0, 5000.0, 1000.0), 1.0);
    // Overscroll (rubber-banding) stays clamped
    assert_eq!(raw_offset(-50.0, 5000.0, 1000.0), 0.0);
    assert_eq!(raw_offset(4100.0, 5000.0, 1000.0), 1.0);
}

#[test]
fn raw_offset_is_zero_when_page_cannot_scroll() {
    assert_eq!(raw_offset(0.0, 800.0, 800.0), 0.0);
    assert_eq!(raw_offset(10.0, 600.0, 800.0), 0.0);
}

#[test]
fn tracker_eases_toward_target_without_overshoot() {
    let mut t = ScrollTracker::new(0.25, 1.0);
    t.set_raw(1.0);
    let mut prev = 0.0;
    for _ in 0..30 {
        let p = t.step(1.0 / 60.0);
        assert!(p >= prev, "progress went backwards: {prev} -> {p}");
        assert!(p <= 1.0);
        prev = p;
    }
    assert!(prev > 0.5 && prev < 1.0, "after half a second: {prev}");
}

#[test]
fn tracker_reaches_target_eventually() {
    let mut t = ScrollTracker::new(0.25, 1.0);
    t.set_raw(0.6);
    for _ in 0..600 {
        t.step(1.0 / 60.0);
    }
    assert_eq!(t.current, 0.6);
}

#[test]
fn zero_damping_follows_immediately() {
    let mut t = ScrollTracker::new(0.0, 1.0);
    t.set_raw(0.3);
    assert_eq!(t.step(0.016), 0.3);
}

#[test]
fn zero_dt_does_not_move() {
    let mut t = ScrollTracker::new(0.25, 1.0);
    t.set_raw(1.0);
    assert_eq!(t.step(0.0), 0.0);
}

#[test]
fn set_raw_clamps_and_rejects_nan() {
    let mut t = ScrollTracker::new(0.25, 1.0);
    t.set_raw(3.0);
    assert_eq!(t.target, 1.0);
    t.set_raw(-1.0);
    assert_eq!(t.target, 0.0);
    t.set_raw(f32::NAN);
    assert_eq!(t.target, 0.0);
}

#[test]
fn settle_jumps_to_target() {
    let mut t = ScrollTracker::new(0.25, 1.0);
    t.set_raw(0.8);
    t.settle();
    assert_eq!(t.current, 0.8);
    assert_eq!(t.step(0.016), 0.8);
}

#[test]
fn spacer_height_is_in_viewport_units() {
    assert_eq!(spacer_height_css(5.0), "500vh");
    assert_eq!(spacer_height_css(0.2), "100vh");
}
