// Host-side tests for content panel placement.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod layout {
    include!("../src/layout.rs");
}

use layout::*;

const VIEWPORT: [f32; 2] = [1280.0, 720.0];

#[test]
fn hidden_markers_have_no_placement() {
    assert_eq!(place_panel(false, Some([0.5, 0.5]), 10.0, VIEWPORT, 0.2), None);
}

#[test]
fn anchors_behind_camera_are_hidden() {
    assert_eq!(place_panel(true, None, 10.0, VIEWPORT, 0.2), None);
}

#[test]
fn anchors_far_off_screen_are_hidden() {
    assert_eq!(place_panel(true, Some([1.5, 0.5]), 10.0, VIEWPORT, 0.2), None);
    assert_eq!(place_panel(true, Some([0.5, -0.3]), 10.0, VIEWPORT, 0.2), None);
    // Within the margin still shows so panels slide out instead of popping
    assert!(place_panel(true, Some([1.1, 0.5]), 10.0, VIEWPORT, 0.2).is_some());
}

#[test]
fn placement_is_in_pixels() {
    let p = place_panel(true, Some([0.25, 0.5]), PANEL_REFERENCE_DISTANCE, VIEWPORT, 0.2).unwrap();
    assert_eq!(p.x_px, 320.0);
    assert_eq!(p.y_px, 360.0);
    assert!((p.scale - 1.0).abs() < 1e-6);
}

#[test]
fn nearer_panels_are_larger_within_limits() {
    let near = place_panel(true, Some([0.5, 0.5]), 6.0, VIEWPORT, 0.2).unwrap();
    let far = place_panel(true, Some([0.5, 0.5]), 24.0, VIEWPORT, 0.2).unwrap();
    assert!(near.scale > far.scale);

    let touching = place_panel(true, Some([0.5, 0.5]), 0.0, VIEWPORT, 0.2).unwrap();
    assert_eq!(touching.scale, PANEL_SCALE_MAX);
    let distant = place_panel(true, Some([0.5, 0.5]), 1000.0, VIEWPORT, 0.2).unwrap();
    assert_eq!(distant.scale, PANEL_SCALE_MIN);
}

#[test]
fn style_carries_color_and_visibility() {
    let hidden = panel_style(None, "#ff9900");
    assert!(hidden.contains("color:#ff9900"));
    assert!(hidden.contains("opacity:0"));

    let shown = panel_style(
        Some(PanelPlacement {
            x_px: 10.0,
            y_px: 20.0,
            scale: 1.0,
        }),
        "#00aaff",
    );
    assert!(shown.contains("color:#00aaff"));
    assert!(shown.contains("opacity:1"));
    assert!(shown.contains("translate(10.0px,20.0px)"));
}
