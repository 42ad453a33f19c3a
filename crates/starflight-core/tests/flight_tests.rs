// Host-side tests for the scroll-to-pose controller end to end.

use glam::Vec3;
use starflight_core::constants::flight_path_vec3;
use starflight_core::*;

fn controller(markers: usize) -> FlightController {
    let curve = ControlCurve::new(flight_path_vec3()).unwrap();
    FlightController::new(curve, markers)
}

fn visible_set(c: &FlightController, progress: f32) -> Vec<usize> {
    c.marker_visibility(progress)
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.then_some(i))
        .collect()
}

#[test]
fn camera_starts_at_curve_origin() {
    let c = controller(5);
    let pose = c.camera_pose(0.0);
    assert!((pose.position - c.curve().point_at(0.0)).length() < 1e-5);
    assert!((pose.position - Vec3::ZERO).length() < 1e-5);
}

#[test]
fn full_scroll_stops_short_of_the_end() {
    let c = controller(5);
    let pose = c.camera_pose(1.0);
    assert!((pose.position - c.curve().point_at(0.99)).length() < 1e-5);
    let end = *c.curve().points().last().unwrap();
    assert!((pose.position - end).length() > 0.1);
}

#[test]
fn camera_path_is_continuous() {
    let c = controller(5);
    let steps = 2000;
    let mut prev = c.camera_pose(0.0).position;
    let mut max_jump = 0.0f32;
    for i in 1..=steps {
        let p = i as f32 / steps as f32;
        let pos = c.camera_pose(p).position;
        max_jump = max_jump.max((pos - prev).length());
        prev = pos;
    }
    // ~120 units of depth over 2000 steps; anything near a unit is a jump.
    assert!(max_jump < 0.5, "max jump {max_jump}");

    // Approaching full scroll from below and clamping beyond it agree.
    let near_end = c.camera_pose(0.99999).position;
    let at_end = c.camera_pose(1.0).position;
    let beyond = c.camera_pose(1.5).position;
    assert!((near_end - at_end).length() < 1e-2);
    assert_eq!(at_end, beyond);
}

#[test]
fn camera_looks_along_direction_of_travel() {
    let c = controller(5);
    for i in 0..=10 {
        let p = i as f32 / 10.0;
        let pose = c.camera_pose(p);
        let ahead = c.camera_pose((p + 0.002).min(1.0)).position - pose.position;
        if ahead.length() > 1e-4 {
            assert!(ahead.normalize().dot(pose.forward()) > 0.9, "p={p}");
        }
    }
}

#[test]
fn active_index_is_monotonic() {
    let c = controller(5);
    let mut last = 0;
    for i in 0..=1000 {
        let idx = c.active_marker(i as f32 / 1000.0).unwrap();
        assert!(idx >= last);
        assert!(idx < 5);
        last = idx;
    }
}

#[test]
fn visibility_window_at_start_middle_and_end() {
    let c = controller(5);
    assert_eq!(visible_set(&c, 0.0), vec![0, 1]);
    assert_eq!(c.active_marker(0.5), Some(2));
    assert_eq!(visible_set(&c, 0.5), vec![1, 2, 3]);
    assert_eq!(visible_set(&c, 1.0), vec![3, 4]);
}

#[test]
fn visibility_is_symmetric_around_active() {
    let c = controller(7);
    for i in 0..=100 {
        let p = i as f32 / 100.0;
        let active = c.active_marker(p).unwrap();
        for (idx, v) in c.marker_visibility(p).into_iter().enumerate() {
            assert_eq!(v, (idx as i64 - active as i64).abs() <= 1);
        }
    }
}

#[test]
fn markers_are_anchored_above_the_path() {
    let curve = ControlCurve::new(flight_path_vec3()).unwrap();
    let markers = default_markers();
    let placed = place_markers(&curve, &markers);
    assert_eq!(placed.len(), 5);
    for m in &placed {
        let t = (m.index as f32 + 0.5) / 5.0;
        let expected = curve.point_at(t) + Vec3::new(0.0, 2.0, 0.0);
        assert!((m.anchor - expected).length() < 1e-5);
    }
    assert_eq!(placed[1].style, PlanetStyle::Corona);
    assert_eq!(placed[2].style, PlanetStyle::Banded);
    assert_eq!(placed[0].style, PlanetStyle::Rocky);
}

#[test]
fn render_state_follows_scroll() {
    let mut state = RenderState::new(SceneConfig::default(), &default_markers(), 9).unwrap();
    state.tick(0.5, 1.0 / 60.0);
    assert_eq!(state.pose.active_marker, Some(2));
    assert_eq!(state.marker_visible, vec![false, true, true, true, false]);
    let expected = state.controller.camera_pose(0.5).position;
    assert_eq!(state.pose.camera.position, expected);
}
