// Host-side tests for per-frame instance building.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod instances {
    include!("../src/instances.rs");
}

use glam::Vec3;
use instances::*;
use starflight_core::constants::{PLANET_DROP, PLANET_RADIUS};
use starflight_core::{default_markers, RenderState, SceneConfig, StarKind};

fn state_at(progress: f32) -> RenderState {
    let mut s = RenderState::new(SceneConfig::default(), &default_markers(), 7).unwrap();
    s.tick(progress, 1.0 / 60.0);
    s
}

fn center(i: &InstanceRaw) -> Vec3 {
    Vec3::from_slice(&i.center_radius[..3])
}

#[test]
fn gpu_record_sizes_match_shader_layout() {
    // 6 x vec4<f32>
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 96);
    // mat4 + 6 vec4 + 2 x 12 vec4
    assert_eq!(std::mem::size_of::<SceneGlobals>(), 64 + 6 * 16 + 2 * MAX_LIGHTS * 16);
    assert_eq!(std::mem::size_of::<SceneGlobals>() % 16, 0);
}

#[test]
fn solid_list_covers_every_body() {
    let s = state_at(0.0);
    let mut out = SceneInstances::default();
    build_frame(&s, &mut out);

    let craters: usize = s
        .decorations
        .stars
        .iter()
        .filter(|st| st.kind == StarKind::Cratered)
        .map(|st| st.craters.len())
        .sum();
    let planets = s.visible_markers().count();
    assert_eq!(planets, 2);
    let expected =
        s.decorations.asteroids.len() + s.decorations.stars.len() + craters + planets + 7;
    assert_eq!(out.solid.len(), expected);
    assert!(out.solid.iter().all(|i| i.kind() == KIND_SPHERE));
}

#[test]
fn planets_sit_below_visible_marker_anchors() {
    let s = state_at(1.0);
    let mut out = SceneInstances::default();
    build_frame(&s, &mut out);

    for m in &s.markers {
        let expect = m.anchor - Vec3::Y * PLANET_DROP;
        let found = out.solid.iter().any(|i| {
            center(i).distance(expect) < 1e-4 && (i.center_radius[3] - PLANET_RADIUS).abs() < 1e-6
        });
        assert_eq!(found, s.marker_visible[m.index], "marker {}", m.index);
    }
}

#[test]
fn glow_is_sorted_far_to_near() {
    let s = state_at(0.4);
    let mut out = SceneInstances::default();
    build_frame(&s, &mut out);
    let eye = s.pose.camera.position;
    assert!(!out.glow.is_empty());
    for pair in out.glow.windows(2) {
        assert!(center(&pair[0]).distance(eye) >= center(&pair[1]).distance(eye) - 1e-4);
    }
    assert!(out
        .glow
        .iter()
        .all(|i| i.kind() == KIND_GLOW || i.kind() == KIND_RING));
}

#[test]
fn lights_include_stars_and_engine() {
    let s = state_at(0.0);
    let mut out = SceneInstances::default();
    build_frame(&s, &mut out);
    assert!(out.lights.len() <= MAX_LIGHTS);
    assert_eq!(out.lights.len(), s.decorations.stars.len() + 1);
    let engine = out.lights.last().unwrap();
    assert!(engine.position.distance(s.pose.ship.position) < 1.0);
    assert!((engine.intensity - s.pose.ship.engine_glow).abs() < 1e-6);
}

#[test]
fn rebuilding_reuses_buffers() {
    let s = state_at(0.2);
    let mut out = SceneInstances::default();
    build_frame(&s, &mut out);
    let first = out.solid.len();
    build_frame(&s, &mut out);
    assert_eq!(out.solid.len(), first);
}

#[test]
fn background_points_match_starfield() {
    let s = state_at(0.0);
    let bg = background_instances(&s.starfield);
    assert_eq!(bg.len(), s.starfield.len());
    assert!(bg.iter().all(|i| i.kind() == KIND_POINT));
    assert!(bg.iter().all(|i| i.center_radius[3] > 0.0));
}

#[test]
fn globals_carry_camera_fog_and_lights() {
    let s = state_at(0.5);
    let mut out = SceneInstances::default();
    build_frame(&s, &mut out);
    let cam = s.camera(16.0 / 9.0);
    let g = scene_globals(&s, &cam, &out.lights);

    assert_eq!(&g.cam_pos[..3], &cam.eye.to_array()[..]);
    assert_eq!(g.cam_right[3], s.config.fog.near);
    assert_eq!(g.cam_up[3], s.config.fog.far);
    assert_eq!(g.fog_color[3], s.config.lighting.ambient);
    assert_eq!(g.counts[0] as usize, out.lights.len());

    let right = Vec3::from_slice(&g.cam_right[..3]);
    let up = Vec3::from_slice(&g.cam_up[..3]);
    assert!((right.length() - 1.0).abs() < 1e-4);
    assert!((up.length() - 1.0).abs() < 1e-4);
    assert!(right.dot(up).abs() < 1e-4);

    // Unused light slots stay dark
    for slot in &g.light_color[out.lights.len()..] {
        assert_eq!(slot, &[0.0; 4]);
    }
}
