//! Per-session render state shared with the web frontend.
//!
//! `RenderState` is owned by the frame loop and mutated in place once per
//! tick. It holds everything generated at startup (curve, markers, scenery)
//! alongside the values derived from the current scroll progress, so the
//! renderer only has to read it and refresh GPU instance data.

use crate::constants::{MARKER_SWAY_AMPLITUDE, MARKER_SWAY_RATE, PLANET_SPIN_PER_FRAME};
use crate::controller::{FlightController, FlightPose};
use crate::curve::ControlCurve;
use crate::decorations::Decorations;
use crate::error::SceneError;
use crate::markers::{is_visible, place_markers, ContentMarker, PlacedMarker};
use crate::scene::SceneConfig;
use crate::starfield::{generate_starfield, BackgroundStar};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized screen coordinates (0,0 top-left,
    /// 1,1 bottom-right). `None` when the point is behind the camera.
    pub fn project_to_screen(&self, world: Vec3) -> Option<[f32; 2]> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some([ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5])
    }
}

pub struct RenderState {
    pub controller: FlightController,
    pub markers: Vec<PlacedMarker>,
    pub decorations: Decorations,
    pub starfield: Vec<BackgroundStar>,
    pub config: SceneConfig,
    pub progress: f32,
    pub elapsed_sec: f32,
    pub frames: u64,
    pub pose: FlightPose,
    pub marker_visible: Vec<bool>,
}

impl RenderState {
    /// Builds the curve and generates all scenery. The only place where
    /// random generation happens.
    pub fn new(
        config: SceneConfig,
        markers: &[ContentMarker],
        seed: u64,
    ) -> Result<Self, SceneError> {
        let curve = ControlCurve::with_kind(config.control_points.clone(), config.curve_kind)?;
        let placed = place_markers(&curve, markers);
        let controller = FlightController::with_params(curve, placed.len(), config.flight);
        let decorations = Decorations::generate(seed);
        let starfield = generate_starfield(&config.starfield, seed.rotate_left(17) ^ 0x5eed);
        let pose = controller.pose(0.0, 0.0);
        let marker_visible = controller.marker_visibility(0.0);
        log::info!(
            "[scene] markers={} asteroids={} stars={} background={}",
            placed.len(),
            decorations.asteroids.len(),
            decorations.stars.len(),
            starfield.len()
        );
        Ok(Self {
            controller,
            markers: placed,
            decorations,
            starfield,
            config,
            progress: 0.0,
            elapsed_sec: 0.0,
            frames: 0,
            pose,
            marker_visible,
        })
    }

    /// Advance one frame.
    pub fn tick(&mut self, progress: f32, dt_sec: f32) {
        self.elapsed_sec += dt_sec.max(0.0);
        self.frames += 1;
        self.pose = self.controller.pose(progress, self.elapsed_sec);
        self.progress = self.pose.progress;
        for (i, v) in self.marker_visible.iter_mut().enumerate() {
            *v = is_visible(i, self.pose.active_marker);
        }
        for m in &mut self.markers {
            m.planet_spin += PLANET_SPIN_PER_FRAME;
        }
        self.decorations.advance();
    }

    /// Gentle side-to-side yaw applied to every marker group.
    pub fn marker_sway(&self) -> f32 {
        (self.elapsed_sec * MARKER_SWAY_RATE).sin() * MARKER_SWAY_AMPLITUDE
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        let p = &self.config.projection;
        Camera {
            eye: self.pose.camera.position,
            target: self.pose.camera.target,
            up: self.pose.camera.up(),
            aspect: aspect.max(1e-3),
            fovy_radians: p.fovy_degrees.to_radians(),
            znear: p.znear,
            zfar: p.zfar,
        }
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &PlacedMarker> + '_ {
        self.markers
            .iter()
            .zip(self.marker_visible.iter())
            .filter_map(|(m, v)| v.then_some(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::default_markers;

    #[test]
    fn projects_target_to_screen_centre() {
        let state = RenderState::new(SceneConfig::default(), &default_markers(), 1).unwrap();
        let cam = state.camera(16.0 / 9.0);
        let uv = cam.project_to_screen(cam.target).unwrap();
        assert!((uv[0] - 0.5).abs() < 1e-3 && (uv[1] - 0.5).abs() < 1e-3);
        let behind = cam.eye - (cam.target - cam.eye);
        assert!(cam.project_to_screen(behind).is_none());
    }

    #[test]
    fn tick_advances_time_and_spin() {
        let mut state = RenderState::new(SceneConfig::default(), &default_markers(), 1).unwrap();
        state.tick(0.5, 0.016);
        state.tick(0.5, -1.0);
        assert!((state.elapsed_sec - 0.016).abs() < 1e-6);
        assert_eq!(state.frames, 2);
        assert!((state.markers[0].planet_spin - 0.004).abs() < 1e-6);
        let visible: Vec<usize> = state.visible_markers().map(|m| m.index).collect();
        assert_eq!(visible, vec![1, 2, 3]);
    }

    #[test]
    fn marker_sway_follows_elapsed_time() {
        let mut state = RenderState::new(SceneConfig::default(), &default_markers(), 1).unwrap();
        assert_eq!(state.marker_sway(), 0.0);
        state.elapsed_sec = std::f32::consts::PI;
        assert!((state.marker_sway() - 0.1).abs() < 1e-6);
        state.elapsed_sec = 3.0 * std::f32::consts::PI;
        assert!((state.marker_sway() + 0.1).abs() < 1e-5);
        for i in 0..200 {
            state.elapsed_sec = i as f32 * 0.37;
            assert!(state.marker_sway().abs() <= 0.1 + 1e-6);
        }
    }
}
