//! Scroll-to-pose mapping.
//!
//! A single scalar, the damped scroll progress in \[0, 1\], drives everything
//! that moves with the page: where the camera sits on the flight path, where
//! it looks, how the ship banks, and which content marker is active.

use crate::constants::*;
use crate::curve::ControlCurve;
use crate::markers::{active_index, is_visible};
use glam::{Mat3, Quat, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightParams {
    /// Curve parameter reached at full scroll. Below 1 so the camera never
    /// sits on the final control point.
    pub progress_scale: f32,
    pub look_ahead: f32,
    pub camera_roll_amplitude: f32,
    pub ship_roll_amplitude: f32,
    pub ship_pitch_amplitude: f32,
    pub ship_ahead: f32,
    pub ship_drop: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            progress_scale: PATH_PROGRESS_SCALE,
            look_ahead: LOOK_AHEAD_DISTANCE,
            camera_roll_amplitude: CAMERA_ROLL_AMPLITUDE,
            ship_roll_amplitude: SHIP_ROLL_AMPLITUDE,
            ship_pitch_amplitude: SHIP_PITCH_AMPLITUDE,
            ship_ahead: SHIP_AHEAD_DISTANCE,
            ship_drop: SHIP_DROP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    /// Radians about the viewing axis.
    pub roll: f32,
}

impl CameraPose {
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Right-handed basis `(right, up, forward)` before roll is applied.
    pub fn level_basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = match self.forward() {
            f if f == Vec3::ZERO => Vec3::NEG_Z,
            f => f,
        };
        let right = match forward.cross(Vec3::Y).normalize_or_zero() {
            r if r == Vec3::ZERO => Vec3::X,
            r => r,
        };
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Up vector including roll; feed this to the view matrix.
    pub fn up(&self) -> Vec3 {
        let (_, up, forward) = self.level_basis();
        Quat::from_axis_angle(-forward, self.roll) * up
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipPose {
    pub position: Vec3,
    /// Aligns the model (nose along local -Z) with the flight direction.
    pub heading: Quat,
    pub pitch: f32,
    pub roll: f32,
    pub engine_glow: f32,
}

impl ShipPose {
    pub fn orientation(&self) -> Quat {
        self.heading * Quat::from_rotation_z(self.roll) * Quat::from_rotation_x(self.pitch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightPose {
    pub progress: f32,
    pub camera: CameraPose,
    pub ship: ShipPose,
    pub active_marker: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct FlightController {
    curve: ControlCurve,
    params: FlightParams,
    marker_count: usize,
}

impl FlightController {
    pub fn new(curve: ControlCurve, marker_count: usize) -> Self {
        Self::with_params(curve, marker_count, FlightParams::default())
    }

    pub fn with_params(curve: ControlCurve, marker_count: usize, params: FlightParams) -> Self {
        Self {
            curve,
            params,
            marker_count,
        }
    }

    pub fn curve(&self) -> &ControlCurve {
        &self.curve
    }

    pub fn params(&self) -> &FlightParams {
        &self.params
    }

    pub fn marker_count(&self) -> usize {
        self.marker_count
    }

    /// Curve parameter for a scroll progress.
    #[inline]
    pub fn curve_parameter(&self, progress: f32) -> f32 {
        clamp_progress(progress) * self.params.progress_scale
    }

    pub fn camera_pose(&self, progress: f32) -> CameraPose {
        let p = clamp_progress(progress);
        let t = self.curve_parameter(p);
        let position = self.curve.point_at(t);
        let tangent = self.curve.tangent_at(t);
        CameraPose {
            position,
            target: position + tangent * self.params.look_ahead,
            roll: (p * 2.0 * TAU).sin() * self.params.camera_roll_amplitude,
        }
    }

    /// Ship banking is independent of the curve; placement follows the camera.
    pub fn ship_pose(&self, progress: f32, camera: &CameraPose, elapsed_sec: f32) -> ShipPose {
        let p = clamp_progress(progress);
        let (right, up, forward) = camera.level_basis();
        let heading = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
        ShipPose {
            position: camera.position + forward * self.params.ship_ahead
                - up * self.params.ship_drop,
            heading,
            pitch: (p * TAU).sin() * self.params.ship_pitch_amplitude,
            roll: (p * 2.0 * TAU).sin() * self.params.ship_roll_amplitude,
            engine_glow: engine_glow(elapsed_sec),
        }
    }

    pub fn active_marker(&self, progress: f32) -> Option<usize> {
        active_index(progress, self.marker_count)
    }

    pub fn marker_visibility(&self, progress: f32) -> Vec<bool> {
        let active = self.active_marker(progress);
        (0..self.marker_count)
            .map(|i| is_visible(i, active))
            .collect()
    }

    pub fn pose(&self, progress: f32, elapsed_sec: f32) -> FlightPose {
        let progress = clamp_progress(progress);
        let camera = self.camera_pose(progress);
        let ship = self.ship_pose(progress, &camera, elapsed_sec);
        FlightPose {
            progress,
            camera,
            ship,
            active_marker: self.active_marker(progress),
        }
    }
}

/// Engine light flicker for a given session time.
#[inline]
pub fn engine_glow(elapsed_sec: f32) -> f32 {
    ENGINE_GLOW_BASE + (elapsed_sec * ENGINE_GLOW_RATE).sin() * ENGINE_GLOW_FLICKER
}

#[inline]
fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::flight_path_vec3;

    fn controller(markers: usize) -> FlightController {
        FlightController::new(ControlCurve::new(flight_path_vec3()).unwrap(), markers)
    }

    #[test]
    fn target_is_look_ahead_along_tangent() {
        let c = controller(5);
        let pose = c.camera_pose(0.3);
        let dist = (pose.target - pose.position).length();
        assert!((dist - LOOK_AHEAD_DISTANCE).abs() < 1e-3);
        let t = c.curve_parameter(0.3);
        assert!((pose.forward() - c.curve().tangent_at(t)).length() < 1e-4);
    }

    #[test]
    fn roll_follows_progress() {
        let c = controller(5);
        assert!(c.camera_pose(0.0).roll.abs() < 1e-6);
        assert!((c.camera_pose(0.125).roll - 0.1).abs() < 1e-5);
        let ship = c.ship_pose(0.125, &c.camera_pose(0.125), 0.0);
        assert!((ship.roll - 0.2).abs() < 1e-5);
        assert!((ship.pitch - 0.1 * (0.125 * TAU).sin()).abs() < 1e-6);
    }

    #[test]
    fn up_is_perpendicular_to_view() {
        let c = controller(5);
        for i in 0..=20 {
            let pose = c.camera_pose(i as f32 / 20.0);
            assert!(pose.up().dot(pose.forward()).abs() < 1e-4);
            assert!((pose.up().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ship_flies_ahead_of_camera() {
        let c = controller(5);
        let cam = c.camera_pose(0.4);
        let ship = c.ship_pose(0.4, &cam, 0.0);
        let offset = ship.position - cam.position;
        assert!((offset.dot(cam.forward()) - SHIP_AHEAD_DISTANCE).abs() < 1e-3);
        let nose = ship.heading * Vec3::NEG_Z;
        assert!((nose - cam.forward()).length() < 1e-3);
    }

    #[test]
    fn engine_glow_flickers_around_base() {
        assert!((engine_glow(0.0) - 2.0).abs() < 1e-6);
        for i in 0..100 {
            let g = engine_glow(i as f32 * 0.037);
            assert!((1.5 - 1e-6..=2.5 + 1e-6).contains(&g));
        }
    }

    #[test]
    fn empty_marker_list_is_guarded() {
        let c = controller(0);
        let pose = c.pose(0.7, 1.0);
        assert_eq!(pose.active_marker, None);
        assert!(c.marker_visibility(0.7).is_empty());
    }
}
