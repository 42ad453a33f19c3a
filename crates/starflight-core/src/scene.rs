//! Static scene composition: camera projection, lights, fog, post effects and
//! the scroll area. None of this changes after startup.

use crate::constants::*;
use crate::controller::FlightParams;
use crate::curve::CurveKind;
use crate::starfield::StarfieldParams;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingConfig {
    pub ambient: f32,
    pub sun_position: Vec3,
    pub sun_intensity: f32,
}

/// Linear distance fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogConfig {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl FogConfig {
    /// 0 = clear, 1 = fully fogged.
    pub fn factor(&self, distance: f32) -> f32 {
        let span = (self.far - self.near).max(f32::EPSILON);
        ((distance - self.near) / span).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomConfig {
    pub threshold: f32,
    pub smoothing: f32,
    pub strength: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteConfig {
    pub offset: f32,
    pub darkness: f32,
}

impl VignetteConfig {
    /// CPU mirror of the composite pass: blend toward `1 - darkness` by the
    /// squared distance from the centre, scaled by `offset`.
    pub fn apply(&self, color: Vec3, uv: [f32; 2]) -> Vec3 {
        let coord = (glam::Vec2::from(uv) - glam::Vec2::splat(0.5)) * self.offset;
        color.lerp(Vec3::splat(1.0 - self.darkness), coord.length_squared())
    }
}

/// Virtual scroll area the page exposes to the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    pub pages: f32,
    /// Smoothing time constant in seconds.
    pub damping: f32,
    pub distance: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub control_points: Vec<Vec3>,
    pub curve_kind: CurveKind,
    pub flight: FlightParams,
    pub projection: ProjectionConfig,
    pub lighting: LightingConfig,
    pub fog: FogConfig,
    pub bloom: BloomConfig,
    pub vignette: VignetteConfig,
    pub scroll: ScrollConfig,
    pub starfield: StarfieldParams,
    pub clear_color: [f32; 3],
    pub debug_path: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            control_points: flight_path_vec3(),
            curve_kind: CurveKind::Centripetal,
            flight: FlightParams::default(),
            projection: ProjectionConfig {
                fovy_degrees: 75.0,
                znear: 0.1,
                zfar: 1000.0,
            },
            lighting: LightingConfig {
                ambient: 0.2,
                sun_position: Vec3::new(10.0, 10.0, 5.0),
                sun_intensity: 1.0,
            },
            fog: FogConfig {
                color: [0.0, 0.0, 0.0],
                near: 10.0,
                far: 80.0,
            },
            bloom: BloomConfig {
                threshold: 0.2,
                smoothing: 0.9,
                strength: 1.0,
            },
            vignette: VignetteConfig {
                offset: 0.1,
                darkness: 0.5,
            },
            scroll: ScrollConfig {
                pages: 5.0,
                damping: 0.25,
                distance: 1.0,
            },
            starfield: StarfieldParams::default(),
            clear_color: [0.0, 0.0, 0.0],
            debug_path: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_ramps_between_near_and_far() {
        let fog = SceneConfig::default().fog;
        assert_eq!(fog.factor(5.0), 0.0);
        assert!((fog.factor(45.0) - 0.5).abs() < 1e-6);
        assert_eq!(fog.factor(200.0), 1.0);
    }

    #[test]
    fn default_path_has_nine_points() {
        assert_eq!(SceneConfig::default().control_points.len(), 9);
    }

    #[test]
    fn vignette_is_faint_at_default_settings() {
        let v = SceneConfig::default().vignette;
        let white = Vec3::ONE;
        assert_eq!(v.apply(white, [0.5, 0.5]), white);
        // corner: coord = 0.05, weight 0.005
        let corner = v.apply(white, [0.0, 0.0]);
        assert!((corner.x - (1.0 - 0.005 * 0.5)).abs() < 1e-6);
        assert!(corner.x > 0.99);
    }

    #[test]
    fn composite_shader_uses_mix_vignette() {
        let src = crate::POST_WGSL;
        assert!(src.contains("mix(c, vec3<f32>(1.0 - u.vignette_darkness), dot(coord, coord))"));
        assert!(!src.contains("smoothstep(0.8"));
    }
}
