// Flattens a `RenderState` into the instance and uniform records the scene
// shader consumes. Kept free of wgpu/web-sys so it can be tested on the host.

use glam::{Quat, Vec3};
use starflight_core::constants::{PLANET_DROP, PLANET_RADIUS};
use starflight_core::{
    crater_color, flare_scale, BackgroundStar, Camera, PlanetStyle, PointLight, RenderState,
    RingSpec, StarKind, Surface,
};

pub const MAX_LIGHTS: usize = 12;

pub const KIND_SPHERE: f32 = 0.0;
pub const KIND_GLOW: f32 = 1.0;
pub const KIND_RING: f32 = 2.0;
pub const KIND_POINT: f32 = 3.0;

pub const PATTERN_NONE: f32 = 0.0;
pub const PATTERN_BANDS: f32 = 1.0;
pub const PATTERN_CRATERS: f32 = 2.0;
pub const PATTERN_FACETS: f32 = 3.0;

const ASTEROID_COLOR: [f32; 3] = [0.533, 0.533, 0.533];
const ENGINE_COLOR: [f32; 3] = [1.0, 0.267, 0.0];
const ENGINE_LIGHT_RANGE: f32 = 3.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub center_radius: [f32; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    pub params: [f32; 4],
    pub axis: [f32; 4],
    pub stretch: [f32; 4],
}

impl InstanceRaw {
    pub fn kind(&self) -> f32 {
        self.emissive[3]
    }

    fn sphere(center: Vec3, radius: f32, surface: &Surface, pattern: f32, spin: f32) -> Self {
        let e = surface.emissive;
        let k = surface.emissive_intensity;
        Self {
            center_radius: [center.x, center.y, center.z, radius],
            color: [surface.base[0], surface.base[1], surface.base[2], 1.0],
            emissive: [e[0] * k, e[1] * k, e[2] * k, KIND_SPHERE],
            params: [surface.roughness, surface.metalness, 0.0, pattern],
            axis: [0.0, 1.0, 0.0, spin],
            stretch: [1.0, 1.0, 0.0, 0.0],
        }
    }

    fn glow(center: Vec3, radius: f32, color: [f32; 3], opacity: f32, emissive: [f32; 3]) -> Self {
        Self {
            center_radius: [center.x, center.y, center.z, radius],
            color: [color[0], color[1], color[2], opacity],
            emissive: [emissive[0], emissive[1], emissive[2], KIND_GLOW],
            params: [1.0, 0.0, 0.0, PATTERN_NONE],
            axis: [0.0, 1.0, 0.0, 0.0],
            stretch: [1.0, 1.0, 0.0, 0.0],
        }
    }

    fn ring(center: Vec3, normal: Vec3, ring: &RingSpec) -> Self {
        Self {
            center_radius: [center.x, center.y, center.z, ring.outer],
            color: [ring.color[0], ring.color[1], ring.color[2], ring.opacity],
            emissive: [0.0, 0.0, 0.0, KIND_RING],
            params: [0.7, 0.0, ring.inner / ring.outer.max(1e-4), PATTERN_NONE],
            axis: [normal.x, normal.y, normal.z, 0.0],
            stretch: [1.0, 1.0, 0.0, 0.0],
        }
    }

    fn point(star: &BackgroundStar, size_scale: f32) -> Self {
        let p = star.position;
        Self {
            center_radius: [p.x, p.y, p.z, star.size * size_scale],
            color: [star.color[0], star.color[1], star.color[2], 1.0],
            emissive: [0.5, 0.0, 0.0, KIND_POINT],
            params: [0.0, 0.0, 0.0, PATTERN_NONE],
            axis: [0.0, 1.0, 0.0, 0.0],
            stretch: [1.0, 1.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneGlobals {
    pub view_proj: [[f32; 4]; 4],
    pub cam_pos: [f32; 4],
    pub cam_right: [f32; 4],
    pub cam_up: [f32; 4],
    pub fog_color: [f32; 4],
    pub sun_dir: [f32; 4],
    pub counts: [f32; 4],
    pub light_pos: [[f32; 4]; MAX_LIGHTS],
    pub light_color: [[f32; 4]; MAX_LIGHTS],
}

/// Per-frame draw lists.
#[derive(Default)]
pub struct SceneInstances {
    pub solid: Vec<InstanceRaw>,
    /// Translucent geometry, sorted far to near.
    pub glow: Vec<InstanceRaw>,
    pub lights: Vec<PointLight>,
}

/// World-space radius per unit of star size; the shell is far away so the
/// dots need to be wide to register at all.
const BACKGROUND_POINT_SCALE: f32 = 0.12;

/// Static background; upload once.
pub fn background_instances(stars: &[BackgroundStar]) -> Vec<InstanceRaw> {
    stars
        .iter()
        .map(|s| InstanceRaw::point(s, BACKGROUND_POINT_SCALE))
        .collect()
}

fn rotate_y(v: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * v
}

pub fn build_frame(state: &RenderState, out: &mut SceneInstances) {
    out.solid.clear();
    out.glow.clear();
    out.lights.clear();

    push_asteroids(state, out);
    push_big_stars(state, out);
    push_markers(state, out);
    push_ship(state, out);

    let eye = state.pose.camera.position;
    out.glow.sort_by(|a, b| {
        let da = Vec3::from_slice(&a.center_radius[..3]).distance_squared(eye);
        let db = Vec3::from_slice(&b.center_radius[..3]).distance_squared(eye);
        db.total_cmp(&da)
    });
    out.lights.truncate(MAX_LIGHTS);
}

fn push_asteroids(state: &RenderState, out: &mut SceneInstances) {
    let rock = Surface {
        base: ASTEROID_COLOR,
        emissive: [0.0; 3],
        emissive_intensity: 0.0,
        roughness: 0.8,
        metalness: 0.2,
    };
    for a in &state.decorations.asteroids {
        out.solid.push(InstanceRaw::sphere(
            a.position,
            a.scale,
            &rock,
            PATTERN_FACETS,
            a.rotation.y + a.rotation.x,
        ));
    }
}

fn push_big_stars(state: &RenderState, out: &mut SceneInstances) {
    let t = state.elapsed_sec;
    for s in &state.decorations.stars {
        let pattern = match s.kind {
            StarKind::Ringed => PATTERN_BANDS,
            StarKind::Cratered => PATTERN_CRATERS,
            StarKind::Plain | StarKind::Sun => PATTERN_NONE,
        };
        out.solid
            .push(InstanceRaw::sphere(s.position, s.size, &s.surface(), pattern, s.yaw));

        let crater = Surface {
            base: crater_color(),
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            roughness: 1.0,
            metalness: 0.0,
        };
        for c in &s.craters {
            let at = s.position + rotate_y(c.offset, s.yaw);
            out.solid
                .push(InstanceRaw::sphere(at, c.top_radius, &crater, PATTERN_NONE, 0.0));
        }

        for f in &s.flares {
            let at = s.position + rotate_y(f.offset, s.yaw);
            let mut g = InstanceRaw::glow(at, f.radius, s.color, 0.6, [0.0; 3]);
            let stretch = flare_scale(f, t);
            g.stretch = [stretch.x, stretch.y, 0.0, 0.0];
            out.glow.push(g);
        }
        if let Some(r) = s.corona_radius() {
            out.glow
                .push(InstanceRaw::glow(s.position, r, s.color, 0.2, [0.0; 3]));
        }
        if let Some(ring) = s.ring() {
            let normal = Quat::from_rotation_y(s.yaw) * Quat::from_rotation_x(ring.tilt) * Vec3::Z;
            out.glow.push(InstanceRaw::ring(s.position, normal, &ring));
        }
        out.lights.push(s.light());
    }
}

fn push_markers(state: &RenderState, out: &mut SceneInstances) {
    let sway = state.marker_sway();
    for m in state.visible_markers() {
        let center = m.anchor - Vec3::Y * PLANET_DROP;
        let pattern = if m.style == PlanetStyle::Banded {
            PATTERN_BANDS
        } else {
            PATTERN_NONE
        };
        out.solid.push(InstanceRaw::sphere(
            center,
            PLANET_RADIUS,
            &m.style.surface(),
            pattern,
            m.planet_spin + sway,
        ));
        if let Some(ring) = m.style.ring() {
            let turn = Quat::from_rotation_y(sway);
            let normal = turn * Quat::from_rotation_x(ring.tilt) * Vec3::Z;
            let at = center + turn * Vec3::new(0.0, 0.0, ring.depth_offset);
            out.glow.push(InstanceRaw::ring(at, normal, &ring));
        }
    }
}

struct ShipPart {
    offset: Vec3,
    radius: f32,
    color: [f32; 3],
    metalness: f32,
    roughness: f32,
}

const SHIP_PARTS: [ShipPart; 7] = [
    // hull
    ShipPart {
        offset: Vec3::new(0.0, 0.0, 0.0),
        radius: 0.2,
        color: [0.91, 0.91, 0.91],
        metalness: 0.7,
        roughness: 0.3,
    },
    // nose
    ShipPart {
        offset: Vec3::new(0.0, 0.0, -0.35),
        radius: 0.12,
        color: [0.91, 0.91, 0.91],
        metalness: 0.7,
        roughness: 0.3,
    },
    // cockpit
    ShipPart {
        offset: Vec3::new(0.0, 0.12, -0.05),
        radius: 0.12,
        color: [0.533, 0.8, 1.0],
        metalness: 0.9,
        roughness: 0.1,
    },
    // wings
    ShipPart {
        offset: Vec3::new(-0.35, 0.0, 0.1),
        radius: 0.12,
        color: [1.0, 1.0, 1.0],
        metalness: 0.7,
        roughness: 0.3,
    },
    ShipPart {
        offset: Vec3::new(0.35, 0.0, 0.1),
        radius: 0.12,
        color: [1.0, 1.0, 1.0],
        metalness: 0.7,
        roughness: 0.3,
    },
    // tail fin
    ShipPart {
        offset: Vec3::new(0.0, 0.2, 0.3),
        radius: 0.08,
        color: [1.0, 1.0, 1.0],
        metalness: 0.7,
        roughness: 0.3,
    },
    // engine housing
    ShipPart {
        offset: Vec3::new(0.0, 0.0, 0.45),
        radius: 0.13,
        color: [0.816, 0.816, 0.816],
        metalness: 0.9,
        roughness: 0.1,
    },
];

const FLAME_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.65);

fn push_ship(state: &RenderState, out: &mut SceneInstances) {
    let ship = &state.pose.ship;
    let q = ship.orientation();
    for part in &SHIP_PARTS {
        let surface = Surface {
            base: part.color,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            roughness: part.roughness,
            metalness: part.metalness,
        };
        out.solid.push(InstanceRaw::sphere(
            ship.position + q * part.offset,
            part.radius,
            &surface,
            PATTERN_NONE,
            0.0,
        ));
    }
    let flame_at = ship.position + q * FLAME_OFFSET;
    let e = ship.engine_glow;
    out.glow.push(InstanceRaw::glow(
        flame_at,
        0.15,
        ENGINE_COLOR,
        0.8,
        [ENGINE_COLOR[0] * e, ENGINE_COLOR[1] * e, ENGINE_COLOR[2] * e],
    ));
    out.lights.push(PointLight {
        position: flame_at,
        color: ENGINE_COLOR,
        intensity: e,
        range: ENGINE_LIGHT_RANGE,
    });
}

pub fn scene_globals(state: &RenderState, camera: &Camera, lights: &[PointLight]) -> SceneGlobals {
    let forward = (camera.target - camera.eye).normalize_or_zero();
    let right = forward.cross(camera.up).normalize_or_zero();
    let up = right.cross(forward);
    let cfg = &state.config;
    let sun = cfg.lighting.sun_position.normalize_or_zero();

    let mut light_pos = [[0.0; 4]; MAX_LIGHTS];
    let mut light_color = [[0.0; 4]; MAX_LIGHTS];
    let n = lights.len().min(MAX_LIGHTS);
    for (i, l) in lights.iter().take(n).enumerate() {
        light_pos[i] = [l.position.x, l.position.y, l.position.z, l.range];
        light_color[i] = [
            l.color[0] * l.intensity,
            l.color[1] * l.intensity,
            l.color[2] * l.intensity,
            0.0,
        ];
    }

    SceneGlobals {
        view_proj: camera.view_projection().to_cols_array_2d(),
        cam_pos: [camera.eye.x, camera.eye.y, camera.eye.z, state.elapsed_sec],
        cam_right: [right.x, right.y, right.z, cfg.fog.near],
        cam_up: [up.x, up.y, up.z, cfg.fog.far],
        fog_color: [
            cfg.fog.color[0],
            cfg.fog.color[1],
            cfg.fog.color[2],
            cfg.lighting.ambient,
        ],
        sun_dir: [sun.x, sun.y, sun.z, cfg.lighting.sun_intensity],
        counts: [n as f32, 0.0, 0.0, 0.0],
        light_pos,
        light_color,
    }
}
