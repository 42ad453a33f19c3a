use glam::Vec3;

// Shared scene tuning constants used by the core and the web frontend.

// Flight path through the scene, front to back
pub const FLIGHT_PATH_POINTS: [[f32; 3]; 9] = [
    [0.0, 0.0, 0.0],
    [5.0, 2.0, -15.0],
    [-5.0, -3.0, -30.0],
    [10.0, 5.0, -45.0], // sharp bend
    [0.0, 0.0, -60.0],
    [-15.0, 8.0, -75.0], // near right-angle turn
    [-5.0, -5.0, -90.0],
    [8.0, 3.0, -105.0],
    [0.0, 0.0, -120.0],
];

// Camera travel
pub const PATH_PROGRESS_SCALE: f32 = 0.99; // keeps t off the curve's final endpoint
pub const LOOK_AHEAD_DISTANCE: f32 = 10.0;
pub const CAMERA_ROLL_AMPLITUDE: f32 = 0.1;
pub const CAMERA_ROLL_CYCLES: f32 = 2.0; // full sine periods over the whole scroll

// Ship
pub const SHIP_ROLL_AMPLITUDE: f32 = 0.2;
pub const SHIP_PITCH_AMPLITUDE: f32 = 0.1;
pub const SHIP_AHEAD_DISTANCE: f32 = 5.0;
pub const SHIP_DROP: f32 = 1.0;
pub const ENGINE_GLOW_BASE: f32 = 2.0;
pub const ENGINE_GLOW_FLICKER: f32 = 0.5;
pub const ENGINE_GLOW_RATE: f32 = 10.0; // radians per second

// Content markers
pub const MARKER_LIFT: f32 = 2.0;
pub const MARKER_VISIBLE_RADIUS: usize = 1;
pub const MARKER_SWAY_RATE: f32 = 0.5;
pub const MARKER_SWAY_AMPLITUDE: f32 = 0.1;
pub const PLANET_RADIUS: f32 = 0.8;
pub const PLANET_DROP: f32 = 1.0;
pub const PLANET_SPIN_PER_FRAME: f32 = 0.002;

// Asteroid belt
pub const ASTEROID_COUNT: usize = 80;
pub const ASTEROID_XY_HALF_EXTENT: f32 = 30.0;
pub const ASTEROID_Z_NEAR: f32 = -5.0;
pub const ASTEROID_Z_FAR: f32 = -125.0;
pub const ASTEROID_SCALE_MIN: f32 = 0.1;
pub const ASTEROID_SCALE_MAX: f32 = 0.6;
pub const ASTEROID_SPEED_MIN: f32 = 0.2;
pub const ASTEROID_SPEED_MAX: f32 = 0.7;
pub const ASTEROID_SPIN_PER_FRAME: f32 = 0.01; // multiplied by the per-item speed

// Big decorative stars
pub const BIG_STAR_COUNT: usize = 8;
pub const BIG_STAR_XY_HALF_EXTENT: f32 = 40.0;
pub const BIG_STAR_Z_NEAR: f32 = -20.0;
pub const BIG_STAR_Z_FAR: f32 = -170.0;
pub const BIG_STAR_SIZE_MIN: f32 = 2.0;
pub const BIG_STAR_SIZE_MAX: f32 = 5.0;
pub const BIG_STAR_SPIN_MIN: f32 = 0.001;
pub const BIG_STAR_SPIN_MAX: f32 = 0.003;
pub const BIG_STAR_SATURATION: f32 = 0.7;
pub const SUN_FLARE_COUNT: usize = 8;
pub const CRATER_COUNT: usize = 12;

// Background starfield
pub const STARFIELD_COUNT: usize = 8000;
pub const STARFIELD_RADIUS: f32 = 150.0;
pub const STARFIELD_DEPTH: f32 = 80.0;
pub const STARFIELD_FACTOR: f32 = 6.0;
pub const STARFIELD_SATURATION: f32 = 0.5;
pub const STARFIELD_LIGHTNESS: f32 = 0.9;

// Debug path overlay
pub const DEBUG_PATH_SEGMENTS: usize = 50;

#[inline]
pub fn flight_path_vec3() -> Vec<Vec3> {
    FLIGHT_PATH_POINTS.iter().map(|p| Vec3::from_array(*p)).collect()
}
