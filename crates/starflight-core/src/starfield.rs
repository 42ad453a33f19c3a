//! Background starfield: a thick spherical shell of point stars around the
//! scene, deterministic for a given seed.

use crate::color::hsl_to_rgb;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStar {
    pub position: Vec3,
    pub color: [f32; 3],
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldParams {
    pub count: usize,
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness.
    pub depth: f32,
    /// Point size multiplier.
    pub factor: f32,
    pub saturation: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: STARFIELD_COUNT,
            radius: STARFIELD_RADIUS,
            depth: STARFIELD_DEPTH,
            factor: STARFIELD_FACTOR,
            saturation: STARFIELD_SATURATION,
        }
    }
}

/// Stars start on the outer edge of the shell and step inwards by a random
/// fraction of `depth / count` each, so the whole shell is covered. Hue
/// sweeps once around the wheel across the catalog.
pub fn generate_starfield(params: &StarfieldParams, seed: u64) -> Vec<BackgroundStar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let count = params.count;
    let increment = if count > 0 {
        params.depth / count as f32
    } else {
        0.0
    };
    let mut r = params.radius + params.depth;
    let mut stars = Vec::with_capacity(count);
    for i in 0..count {
        r -= increment * rng.gen::<f32>();
        let phi = (1.0 - 2.0 * rng.gen::<f32>()).acos();
        let theta = rng.gen::<f32>() * TAU;
        let position = Vec3::new(
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
            r * phi.sin() * theta.cos(),
        );
        let color = hsl_to_rgb(
            i as f32 / count as f32,
            params.saturation,
            STARFIELD_LIGHTNESS,
        );
        let size = (0.5 + 0.5 * rng.gen::<f32>()) * params.factor;
        stars.push(BackgroundStar {
            position,
            color,
            size,
        });
    }
    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_stay_inside_the_shell() {
        let params = StarfieldParams {
            count: 2000,
            ..Default::default()
        };
        let stars = generate_starfield(&params, 11);
        assert_eq!(stars.len(), 2000);
        for s in &stars {
            let d = s.position.length();
            assert!(d >= params.radius - 1e-2 && d <= params.radius + params.depth + 1e-2);
            assert!(s.size >= 0.5 * params.factor - 1e-4 && s.size <= params.factor + 1e-4);
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let params = StarfieldParams {
            count: 100,
            ..Default::default()
        };
        assert_eq!(generate_starfield(&params, 5), generate_starfield(&params, 5));
    }

    #[test]
    fn empty_catalog() {
        let params = StarfieldParams {
            count: 0,
            ..Default::default()
        };
        assert!(generate_starfield(&params, 1).is_empty());
    }
}
