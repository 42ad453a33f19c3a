//! Procedural scenery: the asteroid belt and a few big decorative stars.
//!
//! Everything here is drawn once from a seeded RNG when the scene starts and
//! kept for the scene's lifetime. The only per-frame mutation is spin.

use crate::color::{hsl_to_rgb, parse_hex};
use crate::constants::*;
use crate::markers::{RingSpec, Surface};
use glam::{Vec2, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub position: Vec3,
    /// Euler angles (XYZ) in radians.
    pub rotation: Vec3,
    pub scale: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarKind {
    Plain,
    Sun,
    Ringed,
    Cratered,
}

impl StarKind {
    pub const ALL: [StarKind; 4] = [
        StarKind::Plain,
        StarKind::Sun,
        StarKind::Ringed,
        StarKind::Cratered,
    ];
}

/// Glowing blob on a sun's rim. Pulses over time, see [`flare_scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flare {
    pub offset: Vec3,
    pub radius: f32,
}

/// Shallow cylinder pressed into a cratered star's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crater {
    pub offset: Vec3,
    pub rotation: Vec2,
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub depth: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BigStar {
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 3],
    pub kind: StarKind,
    pub rotation_speed: f32,
    /// Accumulated spin about Y.
    pub yaw: f32,
    pub flares: SmallVec<[Flare; SUN_FLARE_COUNT]>,
    pub craters: SmallVec<[Crater; CRATER_COUNT]>,
}

impl BigStar {
    pub fn surface(&self) -> Surface {
        match self.kind {
            StarKind::Sun => Surface {
                base: self.color,
                emissive: self.color,
                emissive_intensity: 2.0,
                roughness: 0.4,
                metalness: 0.0,
            },
            StarKind::Ringed => Surface {
                base: self.color,
                emissive: [0.0; 3],
                emissive_intensity: 0.0,
                roughness: 0.7,
                metalness: 0.2,
            },
            StarKind::Cratered => Surface {
                base: [0.667; 3],
                emissive: [0.0; 3],
                emissive_intensity: 0.0,
                roughness: 1.0,
                metalness: 0.1,
            },
            StarKind::Plain => Surface {
                base: self.color,
                emissive: self.color,
                emissive_intensity: 0.5,
                roughness: 1.0,
                metalness: 0.0,
            },
        }
    }

    pub fn ring(&self) -> Option<RingSpec> {
        (self.kind == StarKind::Ringed).then(|| RingSpec {
            inner: self.size * 1.5,
            outer: self.size * 2.0,
            color: self.color,
            opacity: 0.7,
            tilt: PI / 3.0,
            depth_offset: 0.0,
        })
    }

    /// Translucent halo around sun stars.
    pub fn corona_radius(&self) -> Option<f32> {
        (self.kind == StarKind::Sun).then_some(self.size * 1.5)
    }

    pub fn light(&self) -> PointLight {
        PointLight {
            position: self.position,
            color: self.color,
            intensity: if self.kind == StarKind::Sun { 5.0 } else { 2.0 },
            range: self.size * 20.0,
        }
    }
}

pub fn crater_color() -> [f32; 3] {
    parse_hex("#666666").unwrap_or([0.4; 3])
}

pub fn generate_asteroids<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Asteroid> {
    (0..count)
        .map(|_| Asteroid {
            position: Vec3::new(
                rng.gen_range(-ASTEROID_XY_HALF_EXTENT..=ASTEROID_XY_HALF_EXTENT),
                rng.gen_range(-ASTEROID_XY_HALF_EXTENT..=ASTEROID_XY_HALF_EXTENT),
                rng.gen_range(ASTEROID_Z_FAR..=ASTEROID_Z_NEAR),
            ),
            rotation: Vec3::new(
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
            ),
            scale: rng.gen_range(ASTEROID_SCALE_MIN..=ASTEROID_SCALE_MAX),
            speed: rng.gen_range(ASTEROID_SPEED_MIN..=ASTEROID_SPEED_MAX),
        })
        .collect()
}

pub fn generate_big_stars<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<BigStar> {
    (0..count)
        .map(|_| {
            let position = Vec3::new(
                rng.gen_range(-BIG_STAR_XY_HALF_EXTENT..=BIG_STAR_XY_HALF_EXTENT),
                rng.gen_range(-BIG_STAR_XY_HALF_EXTENT..=BIG_STAR_XY_HALF_EXTENT),
                rng.gen_range(BIG_STAR_Z_FAR..=BIG_STAR_Z_NEAR),
            );
            let size = rng.gen_range(BIG_STAR_SIZE_MIN..=BIG_STAR_SIZE_MAX);
            let hue: f32 = rng.gen();
            let lightness = 0.5 + rng.gen::<f32>() * 0.5;
            let color = hsl_to_rgb(hue, BIG_STAR_SATURATION, lightness);
            let kind = StarKind::ALL[rng.gen_range(0..StarKind::ALL.len())];
            let rotation_speed = rng.gen_range(BIG_STAR_SPIN_MIN..=BIG_STAR_SPIN_MAX);

            let mut flares = SmallVec::new();
            let mut craters = SmallVec::new();
            match kind {
                StarKind::Sun => {
                    let rim = size + 0.5;
                    for j in 0..SUN_FLARE_COUNT {
                        let a = j as f32 / SUN_FLARE_COUNT as f32 * TAU;
                        flares.push(Flare {
                            offset: Vec3::new(a.sin() * rim, a.cos() * rim, 0.0),
                            radius: size * 0.4,
                        });
                    }
                }
                StarKind::Cratered => {
                    for _ in 0..CRATER_COUNT {
                        craters.push(Crater {
                            offset: Vec3::new(
                                rng.gen::<f32>() * size * 1.5 - size * 0.75,
                                rng.gen::<f32>() * size * 1.5 - size * 0.75,
                                rng.gen::<f32>() * size * 0.5 + size * 0.5,
                            ),
                            rotation: Vec2::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI),
                            top_radius: size * 0.2,
                            bottom_radius: size * 0.3,
                            depth: size * 0.1,
                        });
                    }
                }
                StarKind::Plain | StarKind::Ringed => {}
            }

            BigStar {
                position,
                size,
                color,
                kind,
                rotation_speed,
                yaw: 0.0,
                flares,
                craters,
            }
        })
        .collect()
}

/// Horizontal/vertical stretch of a sun flare at `elapsed_sec`.
#[inline]
pub fn flare_scale(flare: &Flare, elapsed_sec: f32) -> Vec2 {
    Vec2::new(
        1.0 + (elapsed_sec * 2.0 + flare.offset.x).sin() * 0.2,
        1.0 + (elapsed_sec * 3.0 + flare.offset.y).cos() * 0.3,
    )
}

/// The scene's generated scenery. Built once; [`Decorations::advance`] is the
/// only mutation afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorations {
    pub seed: u64,
    pub asteroids: Vec<Asteroid>,
    pub stars: Vec<BigStar>,
}

impl Decorations {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let asteroids = generate_asteroids(&mut rng, ASTEROID_COUNT);
        let stars = generate_big_stars(&mut rng, BIG_STAR_COUNT);
        log::debug!(
            "[decorations] seed={} asteroids={} stars={} suns={}",
            seed,
            asteroids.len(),
            stars.len(),
            stars.iter().filter(|s| s.kind == StarKind::Sun).count()
        );
        Self {
            seed,
            asteroids,
            stars,
        }
    }

    /// One frame of spin.
    pub fn advance(&mut self) {
        for a in &mut self.asteroids {
            a.rotation.x += ASTEROID_SPIN_PER_FRAME * a.speed;
            a.rotation.y += ASTEROID_SPIN_PER_FRAME * a.speed;
        }
        for s in &mut self.stars {
            s.yaw += s.rotation_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_extras_match_kind() {
        let d = Decorations::generate(7);
        for s in &d.stars {
            assert_eq!(s.flares.len(), if s.kind == StarKind::Sun { 8 } else { 0 });
            assert_eq!(s.craters.len(), if s.kind == StarKind::Cratered { 12 } else { 0 });
            assert_eq!(s.ring().is_some(), s.kind == StarKind::Ringed);
            assert_eq!(s.corona_radius().is_some(), s.kind == StarKind::Sun);
        }
    }

    #[test]
    fn sun_flares_sit_on_the_rim() {
        let mut rng = StdRng::seed_from_u64(1);
        let stars = generate_big_stars(&mut rng, 64);
        let sun = stars.iter().find(|s| s.kind == StarKind::Sun).unwrap();
        for f in &sun.flares {
            assert!((f.offset.length() - (sun.size + 0.5)).abs() < 1e-4);
        }
    }

    #[test]
    fn flare_scale_stays_in_band() {
        let f = Flare {
            offset: Vec3::new(1.0, 2.0, 0.0),
            radius: 1.0,
        };
        for i in 0..200 {
            let s = flare_scale(&f, i as f32 * 0.1);
            assert!(s.x >= 0.8 - 1e-6 && s.x <= 1.2 + 1e-6);
            assert!(s.y >= 0.7 - 1e-6 && s.y <= 1.3 + 1e-6);
        }
    }

    #[test]
    fn advance_spins_by_stored_speed() {
        let mut d = Decorations::generate(3);
        let before = d.clone();
        d.advance();
        for (a, b) in d.asteroids.iter().zip(before.asteroids.iter()) {
            assert!((a.rotation.x - b.rotation.x - 0.01 * b.speed).abs() < 1e-6);
            assert!((a.rotation.y - b.rotation.y - 0.01 * b.speed).abs() < 1e-6);
            assert_eq!(a.rotation.z, b.rotation.z);
            assert_eq!(a.position, b.position);
        }
        for (s, b) in d.stars.iter().zip(before.stars.iter()) {
            assert!((s.yaw - b.rotation_speed).abs() < 1e-7);
        }
    }
}
