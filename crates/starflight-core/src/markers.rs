//! Labelled content markers placed along the flight path.
//!
//! Each marker is anchored once on the curve at `(index + 0.5) / count` and
//! lifted a little above the path. At runtime only the active marker and its
//! direct neighbours are shown.

use crate::color::parse_hex;
use crate::constants::{MARKER_LIFT, MARKER_VISIBLE_RADIUS};
use crate::curve::ControlCurve;
use crate::error::SceneError;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct ContentMarker {
    pub title: String,
    pub description: String,
    pub color: [f32; 3],
}

impl ContentMarker {
    pub fn new(title: &str, description: &str, hex_color: &str) -> Result<Self, SceneError> {
        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            color: parse_hex(hex_color)?,
        })
    }
}

/// The stock content shown when the host page supplies nothing else.
pub fn default_markers() -> Vec<ContentMarker> {
    let entries = [
        (
            "Mission",
            "Unravel the mysteries of space and widen what people can do",
            "#ff9900",
        ),
        (
            "Vision",
            "A future where everyone shares in what space has to offer",
            "#00aaff",
        ),
        (
            "Value",
            "Curiosity, collaboration, innovation and sustainability",
            "#44cc44",
        ),
        (
            "Team",
            "Specialists from many different backgrounds, together",
            "#ff44aa",
        ),
        ("Contact", "Come along on the next adventure", "#ffffff"),
    ];
    entries
        .iter()
        .filter_map(|(t, d, c)| ContentMarker::new(t, d, c).ok())
        .collect()
}

/// Visual treatment of a marker's planet, picked from its title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanetStyle {
    /// Glowing sun with a flat corona ring facing the viewer.
    Corona,
    /// Gas giant with a banded ring around its equator.
    Banded,
    Rocky,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub base: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub inner: f32,
    pub outer: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    /// Rotation about the local X axis; 0 keeps the ring facing +Z.
    pub tilt: f32,
    /// Offset along local Z from the planet centre.
    pub depth_offset: f32,
}

fn rgb8(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

impl PlanetStyle {
    pub fn for_title(title: &str) -> Self {
        match title.trim().to_lowercase().as_str() {
            "vision" => PlanetStyle::Corona,
            "value" => PlanetStyle::Banded,
            _ => PlanetStyle::Rocky,
        }
    }

    pub fn surface(self) -> Surface {
        match self {
            PlanetStyle::Corona => Surface {
                base: rgb8(0xff, 0x6b, 0x00),
                emissive: rgb8(0xff, 0x44, 0x00),
                emissive_intensity: 2.0,
                roughness: 0.7,
                metalness: 0.0,
            },
            PlanetStyle::Banded => Surface {
                base: rgb8(0xcd, 0x85, 0x00),
                emissive: [0.0; 3],
                emissive_intensity: 0.0,
                roughness: 0.7,
                metalness: 0.3,
            },
            PlanetStyle::Rocky => Surface {
                base: rgb8(0xc1, 0x44, 0x0e),
                emissive: [0.0; 3],
                emissive_intensity: 0.0,
                roughness: 0.8,
                metalness: 0.2,
            },
        }
    }

    pub fn ring(self) -> Option<RingSpec> {
        match self {
            PlanetStyle::Corona => Some(RingSpec {
                inner: 1.2,
                outer: 1.4,
                color: rgb8(0xff, 0x6b, 0x00),
                opacity: 0.3,
                tilt: 0.0,
                depth_offset: -0.1,
            }),
            PlanetStyle::Banded => Some(RingSpec {
                inner: 1.1,
                outer: 1.3,
                color: rgb8(0xa6, 0x70, 0x00),
                opacity: 0.4,
                tilt: std::f32::consts::FRAC_PI_2,
                depth_offset: 0.0,
            }),
            PlanetStyle::Rocky => None,
        }
    }
}

/// A marker anchored in world space.
#[derive(Clone, Debug)]
pub struct PlacedMarker {
    pub index: usize,
    pub marker: ContentMarker,
    pub anchor: Vec3,
    pub style: PlanetStyle,
    /// Accumulated planet spin in radians.
    pub planet_spin: f32,
}

/// Anchor every marker on the curve. Done once per scene.
pub fn place_markers(curve: &ControlCurve, markers: &[ContentMarker]) -> Vec<PlacedMarker> {
    let count = markers.len();
    markers
        .iter()
        .enumerate()
        .map(|(index, marker)| {
            let t = (index as f32 + 0.5) / count as f32;
            PlacedMarker {
                index,
                marker: marker.clone(),
                anchor: curve.point_at(t) + Vec3::Y * MARKER_LIFT,
                style: PlanetStyle::for_title(&marker.title),
                planet_spin: 0.0,
            }
        })
        .collect()
}

/// Section currently in view: `floor(progress * count)` clamped to the last
/// marker. `None` when there are no markers.
pub fn active_index(progress: f32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let raw = (p * count as f32).floor() as usize;
    Some(raw.min(count - 1))
}

#[inline]
pub fn is_visible(index: usize, active: Option<usize>) -> bool {
    active.is_some_and(|a| index.abs_diff(a) <= MARKER_VISIBLE_RADIUS)
}
