//! Open Catmull-Rom spline through a fixed list of control points.
//!
//! The curve is parameterised per segment: `t` in \[0, 1\] maps linearly onto
//! `n - 1` segments, so control point `i` sits exactly at `t = i / (n - 1)`.
//! Positions are not arc-length uniform, which matches how the flight path
//! was authored (each segment is roughly 15 units deep).

use crate::error::SceneError;
use glam::Vec3;

/// Spline flavour. Centripetal avoids cusps and self-intersection on
/// unevenly spaced points and is the default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveKind {
    Centripetal,
    Chordal,
    Uniform { tension: f32 },
}

impl Default for CurveKind {
    fn default() -> Self {
        CurveKind::Centripetal
    }
}

#[derive(Clone, Debug)]
pub struct ControlCurve {
    points: Vec<Vec3>,
    kind: CurveKind,
}

/// Cubic `c0 + c1*w + c2*w^2 + c3*w^3` evaluated per component.
#[derive(Clone, Copy, Debug)]
struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    /// Hermite form from end values and end tangents.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn value(&self, w: f32) -> Vec3 {
        let w2 = w * w;
        self.c0 + self.c1 * w + self.c2 * w2 + self.c3 * (w2 * w)
    }

    fn derivative(&self, w: f32) -> Vec3 {
        self.c1 + 2.0 * self.c2 * w + 3.0 * self.c3 * (w * w)
    }
}

const KNOT_EPSILON: f32 = 1e-4;
const TANGENT_PROBE: f32 = 1e-4;

impl ControlCurve {
    pub fn new(points: Vec<Vec3>) -> Result<Self, SceneError> {
        Self::with_kind(points, CurveKind::default())
    }

    pub fn with_kind(points: Vec<Vec3>, kind: CurveKind) -> Result<Self, SceneError> {
        if points.len() < 2 {
            return Err(SceneError::TooFewControlPoints(points.len()));
        }
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(SceneError::NonFiniteControlPoint {
                index,
                point: p.to_array(),
            });
        }
        Ok(Self { points, kind })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Position on the curve at parameter `t` (clamped to \[0, 1\]).
    pub fn point_at(&self, t: f32) -> Vec3 {
        let (cubic, w) = self.segment(t);
        cubic.value(w)
    }

    /// Unit tangent in the direction of increasing `t`.
    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let (cubic, w) = self.segment(t);
        let d = cubic.derivative(w).normalize_or_zero();
        if d != Vec3::ZERO {
            return d;
        }
        // Stationary point (coincident control points): fall back to a chord.
        let t = sanitize(t);
        let a = self.point_at((t - TANGENT_PROBE).max(0.0));
        let b = self.point_at((t + TANGENT_PROBE).min(1.0));
        let chord = (b - a).normalize_or_zero();
        if chord != Vec3::ZERO {
            return chord;
        }
        let overall = (self.points[self.points.len() - 1] - self.points[0]).normalize_or_zero();
        if overall != Vec3::ZERO {
            overall
        } else {
            Vec3::NEG_Z
        }
    }

    /// `segments + 1` evenly spaced samples from `t = 0` to `t = 1`.
    pub fn sample_points(&self, segments: usize) -> Vec<Vec3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }

    fn segment(&self, t: f32) -> (Cubic, f32) {
        let pts = &self.points;
        let n = pts.len();
        let p = (n - 1) as f32 * sanitize(t);
        let mut index = (p.floor() as usize).min(n - 1);
        let mut w = p - index as f32;
        if index == n - 1 {
            index = n - 2;
            w = 1.0;
        }

        let p0 = if index > 0 {
            pts[index - 1]
        } else {
            2.0 * pts[0] - pts[1]
        };
        let p1 = pts[index];
        let p2 = pts[index + 1];
        let p3 = if index + 2 < n {
            pts[index + 2]
        } else {
            2.0 * pts[n - 1] - pts[n - 2]
        };

        let cubic = match self.kind {
            CurveKind::Uniform { tension } => {
                Cubic::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
            }
            CurveKind::Centripetal => non_uniform(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => non_uniform(p0, p1, p2, p3, 0.5),
        };
        (cubic, w)
    }
}

/// Non-uniform Catmull-Rom segment between `p1` and `p2`. Knot spacing is
/// `|p_i+1 - p_i|^(2*pow)`, re-expressed on the unit interval.
fn non_uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, pow: f32) -> Cubic {
    let mut dt0 = p0.distance_squared(p1).powf(pow);
    let mut dt1 = p1.distance_squared(p2).powf(pow);
    let mut dt2 = p2.distance_squared(p3).powf(pow);
    if dt1 < KNOT_EPSILON {
        dt1 = 1.0;
    }
    if dt0 < KNOT_EPSILON {
        dt0 = dt1;
    }
    if dt2 < KNOT_EPSILON {
        dt2 = dt1;
    }
    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
    Cubic::hermite(p1, p2, t1, t2)
}

#[inline]
fn sanitize(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::flight_path_vec3;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn passes_through_control_points() {
        for kind in [
            CurveKind::Centripetal,
            CurveKind::Chordal,
            CurveKind::Uniform { tension: 0.5 },
        ] {
            let curve = ControlCurve::with_kind(flight_path_vec3(), kind).unwrap();
            let n = curve.points().len();
            for (i, p) in curve.points().iter().enumerate() {
                let t = i as f32 / (n - 1) as f32;
                assert!(approx(curve.point_at(t), *p), "{kind:?} point {i}");
            }
        }
    }

    #[test]
    fn tangents_are_unit_length() {
        let curve = ControlCurve::new(flight_path_vec3()).unwrap();
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let len = curve.tangent_at(t).length();
            assert!((len - 1.0).abs() < 1e-4, "t={t} len={len}");
        }
    }

    #[test]
    fn straight_line_is_linear() {
        let pts = vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, -20.0)];
        let curve = ControlCurve::new(pts).unwrap();
        assert!(approx(curve.point_at(0.25), Vec3::new(0.0, 0.0, -5.0)));
        assert!(approx(curve.tangent_at(0.6), Vec3::NEG_Z));
    }

    #[test]
    fn coincident_points_still_give_a_direction() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let curve = ControlCurve::new(vec![p, p]).unwrap();
        assert_eq!(curve.point_at(0.5), p);
        assert_eq!(curve.tangent_at(0.5), Vec3::NEG_Z);
    }

    #[test]
    fn out_of_range_parameters_clamp() {
        let curve = ControlCurve::new(flight_path_vec3()).unwrap();
        assert!(approx(curve.point_at(-1.0), curve.point_at(0.0)));
        assert!(approx(curve.point_at(2.0), curve.point_at(1.0)));
        assert!(approx(curve.point_at(f32::NAN), curve.point_at(0.0)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            ControlCurve::new(vec![Vec3::ZERO]).unwrap_err(),
            SceneError::TooFewControlPoints(1)
        );
        let err = ControlCurve::new(vec![Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, SceneError::NonFiniteControlPoint { index: 1, .. }));
    }

    #[test]
    fn sample_points_spans_the_curve() {
        let curve = ControlCurve::new(flight_path_vec3()).unwrap();
        let samples = curve.sample_points(50);
        assert_eq!(samples.len(), 51);
        assert!(approx(samples[0], curve.points()[0]));
        assert!(approx(samples[50], *curve.points().last().unwrap()));
    }
}
