use thiserror::Error;

/// Construction-time failures. Per-frame updates never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("control curve needs at least 2 points, got {0}")]
    TooFewControlPoints(usize),
    #[error("control point {index} is not finite: {point:?}")]
    NonFiniteControlPoint { index: usize, point: [f32; 3] },
    #[error("invalid hex color {0:?}")]
    InvalidColor(String),
}
