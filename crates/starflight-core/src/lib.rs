pub mod color;
pub mod constants;
pub mod controller;
pub mod curve;
pub mod decorations;
pub mod error;
pub mod markers;
pub mod scene;
pub mod starfield;
pub mod state;

pub use controller::*;
pub use curve::{ControlCurve, CurveKind};
pub use decorations::*;
pub use error::SceneError;
pub use markers::*;
pub use scene::*;
pub use starfield::*;
pub use state::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
