/// Frame loop and page wiring constants for the web frontend.
///
/// Scene tuning lives in `starflight_core::constants`; this file only holds
/// values tied to the browser (element ids, frame timing, scroll handling).
// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const SPACER_ID: &str = "scroll-spacer";
pub const GUIDE_ID: &str = "scroll-guide";
pub const PANELS_ID: &str = "panels";
pub const PANEL_ID_PREFIX: &str = "panel-";

// Frame timing (seconds); a backgrounded tab can hand us very long frames
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Content panels are hidden once their anchor leaves this margin around the
// viewport (normalized screen units)
pub const PANEL_SCREEN_MARGIN: f32 = 0.2;

// Offscreen bloom targets are this fraction of the canvas size
pub const BLOOM_DOWNSCALE: u32 = 2;

// Initial instance buffer capacity; grows on demand
pub const INSTANCE_CAPACITY: usize = 256;

// Decoration seed used when the URL does not pin one and no entropy is available
pub const FALLBACK_SEED: u64 = 0x5741_5246_4c49_4748;
