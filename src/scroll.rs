/// Damped scroll progress.
///
/// The raw target comes from the page scroll offset; the output eases toward
/// it with an exponential smoother so the camera glides instead of stepping.
#[derive(Clone, Copy, Debug)]
pub struct ScrollTracker {
    /// Time constant in seconds; 0 disables damping.
    pub damping: f32,
    /// Multiplier on the raw offset before clamping.
    pub distance: f32,
    pub target: f32,
    pub current: f32,
}

/// Below this distance the damped value snaps to target.
const SNAP_EPSILON: f32 = 1e-4;

impl ScrollTracker {
    pub fn new(damping: f32, distance: f32) -> Self {
        Self {
            damping: damping.max(0.0),
            distance,
            target: 0.0,
            current: 0.0,
        }
    }

    /// Record the latest raw offset (0 = top of the page, 1 = bottom).
    pub fn set_raw(&mut self, raw: f32) {
        let raw = if raw.is_finite() { raw } else { 0.0 };
        self.target = (raw * self.distance).clamp(0.0, 1.0);
    }

    /// Step the smoother and return the damped progress.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        let dt = dt_sec.max(0.0);
        if self.damping <= 0.0 {
            self.current = self.target;
            return self.current;
        }
        let alpha = 1.0 - (-dt / self.damping).exp();
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SNAP_EPSILON {
            self.current = self.target;
        }
        self.current
    }

    /// Jump straight to the target (first frame, or after a resize).
    pub fn settle(&mut self) {
        self.current = self.target;
    }
}

/// Raw scroll offset for a page: `scroll_top / (scroll_height - viewport)`,
/// 0 when nothing can scroll.
#[inline]
pub fn raw_offset(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if range <= 0.5 {
        return 0.0;
    }
    (scroll_top / range).clamp(0.0, 1.0) as f32
}

/// CSS height of the spacer that provides the scroll area.
#[inline]
pub fn spacer_height_css(pages: f32) -> String {
    format!("{}vh", (pages.max(1.0) * 100.0).round())
}
