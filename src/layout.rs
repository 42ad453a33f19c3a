// Screen placement for the DOM content panels.
//
// Panels are positioned over the projected marker anchor and scaled with
// distance so near markers read larger, like text living in the scene.

/// Distance at which a panel is drawn at its natural CSS size.
pub const PANEL_REFERENCE_DISTANCE: f32 = 12.0;
pub const PANEL_SCALE_MIN: f32 = 0.3;
pub const PANEL_SCALE_MAX: f32 = 1.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPlacement {
    pub x_px: f32,
    pub y_px: f32,
    pub scale: f32,
}

/// `screen_uv` is the projected anchor (0..1, y down) or `None` when behind
/// the camera. Returns `None` when the panel should be hidden.
pub fn place_panel(
    visible: bool,
    screen_uv: Option<[f32; 2]>,
    distance: f32,
    viewport_px: [f32; 2],
    margin: f32,
) -> Option<PanelPlacement> {
    if !visible {
        return None;
    }
    let uv = screen_uv?;
    let inside = |v: f32| (-margin..=1.0 + margin).contains(&v);
    if !inside(uv[0]) || !inside(uv[1]) {
        return None;
    }
    let scale = if distance > 1e-3 {
        (PANEL_REFERENCE_DISTANCE / distance).clamp(PANEL_SCALE_MIN, PANEL_SCALE_MAX)
    } else {
        PANEL_SCALE_MAX
    };
    Some(PanelPlacement {
        x_px: uv[0] * viewport_px[0],
        y_px: uv[1] * viewport_px[1],
        scale,
    })
}

/// Inline style for a panel; hidden panels keep their color so they fade
/// back in without a flash.
pub fn panel_style(placement: Option<PanelPlacement>, color_hex: &str) -> String {
    match placement {
        Some(p) => format!(
            concat!(
                "color:{};opacity:1;",
                "transform:translate({:.1}px,{:.1}px) translate(-50%,-50%) scale({:.3});"
            ),
            color_hex, p.x_px, p.y_px, p.scale
        ),
        None => format!("color:{};opacity:0;pointer-events:none;", color_hex),
    }
}
