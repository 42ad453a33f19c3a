use crate::constants::{GUIDE_ID, PANELS_ID, PANEL_ID_PREFIX, PANEL_SCREEN_MARGIN};
use crate::layout;
use starflight_core::color::to_hex;
use starflight_core::{Camera, RenderState};
use web_sys as web;

/// Show or hide the scroll guide via the `.hidden` class in index.html.
pub fn toggle_guide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(GUIDE_ID) {
        _ = el.class_list().toggle("hidden");
    }
}

/// DOM text panels, one per content marker.
pub struct Panels {
    elements: Vec<(web::Element, String)>,
}

impl Panels {
    /// Create the panel elements under `#panels` (or `<body>` if missing).
    pub fn create(document: &web::Document, state: &RenderState) -> anyhow::Result<Self> {
        let parent: web::Element = match document.get_element_by_id(PANELS_ID) {
            Some(el) => el,
            None => document
                .body()
                .ok_or_else(|| anyhow::anyhow!("no body"))?
                .into(),
        };
        let mut elements = Vec::with_capacity(state.markers.len());
        for m in &state.markers {
            let el = document
                .create_element("section")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_id(&format!("{}{}", PANEL_ID_PREFIX, m.index));
            el.set_class_name("panel");
            let title = document
                .create_element("h2")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            title.set_text_content(Some(&m.marker.title));
            let body = document
                .create_element("p")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            body.set_text_content(Some(&m.marker.description));
            _ = el.append_child(&title);
            _ = el.append_child(&body);
            _ = parent.append_child(&el);
            let color = to_hex(m.marker.color);
            _ = el.set_attribute("style", &layout::panel_style(None, &color));
            elements.push((el, color));
        }
        log::info!("[panels] created {}", elements.len());
        Ok(Self { elements })
    }

    /// Move visible panels over their markers; hide the rest.
    pub fn update(&self, state: &RenderState, camera: &Camera, viewport_px: [f32; 2]) {
        for ((el, color), m) in self.elements.iter().zip(state.markers.iter()) {
            let visible = state.marker_visible.get(m.index).copied().unwrap_or(false);
            let placement = layout::place_panel(
                visible,
                camera.project_to_screen(m.anchor),
                camera.eye.distance(m.anchor),
                viewport_px,
                PANEL_SCREEN_MARGIN,
            );
            _ = el.set_attribute("style", &layout::panel_style(placement, color));
        }
    }

    pub fn remove(&self) {
        for (el, _) in &self.elements {
            el.remove();
        }
    }
}
