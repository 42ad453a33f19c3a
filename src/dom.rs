use crate::constants::SPACER_ID;
use crate::query::{self, PageOptions};
use crate::scroll;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// CSS pixel size of the canvas as laid out.
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    [rect.width() as f32, rect.height() as f32]
}

/// Raw page scroll offset in \[0, 1\].
pub fn scroll_offset(window: &web::Window) -> f32 {
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return 0.0;
    };
    let top = window.scroll_y().unwrap_or(0.0);
    scroll::raw_offset(
        top,
        root.scroll_height() as f64,
        root.client_height() as f64,
    )
}

/// Size the spacer element that gives the page its scroll length.
pub fn size_scroll_spacer(document: &web::Document, pages: f32) {
    if let Some(el) = document.get_element_by_id(SPACER_ID) {
        let height = scroll::spacer_height_css(pages);
        _ = el.set_attribute(
            "style",
            &format!("height:{};position:relative;pointer-events:none", height),
        );
    } else {
        log::warn!("#{} missing; page will not scroll", SPACER_ID);
    }
}

pub fn page_options(window: &web::Window) -> PageOptions {
    let search = window.location().search().unwrap_or_default();
    query::parse_query(&search)
}
