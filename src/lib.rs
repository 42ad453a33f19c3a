#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rand::RngCore;
use starflight_core::{default_markers, RenderState, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod instances;
mod layout;
mod overlay;
mod query;
mod render;
mod scroll;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// `?seed=` wins; otherwise browser entropy, then a fixed fallback.
fn decoration_seed(opts: &query::PageOptions) -> u64 {
    if let Some(seed) = opts.seed {
        return seed;
    }
    let mut bytes = [0u8; 8];
    match rand::rngs::OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(e) => {
            log::warn!("no entropy source ({}); using fallback seed", e);
            constants::FALLBACK_SEED
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starflight-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let opts = dom::page_options(&window);
    let config = SceneConfig {
        debug_path: opts.debug_path,
        ..SceneConfig::default()
    };
    dom::size_scroll_spacer(&document, config.scroll.pages);

    let seed = decoration_seed(&opts);
    log::info!("[init] seed={} debug_path={}", seed, opts.debug_path);
    let state = RenderState::new(config, &default_markers(), seed)?;

    let mut scroll =
        scroll::ScrollTracker::new(state.config.scroll.damping, state.config.scroll.distance);
    scroll.set_raw(dom::scroll_offset(&window));
    scroll.settle();

    let panels = overlay::Panels::create(&document, &state)?;
    let gpu = frame::init_gpu(&canvas, &state).await;

    events::wire_global_keydown(document.clone(), canvas.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        scroll,
        gpu,
        panels,
        canvas,
        window: window.clone(),
        instances: instances::SceneInstances::default(),
        last_instant: Instant::now(),
    }));
    // The pagehide/pageshow listeners keep the handle alive.
    _ = frame::start_loop(frame_ctx, &window);
    Ok(())
}
