use super::keys::{action_for_key, KeyAction};
use crate::overlay;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
) {
    // Leave browser shortcuts alone.
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleGuide => {
            overlay::toggle_guide(document);
            ev.prevent_default();
        }
        KeyAction::ToggleFullscreen => {
            if document.fullscreen_element().is_some() {
                document.exit_fullscreen();
            } else {
                _ = canvas.request_fullscreen();
            }
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => {
            if document.fullscreen_element().is_some() {
                document.exit_fullscreen();
            }
        }
    }
}

pub fn wire_global_keydown(document: web::Document, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &document, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
