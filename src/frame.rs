use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::events::page::{self, HideAction};
use crate::instances::{self, SceneInstances};
use crate::overlay::Panels;
use crate::render;
use crate::scroll::ScrollTracker;
use instant::Instant;
use starflight_core::RenderState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub state: RenderState,
    pub scroll: ScrollTracker,
    pub gpu: Option<render::GpuState<'a>>,
    pub panels: Panels,
    pub canvas: web::HtmlCanvasElement,
    pub window: web::Window,
    pub instances: SceneInstances,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);

        self.scroll.set_raw(dom::scroll_offset(&self.window));
        let progress = self.scroll.step(dt_sec);
        self.state.tick(progress, dt_sec);

        let css = dom::canvas_css_size(&self.canvas);
        let aspect = css[0] / css[1].max(1.0);
        let camera = self.state.camera(aspect);

        instances::build_frame(&self.state, &mut self.instances);
        let globals = instances::scene_globals(&self.state, &camera, &self.instances.lights);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&self.instances, &globals, self.state.elapsed_sec) {
                Ok(()) => {}
                // Surface is reconfigured on the next resize; skip this frame.
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    log::warn!("surface outdated; frame skipped")
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        self.panels.update(&self.state, &camera, css);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    state: &RenderState,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, state).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the animation-frame callback and the id of the pending request.
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickCell,
}

impl LoopHandle {
    /// Cancel the pending frame but keep the callback so the loop can resume.
    pub fn suspend(&self, window: &web::Window) {
        if let Some(id) = self.raf_id.take() {
            _ = window.cancel_animation_frame(id);
        }
        log::info!("[frame] loop suspended");
    }

    /// Request a frame again after `suspend`. No-op once stopped or already pending.
    pub fn resume(&self, window: &web::Window) {
        if self.raf_id.get().is_none() {
            self.raf_id.set(request_frame(window, &self.tick));
            log::info!("[frame] loop resumed");
        }
    }

    /// Cancel the pending frame and drop the callback so no further frames run.
    pub fn stop(&self, window: &web::Window) {
        self.suspend(window);
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}

fn request_frame(window: &web::Window, tick: &TickCell) -> Option<i32> {
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(
    frame_ctx: Rc<RefCell<FrameContext<'static>>>,
    window: &web::Window,
) -> Rc<LoopHandle> {
    let tick: TickCell = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    let window_tick = window.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        // `request_frame` returns None once the handle has dropped the closure.
        raf_clone.set(request_frame(&window_tick, &tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(window, &tick));

    let handle = Rc::new(LoopHandle { raf_id, tick });
    wire_page_lifecycle(window, handle.clone(), frame_ctx);
    handle
}

fn persisted(ev: &web::Event) -> bool {
    ev.dyn_ref::<web::PageTransitionEvent>()
        .map(|e| e.persisted())
        .unwrap_or(false)
}

fn wire_page_lifecycle(
    window: &web::Window,
    handle: Rc<LoopHandle>,
    frame_ctx: Rc<RefCell<FrameContext<'static>>>,
) {
    let window_hide = window.clone();
    let handle_hide = handle.clone();
    let frame_ctx_hide = frame_ctx.clone();
    let on_hide = Closure::wrap(Box::new(move |ev: web::Event| {
        match page::on_pagehide(persisted(&ev)) {
            HideAction::Suspend => handle_hide.suspend(&window_hide),
            HideAction::Release => {
                handle_hide.stop(&window_hide);
                if let Ok(ctx) = frame_ctx_hide.try_borrow() {
                    ctx.panels.remove();
                }
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let window_show = window.clone();
    let on_show = Closure::wrap(Box::new(move |ev: web::Event| {
        if !page::resume_on_pageshow(persisted(&ev)) {
            return;
        }
        // Time spent in the cache must not count as one long frame.
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.last_instant = Instant::now();
        }
        handle.resume(&window_show);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}
