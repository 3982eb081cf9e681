//! Animated ambient backdrop for a canvas element: fifty drifting particles
//! with pointer repulsion under a time-of-day gradient wash.
//!
//! JavaScript drives the lifecycle through [`AmbientBackdrop::mount`] and
//! [`AmbientBackdrop::unmount`]; everything in between (simulation, drawing,
//! input handling) runs here.

pub mod color;
pub mod gradient;
pub mod particle;
pub mod render;
pub mod scene;
pub mod scheduler;
mod utils;

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::scene::Scene;
use crate::scheduler::{FrameLoop, RafScheduler};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// How often the wall clock is resampled for the overlay gradient.
const CLOCK_RESAMPLE_MS: i32 = 60_000;

/// One-time setup: panic hook and console logger. Call before `mount`.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// The mounted backdrop component. Owns the scene state, the frame loop, and
/// every listener it registered, and detaches all of them on `unmount`.
#[wasm_bindgen]
pub struct AmbientBackdrop {
    scene: Rc<RefCell<Scene>>,
    frame_loop: FrameLoop<RafScheduler>,
    pointer_cb: Option<Closure<dyn FnMut(MouseEvent)>>,
    resize_cb: Option<Closure<dyn FnMut()>>,
    clock_cb: Option<Closure<dyn FnMut()>>,
    clock_handle: Option<i32>,
}

#[wasm_bindgen]
impl AmbientBackdrop {
    /// Attach to the canvas with the given element id, size it to its
    /// container, seed the particle field, and start animating.
    pub fn mount(canvas_id: &str) -> Result<AmbientBackdrop, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let (width, height) = surface_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let scene = Rc::new(RefCell::new(Scene::new(width, height, current_hour())));
        info!("ambient backdrop mounted at {}x{}", width, height);

        let scheduler = Rc::new(RefCell::new(RafScheduler::new(window.clone())));
        let frame_loop = FrameLoop::new(scheduler);
        {
            let scene = scene.clone();
            let ctx = ctx.clone();
            frame_loop.start(move || {
                let mut scene = scene.borrow_mut();
                scene.advance();
                render::render(&scene, &ctx);
            });
        }

        let pointer_cb: Closure<dyn FnMut(MouseEvent)> = {
            let scene = scene.clone();
            let canvas = canvas.clone();
            Closure::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                scene.borrow_mut().pointer_moved(
                    event.client_x() as f64 - rect.left(),
                    event.client_y() as f64 - rect.top(),
                );
            })
        };
        window
            .add_event_listener_with_callback("mousemove", pointer_cb.as_ref().unchecked_ref())?;

        let resize_cb: Closure<dyn FnMut()> = {
            let scene = scene.clone();
            let canvas = canvas.clone();
            let window = window.clone();
            Closure::new(move || {
                let (w, h) = surface_size(&window, &canvas);
                canvas.set_width(w);
                canvas.set_height(h);
                scene.borrow_mut().resize(w, h);
            })
        };
        window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

        let clock_cb: Closure<dyn FnMut()> = {
            let scene = scene.clone();
            Closure::new(move || scene.borrow_mut().set_hour(current_hour()))
        };
        let clock_handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            clock_cb.as_ref().unchecked_ref(),
            CLOCK_RESAMPLE_MS,
        )?;

        Ok(AmbientBackdrop {
            scene,
            frame_loop,
            pointer_cb: Some(pointer_cb),
            resize_cb: Some(resize_cb),
            clock_cb: Some(clock_cb),
            clock_handle: Some(clock_handle),
        })
    }

    /// Stop the frame loop and detach every listener and timer. Calling it
    /// again is a no-op.
    pub fn unmount(&mut self) {
        let was_mounted = self.pointer_cb.is_some();
        self.frame_loop.stop();
        if let Some(window) = web_sys::window() {
            if let Some(cb) = self.pointer_cb.take() {
                let _ = window
                    .remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
            }
            if let Some(cb) = self.resize_cb.take() {
                let _ = window
                    .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
            }
            if let Some(handle) = self.clock_handle.take() {
                window.clear_interval_with_handle(handle);
            }
        }
        self.clock_cb = None;
        if was_mounted {
            info!("ambient backdrop unmounted");
        }
    }

    /// Current particle count; mostly a hook for tests and debug overlays.
    pub fn particle_count(&self) -> usize {
        self.scene.borrow().field.len()
    }
}

impl Drop for AmbientBackdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Measure the parent container; fall back to the window for a detached or
/// unstyled canvas.
fn surface_size(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    if let Some(parent) = canvas.parent_element() {
        let rect = parent.get_bounding_client_rect();
        if rect.width() > 0.0 && rect.height() > 0.0 {
            return (rect.width() as u32, rect.height() as u32);
        }
    }
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width as u32, height as u32)
}

fn current_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}
