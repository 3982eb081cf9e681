// Frame scheduling for the render loop. `requestAnimationFrame` hands out
// one-shot callbacks, so the loop is a chain: each fired frame runs the tick
// and schedules its successor. The `FrameScheduler` trait keeps the chain
// logic testable without a browser.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Identifier for one scheduled frame, usable to cancel it before it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// One-shot frame source. `schedule` registers a callback for the next frame
/// and returns a handle; `cancel` revokes a not-yet-fired frame.
pub trait FrameScheduler {
    fn schedule(&mut self, frame: Box<dyn FnOnce()>) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

/// Production scheduler backed by `window.requestAnimationFrame`.
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new(window: Window) -> RafScheduler {
        RafScheduler { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self, frame: Box<dyn FnOnce()>) -> FrameHandle {
        // The closure frees itself once the browser invokes it. A frame
        // cancelled before firing stays with the JS garbage collector; that
        // happens at most once, at teardown.
        let cb = Closure::once_into_js(frame);
        let id = self
            .window
            .request_animation_frame(cb.unchecked_ref())
            .unwrap_or(0);
        FrameHandle(id)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

struct LoopState {
    running: bool,
    pending: Option<FrameHandle>,
}

/// Self-rescheduling frame chain with an explicit start/stop contract.
///
/// `stop` cancels the pending frame exactly once; a frame already dispatched
/// by the host when `stop` ran sees `running == false` and does nothing.
pub struct FrameLoop<S: FrameScheduler + 'static> {
    scheduler: Rc<RefCell<S>>,
    state: Rc<RefCell<LoopState>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    pub fn new(scheduler: Rc<RefCell<S>>) -> FrameLoop<S> {
        FrameLoop {
            scheduler,
            state: Rc::new(RefCell::new(LoopState {
                running: false,
                pending: None,
            })),
        }
    }

    /// Begin the chain. A second `start` while running is ignored.
    pub fn start<F: FnMut() + 'static>(&self, tick: F) {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
        }
        schedule_next(
            self.scheduler.clone(),
            self.state.clone(),
            Rc::new(RefCell::new(Box::new(tick) as Box<dyn FnMut()>)),
        );
    }

    /// End the chain and cancel the in-flight frame, if any. Idempotent.
    pub fn stop(&self) {
        let handle = {
            let mut state = self.state.borrow_mut();
            if !state.running {
                return;
            }
            state.running = false;
            state.pending.take()
        };
        if let Some(handle) = handle {
            self.scheduler.borrow_mut().cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }
}

fn schedule_next<S: FrameScheduler + 'static>(
    scheduler: Rc<RefCell<S>>,
    state: Rc<RefCell<LoopState>>,
    tick: Rc<RefCell<Box<dyn FnMut()>>>,
) {
    let frame = {
        let scheduler = scheduler.clone();
        let state = state.clone();
        let tick = tick.clone();
        Box::new(move || {
            {
                let mut state = state.borrow_mut();
                if !state.running {
                    return;
                }
                state.pending = None;
            }
            {
                let mut tick = tick.borrow_mut();
                (&mut **tick)();
            }
            if state.borrow().running {
                schedule_next(scheduler, state, tick);
            }
        }) as Box<dyn FnOnce()>
    };
    let handle = scheduler.borrow_mut().schedule(frame);
    let mut state = state.borrow_mut();
    if state.running {
        state.pending = Some(handle);
    }
}
