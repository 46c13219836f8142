//! Browser driver: canvas lookup, pointer listeners and the
//! `requestAnimationFrame` loop feeding [`FrameLoop`].
//!
//! All state lives in a thread-local; pointer events only write the stored
//! [`PointerState`], the next frame reads it.

mod canvas;

pub use canvas::CanvasSurface;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window, window};

use crate::config::SpiderConfig;
use crate::error::SetupError;
use crate::geometry::{PointerState, Viewport};
use crate::page;
use crate::spider::{FrameInput, FrameLoop, LoopState, SpiderWeb};

pub const CANVAS_ID: &str = "spiderCanvas";

struct SpiderState {
    frame_loop: FrameLoop<CanvasSurface>,
    pointer: PointerState,
    raf_handle: Option<i32>,
}

thread_local! {
    static SPIDER_STATE: RefCell<Option<SpiderState>> = const { RefCell::new(None) };
    static LISTENERS_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Window inner size, zero when unavailable.
pub fn current_viewport(win: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(win.inner_width()), dim(win.inner_height()))
}

pub fn start(config: SpiderConfig) -> Result<(), SetupError> {
    config.validate()?;
    let win = window().ok_or(SetupError::NoWindow)?;
    let doc = win.document().ok_or(SetupError::NoDocument)?;

    let running = SPIDER_STATE.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|s| s.frame_loop.state() == LoopState::Running)
    });
    if running {
        log::warn!("spider web already running; ignoring start");
        return Ok(());
    }

    let surface = CanvasSurface::from_element_id(&doc, CANVAS_ID)?;
    let viewport = current_viewport(&win);
    let mut rng = StdRng::from_entropy();
    let scene = SpiderWeb::new(config, viewport, &mut rng);
    log::info!(
        "spider web: {} background, {} connectors on {}x{}",
        scene.background().len(),
        scene.connectors().len(),
        viewport.width,
        viewport.height
    );

    SPIDER_STATE.with(|cell| {
        cell.replace(Some(SpiderState {
            frame_loop: FrameLoop::new(scene, surface),
            pointer: PointerState::absent(),
            raf_handle: None,
        }))
    });

    if !LISTENERS_INSTALLED.with(|c| c.replace(true)) {
        install_pointer_listeners(&doc)?;
        page::install(&win, &doc);
    }

    start_spider_loop();
    Ok(())
}

/// Tear the loop down; the pending frame request is cancelled.
pub fn stop() {
    let handle = SPIDER_STATE.with(|cell| {
        cell.borrow_mut().as_mut().and_then(|state| {
            state.frame_loop.stop();
            state.raf_handle.take()
        })
    });
    if let (Some(h), Some(w)) = (handle, window()) {
        w.cancel_animation_frame(h).ok();
    }
}

fn install_pointer_listeners(doc: &Document) -> Result<(), JsValue> {
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            SPIDER_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.pointer.move_to(evt.client_x() as f64, evt.client_y() as f64);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            SPIDER_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.pointer.leave();
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn start_spider_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let Some(win) = window() else {
            return;
        };
        let viewport = current_viewport(&win);
        let running = SPIDER_STATE.with(|cell| match cell.borrow_mut().as_mut() {
            Some(state) => {
                state.raf_handle = None;
                let input = FrameInput::new(viewport, state.pointer);
                state.frame_loop.tick(input) == LoopState::Running
            }
            None => false,
        });
        if running {
            request_frame(&win, &f);
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(win) = window() {
        request_frame(&win, &g);
    }
}

fn request_frame(win: &Window, f: &FrameCallback) {
    let handle = match f.borrow().as_ref() {
        Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref()),
        None => return,
    };
    match handle {
        Ok(h) => SPIDER_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.raf_handle = Some(h);
            }
        }),
        Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
    }
}
