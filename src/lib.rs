//! Spider web portfolio page, compiled to WASM.
//!
//! The cursor-reactive particle web (`spider`) is pure Rust and runs headless
//! against any [`surface::Surface`]; `web` drives it from a canvas and
//! `requestAnimationFrame`, and `page` wires the rest of the page chrome
//! (navigation, music, section reveal, easter egg).

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod geometry;
pub mod page;
pub mod spider;
pub mod surface;
pub mod web;

pub use config::SpiderConfig;
pub use error::{ConfigError, SetupError};
pub use geometry::{Point, PointerState, Viewport};
pub use spider::{FrameInput, FrameLoop, FrameSource, LoopState, SpiderWeb};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. tests re-running start) only fails to replace the logger.
    console_log::init_with_level(log::Level::Info).ok();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the animation on `#spiderCanvas` and install the page chrome.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    web::start(SpiderConfig::default())?;
    Ok(())
}

/// Same as [`start_page`] with tunables read from a JSON object; missing keys
/// keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = SpiderConfig::from_json(json).map_err(SetupError::from)?;
    web::start(config)?;
    Ok(())
}

/// Stop the animation loop (page teardown).
#[wasm_bindgen]
pub fn stop_page() {
    web::stop();
}
