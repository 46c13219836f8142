//! Konami-code easter egg.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use super::audio;

pub const KONAMI: &[&str] = &[
    "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft",
    "ArrowRight", "b", "a",
];

/// Body class toggled each time the code is entered.
pub const KONAMI_CLASS: &str = "konami";

/// Incremental matcher over `KeyboardEvent.key` values.
#[derive(Clone, Debug)]
pub struct KeySequence {
    keys: &'static [&'static str],
    progress: usize,
}

impl Default for KeySequence {
    fn default() -> Self {
        Self::new(KONAMI)
    }
}

fn same_key(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

impl KeySequence {
    pub fn new(keys: &'static [&'static str]) -> Self {
        Self { keys, progress: 0 }
    }

    /// Number of keys matched so far.
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Feed one key. Returns `true` exactly when the sequence completes; the
    /// matcher then starts over.
    ///
    /// On a mismatch progress falls back to the longest prefix of the sequence
    /// that still ends at this key, so `Up Up Up Down ...` keeps matching.
    pub fn push(&mut self, key: &str) -> bool {
        let keys = self.keys;
        let progress = self.progress;
        if keys.is_empty() {
            return false;
        }
        let typed = &keys[..progress];
        self.progress = (0..=progress.min(keys.len() - 1))
            .rev()
            .find(|&k| {
                same_key(keys[k], key)
                    && keys[..k].iter().zip(&typed[progress - k..]).all(|(a, b)| same_key(a, b))
            })
            .map_or(0, |k| k + 1);
        if self.progress == keys.len() {
            self.progress = 0;
            return true;
        }
        false
    }
}

thread_local! {
    static SEQUENCE: RefCell<KeySequence> = RefCell::new(KeySequence::default());
}

pub fn install(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let fired = SEQUENCE.with(|s| s.borrow_mut().push(&evt.key()));
        if fired {
            on_unlock();
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_unlock() {
    log::info!("konami code entered");
    audio::play_sound("select");
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        body.class_list().toggle(KONAMI_CLASS).ok();
    }
}
