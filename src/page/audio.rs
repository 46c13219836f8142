//! Background music with volume fades, plus short sound effects.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAudioElement, HtmlElement, window};

pub const MUSIC_VOLUME: f64 = 0.1;
pub const EFFECTS_VOLUME: f64 = 0.2;
pub const FADE_STEPS: u32 = 20;
pub const FADE_MS: f64 = 1000.0;

/// Sound effects preloaded at startup: key -> asset path.
pub const SOUND_EFFECTS: &[(&str, &str)] = &[("select", "audio/select.mp3")];

/// Stepped volume ramp.
///
/// Yields `from + (to - from) / steps * i` for `i in 0..steps`; the end value
/// itself is never produced, so a fade to zero leaves the last small step
/// audible until the element is paused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeFade {
    from: f64,
    to: f64,
    steps: u32,
    duration_ms: f64,
    step: u32,
}

impl VolumeFade {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self { from, to, steps: FADE_STEPS, duration_ms, step: 0 }
    }

    pub fn fade_in() -> Self {
        Self::new(0.0, MUSIC_VOLUME, FADE_MS)
    }

    pub fn fade_out() -> Self {
        Self::new(MUSIC_VOLUME, 0.0, FADE_MS)
    }

    /// Delay between two volume writes.
    pub fn step_interval_ms(&self) -> f64 {
        self.duration_ms / self.steps as f64
    }
}

impl Iterator for VolumeFade {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.step >= self.steps {
            return None;
        }
        let v = self.from + (self.to - self.from) / self.steps as f64 * self.step as f64;
        self.step += 1;
        Some(v)
    }
}

/// `display` values for (play icon, pause icon).
pub fn icon_displays(playing: bool) -> (&'static str, &'static str) {
    if playing { ("none", "inline-block") } else { ("inline-block", "none") }
}

struct AudioManager {
    music: Option<HtmlAudioElement>,
    sounds: Vec<(&'static str, HtmlAudioElement)>,
}

thread_local! {
    static AUDIO: RefCell<Option<AudioManager>> = const { RefCell::new(None) };
}

/// Find `#bg-music` and preload the effects. Missing pieces are logged.
pub fn init(doc: &Document) {
    let music = match doc.get_element_by_id("bg-music") {
        Some(el) => match el.dyn_into::<HtmlAudioElement>() {
            Ok(audio) => {
                audio.set_volume(MUSIC_VOLUME);
                Some(audio)
            }
            Err(_) => {
                log::error!("#bg-music is not an audio element");
                None
            }
        },
        None => {
            log::error!("background music element not found");
            None
        }
    };

    let mut sounds = Vec::with_capacity(SOUND_EFFECTS.len());
    for &(key, path) in SOUND_EFFECTS {
        match HtmlAudioElement::new_with_src(path) {
            Ok(audio) => {
                audio.set_volume(EFFECTS_VOLUME);
                sounds.push((key, audio));
            }
            Err(e) => log::error!("preloading {path}: {e:?}"),
        }
    }
    AUDIO.with(|cell| cell.replace(Some(AudioManager { music, sounds })));
}

/// Play a preloaded effect through a fresh clone so plays can overlap.
pub fn play_sound(key: &str) {
    let source = AUDIO.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|m| m.sounds.iter().find(|(k, _)| *k == key).map(|(_, a)| a.clone()))
    });
    let Some(source) = source else {
        log::debug!("unknown sound {key}");
        return;
    };
    let sound = match source.clone_node().map(|n| n.dyn_into::<HtmlAudioElement>()) {
        Ok(Ok(sound)) => sound,
        _ => {
            log::error!("could not clone sound {key}");
            return;
        }
    };
    sound.set_volume(EFFECTS_VOLUME);
    match sound.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::error!("error playing sound: {e:?}");
            }
        }),
        Err(e) => log::error!("error playing sound: {e:?}"),
    }
}

fn music() -> Option<HtmlAudioElement> {
    AUDIO.with(|cell| cell.borrow().as_ref().and_then(|m| m.music.clone()))
}

/// Hook `#music-control` to play/pause the background music.
pub fn install_music_control(doc: &Document) -> Result<(), JsValue> {
    let Some(button) = doc.get_element_by_id("music-control") else {
        log::debug!("no #music-control");
        return Ok(());
    };
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        toggle_music();
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn toggle_music() {
    let Some(el) = music() else {
        return;
    };
    if el.paused() { play_music(el) } else { pause_music(el) }
}

fn play_music(el: HtmlAudioElement) {
    let promise = match el.play() {
        Ok(p) => p,
        Err(e) => {
            log::error!("error in play_music: {e:?}");
            show_icons(false);
            return;
        }
    };
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => {
                log::info!("music playing");
                fade_volume(el, VolumeFade::fade_in());
                show_icons(true);
            }
            Err(e) => {
                log::error!("error playing music: {e:?}");
                show_icons(false);
            }
        }
    });
}

fn pause_music(el: HtmlAudioElement) {
    fade_volume(el.clone(), VolumeFade::fade_out());
    let Some(win) = window() else {
        return;
    };
    let cb = Closure::once_into_js(move || {
        if let Err(e) = el.pause() {
            log::error!("error pausing music: {e:?}");
        }
        log::info!("music paused");
        show_icons(false);
    });
    if let Err(e) =
        win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), FADE_MS as i32)
    {
        log::error!("error in pause_music: {e:?}");
    }
}

/// Write the next fade value after one step interval, then reschedule.
pub fn fade_volume(el: HtmlAudioElement, mut fade: VolumeFade) {
    let Some(win) = window() else {
        return;
    };
    let delay = fade.step_interval_ms() as i32;
    let cb = Closure::once_into_js(move || {
        if let Some(v) = fade.next() {
            el.set_volume(v);
            fade_volume(el, fade);
        }
    });
    win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)
        .ok();
}

fn show_icons(playing: bool) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let (play, pause) = icon_displays(playing);
    for (id, display) in [("play-icon", play), ("pause-icon", pause)] {
        if let Some(el) = doc.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            el.style().set_property("display", display).ok();
        }
    }
}
