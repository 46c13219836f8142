//! Page chrome around the animation: navigation, music, section reveal, the
//! easter egg and the footer year.
//!
//! Every piece here is optional. A missing element disables that piece with a
//! warning; only the canvas (see `web`) is a hard requirement.

pub mod audio;
pub mod konami;
pub mod nav;
pub mod reveal;

use web_sys::{Document, Window};

/// Wire up all page chrome. Called once per page load.
pub fn install(win: &Window, doc: &Document) {
    audio::init(doc);
    set_year(doc);
    let results = [
        ("music control", audio::install_music_control(doc)),
        ("navigation", nav::install(win, doc)),
        ("section reveal", reveal::install(doc)),
        ("easter egg", konami::install(doc)),
    ];
    for (name, res) in results {
        if let Err(e) = res {
            log::warn!("{name} disabled: {e:?}");
        }
    }
}

fn set_year(doc: &Document) {
    let year = js_sys::Date::new_0().get_full_year();
    match doc.get_element_by_id("year") {
        Some(el) => el.set_text_content(Some(&year.to_string())),
        None => log::debug!("no #year element"),
    }
}
