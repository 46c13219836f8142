//! Fade sections in the first time they scroll into view.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Fraction of a section that must be visible before it is revealed.
pub const THRESHOLD: f64 = 0.1;

pub const HIDDEN_STYLE: &[(&str, &str)] = &[
    ("opacity", "0"),
    ("transform", "translateY(20px)"),
    ("transition", "opacity 0.5s ease, transform 0.5s ease"),
];

pub const VISIBLE_STYLE: &[(&str, &str)] = &[("opacity", "1"), ("transform", "translateY(0)")];

fn apply(el: &HtmlElement, style: &[(&str, &str)]) -> Result<(), JsValue> {
    let decl = el.style();
    for (prop, value) in style {
        decl.set_property(prop, value)?;
    }
    Ok(())
}

pub fn install(doc: &Document) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            if let Ok(el) = entry.target().dyn_into::<HtmlElement>() {
                if let Err(e) = apply(&el, VISIBLE_STYLE) {
                    log::warn!("reveal: {e:?}");
                }
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(THRESHOLD));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();

    let sections = doc.query_selector_all("section")?;
    for i in 0..sections.length() {
        let Some(section) = sections.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        apply(&section, HIDDEN_STYLE)?;
        observer.observe(&section);
    }
    log::debug!("observing {} sections", sections.length());
    Ok(())
}
