//! Navigation chrome: scroll-dependent classes and smooth in-page scrolling.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Window,
};

use super::audio;

/// `nav` gets `scrolled` past this many pixels.
pub const SCROLLED_THRESHOLD: f64 = 100.0;
/// Viewports at or below this width use the fixed mobile offset.
pub const MOBILE_MAX_WIDTH: f64 = 480.0;
pub const MOBILE_OFFSET: f64 = 100.0;
/// Gap kept below the nav bar on wider viewports.
pub const NAV_GAP: f64 = 40.0;
pub const MAIN_NAV_GAP: f64 = 20.0;

pub fn nav_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

pub fn side_nav_visible(scroll_y: f64, header_height: f64) -> bool {
    scroll_y > header_height
}

/// Space left above a section after scrolling to it.
pub fn anchor_offset(viewport_width: f64, nav_height: f64) -> f64 {
    if viewport_width <= MOBILE_MAX_WIDTH { MOBILE_OFFSET } else { nav_height + NAV_GAP }
}

/// Absolute scroll position for a section whose bounding top is `section_top`
/// while the page is scrolled by `page_y`.
pub fn scroll_target(section_top: f64, page_y: f64, viewport_width: f64, nav_height: f64) -> f64 {
    section_top + page_y - anchor_offset(viewport_width, nav_height)
}

/// `#about` -> `about`. External links and a bare `#` yield `None`.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Sound played when a navigation link scrolls to an in-page section.
pub const NAV_CLICK_SOUND: &str = "select";

/// Effect key for a click on a navigation link (`nav a` or `#main-nav a`).
/// Only in-page anchors make a sound.
pub fn nav_click_sound(href: &str) -> Option<&'static str> {
    anchor_id(href).map(|_| NAV_CLICK_SOUND)
}

pub fn install(win: &Window, doc: &Document) -> Result<(), JsValue> {
    let nav: Option<HtmlElement> = doc.query_selector("nav")?.and_then(|e| e.dyn_into().ok());
    if let Some(nav) = &nav {
        nav.style().set_property("display", "block")?;
    }
    install_scroll_classes(win, doc, nav.clone())?;
    install_nav_links(doc, nav)?;
    install_anchor_links(doc)?;
    install_main_nav_links(doc)?;
    Ok(())
}

fn toggle_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let res = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(e) = res {
        log::warn!("class {class}: {e:?}");
    }
}

fn install_scroll_classes(win: &Window, doc: &Document, nav: Option<HtmlElement>) -> Result<(), JsValue> {
    let header: Option<HtmlElement> = doc.query_selector("header")?.and_then(|e| e.dyn_into().ok());
    let side_nav = doc.get_element_by_id("side-nav");
    let header_height = Rc::new(Cell::new(header.as_ref().map_or(0.0, |h| h.offset_height() as f64)));

    if let Some(header) = header {
        let header_height = header_height.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            header_height.set(header.offset_height() as f64);
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let Some(win) = web_sys::window() else {
            return;
        };
        let scroll_y = win.scroll_y().unwrap_or(0.0);
        if let Some(nav) = &nav {
            toggle_class(nav, "scrolled", nav_scrolled(win.page_y_offset().unwrap_or(scroll_y)));
        }
        if let Some(side) = &side_nav {
            toggle_class(side, "visible", side_nav_visible(scroll_y, header_height.get()));
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn smooth_scroll_to(win: &Window, top: f64) {
    let opts = ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&opts);
}

fn for_each_element(doc: &Document, selector: &str, mut f: impl FnMut(Element) -> Result<(), JsValue>) -> Result<(), JsValue> {
    let list = doc.query_selector_all(selector)?;
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(el)?;
        }
    }
    Ok(())
}

fn in_main_nav(el: &Element) -> bool {
    el.closest("#main-nav").ok().flatten().is_some()
}

/// `nav a[href^="#"]`: click sound, then scroll with the nav offset.
fn install_nav_links(doc: &Document, nav: Option<HtmlElement>) -> Result<(), JsValue> {
    for_each_element(doc, "nav a", |link| {
        if in_main_nav(&link) {
            return Ok(());
        }
        let nav = nav.clone();
        let target_link = link.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            let href = target_link.get_attribute("href").unwrap_or_default();
            let Some(id) = anchor_id(&href) else {
                return;
            };
            evt.prevent_default();
            if let Some(sound) = nav_click_sound(&href) {
                audio::play_sound(sound);
            }
            let Some(win) = web_sys::window() else {
                return;
            };
            let Some(section) = win.document().and_then(|d| d.get_element_by_id(id)) else {
                log::debug!("no section #{id}");
                return;
            };
            let nav_height = nav.as_ref().map_or(0.0, |n| n.offset_height() as f64);
            let width = crate::web::current_viewport(&win).width;
            let top = scroll_target(
                section.get_bounding_client_rect().top(),
                win.page_y_offset().unwrap_or(0.0),
                width,
                nav_height,
            );
            smooth_scroll_to(&win, top);
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    })
}

/// Remaining in-page anchors outside any nav scroll the target into view.
fn install_anchor_links(doc: &Document) -> Result<(), JsValue> {
    for_each_element(doc, "a[href^=\"#\"]", |anchor| {
        if anchor.closest("nav").ok().flatten().is_some() || in_main_nav(&anchor) {
            return Ok(());
        }
        let this = anchor.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            evt.prevent_default();
            let href = this.get_attribute("href").unwrap_or_default();
            let Some(id) = anchor_id(&href) else {
                return;
            };
            if let Some(section) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id))
            {
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                section.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }) as Box<dyn FnMut(_)>);
        anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    })
}

/// `#main-nav a`: click sound, then scroll to the section's offsetTop minus a
/// small gap.
fn install_main_nav_links(doc: &Document) -> Result<(), JsValue> {
    for_each_element(doc, "#main-nav a", |link| {
        let this = link.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            evt.prevent_default();
            let href = this.get_attribute("href").unwrap_or_default();
            let Some(id) = anchor_id(&href) else {
                return;
            };
            if let Some(sound) = nav_click_sound(&href) {
                audio::play_sound(sound);
            }
            let Some(win) = web_sys::window() else {
                return;
            };
            let section = win
                .document()
                .and_then(|d| d.get_element_by_id(id))
                .and_then(|e| e.dyn_into::<HtmlElement>().ok());
            if let Some(section) = section {
                smooth_scroll_to(&win, section.offset_top() as f64 - MAIN_NAV_GAP);
            }
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    })
}
