//! Browser bindings, compiled with the `hydrate` feature.
//!
//! Each submodule implements one of the crate's traits over `web-sys`, or
//! binds a widget to the page's markup. [`start`] is the WASM entry point:
//! it installs console logging and the panic hook, waits for the document to
//! be parsed, and then boots every behavior.
//!
//! Boot order is modals, input rows, relocations, counters, camera. Each
//! step stands alone; a step that finds nothing to do logs and moves on.

pub mod api;
pub mod camera;
pub mod dom;
pub mod input_focus;
pub mod modal;
pub mod scheduler;
pub mod viewport;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

use crate::config::PageConfig;
use crate::consts::CONFIG_ELEMENT_ID;
use crate::page::Page;

use self::dom::WebDom;
use self::scheduler::BrowserScheduler;
use self::viewport::WindowViewport;

/// The page as wired in the browser.
pub type WebPage = Page<WebDom, WindowViewport, BrowserScheduler, Element>;

/// Best-effort message for a thrown JS value.
pub(crate) fn js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

/// All elements matching `selector`, in document order.
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("bad selector {selector:?}: {}", js_error(&e));
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

/// Attach `handler` for the lifetime of the page.
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        Ok(()) => callback.forget(),
        Err(e) => log::warn!("cannot listen for {event}: {}", js_error(&e)),
    }
}

/// Add or remove one class, logging a rejected token.
pub(crate) fn toggle_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(e) = result {
        log::warn!("class {class:?} not toggled: {}", js_error(&e));
    }
}

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("console logger not installed: {e}");
    }

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        boot();
        return;
    }
    let callback = Closure::once_into_js(boot);
    if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref()) {
        log::warn!("cannot wait for DOMContentLoaded: {}", js_error(&e));
    }
}

fn boot() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let island = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let config = PageConfig::load(island.as_deref());

    let modals = modal::bind_all(&document, config.modal_step_ms);
    let rows = input_focus::bind_all(&document, &config.input_row_selector);
    log::debug!("bound {modals} modals and {rows} input rows");

    let camera = config.camera.clone();
    let mut page: WebPage = Page::new(
        config,
        Rc::new(WebDom::new(document.clone())),
        Rc::new(WindowViewport::new(window.clone())),
        BrowserScheduler,
    );
    page.install_relocations();
    bind_counters(&mut page, &document);

    if camera.enabled {
        camera::spawn_preview(window, document, camera);
    }
    api::install(page);
}

fn bind_counters(page: &mut WebPage, document: &Document) {
    let selector = page.config().counter_selector.clone();
    let attribute = page.config().counter_attribute.clone();
    for (index, element) in query_all(document, &selector).into_iter().enumerate() {
        let id = element.id();
        let duration = element.get_attribute(&attribute);
        match page.bind_counter(Some(id.as_str()), index, duration.as_deref(), element) {
            Ok(key) => log::debug!("counter {key} bound"),
            Err(e) => log::warn!("counter #{index} skipped: {e}"),
        }
    }
}
