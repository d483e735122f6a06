//! JS-facing API.
//!
//! ```js
//! const counter = Counter.forElement("timer");
//! const sub = counter.addStopListener(() => upload());
//! counter.start();
//! counter.removeListener(sub);
//! ```

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::countdown::{CountdownTimer, Lifecycle, ListenerHandle};

use super::scheduler::BrowserScheduler;
use super::{WebPage, input_focus, js_error};

thread_local! {
    static PAGE: RefCell<Option<WebPage>> = const { RefCell::new(None) };
}

/// Keep the booted page alive for the JS API.
pub(crate) fn install(page: WebPage) {
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

/// A countdown bound to a page element.
#[wasm_bindgen]
pub struct Counter {
    timer: CountdownTimer<BrowserScheduler, Element>,
}

/// Registration token returned by `add*Listener`.
#[wasm_bindgen]
pub struct Subscription {
    handle: ListenerHandle,
}

#[wasm_bindgen]
impl Subscription {
    #[wasm_bindgen(getter)]
    pub fn event(&self) -> String {
        match self.handle.event() {
            Lifecycle::Start => "start",
            Lifecycle::Reset => "reset",
            Lifecycle::Stop => "stop",
        }
        .to_owned()
    }
}

#[wasm_bindgen]
impl Counter {
    /// The counter bound to the element with `key` as id, or the
    /// `counter-<index>` key for elements without one.
    #[wasm_bindgen(js_name = forElement)]
    pub fn for_element(key: &str) -> Option<Counter> {
        PAGE.with(|slot| slot.borrow().as_ref().and_then(|page| page.counter(key)))
            .map(|timer| Counter { timer })
    }

    pub fn start(&self) -> bool {
        self.timer.start()
    }

    pub fn stop(&self) -> bool {
        self.timer.stop()
    }

    pub fn reset(&self) {
        self.timer.reset();
    }

    #[wasm_bindgen(getter, js_name = remainingSeconds)]
    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining_seconds()
    }

    #[wasm_bindgen(getter, js_name = totalSeconds)]
    pub fn total_seconds(&self) -> u32 {
        self.timer.total_seconds()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.timer.is_running()
    }

    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.timer.display()
    }

    #[wasm_bindgen(js_name = addStartListener)]
    pub fn add_start_listener(&self, callback: JsValue) -> Option<Subscription> {
        self.register(Lifecycle::Start, callback)
    }

    #[wasm_bindgen(js_name = addResetListener)]
    pub fn add_reset_listener(&self, callback: JsValue) -> Option<Subscription> {
        self.register(Lifecycle::Reset, callback)
    }

    #[wasm_bindgen(js_name = addStopListener)]
    pub fn add_stop_listener(&self, callback: JsValue) -> Option<Subscription> {
        self.register(Lifecycle::Stop, callback)
    }

    #[wasm_bindgen(js_name = removeListener)]
    pub fn remove_listener(&self, subscription: &Subscription) -> bool {
        self.timer.remove_listener(subscription.handle)
    }

    fn register(&self, event: Lifecycle, callback: JsValue) -> Option<Subscription> {
        let Some(function) = callback.dyn_ref::<js_sys::Function>().cloned() else {
            log::error!("{event:?} listener must be a function");
            return None;
        };
        let handle = self.timer.add_listener(event, move || {
            if let Err(e) = function.call0(&JsValue::NULL) {
                log::error!("{event:?} listener threw: {}", js_error(&e));
            }
        });
        Some(Subscription { handle })
    }
}

/// Re-sync every input row's title after script changed values.
#[wasm_bindgen(js_name = refreshInputRows)]
pub fn refresh_input_rows() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let selector = PAGE.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|page| page.config().input_row_selector.clone())
    });
    let selector = selector.unwrap_or_else(|| crate::consts::INPUT_ROW_SELECTOR.to_owned());
    input_focus::refresh_all(&document, &selector);
}
