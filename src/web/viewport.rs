//! `Viewport` over `window.matchMedia` and the window `resize` event.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::PageError;
use crate::viewport::{MediaQuery, Viewport};

use super::js_error;

pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn inner_size(&self) -> Option<(f64, f64)> {
        Some((pixels(self.window.inner_width())?, pixels(self.window.inner_height())?))
    }
}

fn pixels(value: Result<JsValue, JsValue>) -> Option<f64> {
    match value {
        Ok(value) => value.as_f64(),
        Err(_) => None,
    }
}

/// Registered `resize` listener. Dropping it removes the listener.
pub struct ResizeSubscription {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref())
        {
            log::warn!("removing resize listener failed: {}", js_error(&e));
        }
    }
}

impl Viewport for WindowViewport {
    type Subscription = ResizeSubscription;

    fn matches(&self, query: &MediaQuery) -> bool {
        match self.window.match_media(&query.to_css()) {
            Ok(Some(list)) => list.matches(),
            Ok(None) => self
                .inner_size()
                .is_some_and(|(width, height)| query.matches(width, height)),
            Err(e) => {
                log::warn!("matchMedia({query}) failed: {}", js_error(&e));
                false
            }
        }
    }

    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<ResizeSubscription, PageError> {
        let callback = Closure::wrap(callback);
        self.window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .map_err(|e| PageError::Dom(js_error(&e)))?;
        Ok(ResizeSubscription { window: self.window.clone(), callback })
    }
}
