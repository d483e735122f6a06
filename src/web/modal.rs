//! Binds `.modal` elements, their triggers and close buttons.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::consts::{
    MODAL_CLOSE_SELECTOR, MODAL_HOLDER_SELECTOR, MODAL_SELECTOR, MODAL_TRIGGER_ATTRIBUTE, SCROLL_LOCK_CLASS,
    VISIBLE_CLASS,
};
use crate::modal::{Modal, ModalSurface, backdrop_color};

use super::scheduler::BrowserScheduler;
use super::{js_error, listen, query_all, toggle_class};

pub type WebModal = Modal<BrowserScheduler, WebModalSurface>;

pub struct WebModalSurface {
    body: Option<HtmlElement>,
    modal: HtmlElement,
    holder: Option<Element>,
}

impl ModalSurface for WebModalSurface {
    fn set_open(&self, open: bool) {
        toggle_class(&self.modal, VISIBLE_CLASS, open);
    }

    fn set_holder_open(&self, open: bool) {
        if let Some(holder) = &self.holder {
            toggle_class(holder, VISIBLE_CLASS, open);
        }
    }

    fn set_backdrop_alpha(&self, alpha: f64) {
        if let Err(e) = self
            .modal
            .style()
            .set_property("background-color", &backdrop_color(alpha))
        {
            log::warn!("backdrop not updated: {}", js_error(&e));
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = &self.body {
            toggle_class(body, SCROLL_LOCK_CLASS, locked);
        }
    }
}

/// Wire every modal on the page. Returns how many modals were found.
pub fn bind_all(document: &Document, step_ms: u32) -> usize {
    let body = document.body();
    let modals: Vec<(Element, WebModal)> = query_all(document, MODAL_SELECTOR)
        .into_iter()
        .filter_map(|element| {
            let modal = element.dyn_ref::<HtmlElement>()?.clone();
            let holder = match element.query_selector(MODAL_HOLDER_SELECTOR) {
                Ok(holder) => holder,
                Err(e) => {
                    log::warn!("modal #{} holder lookup failed: {}", element.id(), js_error(&e));
                    None
                }
            };
            let surface = WebModalSurface { body: body.clone(), modal, holder };
            Some((element, Modal::new(surface, BrowserScheduler, step_ms)))
        })
        .collect();

    for (element, modal) in &modals {
        let own: JsValue = element.clone().into();
        let modal = modal.clone();
        listen(element, "click", move |event| {
            let on_backdrop = event
                .target()
                .is_some_and(|target| AsRef::<JsValue>::as_ref(&target) == &own);
            if on_backdrop {
                modal.hide();
            }
        });
    }

    for trigger in query_all(document, &format!("[{MODAL_TRIGGER_ATTRIBUTE}]")) {
        let id = trigger.get_attribute(MODAL_TRIGGER_ATTRIBUTE).unwrap_or_default();
        let Some((_, modal)) = modals.iter().find(|(element, _)| element.id() == id) else {
            log::debug!("modal trigger for #{id} has no modal");
            continue;
        };
        let modal = modal.clone();
        listen(&trigger, "click", move |_| modal.show());
    }

    for button in query_all(document, MODAL_CLOSE_SELECTOR) {
        let owner = match button.closest(MODAL_SELECTOR) {
            Ok(owner) => owner,
            Err(e) => {
                log::warn!("close button lookup failed: {}", js_error(&e));
                None
            }
        };
        let Some(modal) = owner.and_then(|owner| {
            modals
                .iter()
                .find(|(element, _)| *element == owner)
                .map(|(_, modal)| modal.clone())
        }) else {
            continue;
        };
        listen(&button, "click", move |_| modal.hide());
    }

    modals.len()
}
