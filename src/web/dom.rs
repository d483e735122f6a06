//! `Dom` and `TextTarget` over `web-sys` elements.

use web_sys::{Document, Element};

use crate::consts::ANCHOR_ATTRIBUTE;
use crate::countdown::TextTarget;
use crate::dom::Dom;
use crate::error::PageError;

use super::js_error;

pub struct WebDom {
    document: Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn dom_error(e: &wasm_bindgen::JsValue) -> PageError {
    PageError::Dom(js_error(e))
}

fn attached(reference: &Element) -> Result<(), PageError> {
    if reference.parent_node().is_none() {
        return Err(PageError::Dom(format!("#{} is not attached", reference.id())));
    }
    Ok(())
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_anchor(&self, subject_id: &str) -> Result<Element, PageError> {
        let anchor = self.document.create_element("div").map_err(|e| dom_error(&e))?;
        anchor
            .set_attribute(ANCHOR_ATTRIBUTE, subject_id)
            .map_err(|e| dom_error(&e))?;
        anchor
            .set_attribute("style", "display: none")
            .map_err(|e| dom_error(&e))?;
        Ok(anchor)
    }

    fn insert_after(&self, reference: &Element, node: &Element) -> Result<(), PageError> {
        attached(reference)?;
        reference.after_with_node_1(node).map_err(|e| dom_error(&e))
    }

    fn insert_before(&self, reference: &Element, node: &Element) -> Result<(), PageError> {
        attached(reference)?;
        reference.before_with_node_1(node).map_err(|e| dom_error(&e))
    }

    fn prepend(&self, parent: &Element, node: &Element) -> Result<(), PageError> {
        parent.prepend_with_node_1(node).map_err(|e| dom_error(&e))
    }
}

impl TextTarget for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}
