//! Binds `.input-row` fields to the floating-label rules.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement};

use crate::consts::{INPUT_SELECTOR, TITLE_RAISED_CLASS, TITLE_SELECTOR};
use crate::input_focus::{self, LabeledField, TextControl};

use super::{js_error, listen, query_all, toggle_class};

/// The editable control of a row.
enum Control {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl Control {
    fn from_element(element: &Element) -> Option<Self> {
        match TextControl::from_tag(&element.tag_name())? {
            TextControl::Input => element.dyn_ref::<HtmlInputElement>().cloned().map(Self::Input),
            TextControl::TextArea => element.dyn_ref::<HtmlTextAreaElement>().cloned().map(Self::TextArea),
        }
    }

    fn target(&self) -> &EventTarget {
        match self {
            Self::Input(input) => input,
            Self::TextArea(area) => area,
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::TextArea(area) => area.value(),
        }
    }

    fn placeholder(&self) -> String {
        match self {
            Self::Input(input) => input.placeholder(),
            Self::TextArea(area) => area.placeholder(),
        }
    }

    fn read_only(&self) -> bool {
        match self {
            Self::Input(input) => input.read_only(),
            Self::TextArea(area) => area.read_only(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(input) => input.set_value(value),
            Self::TextArea(area) => area.set_value(value),
        }
    }

    fn focus(&self) -> Result<(), wasm_bindgen::JsValue> {
        match self {
            Self::Input(input) => input.focus(),
            Self::TextArea(area) => area.focus(),
        }
    }
}

pub struct WebField {
    input: Control,
    title: Element,
}

impl WebField {
    /// The control and title of one row, or `None` when either is missing.
    /// The control may be an `<input>` or a `<textarea>`.
    #[must_use]
    pub fn from_row(row: &Element) -> Option<Self> {
        let input = Control::from_element(&child(row, INPUT_SELECTOR)?)?;
        let title = child(row, TITLE_SELECTOR)?;
        Some(Self { input, title })
    }
}

fn child(row: &Element, selector: &str) -> Option<Element> {
    match row.query_selector(selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("{selector} lookup failed: {}", js_error(&e));
            None
        }
    }
}

impl LabeledField for WebField {
    fn value(&self) -> String {
        self.input.value()
    }

    fn placeholder(&self) -> String {
        self.input.placeholder()
    }

    fn read_only(&self) -> bool {
        self.input.read_only()
    }

    fn focus_input(&self) {
        if let Err(e) = self.input.focus() {
            log::debug!("input focus rejected: {}", js_error(&e));
        }
    }

    fn clear_value(&self) {
        self.input.set_value("");
    }

    fn title_raised(&self) -> bool {
        self.title.class_list().contains(TITLE_RAISED_CLASS)
    }

    fn set_title_raised(&self, raised: bool) {
        toggle_class(&self.title, TITLE_RAISED_CLASS, raised);
    }
}

/// Initialise and bind every complete row. Returns how many were bound.
pub fn bind_all(document: &Document, row_selector: &str) -> usize {
    let mut bound = 0;
    for row in query_all(document, row_selector) {
        let Some(field) = WebField::from_row(&row) else {
            log::debug!("input row without text control or title skipped");
            continue;
        };
        let field = Rc::new(field);
        input_focus::init(field.as_ref());

        let focus = {
            let field = Rc::clone(&field);
            move |_: Event| input_focus::focus(field.as_ref())
        };
        listen(&field.title, "click", focus.clone());
        listen(field.input.target(), "focus", focus);

        let blur = {
            let field = Rc::clone(&field);
            move |_: Event| input_focus::blur(field.as_ref())
        };
        listen(field.input.target(), "change", blur.clone());
        listen(field.input.target(), "blur", blur);
        bound += 1;
    }
    bound
}

/// Re-sync every row's title with its current value.
pub fn refresh_all(document: &Document, row_selector: &str) {
    for field in query_all(document, row_selector)
        .iter()
        .filter_map(WebField::from_row)
    {
        input_focus::refresh(&field);
    }
}
