//! Floating labels for `.input-row` fields.
//!
//! Each row pairs an input with a title. The title is "raised" (shrunk above
//! the input) whenever the field has something to show: a value, a
//! placeholder, or focus. Read-only inputs never change their title on focus
//! or blur.

#[cfg(test)]
#[path = "input_focus_test.rs"]
mod input_focus_test;

/// Form controls an input row can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextControl {
    Input,
    TextArea,
}

impl TextControl {
    /// Classify an element by tag name, ignoring case.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("input") {
            Some(Self::Input)
        } else if tag.eq_ignore_ascii_case("textarea") {
            Some(Self::TextArea)
        } else {
            None
        }
    }
}

/// One input row: the input and its title.
pub trait LabeledField {
    fn value(&self) -> String;
    fn placeholder(&self) -> String;
    fn read_only(&self) -> bool;
    fn focus_input(&self);
    fn clear_value(&self);
    fn title_raised(&self) -> bool;
    fn set_title_raised(&self, raised: bool);
}

/// Initial state: raise the title when the input has a value or placeholder.
pub fn init<F: LabeledField + ?Sized>(field: &F) {
    if !field.value().is_empty() || !field.placeholder().is_empty() {
        field.set_title_raised(true);
    }
}

/// Title click or input focus.
pub fn focus<F: LabeledField + ?Sized>(field: &F) {
    field.focus_input();
    if !field.title_raised() && !field.read_only() {
        field.set_title_raised(true);
    }
}

/// Input blur or change: an editable field left blank drops its title back.
pub fn blur<F: LabeledField + ?Sized>(field: &F) {
    if field.value().trim().is_empty() && field.placeholder().is_empty() && !field.read_only() {
        field.clear_value();
        field.set_title_raised(false);
    }
}

/// Re-sync the title after the value was changed by script.
pub fn refresh<F: LabeledField + ?Sized>(field: &F) {
    field.set_title_raised(!field.value().trim().is_empty());
}
