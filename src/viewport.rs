//! Viewport conditions: media-query parsing/matching and resize subscriptions.
//!
//! Relocation rules name their breakpoint as a single media feature such as
//! `max-width: 991px`. [`MediaQuery`] parses that form so it can be evaluated
//! natively against a known viewport size, and re-renders it as CSS
//! (`(max-width: 991px)`) for the browser's `matchMedia`.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use crate::error::PageError;

/// Supported range features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFeature {
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
}

impl MediaFeature {
    fn css_name(self) -> &'static str {
        match self {
            Self::MinWidth => "min-width",
            Self::MaxWidth => "max-width",
            Self::MinHeight => "min-height",
            Self::MaxHeight => "max-height",
        }
    }
}

/// A single-feature media query, e.g. `max-width: 991px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaQuery {
    pub feature: MediaFeature,
    /// Threshold in CSS pixels.
    pub px: f64,
}

impl MediaQuery {
    /// Parse `feature: <n>px`, with or without surrounding parentheses.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MediaQuery`] for unknown features, missing
    /// values, non-pixel units, and negative thresholds.
    pub fn parse(text: &str) -> Result<Self, PageError> {
        let invalid = || PageError::MediaQuery(text.to_owned());

        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        let (name, value) = body.split_once(':').ok_or_else(invalid)?;

        let feature = match name.trim().to_ascii_lowercase().as_str() {
            "min-width" => MediaFeature::MinWidth,
            "max-width" => MediaFeature::MaxWidth,
            "min-height" => MediaFeature::MinHeight,
            "max-height" => MediaFeature::MaxHeight,
            _ => return Err(invalid()),
        };

        let value = value.trim();
        let number = value.strip_suffix("px").unwrap_or(value).trim();
        let px: f64 = number.parse().map_err(|_| invalid())?;
        if !px.is_finite() || px < 0.0 {
            return Err(invalid());
        }

        Ok(Self { feature, px })
    }

    /// Evaluate against a viewport size in CSS pixels. Bounds are inclusive.
    #[must_use]
    pub fn matches(&self, width: f64, height: f64) -> bool {
        match self.feature {
            MediaFeature::MinWidth => width >= self.px,
            MediaFeature::MaxWidth => width <= self.px,
            MediaFeature::MinHeight => height >= self.px,
            MediaFeature::MaxHeight => height <= self.px,
        }
    }

    /// The query in the parenthesized form `matchMedia` expects.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!("({self})")
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}px", self.feature.css_name(), self.px)
    }
}

impl FromStr for MediaQuery {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The viewport as seen by responsive widgets.
pub trait Viewport {
    /// Keeps a resize listener registered until dropped.
    type Subscription: 'static;

    /// Whether `query` currently holds.
    fn matches(&self, query: &MediaQuery) -> bool;

    /// Call `callback` on every resize notification.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] when the host refuses the listener.
    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<Self::Subscription, PageError>;
}

type ResizeListener = Rc<RefCell<Box<dyn FnMut()>>>;
type ListenerList = RefCell<Vec<(u64, ResizeListener)>>;

/// In-memory viewport whose size is set explicitly.
pub struct SimulatedViewport {
    size: Cell<(f64, f64)>,
    next_id: Cell<u64>,
    listeners: Rc<ListenerList>,
}

/// Resize registration on a [`SimulatedViewport`].
pub struct SimulatedSubscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Drop for SimulatedSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl SimulatedViewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new((width, height)),
            next_id: Cell::new(0),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.get().0
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.get().1
    }

    /// Number of live resize listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Change the size and notify every resize listener.
    pub fn resize(&self, width: f64, height: f64) {
        self.size.set((width, height));
        let snapshot: Vec<ResizeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            let mut callback = listener.borrow_mut();
            (*callback)();
        }
    }
}

impl Viewport for SimulatedViewport {
    type Subscription = SimulatedSubscription;

    fn matches(&self, query: &MediaQuery) -> bool {
        let (width, height) = self.size.get();
        query.matches(width, height)
    }

    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<SimulatedSubscription, PageError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        Ok(SimulatedSubscription { id, listeners: Rc::downgrade(&self.listeners) })
    }
}
