//! Trailing throttle over a [`Scheduler`].
//!
//! The first trigger arms a one-shot timer for the window; further triggers
//! inside the window are absorbed. When the timer fires the action runs once
//! and the throttle re-opens. A burst of resize events therefore produces at
//! most one action per window, always after the burst started.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::schedule::Scheduler;

struct ThrottleState<H> {
    pending: bool,
    timer: Option<H>,
}

struct ThrottleInner<S: Scheduler> {
    scheduler: S,
    window_ms: u32,
    action: Box<dyn Fn()>,
    state: RefCell<ThrottleState<S::Handle>>,
}

/// Rate limiter that runs its action at most once per window, trailing.
///
/// Clones share the same window. Dropping the last clone cancels a pending run.
pub struct Throttle<S: Scheduler> {
    inner: Rc<ThrottleInner<S>>,
}

impl<S: Scheduler> Clone for Throttle<S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<S: Scheduler + 'static> Throttle<S> {
    pub fn new(scheduler: S, window_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(ThrottleInner {
                scheduler,
                window_ms,
                action: Box::new(action),
                state: RefCell::new(ThrottleState { pending: false, timer: None }),
            }),
        }
    }

    /// Request a run. Ignored while a run is already pending.
    pub fn trigger(&self) {
        if self.inner.state.borrow().pending {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let timer = self.inner.scheduler.once(
            self.inner.window_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.state.borrow_mut().pending = false;
                (inner.action)();
            }),
        );

        let mut state = self.inner.state.borrow_mut();
        state.pending = true;
        state.timer = Some(timer);
    }

    /// Whether a run is armed and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().pending
    }

    /// Drop a pending run without executing it.
    pub fn cancel(&self) {
        let mut state = self.inner.state.borrow_mut();
        state.pending = false;
        state.timer = None;
    }
}
