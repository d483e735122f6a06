//! Countdown timer widget.
//!
//! A countdown is bound to a display element whose `data-counter` attribute
//! holds the duration in seconds. It renders `MM:SS` on construction, on
//! every tick and on reset.
//!
//! ```text
//!            start()                 tick reaches 0
//!   Idle ─────────────▶ Running ──────────────────────▶ Expired
//!    ▲                    │  stop()                       │
//!    └────────────────────┘◀──────── start() resets ──────┘
//!          reset() from any state returns to Idle
//! ```
//!
//! The state machine itself is [`Countdown`], which has no timers and no
//! callbacks. [`CountdownTimer`] wraps it with a ticking handle from a
//! [`Scheduler`], a [`TextTarget`] to render into, and lifecycle listeners.
//! Listeners run after the timer has released its internal state, so a
//! listener may call back into the timer (for example to restart it).

#[cfg(test)]
#[path = "countdown_test.rs"]
mod countdown_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::PageError;
use crate::schedule::Scheduler;

/// Something a countdown can render its `MM:SS` text into.
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    /// Stopped because the remaining time reached zero.
    Expired,
}

/// Lifecycle notifications a countdown emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Start,
    Reset,
    Stop,
}

/// Render seconds as `MM:SS`. Minutes are not clamped to two digits.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Parse a duration attribute using its leading decimal digits.
///
/// `"90"`, `" 90 "`, `"+90"` and `"90s"` all read as 90 seconds.
///
/// # Errors
///
/// Returns [`PageError::InvalidDuration`] when the value does not start with
/// a digit or does not fit in `u32`.
pub fn parse_duration(raw: &str) -> Result<u32, PageError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..end];
    if digits.is_empty() {
        return Err(PageError::InvalidDuration(raw.to_owned()));
    }
    digits
        .parse()
        .map_err(|_| PageError::InvalidDuration(raw.to_owned()))
}

/// Result of one tick of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running; nothing changed.
    Ignored,
    /// One second was taken off and time remains.
    Counted,
    /// No time remains; the owner must stop the countdown.
    Finished,
}

/// The countdown state machine, free of timers and callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
    phase: Phase,
}

impl Countdown {
    #[must_use]
    pub fn new(total: u32) -> Self {
        Self { total, remaining: total, phase: Phase::Idle }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }

    /// Restore the full duration and go idle.
    pub fn reset(&mut self) {
        self.remaining = self.total;
        self.phase = Phase::Idle;
    }

    /// Enter `Running`. Returns `false` when already running.
    pub fn begin(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn tick(&mut self) -> Tick {
        if !self.is_running() {
            return Tick::Ignored;
        }
        if self.remaining == 0 {
            return Tick::Finished;
        }
        self.remaining -= 1;
        if self.remaining == 0 { Tick::Finished } else { Tick::Counted }
    }

    /// Leave `Running`. Returns `false` when not running.
    pub fn halt(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = if self.remaining == 0 { Phase::Expired } else { Phase::Idle };
        true
    }
}

/// Token returned by listener registration, used to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    event: Lifecycle,
    id: u64,
}

impl ListenerHandle {
    #[must_use]
    pub fn event(&self) -> Lifecycle {
        self.event
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    start: Vec<(u64, Listener)>,
    reset: Vec<(u64, Listener)>,
    stop: Vec<(u64, Listener)>,
}

impl Listeners {
    fn list(&self, event: Lifecycle) -> &Vec<(u64, Listener)> {
        match event {
            Lifecycle::Start => &self.start,
            Lifecycle::Reset => &self.reset,
            Lifecycle::Stop => &self.stop,
        }
    }

    fn list_mut(&mut self, event: Lifecycle) -> &mut Vec<(u64, Listener)> {
        match event {
            Lifecycle::Start => &mut self.start,
            Lifecycle::Reset => &mut self.reset,
            Lifecycle::Stop => &mut self.stop,
        }
    }

    fn add(&mut self, event: Lifecycle, listener: Listener) -> ListenerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.list_mut(event).push((id, listener));
        ListenerHandle { event, id }
    }

    fn remove(&mut self, handle: ListenerHandle) -> bool {
        let list = self.list_mut(handle.event);
        let before = list.len();
        list.retain(|(id, _)| *id != handle.id);
        list.len() != before
    }

    fn snapshot(&self, event: Lifecycle) -> Vec<Listener> {
        self.list(event)
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }
}

fn notify(listeners: &[Listener]) {
    for listener in listeners {
        listener();
    }
}

struct Inner<S: Scheduler, T> {
    core: Countdown,
    scheduler: S,
    tick_ms: u32,
    target: T,
    ticker: Option<S::Handle>,
    listeners: Listeners,
}

impl<S: Scheduler, T: TextTarget> Inner<S, T> {
    fn render(&self) {
        self.target.set_text(&self.core.display());
    }
}

/// A countdown bound to a display, ticking through a [`Scheduler`].
///
/// Clones share the same countdown. The ticking handle is owned by the
/// countdown and released on `stop`, `reset`, expiry, or when the last clone
/// is dropped.
pub struct CountdownTimer<S: Scheduler, T: TextTarget> {
    inner: Rc<RefCell<Inner<S, T>>>,
}

impl<S: Scheduler, T: TextTarget> Clone for CountdownTimer<S, T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<S, T> CountdownTimer<S, T>
where
    S: Scheduler + 'static,
    T: TextTarget + 'static,
{
    /// Bind a countdown of `total_seconds` to `target` and render it.
    pub fn new(total_seconds: u32, target: T, scheduler: S, tick_ms: u32) -> Self {
        let inner = Inner {
            core: Countdown::new(total_seconds),
            scheduler,
            tick_ms,
            target,
            ticker: None,
            listeners: Listeners::default(),
        };
        inner.render();
        Self { inner: Rc::new(RefCell::new(inner)) }
    }

    /// Bind a countdown whose duration comes from a `data-counter` value.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidDuration`] when `raw` is not a duration.
    pub fn from_attribute(raw: &str, target: T, scheduler: S, tick_ms: u32) -> Result<Self, PageError> {
        Ok(Self::new(parse_duration(raw)?, target, scheduler, tick_ms))
    }

    /// Restart from the full duration and begin ticking.
    ///
    /// Emits `reset` then `start`. Returns `false`, doing nothing, when the
    /// countdown is already running.
    pub fn start(&self) -> bool {
        if self.is_running() {
            return false;
        }
        self.reset();

        let listeners = {
            let mut inner = self.inner.borrow_mut();
            // A reset listener may have started the countdown already.
            if !inner.core.begin() {
                return false;
            }
            let weak = Rc::downgrade(&self.inner);
            let tick_ms = inner.tick_ms;
            let ticker = inner.scheduler.every(
                tick_ms,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        Self::on_tick(&inner);
                    }
                }),
            );
            inner.ticker = Some(ticker);
            inner.listeners.snapshot(Lifecycle::Start)
        };

        notify(&listeners);
        true
    }

    /// Stop ticking, keeping the remaining time. Emits `stop`.
    ///
    /// Returns `false`, doing nothing, when the countdown is not running.
    pub fn stop(&self) -> bool {
        Self::halt(&self.inner)
    }

    /// Restore the full duration, stop ticking and go idle. Emits `reset`.
    pub fn reset(&self) {
        let (listeners, ticker) = {
            let mut inner = self.inner.borrow_mut();
            inner.core.reset();
            inner.render();
            (inner.listeners.snapshot(Lifecycle::Reset), inner.ticker.take())
        };
        drop(ticker);
        notify(&listeners);
    }

    pub fn add_listener(&self, event: Lifecycle, listener: impl Fn() + 'static) -> ListenerHandle {
        self.inner.borrow_mut().listeners.add(event, Rc::new(listener))
    }

    pub fn add_start_listener(&self, listener: impl Fn() + 'static) -> ListenerHandle {
        self.add_listener(Lifecycle::Start, listener)
    }

    pub fn add_reset_listener(&self, listener: impl Fn() + 'static) -> ListenerHandle {
        self.add_listener(Lifecycle::Reset, listener)
    }

    pub fn add_stop_listener(&self, listener: impl Fn() + 'static) -> ListenerHandle {
        self.add_listener(Lifecycle::Stop, listener)
    }

    /// Deregister a listener. Returns `false` if it was already removed.
    pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
        self.inner.borrow_mut().listeners.remove(handle)
    }

    #[must_use]
    pub fn listener_count(&self, event: Lifecycle) -> usize {
        self.inner.borrow().listeners.list(event).len()
    }

    #[must_use]
    pub fn total_seconds(&self) -> u32 {
        self.inner.borrow().core.total()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.inner.borrow().core.remaining()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.inner.borrow().core.phase()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.borrow().core.is_running()
    }

    /// The text currently rendered, `MM:SS`.
    #[must_use]
    pub fn display(&self) -> String {
        self.inner.borrow().core.display()
    }

    /// Whether a ticking handle is currently held.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.inner.borrow().ticker.is_some()
    }

    fn on_tick(inner: &Rc<RefCell<Inner<S, T>>>) {
        let finished = {
            let mut state = inner.borrow_mut();
            match state.core.tick() {
                Tick::Ignored => false,
                Tick::Counted => {
                    state.render();
                    false
                }
                Tick::Finished => {
                    state.render();
                    true
                }
            }
        };
        if finished {
            Self::halt(inner);
        }
    }

    fn halt(inner: &Rc<RefCell<Inner<S, T>>>) -> bool {
        let (listeners, ticker) = {
            let mut state = inner.borrow_mut();
            if !state.core.halt() {
                return false;
            }
            (state.listeners.snapshot(Lifecycle::Stop), state.ticker.take())
        };
        drop(ticker);
        notify(&listeners);
        true
    }
}
