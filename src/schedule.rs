//! Cancellable recurring and one-shot callbacks.
//!
//! Widgets never call the host timer API directly. They ask a [`Scheduler`]
//! for a callback and keep the returned handle; dropping the handle cancels
//! the callback, so a widget that lets go of its handle on `stop`, `reset` or
//! drop can never leak a periodic timer.
//!
//! [`ManualScheduler`] is a virtual clock used by native hosts and tests.
//! Time only moves when [`ManualScheduler::advance`] is called.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Source of timer callbacks.
pub trait Scheduler {
    /// Owned timer handle. Dropping it cancels the pending callback.
    type Handle: 'static;

    /// Run `callback` every `period_ms` until the handle is dropped.
    fn every(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle;

    /// Run `callback` once after `delay_ms` unless the handle is dropped first.
    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

enum Task {
    Repeat { period: u64, callback: Box<dyn FnMut()> },
    Once(Box<dyn FnOnce()>),
}

struct Entry {
    seq: u64,
    due: u64,
    cancelled: Rc<Cell<bool>>,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

/// Deterministic scheduler driven by an explicit virtual clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

/// Handle returned by [`ManualScheduler`].
#[derive(Debug)]
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl ManualHandle {
    /// Whether the callback behind this handle has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of callbacks that are scheduled and not cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .entries
            .iter()
            .filter(|entry| !entry.cancelled.get())
            .count()
    }

    /// Move the clock forward by `ms`, running every callback that falls due,
    /// in due-time order. Callbacks may schedule or cancel other callbacks.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now.saturating_add(ms);

        while let Some(entry) = self.take_due(target) {
            let Entry { seq, due, cancelled, task } = entry;
            match task {
                Task::Once(callback) => callback(),
                Task::Repeat { period, mut callback } => {
                    callback();
                    if !cancelled.get() {
                        self.clock.borrow_mut().entries.push(Entry {
                            seq,
                            due: due + period,
                            cancelled,
                            task: Task::Repeat { period, callback },
                        });
                    }
                }
            }
        }

        self.clock.borrow_mut().now = target;
    }

    /// Remove and return the earliest live entry due at or before `target`.
    /// The clock is moved to its due time so nested scheduling is relative
    /// to the moment the callback fires.
    fn take_due(&self, target: u64) -> Option<Entry> {
        let mut clock = self.clock.borrow_mut();
        clock.entries.retain(|entry| !entry.cancelled.get());
        let index = clock
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= target)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;
        let entry = clock.entries.swap_remove(index);
        clock.now = entry.due;
        Some(entry)
    }

    fn push(&self, delay_ms: u64, task: Task) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let seq = clock.next_seq;
        clock.next_seq += 1;
        let due = clock.now.saturating_add(delay_ms);
        clock.entries.push(Entry { seq, due, cancelled: Rc::clone(&cancelled), task });
        ManualHandle { cancelled }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn every(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> ManualHandle {
        // A zero period would spin forever inside `advance`.
        let period = u64::from(period_ms.max(1));
        self.push(period, Task::Repeat { period, callback })
    }

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        self.push(u64::from(delay_ms), Task::Once(callback))
    }
}
