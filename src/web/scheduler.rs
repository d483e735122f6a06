//! `Scheduler` over `gloo-timers` callbacks.

use gloo_timers::callback::{Interval, Timeout};

use crate::schedule::Scheduler;

/// Browser timers via `setInterval`/`setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// A live browser timer. Dropping it clears the interval or timeout.
pub enum BrowserTimer {
    Interval(Interval),
    Timeout(Timeout),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn every(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> BrowserTimer {
        BrowserTimer::Interval(Interval::new(period_ms, callback))
    }

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> BrowserTimer {
        BrowserTimer::Timeout(Timeout::new(delay_ms, callback))
    }
}
