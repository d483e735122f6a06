//! Page-level wiring: the counter registry and the relocator, built from
//! [`PageConfig`].
//!
//! Counters are keyed by their element `id`, or `counter-<index>` when the
//! element has none (or its id is already taken). The browser glue looks
//! counters up by key to serve the JS API.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::rc::Rc;

use crate::config::PageConfig;
use crate::countdown::{CountdownTimer, TextTarget, parse_duration};
use crate::dom::Dom;
use crate::error::PageError;
use crate::relocate::Relocator;
use crate::schedule::Scheduler;
use crate::viewport::Viewport;

/// Fallback key for the `index`-th counter on the page.
#[must_use]
pub fn counter_key(index: usize) -> String {
    format!("counter-{index}")
}

/// Countdown timers by key, in page order.
pub struct CounterRegistry<S: Scheduler, T: TextTarget> {
    timers: Vec<(String, CountdownTimer<S, T>)>,
}

impl<S: Scheduler, T: TextTarget> Default for CounterRegistry<S, T> {
    fn default() -> Self {
        Self { timers: Vec::new() }
    }
}

impl<S, T> CounterRegistry<S, T>
where
    S: Scheduler + 'static,
    T: TextTarget + 'static,
{
    /// Register `timer` under `id`, or under the index key when `id` is
    /// missing, empty or taken. Returns the key used.
    pub fn insert(&mut self, id: Option<&str>, index: usize, timer: CountdownTimer<S, T>) -> String {
        let key = match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) if !self.contains(id) => id.to_owned(),
            _ => counter_key(index),
        };
        self.timers.push((key.clone(), timer));
        key
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<CountdownTimer<S, T>> {
        self.timers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, timer)| timer.clone())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.timers.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.timers.iter().map(|(key, _)| key.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Everything the page keeps alive after boot.
pub struct Page<D: Dom, V: Viewport, S: Scheduler, T: TextTarget> {
    config: PageConfig,
    scheduler: S,
    counters: CounterRegistry<S, T>,
    relocator: Relocator<D, V, S>,
}

impl<D, V, S, T> Page<D, V, S, T>
where
    D: Dom + 'static,
    V: Viewport + 'static,
    S: Scheduler + Clone + 'static,
    T: TextTarget + 'static,
{
    pub fn new(config: PageConfig, dom: Rc<D>, viewport: Rc<V>, scheduler: S) -> Self {
        let relocator = Relocator::new(dom, viewport, scheduler.clone(), config.resize_throttle_ms);
        Self { config, scheduler, counters: CounterRegistry::default(), relocator }
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Install the configured relocation table. Returns how many rules apply.
    pub fn install_relocations(&mut self) -> usize {
        let installed = self.relocator.install_all(&self.config.relocations);
        log::debug!("{installed}/{} relocation rules installed", self.config.relocations.len());
        installed
    }

    /// Bind the `index`-th counter element.
    ///
    /// `duration` is the raw `data-counter` value. Returns the registry key.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidDuration`] when the attribute is missing or
    /// does not start with a number; the element is left untouched.
    pub fn bind_counter(
        &mut self,
        id: Option<&str>,
        index: usize,
        duration: Option<&str>,
        target: T,
    ) -> Result<String, PageError> {
        let total = parse_duration(duration.unwrap_or_default())?;
        let timer = CountdownTimer::new(total, target, self.scheduler.clone(), self.config.tick_ms);
        Ok(self.counters.insert(id, index, timer))
    }

    #[must_use]
    pub fn counter(&self, key: &str) -> Option<CountdownTimer<S, T>> {
        self.counters.get(key)
    }

    #[must_use]
    pub fn counters(&self) -> &CounterRegistry<S, T> {
        &self.counters
    }

    #[must_use]
    pub fn relocator(&self) -> &Relocator<D, V, S> {
        &self.relocator
    }
}
