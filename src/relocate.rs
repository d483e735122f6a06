//! Responsive element relocation.
//!
//! Some blocks of the profile page live in a sidebar on wide screens but
//! belong above the video on narrow ones. Each [`Relocation`] remembers where
//! its subject started by leaving a hidden anchor right after it. While the
//! breakpoint holds, the subject is moved next to (or into) its target; when
//! it stops holding, the subject is put back immediately before its anchor.
//!
//! Evaluation is idempotent: re-inserting a node where it already is changes
//! nothing. The [`Relocator`] re-evaluates every installed rule after resize
//! bursts, throttled so at most one pass runs per window.

#[cfg(test)]
#[path = "relocate_test.rs"]
mod relocate_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::RelocationSpec;
use crate::dom::Dom;
use crate::error::PageError;
use crate::schedule::Scheduler;
use crate::throttle::Throttle;
use crate::viewport::{MediaQuery, Viewport};

/// Where a relocated subject goes relative to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Insertion {
    /// Become the first child of the target.
    #[default]
    Prepend,
    /// Become the target's next sibling.
    After,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The breakpoint holds; the subject sits at its target.
    Target,
    /// The breakpoint does not hold; the subject sits before its anchor.
    Anchor,
}

/// Index of an installed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(usize);

/// An installed relocation rule.
#[derive(Debug, Clone)]
pub struct Relocation<N> {
    pub element_id: String,
    pub subject: N,
    pub target: N,
    pub anchor: N,
    pub query: MediaQuery,
    pub insertion: Insertion,
}

impl<N> Relocation<N> {
    /// Move the subject according to whether the breakpoint `matches`.
    ///
    /// # Errors
    ///
    /// Propagates the [`Dom`] insertion failure.
    pub fn place<D: Dom<Node = N>>(&self, dom: &D, matches: bool) -> Result<Placement, PageError> {
        if !matches {
            dom.insert_before(&self.anchor, &self.subject)?;
            return Ok(Placement::Anchor);
        }
        match self.insertion {
            Insertion::Prepend => dom.prepend(&self.target, &self.subject)?,
            Insertion::After => dom.insert_after(&self.target, &self.subject)?,
        }
        Ok(Placement::Target)
    }
}

struct Shared<D: Dom, V> {
    dom: Rc<D>,
    viewport: Rc<V>,
    rules: RefCell<Vec<Relocation<D::Node>>>,
}

impl<D: Dom, V: Viewport> Shared<D, V> {
    fn evaluate(&self, id: RuleId) -> Result<Placement, PageError> {
        let rules = self.rules.borrow();
        let rule = rules
            .get(id.0)
            .ok_or_else(|| PageError::Dom(format!("unknown relocation rule {}", id.0)))?;
        rule.place(self.dom.as_ref(), self.viewport.matches(&rule.query))
    }

    fn evaluate_all(&self) {
        for rule in self.rules.borrow().iter() {
            if let Err(e) = rule.place(self.dom.as_ref(), self.viewport.matches(&rule.query)) {
                log::warn!("relocating #{} failed: {e}", rule.element_id);
            }
        }
    }
}

/// Owns the installed rules and the throttled resize subscription.
///
/// Dropping the relocator unsubscribes from resize and cancels a pending pass.
/// Relocated nodes stay where they were last placed.
pub struct Relocator<D: Dom, V: Viewport, S: Scheduler> {
    shared: Rc<Shared<D, V>>,
    throttle: Throttle<S>,
    subscription: Option<V::Subscription>,
}

impl<D, V, S> Relocator<D, V, S>
where
    D: Dom + 'static,
    V: Viewport + 'static,
    S: Scheduler + 'static,
{
    pub fn new(dom: Rc<D>, viewport: Rc<V>, scheduler: S, throttle_ms: u32) -> Self {
        let shared = Rc::new(Shared { dom, viewport, rules: RefCell::new(Vec::new()) });
        let weak = Rc::downgrade(&shared);
        let throttle = Throttle::new(scheduler, throttle_ms, move || {
            if let Some(shared) = weak.upgrade() {
                shared.evaluate_all();
            }
        });
        Self { shared, throttle, subscription: None }
    }

    /// Install one rule: anchor the subject, place it for the current
    /// viewport, and make sure resizes re-evaluate it.
    ///
    /// Returns `Ok(None)` when the subject or target is not on the page; such
    /// rules are optional and skipped without error.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::MediaQuery`] for an unparsable breakpoint and
    /// propagates [`Dom`] and resize-subscription failures.
    pub fn install(&mut self, spec: &RelocationSpec) -> Result<Option<RuleId>, PageError> {
        let query = MediaQuery::parse(&spec.media_query)?;
        let dom = self.shared.dom.as_ref();

        let (Some(subject), Some(target)) = (dom.element_by_id(&spec.element_id), dom.element_by_id(&spec.target_id))
        else {
            log::debug!("relocation #{} -> #{} skipped: element not on page", spec.element_id, spec.target_id);
            return Ok(None);
        };

        self.ensure_subscribed()?;
        let dom = self.shared.dom.as_ref();
        let anchor = dom.create_anchor(&spec.element_id)?;
        dom.insert_after(&subject, &anchor)?;

        let rule = Relocation {
            element_id: spec.element_id.clone(),
            subject,
            target,
            anchor,
            query,
            insertion: spec.insertion,
        };
        rule.place(dom, self.shared.viewport.matches(&query))?;

        let id = {
            let mut rules = self.shared.rules.borrow_mut();
            rules.push(rule);
            RuleId(rules.len() - 1)
        };
        Ok(Some(id))
    }

    /// Install every spec, logging failures. Returns how many were installed.
    pub fn install_all(&mut self, specs: &[RelocationSpec]) -> usize {
        let mut installed = 0;
        for spec in specs {
            match self.install(spec) {
                Ok(Some(_)) => installed += 1,
                Ok(None) => {}
                Err(e) => log::warn!("relocation #{} not installed: {e}", spec.element_id),
            }
        }
        installed
    }

    /// Place one rule's subject for the current viewport.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dom`] for an unknown rule or a failed insertion.
    pub fn evaluate(&self, id: RuleId) -> Result<Placement, PageError> {
        self.shared.evaluate(id)
    }

    /// Place every rule's subject for the current viewport, in install order.
    pub fn evaluate_all(&self) {
        self.shared.evaluate_all();
    }

    /// A copy of an installed rule.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<Relocation<D::Node>> {
        self.shared.rules.borrow().get(id.0).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.rules.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a resize pass is waiting for its window to close.
    #[must_use]
    pub fn is_pass_pending(&self) -> bool {
        self.throttle.is_pending()
    }

    fn ensure_subscribed(&mut self) -> Result<(), PageError> {
        if self.subscription.is_some() {
            return Ok(());
        }
        let throttle = self.throttle.clone();
        let subscription = self
            .shared
            .viewport
            .on_resize(Box::new(move || throttle.trigger()))?;
        self.subscription = Some(subscription);
        Ok(())
    }
}
