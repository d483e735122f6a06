//! Modal dialogs with a stepped backdrop fade.
//!
//! Showing a modal locks page scroll, makes the modal visible and then fades
//! the backdrop in one step per `modal_step_ms`. The holder (the dialog box
//! itself) appears once the backdrop reaches full strength. Hiding reverses
//! that: the holder goes first, the backdrop fades out, and the modal is
//! hidden at the end.
//!
//! A modal runs at most one animation. Showing or hiding mid-animation drops
//! the running ticker before arming the new one.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::consts::{FADE_ALPHA_FLOOR, FADE_ALPHA_PEAK, FADE_ALPHA_START, FADE_ALPHA_STEP};
use crate::schedule::Scheduler;

/// The parts of a modal the animation touches.
pub trait ModalSurface {
    /// Toggle `visible` on the modal element.
    fn set_open(&self, open: bool);
    /// Toggle `visible` on the `.modal__holder`.
    fn set_holder_open(&self, open: bool);
    /// Write the backdrop colour for `alpha`.
    fn set_backdrop_alpha(&self, alpha: f64);
    /// Toggle `no-overflow` on the page body.
    fn set_scroll_locked(&self, locked: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// Write this backdrop alpha and keep going.
    Alpha(f64),
    /// The fade reached its bound; stop the ticker.
    Done,
}

/// Backdrop alpha progression for one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    direction: FadeDirection,
    alpha: f64,
}

impl Fade {
    #[must_use]
    pub fn fade_in() -> Self {
        Self { direction: FadeDirection::In, alpha: FADE_ALPHA_START }
    }

    #[must_use]
    pub fn fade_out() -> Self {
        Self { direction: FadeDirection::Out, alpha: FADE_ALPHA_PEAK }
    }

    #[must_use]
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Advance one step. The bound is checked before moving, so the last
    /// written alpha may overshoot it by less than one step.
    pub fn step(&mut self) -> FadeStep {
        match self.direction {
            FadeDirection::In if self.alpha >= FADE_ALPHA_PEAK => FadeStep::Done,
            FadeDirection::Out if self.alpha <= FADE_ALPHA_FLOOR => FadeStep::Done,
            FadeDirection::In => {
                self.alpha += FADE_ALPHA_STEP;
                FadeStep::Alpha(self.alpha)
            }
            FadeDirection::Out => {
                self.alpha -= FADE_ALPHA_STEP;
                FadeStep::Alpha(self.alpha)
            }
        }
    }
}

/// CSS `background-color` value for a backdrop alpha.
#[must_use]
pub fn backdrop_color(alpha: f64) -> String {
    format!("rgba(0, 0, 0, {alpha:.2})")
}

struct ModalInner<S: Scheduler, M> {
    surface: M,
    scheduler: S,
    step_ms: u32,
    fade: Option<Fade>,
    ticker: Option<S::Handle>,
}

/// One modal element and its animation state. Clones share the modal.
pub struct Modal<S: Scheduler, M: ModalSurface> {
    inner: Rc<RefCell<ModalInner<S, M>>>,
}

impl<S: Scheduler, M: ModalSurface> Clone for Modal<S, M> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<S, M> Modal<S, M>
where
    S: Scheduler + 'static,
    M: ModalSurface + 'static,
{
    pub fn new(surface: M, scheduler: S, step_ms: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModalInner { surface, scheduler, step_ms, fade: None, ticker: None })),
        }
    }

    /// Lock scroll, show the modal and fade the backdrop in.
    pub fn show(&self) {
        {
            let inner = self.inner.borrow();
            inner.surface.set_scroll_locked(true);
            inner.surface.set_open(true);
        }
        self.animate(Fade::fade_in());
    }

    /// Unlock scroll, hide the holder and fade the backdrop out.
    pub fn hide(&self) {
        {
            let inner = self.inner.borrow();
            inner.surface.set_scroll_locked(false);
            inner.surface.set_holder_open(false);
        }
        self.animate(Fade::fade_out());
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().ticker.is_some()
    }

    /// Direction of the running animation, if any.
    #[must_use]
    pub fn fading(&self) -> Option<FadeDirection> {
        self.inner.borrow().fade.map(|fade| fade.direction())
    }

    fn animate(&self, fade: Fade) {
        let previous = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.ticker.take();
            inner.fade = Some(fade);
            let weak = Rc::downgrade(&self.inner);
            let step_ms = inner.step_ms;
            let ticker = inner.scheduler.every(
                step_ms,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        Self::on_step(&inner);
                    }
                }),
            );
            inner.ticker = Some(ticker);
            previous
        };
        drop(previous);
    }

    fn on_step(inner: &Rc<RefCell<ModalInner<S, M>>>) {
        let finished = {
            let mut state = inner.borrow_mut();
            let Some(fade) = state.fade.as_mut() else {
                return;
            };
            let step = fade.step();
            let direction = fade.direction();
            match step {
                FadeStep::Alpha(alpha) => {
                    state.surface.set_backdrop_alpha(alpha);
                    None
                }
                FadeStep::Done => {
                    match direction {
                        FadeDirection::In => state.surface.set_holder_open(true),
                        FadeDirection::Out => state.surface.set_open(false),
                    }
                    state.fade = None;
                    state.ticker.take()
                }
            }
        };
        drop(finished);
    }
}
