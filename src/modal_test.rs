use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::schedule::ManualScheduler;

// =============================================================
// Helpers
// =============================================================

#[derive(Debug, Default)]
struct SurfaceState {
    open: bool,
    holder_open: bool,
    scroll_locked: bool,
    alphas: Vec<f64>,
}

#[derive(Clone, Default)]
struct FakeSurface(Rc<RefCell<SurfaceState>>);

impl FakeSurface {
    fn open(&self) -> bool {
        self.0.borrow().open
    }

    fn holder_open(&self) -> bool {
        self.0.borrow().holder_open
    }

    fn scroll_locked(&self) -> bool {
        self.0.borrow().scroll_locked
    }

    fn writes(&self) -> usize {
        self.0.borrow().alphas.len()
    }

    fn last_alpha(&self) -> Option<f64> {
        self.0.borrow().alphas.last().copied()
    }
}

impl ModalSurface for FakeSurface {
    fn set_open(&self, open: bool) {
        self.0.borrow_mut().open = open;
    }

    fn set_holder_open(&self, open: bool) {
        self.0.borrow_mut().holder_open = open;
    }

    fn set_backdrop_alpha(&self, alpha: f64) {
        self.0.borrow_mut().alphas.push(alpha);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.0.borrow_mut().scroll_locked = locked;
    }
}

fn modal() -> (Modal<ManualScheduler, FakeSurface>, FakeSurface, ManualScheduler) {
    let surface = FakeSurface::default();
    let scheduler = ManualScheduler::new();
    let modal = Modal::new(surface.clone(), scheduler.clone(), 20);
    (modal, surface, scheduler)
}

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < 1e-9)
}

// =============================================================
// Fade
// =============================================================

#[test]
fn fade_in_takes_six_writes_then_stops() {
    let mut fade = Fade::fade_in();
    let mut writes = Vec::new();
    while let FadeStep::Alpha(alpha) = fade.step() {
        writes.push(alpha);
    }
    assert_eq!(writes.len(), 6);
    assert!(approx(writes.last().copied(), 0.61));
    assert_eq!(fade.step(), FadeStep::Done);
}

#[test]
fn fade_out_takes_five_writes_then_stops() {
    let mut fade = Fade::fade_out();
    let mut writes = Vec::new();
    while let FadeStep::Alpha(alpha) = fade.step() {
        writes.push(alpha);
    }
    assert_eq!(writes.len(), 5);
    assert!(approx(writes.last().copied(), 0.06));
}

#[test]
fn backdrop_color_rounds_alpha() {
    assert_eq!(backdrop_color(0.11), "rgba(0, 0, 0, 0.11)");
    assert_eq!(backdrop_color(0.01 + 0.1 + 0.1), "rgba(0, 0, 0, 0.21)");
}

// =============================================================
// Modal
// =============================================================

#[test]
fn show_opens_then_reveals_holder_after_fade() {
    let (modal, surface, scheduler) = modal();

    modal.show();
    assert!(surface.open());
    assert!(surface.scroll_locked());
    assert!(!surface.holder_open());
    assert_eq!(modal.fading(), Some(FadeDirection::In));

    scheduler.advance(120);
    assert_eq!(surface.writes(), 6);
    assert!(!surface.holder_open());

    scheduler.advance(20);
    assert!(surface.holder_open());
    assert!(!modal.is_animating());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn hide_drops_holder_first_and_closes_after_fade() {
    let (modal, surface, scheduler) = modal();
    modal.show();
    scheduler.advance(1_000);

    modal.hide();
    assert!(!surface.holder_open());
    assert!(!surface.scroll_locked());
    assert!(surface.open());

    scheduler.advance(100);
    assert!(surface.open());
    assert!(approx(surface.last_alpha(), 0.06));

    scheduler.advance(20);
    assert!(!surface.open());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn retrigger_mid_animation_keeps_one_ticker() {
    let (modal, _surface, scheduler) = modal();

    modal.show();
    scheduler.advance(40);
    modal.show();
    assert_eq!(scheduler.pending(), 1);

    modal.hide();
    assert_eq!(scheduler.pending(), 1);
    assert_eq!(modal.fading(), Some(FadeDirection::Out));
}

#[test]
fn hide_mid_fade_in_never_reveals_holder() {
    let (modal, surface, scheduler) = modal();

    modal.show();
    scheduler.advance(60);
    modal.hide();
    scheduler.advance(1_000);

    assert!(!surface.holder_open());
    assert!(!surface.open());
    assert!(!modal.is_animating());
}

#[test]
fn dropping_modal_cancels_animation() {
    let (modal, _surface, scheduler) = modal();
    modal.show();
    assert_eq!(scheduler.pending(), 1);

    drop(modal);
    assert_eq!(scheduler.pending(), 0);
}
