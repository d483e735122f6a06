use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

fn counter() -> (Rc<Cell<u32>>, Box<dyn FnMut()>) {
    let hits = Rc::new(Cell::new(0));
    let hits_cb = Rc::clone(&hits);
    (hits, Box::new(move || hits_cb.set(hits_cb.get() + 1)))
}

// =============================================================
// Recurring callbacks
// =============================================================

#[test]
fn every_fires_once_per_period() {
    let scheduler = ManualScheduler::new();
    let (hits, cb) = counter();
    let _handle = scheduler.every(1000, cb);

    scheduler.advance(999);
    assert_eq!(hits.get(), 0);
    scheduler.advance(1);
    assert_eq!(hits.get(), 1);
    scheduler.advance(5000);
    assert_eq!(hits.get(), 6);
    assert_eq!(scheduler.now(), 6000);
}

#[test]
fn dropping_handle_cancels_recurring_callback() {
    let scheduler = ManualScheduler::new();
    let (hits, cb) = counter();
    let handle = scheduler.every(100, cb);

    scheduler.advance(250);
    assert_eq!(hits.get(), 2);
    drop(handle);
    scheduler.advance(1000);
    assert_eq!(hits.get(), 2);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn zero_period_is_treated_as_one_millisecond() {
    let scheduler = ManualScheduler::new();
    let (hits, cb) = counter();
    let _handle = scheduler.every(0, cb);
    scheduler.advance(3);
    assert_eq!(hits.get(), 3);
}

#[test]
fn recurring_callback_can_cancel_itself() {
    let scheduler = ManualScheduler::new();
    let slot: Rc<RefCell<Option<ManualHandle>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));

    let slot_cb = Rc::clone(&slot);
    let hits_cb = Rc::clone(&hits);
    let handle = scheduler.every(
        10,
        Box::new(move || {
            hits_cb.set(hits_cb.get() + 1);
            if hits_cb.get() == 3 {
                slot_cb.borrow_mut().take();
            }
        }),
    );
    *slot.borrow_mut() = Some(handle);

    scheduler.advance(100);
    assert_eq!(hits.get(), 3);
    assert_eq!(scheduler.pending(), 0);
}

// =============================================================
// One-shot callbacks
// =============================================================

#[test]
fn once_fires_a_single_time() {
    let scheduler = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let hits_cb = Rc::clone(&hits);
    let handle = scheduler.once(500, Box::new(move || hits_cb.set(hits_cb.get() + 1)));

    scheduler.advance(499);
    assert_eq!(hits.get(), 0);
    scheduler.advance(10_000);
    assert_eq!(hits.get(), 1);
    assert!(!handle.is_cancelled());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn dropped_once_never_fires() {
    let scheduler = ManualScheduler::new();
    let hits = Rc::new(Cell::new(0));
    let hits_cb = Rc::clone(&hits);
    let handle = scheduler.once(500, Box::new(move || hits_cb.set(1)));
    drop(handle);
    scheduler.advance(1000);
    assert_eq!(hits.get(), 0);
}

#[test]
fn callbacks_run_in_due_order_and_can_schedule_more() {
    let scheduler = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let nested: Rc<RefCell<Option<ManualHandle>>> = Rc::new(RefCell::new(None));

    let log_late = Rc::clone(&log);
    let _late = scheduler.once(300, Box::new(move || log_late.borrow_mut().push("late")));

    let log_early = Rc::clone(&log);
    let scheduler_cb = scheduler.clone();
    let nested_cb = Rc::clone(&nested);
    let _early = scheduler.once(
        100,
        Box::new(move || {
            log_early.borrow_mut().push("early");
            let log_nested = Rc::clone(&log_early);
            let handle = scheduler_cb.once(50, Box::new(move || log_nested.borrow_mut().push("nested")));
            *nested_cb.borrow_mut() = Some(handle);
        }),
    );

    scheduler.advance(1000);
    assert_eq!(*log.borrow(), vec!["early", "nested", "late"]);
}
