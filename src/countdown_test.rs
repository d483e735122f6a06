use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::schedule::ManualScheduler;

// =============================================================
// Helpers
// =============================================================

#[derive(Clone, Default)]
struct Screen(Rc<RefCell<String>>);

impl Screen {
    fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl TextTarget for Screen {
    fn set_text(&self, text: &str) {
        *self.0.borrow_mut() = text.to_owned();
    }
}

type Timer = CountdownTimer<ManualScheduler, Screen>;

fn timer(total: u32) -> (Timer, Screen, ManualScheduler) {
    let screen = Screen::default();
    let scheduler = ManualScheduler::new();
    let timer = CountdownTimer::new(total, screen.clone(), scheduler.clone(), 1000);
    (timer, screen, scheduler)
}

fn counter(timer: &Timer, event: Lifecycle) -> Rc<Cell<u32>> {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    timer.add_listener(event, move || seen.set(seen.get() + 1));
    calls
}

// =============================================================
// Formatting and parsing
// =============================================================

#[test]
fn format_clock_pads_minutes_and_seconds() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(5), "00:05");
    assert_eq!(format_clock(59), "00:59");
    assert_eq!(format_clock(60), "01:00");
    assert_eq!(format_clock(90), "01:30");
    assert_eq!(format_clock(5999), "99:59");
}

#[test]
fn format_clock_does_not_clamp_minutes() {
    assert_eq!(format_clock(6000), "100:00");
}

#[test]
fn parse_duration_reads_leading_digits() {
    assert_eq!(parse_duration("90"), Ok(90));
    assert_eq!(parse_duration("  120 "), Ok(120));
    assert_eq!(parse_duration("90s"), Ok(90));
    assert_eq!(parse_duration(" +90"), Ok(90));
    assert_eq!(parse_duration("0"), Ok(0));
}

#[test]
fn parse_duration_rejects_non_numeric() {
    for raw in ["", "   ", "abc", "-5", "+", "++5", "+ 5", "s90", "99999999999"] {
        assert_eq!(
            parse_duration(raw),
            Err(PageError::InvalidDuration(raw.to_owned())),
            "{raw:?}"
        );
    }
}

// =============================================================
// State machine
// =============================================================

#[test]
fn core_counts_down_and_expires() {
    let mut core = Countdown::new(2);
    assert_eq!(core.tick(), Tick::Ignored);
    assert!(core.begin());
    assert!(!core.begin());
    assert_eq!(core.tick(), Tick::Counted);
    assert_eq!(core.tick(), Tick::Finished);
    assert_eq!(core.remaining(), 0);
    assert!(core.halt());
    assert_eq!(core.phase(), Phase::Expired);
    assert!(!core.halt());
}

#[test]
fn core_halt_with_time_left_goes_idle() {
    let mut core = Countdown::new(10);
    core.begin();
    core.tick();
    assert!(core.halt());
    assert_eq!(core.phase(), Phase::Idle);
    assert_eq!(core.remaining(), 9);

    core.reset();
    assert_eq!(core.remaining(), 10);
}

#[test]
fn core_zero_duration_finishes_on_first_tick() {
    let mut core = Countdown::new(0);
    core.begin();
    assert_eq!(core.tick(), Tick::Finished);
    assert_eq!(core.remaining(), 0);
}

// =============================================================
// Timer lifecycle
// =============================================================

#[test]
fn construction_renders_full_duration() {
    let (timer, screen, scheduler) = timer(5);
    assert_eq!(screen.text(), "00:05");
    assert_eq!(timer.phase(), Phase::Idle);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn ninety_seconds_run_to_expiry() {
    let (timer, screen, scheduler) = timer(90);
    let stops = counter(&timer, Lifecycle::Stop);

    assert!(timer.start());
    assert_eq!(screen.text(), "01:30");

    scheduler.advance(30_000);
    assert_eq!(screen.text(), "01:00");
    assert!(timer.is_running());

    scheduler.advance(60_000);
    assert_eq!(screen.text(), "00:00");
    assert!(!timer.is_running());
    assert_eq!(timer.phase(), Phase::Expired);
    assert_eq!(stops.get(), 1);
    assert!(!timer.is_ticking());
    assert_eq!(scheduler.pending(), 0);

    scheduler.advance(10_000);
    assert_eq!(stops.get(), 1);
}

#[test]
fn start_while_running_is_ignored() {
    let (timer, _screen, scheduler) = timer(90);
    let starts = counter(&timer, Lifecycle::Start);

    assert!(timer.start());
    scheduler.advance(3_000);
    assert!(!timer.start());

    assert_eq!(scheduler.pending(), 1);
    assert_eq!(starts.get(), 1);
    scheduler.advance(1_000);
    assert_eq!(timer.remaining_seconds(), 86);
}

#[test]
fn start_emits_reset_then_start() {
    let (timer, _screen, _scheduler) = timer(10);
    let order = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&order);
    timer.add_reset_listener(move || seen.borrow_mut().push(Lifecycle::Reset));
    let seen = Rc::clone(&order);
    timer.add_start_listener(move || seen.borrow_mut().push(Lifecycle::Start));

    timer.start();

    assert_eq!(*order.borrow(), vec![Lifecycle::Reset, Lifecycle::Start]);
}

#[test]
fn stop_freezes_remaining_time() {
    let (timer, screen, scheduler) = timer(90);
    let first = counter(&timer, Lifecycle::Stop);
    let second = counter(&timer, Lifecycle::Stop);

    timer.start();
    scheduler.advance(10_000);
    assert!(timer.stop());

    assert_eq!(timer.remaining_seconds(), 80);
    assert_eq!(timer.phase(), Phase::Idle);
    assert_eq!((first.get(), second.get()), (1, 1));

    scheduler.advance(10_000);
    assert_eq!(timer.remaining_seconds(), 80);
    assert_eq!(screen.text(), "01:20");
}

#[test]
fn stop_when_idle_does_nothing() {
    let (timer, _screen, _scheduler) = timer(90);
    let stops = counter(&timer, Lifecycle::Stop);

    assert!(!timer.stop());
    assert_eq!(stops.get(), 0);
}

#[test]
fn reset_mid_run_restores_and_stops_ticking() {
    let (timer, screen, scheduler) = timer(90);
    let resets = counter(&timer, Lifecycle::Reset);

    timer.start();
    scheduler.advance(15_000);
    timer.reset();

    assert_eq!(timer.remaining_seconds(), 90);
    assert_eq!(screen.text(), "01:30");
    assert!(!timer.is_running());
    assert_eq!(scheduler.pending(), 0);
    // One from start, one from the explicit reset.
    assert_eq!(resets.get(), 2);
}

#[test]
fn start_after_stop_begins_from_full_duration() {
    let (timer, _screen, scheduler) = timer(30);

    timer.start();
    scheduler.advance(10_000);
    timer.stop();
    timer.start();

    assert_eq!(timer.remaining_seconds(), 30);
    scheduler.advance(1_000);
    assert_eq!(timer.remaining_seconds(), 29);
}

#[test]
fn zero_duration_expires_on_first_tick() {
    let (timer, screen, scheduler) = timer(0);
    let stops = counter(&timer, Lifecycle::Stop);

    timer.start();
    scheduler.advance(1_000);

    assert_eq!(stops.get(), 1);
    assert_eq!(timer.phase(), Phase::Expired);
    assert_eq!(screen.text(), "00:00");
}

#[test]
fn from_attribute_parses_duration() {
    let timer = CountdownTimer::from_attribute("45", Screen::default(), ManualScheduler::new(), 1000)
        .expect("valid duration");
    assert_eq!(timer.total_seconds(), 45);
    assert!(CountdownTimer::from_attribute("soon", Screen::default(), ManualScheduler::new(), 1000).is_err());
}

// =============================================================
// Listeners
// =============================================================

#[test]
fn removed_listener_is_not_called() {
    let (timer, _screen, _scheduler) = timer(10);
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let handle = timer.add_start_listener(move || seen.set(seen.get() + 1));
    assert_eq!(handle.event(), Lifecycle::Start);

    assert!(timer.remove_listener(handle));
    assert!(!timer.remove_listener(handle));
    timer.start();

    assert_eq!(calls.get(), 0);
    assert_eq!(timer.listener_count(Lifecycle::Start), 0);
}

#[test]
fn handles_are_distinct_per_registration() {
    let (timer, _screen, _scheduler) = timer(10);
    let a = timer.add_stop_listener(|| {});
    let b = timer.add_stop_listener(|| {});
    assert_ne!(a, b);

    timer.remove_listener(a);
    assert_eq!(timer.listener_count(Lifecycle::Stop), 1);
}

#[test]
fn stop_listener_may_restart_timer() {
    let (timer, _screen, scheduler) = timer(2);
    let restarted = Rc::new(Cell::new(false));
    let again = timer.clone();
    let flag = Rc::clone(&restarted);
    timer.add_stop_listener(move || {
        if !flag.get() {
            flag.set(true);
            again.start();
        }
    });

    timer.start();
    scheduler.advance(2_000);

    assert!(restarted.get());
    assert!(timer.is_running());
    assert_eq!(timer.remaining_seconds(), 2);
    assert_eq!(scheduler.pending(), 1);
}

#[test]
fn dropping_last_clone_cancels_ticker() {
    let (timer, _screen, scheduler) = timer(10);
    timer.start();
    assert_eq!(scheduler.pending(), 1);

    drop(timer);
    assert_eq!(scheduler.pending(), 0);
}
