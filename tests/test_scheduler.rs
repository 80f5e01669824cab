use quibble::config::{FAST_TICK_US, MEDIUM_TICK_US};
use quibble::debounce::Switches;
use quibble::scheduler::SLOW_TICK_US;
use quibble::{FastTask, GameTime, Scheduler, SharedState};

// ── game clock ────────────────────────────────────────────────────────────────

#[test]
fn slow_tick_is_sixty_four_hertz() {
    assert_eq!(SLOW_TICK_US, 15_625);
}

#[test]
fn clock_rolls_minutes() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();

    sched.advance_secs(&shared, 59, Switches::NONE);
    assert_eq!(shared.now(), GameTime { minutes: 0, seconds: 59 });

    sched.advance_secs(&shared, 2, Switches::NONE);
    let t = shared.now();
    assert_eq!(t, GameTime { minutes: 1, seconds: 1 });
    assert_eq!(t.total_seconds(), 61);

    sched.advance_secs(&shared, 59, Switches::NONE);
    assert_eq!(shared.now(), GameTime { minutes: 2, seconds: 0 });
}

#[test]
fn reading_the_clock_does_not_disturb_it() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();
    for _ in 0..130 {
        sched.advance_secs(&shared, 1, Switches::NONE);
        shared.now();
    }
    assert_eq!(shared.now().total_seconds(), 130);
}

#[test]
fn reset_zeroes_the_clock() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();
    sched.advance_secs(&shared, 75, Switches::NONE);
    shared.reset_clock();
    assert_eq!(shared.now(), GameTime::default());
}

#[test]
fn clock_runs_while_paused() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();
    shared.set_paused(true);
    sched.advance_secs(&shared, 3, Switches::NONE);
    assert_eq!(shared.now().seconds, 3);
}

// ── wall drift pacing ─────────────────────────────────────────────────────────

#[test]
fn drift_requested_every_eleventh_medium_tick() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();

    sched.advance(&shared, 10 * MEDIUM_TICK_US, Switches::NONE);
    assert_eq!(shared.take_drift(), 0);

    sched.advance(&shared, MEDIUM_TICK_US, Switches::NONE);
    assert_eq!(shared.take_drift(), 1);
    assert_eq!(shared.take_drift(), 0);

    sched.advance(&shared, 22 * MEDIUM_TICK_US, Switches::NONE);
    assert_eq!(shared.take_drift(), 2);
}

#[test]
fn no_drift_while_paused() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();
    shared.set_paused(true);
    sched.advance_secs(&shared, 5, Switches::NONE);
    assert_eq!(shared.take_drift(), 0);
}

#[test]
fn snapshot_drains_drift() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();
    sched.advance_secs(&shared, 1, Switches::NONE);
    assert_eq!(shared.snapshot().drift_steps, 1);
    assert_eq!(shared.snapshot().drift_steps, 0);
}

// ── indicator ─────────────────────────────────────────────────────────────────

#[test]
fn indicator_dark_without_super_mode() {
    let shared = SharedState::new();
    let mut fast = FastTask::default();
    assert!((0..300).all(|_| !fast.run(&shared)));
    assert!(!shared.indicator());
}

#[test]
fn indicator_lit_for_three_ticks_per_super_second() {
    let shared = SharedState::new();
    let mut fast = FastTask::default();
    shared.publish_super(true, 2);
    for _ in 0..6 {
        assert!(fast.run(&shared));
    }
    assert!(!fast.run(&shared));
    assert!(!shared.indicator());
}

#[test]
fn counters_advance_with_their_tasks() {
    let shared = SharedState::new();
    let mut sched = Scheduler::new();
    sched.advance(&shared, 3 * FAST_TICK_US, Switches::NONE);
    let [fast, medium, slow] = shared.counters();
    assert_eq!(fast, 3);
    assert_eq!(medium, 1);
    assert_eq!(u64::from(slow), 3 * FAST_TICK_US / SLOW_TICK_US);
}
