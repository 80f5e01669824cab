//! Periodic tasks and the state they share with the main loop.
//!
//! Three independent tasks run off timer expiry: the fast task drives the
//! super-mode indicator, the medium task debounces switches and paces wall
//! drift, and the slow task advances the game clock. They never touch the
//! simulation directly; everything they produce goes through [`SharedState`]
//! and is read by the main loop once per frame as a [`Snapshot`].

use core::cell::Cell;

use critical_section::Mutex;
use portable_atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::config::{
    CLOCK_COUNTER_TOP, CLOCK_FREQ, CLOCK_PRESCALE, FAST_TICK_US, INDICATOR_TICKS_PER_SEC,
    MEDIUM_TICK_US, WALL_DRIFT_TICKS,
};
use crate::debounce::{DebounceBank, Switches};

/// Slow task period, one clock count.
pub const SLOW_TICK_US: u64 = CLOCK_PRESCALE as u64 * 1_000_000 / CLOCK_FREQ as u64;
const COUNTS_PER_MINUTE: u32 = 60 * CLOCK_FREQ / CLOCK_PRESCALE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameTime {
    pub minutes: u32,
    pub seconds: u32,
}

impl GameTime {
    /// Monotonic seconds since the last reset; used for all cooldown gating.
    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ClockCounter {
    overflows: u32,
    count: u32,
    minutes: u32,
}

impl ClockCounter {
    const ZERO: Self = Self {
        overflows: 0,
        count: 0,
        minutes: 0,
    };

    fn counts(&self) -> u32 {
        self.overflows * CLOCK_COUNTER_TOP + self.count
    }
}

/// Everything written from task context and read by the main loop.
pub struct SharedState {
    switches: AtomicU8,
    pending_drift: AtomicU8,
    paused: AtomicBool,
    super_active: AtomicBool,
    super_seconds: AtomicU32,
    indicator: AtomicBool,
    fast_ticks: AtomicU32,
    medium_ticks: AtomicU32,
    clock: Mutex<Cell<ClockCounter>>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            switches: AtomicU8::new(0),
            pending_drift: AtomicU8::new(0),
            paused: AtomicBool::new(false),
            super_active: AtomicBool::new(false),
            super_seconds: AtomicU32::new(0),
            indicator: AtomicBool::new(false),
            fast_ticks: AtomicU32::new(0),
            medium_ticks: AtomicU32::new(0),
            clock: Mutex::new(Cell::new(ClockCounter::ZERO)),
        }
    }

    pub fn switches(&self) -> Switches {
        Switches(self.switches.load(Ordering::Relaxed))
    }

    fn publish_switches(&self, switches: Switches) {
        self.switches.store(switches.0, Ordering::Relaxed);
    }

    fn request_drift(&self) {
        let _ = self
            .pending_drift
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1));
    }

    pub fn take_drift(&self) -> u8 {
        self.pending_drift.swap(0, Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Main loop reports super-mode status for the indicator task.
    pub fn publish_super(&self, active: bool, seconds: u32) {
        self.super_seconds.store(seconds, Ordering::Relaxed);
        self.super_active.store(active, Ordering::Relaxed);
    }

    pub fn indicator(&self) -> bool {
        self.indicator.load(Ordering::Relaxed)
    }

    /// One slow-task count; the overflow counter bumps when the count wraps.
    pub fn clock_tick(&self) {
        critical_section::with(|cs| {
            let cell = self.clock.borrow(cs);
            let mut c = cell.get();
            c.count += 1;
            if c.count >= CLOCK_COUNTER_TOP {
                c.count = 0;
                c.overflows += 1;
            }
            cell.set(c);
        });
    }

    /// Current game time. Rolls whole minutes out of the counter.
    pub fn now(&self) -> GameTime {
        critical_section::with(|cs| {
            let cell = self.clock.borrow(cs);
            let mut c = cell.get();
            let mut counts = c.counts();
            while counts >= COUNTS_PER_MINUTE {
                counts -= COUNTS_PER_MINUTE;
                c.minutes += 1;
            }
            c.overflows = counts / CLOCK_COUNTER_TOP;
            c.count = counts % CLOCK_COUNTER_TOP;
            cell.set(c);
            let seconds = (u64::from(counts) * u64::from(CLOCK_PRESCALE) / u64::from(CLOCK_FREQ)) as u32;
            GameTime {
                minutes: c.minutes,
                seconds,
            }
        })
    }

    pub fn reset_clock(&self) {
        critical_section::with(|cs| self.clock.borrow(cs).set(ClockCounter::ZERO));
    }

    /// Free-running task counters, mixed into the boot seed.
    pub fn counters(&self) -> [u32; 3] {
        let clock = critical_section::with(|cs| self.clock.borrow(cs).get().counts());
        [
            self.fast_ticks.load(Ordering::Relaxed),
            self.medium_ticks.load(Ordering::Relaxed),
            clock,
        ]
    }

    /// Read once per frame by the main loop.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            switches: self.switches(),
            drift_steps: self.take_drift(),
            time: self.now(),
        }
    }
}

/// What the main loop sees of the periodic tasks for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub switches: Switches,
    pub drift_steps: u8,
    pub time: GameTime,
}

/// ~30 Hz indicator blink while super mode runs.
#[derive(Debug, Default)]
pub struct FastTask {
    counter: u8,
}

impl FastTask {
    pub fn run(&mut self, shared: &SharedState) -> bool {
        let lit = shared.super_active.load(Ordering::Relaxed)
            && u32::from(self.counter)
                < shared.super_seconds.load(Ordering::Relaxed) * INDICATOR_TICKS_PER_SEC;
        self.counter = self.counter.wrapping_add(1);
        shared.indicator.store(lit, Ordering::Relaxed);
        shared.fast_ticks.fetch_add(1, Ordering::Relaxed);
        lit
    }
}

/// Debounce every switch; request a wall drift step every few ticks unless paused.
#[derive(Debug, Default)]
pub struct MediumTask {
    bank: DebounceBank,
    since_drift: u32,
}

impl MediumTask {
    pub fn run(&mut self, shared: &SharedState, raw: Switches) {
        shared.medium_ticks.fetch_add(1, Ordering::Relaxed);
        self.since_drift += 1;
        shared.publish_switches(self.bank.sample(raw));
        if self.since_drift > WALL_DRIFT_TICKS && !shared.is_paused() {
            shared.request_drift();
            self.since_drift = 0;
        }
    }
}

/// Cooperative dispatcher over simulated time, for driving the tasks without hardware timers.
#[derive(Debug)]
pub struct Scheduler {
    fast: FastTask,
    medium: MediumTask,
    now_us: u64,
    next_fast: u64,
    next_medium: u64,
    next_slow: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            fast: FastTask::default(),
            medium: MediumTask::default(),
            now_us: 0,
            next_fast: FAST_TICK_US,
            next_medium: MEDIUM_TICK_US,
            next_slow: SLOW_TICK_US,
        }
    }

    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    /// Fire every task whose period elapses within the next `dt_us`, with
    /// `raw` as the switch levels seen by each medium tick.
    pub fn advance(&mut self, shared: &SharedState, dt_us: u64, raw: Switches) {
        let end = self.now_us + dt_us;
        loop {
            let next = self.next_fast.min(self.next_medium).min(self.next_slow);
            if next > end {
                break;
            }
            if self.next_fast == next {
                self.fast.run(shared);
                self.next_fast += FAST_TICK_US;
            }
            if self.next_medium == next {
                self.medium.run(shared, raw);
                self.next_medium += MEDIUM_TICK_US;
            }
            if self.next_slow == next {
                shared.clock_tick();
                self.next_slow += SLOW_TICK_US;
            }
        }
        self.now_us = end;
    }

    pub fn advance_secs(&mut self, shared: &SharedState, secs: u64, raw: Switches) {
        self.advance(shared, secs * 1_000_000, raw);
    }
}
