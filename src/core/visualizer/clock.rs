//! Time source and scheduled-task handle for playback.
//!
//! Playback never sleeps or spawns threads. The owner of a `ReplayState`
//! polls it with the current time and the state works out how many ticks
//! became due.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time since the clock's origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to (tests, headless replay)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// A repeating task scheduled at a fixed interval.
///
/// Owned by whoever wants the ticks; dropping it cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub interval: Duration,
    next_due: Duration,
}

impl ScheduledTask {
    /// Schedule a task whose first tick is one `interval` after `now`
    pub fn every(interval: Duration, now: Duration) -> Self {
        // A zero interval would make every poll report unbounded ticks
        let interval = interval.max(Duration::from_millis(1));
        Self {
            id: TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed)),
            interval,
            next_due: now + interval,
        }
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// How long until the next tick, zero if one is already due
    pub fn time_until_due(&self, now: Duration) -> Duration {
        self.next_due.saturating_sub(now)
    }

    /// Number of ticks that became due up to `now`; consumes them.
    pub fn due_ticks(&mut self, now: Duration) -> u32 {
        let mut ticks = 0;
        while self.next_due <= now {
            self.next_due += self.interval;
            ticks += 1;
        }
        ticks
    }
}
