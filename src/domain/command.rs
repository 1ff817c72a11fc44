//! Timer command domain types.

use chrono::{DateTime, Duration, Local};

/// The timestamp of timer end times.
pub type Timestamp = DateTime<Local>;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;
const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_SECOND: i64 = 1000;

/// What the hosting service should do with a timer.
///
/// # Invariants
/// - Built from a phrase: `duration_millis >= 0`.
/// - Built from a stored end time: `duration_millis` may be zero or negative,
///   meaning the timer has already expired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerCommand {
    pub duration_millis: i64,
    pub starts_running: bool,
    pub starts_loudly: bool,
}

impl TimerCommand {
    pub fn duration(&self) -> Duration {
        Duration::milliseconds(self.duration_millis)
    }

    /// Returns true if there is no time left on the timer.
    pub fn is_expired(&self) -> bool {
        self.duration_millis <= 0
    }

    /// The instant the timer goes off when started at `now`.
    pub fn end_time(&self, now: Timestamp) -> Timestamp {
        now + self.duration()
    }
}

/// Hours, minutes and seconds collected while reading a phrase.
///
/// A later unit overwrites an earlier one ("2 minutes 3 minutes" is three
/// minutes), nothing is summed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accumulator {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Accumulator {
    pub fn total_millis(&self) -> i64 {
        i64::from(self.hours) * MILLIS_PER_HOUR
            + i64::from(self.minutes) * MILLIS_PER_MINUTE
            + i64::from(self.seconds) * MILLIS_PER_SECOND
    }
}

/// Initial presentation flags.
///
/// Both start out true and can only ever be switched off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags {
    starts_running: bool,
    starts_loudly: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            starts_running: true,
            starts_loudly: true,
        }
    }
}

impl Flags {
    pub fn start_paused(&mut self) {
        self.starts_running = false;
    }

    pub fn start_quietly(&mut self) {
        self.starts_loudly = false;
    }

    pub fn starts_running(&self) -> bool {
        self.starts_running
    }

    pub fn starts_loudly(&self) -> bool {
        self.starts_loudly
    }
}
