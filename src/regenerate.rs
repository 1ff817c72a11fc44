use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::domain::{TimerCommand, Timestamp};

/// When a resumed timer is brought to the front even if it was asked to be
/// quiet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPolicy {
    /// Reveal while the end time is still ahead.
    Pending,
    /// Reveal once the end time has passed, so a ringing timer can be found.
    Expired,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        RevealPolicy::Pending
    }
}

impl FromStr for RevealPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RevealPolicy::Pending),
            "expired" => Ok(RevealPolicy::Expired),
            _ => anyhow::bail!(
                "unknown reveal policy '{}', expected 'pending' or 'expired'",
                s
            ),
        }
    }
}

impl fmt::Display for RevealPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RevealPolicy::Pending => write!(f, "pending"),
            RevealPolicy::Expired => write!(f, "expired"),
        }
    }
}

/// What is known about a timer that was running before a restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegenerateInput {
    pub end: Timestamp,
    pub requested_loudly: bool,
    pub now: Timestamp,
}

/// Rebuilds the command for a timer that was already in flight.
///
/// The remaining time is `end - now` and is not clamped: zero or negative
/// means it already went off, and the caller decides whether to ring. A
/// resumed timer always runs.
pub fn regenerate(input: &RegenerateInput, policy: RevealPolicy) -> TimerCommand {
    let remaining = input.end.signed_duration_since(input.now);
    let still_pending = input.end > input.now;

    let reveal = match policy {
        RevealPolicy::Pending => still_pending,
        RevealPolicy::Expired => !still_pending,
    };

    TimerCommand {
        duration_millis: remaining.num_milliseconds(),
        starts_running: true,
        starts_loudly: input.requested_loudly || reveal,
    }
}
