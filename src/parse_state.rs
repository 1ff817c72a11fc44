use tracing::{debug, warn};

use crate::domain::{Accumulator, Flags, TimerCommand};
use crate::parse::{ParseEvent, ParseOutcome};
use crate::vocabulary::TimeUnit;

/// Everything a single phrase parse carries from one token to the next.
///
/// The cursor only moves forward, and every read goes through `peek`, which
/// returns `None` past the last token instead of indexing blindly.
pub struct ParseState<'a> {
    tokens: Vec<&'a str>,
    cursor: usize,
    accumulator: Accumulator,
    pending_half: bool,
    flags: Flags,
    events: Vec<ParseEvent>,
}

impl<'a> ParseState<'a> {
    pub fn new(tokens: Vec<&'a str>) -> ParseState<'a> {
        ParseState {
            tokens,
            cursor: 0,
            accumulator: Accumulator::default(),
            pending_half: false,
            flags: Flags::default(),
            events: vec![],
        }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The token `offset` places after the cursor, if there is one.
    pub fn peek(&self, offset: usize) -> Option<&'a str> {
        self.tokens.get(self.cursor.checked_add(offset)?).copied()
    }

    pub fn current(&self) -> Option<&'a str> {
        self.peek(0)
    }

    /// Whether the tokens starting `offset` places after the cursor spell out
    /// `idiom`, ignoring case. Fails when the phrase ends first.
    pub fn matches_ahead(&self, offset: usize, idiom: &[&str]) -> bool {
        idiom.iter().enumerate().all(|(i, word)| {
            self.peek(offset + i)
                .map_or(false, |token| token.eq_ignore_ascii_case(word))
        })
    }

    pub fn advance(&mut self, count: usize) {
        self.cursor += count;
    }

    pub fn owe_half(&mut self) {
        self.pending_half = true;
    }

    /// Forgets a half that no unit claimed.
    pub fn discard_pending_half(&mut self) {
        self.pending_half = false;
    }

    /// Writes `value` into the field for `unit`, settling any pending half.
    ///
    /// Returns whether a half was applied.
    pub fn apply_unit(&mut self, unit: TimeUnit, value: u32) -> bool {
        let half = self.pending_half;
        self.pending_half = false;

        let acc = &mut self.accumulator;
        match unit {
            TimeUnit::Hour => {
                acc.hours = value;
                if half {
                    acc.minutes = 30;
                }
            }
            TimeUnit::Minute => {
                acc.minutes = value;
                if half {
                    acc.seconds = 30;
                }
            }
            TimeUnit::Second => {
                acc.seconds = value;
                // no sub-second precision, round the half up
                if half {
                    acc.seconds += 1;
                }
            }
        }
        half
    }

    pub fn set_half_an_hour(&mut self) {
        self.accumulator.minutes = 30;
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    pub fn record(&mut self, event: ParseEvent) {
        match &event {
            ParseEvent::OutOfRange { .. } => warn!("{}", event),
            _ => debug!("{}", event),
        }
        self.events.push(event);
    }

    pub fn into_outcome(self) -> ParseOutcome {
        ParseOutcome {
            command: TimerCommand {
                duration_millis: self.accumulator.total_millis(),
                starts_running: self.flags.starts_running(),
                starts_loudly: self.flags.starts_loudly(),
            },
            accumulator: self.accumulator,
            events: self.events,
        }
    }
}
