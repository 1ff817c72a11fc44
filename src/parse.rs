use std::fmt;

use crate::domain::{Accumulator, TimerCommand};
use crate::parse_state::ParseState;
use crate::vocabulary::{
    resolve_number, Modifier, NumberMatch, NumberSource, TimeUnit, AND_A_HALF, HALF_AN_HOUR,
    LEADING_FILLER,
};

/// Largest number a unit accepts. Anything bigger is dropped.
const MAX_CANDIDATE: u32 = 60;


/// What happened at one position of the phrase.
///
/// Purely diagnostic: the same command comes out whether or not anyone
/// looks at these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseEvent {
    Number {
        position: usize,
        value: u32,
        source: NumberSource,
    },
    TrailingHalf {
        position: usize,
    },
    UnitApplied {
        position: usize,
        unit: TimeUnit,
        value: u32,
        half: bool,
    },
    /// `position` is where the unit was expected, possibly one past the end.
    UnitMissing {
        position: usize,
        value: u32,
    },
    OutOfRange {
        position: usize,
        value: u32,
    },
    HalfAnHour {
        position: usize,
    },
    Modifier {
        position: usize,
        modifier: Modifier,
    },
    LeadingFiller {
        position: usize,
    },
    Skipped {
        position: usize,
        token: String,
    },
}

impl ParseEvent {
    pub fn position(&self) -> usize {
        match self {
            ParseEvent::Number { position, .. }
            | ParseEvent::TrailingHalf { position }
            | ParseEvent::UnitApplied { position, .. }
            | ParseEvent::UnitMissing { position, .. }
            | ParseEvent::OutOfRange { position, .. }
            | ParseEvent::HalfAnHour { position }
            | ParseEvent::Modifier { position, .. }
            | ParseEvent::LeadingFiller { position }
            | ParseEvent::Skipped { position, .. } => *position,
        }
    }
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] ", self.position())?;
        match self {
            ParseEvent::Number { value, source, .. } => write!(f, "read {} ({})", value, source),
            ParseEvent::TrailingHalf { .. } => write!(f, "and a half"),
            ParseEvent::UnitApplied {
                unit, value, half, ..
            } => {
                write!(f, "{} {}", value, unit)?;
                if *half {
                    write!(f, " and a half")?;
                }
                Ok(())
            }
            ParseEvent::UnitMissing { value, .. } => write!(f, "dropped {}: no unit follows", value),
            ParseEvent::OutOfRange { value, .. } => {
                write!(f, "dropped {}: more than {}", value, MAX_CANDIDATE)
            }
            ParseEvent::HalfAnHour { .. } => write!(f, "half an hour"),
            ParseEvent::Modifier { modifier, .. } => write!(f, "{}", modifier),
            ParseEvent::LeadingFiller { .. } => write!(f, "ignored leading '{}'", LEADING_FILLER),
            ParseEvent::Skipped { token, .. } => write!(f, "skipped '{}'", token),
        }
    }
}

/// A command together with how it was read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutcome {
    pub command: TimerCommand,
    pub accumulator: Accumulator,
    pub events: Vec<ParseEvent>,
}

pub fn tokenize(phrase: &str) -> Vec<&str> {
    phrase.split_whitespace().collect()
}

/// Turns a transcribed phrase into a timer command.
///
/// Never fails: words outside the vocabulary are skipped, and a phrase with
/// nothing recognizable gives a zero-length timer with the default flags.
pub fn parse_phrase(phrase: &str) -> TimerCommand {
    explain_phrase(phrase).command
}

/// Same as [`parse_phrase`], keeping the trail of rules that fired.
pub fn explain_phrase(phrase: &str) -> ParseOutcome {
    let mut state = ParseState::new(tokenize(phrase));

    while let Some(token) = state.current() {
        match resolve_number(token, state.peek(1)) {
            Some(number) => read_quantity(&mut state, number),
            None => read_word(&mut state, token),
        }
    }

    state.into_outcome()
}

/// A number, then maybe "and a half", then hopefully a unit.
fn read_quantity(state: &mut ParseState, number: NumberMatch) {
    let position = state.position();
    state.record(ParseEvent::Number {
        position,
        value: number.value,
        source: number.source,
    });
    state.advance(number.consumed);

    if number.value > MAX_CANDIDATE {
        state.record(ParseEvent::OutOfRange {
            position,
            value: number.value,
        });
        return;
    }

    if number.half {
        state.owe_half();
    }
    read_trailing_half(state);
    read_unit(state, number.value);
}

fn read_trailing_half(state: &mut ParseState) {
    if state.matches_ahead(0, &AND_A_HALF) {
        let position = state.position();
        state.owe_half();
        state.advance(AND_A_HALF.len());
        state.record(ParseEvent::TrailingHalf { position });
    }
}

/// Leaves the cursor on the token if it is not a unit, so it gets another
/// chance as a word of its own.
fn read_unit(state: &mut ParseState, value: u32) {
    let position = state.position();
    match state.current().and_then(TimeUnit::recognize) {
        Some(unit) => {
            let half = state.apply_unit(unit, value);
            state.advance(1);
            state.record(ParseEvent::UnitApplied {
                position,
                unit,
                value,
                half,
            });
        }
        None => {
            state.discard_pending_half();
            state.record(ParseEvent::UnitMissing { position, value });
        }
    }
}

fn read_word(state: &mut ParseState, token: &str) {
    let position = state.position();

    if state.matches_ahead(0, &HALF_AN_HOUR) {
        state.set_half_an_hour();
        state.advance(HALF_AN_HOUR.len());
        state.record(ParseEvent::HalfAnHour { position });
        return;
    }

    let event = match Modifier::recognize(token) {
        Some(modifier) => {
            let flags = state.flags_mut();
            match modifier {
                Modifier::Paused => flags.start_paused(),
                Modifier::Quietly => flags.start_quietly(),
            }
            ParseEvent::Modifier { position, modifier }
        }
        None if position == 0 && token == LEADING_FILLER => {
            ParseEvent::LeadingFiller { position }
        }
        None => ParseEvent::Skipped {
            position,
            token: token.to_string(),
        },
    };
    state.advance(1);
    state.record(event);
}
