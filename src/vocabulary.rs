//! Fixed vocabulary understood in spoken timer requests.
//!
//! Every recognized word lives in one of the closed enums below. Matching is
//! case-insensitive; anything outside the vocabulary is left to the caller to
//! skip.

use std::fmt;

/// "and a half", following a number.
pub const AND_A_HALF: [&str; 3] = ["and", "a", "half"];

/// "half an hour", standing on its own.
pub const HALF_AN_HOUR: [&str; 3] = ["half", "an", "hour"];

/// Filler that speech recognition tends to leave at the start of the payload.
pub const LEADING_FILLER: &str = "for";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub fn recognize(token: &str) -> Option<TimeUnit> {
        match token.to_ascii_lowercase().as_str() {
            "hour" | "hours" => Some(TimeUnit::Hour),
            "minute" | "minutes" => Some(TimeUnit::Minute),
            "second" | "seconds" => Some(TimeUnit::Second),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeUnit::Hour => write!(f, "hours"),
            TimeUnit::Minute => write!(f, "minutes"),
            TimeUnit::Second => write!(f, "seconds"),
        }
    }
}

/// Words that change how the timer starts, wherever they appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    Paused,
    Quietly,
}

impl Modifier {
    pub fn recognize(token: &str) -> Option<Modifier> {
        match token.to_ascii_lowercase().as_str() {
            "paused" | "pause" => Some(Modifier::Paused),
            "quietly" => Some(Modifier::Quietly),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Modifier::Paused => write!(f, "starts paused"),
            Modifier::Quietly => write!(f, "starts quietly"),
        }
    }
}

/// A single number word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberWord {
    /// "zero" to "nineteen".
    Units(u32),
    /// "twenty" to "ninety".
    Tens(u32),
    /// "a" and "an", as in "an hour".
    AliasOfOne,
    /// "1&a", which the recognizer sometimes produces for "one and a half".
    OneAndAHalf,
}

impl NumberWord {
    pub fn recognize(token: &str) -> Option<NumberWord> {
        let word = match token.to_ascii_lowercase().as_str() {
            "zero" => NumberWord::Units(0),
            "one" => NumberWord::Units(1),
            "two" => NumberWord::Units(2),
            "three" => NumberWord::Units(3),
            "four" => NumberWord::Units(4),
            "five" => NumberWord::Units(5),
            "six" => NumberWord::Units(6),
            "seven" => NumberWord::Units(7),
            "eight" => NumberWord::Units(8),
            "nine" => NumberWord::Units(9),
            "ten" => NumberWord::Units(10),
            "eleven" => NumberWord::Units(11),
            "twelve" => NumberWord::Units(12),
            "thirteen" => NumberWord::Units(13),
            "fourteen" => NumberWord::Units(14),
            "fifteen" => NumberWord::Units(15),
            "sixteen" => NumberWord::Units(16),
            "seventeen" => NumberWord::Units(17),
            "eighteen" => NumberWord::Units(18),
            "nineteen" => NumberWord::Units(19),
            "twenty" => NumberWord::Tens(20),
            "thirty" => NumberWord::Tens(30),
            "forty" => NumberWord::Tens(40),
            "fifty" => NumberWord::Tens(50),
            "sixty" => NumberWord::Tens(60),
            "seventy" => NumberWord::Tens(70),
            "eighty" => NumberWord::Tens(80),
            "ninety" => NumberWord::Tens(90),
            "a" | "an" => NumberWord::AliasOfOne,
            "1&a" => NumberWord::OneAndAHalf,
            _ => return None,
        };
        Some(word)
    }

    /// The digit that may follow a tens word ("sixty one", "twenty-five").
    fn as_trailing_digit(self) -> Option<u32> {
        match self {
            NumberWord::Units(n) if (1..=9).contains(&n) => Some(n),
            _ => None,
        }
    }
}

/// Which rule turned a token into a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberSource {
    Digits,
    Word,
    Alias,
    OneAndAHalf,
}

impl fmt::Display for NumberSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumberSource::Digits => write!(f, "digits"),
            NumberSource::Word => write!(f, "number word"),
            NumberSource::Alias => write!(f, "alias of one"),
            NumberSource::OneAndAHalf => write!(f, "one and a half"),
        }
    }
}

/// A number read at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberMatch {
    pub value: u32,
    /// Set when the token itself carries a half ("1&a").
    pub half: bool,
    /// How many tokens the number spans.
    pub consumed: usize,
    pub source: NumberSource,
}

impl NumberMatch {
    fn single(value: u32, source: NumberSource) -> NumberMatch {
        NumberMatch {
            value,
            half: false,
            consumed: 1,
            source,
        }
    }
}

/// Reads a number from `token`, looking at `next` only to complete a
/// compound such as "sixty one".
pub fn resolve_number(token: &str, next: Option<&str>) -> Option<NumberMatch> {
    if let Ok(value) = token.parse::<u32>() {
        return Some(NumberMatch::single(value, NumberSource::Digits));
    }

    if let Some(value) = resolve_hyphenated(token) {
        return Some(NumberMatch::single(value, NumberSource::Word));
    }

    match NumberWord::recognize(token)? {
        NumberWord::Units(value) => Some(NumberMatch::single(value, NumberSource::Word)),
        NumberWord::Tens(tens) => {
            let digit = next
                .and_then(NumberWord::recognize)
                .and_then(NumberWord::as_trailing_digit);
            match digit {
                Some(digit) => Some(NumberMatch {
                    value: tens + digit,
                    half: false,
                    consumed: 2,
                    source: NumberSource::Word,
                }),
                None => Some(NumberMatch::single(tens, NumberSource::Word)),
            }
        }
        NumberWord::AliasOfOne => Some(NumberMatch::single(1, NumberSource::Alias)),
        NumberWord::OneAndAHalf => Some(NumberMatch {
            value: 1,
            half: true,
            consumed: 1,
            source: NumberSource::OneAndAHalf,
        }),
    }
}

/// "twenty-five" and friends.
fn resolve_hyphenated(token: &str) -> Option<u32> {
    let mut parts = token.splitn(2, '-');
    let tens = parts.next()?;
    let digit = parts.next()?;

    match (NumberWord::recognize(tens)?, NumberWord::recognize(digit)?) {
        (NumberWord::Tens(tens), d) => d.as_trailing_digit().map(|d| tens + d),
        _ => None,
    }
}
