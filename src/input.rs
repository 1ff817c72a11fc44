use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::ArgMatches;
use tracing::warn;

use crate::domain::Timestamp;
use crate::regenerate::RegenerateInput;
use crate::tombstone::{millis_to_timestamp, read_tombstone};
use crate::TimerResult;

/// Which of the two paths the invocation asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerRequest {
    Phrase(String),
    Regenerate {
        end: Option<Timestamp>,
        loudly: Option<bool>,
    },
}

pub fn get_request_from_matches(matches: &ArgMatches) -> TimerResult<TimerRequest> {
    if matches.is_present("regenerate") {
        let end = match matches.value_of("end_millis") {
            Some(s) => {
                let millis = s
                    .parse::<i64>()
                    .with_context(|| format!("--end-millis expects epoch milliseconds, got '{}'", s))?;
                Some(millis_to_timestamp(millis)?)
            }
            None => None,
        };
        let loudly = matches.value_of("loudly").map(|s| s == "true");
        return Ok(TimerRequest::Regenerate { end, loudly });
    }

    let words: Vec<&str> = matches
        .values_of("phrase")
        .map(|v| v.collect())
        .unwrap_or_default();

    if words.is_empty() {
        Ok(TimerRequest::Phrase(read_stdin_phrase()?))
    } else {
        Ok(TimerRequest::Phrase(words.join(" ")))
    }
}

pub fn read_stdin_phrase() -> TimerResult<String> {
    let mut phrase = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut phrase)
        .context("Error while reading the phrase from stdin.")?;

    if phrase.trim().is_empty() {
        anyhow::bail!("No phrase given, either as arguments or on stdin.");
    }
    Ok(phrase)
}

/// Fills in whatever the command line left out from the tombstone.
///
/// The tombstone is only required when there is no explicit end time.
pub fn resolve_regenerate_input(
    end: Option<Timestamp>,
    loudly: Option<bool>,
    tombstone_path: Option<&Path>,
    now: Timestamp,
) -> TimerResult<RegenerateInput> {
    let tombstone = match tombstone_path {
        Some(path) if end.is_none() => Some(read_tombstone(path)?),
        Some(path) if loudly.is_none() => read_tombstone(path)
            .map_err(|e| warn!("Ignoring tombstone: {:#}", e))
            .ok(),
        _ => None,
    };

    let end = match (end, &tombstone) {
        (Some(end), _) => end,
        (None, Some(tombstone)) => tombstone.end(now)?,
        (None, None) => {
            anyhow::bail!("Regenerating needs --end-millis or a tombstone path to read from.")
        }
    };

    Ok(RegenerateInput {
        end,
        requested_loudly: loudly
            .or_else(|| tombstone.map(|t| t.loudly))
            .unwrap_or(true),
        now,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    use crate::input::resolve_regenerate_input;
    use crate::parse::parse_phrase;
    use crate::regenerate::{regenerate, RevealPolicy};
    use crate::tombstone::{write_tombstone, Tombstone};

    fn tombstone(end_millis: i64, loudly: bool) -> Tombstone {
        Tombstone {
            duration_millis: 60_000,
            end_millis,
            loudly,
            running: true,
        }
    }

    #[test]
    fn explicit_values_win_over_the_tombstone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timer.toml");
        write_tombstone(&path, &tombstone(1_000, false)).unwrap();

        let end = Local.timestamp_millis_opt(9_000).unwrap();
        let now = Local.timestamp_millis_opt(2_000).unwrap();
        let input = resolve_regenerate_input(Some(end), Some(true), Some(&path), now).unwrap();
        assert_eq!(input.end, end);
        assert!(input.requested_loudly);
        assert_eq!(input.now, now);
    }

    #[test]
    fn tombstone_fills_in_the_gaps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timer.toml");
        write_tombstone(&path, &tombstone(1_000, false)).unwrap();

        let now = Local.timestamp_millis_opt(2_000).unwrap();
        let input = resolve_regenerate_input(None, None, Some(&path), now).unwrap();
        assert_eq!(input.end, Local.timestamp_millis_opt(1_000).unwrap());
        assert!(!input.requested_loudly);
    }

    #[test]
    fn unreadable_tombstone_is_fine_with_an_explicit_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let end = Local.timestamp_millis_opt(9_000).unwrap();
        let now = Local.timestamp_millis_opt(2_000).unwrap();
        let input = resolve_regenerate_input(Some(end), None, Some(&path), now).unwrap();
        assert!(input.requested_loudly);
    }

    #[test]
    fn no_end_anywhere_is_an_error() {
        let now = Local.timestamp_millis_opt(2_000).unwrap();
        assert!(resolve_regenerate_input(None, Some(true), None, now).is_err());

        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(resolve_regenerate_input(None, None, Some(&path), now).is_err());
    }

    #[test]
    fn paused_timer_resumes_with_its_full_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timer.toml");
        let written_at = Local.timestamp_millis_opt(0).unwrap();
        let cmd = parse_phrase("paused for one minute");
        write_tombstone(&path, &Tombstone::from_command(&cmd, written_at)).unwrap();

        let now = Local.timestamp_millis_opt(120_000).unwrap();
        let input = resolve_regenerate_input(None, None, Some(&path), now).unwrap();
        let resumed = regenerate(&input, RevealPolicy::Pending);
        assert_eq!(resumed.duration_millis, 60_000);
        assert!(resumed.starts_running);
        assert!(!resumed.is_expired());
    }
}
