#[macro_use]
extern crate clap;

use std::io;
use std::sync::mpsc::channel;

use chrono::Local;
use clap::App;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{load_config_from_matches, Config};
use crate::domain::{TimerCommand, Timestamp};
use crate::input::{get_request_from_matches, resolve_regenerate_input, TimerRequest};
use crate::notification::spawn_notification_thread;
use crate::parse::{explain_phrase, parse_phrase, ParseEvent};
use crate::pretty_print::{format_command, format_events, write_to};
use crate::regenerate::regenerate;
use crate::tombstone::{write_tombstone, Tombstone};

mod config;
mod domain;
mod input;
mod notification;
mod parse;
mod parse_state;
mod pretty_print;
mod regenerate;
mod tombstone;
mod vocabulary;

type TimerResult<T> = anyhow::Result<T>;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs whichever path the request asks for. Only a fresh phrase updates the
/// tombstone.
fn resolve_command(
    request: TimerRequest,
    config: &Config,
    now: Timestamp,
) -> TimerResult<(TimerCommand, Vec<ParseEvent>)> {
    match request {
        TimerRequest::Phrase(phrase) => {
            info!("Parsing voice request '{}'", phrase.trim());
            let (command, events) = if config.explain {
                let outcome = explain_phrase(&phrase);
                debug!(accumulator = ?outcome.accumulator, "Phrase parsed");
                (outcome.command, outcome.events)
            } else {
                (parse_phrase(&phrase), vec![])
            };

            if let Some(path) = &config.tombstone_path {
                write_tombstone(path, &Tombstone::from_command(&command, now))?;
                debug!("Tombstone written to {}", path.display());
            }
            Ok((command, events))
        }
        TimerRequest::Regenerate { end, loudly } => {
            let input =
                resolve_regenerate_input(end, loudly, config.tombstone_path.as_deref(), now)?;
            info!("Regenerating timer ending at {}", input.end.to_rfc3339());
            Ok((regenerate(&input, config.reveal_on_resume), vec![]))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).version(crate_version!()).get_matches();

    let config = load_config_from_matches(&matches)?;
    init_logging(config.verbose);

    let request = get_request_from_matches(&matches)?;
    let now = Local::now();
    let (command, events) = resolve_command(request, &config, now)?;

    if !config.quiet {
        let mut stdout = io::stdout();
        write_to(|| format_command(&command), &mut stdout, true)?;
        if config.explain && !events.is_empty() {
            write_to(|| format_events(&events), &mut stdout, true)?;
        }
    }

    if config.notify {
        if command.starts_running {
            if command.is_expired() {
                info!("Timer already went off");
            }
            // dropping the sender would cancel the wait
            let (_tx, rx) = channel();
            let handle = spawn_notification_thread(command.end_time(now), command, rx);
            if handle.join().is_err() {
                anyhow::bail!("The notification thread panicked.");
            }
        } else {
            info!("Timer starts paused, nothing to wait for");
        }
    }

    Ok(())
}
