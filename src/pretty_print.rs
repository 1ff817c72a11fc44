use std::io::Result;
use std::io::Write;

use colored::control::{set_override, unset_override};
use colored::*;

use crate::domain::TimerCommand;
use crate::parse::ParseEvent;

/// Need this producer because the coloring won't be flexible otherwise
pub fn write_to(
    output_producer: impl Fn() -> Vec<String>,
    writer: &mut dyn Write,
    color: bool,
) -> Result<()> {
    if !color {
        set_override(false);
    }
    let output = output_producer();
    writeln!(writer, "{}", output.join("\n"))?;
    unset_override();
    Ok(())
}

/// Hours are not wrapped, so a long timer reads "25h00m00s".
pub fn format_duration(millis: i64) -> String {
    let total_seconds = millis.abs() / 1000;
    format!(
        "{:02}h{:02}m{:02}s",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60
    )
}

pub fn format_command(command: &TimerCommand) -> Vec<String> {
    let duration = format_duration(command.duration_millis);
    let headline = if command.duration_millis < 0 {
        format!("Timer: expired {} ago", duration.bold())
    } else {
        format!("Timer: {}", duration.bold())
    };

    let running = if command.starts_running {
        "running".green()
    } else {
        "paused".yellow()
    };
    let volume = if command.starts_loudly {
        "loudly".normal()
    } else {
        "quietly".dimmed()
    };

    vec![headline, format!("-> {}, {}", running, volume)]
}

pub fn format_events(events: &[ParseEvent]) -> Vec<String> {
    events
        .iter()
        .map(|e| format!("   {}", e.to_string().italic()))
        .collect()
}
