use std::fs;
use std::fs::create_dir_all;
use std::path::Path;

use anyhow::Context;
use chrono::{Duration, Local, TimeZone};
use serde_derive::{Deserialize, Serialize};

use crate::domain::{TimerCommand, Timestamp};
use crate::TimerResult;

/// The last requested timer, kept on disk so it can be picked up again after
/// a restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tombstone {
    pub duration_millis: i64,
    /// Epoch milliseconds.
    pub end_millis: i64,
    pub loudly: bool,
    pub running: bool,
}

impl Tombstone {
    pub fn from_command(command: &TimerCommand, now: Timestamp) -> Tombstone {
        Tombstone {
            duration_millis: command.duration_millis,
            end_millis: command.end_time(now).timestamp_millis(),
            loudly: command.starts_loudly,
            running: command.starts_running,
        }
    }

    /// When the timer goes off if it is resumed at `now`.
    ///
    /// A paused timer never started counting, so its stored end time means
    /// nothing and the whole duration is still left.
    pub fn end(&self, now: Timestamp) -> TimerResult<Timestamp> {
        if self.running {
            millis_to_timestamp(self.end_millis)
        } else {
            Ok(now + Duration::milliseconds(self.duration_millis))
        }
    }
}

pub fn millis_to_timestamp(millis: i64) -> TimerResult<Timestamp> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| anyhow::anyhow!("{} is not a valid epoch timestamp in milliseconds", millis))
}

pub fn write_tombstone(path: &Path, tombstone: &Tombstone) -> TimerResult<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Could not create the parents of {}", path.display()))?;
    }
    let content = toml::to_string(tombstone)?;
    fs::write(path, content)
        .with_context(|| format!("Could not write the tombstone to {}", path.display()))?;
    Ok(())
}

pub fn read_tombstone(path: &Path) -> TimerResult<Tombstone> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read the tombstone at {}", path.display()))?;
    let tombstone = toml::from_str(&content)
        .with_context(|| format!("Malformed tombstone at {}", path.display()))?;
    Ok(tombstone)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    use crate::domain::TimerCommand;
    use crate::tombstone::{millis_to_timestamp, read_tombstone, write_tombstone, Tombstone};

    #[test]
    fn from_command_computes_end() {
        let now = Local.timestamp_millis_opt(1_000_000).unwrap();
        let cmd = TimerCommand {
            duration_millis: 90_000,
            starts_running: false,
            starts_loudly: false,
        };
        assert_eq!(
            Tombstone::from_command(&cmd, now),
            Tombstone {
                duration_millis: 90_000,
                end_millis: 1_090_000,
                loudly: false,
                running: false,
            }
        );
    }

    #[test]
    fn written_tombstone_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("timer.toml");
        let tombstone = Tombstone {
            duration_millis: 120_000,
            end_millis: 1_600_000_120_000,
            loudly: true,
            running: true,
        };

        write_tombstone(&path, &tombstone).unwrap();
        assert_eq!(read_tombstone(&path).unwrap(), tombstone);
        assert_eq!(
            tombstone.end(Local::now()).unwrap(),
            Local.timestamp_millis_opt(1_600_000_120_000).unwrap()
        );
    }

    #[test]
    fn paused_tombstone_keeps_its_whole_duration() {
        let written_at = Local.timestamp_millis_opt(0).unwrap();
        let cmd = TimerCommand {
            duration_millis: 60_000,
            starts_running: false,
            starts_loudly: true,
        };
        let tombstone = Tombstone::from_command(&cmd, written_at);

        let resumed_at = Local.timestamp_millis_opt(120_000).unwrap();
        assert_eq!(
            tombstone.end(resumed_at).unwrap(),
            Local.timestamp_millis_opt(180_000).unwrap()
        );
    }

    #[test]
    fn hand_written_tombstone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timer.toml");
        std::fs::write(
            &path,
            "duration_millis = 5000\nend_millis = 0\nloudly = false\nrunning = true\n",
        )
        .unwrap();

        let tombstone = read_tombstone(&path).unwrap();
        assert_eq!(tombstone.end_millis, 0);
        assert!(!tombstone.loudly);
    }

    #[test]
    fn missing_or_malformed_tombstone_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timer.toml");
        assert!(read_tombstone(&path).is_err());

        std::fs::write(&path, "end_millis = \"soon\"\n").unwrap();
        let err = read_tombstone(&path).unwrap_err();
        assert!(err.to_string().contains("Malformed tombstone"));
    }

    #[test]
    fn out_of_range_millis_are_rejected() {
        assert!(millis_to_timestamp(i64::MAX).is_err());
        assert!(millis_to_timestamp(0).is_ok());
    }
}
