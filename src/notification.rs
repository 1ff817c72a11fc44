use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration as StdDuration;

use chrono::{Local, OutOfRangeError};
use notify_rust::Notification;
use tracing::{info, warn};

use crate::domain::{TimerCommand, Timestamp};
use crate::pretty_print::format_duration;

/// Waits for the timer to go off, then tells the user.
///
/// Sending on (or dropping the sender of) `rx` cancels the wait without any
/// notification. Quiet timers are only logged when they go off.
pub fn spawn_notification_thread(
    end: Timestamp,
    command: TimerCommand,
    rx: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let time_to_notification = unwrap_dur((end - Local::now()).to_std());
        match rx.recv_timeout(time_to_notification) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                info!("Timer wait cancelled");
            }
            Err(RecvTimeoutError::Timeout) => {
                if command.starts_loudly {
                    if let Err(e) = notify(&command) {
                        warn!("Could not show the notification: {}", e);
                    }
                } else {
                    info!("Timer finished quietly");
                }
            }
        }
    })
}

fn notify(command: &TimerCommand) -> Result<(), notify_rust::error::Error> {
    let mut n = Notification::new();
    n.summary("Timer: Time is up!").timeout(10000);
    n.body(&format!(
        "Your {} timer is done.",
        format_duration(command.duration_millis)
    ));
    n.show()?;

    Ok(())
}

/// Already-passed end times mean no wait at all.
fn unwrap_dur(r: Result<StdDuration, OutOfRangeError>) -> StdDuration {
    match r {
        Ok(rr) => rr,
        Err(_) => StdDuration::new(0, 0),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::time::Instant;

    use chrono::{Duration, Local};

    use crate::domain::TimerCommand;
    use crate::notification::{spawn_notification_thread, unwrap_dur};

    fn command() -> TimerCommand {
        TimerCommand {
            duration_millis: 3_600_000,
            starts_running: true,
            starts_loudly: true,
        }
    }

    #[test]
    fn negative_wait_is_zero() {
        assert_eq!(unwrap_dur(Duration::seconds(-5).to_std()).as_millis(), 0);
        assert_eq!(unwrap_dur(Duration::seconds(5).to_std()).as_secs(), 5);
    }

    #[test]
    fn cancelling_stops_a_long_wait() {
        let (tx, rx) = channel();
        let started = Instant::now();
        let handle = spawn_notification_thread(Local::now() + Duration::hours(1), command(), rx);

        tx.send(()).unwrap();
        handle.join().unwrap();
        assert!(started.elapsed().as_secs() < 60);
    }

    #[test]
    fn dropping_the_sender_stops_the_wait() {
        let (tx, rx) = channel::<()>();
        let handle = spawn_notification_thread(Local::now() + Duration::hours(1), command(), rx);

        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn quiet_expired_timer_finishes_without_notifying() {
        let (_tx, rx) = channel::<()>();
        let mut cmd = command();
        cmd.starts_loudly = false;
        let handle = spawn_notification_thread(Local::now() - Duration::seconds(1), cmd, rx);
        handle.join().unwrap();
    }
}
