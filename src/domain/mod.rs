//! Domain model for the voice timer.
//!
//! This module contains the value types handed between the phrase parser,
//! the regenerate path and the hosting service, independent of parsing,
//! I/O, or presentation concerns.

pub mod command;

pub use command::{Accumulator, Flags, TimerCommand, Timestamp};
