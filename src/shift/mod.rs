//! Shift progression.
//!
//! [`ShiftController`] owns the day's queue, the inspection workflow and
//! the shift clock, and reports everything that happens through a
//! [`ShiftObserver`].

mod clock;
mod controller;
mod events;

pub use clock::ShiftClock;
pub use controller::ShiftController;
pub use events::{EventLog, Scoreboard, ShiftEndReason, ShiftEvent, ShiftObserver, ShiftSummary};
