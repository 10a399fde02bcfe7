//! Rule evaluation engine.
//!
//! Maps a [`MailRecord`](crate::mail::MailRecord)'s attributes to the
//! objectively correct [`Action`](crate::mail::Action):
//!
//! - **Report tier**: contraband, a suspicious substance, or a written
//!   offence always means `Report`, whatever else is wrong.
//! - **Tally tier**: otherwise each minor violation (wrong addressing, wrong
//!   signature, more than [`MAX_SENTENCES`] sentences) counts once;
//!   0 → `Accept`, 1 → `Reply`, 2+ → `Reject`.
//!
//! Scoring always goes through [`is_player_choice_correct`], which compares
//! against the computed action. The authored `ideal_action` is only checked
//! by [`validate_authoring`] and the [`AuthoringAudit`].

mod audit;
mod engine;

pub use audit::{AuthoringAudit, AuthoringMismatch, AuthoringReport};
pub use engine::{
    correct_action, is_player_choice_correct, minor_violation_count, validate_authoring,
    violations, RuleViolation, MAX_SENTENCES,
};
