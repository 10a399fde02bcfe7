//! Decision-and-flow core for a shift-based mail sorting game.
//!
//! Covers the parts of the game with real rules behind them:
//!
//! - **Mail**: authored mail records and their attribute enumerations.
//! - **Rules**: classifies the objectively correct action for a record
//!   (accept, reply, reject, report) and audits authored content against it.
//! - **Queue**: builds a shift's ordered queue from guaranteed items and
//!   weighted random draws.
//! - **Workflow**: the per-item state machine from presentation through
//!   inspection to a scored outcome, including the report sub-flow.
//! - **Shift**: drains the queue one resolved item at a time and ends the
//!   shift on exhaustion or timeout.
//!
//! # Architecture
//!
//! Rendering, pointer handling and UI are left to the host. The host feeds
//! discrete inputs ([`workflow::WorkflowInput`], clock ticks) and receives
//! [`shift::ShiftEvent`]s through a [`shift::ShiftObserver`]. Nothing here
//! is global; every collaborator is passed in explicitly.

pub mod error;
pub mod mail;
pub mod queue;
pub mod rules;
pub mod shift;
pub mod workflow;

pub use error::{ConfigError, Error, Result, WorkflowError};
