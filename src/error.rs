//! Error types.
//!
//! Two families, matching how failures are handled:
//!
//! - [`ConfigError`]: detected before a shift starts; fail fast.
//! - [`WorkflowError`]: a caller drove the workflow out of order; the
//!   operation is rejected and no state changes.

use crate::mail::MailId;
use crate::workflow::Stage;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

/// Invalid day configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("random pool is empty but {remaining} draws are required")]
    EmptyPool { remaining: usize },

    #[error("pool entry {mail_id} has weight 0; weights must be at least 1")]
    ZeroWeight { mail_id: MailId },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// A workflow or shift operation called in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("cannot {operation} while {stage}")]
    InvalidTransition {
        stage: Stage,
        operation: &'static str,
    },

    #[error("no mail item is active")]
    NoActiveItem,

    #[error("current item {mail_id} has not been resolved")]
    ItemUnresolved { mail_id: MailId },

    #[error("{command} is not available in the {view}")]
    UnsupportedCommand {
        command: &'static str,
        view: &'static str,
    },

    #[error("{control} is disabled until its toggle is on")]
    ControlDisabled { control: &'static str },

    #[error("report is incomplete: {reason}")]
    IncompleteReport { reason: &'static str },

    #[error("shift is over")]
    ShiftOver,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
