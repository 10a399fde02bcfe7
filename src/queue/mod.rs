//! Shift queue builder.
//!
//! Produces the ordered list of mail presented during one shift:
//!
//! 1. Start with every guaranteed item, in authored order.
//! 2. Draw `max(0, total - guaranteed)` items from the weighted pool, with
//!    replacement.
//! 3. Arrange according to [`Arrangement`]; the default appends the draws
//!    and Fisher–Yates shuffles the whole queue.
//!
//! All randomness comes from the caller's `Rng`; seed it with
//! [`create_rng`](u_numflow::random::create_rng) for reproducible queues.

mod builder;
mod config;

pub use builder::{draw_weighted, QueueBuilder, ShiftQueue};
pub use config::{Arrangement, DayConfig, PoolEntry};
