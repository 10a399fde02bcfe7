//! Day configuration.
//!
//! [`DayConfig`] holds everything needed to build one shift's queue: the
//! guaranteed story mail, the weighted filler pool, and scalar shift
//! parameters.

use crate::error::ConfigError;
use crate::mail::{MailId, MailRecord};
use crate::rules::{AuthoringAudit, AuthoringReport};
use std::collections::HashSet;
use std::sync::Arc;

/// A record in the random pool together with its relative draw weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolEntry {
    pub mail: Arc<MailRecord>,
    /// Relative draw probability. Must be at least 1.
    pub weight: u32,
}

impl PoolEntry {
    pub fn new(mail: Arc<MailRecord>, weight: u32) -> Self {
        Self { mail, weight }
    }
}

/// How guaranteed items and random draws are arranged in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arrangement {
    /// Append all draws after the guaranteed items, then shuffle the whole
    /// queue. Guaranteed items may land anywhere.
    #[default]
    FullShuffle,

    /// Guaranteed items lead in authored order; only the draws behind them
    /// are shuffled.
    GuaranteedFirst,

    /// Shuffle the draws, then inject the next guaranteed item in front of
    /// every `stride`-th draw. Guaranteed items left over once the draws run
    /// out are appended in authored order.
    Interleave {
        /// Draw-slot spacing between guaranteed items. Must be at least 1.
        stride: usize,
    },
}

/// Configuration for one day's shift.
///
/// # Defaults
///
/// ```
/// use u_mailroom::queue::{Arrangement, DayConfig};
///
/// let config = DayConfig::default();
/// assert_eq!(config.day_number, 1);
/// assert_eq!(config.total_mail_count, 10);
/// assert_eq!(config.arrangement, Arrangement::FullShuffle);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::sync::Arc;
/// use u_mailroom::mail::MailRecord;
/// use u_mailroom::queue::DayConfig;
///
/// let story = Arc::new(MailRecord::letter("LTR_STORY"));
/// let filler = Arc::new(MailRecord::letter("LTR_FILL"));
/// let config = DayConfig::default()
///     .with_total_mail_count(3)
///     .with_guaranteed(story)
///     .with_pool_entry(filler, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DayConfig {
    /// 1-based day index.
    pub day_number: u32,

    /// Target number of items in the shift.
    ///
    /// If fewer than the guaranteed count, every guaranteed item is still
    /// queued and nothing is drawn.
    pub total_mail_count: usize,

    /// Cadence hint for the host's spawn animation, in milliseconds.
    pub spawn_interval_ms: u64,

    /// Length of the shift in milliseconds.
    pub shift_duration_ms: u64,

    /// Items that must appear, in authored order.
    pub guaranteed_mail: Vec<Arc<MailRecord>>,

    /// Weighted filler pool, drawn with replacement.
    pub random_pool: Vec<PoolEntry>,

    pub arrangement: Arrangement,
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            day_number: 1,
            total_mail_count: 10,
            spawn_interval_ms: 20_000,
            shift_duration_ms: 200_000,
            guaranteed_mail: Vec::new(),
            random_pool: Vec::new(),
            arrangement: Arrangement::default(),
        }
    }
}

impl DayConfig {
    pub fn with_day_number(mut self, day: u32) -> Self {
        self.day_number = day;
        self
    }

    pub fn with_total_mail_count(mut self, n: usize) -> Self {
        self.total_mail_count = n;
        self
    }

    pub fn with_spawn_interval_ms(mut self, ms: u64) -> Self {
        self.spawn_interval_ms = ms;
        self
    }

    pub fn with_shift_duration_ms(mut self, ms: u64) -> Self {
        self.shift_duration_ms = ms;
        self
    }

    /// Appends one guaranteed item.
    pub fn with_guaranteed(mut self, mail: Arc<MailRecord>) -> Self {
        self.guaranteed_mail.push(mail);
        self
    }

    /// Appends one pool entry.
    pub fn with_pool_entry(mut self, mail: Arc<MailRecord>, weight: u32) -> Self {
        self.random_pool.push(PoolEntry::new(mail, weight));
        self
    }

    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    pub fn guaranteed_count(&self) -> usize {
        self.guaranteed_mail.len()
    }

    /// Number of random draws needed: `max(0, total - guaranteed)`.
    pub fn remaining_draws(&self) -> usize {
        self.total_mail_count.saturating_sub(self.guaranteed_count())
    }

    /// Final queue length.
    pub fn queue_len(&self) -> usize {
        self.guaranteed_count() + self.remaining_draws()
    }

    /// Sum of all pool weights.
    pub fn total_weight(&self) -> u64 {
        self.random_pool.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Validates the configuration.
    ///
    /// Rejects an empty pool when draws are required, any zero weight,
    /// a zero shift duration, and an `Interleave` stride of 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(entry) = self.random_pool.iter().find(|e| e.weight == 0) {
            return Err(ConfigError::ZeroWeight {
                mail_id: entry.mail.id.clone(),
            });
        }
        let remaining = self.remaining_draws();
        if remaining > 0 && self.random_pool.is_empty() {
            return Err(ConfigError::EmptyPool { remaining });
        }
        if self.shift_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "shift_duration_ms",
                message: "must be positive".into(),
            });
        }
        if let Arrangement::Interleave { stride: 0 } = self.arrangement {
            return Err(ConfigError::InvalidValue {
                key: "arrangement.stride",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Audits every distinct record this day references.
    ///
    /// Records appearing in both lists, or several times, are checked once.
    pub fn audit(&self, audit: &AuthoringAudit) -> AuthoringReport {
        let mut seen: HashSet<MailId> = HashSet::new();
        let mut records: Vec<Arc<MailRecord>> = Vec::new();
        let all = self
            .guaranteed_mail
            .iter()
            .chain(self.random_pool.iter().map(|e| &e.mail));
        for mail in all {
            if seen.insert(mail.id.clone()) {
                records.push(Arc::clone(mail));
            }
        }
        audit.run(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::Action;

    fn rec(id: &str) -> Arc<MailRecord> {
        Arc::new(MailRecord::letter(id))
    }

    #[test]
    fn test_default_config() {
        let config = DayConfig::default();
        assert_eq!(config.day_number, 1);
        assert_eq!(config.total_mail_count, 10);
        assert_eq!(config.spawn_interval_ms, 20_000);
        assert_eq!(config.shift_duration_ms, 200_000);
        assert!(config.guaranteed_mail.is_empty());
        assert!(config.random_pool.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DayConfig::default()
            .with_day_number(2)
            .with_total_mail_count(6)
            .with_spawn_interval_ms(5_000)
            .with_shift_duration_ms(120_000)
            .with_guaranteed(rec("g1"))
            .with_pool_entry(rec("p1"), 3)
            .with_arrangement(Arrangement::GuaranteedFirst);

        assert_eq!(config.day_number, 2);
        assert_eq!(config.total_mail_count, 6);
        assert_eq!(config.spawn_interval_ms, 5_000);
        assert_eq!(config.shift_duration_ms, 120_000);
        assert_eq!(config.guaranteed_count(), 1);
        assert_eq!(config.total_weight(), 3);
        assert_eq!(config.arrangement, Arrangement::GuaranteedFirst);
    }

    #[test]
    fn test_remaining_draws_saturates() {
        let config = DayConfig::default()
            .with_total_mail_count(1)
            .with_guaranteed(rec("g1"))
            .with_guaranteed(rec("g2"));
        assert_eq!(config.remaining_draws(), 0);
        assert_eq!(config.queue_len(), 2);
        // No draws needed, so an empty pool is fine.
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_pool() {
        let config = DayConfig::default()
            .with_total_mail_count(3)
            .with_guaranteed(rec("g1"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPool { remaining: 2 })
        );
    }

    #[test]
    fn test_validate_zero_weight() {
        let config = DayConfig::default()
            .with_total_mail_count(2)
            .with_pool_entry(rec("ok"), 1)
            .with_pool_entry(rec("bad"), 0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroWeight {
                mail_id: MailId::new("bad")
            })
        );
    }

    #[test]
    fn test_validate_zero_duration() {
        let config = DayConfig::default()
            .with_total_mail_count(0)
            .with_shift_duration_ms(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                key: "shift_duration_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_zero_stride() {
        let config = DayConfig::default()
            .with_total_mail_count(0)
            .with_arrangement(Arrangement::Interleave { stride: 0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_audit_deduplicates() {
        let shared = Arc::new(MailRecord::letter("dup").with_ideal_action(Action::Reject));
        let config = DayConfig::default()
            .with_guaranteed(shared.clone())
            .with_pool_entry(shared, 2)
            .with_pool_entry(rec("clean"), 1);
        let report = config.audit(&AuthoringAudit::default());
        assert_eq!(report.checked, 2);
        assert_eq!(report.mismatches.len(), 1);
    }
}
