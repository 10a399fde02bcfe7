//! Shift queue construction.
//!
//! [`QueueBuilder`] turns a [`DayConfig`] into a [`ShiftQueue`]:
//! guaranteed items → weighted draws → arrangement.

use super::config::{Arrangement, DayConfig, PoolEntry};
use crate::error::ConfigError;
use crate::mail::MailRecord;
use u_numflow::random::shuffle;
use rand::Rng;
use std::sync::Arc;
use tracing::info;

/// The ordered mail for one shift.
///
/// The order is fixed once built. Items are handed out front to back
/// exactly once through [`next_item`](ShiftQueue::next_item).
#[derive(Debug, Clone, Default)]
pub struct ShiftQueue {
    items: Vec<Arc<MailRecord>>,
    cursor: usize,
}

impl ShiftQueue {
    /// Wraps an already-ordered list of records.
    pub fn from_records(items: Vec<Arc<MailRecord>>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Total number of items, delivered or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The full order.
    pub fn as_slice(&self) -> &[Arc<MailRecord>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<MailRecord>> {
        self.items.iter()
    }

    /// Number of items already handed out.
    pub fn delivered(&self) -> usize {
        self.cursor
    }

    /// Number of items not yet handed out.
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    /// Hands out the next item, or `None` once every item has been delivered.
    pub fn next_item(&mut self) -> Option<Arc<MailRecord>> {
        let item = self.items.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(item)
    }
}

/// Picks one pool entry with probability proportional to its weight.
///
/// Builds the cumulative weight table on the fly, draws a uniform integer in
/// `[0, total_weight)`, and returns the first entry whose cumulative weight
/// exceeds the draw. Returns `None` for an empty pool or zero total weight.
pub fn draw_weighted<'a, R: Rng>(pool: &'a [PoolEntry], rng: &mut R) -> Option<&'a PoolEntry> {
    let total: u64 = pool.iter().map(|e| u64::from(e.weight)).sum();
    if total == 0 {
        return None;
    }

    let roll = rng.random_range(0..total);
    let mut cumulative = 0u64;
    for entry in pool {
        cumulative += u64::from(entry.weight);
        if roll < cumulative {
            return Some(entry);
        }
    }

    pool.first() // unreachable while roll < total
}

/// Builds shift queues.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_mailroom::mail::MailRecord;
/// use u_mailroom::queue::{DayConfig, QueueBuilder};
/// use u_numflow::random::create_rng;
///
/// let config = DayConfig::default()
///     .with_total_mail_count(3)
///     .with_guaranteed(Arc::new(MailRecord::letter("A")))
///     .with_pool_entry(Arc::new(MailRecord::letter("B")), 1)
///     .with_pool_entry(Arc::new(MailRecord::letter("C")), 1);
///
/// let queue = QueueBuilder::build(&config, &mut create_rng(42)).unwrap();
/// assert_eq!(queue.len(), 3);
/// ```
pub struct QueueBuilder;

impl QueueBuilder {
    /// Validates `config` and builds its queue.
    ///
    /// The result has `guaranteed_count + remaining_draws` items. Every
    /// guaranteed item appears once per authored occurrence. Output is fully
    /// determined by the state of `rng`.
    pub fn build<R: Rng>(config: &DayConfig, rng: &mut R) -> Result<ShiftQueue, ConfigError> {
        config.validate()?;

        let guaranteed = &config.guaranteed_mail;
        let remaining = config.remaining_draws();

        let mut drawn: Vec<Arc<MailRecord>> = Vec::with_capacity(remaining);
        for _ in 0..remaining {
            let entry = draw_weighted(&config.random_pool, rng).ok_or(ConfigError::EmptyPool {
                remaining: remaining - drawn.len(),
            })?;
            drawn.push(Arc::clone(&entry.mail));
        }

        let items = match config.arrangement {
            Arrangement::FullShuffle => {
                let mut items: Vec<Arc<MailRecord>> = guaranteed.clone();
                items.extend(drawn);
                shuffle(&mut items, rng);
                items
            }
            Arrangement::GuaranteedFirst => {
                let mut items: Vec<Arc<MailRecord>> = guaranteed.clone();
                items.extend(drawn);
                shuffle(&mut items[guaranteed.len()..], rng);
                items
            }
            Arrangement::Interleave { stride } => {
                shuffle(&mut drawn, rng);
                interleave(guaranteed, drawn, stride)
            }
        };

        info!(
            day = config.day_number,
            items = items.len(),
            guaranteed = guaranteed.len(),
            drawn = remaining,
            "shift queue built"
        );

        Ok(ShiftQueue::from_records(items))
    }
}

/// Injects one guaranteed item before every `stride`-th draw, then appends
/// whatever guaranteed items are left.
fn interleave(
    guaranteed: &[Arc<MailRecord>],
    drawn: Vec<Arc<MailRecord>>,
    stride: usize,
) -> Vec<Arc<MailRecord>> {
    let stride = stride.max(1);
    let mut items = Vec::with_capacity(guaranteed.len() + drawn.len());
    let mut story = guaranteed.iter();

    for (i, mail) in drawn.into_iter().enumerate() {
        if i % stride == 0 {
            if let Some(g) = story.next() {
                items.push(Arc::clone(g));
            }
        }
        items.push(mail);
    }
    items.extend(story.cloned());
    items
}
