//! Shift timer.

/// Accumulates elapsed time for one shift.
///
/// Time only moves through [`advance`](ShiftClock::advance); the host's
/// frame loop or timer feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftClock {
    duration_ms: u64,
    elapsed_ms: u64,
}

impl ShiftClock {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_ms)
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Fraction of the shift used, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
    }

    /// Adds `ms` of elapsed time. Returns `true` only on the call that
    /// crosses the deadline.
    pub fn advance(&mut self, ms: u64) -> bool {
        let was_expired = self.is_expired();
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
        !was_expired && self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_reports_expiry_once() {
        let mut clock = ShiftClock::new(1_000);
        assert!(!clock.advance(400));
        assert_eq!(clock.remaining_ms(), 600);
        assert!(clock.advance(600));
        assert!(clock.is_expired());
        assert!(!clock.advance(100));
        assert_eq!(clock.remaining_ms(), 0);
        assert_eq!(clock.elapsed_ms(), 1_100);
    }

    #[test]
    fn test_progress() {
        let mut clock = ShiftClock::new(200);
        assert_eq!(clock.progress(), 0.0);
        clock.advance(50);
        assert!((clock.progress() - 0.25).abs() < 1e-12);
        clock.advance(500);
        assert_eq!(clock.progress(), 1.0);
    }
}
