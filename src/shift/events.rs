//! Shift events and the observers that consume them.

use crate::mail::MailId;
use crate::workflow::Outcome;

/// Why a shift ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftEndReason {
    /// Every queued item was resolved.
    QueueExhausted,
    /// The shift clock ran out.
    TimeExpired,
}

/// Tallies for a shift, in progress or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftSummary {
    pub day_number: u32,
    /// Queue length.
    pub total_items: usize,
    /// Items handed to the workflow so far.
    pub released: usize,
    pub resolved: usize,
    pub correct: usize,
    /// Live inspections dropped at shift end.
    pub voided: usize,
    pub elapsed_ms: u64,
    /// `None` while the shift is running.
    pub end_reason: Option<ShiftEndReason>,
}

impl ShiftSummary {
    pub fn incorrect(&self) -> usize {
        self.resolved - self.correct
    }

    /// Share of resolved items handled correctly; `0.0` before any resolution.
    pub fn accuracy(&self) -> f64 {
        if self.resolved == 0 {
            0.0
        } else {
            self.correct as f64 / self.resolved as f64
        }
    }
}

/// Everything the controller announces to the surrounding game.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftEvent {
    /// A queue item was presented. `position` is its zero-based queue index.
    ItemReleased { mail_id: MailId, position: usize },
    /// An item was resolved. Emitted exactly once per item.
    Outcome(Outcome),
    /// The shift ended with an inspection still open; no outcome was produced.
    InspectionVoided { mail_id: MailId },
    /// The shift is over. Always the last event.
    ShiftComplete(ShiftSummary),
}

/// Receives shift events.
///
/// This is the single outcome channel: HUD, scoring and day-end panels
/// subscribe by implementing it and are handed to the controller at
/// construction.
pub trait ShiftObserver {
    fn on_event(&mut self, event: &ShiftEvent);
}

impl ShiftObserver for () {
    fn on_event(&mut self, _event: &ShiftEvent) {}
}

impl<A: ShiftObserver, B: ShiftObserver> ShiftObserver for (A, B) {
    fn on_event(&mut self, event: &ShiftEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

impl<O: ShiftObserver + ?Sized> ShiftObserver for &mut O {
    fn on_event(&mut self, event: &ShiftEvent) {
        (**self).on_event(event);
    }
}

impl<O: ShiftObserver + ?Sized> ShiftObserver for Box<O> {
    fn on_event(&mut self, event: &ShiftEvent) {
        (**self).on_event(event);
    }
}

/// Records every event in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ShiftEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ShiftEvent] {
        &self.events
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.events.iter().filter_map(|e| match e {
            ShiftEvent::Outcome(outcome) => Some(outcome),
            _ => None,
        })
    }

    /// The completion summary, once the shift has ended.
    pub fn summary(&self) -> Option<&ShiftSummary> {
        self.events.iter().rev().find_map(|e| match e {
            ShiftEvent::ShiftComplete(summary) => Some(summary),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ShiftObserver for EventLog {
    fn on_event(&mut self, event: &ShiftEvent) {
        self.events.push(event.clone());
    }
}

/// Running score.
///
/// Correct resolutions earn points; mistakes are counted and cost
/// `penalty_per_mistake`, which is zero unless configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoreboard {
    pub points_per_correct: u32,
    pub penalty_per_mistake: u32,
    score: i64,
    correct: u32,
    mistakes: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            points_per_correct: 100,
            penalty_per_mistake: 0,
            score: 0,
            correct: 0,
            mistakes: 0,
        }
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points_per_correct(mut self, points: u32) -> Self {
        self.points_per_correct = points;
        self
    }

    pub fn with_penalty_per_mistake(mut self, penalty: u32) -> Self {
        self.penalty_per_mistake = penalty;
        self
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }
}

impl ShiftObserver for Scoreboard {
    fn on_event(&mut self, event: &ShiftEvent) {
        if let ShiftEvent::Outcome(outcome) = event {
            if outcome.is_correct {
                self.correct += 1;
                self.score += i64::from(self.points_per_correct);
            } else {
                self.mistakes += 1;
                self.score -= i64::from(self.penalty_per_mistake);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{Action, MailRecord};
    use std::sync::Arc;

    fn outcome(is_correct: bool) -> ShiftEvent {
        let record = Arc::new(MailRecord::letter("L"));
        ShiftEvent::Outcome(Outcome {
            mail_id: record.id.clone(),
            record,
            chosen_action: Action::Accept,
            is_correct,
            report: None,
        })
    }

    #[test]
    fn test_scoreboard_defaults() {
        let mut board = Scoreboard::new();
        board.on_event(&outcome(true));
        board.on_event(&outcome(false));
        board.on_event(&outcome(true));
        assert_eq!(board.score(), 200);
        assert_eq!(board.correct(), 2);
        assert_eq!(board.mistakes(), 1);
    }

    #[test]
    fn test_scoreboard_penalty() {
        let mut board = Scoreboard::new()
            .with_points_per_correct(10)
            .with_penalty_per_mistake(25);
        board.on_event(&outcome(true));
        board.on_event(&outcome(false));
        assert_eq!(board.score(), -15);
    }

    #[test]
    fn test_scoreboard_ignores_other_events() {
        let mut board = Scoreboard::new();
        board.on_event(&ShiftEvent::InspectionVoided {
            mail_id: MailId::new("L"),
        });
        assert_eq!(board, Scoreboard::new());
    }

    #[test]
    fn test_tuple_observer_fans_out() {
        let mut pair = (EventLog::new(), Scoreboard::new());
        pair.on_event(&outcome(true));
        assert_eq!(pair.0.outcomes().count(), 1);
        assert_eq!(pair.1.score(), 100);
    }

    #[test]
    fn test_summary_accuracy() {
        let summary = ShiftSummary {
            day_number: 1,
            total_items: 4,
            released: 4,
            resolved: 4,
            correct: 3,
            voided: 0,
            elapsed_ms: 0,
            end_reason: Some(ShiftEndReason::QueueExhausted),
        };
        assert_eq!(summary.incorrect(), 1);
        assert!((summary.accuracy() - 0.75).abs() < 1e-12);
    }
}
