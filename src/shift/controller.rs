//! Shift progression controller.

use super::clock::ShiftClock;
use super::events::{ShiftEndReason, ShiftEvent, ShiftObserver, ShiftSummary};
use crate::error::{Result, WorkflowError};
use crate::mail::MailRecord;
use crate::queue::{DayConfig, QueueBuilder, ShiftQueue};
use crate::workflow::{InspectionWorkflow, Outcome, WorkflowInput};
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

/// Drains a [`ShiftQueue`] through an [`InspectionWorkflow`], one item at a
/// time.
///
/// The next item is only released once the current one has produced its
/// outcome; an item closed without an action stays current. The shift ends
/// when the last item resolves or the clock runs out, whichever comes
/// first. An inspection still open when time runs out is voided.
///
/// Events go to the observer `O` in the order they happen. The controller
/// is driven through `&mut self` from one thread; share it only behind a
/// lock.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_mailroom::mail::{Action, MailRecord};
/// use u_mailroom::queue::DayConfig;
/// use u_mailroom::shift::{EventLog, ShiftController};
/// use u_mailroom::workflow::WorkflowInput;
/// use u_numflow::random::create_rng;
///
/// let config = DayConfig::default()
///     .with_total_mail_count(1)
///     .with_guaranteed(Arc::new(MailRecord::letter("LTR_001")));
/// let mut rng = create_rng(7);
/// let mut shift = ShiftController::start(&config, &mut rng, EventLog::new()).unwrap();
///
/// shift.release_next().unwrap();
/// for input in [
///     WorkflowInput::BeginDrag,
///     WorkflowInput::Drop { in_zone: true },
///     WorkflowInput::OpenInspection,
///     WorkflowInput::ChooseAction(Action::Accept),
/// ] {
///     shift.handle(input).unwrap();
/// }
/// assert!(shift.is_complete());
/// assert_eq!(shift.summary().correct, 1);
/// ```
#[derive(Debug)]
pub struct ShiftController<O: ShiftObserver = ()> {
    day_number: u32,
    queue: ShiftQueue,
    workflow: InspectionWorkflow,
    clock: ShiftClock,
    observer: O,
    resolved: usize,
    correct: usize,
    voided: usize,
    end_reason: Option<ShiftEndReason>,
}

impl<O: ShiftObserver> ShiftController<O> {
    /// Validates `config`, builds the day's queue and starts the shift.
    pub fn start<R: Rng>(config: &DayConfig, rng: &mut R, observer: O) -> Result<Self> {
        let queue = QueueBuilder::build(config, rng)?;
        let mut controller = Self::new(queue, config.shift_duration_ms, observer);
        controller.day_number = config.day_number;
        Ok(controller)
    }

    /// Starts a shift over a prebuilt queue.
    pub fn new(queue: ShiftQueue, shift_duration_ms: u64, observer: O) -> Self {
        Self {
            day_number: 1,
            queue,
            workflow: InspectionWorkflow::new(),
            clock: ShiftClock::new(shift_duration_ms),
            observer,
            resolved: 0,
            correct: 0,
            voided: 0,
            end_reason: None,
        }
    }

    pub fn queue(&self) -> &ShiftQueue {
        &self.queue
    }

    /// Current inspection state, for the view layer.
    pub fn workflow(&self) -> &InspectionWorkflow {
        &self.workflow
    }

    pub fn clock(&self) -> &ShiftClock {
        &self.clock
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// The item currently held by the workflow.
    pub fn current(&self) -> Option<&Arc<MailRecord>> {
        self.workflow.record()
    }

    pub fn is_complete(&self) -> bool {
        self.end_reason.is_some()
    }

    pub fn end_reason(&self) -> Option<ShiftEndReason> {
        self.end_reason
    }

    pub fn summary(&self) -> ShiftSummary {
        ShiftSummary {
            day_number: self.day_number,
            total_items: self.queue.len(),
            released: self.queue.delivered(),
            resolved: self.resolved,
            correct: self.correct,
            voided: self.voided,
            elapsed_ms: self.clock.elapsed_ms(),
            end_reason: self.end_reason,
        }
    }

    /// Presents the next queued item.
    ///
    /// Fails with `ItemUnresolved` while the current item has no outcome.
    /// On an empty queue the shift completes and `Ok(None)` is returned.
    pub fn release_next(&mut self) -> Result<Option<Arc<MailRecord>>, WorkflowError> {
        if self.is_complete() {
            return Err(WorkflowError::ShiftOver);
        }
        if let Some(current) = self.workflow.record() {
            let err = WorkflowError::ItemUnresolved {
                mail_id: current.id.clone(),
            };
            warn!(error = %err, "release rejected");
            return Err(err);
        }

        let Some(record) = self.queue.next_item() else {
            self.finish(ShiftEndReason::QueueExhausted);
            return Ok(None);
        };
        self.workflow.present(Arc::clone(&record))?;
        self.observer.on_event(&ShiftEvent::ItemReleased {
            mail_id: record.id.clone(),
            position: self.queue.delivered() - 1,
        });
        Ok(Some(record))
    }

    /// Feeds an input to the workflow.
    ///
    /// A resolution is announced as an outcome event; resolving the last
    /// queued item also completes the shift. Rejected inputs change nothing.
    pub fn handle(&mut self, input: WorkflowInput) -> Result<Option<Outcome>, WorkflowError> {
        if self.is_complete() {
            return Err(WorkflowError::ShiftOver);
        }
        let outcome = match self.workflow.apply(input) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, ?input, "workflow input rejected");
                return Err(err);
            }
        };

        if let Some(outcome) = &outcome {
            self.resolved += 1;
            if outcome.is_correct {
                self.correct += 1;
            }
            self.observer.on_event(&ShiftEvent::Outcome(outcome.clone()));
            if self.queue.is_exhausted() {
                self.finish(ShiftEndReason::QueueExhausted);
            }
        }
        Ok(outcome)
    }

    /// Advances the shift clock.
    ///
    /// When time runs out, any open item is voided and the shift completes.
    /// Returns the final summary on the tick that ends the shift.
    pub fn tick(&mut self, elapsed_ms: u64) -> Option<ShiftSummary> {
        if self.is_complete() {
            return None;
        }
        self.clock.advance(elapsed_ms);
        if !self.clock.is_expired() {
            return None;
        }

        if let Some(record) = self.workflow.abandon() {
            self.voided += 1;
            warn!(id = %record.id, "shift ended during inspection; item voided");
            self.observer.on_event(&ShiftEvent::InspectionVoided {
                mail_id: record.id.clone(),
            });
        }
        self.finish(ShiftEndReason::TimeExpired);
        Some(self.summary())
    }

    fn finish(&mut self, reason: ShiftEndReason) {
        self.end_reason = Some(reason);
        let summary = self.summary();
        info!(
            day = summary.day_number,
            ?reason,
            resolved = summary.resolved,
            correct = summary.correct,
            voided = summary.voided,
            "shift complete"
        );
        self.observer.on_event(&ShiftEvent::ShiftComplete(summary));
    }
}
