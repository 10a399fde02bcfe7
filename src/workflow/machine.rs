//! The per-item inspection state machine.

use super::report::{ReportDetails, ReportDraft};
use super::stage::Stage;
use super::view::{InspectionView, ViewCommand};
use crate::error::WorkflowError;
use crate::mail::{Action, ContrabandKind, MailId, MailRecord, OffenceKind, SubstanceKind};
use crate::rules::is_player_choice_correct;
use std::sync::Arc;
use tracing::debug;

/// The single emitted record of a resolved item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub mail_id: MailId,
    pub record: Arc<MailRecord>,
    pub chosen_action: Action,
    /// Scored against the computed action, never the authored one.
    pub is_correct: bool,
    /// Present exactly when `chosen_action` is `Report`.
    pub report: Option<ReportDetails>,
}

/// Transient state for the item currently being handled.
///
/// Created when an item is presented, dropped when it resolves.
#[derive(Debug, Clone)]
pub struct InspectionSession {
    record: Arc<MailRecord>,
    view: Option<InspectionView>,
    report: Option<ReportDraft>,
}

impl InspectionSession {
    fn new(record: Arc<MailRecord>) -> Self {
        Self {
            record,
            view: None,
            report: None,
        }
    }

    pub fn record(&self) -> &Arc<MailRecord> {
        &self.record
    }

    /// The open inspection view, if inspecting.
    pub fn view(&self) -> Option<&InspectionView> {
        self.view.as_ref()
    }

    /// The open report form, if detailing a report.
    pub fn report(&self) -> Option<&ReportDraft> {
        self.report.as_ref()
    }
}

/// A discrete input event from the input or view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkflowInput {
    BeginDrag,
    /// Pointer released; `in_zone` tells whether it landed in the inspection zone.
    Drop { in_zone: bool },
    OpenInspection,
    View(ViewCommand),
    CloseInspection,
    ChooseAction(Action),
    ToggleContraband(bool),
    SelectContraband(ContrabandKind),
    ToggleSubstance(bool),
    SelectSubstance(SubstanceKind),
    SelectOffence(Option<OffenceKind>),
    SubmitReport,
    CancelReport,
}

/// Drives one mail item at a time from presentation to resolution.
///
/// Every method is a single atomic transition: on error nothing changes.
/// Resolution produces exactly one [`Outcome`] and discards the session,
/// so a second resolution attempt for the same item is rejected.
///
/// Not thread-safe; drive it from one thread.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_mailroom::mail::{Action, MailRecord};
/// use u_mailroom::workflow::{InspectionWorkflow, Stage};
///
/// let mut wf = InspectionWorkflow::new();
/// wf.present(Arc::new(MailRecord::letter("LTR_001"))).unwrap();
/// wf.begin_drag().unwrap();
/// wf.drop_item(true).unwrap();
/// wf.open_inspection().unwrap();
/// let outcome = wf.choose_action(Action::Accept).unwrap().unwrap();
/// assert!(outcome.is_correct);
/// assert_eq!(wf.stage(), Stage::Closed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InspectionWorkflow {
    stage: Stage,
    session: Option<InspectionSession>,
}

impl InspectionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn session(&self) -> Option<&InspectionSession> {
        self.session.as_ref()
    }

    pub fn record(&self) -> Option<&Arc<MailRecord>> {
        self.session.as_ref().map(InspectionSession::record)
    }

    pub fn view(&self) -> Option<&InspectionView> {
        self.session.as_ref().and_then(InspectionSession::view)
    }

    pub fn report(&self) -> Option<&ReportDraft> {
        self.session.as_ref().and_then(InspectionSession::report)
    }

    /// Makes `record` the current item.
    pub fn present(&mut self, record: Arc<MailRecord>) -> Result<(), WorkflowError> {
        if let Some(session) = &self.session {
            return Err(WorkflowError::ItemUnresolved {
                mail_id: session.record.id.clone(),
            });
        }
        debug!(id = %record.id, kind = %record.kind, "mail presented");
        self.session = Some(InspectionSession::new(record));
        self.stage = Stage::Presented;
        Ok(())
    }

    pub fn begin_drag(&mut self) -> Result<(), WorkflowError> {
        self.require(&[Stage::Presented, Stage::DroppedInZone], "start a drag")?;
        self.stage = Stage::Dragged;
        Ok(())
    }

    /// Records where a drag ended. Outside the zone the item snaps back to
    /// `Presented`.
    pub fn drop_item(&mut self, in_zone: bool) -> Result<Stage, WorkflowError> {
        self.require(&[Stage::Dragged], "drop the item")?;
        self.stage = if in_zone {
            Stage::DroppedInZone
        } else {
            Stage::Presented
        };
        Ok(self.stage)
    }

    /// Opens the category-specific inspection view.
    pub fn open_inspection(&mut self) -> Result<(), WorkflowError> {
        let session = self.require(&[Stage::DroppedInZone], "open inspection")?;
        session.view = Some(InspectionView::open(&session.record));
        debug!(id = %session.record.id, "inspection opened");
        self.stage = Stage::Inspecting;
        Ok(())
    }

    /// Forwards a navigation command to the open view.
    pub fn interact(&mut self, command: ViewCommand) -> Result<bool, WorkflowError> {
        let session = self.require(&[Stage::Inspecting], "use the inspection view")?;
        let record = Arc::clone(&session.record);
        match session.view.as_mut() {
            Some(view) => view.apply(command, &record),
            None => Err(WorkflowError::NoActiveItem),
        }
    }

    /// Closes inspection without an action. The item stays on the desk and
    /// no outcome is produced.
    pub fn close_inspection(&mut self) -> Result<(), WorkflowError> {
        let session = self.require(&[Stage::Inspecting], "close inspection")?;
        session.view = None;
        debug!(id = %session.record.id, "inspection closed without action");
        self.stage = Stage::Presented;
        Ok(())
    }

    /// Chooses an action.
    ///
    /// `Report` opens the report form and returns `Ok(None)`; any other
    /// action resolves the item and returns its outcome.
    pub fn choose_action(&mut self, action: Action) -> Result<Option<Outcome>, WorkflowError> {
        let session = self.require(&[Stage::Inspecting], "choose an action")?;
        if action == Action::Report {
            session.report = Some(ReportDraft::default());
            self.stage = Stage::ReportDetailing;
            return Ok(None);
        }
        self.stage = Stage::Resolved;
        Ok(Some(self.resolve(action, None)?))
    }

    pub fn toggle_contraband(&mut self, on: bool) -> Result<(), WorkflowError> {
        self.draft_mut()?.set_contraband_flag(on);
        Ok(())
    }

    pub fn select_contraband(&mut self, kind: ContrabandKind) -> Result<(), WorkflowError> {
        self.draft_mut()?.select_contraband(kind)
    }

    pub fn toggle_substance(&mut self, on: bool) -> Result<(), WorkflowError> {
        self.draft_mut()?.set_substance_flag(on);
        Ok(())
    }

    pub fn select_substance(&mut self, kind: SubstanceKind) -> Result<(), WorkflowError> {
        self.draft_mut()?.select_substance(kind)
    }

    pub fn select_offence(&mut self, kind: Option<OffenceKind>) -> Result<(), WorkflowError> {
        self.draft_mut()?.select_offence(kind);
        Ok(())
    }

    /// Leaves the report form and returns to inspection, discarding the draft.
    pub fn cancel_report(&mut self) -> Result<(), WorkflowError> {
        let session = self.require(&[Stage::ReportDetailing], "cancel the report")?;
        session.report = None;
        self.stage = Stage::Inspecting;
        Ok(())
    }

    /// Submits the report and resolves the item as `Report`.
    ///
    /// An incomplete draft is rejected and the form stays open.
    pub fn submit_report(&mut self) -> Result<Outcome, WorkflowError> {
        let session = self.require(&[Stage::ReportDetailing], "submit a report")?;
        let details = match session.report.as_ref() {
            Some(draft) => draft.finalize()?,
            None => return Err(WorkflowError::NoActiveItem),
        };
        self.stage = Stage::ReportSubmitted;
        self.resolve(Action::Report, Some(details))
    }

    /// Drops the current item without an outcome, whatever its stage.
    ///
    /// Returns the voided record, if any. Used when a shift ends under a
    /// live inspection.
    pub fn abandon(&mut self) -> Option<Arc<MailRecord>> {
        let session = self.session.take()?;
        debug!(id = %session.record.id, stage = %self.stage, "inspection voided");
        self.stage = Stage::Idle;
        Some(session.record)
    }

    /// Dispatches an input event to the matching method.
    pub fn apply(&mut self, input: WorkflowInput) -> Result<Option<Outcome>, WorkflowError> {
        match input {
            WorkflowInput::BeginDrag => self.begin_drag().map(|_| None),
            WorkflowInput::Drop { in_zone } => self.drop_item(in_zone).map(|_| None),
            WorkflowInput::OpenInspection => self.open_inspection().map(|_| None),
            WorkflowInput::View(command) => self.interact(command).map(|_| None),
            WorkflowInput::CloseInspection => self.close_inspection().map(|_| None),
            WorkflowInput::ChooseAction(action) => self.choose_action(action),
            WorkflowInput::ToggleContraband(on) => self.toggle_contraband(on).map(|_| None),
            WorkflowInput::SelectContraband(kind) => self.select_contraband(kind).map(|_| None),
            WorkflowInput::ToggleSubstance(on) => self.toggle_substance(on).map(|_| None),
            WorkflowInput::SelectSubstance(kind) => self.select_substance(kind).map(|_| None),
            WorkflowInput::SelectOffence(kind) => self.select_offence(kind).map(|_| None),
            WorkflowInput::SubmitReport => self.submit_report().map(Some),
            WorkflowInput::CancelReport => self.cancel_report().map(|_| None),
        }
    }

    /// Checks the stage and hands back the live session.
    fn require(
        &mut self,
        allowed: &[Stage],
        operation: &'static str,
    ) -> Result<&mut InspectionSession, WorkflowError> {
        let stage = self.stage;
        let session = self.session.as_mut().ok_or(WorkflowError::NoActiveItem)?;
        if !allowed.contains(&stage) {
            return Err(WorkflowError::InvalidTransition { stage, operation });
        }
        Ok(session)
    }

    fn draft_mut(&mut self) -> Result<&mut ReportDraft, WorkflowError> {
        let session = self.require(&[Stage::ReportDetailing], "edit the report")?;
        session.report.as_mut().ok_or(WorkflowError::NoActiveItem)
    }

    fn resolve(
        &mut self,
        action: Action,
        report: Option<ReportDetails>,
    ) -> Result<Outcome, WorkflowError> {
        let session = self.session.take().ok_or(WorkflowError::NoActiveItem)?;
        let is_correct = is_player_choice_correct(&session.record, action);
        debug!(id = %session.record.id, %action, is_correct, "mail resolved");
        self.stage = Stage::Closed;

        Ok(Outcome {
            mail_id: session.record.id.clone(),
            record: session.record,
            chosen_action: action,
            is_correct,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::view::LetterFace;

    fn workflow_with(record: MailRecord) -> InspectionWorkflow {
        let mut wf = InspectionWorkflow::new();
        wf.present(Arc::new(record)).unwrap();
        wf
    }

    fn inspecting(record: MailRecord) -> InspectionWorkflow {
        let mut wf = workflow_with(record);
        wf.begin_drag().unwrap();
        wf.drop_item(true).unwrap();
        wf.open_inspection().unwrap();
        wf
    }

    #[test]
    fn test_happy_path_accept() {
        let mut wf = inspecting(MailRecord::letter("L"));
        assert_eq!(wf.stage(), Stage::Inspecting);
        let outcome = wf.choose_action(Action::Accept).unwrap().unwrap();
        assert_eq!(outcome.mail_id.as_str(), "L");
        assert!(outcome.is_correct);
        assert!(outcome.report.is_none());
        assert_eq!(wf.stage(), Stage::Closed);
        assert!(wf.session().is_none());
    }

    #[test]
    fn test_wrong_choice_scored_incorrect() {
        let mut wf = inspecting(MailRecord::letter("L"));
        let outcome = wf.choose_action(Action::Reject).unwrap().unwrap();
        assert!(!outcome.is_correct);
    }

    #[test]
    fn test_drop_outside_returns_to_presented() {
        let mut wf = workflow_with(MailRecord::letter("L"));
        wf.begin_drag().unwrap();
        assert_eq!(wf.drop_item(false), Ok(Stage::Presented));
        assert!(wf.open_inspection().is_err());
        wf.begin_drag().unwrap();
        assert_eq!(wf.drop_item(true), Ok(Stage::DroppedInZone));
        // Can be picked up again from the zone.
        wf.begin_drag().unwrap();
        assert_eq!(wf.stage(), Stage::Dragged);
    }

    #[test]
    fn test_close_without_action_keeps_item() {
        let mut wf = inspecting(MailRecord::letter("L"));
        wf.close_inspection().unwrap();
        assert_eq!(wf.stage(), Stage::Presented);
        assert!(wf.view().is_none());
        assert_eq!(wf.record().unwrap().id.as_str(), "L");

        // Re-inspection starts fresh.
        wf.begin_drag().unwrap();
        wf.drop_item(true).unwrap();
        wf.open_inspection().unwrap();
        assert!(wf.view().is_some());
    }

    #[test]
    fn test_view_state_resets_on_reopen() {
        let mut wf = inspecting(MailRecord::letter("L"));
        wf.interact(ViewCommand::Flip).unwrap();
        wf.close_inspection().unwrap();
        wf.begin_drag().unwrap();
        wf.drop_item(true).unwrap();
        wf.open_inspection().unwrap();
        let Some(InspectionView::Letter(letter)) = wf.view() else {
            panic!("expected letter view");
        };
        assert_eq!(letter.face(), LetterFace::Front);
    }

    #[test]
    fn test_report_routes_through_detailing() {
        let mut wf = inspecting(MailRecord::package("P").with_contraband(ContrabandKind::Drugs));
        assert_eq!(wf.choose_action(Action::Report), Ok(None));
        assert_eq!(wf.stage(), Stage::ReportDetailing);
        assert!(wf.report().is_some());

        wf.toggle_contraband(true).unwrap();
        wf.select_contraband(ContrabandKind::Drugs).unwrap();
        let outcome = wf.submit_report().unwrap();
        assert_eq!(outcome.chosen_action, Action::Report);
        assert!(outcome.is_correct);
        assert_eq!(outcome.report.unwrap().contraband, Some(ContrabandKind::Drugs));
        assert_eq!(wf.stage(), Stage::Closed);
    }

    #[test]
    fn test_cancel_report_returns_to_inspecting() {
        let mut wf = inspecting(MailRecord::letter("L"));
        wf.choose_action(Action::Report).unwrap();
        wf.select_offence(Some(OffenceKind::Other)).unwrap();
        wf.cancel_report().unwrap();
        assert_eq!(wf.stage(), Stage::Inspecting);
        assert!(wf.report().is_none());

        // A fresh draft on the next attempt.
        wf.choose_action(Action::Report).unwrap();
        assert_eq!(wf.report().unwrap().offence(), None);
    }

    #[test]
    fn test_incomplete_report_stays_open() {
        let mut wf = inspecting(MailRecord::letter("L"));
        wf.choose_action(Action::Report).unwrap();
        let err = wf.submit_report().unwrap_err();
        assert!(matches!(err, WorkflowError::IncompleteReport { .. }));
        assert_eq!(wf.stage(), Stage::ReportDetailing);
        assert!(wf.session().is_some());
    }

    #[test]
    fn test_report_controls_only_while_detailing() {
        let mut wf = inspecting(MailRecord::letter("L"));
        assert!(matches!(
            wf.toggle_contraband(true),
            Err(WorkflowError::InvalidTransition {
                stage: Stage::Inspecting,
                ..
            })
        ));
        assert!(wf.submit_report().is_err());
    }

    #[test]
    fn test_resolving_twice_is_rejected() {
        let mut wf = inspecting(MailRecord::letter("L"));
        wf.choose_action(Action::Accept).unwrap();
        assert_eq!(
            wf.choose_action(Action::Accept),
            Err(WorkflowError::NoActiveItem)
        );
        assert_eq!(wf.stage(), Stage::Closed);
    }

    #[test]
    fn test_open_inspection_without_item() {
        let mut wf = InspectionWorkflow::new();
        assert_eq!(wf.open_inspection(), Err(WorkflowError::NoActiveItem));
        assert_eq!(wf.stage(), Stage::Idle);
    }

    #[test]
    fn test_present_while_busy() {
        let mut wf = workflow_with(MailRecord::letter("first"));
        let err = wf.present(Arc::new(MailRecord::letter("second"))).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::ItemUnresolved {
                mail_id: MailId::new("first")
            }
        );
        assert_eq!(wf.record().unwrap().id.as_str(), "first");
    }

    #[test]
    fn test_choose_action_before_inspection() {
        let mut wf = workflow_with(MailRecord::letter("L"));
        assert!(matches!(
            wf.choose_action(Action::Accept),
            Err(WorkflowError::InvalidTransition {
                stage: Stage::Presented,
                ..
            })
        ));
        assert_eq!(wf.stage(), Stage::Presented);
    }

    #[test]
    fn test_abandon() {
        let mut wf = inspecting(MailRecord::letter("L"));
        let voided = wf.abandon().unwrap();
        assert_eq!(voided.id.as_str(), "L");
        assert_eq!(wf.stage(), Stage::Idle);
        assert!(wf.abandon().is_none());
    }

    #[test]
    fn test_apply_dispatch() {
        let mut wf = workflow_with(MailRecord::package("P").with_substance(SubstanceKind::Liquid));
        let inputs = [
            WorkflowInput::BeginDrag,
            WorkflowInput::Drop { in_zone: true },
            WorkflowInput::OpenInspection,
            WorkflowInput::View(ViewCommand::OpenPackage),
            WorkflowInput::ChooseAction(Action::Report),
            WorkflowInput::ToggleSubstance(true),
            WorkflowInput::SelectSubstance(SubstanceKind::Liquid),
        ];
        for input in inputs {
            assert_eq!(wf.apply(input), Ok(None), "{input:?}");
        }
        let outcome = wf.apply(WorkflowInput::SubmitReport).unwrap().unwrap();
        assert!(outcome.is_correct);
        assert_eq!(
            outcome.report.unwrap().substance,
            Some(SubstanceKind::Liquid)
        );
    }
}
