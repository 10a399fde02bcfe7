//! Report form state.

use crate::error::WorkflowError;
use crate::mail::{ContrabandKind, OffenceKind, SubstanceKind};

/// In-progress report selections.
///
/// Mirrors the report form: two toggles, each gating a type dropdown, plus
/// an always-available offence dropdown. Turning a toggle off clears its
/// dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportDraft {
    contraband_flagged: bool,
    contraband: Option<ContrabandKind>,
    substance_flagged: bool,
    substance: Option<SubstanceKind>,
    offence: Option<OffenceKind>,
}

impl ReportDraft {
    pub fn contraband_flagged(&self) -> bool {
        self.contraband_flagged
    }

    pub fn contraband(&self) -> Option<ContrabandKind> {
        self.contraband
    }

    pub fn substance_flagged(&self) -> bool {
        self.substance_flagged
    }

    pub fn substance(&self) -> Option<SubstanceKind> {
        self.substance
    }

    pub fn offence(&self) -> Option<OffenceKind> {
        self.offence
    }

    pub fn set_contraband_flag(&mut self, on: bool) {
        self.contraband_flagged = on;
        if !on {
            self.contraband = None;
        }
    }

    pub fn select_contraband(&mut self, kind: ContrabandKind) -> Result<(), WorkflowError> {
        if !self.contraband_flagged {
            return Err(WorkflowError::ControlDisabled {
                control: "contraband type",
            });
        }
        self.contraband = Some(kind);
        Ok(())
    }

    pub fn set_substance_flag(&mut self, on: bool) {
        self.substance_flagged = on;
        if !on {
            self.substance = None;
        }
    }

    pub fn select_substance(&mut self, kind: SubstanceKind) -> Result<(), WorkflowError> {
        if !self.substance_flagged {
            return Err(WorkflowError::ControlDisabled {
                control: "substance type",
            });
        }
        self.substance = Some(kind);
        Ok(())
    }

    /// `None` resets the dropdown.
    pub fn select_offence(&mut self, kind: Option<OffenceKind>) {
        self.offence = kind;
    }

    /// Checks the draft and produces the submitted details.
    ///
    /// A toggled-on category needs a type, and at least one reason must be
    /// given.
    pub fn finalize(&self) -> Result<ReportDetails, WorkflowError> {
        if self.contraband_flagged && self.contraband.is_none() {
            return Err(WorkflowError::IncompleteReport {
                reason: "contraband type not selected",
            });
        }
        if self.substance_flagged && self.substance.is_none() {
            return Err(WorkflowError::IncompleteReport {
                reason: "substance type not selected",
            });
        }
        let details = ReportDetails {
            contraband: self.contraband,
            substance: self.substance,
            offence: self.offence,
        };
        if details.is_empty() {
            return Err(WorkflowError::IncompleteReport {
                reason: "no reason selected",
            });
        }
        Ok(details)
    }
}

/// The reasons attached to a submitted report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportDetails {
    pub contraband: Option<ContrabandKind>,
    pub substance: Option<SubstanceKind>,
    pub offence: Option<OffenceKind>,
}

impl ReportDetails {
    pub fn is_empty(&self) -> bool {
        self.contraband.is_none() && self.substance.is_none() && self.offence.is_none()
    }
}
