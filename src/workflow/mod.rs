//! Per-item inspection workflow.
//!
//! An item moves from the desk, through a drag into the inspection zone,
//! into a category-specific view, and out through exactly one action. The
//! report action detours through a detail form. See [`Stage`] for the full
//! transition graph and [`InspectionWorkflow`] for the driver.

mod machine;
mod report;
mod stage;
mod view;

pub use machine::{InspectionSession, InspectionWorkflow, Outcome, WorkflowInput};
pub use report::{ReportDetails, ReportDraft};
pub use stage::Stage;
pub use view::{InspectionView, LetterFace, LetterView, PackageSide, PackageView, ViewCommand};
