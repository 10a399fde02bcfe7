//! Workflow stages.

use std::fmt;

/// Where the current mail item is in its inspection workflow.
///
/// ```text
/// Idle → Presented ⇄ Dragged → DroppedInZone → Inspecting
///            ↑  (dropped outside)                 │   ↑ (cancel)
///            └──────── (closed, no action) ───────┤   │
///                                                 ├→ ReportDetailing → ReportSubmitted ─┐
///                                                 └→ Resolved ←─────────────────────────┘
///                                                        ↓
///                                                      Closed
/// ```
///
/// `Resolved` and `ReportSubmitted` are passed through inside a single call;
/// callers observe `Closed` afterwards. There is no separate
/// dropped-outside-zone stage: [`drop_item(false)`] returns the item straight
/// to `Presented`. Likewise there is no action-chosen stage: [`choose_action`]
/// either opens `ReportDetailing` or resolves in the same call.
///
/// [`drop_item(false)`]: super::InspectionWorkflow::drop_item
/// [`choose_action`]: super::InspectionWorkflow::choose_action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// No current item.
    #[default]
    Idle,
    /// The item is on the desk and can be picked up.
    Presented,
    /// The input layer is dragging the item.
    Dragged,
    /// The item rests in the inspection zone; inspection can be opened.
    DroppedInZone,
    /// The category-specific inspection view is open.
    Inspecting,
    /// The report form is open.
    ReportDetailing,
    /// A report was submitted and is being resolved.
    ReportSubmitted,
    /// An action was chosen and scored.
    Resolved,
    /// The item's session is gone; a new item may be presented.
    Closed,
}

impl Stage {
    /// Whether an item is currently held by the workflow.
    pub fn has_item(&self) -> bool {
        !matches!(self, Self::Idle | Self::Closed)
    }

    /// Whether `target` is directly reachable from `self`.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Idle | Closed, Presented)
                | (Presented | DroppedInZone, Dragged)
                | (Dragged, Presented | DroppedInZone)
                | (DroppedInZone, Inspecting)
                | (Inspecting, Presented | ReportDetailing | Resolved)
                | (ReportDetailing, Inspecting | ReportSubmitted)
                | (ReportSubmitted, Resolved)
                | (Resolved, Closed)
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Presented => "presented",
            Self::Dragged => "dragged",
            Self::DroppedInZone => "dropped in zone",
            Self::Inspecting => "inspecting",
            Self::ReportDetailing => "detailing a report",
            Self::ReportSubmitted => "report submitted",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}
