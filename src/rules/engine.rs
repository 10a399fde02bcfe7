//! Attribute → correct-action classification.

use crate::mail::{Action, MailRecord};
use std::fmt;

/// Letters with more sentences than this break the length rule.
pub const MAX_SENTENCES: u32 = 4;

/// A single rule a record can break.
///
/// Report-tier violations (contraband, substance, offence) strictly dominate
/// the minor ones: any of them makes the correct action [`Action::Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleViolation {
    AddressWrong,
    SignatureWrong,
    SentenceOver,
    Contraband,
    Substance,
    Offence,
}

impl RuleViolation {
    /// Stable rule code used in authored content.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AddressWrong => "ADDR_WRONG",
            Self::SignatureWrong => "SIGN_WRONG",
            Self::SentenceOver => "SENTENCE_OVER",
            Self::Contraband => "CONTRABAND",
            Self::Substance => "SUBSTANCE",
            Self::Offence => "SUSPICIOUS_OFFENCE",
        }
    }

    /// Parses a rule code back into a violation.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ADDR_WRONG" => Some(Self::AddressWrong),
            "SIGN_WRONG" => Some(Self::SignatureWrong),
            "SENTENCE_OVER" => Some(Self::SentenceOver),
            "CONTRABAND" => Some(Self::Contraband),
            "SUBSTANCE" => Some(Self::Substance),
            "SUSPICIOUS_OFFENCE" => Some(Self::Offence),
            _ => None,
        }
    }

    /// Whether this violation alone forces a report.
    pub fn is_report_tier(&self) -> bool {
        matches!(self, Self::Contraband | Self::Substance | Self::Offence)
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lists every rule the record breaks, minor rules first.
pub fn violations(record: &MailRecord) -> Vec<RuleViolation> {
    let checks = [
        (!record.addressed_correctly, RuleViolation::AddressWrong),
        (!record.signed_correctly, RuleViolation::SignatureWrong),
        (record.sentence_count > MAX_SENTENCES, RuleViolation::SentenceOver),
        (record.contraband.is_some(), RuleViolation::Contraband),
        (record.substance.is_some(), RuleViolation::Substance),
        (record.offence.is_some(), RuleViolation::Offence),
    ];
    checks
        .into_iter()
        .filter_map(|(broken, rule)| broken.then_some(rule))
        .collect()
}

/// Number of minor (non-report-tier) violations.
pub fn minor_violation_count(record: &MailRecord) -> usize {
    [
        !record.addressed_correctly,
        !record.signed_correctly,
        record.sentence_count > MAX_SENTENCES,
    ]
    .into_iter()
    .filter(|&broken| broken)
    .count()
}

/// Computes the objectively correct action for a record.
///
/// Priority order, first match wins:
///
/// 1. contraband, substance, or offence present → `Report`
/// 2. otherwise by minor-violation tally: 0 → `Accept`, 1 → `Reply`,
///    2 or more → `Reject`
///
/// Pure and total over every record.
pub fn correct_action(record: &MailRecord) -> Action {
    if record.contraband.is_some() || record.substance.is_some() || record.offence.is_some() {
        return Action::Report;
    }

    match minor_violation_count(record) {
        0 => Action::Accept,
        1 => Action::Reply,
        _ => Action::Reject,
    }
}

/// Content-authoring sanity check: does the authored `ideal_action` agree
/// with the computed one? Never consulted for scoring.
pub fn validate_authoring(record: &MailRecord) -> bool {
    record.ideal_action == correct_action(record)
}

/// Scores a player's choice against the computed action.
///
/// This is the only runtime authority on correctness; the authored
/// `ideal_action` is deliberately ignored here.
pub fn is_player_choice_correct(record: &MailRecord, player_action: Action) -> bool {
    player_action == correct_action(record)
}
