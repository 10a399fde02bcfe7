//! Content-authoring audit.
//!
//! Compares the authored ground truth on each record with what the engine
//! computes. Mismatches are diagnostics for content review; they never block
//! play and never influence scoring.

use super::engine::{correct_action, violations, RuleViolation};
use crate::mail::{Action, MailId, MailRecord};
use std::borrow::Borrow;
use std::fmt;
use tracing::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One record whose authored data disagrees with the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthoringMismatch {
    pub id: MailId,
    pub authored_action: Action,
    pub computed_action: Action,
    /// Authored rule list, sorted.
    pub authored_rules: Vec<RuleViolation>,
    /// Computed rule list, sorted.
    pub computed_rules: Vec<RuleViolation>,
}

impl AuthoringMismatch {
    pub fn action_mismatch(&self) -> bool {
        self.authored_action != self.computed_action
    }

    pub fn rules_mismatch(&self) -> bool {
        self.authored_rules != self.computed_rules
    }
}

impl fmt::Display for AuthoringMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] authored {}, computed {}",
            self.id, self.authored_action, self.computed_action
        )?;
        if self.rules_mismatch() {
            let join = |rules: &[RuleViolation]| {
                rules.iter().map(RuleViolation::code).collect::<Vec<_>>().join(", ")
            };
            write!(
                f,
                "; rules [{}] vs [{}]",
                join(&self.authored_rules),
                join(&self.computed_rules)
            )?;
        }
        Ok(())
    }
}

/// Result of auditing a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthoringReport {
    /// Number of records examined.
    pub checked: usize,
    /// Records that failed, in input order.
    pub mismatches: Vec<AuthoringMismatch>,
}

impl AuthoringReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Audits authored records against the rule engine.
///
/// # Examples
///
/// ```
/// use u_mailroom::mail::{Action, MailRecord};
/// use u_mailroom::rules::AuthoringAudit;
///
/// let records = vec![
///     MailRecord::letter("ok"),
///     MailRecord::letter("drift").with_ideal_action(Action::Reject),
/// ];
/// let report = AuthoringAudit::default().run(&records);
/// assert_eq!(report.checked, 2);
/// assert_eq!(report.mismatches.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AuthoringAudit {
    /// Also compare the authored `broken_rules` list.
    ///
    /// Off by default: many records leave the list empty.
    pub check_rule_lists: bool,

    /// Whether to check records in parallel using rayon.
    ///
    /// Only honoured when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for AuthoringAudit {
    fn default() -> Self {
        Self {
            check_rule_lists: false,
            parallel: true,
        }
    }
}

impl AuthoringAudit {
    pub fn with_rule_lists(mut self, check: bool) -> Self {
        self.check_rule_lists = check;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Audits every record and logs each mismatch at `warn` level.
    pub fn run<R>(&self, records: &[R]) -> AuthoringReport
    where
        R: Borrow<MailRecord> + Sync,
    {
        let mismatches = self.collect(records);
        for m in &mismatches {
            warn!(mismatch = %m, "authored mail record disagrees with rule engine");
        }

        AuthoringReport {
            checked: records.len(),
            mismatches,
        }
    }

    #[cfg(feature = "parallel")]
    fn collect<R>(&self, records: &[R]) -> Vec<AuthoringMismatch>
    where
        R: Borrow<MailRecord> + Sync,
    {
        if self.parallel {
            records
                .par_iter()
                .filter_map(|r| self.check(r.borrow()))
                .collect()
        } else {
            records.iter().filter_map(|r| self.check(r.borrow())).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn collect<R>(&self, records: &[R]) -> Vec<AuthoringMismatch>
    where
        R: Borrow<MailRecord> + Sync,
    {
        records.iter().filter_map(|r| self.check(r.borrow())).collect()
    }

    fn check(&self, record: &MailRecord) -> Option<AuthoringMismatch> {
        let computed_action = correct_action(record);
        let mut computed_rules = violations(record);
        let mut authored_rules = record.broken_rules.clone();
        computed_rules.sort();
        authored_rules.sort();
        authored_rules.dedup();

        let action_bad = record.ideal_action != computed_action;
        let rules_bad = self.check_rule_lists && authored_rules != computed_rules;
        if !action_bad && !rules_bad {
            return None;
        }

        Some(AuthoringMismatch {
            id: record.id.clone(),
            authored_action: record.ideal_action,
            computed_action,
            authored_rules,
            computed_rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::ContrabandKind;
    use std::sync::Arc;

    #[test]
    fn test_mismatch_display() {
        let records = vec![MailRecord::letter("LTR_009")
            .with_sentence_count(7)
            .with_ideal_action(Action::Accept)];
        let report = AuthoringAudit::default()
            .with_rule_lists(true)
            .with_parallel(false)
            .run(&records);
        assert_eq!(
            report.mismatches[0].to_string(),
            "[LTR_009] authored accept, computed reply; rules [] vs [SENTENCE_OVER]"
        );
    }

    #[test]
    fn test_clean_catalog() {
        let records = vec![
            MailRecord::letter("a"),
            MailRecord::letter("b")
                .with_signed_correctly(false)
                .with_ideal_action(Action::Reply),
        ];
        let report = AuthoringAudit::default().run(&records);
        assert!(report.is_clean());
        assert_eq!(report.checked, 2);
    }

    #[test]
    fn test_action_mismatch_reported() {
        let records = vec![Arc::new(
            MailRecord::package("PKG_009")
                .with_contraband(ContrabandKind::Food)
                .with_ideal_action(Action::Reject),
        )];
        let report = AuthoringAudit::default().with_parallel(false).run(&records);
        assert_eq!(report.mismatches.len(), 1);
        let m = &report.mismatches[0];
        assert_eq!(m.id.as_str(), "PKG_009");
        assert_eq!(m.computed_action, Action::Report);
        assert!(m.action_mismatch());
    }

    #[test]
    fn test_rule_lists_only_when_enabled() {
        // Action right, rule list empty while one rule is broken.
        let records = vec![MailRecord::letter("L")
            .with_addressed_correctly(false)
            .with_ideal_action(Action::Reply)];

        assert!(AuthoringAudit::default().run(&records).is_clean());

        let report = AuthoringAudit::default().with_rule_lists(true).run(&records);
        assert_eq!(report.mismatches.len(), 1);
        assert!(report.mismatches[0].rules_mismatch());
        assert!(!report.mismatches[0].action_mismatch());
    }

    #[test]
    fn test_rule_list_order_is_irrelevant() {
        let records = vec![MailRecord::letter("L")
            .with_addressed_correctly(false)
            .with_signed_correctly(false)
            .with_ideal_action(Action::Reject)
            .with_broken_rules(vec![
                RuleViolation::SignatureWrong,
                RuleViolation::AddressWrong,
            ])];
        assert!(AuthoringAudit::default()
            .with_rule_lists(true)
            .run(&records)
            .is_clean());
    }
}
