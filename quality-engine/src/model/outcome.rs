//! Evaluation results: per-rule outcomes, individual findings, per-unit records.

use crate::model::{
    facts::FieldScan,
    role::Role,
    rule::RuleId,
    unit::{SourceStatus, Unit},
};
use serde::{Deserialize, Serialize};

/// Result of one (unit, rule) pair.
///
/// `NotApplicable` and `ReviewNeeded` are first-class values, distinct from
/// `Count(0)`; they are never coerced into numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// Capped violation count (0 = compliant).
    Count(u8),
    /// Rule does not apply to the unit's role, or no file content is available.
    NotApplicable,
    /// Rule applies but cannot be decided from text.
    ReviewNeeded,
}

impl RuleOutcome {
    pub fn count(&self) -> Option<u8> {
        match self {
            RuleOutcome::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, RuleOutcome::Count(n) if *n > 0)
    }
}

/// Where a marker for a finding should go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The `occurrence`-th line (0-based) containing `text`.
    Fragment { text: String, occurrence: usize },
    /// The type declaration line.
    Declaration,
}

impl Anchor {
    pub fn fragment(text: impl Into<String>) -> Self {
        Anchor::Fragment {
            text: text.into(),
            occurrence: 0,
        }
    }

    pub fn nth(text: impl Into<String>, occurrence: usize) -> Self {
        Anchor::Fragment {
            text: text.into(),
            occurrence,
        }
    }
}

/// One sub-violation of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Short location description (`class declaration`, `field: name`, `query #2`).
    pub location: String,
    /// Parameter for the fix template (constant, field or query text). May be empty.
    pub detail: String,
    pub anchor: Anchor,
    /// 1-based line, when the construct has one.
    pub line: Option<usize>,
}

impl Finding {
    pub fn new(location: impl Into<String>, detail: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            location: location.into(),
            detail: detail.into(),
            anchor,
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Outcome plus the uncapped findings behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule: RuleId,
    pub outcome: RuleOutcome,
    pub findings: Vec<Finding>,
}

/// Everything the sinks need about one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitEvaluation {
    pub unit: Unit,
    pub role: Role,
    pub source: SourceStatus,
    /// One entry per catalog rule, in catalog order.
    pub results: Vec<RuleResult>,
    /// Field-level records (empty without content).
    pub fields: FieldScan,
}

impl UnitEvaluation {
    pub fn result(&self, rule: RuleId) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule == rule)
    }

    pub fn outcome(&self, rule: RuleId) -> Option<RuleOutcome> {
        self.result(rule).map(|r| r.outcome)
    }

    /// Sum of numeric cells.
    pub fn total_violations(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.outcome.count())
            .map(usize::from)
            .sum()
    }
}
