//! Report Builder: evaluations → [`QualityReport`] (rows, columns, details, summary).
//!
//! The report is a pure function of the evaluations and the limits; writers in
//! the sibling modules only serialize it. Rows keep input order.

use crate::{
    config::model::Limits,
    model::{
        facts::FieldRecord,
        outcome::{RuleOutcome, UnitEvaluation},
        rule::RuleId,
        unit::SourceStatus,
    },
    rules::{CATALOG, rule_by_id},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity band of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Compliant,
    Low,
    Medium,
    High,
    NotApplicable,
    ReviewNeeded,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::Compliant,
        Band::Low,
        Band::Medium,
        Band::High,
        Band::NotApplicable,
        Band::ReviewNeeded,
    ];

    pub fn of(outcome: RuleOutcome) -> Self {
        match outcome {
            RuleOutcome::Count(0) => Band::Compliant,
            RuleOutcome::Count(1..=3) => Band::Low,
            RuleOutcome::Count(4..=6) => Band::Medium,
            RuleOutcome::Count(_) => Band::High,
            RuleOutcome::NotApplicable => Band::NotApplicable,
            RuleOutcome::ReviewNeeded => Band::ReviewNeeded,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Band::Compliant => "compliant",
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
            Band::NotApplicable => "not_applicable",
            Band::ReviewNeeded => "review_needed",
        }
    }

    /// Fill colour (RGB hex, no `#`).
    pub fn color(self) -> &'static str {
        match self {
            Band::Compliant => "C6EFCE",
            Band::Low => "FFF2CC",
            Band::Medium => "F8CBAD",
            Band::High => "FFC7CE",
            Band::NotApplicable => "F0F0F0",
            Band::ReviewNeeded => "FFEB9C",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            Band::Compliant => "Compliant - no violations",
            Band::Low => "Low - 1 to 3 violations",
            Band::Medium => "Medium - 4 to 6 violations",
            Band::High => "High - 7 or more violations",
            Band::NotApplicable => "N/A - rule does not apply or no source file",
            Band::ReviewNeeded => "Review needed - manual review required",
        }
    }
}

/// Cell display text: the count (`10+` at the cap), `N/A` or `?`.
pub fn cell_text(outcome: RuleOutcome, cap: u8) -> String {
    match outcome {
        RuleOutcome::Count(n) if n >= cap => format!("{cap}+"),
        RuleOutcome::Count(n) => n.to_string(),
        RuleOutcome::NotApplicable => "N/A".to_string(),
        RuleOutcome::ReviewNeeded => "?".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub rule: RuleId,
    pub outcome: RuleOutcome,
    pub band: Band,
    pub text: String,
}

/// One unit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub index: usize,
    pub id: String,
    pub short_name: String,
    pub module: String,
    pub layer: String,
    /// File path, `None` when absent.
    pub path: Option<String>,
    pub category: String,
    pub source: String,
    pub cells: Vec<Cell>,
    pub total_violations: usize,
}

/// Column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleColumn {
    pub id: RuleId,
    pub name: String,
    pub intent: String,
}

/// One field-level record on the detail sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub unit_index: usize,
    pub unit: String,
    pub rule: RuleId,
    pub rule_name: String,
    pub field: String,
    pub field_type: String,
    pub line: usize,
    /// What is missing, e.g. `missing @AMetaData within 500-char window`.
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_units: usize,
    pub total_rules: usize,
    pub files_present: usize,
    pub files_absent: usize,
    pub files_unreadable: usize,
    /// Cell count per band key.
    pub bands: BTreeMap<String, usize>,
    pub total_violations: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub band: Band,
    pub color: String,
    pub sample: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub rules: Vec<RuleColumn>,
    pub rows: Vec<MatrixRow>,
    pub details: Vec<DetailRecord>,
    pub summary: ReportSummary,
    pub legend: Vec<LegendEntry>,
}

impl QualityReport {
    /// Build the report; `evaluations` must be in input order.
    pub fn build(evaluations: &[UnitEvaluation], limits: &Limits) -> Self {
        let rules = CATALOG
            .iter()
            .map(|r| RuleColumn {
                id: r.id,
                name: r.name.to_string(),
                intent: r.intent.to_string(),
            })
            .collect();

        let rows: Vec<MatrixRow> = evaluations
            .iter()
            .map(|e| build_row(e, limits.count_cap))
            .collect();

        let mut details: Vec<DetailRecord> = evaluations
            .iter()
            .flat_map(|e| unit_details(e, limits.detail_threshold, limits.field_window_chars))
            .collect();
        details.sort_by_key(|d| (d.unit_index, d.line));

        let summary = summarize(evaluations, &rows);
        let legend = Band::ALL
            .iter()
            .map(|b| LegendEntry {
                band: *b,
                color: b.color().to_string(),
                sample: legend_sample(*b, limits.count_cap),
                meaning: b.meaning().to_string(),
            })
            .collect();

        Self {
            rules,
            rows,
            details,
            summary,
            legend,
        }
    }
}

fn build_row(eval: &UnitEvaluation, cap: u8) -> MatrixRow {
    let cells = eval
        .results
        .iter()
        .map(|r| Cell {
            rule: r.rule,
            outcome: r.outcome,
            band: Band::of(r.outcome),
            text: cell_text(r.outcome, cap),
        })
        .collect();
    MatrixRow {
        index: eval.unit.index,
        id: eval.unit.id.clone(),
        short_name: eval.unit.short_name.clone(),
        module: eval.unit.module.clone(),
        layer: eval.unit.layer.clone(),
        path: eval
            .unit
            .location
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        category: eval.role.label().to_string(),
        source: eval.source.label().to_string(),
        cells,
        total_violations: eval.total_violations(),
    }
}

/// Field records for the field-level rules whose count reached `threshold`.
fn unit_details(eval: &UnitEvaluation, threshold: u8, window: usize) -> Vec<DetailRecord> {
    let sources: [(RuleId, &[FieldRecord]); 2] = [
        (RuleId::MetaDataAnnotations, &eval.fields.missing_metadata),
        (RuleId::ValidationAnnotations, &eval.fields.missing_validation),
    ];
    let mut out = Vec::new();
    for (rule, records) in sources {
        let reached = eval
            .outcome(rule)
            .and_then(|o| o.count())
            .is_some_and(|n| n >= threshold);
        if !reached {
            continue;
        }
        let rule_name = rule_by_id(rule)
            .map(|r| r.name)
            .unwrap_or_default();
        let comment = match rule {
            RuleId::MetaDataAnnotations => format!("missing @AMetaData within {window}-char window"),
            _ => "missing validation annotation (@NotNull, @NotBlank or @Size)".to_string(),
        };
        out.extend(records.iter().map(|rec| DetailRecord {
            unit_index: eval.unit.index,
            unit: eval.unit.id.clone(),
            rule,
            rule_name: rule_name.to_string(),
            field: rec.name.clone(),
            field_type: rec.ty.clone(),
            line: rec.line,
            comment: comment.clone(),
        }));
    }
    out
}

fn summarize(evaluations: &[UnitEvaluation], rows: &[MatrixRow]) -> ReportSummary {
    let mut bands: BTreeMap<String, usize> =
        Band::ALL.iter().map(|b| (b.key().to_string(), 0)).collect();
    for cell in rows.iter().flat_map(|r| &r.cells) {
        *bands.entry(cell.band.key().to_string()).or_default() += 1;
    }

    let count = |f: fn(&SourceStatus) -> bool| evaluations.iter().filter(|e| f(&e.source)).count();

    ReportSummary {
        total_units: evaluations.len(),
        total_rules: CATALOG.len(),
        files_present: count(|s| matches!(s, SourceStatus::Present)),
        files_absent: count(|s| matches!(s, SourceStatus::Absent)),
        files_unreadable: count(|s| matches!(s, SourceStatus::Unreadable(_))),
        bands,
        total_violations: rows.iter().map(|r| r.total_violations).sum(),
        generated_at: Utc::now(),
    }
}

fn legend_sample(band: Band, cap: u8) -> String {
    match band {
        Band::Compliant => "0".to_string(),
        Band::Low => "1-3".to_string(),
        Band::Medium => "4-6".to_string(),
        Band::High => format!("7-{cap}+"),
        Band::NotApplicable => "N/A".to_string(),
        Band::ReviewNeeded => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{facts::FieldScan, outcome::RuleResult, role::Role, unit::Unit};
    use pretty_assertions::assert_eq;

    fn eval_with(index: usize, outcomes: &[(RuleId, RuleOutcome)], fields: FieldScan) -> UnitEvaluation {
        let results = CATALOG
            .iter()
            .map(|r| RuleResult {
                rule: r.id,
                outcome: outcomes
                    .iter()
                    .find(|(id, _)| *id == r.id)
                    .map(|(_, o)| *o)
                    .unwrap_or(RuleOutcome::NotApplicable),
                findings: Vec::new(),
            })
            .collect();
        UnitEvaluation {
            unit: Unit {
                index,
                id: format!("tech.derbent.m.domain.CE{index}"),
                module: "m".into(),
                layer: "domain".into(),
                short_name: format!("CE{index}"),
                location: None,
            },
            role: Role::Entity,
            source: SourceStatus::Present,
            results,
            fields,
        }
    }

    fn record(name: &str, line: usize) -> FieldRecord {
        FieldRecord {
            name: name.into(),
            ty: "String".into(),
            line,
            fragment: format!("private String {name}"),
        }
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(Band::of(RuleOutcome::Count(0)), Band::Compliant);
        assert_eq!(Band::of(RuleOutcome::Count(3)), Band::Low);
        assert_eq!(Band::of(RuleOutcome::Count(4)), Band::Medium);
        assert_eq!(Band::of(RuleOutcome::Count(7)), Band::High);
        assert_eq!(Band::of(RuleOutcome::NotApplicable), Band::NotApplicable);
        assert_eq!(Band::of(RuleOutcome::ReviewNeeded), Band::ReviewNeeded);
    }

    #[test]
    fn cell_text_marks_the_cap() {
        assert_eq!(cell_text(RuleOutcome::Count(10), 10), "10+");
        assert_eq!(cell_text(RuleOutcome::Count(9), 10), "9");
        assert_eq!(cell_text(RuleOutcome::NotApplicable, 10), "N/A");
        assert_eq!(cell_text(RuleOutcome::ReviewNeeded, 10), "?");
    }

    #[test]
    fn details_only_at_threshold_and_sorted() {
        let many: Vec<FieldRecord> = (0..12).rev().map(|i| record(&format!("f{i}"), 100 + i)).collect();
        let heavy = eval_with(
            1,
            &[(RuleId::MetaDataAnnotations, RuleOutcome::Count(10))],
            FieldScan {
                fields_seen: 12,
                missing_metadata: many,
                missing_validation: Vec::new(),
            },
        );
        let light = eval_with(
            0,
            &[(RuleId::MetaDataAnnotations, RuleOutcome::Count(1))],
            FieldScan {
                fields_seen: 1,
                missing_metadata: vec![record("only", 5)],
                missing_validation: Vec::new(),
            },
        );
        let report = QualityReport::build(&[light, heavy], &Limits::default());
        assert_eq!(report.details.len(), 12);
        assert!(report.details.iter().all(|d| d.unit_index == 1));
        assert_eq!(report.details[0].line, 100);
        assert_eq!(report.details[11].line, 111);
        assert_eq!(report.details[0].comment, "missing @AMetaData within 500-char window");
    }

    #[test]
    fn detail_comment_names_the_missing_annotation() {
        let e = eval_with(
            0,
            &[(RuleId::ValidationAnnotations, RuleOutcome::Count(1))],
            FieldScan {
                fields_seen: 1,
                missing_metadata: Vec::new(),
                missing_validation: vec![record("email", 9)],
            },
        );
        let limits = Limits {
            detail_threshold: 1,
            field_window_chars: 300,
            ..Limits::default()
        };
        let report = QualityReport::build(&[e], &limits);
        assert_eq!(report.details.len(), 1);
        assert!(report.details[0].comment.starts_with("missing validation annotation"));

        let line = serde_json::to_string(&report.details[0]).unwrap();
        assert!(line.contains("\"comment\":\"missing validation annotation"));
    }

    #[test]
    fn summary_counts_cells_by_band() {
        let e = eval_with(0, &[(RuleId::JavaDoc, RuleOutcome::Count(2))], FieldScan::default());
        let report = QualityReport::build(&[e], &Limits::default());
        assert_eq!(report.summary.total_units, 1);
        assert_eq!(report.summary.total_rules, CATALOG.len());
        assert_eq!(report.summary.bands["low"], 1);
        assert_eq!(report.summary.bands["not_applicable"], CATALOG.len() - 1);
        assert_eq!(report.summary.total_violations, 2);
        assert_eq!(report.rows[0].cells.len(), report.rules.len());
    }
}
