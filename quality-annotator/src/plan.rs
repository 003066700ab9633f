//! Insertion planning and materialization. Both are pure.
//!
//! Planning decides, for every finding, which existing line the marker goes
//! above and whether an equivalent marker is already there. Materialization
//! splices the planned lines into the text, reusing the anchor's indentation
//! and the file's line terminator. Nothing in this module touches the disk.

use crate::suggest::marker_text;
use quality_engine::{
    core::text::is_marker_line,
    model::{
        outcome::{Anchor, UnitEvaluation},
        rule::RuleId,
    },
};
use serde::Serialize;
use std::collections::HashMap;

/// Knobs for the planner.
#[derive(Debug, Clone, Copy)]
pub struct PlanLimits {
    /// Lines above the anchor searched for an equivalent marker.
    pub window_lines: usize,
    /// Markers per rule per file, counting ones already present.
    pub max_per_rule: usize,
}

/// One marker to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    /// 0-based index of the existing line the marker goes above.
    pub before: usize,
    pub rule: RuleId,
    /// Marker text, without indentation.
    pub text: String,
    /// Leading whitespace copied from the anchor line.
    pub indent: String,
}

/// Planner output for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub insertions: Vec<Insertion>,
    /// Findings skipped because an equivalent marker is already present.
    pub already_marked: usize,
    /// Findings with no usable anchor and no declaration fallback.
    pub unanchored: usize,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
    }
}

/// Plan markers for every violated rule of `evaluations` (all backed by `text`).
pub fn plan_insertions(text: &str, evaluations: &[&UnitEvaluation], limits: PlanLimits) -> Plan {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let mut plan = Plan::default();
    let mut per_rule: HashMap<RuleId, usize> = HashMap::new();

    for eval in evaluations {
        for result in eval.results.iter().filter(|r| r.outcome.is_violation()) {
            for finding in &result.findings {
                let used = per_rule.entry(result.rule).or_default();
                if *used >= limits.max_per_rule {
                    break;
                }
                let Some(at) = locate(&lines, &finding.anchor) else {
                    plan.unanchored += 1;
                    continue;
                };
                let marker = marker_text(result.rule, finding, &eval.unit.short_name);
                *used += 1;
                if already_present(&lines, &plan.insertions, at, &marker, limits.window_lines) {
                    plan.already_marked += 1;
                    continue;
                }
                plan.insertions.push(Insertion {
                    before: at,
                    rule: result.rule,
                    text: marker,
                    indent: indent_of(lines[at]).to_string(),
                });
            }
        }
    }

    plan
}

/// Line index an anchor resolves to. Marker lines are never anchors.
fn locate(lines: &[&str], anchor: &Anchor) -> Option<usize> {
    let found = match anchor {
        Anchor::Fragment { text, occurrence } => lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !is_marker_line(l) && l.contains(text.as_str()))
            .nth(*occurrence)
            .map(|(i, _)| i),
        Anchor::Declaration => None,
    };
    found.or_else(|| declaration_line(lines))
}

const DECLARATION_KEYWORDS: [&str; 4] = ["class ", "interface ", "enum ", "record "];

/// First type declaration line that opens its body on the same line.
fn declaration_line(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|l| {
        !is_marker_line(l)
            && l.contains('{')
            && DECLARATION_KEYWORDS.iter().any(|k| l.contains(k))
    })
}

/// Equivalent marker in the window above `at`, in the file or already planned.
///
/// The window is `window` lines, stretched over a contiguous marker block
/// directly above the anchor.
fn already_present(lines: &[&str], planned: &[Insertion], at: usize, marker: &str, window: usize) -> bool {
    let mut top = at;
    while top > 0 && is_marker_line(lines[top - 1]) {
        top -= 1;
    }
    let lo = top.min(at.saturating_sub(window));
    let in_file = lines[lo..at].iter().any(|l| l.trim() == marker);
    let in_plan = planned
        .iter()
        .any(|p| (lo..=at).contains(&p.before) && p.text == marker);
    in_file || in_plan
}

fn indent_of(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

/// Splice `insertions` into `text`. Insertions for the same line keep plan order.
pub fn materialize(text: &str, insertions: &[Insertion]) -> String {
    if insertions.is_empty() {
        return text.to_string();
    }
    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut by_line: HashMap<usize, Vec<&Insertion>> = HashMap::new();
    for ins in insertions {
        by_line.entry(ins.before).or_default().push(ins);
    }

    let extra: usize = insertions
        .iter()
        .map(|i| i.indent.len() + i.text.len() + eol.len())
        .sum();
    let mut out = String::with_capacity(text.len() + extra);
    for (idx, line) in text.split_inclusive('\n').enumerate() {
        if let Some(list) = by_line.get(&idx) {
            for ins in list {
                out.push_str(&ins.indent);
                out.push_str(&ins.text);
                out.push_str(eol);
            }
        }
        out.push_str(line);
    }
    out
}
