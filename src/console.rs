//! Human-readable run summary on stdout. Logs go to stderr.

use colored::Colorize;
use quality_annotator::AnnotationSummary;
use quality_engine::{
    AuditRun, QualityReport, ReportFiles, export::report::Band, model::outcome::UnitEvaluation,
    rules::rule_by_id,
};

pub fn print_run(run: &AuditRun) {
    println!(
        "{} {} of {} units evaluated",
        "audit:".bold(),
        run.evaluations.len(),
        run.requested
    );
    if run.cancelled {
        println!("{} {} units skipped", "cancelled:".yellow().bold(), run.skipped());
    }
}

pub fn print_report(report: &QualityReport, files: &ReportFiles) {
    let s = &report.summary;
    println!(
        "{} {} units x {} rules, {} violations",
        "report:".bold(),
        s.total_units,
        s.total_rules,
        s.total_violations
    );
    println!(
        "  files: {} present, {} absent, {} unreadable",
        s.files_present, s.files_absent, s.files_unreadable
    );
    for band in Band::ALL {
        let n = s.bands.get(band.key()).copied().unwrap_or_default();
        let label = format!("{:<15}", band.key());
        let label = match band {
            Band::Compliant => label.green(),
            Band::Low => label.yellow(),
            Band::Medium => label.bright_red(),
            Band::High => label.red().bold(),
            Band::NotApplicable => label.dimmed(),
            Band::ReviewNeeded => label.cyan(),
        };
        println!("  {label} {n}");
    }
    println!("  written to {}", files.out_dir.display().to_string().underline());
    println!("    {}", files.html.display());
    println!("    {}", files.matrix_jsonl.display());
    println!("    {}", files.details_jsonl.display());
    println!("    {}", files.summary_json.display());
}

/// Per-unit violation counts, by rule.
pub fn print_unit_violations(evaluations: &[UnitEvaluation]) {
    for eval in evaluations {
        let total = eval.total_violations();
        if total == 0 {
            continue;
        }
        println!("{} ({} violations)", eval.unit.id.bold(), total);
        for result in eval.results.iter().filter(|r| r.outcome.is_violation()) {
            let name = rule_by_id(result.rule).map(|r| r.name).unwrap_or("?");
            let count = result.outcome.count().unwrap_or_default();
            println!("  {name}: {count}");
        }
    }
}

pub fn print_annotation(summary: &AnnotationSummary) {
    let mode = if summary.applied {
        "applied".green().bold()
    } else {
        "dry run".yellow().bold()
    };
    println!(
        "{} [{mode}] {} violations, {} markers planned across {} files",
        "annotate:".bold(),
        summary.total_violations,
        summary.planned,
        summary.files_changed
    );

    for file in &summary.files {
        if let Some(err) = &file.error {
            println!("  {} {}: {err}", "failed".red().bold(), file.path.display());
            continue;
        }
        if file.markers.is_empty() {
            continue;
        }
        let state = if file.written { "updated" } else { "would update" };
        println!(
            "  {state} {} (+{}, {} already marked)",
            file.path.display(),
            file.markers.len(),
            file.already_marked
        );
        if !summary.applied {
            for m in &file.markers {
                println!("    line {}: {}", m.line, m.text.dimmed());
            }
        }
    }

    if summary.failed_writes > 0 {
        println!("{} {} files failed", "warning:".yellow().bold(), summary.failed_writes);
    }
    if summary.cancelled {
        println!("{} remaining files were not processed", "cancelled:".yellow().bold());
    }
}
