//! Persist every report artifact into one output directory.
//!
//! Layout:
//!   out_dir/
//!     quality_matrix.html
//!     matrix.jsonl
//!     details.jsonl
//!     summary.json
//!
//! The directory is created when missing; existing artifacts are overwritten.

use crate::{
    errors::Result,
    export::{
        html::write_html,
        jsonl::{write_details_jsonl, write_matrix_jsonl},
        report::{QualityReport, ReportSummary},
    },
};
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

/// Paths of the written artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFiles {
    pub out_dir: PathBuf,
    pub html: PathBuf,
    pub matrix_jsonl: PathBuf,
    pub details_jsonl: PathBuf,
    pub summary_json: PathBuf,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    #[serde(flatten)]
    summary: &'a ReportSummary,
    files: &'a ReportFiles,
}

/// Write all artifacts for `report` into `out_dir`.
#[tracing::instrument(level = "info", skip_all, fields(out_dir = %out_dir.display()))]
pub fn save_all(out_dir: &Path, report: &QualityReport) -> Result<ReportFiles> {
    fs::create_dir_all(out_dir)?;

    let files = ReportFiles {
        out_dir: out_dir.to_path_buf(),
        html: out_dir.join("quality_matrix.html"),
        matrix_jsonl: out_dir.join("matrix.jsonl"),
        details_jsonl: out_dir.join("details.jsonl"),
        summary_json: out_dir.join("summary.json"),
    };

    write_html(&files.html, report)?;
    write_matrix_jsonl(&files.matrix_jsonl, report)?;
    write_details_jsonl(&files.details_jsonl, &report.details)?;

    {
        let f = fs::File::create(&files.summary_json)?;
        let mut w = BufWriter::new(f);
        let doc = SummaryDocument {
            summary: &report.summary,
            files: &files,
        };
        serde_json::to_writer_pretty(&mut w, &doc)?;
        w.flush()?;
    }

    info!(
        units = report.summary.total_units,
        violations = report.summary.total_violations,
        "report: all artifacts written"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Limits;

    #[test]
    fn writes_all_four_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/report");
        let report = QualityReport::build(&[], &Limits::default());
        let files = save_all(&out, &report).unwrap();

        for p in [&files.html, &files.matrix_jsonl, &files.details_jsonl, &files.summary_json] {
            assert!(p.is_file(), "{} missing", p.display());
        }
        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files.summary_json).unwrap()).unwrap();
        assert_eq!(summary["total_units"], 0);
        assert!(summary["files"]["html"].is_string());
    }
}
