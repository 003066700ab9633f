//! Annotation Injector: writes `// TODO: [...]` markers above violating code.
//!
//! - Dry run by default; files are only touched when `apply` is set.
//! - One task per file, bounded by a `tokio::Semaphore`, work in `spawn_blocking`.
//! - Idempotent: a marker is never inserted when an equivalent one is nearby.
//! - Atomic: files are replaced via a temporary file in the same directory.
//! - A failing file is reported and skipped; the other files are unaffected.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use quality_engine::{config::model::Limits, model::outcome::UnitEvaluation};
use serde::Serialize;
use tokio::{
    sync::Semaphore,
    task::{self, JoinHandle},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub mod plan;
pub mod suggest;
pub mod write;

use errors::{AnnotateError, Result};
use plan::{Insertion, PlanLimits, materialize, plan_insertions};

/// How the injector runs.
#[derive(Debug, Clone, Copy)]
pub struct AnnotateOptions {
    /// Write files; otherwise only report what would change.
    pub apply: bool,
    pub workers: usize,
    pub limits: PlanLimits,
}

impl AnnotateOptions {
    pub fn new(apply: bool, workers: usize, limits: &Limits) -> Self {
        Self {
            apply,
            workers,
            limits: PlanLimits {
                window_lines: limits.marker_window_lines,
                max_per_rule: limits.max_markers_per_rule,
            },
        }
    }
}

/// Marker planned for (or written to) one file.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMarker {
    /// 1-based line of the anchor in the file as it was read.
    pub line: usize,
    pub text: String,
}

/// Outcome for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnnotation {
    pub path: PathBuf,
    /// Units backed by this file, in first-seen order.
    pub units: Vec<String>,
    pub violations: usize,
    pub markers: Vec<PlannedMarker>,
    pub already_marked: usize,
    pub unanchored: usize,
    /// The file was rewritten.
    pub written: bool,
    pub error: Option<String>,
}

impl FileAnnotation {
    /// Empty record for a file group, before any work is done.
    fn for_group(group: &FileGroup) -> Self {
        Self {
            path: group.path.clone(),
            units: group.evaluations.iter().map(|e| e.unit.id.clone()).collect(),
            violations: group.evaluations.iter().map(|e| e.total_violations()).sum(),
            markers: Vec::new(),
            already_marked: 0,
            unanchored: 0,
            written: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnnotationSummary {
    pub applied: bool,
    pub total_violations: usize,
    /// Markers planned across all files.
    pub planned: usize,
    /// Files that would change (dry run) or did change (apply).
    pub files_changed: usize,
    pub failed_writes: usize,
    pub cancelled: bool,
    /// Files in first-seen order.
    pub files: Vec<FileAnnotation>,
}

impl AnnotationSummary {
    fn record(&mut self, file: FileAnnotation) {
        self.total_violations += file.violations;
        self.planned += file.markers.len();
        if file.error.is_some() {
            self.failed_writes += 1;
        } else if !file.markers.is_empty() {
            self.files_changed += 1;
        }
        self.files.push(file);
    }
}

/// Evaluations sharing one backing file.
struct FileGroup {
    path: PathBuf,
    evaluations: Vec<UnitEvaluation>,
}

/// Group evaluations with a backing file by path, keeping first-seen order.
fn group_by_file(evaluations: &[UnitEvaluation]) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();
    for eval in evaluations {
        let Some(path) = eval.unit.location.as_ref() else {
            continue;
        };
        match index.get(path) {
            Some(&i) => groups[i].evaluations.push(eval.clone()),
            None => {
                index.insert(path.clone(), groups.len());
                groups.push(FileGroup {
                    path: path.clone(),
                    evaluations: vec![eval.clone()],
                });
            }
        }
    }
    groups
}

/// Plan (and with `apply`, write) markers for every file touched by `evaluations`.
///
/// Never fails as a whole: a file that cannot be read, written or processed is
/// recorded with its error and counted in `failed_writes`.
#[instrument(skip_all, fields(units = evaluations.len(), apply = opts.apply, workers = opts.workers))]
pub async fn annotate_all(
    evaluations: &[UnitEvaluation],
    opts: AnnotateOptions,
    cancel: &CancellationToken,
) -> AnnotationSummary {
    let groups = group_by_file(evaluations);
    info!(files = groups.len(), "annotate: files to inspect");

    let sem = Arc::new(Semaphore::new(opts.workers.max(1)));
    let mut tasks = Vec::with_capacity(groups.len());
    let mut cancelled = false;

    for group in groups {
        if cancel.is_cancelled() {
            cancelled = true;
            break;
        }
        let acquired = tokio::select! {
            p = sem.clone().acquire_owned() => p.ok(),
            _ = cancel.cancelled() => None,
        };
        let Some(permit) = acquired else {
            cancelled = true;
            break;
        };
        let pending = FileAnnotation::for_group(&group);
        let handle = task::spawn_blocking(move || {
            let _span = tracing::info_span!("annotate_file", path = %group.path.display()).entered();
            let res = annotate_file(&group, opts);
            drop(permit);
            res
        });
        tasks.push((handle, pending));
    }

    let mut summary = AnnotationSummary {
        applied: opts.apply,
        cancelled,
        ..AnnotationSummary::default()
    };
    for (handle, pending) in tasks {
        summary.record(join_file(handle, pending).await);
    }

    if cancelled {
        warn!(done = summary.files.len(), "annotate: cancelled");
    }
    info!(
        planned = summary.planned,
        files_changed = summary.files_changed,
        failed = summary.failed_writes,
        applied = opts.apply,
        "annotate: finished"
    );
    summary
}

/// Wait for a per-file task; a task that panicked becomes a failed file.
async fn join_file(handle: JoinHandle<FileAnnotation>, pending: FileAnnotation) -> FileAnnotation {
    match handle.await {
        Ok(file) => file,
        Err(e) => {
            error!(path = %pending.path.display(), error = %e, "annotate: file task failed");
            FileAnnotation {
                error: Some(format!("annotation task failed: {e}")),
                ..pending
            }
        }
    }
}

/// Read, plan and optionally rewrite one file (runs inside `spawn_blocking`).
fn annotate_file(group: &FileGroup, opts: AnnotateOptions) -> FileAnnotation {
    let mut out = FileAnnotation::for_group(group);

    let text = match fs::read_to_string(&group.path) {
        Ok(t) => t,
        Err(e) => {
            let err = AnnotateError::io(&group.path, e);
            error!(error = %err, "annotate: read failed");
            out.error = Some(err.to_string());
            return out;
        }
    };

    let refs: Vec<&UnitEvaluation> = group.evaluations.iter().collect();
    let plan = plan_insertions(&text, &refs, opts.limits);
    out.already_marked = plan.already_marked;
    out.unanchored = plan.unanchored;
    out.markers = plan.insertions.iter().map(planned_marker).collect();
    debug!(
        planned = plan.insertions.len(),
        already_marked = plan.already_marked,
        unanchored = plan.unanchored,
        "annotate: planned"
    );

    if plan.is_empty() || !opts.apply {
        return out;
    }
    match apply_plan(&group.path, &text, &plan.insertions) {
        Ok(()) => {
            out.written = true;
            info!(markers = plan.insertions.len(), "annotate: file updated");
        }
        Err(e) => {
            error!(error = %e, "annotate: write failed");
            out.error = Some(e.to_string());
        }
    }
    out
}

fn apply_plan(path: &Path, text: &str, insertions: &[Insertion]) -> Result<()> {
    let updated = materialize(text, insertions);
    write::write_atomic(path, &updated)
}

fn planned_marker(ins: &Insertion) -> PlannedMarker {
    PlannedMarker {
        line: ins.before + 1,
        text: ins.text.clone(),
    }
}
