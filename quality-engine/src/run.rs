//! Pipeline orchestration: unit list → ordered [`UnitEvaluation`]s.
//!
//! Units are independent, so they are processed by a bounded pool
//! (`buffered(workers)`): at most `workers` units are in flight, results come
//! back in input order regardless of completion order. File reads run on the
//! async runtime with a per-file timeout; inspection and evaluation are CPU-bound
//! and go to `spawn_blocking`.
//!
//! Cancellation is cooperative: the token is checked before each unit starts.
//! Units already in flight finish; the rest are skipped and the run is marked
//! `cancelled`. Nothing partial is ever written by this module.

use crate::{
    config::model::{AuditConfig, Limits},
    core::{
        classify::classify,
        evaluate::evaluate_unit,
        inspect::{Inspector, InspectContext, TextInspector},
        resolve::{read_unit_list, resolve, test_candidates},
    },
    errors::Result,
    model::{outcome::UnitEvaluation, unit::SourceStatus},
};
use futures::stream::{self, StreamExt};
use std::{path::Path, pin::pin, sync::Arc, time::Duration};
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Progress is logged every this many units.
const PROGRESS_EVERY: usize = 50;

/// Shared, read-only state of one run.
#[derive(Clone)]
pub struct AuditContext {
    pub config: Arc<AuditConfig>,
    pub inspector: Arc<dyn Inspector>,
    pub cancel: CancellationToken,
}

impl AuditContext {
    /// Context with the text inspector and a fresh cancellation token.
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config: Arc::new(config),
            inspector: Arc::new(TextInspector),
            cancel: CancellationToken::new(),
        }
    }
}

/// Result of [`evaluate_all`].
#[derive(Debug, Clone)]
pub struct AuditRun {
    /// One evaluation per processed unit, in input order.
    pub evaluations: Vec<UnitEvaluation>,
    /// Number of identifiers handed to the run.
    pub requested: usize,
    /// The token fired before every unit was processed.
    pub cancelled: bool,
}

impl AuditRun {
    pub fn skipped(&self) -> usize {
        self.requested - self.evaluations.len()
    }
}

/// Read the unit list (optionally truncated to the first `sample` entries) and
/// evaluate it. Fails only when the list itself cannot be read.
pub async fn run_audit(input: &Path, sample: Option<usize>, ctx: &AuditContext) -> Result<AuditRun> {
    let mut ids = read_unit_list(input)?;
    if let Some(n) = sample {
        ids.truncate(n);
        info!(sample = n, "sampling unit list");
    }
    Ok(evaluate_all(ids, ctx).await)
}

/// Resolve, classify, inspect and evaluate every identifier.
///
/// Per-unit problems (missing file, unreadable file, timeout, panicking inspector)
/// become data on the evaluation and never abort the run.
#[tracing::instrument(level = "info", skip_all, fields(units = ids.len(), workers = ctx.config.workers))]
pub async fn evaluate_all(ids: Vec<String>, ctx: &AuditContext) -> AuditRun {
    let requested = ids.len();
    let workers = ctx.config.workers.max(1);

    let results = stream::iter(ids.into_iter().enumerate())
        .map(|(index, id)| {
            let ctx = ctx.clone();
            async move {
                if ctx.cancel.is_cancelled() {
                    return None;
                }
                Some(process_unit(index, &id, &ctx).await)
            }
        })
        .buffered(workers);
    let mut results = pin!(results);

    let mut evaluations = Vec::with_capacity(requested);
    let mut cancelled = false;
    while let Some(next) = results.next().await {
        match next {
            Some(eval) => {
                evaluations.push(eval);
                if evaluations.len() % PROGRESS_EVERY == 0 {
                    info!(done = evaluations.len(), total = requested, "progress");
                }
            }
            None => cancelled = true,
        }
    }

    if cancelled {
        warn!(
            done = evaluations.len(),
            skipped = requested - evaluations.len(),
            "run cancelled"
        );
    } else {
        info!(total = evaluations.len(), "evaluation finished");
    }

    AuditRun {
        evaluations,
        requested,
        cancelled,
    }
}

/// One unit, end to end. Never fails: every problem is folded into the result.
async fn process_unit(index: usize, id: &str, ctx: &AuditContext) -> UnitEvaluation {
    let cfg = Arc::clone(&ctx.config);
    let unit = resolve(id, index, &cfg.paths);
    let role = classify(&unit);
    let (source, text) = load_source(unit.location.as_deref(), &cfg.limits).await;
    let has_test = text.is_some()
        && test_candidates(&unit, &cfg.paths)
            .iter()
            .any(|p| p.is_file());

    let fallback = unit.clone();
    let inspector = Arc::clone(&ctx.inspector);
    let worker_cfg = Arc::clone(&cfg);
    let joined = task::spawn_blocking(move || {
        let facts = text.map(|t| {
            inspector.inspect(
                &t,
                &InspectContext {
                    short_name: &unit.short_name,
                    has_test,
                    field_window: worker_cfg.limits.field_window_chars,
                },
            )
        });
        evaluate_unit(unit, role, source, facts, &worker_cfg)
    })
    .await;

    match joined {
        Ok(eval) => {
            debug!(unit = %id, role = %eval.role, violations = eval.total_violations(), "evaluated");
            eval
        }
        Err(e) => {
            error!(unit = %id, error = %e, "evaluation task failed");
            let reason = format!("evaluation failed: {e}");
            evaluate_unit(fallback, role, SourceStatus::Unreadable(reason), None, &cfg)
        }
    }
}

/// Read a unit's file, honouring the size limit and the read timeout.
///
/// Returns the text only for [`SourceStatus::Present`].
pub async fn load_source(location: Option<&Path>, limits: &Limits) -> (SourceStatus, Option<String>) {
    let Some(path) = location else {
        return (SourceStatus::Absent, None);
    };
    let timeout = Duration::from_millis(limits.read_timeout_ms);

    let read = async {
        let meta = tokio::fs::metadata(path).await?;
        if meta.len() > limits.max_file_bytes {
            return Ok(Err(format!(
                "file too large ({} bytes, limit {})",
                meta.len(),
                limits.max_file_bytes
            )));
        }
        let bytes = tokio::fs::read(path).await?;
        Ok::<_, std::io::Error>(String::from_utf8(bytes).map_err(|_| "not valid UTF-8".to_string()))
    };

    let status = match tokio::time::timeout(timeout, read).await {
        Ok(Ok(Ok(text))) => return (SourceStatus::Present, Some(text)),
        Ok(Ok(Err(reason))) => reason,
        Ok(Err(e)) => e.to_string(),
        Err(_) => format!("read timed out after {} ms", limits.read_timeout_ms),
    };
    warn!(path = %path.display(), reason = %status, "source unreadable");
    (SourceStatus::Unreadable(status), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{outcome::RuleOutcome, rule::RuleId};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn ctx_for(base: &Path, workers: usize) -> AuditContext {
        let mut cfg = AuditConfig::default();
        cfg.paths.base_dir = base.to_path_buf();
        cfg.workers = workers;
        AuditContext::new(cfg)
    }

    fn write(base: &Path, id: &str, body: &str) {
        let file = base
            .join("src/main/java")
            .join(format!("{}.java", id.replace('.', "/")));
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, body).unwrap();
    }

    #[tokio::test]
    async fn keeps_input_order_with_many_workers() {
        let dir = tempfile::tempdir().unwrap();
        let ids: Vec<String> = (0..40)
            .map(|i| format!("tech.derbent.m{i}.domain.CThing{i}"))
            .collect();
        for (i, id) in ids.iter().enumerate() {
            if i % 3 != 0 {
                write(dir.path(), id, &format!("class CThing{i} {{}}\n"));
            }
        }
        let run = evaluate_all(ids.clone(), &ctx_for(dir.path(), 8)).await;
        assert!(!run.cancelled);
        let got: Vec<String> = run.evaluations.iter().map(|e| e.unit.id.clone()).collect();
        assert_eq!(got, ids);
        assert_eq!(run.evaluations[0].source, SourceStatus::Absent);
        assert_eq!(run.evaluations[1].source, SourceStatus::Present);
    }

    #[tokio::test]
    async fn cancelled_token_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_for(dir.path(), 2);
        ctx.cancel.cancel();
        let run = evaluate_all(vec!["a.b.c.domain.CX".into()], &ctx).await;
        assert!(run.cancelled);
        assert!(run.evaluations.is_empty());
        assert_eq!(run.skipped(), 1);
    }

    #[tokio::test]
    async fn oversized_file_is_unreadable_and_content_rules_are_na() {
        let dir = tempfile::tempdir().unwrap();
        let id = "tech.derbent.x.domain.CBig";
        write(dir.path(), id, &"x".repeat(64));
        let mut ctx = ctx_for(dir.path(), 1);
        let mut cfg = (*ctx.config).clone();
        cfg.limits.max_file_bytes = 16;
        ctx.config = Arc::new(cfg);

        let run = evaluate_all(vec![id.into()], &ctx).await;
        let eval = &run.evaluations[0];
        assert!(matches!(eval.source, SourceStatus::Unreadable(_)));
        assert_eq!(eval.outcome(RuleId::JavaDoc), Some(RuleOutcome::NotApplicable));
        assert_eq!(eval.outcome(RuleId::CPrefixNaming), Some(RuleOutcome::Count(0)));
    }

    #[tokio::test]
    async fn test_file_next_to_source_satisfies_unit_tests() {
        let dir = tempfile::tempdir().unwrap();
        let id = "tech.derbent.x.service.CFooService";
        write(dir.path(), id, "class CFooService {}\n");
        write(dir.path(), "tech.derbent.x.service.CFooServiceTest", "class CFooServiceTest {}\n");
        let run = evaluate_all(vec![id.into()], &ctx_for(dir.path(), 1)).await;
        assert_eq!(
            run.evaluations[0].outcome(RuleId::UnitTests),
            Some(RuleOutcome::Count(0))
        );
    }
}
