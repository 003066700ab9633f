mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use quality_annotator::{AnnotateOptions, annotate_all};
use quality_engine::{AuditConfig, AuditContext, QualityReport, config, export::save_all::save_all, run_audit};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the shell.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,quality_engine=info,quality_annotator=info"))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    info!(
        input = %cli.input.display(),
        base_dir = %cfg.paths.base_dir.display(),
        workers = cfg.workers,
        "starting"
    );

    let ctx = AuditContext::new(cfg);
    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight work");
            cancel.cancel();
        }
    });

    let run = run_audit(&cli.input, cli.sample, &ctx)
        .await
        .with_context(|| format!("failed to audit units listed in {}", cli.input.display()))?;
    console::print_run(&run);

    if let Some(out) = cli.command.report_dir() {
        let out_dir = out.cloned().unwrap_or_else(|| ctx.config.output.report_dir.clone());
        let report = QualityReport::build(&run.evaluations, &ctx.config.limits);
        let files = save_all(&out_dir, &report)
            .with_context(|| format!("failed to write report to {}", out_dir.display()))?;
        console::print_report(&report, &files);
    }

    if let Some(apply) = cli.command.annotate() {
        console::print_unit_violations(&run.evaluations);
        let opts = AnnotateOptions::new(apply, ctx.config.workers, &ctx.config.limits);
        let summary = annotate_all(&run.evaluations, opts, &ctx.cancel).await;
        console::print_annotation(&summary);
    }

    Ok(())
}

/// Defaults, YAML, environment, then CLI flags; validated last.
fn load_config(cli: &Cli) -> Result<AuditConfig> {
    let mut cfg = config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = &cli.base_dir {
        cfg.paths.base_dir = dir.clone();
    }
    if let Some(n) = cli.workers {
        cfg.workers = n;
    }
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}
