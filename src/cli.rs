use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quality-matrix")]
#[command(about = "Rule-based compliance matrix and TODO-marker injection for Java source trees")]
pub struct Cli {
    /// Newline-separated list of fully qualified class identifiers.
    #[arg(long, global = true, default_value = "/tmp/quality_matrix/all_classes.txt")]
    pub input: PathBuf,

    /// YAML configuration file (defaults are used when omitted).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root the identifiers resolve against.
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Units (or files, when annotating) processed concurrently.
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Only process the first N identifiers of the list.
    #[arg(long, global = true)]
    pub sample: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the compliance matrix (read-only)
    Report {
        /// Report directory (default: `output.report_dir` from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Plan TODO markers for violations; dry run unless --apply
    Annotate {
        /// Write the markers into the source files
        #[arg(long)]
        apply: bool,
    },
    /// Report and annotate from a single evaluation pass
    Run {
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        apply: bool,
    },
}

impl Command {
    pub fn report_dir(&self) -> Option<Option<&PathBuf>> {
        match self {
            Command::Report { out } | Command::Run { out, .. } => Some(out.as_ref()),
            Command::Annotate { .. } => None,
        }
    }

    /// `Some(apply)` when the command annotates.
    pub fn annotate(&self) -> Option<bool> {
        match self {
            Command::Annotate { apply } | Command::Run { apply, .. } => Some(*apply),
            Command::Report { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_global_flags() {
        let cli = Cli::parse_from(["quality-matrix", "report", "--workers", "3"]);
        assert_eq!(cli.input, PathBuf::from("/tmp/quality_matrix/all_classes.txt"));
        assert_eq!(cli.workers, Some(3));
        assert_eq!(cli.command.report_dir(), Some(None));
        assert_eq!(cli.command.annotate(), None);
    }

    #[test]
    fn annotate_is_dry_run_unless_applied() {
        let cli = Cli::parse_from(["quality-matrix", "annotate"]);
        assert_eq!(cli.command.annotate(), Some(false));
        let cli = Cli::parse_from(["quality-matrix", "run", "--apply", "--out", "r"]);
        assert_eq!(cli.command.annotate(), Some(true));
        assert_eq!(cli.command.report_dir(), Some(Some(&PathBuf::from("r"))));
    }
}
