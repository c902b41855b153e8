//! Command dispatch for the `stepscan` binary.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, bail};
use tracing::info;

use stepscan::config::LogLevel;
use stepscan::discovery::Workspace;
use stepscan::handlers::{complete, resolve_definition, validate_document};
use stepscan::indexing::StepIndex;

use crate::output::{
    CandidateReport, DiagnosticReport, StepReport, write_candidate, write_diagnostic, write_json,
    write_location, write_step,
};

/// Index step definitions and check Gherkin feature files against them.
#[derive(Parser, Debug)]
#[command(name = "stepscan", version, about)]
pub(crate) struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Workspace root that configured globs are relative to.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,
    /// Settings file; defaults to `.vscode/settings.json` under the root.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// List indexed step definitions.
    Steps(StepsArgs),
    /// Report feature lines that match no step definition.
    Check(CheckArgs),
    /// Print where the step on a feature line is defined.
    Definition(LineArgs),
    /// List completions for a feature line.
    Complete(CompleteArgs),
}

#[derive(Args, Debug)]
pub(crate) struct StepsArgs {
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Feature files to check; defaults to the `syncfeatures` glob.
    pub files: Vec<PathBuf>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LineArgs {
    /// Feature file containing the line.
    pub file: PathBuf,
    /// 1-based line number.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,
}

#[derive(Args, Debug)]
pub(crate) struct CompleteArgs {
    #[command(flatten)]
    pub target: LineArgs,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Whether a command found what it was asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Clean,
    Findings,
}

pub(crate) fn run(command: &Commands, workspace: &Workspace) -> Result<Outcome> {
    let index = workspace
        .build_index()
        .wrap_err("failed to build step index")?;
    match command {
        Commands::Steps(args) => handle_steps(&index, args),
        Commands::Check(args) => handle_check(&index, workspace, args),
        Commands::Definition(args) => handle_definition(&index, args),
        Commands::Complete(args) => handle_complete(&index, workspace, args),
    }
}

fn handle_steps(index: &StepIndex, args: &StepsArgs) -> Result<Outcome> {
    let reports: Vec<StepReport<'_>> = index.entries().iter().map(StepReport::from).collect();
    let mut stdout = io::stdout();
    if args.json {
        write_json(&mut stdout, &reports)?;
    } else {
        reports
            .iter()
            .try_for_each(|report| write_step(&mut stdout, report))?;
    }
    stdout
        .flush()
        .wrap_err("failed to flush step listing to stdout")?;
    Ok(Outcome::Clean)
}

fn handle_check(index: &StepIndex, workspace: &Workspace, args: &CheckArgs) -> Result<Outcome> {
    let files = if args.files.is_empty() {
        workspace
            .feature_files()
            .wrap_err("failed to expand feature glob")?
    } else {
        args.files.clone()
    };

    let mut reports = Vec::new();
    if let Some(settings_path) = &workspace.settings_path {
        reports.extend(
            workspace
                .configuration_diagnostics()
                .iter()
                .map(|diagnostic| DiagnosticReport::new(settings_path, diagnostic)),
        );
    }
    let mut unmatched = 0usize;
    for file in &files {
        let document = read_document(file)?;
        for diagnostic in validate_document(index, &document) {
            unmatched += 1;
            reports.push(DiagnosticReport::new(file, &diagnostic));
        }
    }
    info!(files = files.len(), unmatched, "checked feature files");

    let mut stdout = io::stdout();
    if args.json {
        write_json(&mut stdout, &reports)?;
    } else {
        reports
            .iter()
            .try_for_each(|report| write_diagnostic(&mut stdout, report))?;
    }
    stdout
        .flush()
        .wrap_err("failed to flush check results to stdout")?;
    Ok(if unmatched == 0 {
        Outcome::Clean
    } else {
        Outcome::Findings
    })
}

fn handle_definition(index: &StepIndex, args: &LineArgs) -> Result<Outcome> {
    let document = read_document(&args.file)?;
    let line = line_at(&document, args.line)?;
    let Some(location) = resolve_definition(index, line, &document) else {
        info!(file = %args.file.display(), line = args.line, "no definition found");
        return Ok(Outcome::Findings);
    };
    let mut stdout = io::stdout();
    write_location(&mut stdout, &location)?;
    stdout
        .flush()
        .wrap_err("failed to flush definition to stdout")?;
    Ok(Outcome::Clean)
}

fn handle_complete(
    index: &StepIndex,
    workspace: &Workspace,
    args: &CompleteArgs,
) -> Result<Outcome> {
    let document = read_document(&args.target.file)?;
    let line = line_at(&document, args.target.line)?;
    let options = workspace.settings.index_options();
    let candidates =
        complete(index, &options, line, args.target.line - 1, &document).unwrap_or_default();
    let reports: Vec<CandidateReport<'_>> =
        candidates.iter().map(CandidateReport::from).collect();

    let mut stdout = io::stdout();
    if args.json {
        write_json(&mut stdout, &reports)?;
    } else {
        reports
            .iter()
            .try_for_each(|report| write_candidate(&mut stdout, report))?;
    }
    stdout
        .flush()
        .wrap_err("failed to flush completions to stdout")?;
    Ok(Outcome::Clean)
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}

/// The text of 1-based line `number`.
fn line_at(document: &str, number: u32) -> Result<&str> {
    let Some((_, line)) = (1u32..).zip(document.lines()).find(|(n, _)| *n == number) else {
        bail!("line {number} is past the end of the file");
    };
    Ok(line)
}
