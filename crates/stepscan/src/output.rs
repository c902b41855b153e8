//! Helpers for rendering command output.
//!
//! Every report is written either as one human-readable line or, with
//! `--json`, as part of a single JSON array followed by a newline. Lines and
//! columns are 1-based in both forms.

use std::io::Write;
use std::path::Path;

use eyre::{Context, Result};
use lsp_types::Diagnostic;
use serde::Serialize;

use stepscan::handlers::CompletionCandidate;
use stepscan::indexing::{StepEntry, StepLocation};

/// One indexed step.
#[derive(Debug, Serialize)]
pub(crate) struct StepReport<'a> {
    pub keyword: &'a str,
    pub text: &'a str,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub usage_count: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub documentation: &'a str,
}

impl<'a> From<&'a StepEntry> for StepReport<'a> {
    fn from(entry: &'a StepEntry) -> Self {
        Self {
            keyword: &entry.keyword,
            text: &entry.display_text,
            file: entry.location.path.display().to_string(),
            line: entry.location.position.line + 1,
            column: entry.location.position.character + 1,
            usage_count: entry.usage_count,
            documentation: &entry.documentation,
        }
    }
}

/// One diagnostic raised for a file.
#[derive(Debug, Serialize)]
pub(crate) struct DiagnosticReport {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl DiagnosticReport {
    pub(crate) fn new(file: &Path, diagnostic: &Diagnostic) -> Self {
        Self {
            file: file.display().to_string(),
            line: diagnostic.range.start.line + 1,
            column: diagnostic.range.start.character + 1,
            message: diagnostic.message.clone(),
        }
    }
}

/// One completion candidate.
#[derive(Debug, Serialize)]
pub(crate) struct CandidateReport<'a> {
    pub label: &'a str,
    pub insert_text: &'a str,
    pub usage_rank: &'a str,
}

impl<'a> From<&'a CompletionCandidate> for CandidateReport<'a> {
    fn from(candidate: &'a CompletionCandidate) -> Self {
        Self {
            label: &candidate.label,
            insert_text: &candidate.insert_text,
            usage_rank: &candidate.sort_key,
        }
    }
}

pub(crate) fn write_step(writer: &mut dyn Write, step: &StepReport<'_>) -> Result<()> {
    writeln!(
        writer,
        "{} '{}' ({}:{}:{}) used {}",
        step.keyword, step.text, step.file, step.line, step.column, step.usage_count
    )
    .wrap_err_with(|| format!("failed to write step {} '{}'", step.keyword, step.text))
}

pub(crate) fn write_diagnostic(writer: &mut dyn Write, report: &DiagnosticReport) -> Result<()> {
    writeln!(
        writer,
        "{}:{}:{}: warning: {}",
        report.file, report.line, report.column, report.message
    )
    .wrap_err_with(|| format!("failed to write diagnostic for {}", report.file))
}

pub(crate) fn write_candidate(writer: &mut dyn Write, candidate: &CandidateReport<'_>) -> Result<()> {
    writeln!(writer, "{}\t{}", candidate.label, candidate.insert_text)
        .wrap_err_with(|| format!("failed to write completion '{}'", candidate.label))
}

pub(crate) fn write_location(writer: &mut dyn Write, location: &StepLocation) -> Result<()> {
    writeln!(
        writer,
        "{}:{}:{}",
        location.path.display(),
        location.position.line + 1,
        location.position.character + 1
    )
    .wrap_err("failed to write definition location")
}

pub(crate) fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, reports: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, reports).wrap_err("failed to serialize report to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}
