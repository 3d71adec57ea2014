//! quizreport-render — Exporters for laid-out quiz reports.
//!
//! Turns a [`Document`] produced by `quizreport-core` into a PDF, a JSON
//! layout dump, or a plain-text rendering.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use quizreport_core::flow::Document;
use quizreport_core::naming::export_file_name;

pub mod pdf;
pub mod text;

/// Output format of an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Json,
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Json, ExportFormat::Text];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            "txt" | "text" => Ok(ExportFormat::Text),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Parse a comma-separated format list; `all` selects every format.
pub fn parse_formats(list: &str) -> Result<Vec<ExportFormat>, String> {
    if list.trim().eq_ignore_ascii_case("all") {
        return Ok(ExportFormat::ALL.to_vec());
    }
    let mut formats = Vec::new();
    for part in list.split(',') {
        let format: ExportFormat = part.parse()?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}

/// Export a document into `dir` under the student's report file name.
///
/// Returns the path written.
pub fn export(
    doc: &Document,
    format: ExportFormat,
    dir: &Path,
    student_name: &str,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(student_name, format.extension()));
    match format {
        ExportFormat::Pdf => pdf::write_pdf_report(doc, &path),
        ExportFormat::Json => doc.save_json(&path),
        ExportFormat::Text => text::write_text_report(doc, &path),
    }
    .with_context(|| format!("failed to export {format} report to {}", path.display()))?;
    tracing::info!(%format, path = %path.display(), "exported report");
    Ok(path)
}
