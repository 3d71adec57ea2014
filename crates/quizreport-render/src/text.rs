use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use quizreport_core::flow::Document;

/// Width of the plain-text rendering of a horizontal rule.
const RULE_WIDTH: usize = 60;

/// Generate a plain-text rendering of a document, one section per page.
///
/// Lines and rules keep their vertical order; styling is dropped.
pub fn generate_text(doc: &Document) -> String {
    let mut out = String::new();
    let total = doc.page_count();

    for (i, page) in doc.pages.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "--- Page {} / {} ---", i + 1, total);

        let mut rows: Vec<(f32, String)> = page
            .lines()
            .into_iter()
            .map(|line| {
                let joined: String = line.iter().map(|t| t.text.as_str()).collect();
                (line[0].y, joined.trim_end().to_string())
            })
            .collect();
        rows.extend(page.rules().map(|rule| (rule.y, "-".repeat(RULE_WIDTH))));
        // Stable sort keeps text ahead of a rule drawn on the same baseline.
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, row) in rows {
            out.push_str(&row);
            out.push('\n');
        }
    }

    out
}

/// Write a plain-text report to a file.
pub fn write_text_report(doc: &Document, path: &Path) -> Result<()> {
    let text = generate_text(doc);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}
