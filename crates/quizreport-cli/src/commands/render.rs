//! The `quizreport render` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizreport_core::config::{load_config_from, Labels};
use quizreport_core::mismatch::{find_mismatches, Mismatch};
use quizreport_core::model::ReportRequest;
use quizreport_core::ReportComposer;
use quizreport_render::{export, parse_formats};

pub fn execute(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output: PathBuf,
    format: String,
    english: bool,
) -> Result<()> {
    let formats = parse_formats(&format).map_err(anyhow::Error::msg)?;
    let request = ReportRequest::load(&input)?;

    let mut config = load_config_from(config_path.as_deref())?;
    if english {
        config.labels = Labels::english();
    }

    let composer = ReportComposer::new(config)?;
    let doc = composer
        .compose(&request)
        .with_context(|| format!("cannot build report from {}", input.display()))?;

    let mismatches = find_mismatches(&request.exercises, &request.answers);
    println!(
        "{}: {} / {} correct, {} mistake(s), {} page(s)",
        request.student_name,
        request.score,
        request.total_exercises,
        mismatches.len(),
        doc.page_count()
    );
    if !mismatches.is_empty() {
        print_mismatches(&mismatches);
    }

    for format in formats {
        let path = export(&doc, format, &output, &request.student_name)?;
        println!("{} report: {}", format.extension().to_uppercase(), path.display());
    }

    Ok(())
}

fn print_mismatches(mismatches: &[Mismatch<'_>]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Exercise", "Selected", "Correct"]);

    for (i, m) in mismatches.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(m.exercise.id),
            Cell::new(&m.answer.selected_connector),
            Cell::new(&m.exercise.correct_connector),
        ]);
    }

    println!("\n{table}\n");
}
