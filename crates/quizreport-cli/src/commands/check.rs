//! The `quizreport check` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizreport_core::mismatch::find_mismatches;
use quizreport_core::model::ReportRequest;

pub fn execute(input: PathBuf) -> Result<()> {
    let request = ReportRequest::load(&input)?;
    request
        .validate()
        .with_context(|| format!("invalid quiz results in {}", input.display()))?;

    let ids: HashSet<_> = request.exercises.iter().map(|e| e.id).collect();
    let known = request
        .answers
        .iter()
        .filter(|a| ids.contains(&a.exercise_id))
        .count();
    let mismatches = find_mismatches(&request.exercises, &request.answers);

    println!(
        "Student: {} ({} / {})",
        request.student_name, request.score, request.total_exercises
    );
    println!("  {} exercise(s), {} answer(s)", request.exercises.len(), request.answers.len());
    if known < request.answers.len() {
        println!(
            "  WARNING: {} answer(s) reference unknown exercises",
            request.answers.len() - known
        );
    }
    println!("  {} mistake(s)", mismatches.len());
    println!("Input valid.");

    Ok(())
}
