//! Detection of wrong answers.

use std::collections::HashMap;

use crate::model::{Exercise, ExerciseId, UserAnswer};

/// A wrong answer paired with the exercise it answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch<'a> {
    pub exercise: &'a Exercise,
    pub answer: &'a UserAnswer,
}

/// Collect the answers whose connector differs from the correct one.
///
/// Keeps the order of `answers`. Comparison is exact and case-sensitive.
/// Answers that reference an unknown exercise are skipped.
pub fn find_mismatches<'a>(exercises: &'a [Exercise], answers: &'a [UserAnswer]) -> Vec<Mismatch<'a>> {
    let by_id: HashMap<ExerciseId, &Exercise> = exercises.iter().map(|e| (e.id, e)).collect();

    answers
        .iter()
        .filter_map(|answer| match by_id.get(&answer.exercise_id) {
            Some(exercise) => Some((*exercise, answer)),
            None => {
                tracing::warn!(
                    exercise_id = answer.exercise_id,
                    "answer references an unknown exercise, skipping"
                );
                None
            }
        })
        .filter(|(exercise, answer)| answer.selected_connector != exercise.correct_connector)
        .map(|(exercise, answer)| Mismatch { exercise, answer })
        .collect()
}
