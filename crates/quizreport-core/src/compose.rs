//! Report composition.
//!
//! Lays out the summary header, one block per wrong answer and the footer,
//! in that order, on a fresh [`TextFlow`] per call.

use crate::config::{fill, ReportConfig};
use crate::error::ReportError;
use crate::flow::{Document, TextFlow};
use crate::measure::{HeuristicMeasurer, TextMeasurer};
use crate::mismatch::{find_mismatches, Mismatch};
use crate::model::{Exercise, FontWeight, ReportRequest, Rgb, StyledSpan, TextStyle, UserAnswer};
use crate::segment::{segment, to_spans};

const HEADER_RULE_THICKNESS: f32 = 0.3;
const EXERCISE_RULE_THICKNESS: f32 = 0.2;

/// Builds report documents with one configuration and text measurer.
#[derive(Debug, Clone)]
pub struct ReportComposer<M = HeuristicMeasurer> {
    config: ReportConfig,
    measurer: M,
}

impl ReportComposer<HeuristicMeasurer> {
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        Self::with_measurer(config, HeuristicMeasurer)
    }
}

impl<M: TextMeasurer> ReportComposer<M> {
    pub fn with_measurer(config: ReportConfig, measurer: M) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self { config, measurer })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Validate the request and lay out the full report.
    pub fn compose(&self, request: &ReportRequest) -> Result<Document, ReportError> {
        request.validate()?;

        let mut flow = TextFlow::new(self.config.layout, self.config.fonts.clone(), &self.measurer);
        self.write_header(&mut flow, request);

        let mismatches = find_mismatches(&request.exercises, &request.answers);
        tracing::info!(
            student = %request.student_name,
            answers = request.answers.len(),
            mismatches = mismatches.len(),
            "composing report"
        );

        if mismatches.is_empty() {
            let style = self.style(self.config.sizes.section, self.config.palette.success, FontWeight::Normal);
            flow.write_line(&self.config.labels.no_mistakes, style);
        } else {
            let style = self.style(self.config.sizes.section, self.config.palette.error, FontWeight::Normal);
            let count = mismatches.len().to_string();
            flow.write_line(&fill(&self.config.labels.error_header, &[("count", count.as_str())]), style);
            flow.advance(self.config.spacing.after_section_header);

            for (index, mismatch) in mismatches.iter().enumerate() {
                self.write_mismatch(&mut flow, index, mismatch);
            }
        }

        let footer = self.style(self.config.sizes.footer, self.config.palette.footer, FontWeight::Normal);
        flow.place_centered(self.config.layout.footer_y, &self.config.labels.footer, footer);

        let document = flow.finish();
        tracing::debug!(pages = document.page_count(), "report laid out");
        Ok(document)
    }

    fn write_header(&self, flow: &mut TextFlow<'_>, request: &ReportRequest) {
        let labels = &self.config.labels;
        let title = self.style(self.config.sizes.title, self.config.palette.primary, FontWeight::Normal);
        flow.write_centered(&labels.title, title);
        flow.advance(self.config.spacing.after_title);

        let score = request.score.to_string();
        let total = request.total_exercises.to_string();
        let summary = [
            fill(&labels.student, &[("name", request.student_name.as_str())]),
            fill(&labels.score, &[("score", score.as_str()), ("total", total.as_str())]),
            fill(&labels.time_spent, &[("time", request.time_spent.as_str())]),
        ];
        let style = self.style(self.config.sizes.summary, self.config.palette.summary, FontWeight::Normal);
        for line in &summary {
            flow.write_line(line, style);
            flow.advance(self.config.spacing.after_summary_line);
        }

        flow.rule(self.config.palette.header_rule, HEADER_RULE_THICKNESS);
        flow.advance(self.config.spacing.after_header_rule);
    }

    fn write_mismatch(&self, flow: &mut TextFlow<'_>, index: usize, mismatch: &Mismatch<'_>) {
        let (labels, palette, sizes, spacing) = (
            &self.config.labels,
            &self.config.palette,
            &self.config.sizes,
            &self.config.spacing,
        );
        let exercise = mismatch.exercise;

        if flow.ensure_space(spacing.exercise_block) {
            tracing::debug!(exercise = exercise.id, "exercise block moved to a new page");
        }
        let number = (index + 1).to_string();
        let title = self.style(sizes.exercise, palette.primary, FontWeight::Bold);
        flow.write_line(&fill(&labels.exercise, &[("number", number.as_str())]), title);
        flow.advance(spacing.after_exercise_title);

        self.write_sentence(
            flow,
            &labels.your_answer,
            exercise,
            &mismatch.answer.selected_connector,
            self.style(sizes.body, palette.error, FontWeight::Normal),
        );
        self.write_sentence(
            flow,
            &labels.correct_form,
            exercise,
            &exercise.correct_connector,
            self.style(sizes.body, palette.success, FontWeight::Bold),
        );

        match exercise.explanation_text() {
            Some(text) => {
                let spans = [
                    StyledSpan::new(
                        format!("{} ", labels.explanation),
                        self.style(sizes.explanation, palette.muted, FontWeight::BoldItalic),
                    ),
                    StyledSpan::new(text, self.style(sizes.explanation, palette.muted, FontWeight::Normal)),
                ];
                flow.write_inline(&spans);
                flow.advance(self.config.layout.line_height + spacing.after_explanation);
            }
            None => flow.advance(spacing.without_explanation),
        }

        flow.rule(palette.exercise_rule, EXERCISE_RULE_THICKNESS);
        flow.advance(spacing.after_exercise_rule);
    }

    /// Label line followed by the sentence with `connector` in its blanks.
    fn write_sentence(
        &self,
        flow: &mut TextFlow<'_>,
        label: &str,
        exercise: &Exercise,
        connector: &str,
        slot_style: TextStyle,
    ) {
        let body = self.style(self.config.sizes.body, self.config.palette.body, FontWeight::Normal);
        flow.ensure_space(self.config.spacing.sentence_block);
        flow.write_line(label, body);

        let spans = to_spans(&segment(&exercise.template, connector), body, slot_style);
        flow.write_inline(&spans);
        flow.advance(self.config.layout.line_height + self.config.spacing.after_sentence);
    }

    fn style(&self, size_pt: f32, color: Rgb, weight: FontWeight) -> TextStyle {
        TextStyle::new(size_pt, color, weight)
    }
}

/// Compose a report with the default configuration.
pub fn compose(
    student_name: &str,
    score: u32,
    total_exercises: u32,
    time_spent: &str,
    exercises: &[Exercise],
    answers: &[UserAnswer],
) -> Result<Document, ReportError> {
    let request = ReportRequest {
        student_name: student_name.to_string(),
        score,
        total_exercises,
        time_spent: time_spent.to_string(),
        exercises: exercises.to_vec(),
        answers: answers.to_vec(),
    };
    ReportComposer::new(ReportConfig::default())?.compose(&request)
}
