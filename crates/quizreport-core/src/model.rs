//! Core data model types for quizreport.
//!
//! Exercises and answers arrive already graded from storage and the quiz
//! session; the report engine only reads them.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Storage identifier of an exercise row.
pub type ExerciseId = i64;

/// A fill-in-the-blank connector exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier.
    pub id: ExerciseId,
    /// Sentence containing one or more blank markers (`__`, `______`, ...).
    #[serde(alias = "enunciado_incorrecto")]
    pub template: String,
    /// Correct connector; multi-blank connectors are joined with a dash.
    #[serde(alias = "conector_correcto")]
    pub correct_connector: String,
    /// Optional teaching note shown under the correction.
    #[serde(default, alias = "explicacion")]
    pub explanation: Option<String>,
    /// Candidate connectors offered during the quiz. Not used for layout.
    #[serde(default, alias = "opciones")]
    pub options: Vec<String>,
}

impl Exercise {
    /// The explanation, if it carries any visible text.
    pub fn explanation_text(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The connector a student picked for one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAnswer {
    #[serde(alias = "ejercicioId", alias = "exerciseId")]
    pub exercise_id: ExerciseId,
    #[serde(alias = "respuestaSeleccionada", alias = "selectedConnector")]
    pub selected_connector: String,
}

/// Everything `compose` needs to build one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub student_name: String,
    pub score: u32,
    pub total_exercises: u32,
    /// Elapsed time, already formatted by the caller (e.g. "04:32").
    pub time_spent: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Answers in submission order.
    #[serde(default)]
    pub answers: Vec<UserAnswer>,
}

impl ReportRequest {
    /// Check the input contract before any layout starts.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.student_name.trim().is_empty() {
            return Err(ReportError::input("student_name", "student name is empty"));
        }
        if self.score > self.total_exercises {
            return Err(ReportError::input(
                "score",
                format!(
                    "score {} exceeds total exercises {}",
                    self.score, self.total_exercises
                ),
            ));
        }

        let mut seen = HashSet::new();
        for (i, exercise) in self.exercises.iter().enumerate() {
            if !seen.insert(exercise.id) {
                return Err(ReportError::input(
                    format!("exercises[{i}].id"),
                    format!("duplicate exercise id {}", exercise.id),
                ));
            }
            if exercise.template.trim().is_empty() {
                return Err(ReportError::input(
                    format!("exercises[{i}].template"),
                    "template is empty",
                ));
            }
        }

        Ok(())
    }

    /// Load a request from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read quiz results: {}", path.display()))?;
        let format = InputFormat::from_path(path);
        Self::parse_str(&content, format)
            .with_context(|| format!("failed to parse quiz results: {}", path.display()))
    }

    /// Parse a request from a string in the given format.
    pub fn parse_str(content: &str, format: InputFormat) -> Result<Self> {
        let request = match format {
            InputFormat::Json => serde_json::from_str(content)?,
            InputFormat::Toml => toml::from_str(content)?,
        };
        Ok(request)
    }
}

/// Serialization format of a quiz result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Pick the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "toml") {
            InputFormat::Toml
        } else {
            InputFormat::Json
        }
    }
}

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Font weight and slant of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    BoldItalic,
}

/// Visual style of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub size_pt: f32,
    pub color: Rgb,
    pub weight: FontWeight,
}

impl TextStyle {
    pub fn new(size_pt: f32, color: Rgb, weight: FontWeight) -> Self {
        Self {
            size_pt,
            color,
            weight,
        }
    }
}

/// Smallest renderable unit: text with one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub text: String,
    pub style: TextStyle,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> ReportRequest {
        ReportRequest {
            student_name: "Ana".into(),
            score: 1,
            total_exercises: 2,
            time_spent: "03:10".into(),
            exercises: vec![
                Exercise {
                    id: 1,
                    template: "Hace frío __ llevo abrigo.".into(),
                    correct_connector: "por eso".into(),
                    explanation: None,
                    options: vec![],
                },
                Exercise {
                    id: 2,
                    template: "Estudió mucho, __ aprobó.".into(),
                    correct_connector: "así que".into(),
                    explanation: Some("Consecuencia.".into()),
                    options: vec![],
                },
            ],
            answers: vec![],
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn blank_student_name_is_rejected() {
        let mut req = request();
        req.student_name = "   ".into();
        let err = req.validate().unwrap_err();
        assert_eq!(err.field(), "student_name");
    }

    #[test]
    fn score_above_total_is_rejected() {
        let mut req = request();
        req.score = 3;
        assert_eq!(req.validate().unwrap_err().field(), "score");
    }

    #[test]
    fn duplicate_id_and_blank_template_name_their_index() {
        let mut req = request();
        req.exercises[1].id = 1;
        assert_eq!(req.validate().unwrap_err().field(), "exercises[1].id");

        let mut req = request();
        req.exercises[0].template = String::new();
        assert_eq!(req.validate().unwrap_err().field(), "exercises[0].template");
    }

    #[test]
    fn blank_explanation_counts_as_absent() {
        let mut ex = request().exercises.remove(0);
        ex.explanation = Some("  ".into());
        assert_eq!(ex.explanation_text(), None);
        ex.explanation = Some(" Nota ".into());
        assert_eq!(ex.explanation_text(), Some("Nota"));
    }

    #[test]
    fn parse_storage_column_names() {
        let json = r#"{
            "student_name": "Luis",
            "score": 0,
            "total_exercises": 1,
            "time_spent": "00:45",
            "exercises": [{
                "id": 7,
                "enunciado_incorrecto": "Llovía, __ salimos.",
                "conector_correcto": "sin embargo",
                "explicacion": "",
                "opciones": ["sin embargo", "porque"]
            }],
            "answers": [{ "ejercicioId": 7, "respuestaSeleccionada": "porque" }]
        }"#;
        let req = ReportRequest::parse_str(json, InputFormat::Json).unwrap();
        assert_eq!(req.exercises[0].correct_connector, "sin embargo");
        assert_eq!(req.exercises[0].options.len(), 2);
        assert_eq!(req.answers[0].exercise_id, 7);
        assert_eq!(req.answers[0].selected_connector, "porque");
    }

    #[test]
    fn parse_toml_request() {
        let toml = r#"
student_name = "Marta"
score = 1
total_exercises = 1
time_spent = "01:00"

[[exercises]]
id = 1
template = "Tengo sueño __ me acuesto."
correct_connector = "así que"

[[answers]]
exercise_id = 1
selected_connector = "así que"
"#;
        let req = ReportRequest::parse_str(toml, InputFormat::Toml).unwrap();
        assert_eq!(req.student_name, "Marta");
        assert!(req.exercises[0].explanation.is_none());
    }

    #[test]
    fn non_string_field_fails_to_parse() {
        let json = r#"{"student_name": 5, "score": 0, "total_exercises": 0, "time_spent": "0"}"#;
        assert!(ReportRequest::parse_str(json, InputFormat::Json).is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("a.toml")),
            InputFormat::Toml
        );
        assert_eq!(
            InputFormat::from_path(&PathBuf::from("a.json")),
            InputFormat::Json
        );
    }

    #[test]
    fn rgb_display_is_hex() {
        assert_eq!(Rgb(37, 99, 235).to_string(), "#2563eb");
    }
}
