//! Report configuration: page geometry, palette, fonts, spacing and labels.
//!
//! Every field has a default, so a config file only needs to list what it
//! overrides. Lengths are millimetres, font sizes are points.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::{FontWeight, Rgb};

/// Top-level report configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub layout: LayoutConfig,
    pub palette: Palette,
    pub fonts: FontSet,
    pub sizes: FontSizes,
    pub spacing: Spacing,
    pub labels: Labels,
}

impl ReportConfig {
    /// Reject geometry that cannot lay out a single line.
    pub fn validate(&self) -> Result<(), ReportError> {
        self.layout.validate()?;

        let sizes = [
            ("sizes.title", self.sizes.title),
            ("sizes.summary", self.sizes.summary),
            ("sizes.section", self.sizes.section),
            ("sizes.exercise", self.sizes.exercise),
            ("sizes.body", self.sizes.body),
            ("sizes.explanation", self.sizes.explanation),
            ("sizes.footer", self.sizes.footer),
        ];
        for (field, size) in sizes {
            if !(size > 0.0) {
                return Err(ReportError::config(field, "font size must be positive"));
            }
        }

        if self.spacing.exercise_block > self.layout.content_height() {
            return Err(ReportError::config(
                "spacing.exercise_block",
                "exercise block is taller than the page content area",
            ));
        }

        Ok(())
    }
}

/// Page geometry for one layout session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Baseline of the first line on every page.
    pub margin_top: f32,
    /// Distance from the page bottom that flowed text must not cross.
    pub margin_bottom: f32,
    pub line_height: f32,
    /// Baseline of the footer line, measured from the page top.
    pub footer_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        // A4 portrait.
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_left: 20.0,
            margin_right: 20.0,
            margin_top: 20.0,
            margin_bottom: 22.0,
            line_height: 6.0,
            footer_y: 290.0,
        }
    }
}

impl LayoutConfig {
    /// Rightmost x a line may reach.
    pub fn right_limit(&self) -> f32 {
        self.page_width - self.margin_right
    }

    /// Lowest baseline flowed text may use.
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    pub fn content_width(&self) -> f32 {
        self.right_limit() - self.margin_left
    }

    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.margin_top
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if !(self.page_width > 0.0) {
            return Err(ReportError::config("layout.page_width", "must be positive"));
        }
        if !(self.page_height > 0.0) {
            return Err(ReportError::config("layout.page_height", "must be positive"));
        }
        if self.margin_left < 0.0 || self.margin_right < 0.0 {
            return Err(ReportError::config("layout.margin_left", "margins must not be negative"));
        }
        if !(self.content_width() > 0.0) {
            return Err(ReportError::config(
                "layout.margin_right",
                "left and right margins leave no room for text",
            ));
        }
        if !(self.line_height > 0.0) {
            return Err(ReportError::config("layout.line_height", "must be positive"));
        }
        if self.content_height() < self.line_height {
            return Err(ReportError::config(
                "layout.margin_bottom",
                "top and bottom margins leave no room for a line",
            ));
        }
        if self.footer_y > self.page_height {
            return Err(ReportError::config("layout.footer_y", "footer lies below the page"));
        }
        Ok(())
    }
}

/// Report colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Title and exercise headings.
    pub primary: Rgb,
    /// Student summary lines.
    pub summary: Rgb,
    /// Sentence text and labels.
    pub body: Rgb,
    /// Explanations.
    pub muted: Rgb,
    pub error: Rgb,
    pub success: Rgb,
    /// Rule under the summary.
    pub header_rule: Rgb,
    /// Rule between exercises.
    pub exercise_rule: Rgb,
    pub footer: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb(37, 99, 235),
            summary: Rgb(51, 65, 85),
            body: Rgb(71, 85, 105),
            muted: Rgb(100, 116, 139),
            error: Rgb(220, 38, 38),
            success: Rgb(22, 163, 74),
            header_rule: Rgb(226, 232, 240),
            exercise_rule: Rgb(241, 245, 249),
            footer: Rgb(148, 163, 184),
        }
    }
}

/// Font face names per weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSet {
    pub regular: String,
    pub bold: String,
    pub bold_italic: String,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            regular: "Helvetica".into(),
            bold: "Helvetica-Bold".into(),
            bold_italic: "Helvetica-BoldOblique".into(),
        }
    }
}

impl FontSet {
    pub fn name(&self, weight: FontWeight) -> &str {
        match weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
            FontWeight::BoldItalic => &self.bold_italic,
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub summary: f32,
    pub section: f32,
    pub exercise: f32,
    pub body: f32,
    pub explanation: f32,
    pub footer: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 22.0,
            summary: 12.0,
            section: 14.0,
            exercise: 11.0,
            body: 11.0,
            explanation: 10.0,
            footer: 9.0,
        }
    }
}

/// Extra vertical gaps (on top of the line height) between report blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub after_title: f32,
    pub after_summary_line: f32,
    pub after_header_rule: f32,
    pub after_section_header: f32,
    pub after_exercise_title: f32,
    pub after_sentence: f32,
    pub after_explanation: f32,
    pub without_explanation: f32,
    pub after_exercise_rule: f32,
    /// Room required before an exercise title may start on the current page.
    pub exercise_block: f32,
    /// Room required before a sentence label may start on the current page.
    pub sentence_block: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_title: 14.0,
            after_summary_line: 4.0,
            after_header_rule: 10.0,
            after_section_header: 9.0,
            after_exercise_title: 2.0,
            after_sentence: 4.0,
            after_explanation: 4.0,
            without_explanation: 6.0,
            after_exercise_rule: 8.0,
            exercise_block: 45.0,
            sentence_block: 15.0,
        }
    }
}

/// User-facing strings. `{name}`-style placeholders are filled by the composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub title: String,
    /// Placeholder: `{name}`.
    pub student: String,
    /// Placeholders: `{score}`, `{total}`.
    pub score: String,
    /// Placeholder: `{time}`.
    pub time_spent: String,
    pub no_mistakes: String,
    /// Placeholder: `{count}`.
    pub error_header: String,
    /// Placeholder: `{number}`.
    pub exercise: String,
    pub your_answer: String,
    pub correct_form: String,
    pub explanation: String,
    pub footer: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Reporte: Reto de Conectores Lógicos".into(),
            student: "Estudiante: {name}".into(),
            score: "Puntuación: {score} / {total}".into(),
            time_spent: "Tiempo invertido: {time}".into(),
            no_mistakes: "¡Excelente trabajo! No tuviste ningún error.".into(),
            error_header: "Análisis de Errores ({count}):".into(),
            exercise: "Ejercicio {number}:".into(),
            your_answer: "Tu respuesta (incorrecta):".into(),
            correct_form: "Forma correcta:".into(),
            explanation: "Nota pedagógica:".into(),
            footer: "Generado automáticamente por quizreport".into(),
        }
    }
}

impl Labels {
    /// English label set.
    pub fn english() -> Self {
        Self {
            title: "Report: Logical Connectors Challenge".into(),
            student: "Student: {name}".into(),
            score: "Score: {score} / {total}".into(),
            time_spent: "Time spent: {time}".into(),
            no_mistakes: "Great job! You made no mistakes.".into(),
            error_header: "Error analysis ({count})".into(),
            exercise: "Exercise {number}:".into(),
            your_answer: "Your answer (incorrect):".into(),
            correct_form: "Correct form:".into(),
            explanation: "Teaching note:".into(),
            footer: "Generated automatically by quizreport".into(),
        }
    }
}

/// Substitute `{key}` placeholders in a label.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

/// Load configuration from an explicit path, or search well-known paths.
///
/// An explicit path must exist. Without one, the search order is:
/// 1. `quizreport.toml` in the current directory
/// 2. `~/.config/quizreport/config.toml`
///
/// Environment variable override: `QUIZREPORT_FOOTER` replaces the footer label.
pub fn load_config_from(path: Option<&Path>) -> Result<ReportConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizreport.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded report config from {}", path.display());
            toml::from_str::<ReportConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ReportConfig::default(),
    };

    if let Ok(footer) = std::env::var("QUIZREPORT_FOOTER") {
        config.labels.footer = footer;
    }

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizreport"))
}
