//! Text width measurement.
//!
//! The flow engine only needs widths, so measurement sits behind a trait and
//! callers with real font metrics can plug them in.

use crate::model::{FontWeight, TextStyle};

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Measures the rendered width of text in layout units (mm).
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> f32;
}

/// Glyph-class width model of a proportional sans-serif face.
///
/// Deterministic and font-file free. Slightly generous on bold text so lines
/// measured here do not overrun once a real Helvetica Bold is substituted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let em_sum: f32 = text.chars().map(glyph_em_width).sum();
        let weight_scale = match style.weight {
            FontWeight::Normal => 1.0,
            FontWeight::Bold | FontWeight::BoldItalic => 1.06,
        };
        em_sum * style.size_pt * MM_PER_PT * weight_scale
    }
}

fn glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' | '\u{00A0}' => 0.28,
        '\t' => 1.12,
        'i' | 'l' | 'j' | 'I' | '|' | '!' | '¡' | 'í' | 'ì' | 'ï' => 0.23,
        '.' | ',' | ':' | ';' | '\'' => 0.28,
        '"' => 0.36,
        '-' | '\u{2010}' | '\u{2011}' => 0.33,
        '\u{2013}' => 0.56,
        '\u{2014}' => 1.0,
        '_' => 0.56,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.33,
        'f' | 't' | 'r' => 0.31,
        'm' | 'M' => 0.83,
        'w' | 'W' => 0.78,
        '@' => 1.02,
        '%' => 0.89,
        '&' | '#' => 0.67,
        '¿' | '?' => 0.56,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_uppercase() => 0.67,
        c if c.is_lowercase() => 0.54,
        c if c.is_whitespace() => 0.28,
        c if c.is_ascii_punctuation() => 0.5,
        _ => 0.56,
    }
}
