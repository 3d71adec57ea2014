//! Sentence segmentation around blank markers.
//!
//! A template such as `"Llovía __ salimos igual."` is split on every run of two
//! or more underscores, and the connector (`"por un lado - por otro lado"` for
//! two blanks) is split on dash separators so each blank gets its own part.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{StyledSpan, TextStyle};

/// Shown in a slot whose connector part is missing.
pub const PLACEHOLDER: &str = "_______";

static BLANK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("blank marker pattern is valid"));

// Hyphen, en dash or em dash with whitespace on both sides.
static CONNECTOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-\u{2013}\u{2014}]\s+").expect("separator pattern is valid"));

/// One piece of a segmented sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal template text between blanks. May be empty.
    Text(String),
    /// The blank at position `index`, filled with a connector part if one exists.
    Slot { index: usize, part: Option<String> },
}

impl Segment {
    pub fn is_slot(&self) -> bool {
        matches!(self, Segment::Slot { .. })
    }

    /// Text as it appears in the rendered sentence.
    ///
    /// Slots are upper-cased and padded with one space on each side.
    pub fn display_text(&self) -> String {
        match self {
            Segment::Text(text) => text.clone(),
            Segment::Slot { part, .. } => {
                let body = part
                    .as_deref()
                    .map(|p| p.trim().to_uppercase())
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                format!(" {body} ")
            }
        }
    }
}

/// Split a connector into at most `max_parts` sub-parts, left to right.
///
/// Parts beyond `max_parts` are dropped.
pub fn split_connector(connector: &str, max_parts: usize) -> Vec<&str> {
    let parts: Vec<&str> = CONNECTOR_SEPARATOR.split(connector).collect();
    if parts.len() > max_parts {
        tracing::debug!(
            connector,
            parts = parts.len(),
            blanks = max_parts,
            "dropping connector parts without a blank"
        );
    }
    parts.into_iter().take(max_parts).collect()
}

/// Interleave template text with connector slots.
///
/// A template with `k` blanks always yields `k + 1` text segments and `k`
/// slots, starting and ending with text.
pub fn segment(template: &str, connector: &str) -> Vec<Segment> {
    let texts: Vec<&str> = BLANK_MARKER.split(template).collect();
    let blanks = texts.len() - 1;
    let parts = split_connector(connector, blanks);

    let mut segments = Vec::with_capacity(texts.len() * 2 - 1);
    for (index, text) in texts.iter().enumerate() {
        segments.push(Segment::Text((*text).to_string()));
        if index < blanks {
            let part = parts
                .get(index)
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string);
            segments.push(Segment::Slot { index, part });
        }
    }
    segments
}

/// Turn segments into styled spans, dropping empty text segments.
pub fn to_spans(segments: &[Segment], text_style: TextStyle, slot_style: TextStyle) -> Vec<StyledSpan> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) if text.is_empty() => None,
            Segment::Text(text) => Some(StyledSpan::new(text.clone(), text_style)),
            Segment::Slot { .. } => Some(StyledSpan::new(segment.display_text(), slot_style)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontWeight, Rgb};

    fn counts(segments: &[Segment]) -> (usize, usize) {
        let slots = segments.iter().filter(|s| s.is_slot()).count();
        (segments.len() - slots, slots)
    }

    #[test]
    fn single_blank_single_part() {
        let segs = segment("El carro es rojo __ es rápido.", "y");
        assert_eq!(counts(&segs), (2, 1));
        assert_eq!(segs[0], Segment::Text("El carro es rojo ".into()));
        assert_eq!(segs[1].display_text(), " Y ");
        assert_eq!(segs[2], Segment::Text(" es rápido.".into()));
    }

    #[test]
    fn leading_and_trailing_blanks_keep_empty_text() {
        let segs = segment("___ llueve, ____", "aunque - igual");
        assert_eq!(counts(&segs), (3, 2));
        assert_eq!(segs[0], Segment::Text(String::new()));
        assert_eq!(segs[4], Segment::Text(String::new()));
        assert_eq!(segs[3].display_text(), " IGUAL ");
    }

    #[test]
    fn k_blanks_give_k_plus_one_texts() {
        for k in 1..6 {
            let template = vec!["palabra"; k + 1].join(" __ ");
            let segs = segment(&template, "a");
            assert_eq!(counts(&segs), (k + 1, k));
        }
    }

    #[test]
    fn single_underscore_is_not_a_blank() {
        let segs = segment("snake_case y __", "o");
        assert_eq!(counts(&segs), (2, 1));
        assert_eq!(segs[0], Segment::Text("snake_case y ".into()));
    }

    #[test]
    fn missing_part_falls_back_to_placeholder() {
        let segs = segment(
            "__ estudia mucho, __ trabaja poco.",
            "por un lado",
        );
        assert_eq!(segs[1].display_text(), " POR UN LADO ");
        assert_eq!(segs[3], Segment::Slot { index: 1, part: None });
        assert_eq!(segs[3].display_text(), format!(" {PLACEHOLDER} "));
    }

    #[test]
    fn all_dash_kinds_separate_parts() {
        assert_eq!(split_connector("a - b", 2), vec!["a", "b"]);
        assert_eq!(split_connector("a – b", 2), vec!["a", "b"]);
        assert_eq!(split_connector("a — b", 2), vec!["a", "b"]);
        // Unpadded dashes belong to the word.
        assert_eq!(split_connector("bien-estar", 2), vec!["bien-estar"]);
    }

    #[test]
    fn extra_parts_are_dropped() {
        assert_eq!(split_connector("uno - dos - tres", 2), vec!["uno", "dos"]);
        assert!(split_connector("uno", 0).is_empty());
    }

    #[test]
    fn empty_connector_uses_placeholder() {
        let segs = segment("Vino __ se fue.", "");
        assert_eq!(segs[1].display_text(), format!(" {PLACEHOLDER} "));
    }

    #[test]
    fn template_without_blanks_is_plain_text() {
        let segs = segment("Sin huecos.", "y");
        assert_eq!(segs, vec![Segment::Text("Sin huecos.".into())]);
    }

    #[test]
    fn spans_skip_empty_text_and_style_slots() {
        let body = TextStyle::new(11.0, Rgb(71, 85, 105), FontWeight::Normal);
        let slot = TextStyle::new(11.0, Rgb(22, 163, 74), FontWeight::Bold);
        let spans = to_spans(&segment("__ llueve.", "aunque"), body, slot);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, " AUNQUE ");
        assert_eq!(spans[0].style, slot);
        assert_eq!(spans[1].text, " llueve.");
    }
}
