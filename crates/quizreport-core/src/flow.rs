//! Cursor-based word wrapping and pagination.
//!
//! A [`TextFlow`] owns one in-progress [`Document`] and a [`LayoutCursor`].
//! Text is placed word by word: a word that would cross the right limit moves
//! to a new line, and a line that would cross the bottom limit moves to a new
//! page. Coordinates are millimetres from the top-left corner of the page, and
//! `y` is the text baseline.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{FontSet, LayoutConfig};
use crate::measure::TextMeasurer;
use crate::model::{Rgb, StyledSpan, TextStyle};

const EPSILON: f32 = 1e-3;

/// Current write position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub x: f32,
    pub y: f32,
    /// Zero-based page index.
    pub page: usize,
}

/// A run of text at an absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    pub x: f32,
    pub y: f32,
    /// Measured width of `text`, including any trailing space.
    pub width: f32,
    pub text: String,
    pub style: TextStyle,
}

/// A horizontal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageItem {
    Text(PlacedText),
    Rule(PlacedRule),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<PageItem>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &PlacedText> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Text(t) => Some(t),
            PageItem::Rule(_) => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &PlacedRule> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Rule(r) => Some(r),
            PageItem::Text(_) => None,
        })
    }

    /// Text runs grouped by baseline, top to bottom, each ordered left to right.
    pub fn lines(&self) -> Vec<Vec<&PlacedText>> {
        let mut lines: Vec<Vec<&PlacedText>> = Vec::new();
        for text in self.texts() {
            match lines.iter_mut().find(|l| (l[0].y - text.y).abs() < EPSILON) {
                Some(line) => line.push(text),
                None => lines.push(vec![text]),
            }
        }
        for line in &mut lines {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
        }
        lines.sort_by(|a, b| a[0].y.total_cmp(&b[0].y));
        lines
    }

    /// Visible text of each line, trailing whitespace removed.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .map(|line| {
                let joined: String = line.iter().map(|t| t.text.as_str()).collect();
                joined.trim_end().to_string()
            })
            .collect()
    }
}

/// A finished, paginated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_width: f32,
    pub page_height: f32,
    pub fonts: FontSet,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text lines of the document, page by page.
    pub fn text_lines(&self) -> Vec<String> {
        self.pages.iter().flat_map(Page::text_lines).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize document")
    }

    /// Save the document layout as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write document to {}", path.display()))?;
        Ok(())
    }

    /// Load a document layout from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse document JSON")
    }
}

/// A layout session over fixed page geometry.
pub struct TextFlow<'m> {
    config: LayoutConfig,
    fonts: FontSet,
    measurer: &'m dyn TextMeasurer,
    cursor: LayoutCursor,
    pages: Vec<Page>,
}

impl<'m> TextFlow<'m> {
    pub fn new(config: LayoutConfig, fonts: FontSet, measurer: &'m dyn TextMeasurer) -> Self {
        Self {
            cursor: LayoutCursor {
                x: config.margin_left,
                y: config.margin_top,
                page: 0,
            },
            config,
            fonts,
            measurer,
            pages: vec![Page::default()],
        }
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    /// Write one single-style run, wrapped, then move to the next line.
    ///
    /// Returns the number of lines the text occupied.
    pub fn write_line(&mut self, text: &str, style: TextStyle) -> usize {
        let lines = self.write_inline(&[StyledSpan::new(text, style)]);
        self.advance(self.config.line_height);
        lines
    }

    /// Lay out spans as one wrapped paragraph.
    ///
    /// The horizontal cursor carries over between spans, so differently styled
    /// spans share a line when they fit. Lines break only between words. The
    /// cursor is left on the baseline of the last line written; callers
    /// advance past it. Returns the number of lines used, zero when nothing
    /// was written.
    pub fn write_inline(&mut self, spans: &[StyledSpan]) -> usize {
        let mut lines = 0;

        for span in spans {
            let words: Vec<&str> = span.text.split(' ').collect();
            let last = words.len() - 1;

            for (i, word) in words.iter().enumerate() {
                let piece = if i == last {
                    (*word).to_string()
                } else {
                    format!("{word} ")
                };
                if piece.is_empty() {
                    continue;
                }

                let at_line_start = self.at_line_start();
                if at_line_start && piece.trim().is_empty() {
                    continue;
                }

                if lines == 0 {
                    self.ensure_space(self.config.line_height);
                    lines = 1;
                } else if !at_line_start {
                    let ink = self.measurer.measure(piece.trim_end(), &span.style);
                    if self.cursor.x + ink > self.config.right_limit() + EPSILON {
                        // Padding that overflows is dropped rather than opening a line.
                        if piece.trim().is_empty() {
                            continue;
                        }
                        self.break_line();
                        lines += 1;
                    }
                }

                // A word wider than the whole line still goes on its own line
                // and overflows the right margin.
                let width = self.measurer.measure(&piece, &span.style);
                self.place(piece, width, span.style);
                self.cursor.x += width;
            }
        }

        self.cursor.x = self.config.margin_left;
        lines
    }

    /// Start a new page if a block of `height` would cross the bottom limit.
    ///
    /// Returns `true` when a page break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor.y + height > self.config.content_bottom() + EPSILON {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Explicit page break.
    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = LayoutCursor {
            x: self.config.margin_left,
            y: self.config.margin_top,
            page: self.pages.len() - 1,
        };
        tracing::debug!(page = self.cursor.page, "started new page");
    }

    /// Move the cursor down by `dy`. Negative values are ignored.
    pub fn advance(&mut self, dy: f32) {
        self.cursor.y += dy.max(0.0);
    }

    /// Write a single centered line at the cursor, then advance one line.
    pub fn write_centered(&mut self, text: &str, style: TextStyle) {
        self.ensure_space(self.config.line_height);
        let width = self.measurer.measure(text, &style);
        let x = ((self.config.page_width - width) / 2.0).max(self.config.margin_left);
        let y = self.cursor.y;
        self.push(PageItem::Text(PlacedText {
            x,
            y,
            width,
            text: text.to_string(),
            style,
        }));
        self.advance(self.config.line_height);
    }

    /// Draw a horizontal rule across the text column at the cursor.
    pub fn rule(&mut self, color: Rgb, thickness: f32) {
        let y = self.cursor.y;
        self.push(PageItem::Rule(PlacedRule {
            x1: self.config.margin_left,
            x2: self.config.right_limit(),
            y,
            thickness,
            color,
        }));
    }

    /// Place a centered line at a fixed baseline on the current page.
    ///
    /// Bypasses the cursor and pagination entirely.
    pub fn place_centered(&mut self, y: f32, text: &str, style: TextStyle) {
        let width = self.measurer.measure(text, &style);
        let x = ((self.config.page_width - width) / 2.0).max(0.0);
        self.push(PageItem::Text(PlacedText {
            x,
            y,
            width,
            text: text.to_string(),
            style,
        }));
    }

    /// Close the session and hand out the document.
    pub fn finish(self) -> Document {
        Document {
            page_width: self.config.page_width,
            page_height: self.config.page_height,
            fonts: self.fonts,
            pages: self.pages,
        }
    }

    fn at_line_start(&self) -> bool {
        (self.cursor.x - self.config.margin_left).abs() < EPSILON
    }

    fn break_line(&mut self) {
        self.cursor.y += self.config.line_height;
        self.cursor.x = self.config.margin_left;
        self.ensure_space(self.config.line_height);
    }

    /// Append a word, merging it into the previous run when it continues it.
    fn place(&mut self, text: String, width: f32, style: TextStyle) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        if let Some(PageItem::Text(prev)) = self.current_page().items.last_mut() {
            if prev.style == style
                && (prev.y - y).abs() < EPSILON
                && (prev.x + prev.width - x).abs() < EPSILON
            {
                prev.text.push_str(&text);
                prev.width += width;
                return;
            }
        }
        self.push(PageItem::Text(PlacedText {
            x,
            y,
            width,
            text,
            style,
        }));
    }

    fn push(&mut self, item: PageItem) {
        self.current_page().items.push(item);
    }

    fn current_page(&mut self) -> &mut Page {
        let index = self.cursor.page;
        &mut self.pages[index]
    }
}
