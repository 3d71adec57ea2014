//! PDF report writer.
//!
//! Builds a PDF 1.4 file with `lopdf` using the base-14 fonts named in the
//! document, so no font data is embedded. Text is encoded as WinAnsi;
//! characters outside that set are replaced with `?`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};

use quizreport_core::flow::{Document, PageItem, PlacedRule, PlacedText};
use quizreport_core::model::{FontWeight, Rgb};

/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

const FONTS: [FontWeight; 3] = [FontWeight::Normal, FontWeight::Bold, FontWeight::BoldItalic];

fn font_key(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "F1",
        FontWeight::Bold => "F2",
        FontWeight::BoldItalic => "F3",
    }
}

/// Generate a PDF file from a laid-out document.
pub fn generate_pdf(doc: &Document, created_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let mut pdf = lopdf::Document::with_version("1.4");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for weight in FONTS {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => Object::Name(doc.fonts.name(weight).as_bytes().to_vec()),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font_key(weight), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let mut operations = Vec::new();
        for item in &page.items {
            match item {
                PageItem::Text(text) => push_text(&mut operations, text, doc.page_height),
                PageItem::Rule(rule) => push_rule(&mut operations, rule, doc.page_height),
            }
        }
        let content = Content { operations }
            .encode()
            .context("failed to encode page content")?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = i64::try_from(kids.len()).context("too many pages")?;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                (doc.page_width * PT_PER_MM).into(),
                (doc.page_height * PT_PER_MM).into(),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = pdf.add_object(dictionary! {
        "Producer" => Object::string_literal(format!("quizreport {}", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(format!("D:{}Z", created_at.format("%Y%m%d%H%M%S"))),
    });
    pdf.trailer.set("Root", catalog_id);
    pdf.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes).context("failed to serialize PDF")?;
    Ok(bytes)
}

/// Write a PDF report to a file, stamped with the current time.
pub fn write_pdf_report(doc: &Document, path: &Path) -> Result<()> {
    let pdf = generate_pdf(doc, Utc::now())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, pdf)?;
    tracing::debug!(pages = doc.page_count(), "wrote {}", path.display());
    Ok(())
}

fn rgb_operands(color: Rgb) -> Vec<Object> {
    let (r, g, b) = color.unit();
    vec![r.into(), g.into(), b.into()]
}

fn push_text(ops: &mut Vec<Operation>, text: &PlacedText, page_height: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![font_key(text.style.weight).into(), text.style.size_pt.into()],
    ));
    ops.push(Operation::new("rg", rgb_operands(text.style.color)));
    ops.push(Operation::new(
        "Td",
        vec![
            (text.x * PT_PER_MM).into(),
            ((page_height - text.y) * PT_PER_MM).into(),
        ],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(&text.text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn push_rule(ops: &mut Vec<Operation>, rule: &PlacedRule, page_height: f32) {
    let y = (page_height - rule.y) * PT_PER_MM;
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("RG", rgb_operands(rule.color)));
    ops.push(Operation::new("w", vec![(rule.thickness * PT_PER_MM).into()]));
    ops.push(Operation::new("m", vec![(rule.x1 * PT_PER_MM).into(), y.into()]));
    ops.push(Operation::new("l", vec![(rule.x2 * PT_PER_MM).into(), y.into()]));
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Encode text as WinAnsi bytes for the base-14 fonts.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return u8::try_from(code).ok();
    }
    let byte = match ch {
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        _ => return None,
    };
    Some(byte)
}
