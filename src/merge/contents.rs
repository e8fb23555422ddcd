//! Generated table-of-contents page.
//!
//! The contents ("separators") section is the one document the merge
//! produces itself: one line per content-bearing section, carrying a
//! sequential letter label, the section's display name, a dotted fill,
//! and the starting page number computed by page accounting. Rendering
//! is headless lopdf work; no office-automation host is involved.
//!
//! Lines use a monospaced font so the fixed-width fill arithmetic holds
//! on the rendered page.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use serde::Serialize;

use crate::error::{DossierError, Result};

/// Maximum number of entries on the contents page.
///
/// Labels are drawn from a 26-letter alphabet with no wraparound;
/// sections past the limit are merged but not listed.
pub const MAX_ENTRIES: usize = 26;

/// Total character width of a rendered contents line.
const LINE_WIDTH: usize = 64;

/// Minimum dotted-fill length between name and page number.
const MIN_FILL: usize = 4;

/// Fill character between name and page number.
const FILL_CHAR: char = '.';

// A4 geometry in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_X: i64 = 56;
const TITLE_Y: i64 = 770;
const FIRST_ENTRY_Y: i64 = 716;
const LINE_STEP: i64 = 24;

const TITLE_FONT_SIZE: i64 = 16;
const ENTRY_FONT_SIZE: i64 = 11;

/// One line of the generated contents page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentsEntry {
    /// Sequential letter label (A, B, C, ...).
    pub label: char,

    /// Human-readable section name.
    ///
    /// Rendered text is restricted to the WinAnsi (cp1252) repertoire,
    /// which covers accented Spanish; characters outside it degrade to
    /// `?` on the page.
    pub name: String,

    /// Starting page of the section in the final document.
    pub page: u32,
}

/// Letter label for a 0-based entry index.
///
/// Returns `None` past the 26-letter alphabet.
pub fn letter_label(index: usize) -> Option<char> {
    if index < MAX_ENTRIES {
        Some(char::from(b'A' + index as u8))
    } else {
        None
    }
}

/// Format one contents line with a dotted fill.
///
/// The fill is sized so the full line approximates [`LINE_WIDTH`]
/// characters; at least [`MIN_FILL`] fill characters are always present,
/// so overlong names push the page number past the nominal width rather
/// than touching it.
pub fn format_entry_line(entry: &ContentsEntry) -> String {
    let prefix = format!("{}. {} ", entry.label, entry.name);
    let page = entry.page.to_string();

    let used = prefix.chars().count() + page.chars().count() + 1;
    let fill_len = LINE_WIDTH.saturating_sub(used).max(MIN_FILL);
    let fill = FILL_CHAR.to_string().repeat(fill_len);

    format!("{prefix}{fill} {page}")
}

/// Encode text for a WinAnsiEncoding Type1 font.
///
/// WinAnsi agrees with Latin-1 over U+00A0..=U+00FF, which covers the
/// accented characters of Spanish section names. Anything outside that
/// range maps to `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{0}'..='\u{7f}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            _ => b'?',
        })
        .collect()
}

fn text_operand(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

/// Render the contents page as a standalone one-page PDF document.
///
/// # Errors
///
/// Returns [`DossierError::ContentsFailed`] if the content stream cannot
/// be encoded.
pub fn build_contents_document(title: &str, entries: &[ContentsEntry]) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let entry_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let title_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let font_dict = dictionary! {
        "F1" => entry_font_id,
        "F2" => title_font_id,
    };
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F2".into(), TITLE_FONT_SIZE.into()]),
        Operation::new("Td", vec![MARGIN_X.into(), TITLE_Y.into()]),
        Operation::new("Tj", vec![text_operand(title)]),
        Operation::new("ET", vec![]),
    ];

    for (i, entry) in entries.iter().take(MAX_ENTRIES).enumerate() {
        let y = FIRST_ENTRY_Y - (i as i64) * LINE_STEP;
        let line = format_entry_line(entry);

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), ENTRY_FONT_SIZE.into()],
        ));
        operations.push(Operation::new("Td", vec![MARGIN_X.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![text_operand(&line)]));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_bytes = content
        .encode()
        .map_err(|e| DossierError::contents_failed(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}
