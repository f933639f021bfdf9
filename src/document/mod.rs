//! Wire model for the OCR service's document output.
//!
//! The processor returns a flat text buffer plus geometric structure (pages,
//! tables, form fields) and, for trained processors, typed entities. The
//! schema is only loosely specified and varies between processor versions,
//! so every field defaults to empty and callers probe the shapes they need
//! rather than relying on any one of them being present.

pub mod anchor;

pub use anchor::{resolve_anchor, resolve_layout, TextAnchor, TextSegment};

use serde::{Deserialize, Serialize};

/// A processed document as returned by the OCR service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// The full document text in reading order. Text anchors index into this.
    pub text: String,
    pub pages: Vec<Page>,
    /// Typed extractions from a trained processor, if any.
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub page_number: u32,
    pub tables: Vec<Table>,
    pub form_fields: Vec<FormField>,
}

/// A detected table.
///
/// Depending on the processor version, rows arrive as `header_rows` +
/// `body_rows`, or as one undifferentiated `rows` list. All three default to
/// empty; consumers must try each shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub header_rows: Vec<TableRow>,
    pub body_rows: Vec<TableRow>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A table cell. Text is usually reachable through `layout.text_anchor`, but
/// some processor versions inline it as `text` or `content` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub layout: Option<Layout>,
    pub text: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    pub text_anchor: Option<TextAnchor>,
    pub text: Option<String>,
}

/// A key/value pair detected by the form parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub field_name: Option<Layout>,
    pub field_value: Option<Layout>,
}

/// A typed span labeled by a trained processor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub text_anchor: Option<TextAnchor>,
    pub confidence: f64,
    pub properties: Vec<Entity>,
}
