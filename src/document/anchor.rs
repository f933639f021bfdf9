//! Text-anchor resolution.
//!
//! A [`TextAnchor`] references a substring of the document's flat text
//! buffer, either as embedded content or as a list of byte-offset segments.
//! Resolution never fails: malformed offsets are clamped, spans that land off
//! a UTF-8 boundary are skipped, and any shape that yields nothing simply
//! falls through to the next representation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::Layout;
use crate::utils::serialization_utils::text_index;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A reference to a span of the document text.
///
/// Older processor versions emit the resolved text directly as a plain
/// string; newer ones emit a structured anchor with optional pre-resolved
/// `content` and a list of `(start_index, end_index)` segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextAnchor {
    Plain(String),
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, rename = "textSegments")]
        text_segments: Vec<TextSegment>,
    },
}

/// A half-open `[start_index, end_index)` byte span into the document text.
///
/// Indices are signed and unvalidated on the wire; [`resolve_anchor`] clamps
/// them into range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSegment {
    #[serde(deserialize_with = "text_index::deserialize")]
    pub start_index: i64,
    #[serde(deserialize_with = "text_index::deserialize")]
    pub end_index: i64,
}

/// Resolves an anchor against the full document text.
///
/// Resolution order: a plain string is returned trimmed; otherwise embedded
/// `content` wins; otherwise the text segments are clamped, sliced and
/// concatenated. Returns an empty string when nothing resolves.
pub fn resolve_anchor(anchor: Option<&TextAnchor>, full_text: &str) -> String {
    let Some(anchor) = anchor else {
        return String::new();
    };

    match anchor {
        TextAnchor::Plain(text) => text.trim().to_string(),
        TextAnchor::Structured {
            content,
            text_segments,
        } => {
            if let Some(content) = content {
                let content = content.trim();
                if !content.is_empty() {
                    return content.to_string();
                }
            }
            resolve_segments(text_segments, full_text)
        }
    }
}

/// Resolves the text of a layout: the anchor first, then the layout's own
/// inline `text` field.
pub fn resolve_layout(layout: Option<&Layout>, full_text: &str) -> String {
    let Some(layout) = layout else {
        return String::new();
    };

    let text = resolve_anchor(layout.text_anchor.as_ref(), full_text);
    if !text.is_empty() {
        return text;
    }

    layout
        .text
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn resolve_segments(segments: &[TextSegment], full_text: &str) -> String {
    let len = full_text.len();
    let mut parts = String::new();

    for segment in segments {
        let start = segment.start_index.clamp(0, len as i64) as usize;
        let end = (segment.end_index.clamp(0, len as i64) as usize).max(start);
        if start >= end {
            continue;
        }
        // Off-boundary spans yield None and are skipped rather than panicking.
        if let Some(slice) = full_text.get(start..end) {
            parts.push_str(slice);
        }
    }

    clean_extracted_text(&parts)
}

/// Collapses whitespace runs to a single space and strips control characters
/// (0x00-0x1F, 0x7F-0x9F) left behind by the OCR layer.
pub fn clean_extracted_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(text, " ");
    collapsed
        .chars()
        .filter(|c| {
            let code = *c as u32;
            !(code < 0x20 || (0x7F..=0x9F).contains(&code))
        })
        .collect::<String>()
        .trim()
        .to_string()
}
