//! Pattern strategy: layout-agnostic marker recovery from the flat text.
//!
//! When table structure is absent or unusable, line-anchored templates over
//! the raw document text still recover `name value unit` triples. All three
//! templates run; a test name is taken at most once per pass.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::document::Document;
use crate::extraction::error::ExtractionError;
use crate::extraction::marker::Marker;
use crate::extraction::result::ParseResult;

static MARKER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // name value unit (optional parenthesized reference)
        r"(?m)^([A-Za-zäöüßÄÖÜ\s\-()]+?)\s+([\d.,<>≤≥±]+)\s+([a-zA-Zµ/%]+(?:/[a-zA-Zµ]+)?)\s*(?:\(?([\d.,\-\s<>≤≥±%]+)?\)?)?",
        // name: value unit
        r"(?m)^([A-Za-zäöüßÄÖÜ\s\-()]+?):\s+([\d.,<>≤≥±]+)\s+([a-zA-Zµ/%]+(?:/[a-zA-Zµ]+)?)",
        // name<tab>value<tab>unit
        r"(?m)^([A-Za-zäöüßÄÖÜ\s\-()]+?)\t+([\d.,<>≤≥±]+)\t+([a-zA-Zµ/%]+(?:/[a-zA-Zµ]+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid marker pattern"))
    .collect()
});

static HAS_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-ZäöüßÄÖÜ]").expect("valid letter pattern"));

/// Substrings that mark a captured name as a known medical term. A hit here
/// always passes, regardless of the blacklist.
static MEDICAL_KEYWORDS: &[&str] = &[
    "vitamin",
    "ferritin",
    "calcium",
    "magnesium",
    "zink",
    "selen",
    "leukoz",
    "erythroz",
    "hämoglobin",
    "hämatokrit",
    "thromboz",
    "crp",
    "tsh",
    "linol",
    "omega",
    "epa",
    "dha",
];

static NON_MEDICAL_KEYWORDS: &[&str] = &[
    "straße", "telefon", "email", "datum", "seite", "eingang", "ausgang",
];

/// Plausibility check for a pattern-captured test name: letters, length ≥ 3,
/// and either a whitelisted medical term or no blacklisted one.
#[must_use]
pub fn is_valid_test_name(test_name: &str) -> bool {
    if !HAS_LETTER.is_match(test_name) || test_name.chars().count() < 3 {
        return false;
    }

    let test_lower = test_name.to_lowercase();

    if MEDICAL_KEYWORDS.iter().any(|kw| test_lower.contains(kw)) {
        return true;
    }

    !NON_MEDICAL_KEYWORDS.iter().any(|kw| test_lower.contains(kw))
}

/// Scans the flat document text with all three templates and adds a marker
/// per first sighting of a valid test name. Returns the number added.
///
/// # Errors
///
/// Returns [`ExtractionError::EmptyText`] when the document carries no text.
pub fn extract_from_text(
    document: &Document,
    result: &mut ParseResult,
) -> Result<usize, ExtractionError> {
    let full_text = &document.text;
    if full_text.is_empty() {
        return Err(ExtractionError::EmptyText);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut added = 0;

    for pattern in MARKER_PATTERNS.iter() {
        for caps in pattern.captures_iter(full_text) {
            let test_name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();

            if test_name.is_empty()
                || seen.contains(test_name)
                || !is_valid_test_name(test_name)
            {
                continue;
            }

            let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            let unit = caps.get(3).map(|m| m.as_str().trim()).unwrap_or_default();
            let reference = caps.get(4).map(|m| m.as_str().trim()).unwrap_or_default();

            match Marker::new(test_name, value, unit, reference) {
                Ok(marker) => {
                    result.add_marker(marker);
                    seen.insert(test_name.to_string());
                    added += 1;
                }
                Err(e) => {
                    debug!("Skipping pattern match '{test_name}': {e}");
                }
            }
        }
    }

    Ok(added)
}
