//! Marker validation and construction.
//!
//! A [`Marker`] is a single lab test result. Construction normalizes the raw
//! strings (whitespace, control characters, German decimal commas, truncated
//! units) and enforces the one hard invariant of the pipeline: `test` and
//! `result` are non-empty after normalization, or construction fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::anchor::clean_extracted_text;
use crate::extraction::classify::{classify, Category};

#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("Marker requires a non-empty {field}")]
    MissingField { field: &'static str },
}

/// A single extracted lab test result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub test: String,
    pub result: String,
    pub unit: String,
    pub reference_range: String,
    /// Implied by the marker's placement in the categorized result.
    #[serde(skip)]
    pub category: Category,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, rename = "critical", skip_serializing_if = "is_false")]
    pub is_critical: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Marker {
    /// Builds a normalized marker from raw field strings.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerError::MissingField`] when `test` or `result` is empty
    /// after normalization.
    pub fn new(test: &str, result: &str, unit: &str, reference_range: &str) -> Result<Self, MarkerError> {
        let test = clean_extracted_text(test);
        let result = normalize_value(result);
        let unit = repair_truncated_unit(unit.trim()).to_string();
        let reference_range = reference_range.trim().to_string();

        if test.is_empty() {
            return Err(MarkerError::MissingField { field: "test" });
        }
        if result.is_empty() {
            return Err(MarkerError::MissingField { field: "result" });
        }

        let category = classify(&test);
        let is_critical = is_critical_value(&result, &reference_range);

        Ok(Self {
            test,
            result,
            unit,
            reference_range,
            category,
            confidence: 0.0,
            is_critical,
        })
    }

    /// Overrides the classified category, e.g. with a trained processor's
    /// category label.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Weighted presence of the four data fields, used to pick the better of
    /// two duplicate records. The measured value weighs heaviest.
    #[must_use]
    pub fn completeness(&self) -> u32 {
        let mut score = 0;
        if !self.test.is_empty() {
            score += 1;
        }
        if !self.result.is_empty() {
            score += 2;
        }
        if !self.unit.is_empty() {
            score += 1;
        }
        if !self.reference_range.is_empty() {
            score += 1;
        }
        score
    }
}

/// Normalizes a measured value: trims and converts the German decimal comma.
fn normalize_value(value: &str) -> String {
    value.trim().replace(',', ".")
}

/// Repairs units cut short by the OCR layer.
///
/// A fixed, empirically grown lookup of observed artifacts; anything
/// unmapped passes through unchanged. `op` is what the OCR tends to make of
/// a percent sign.
#[must_use]
pub fn repair_truncated_unit(unit: &str) -> &str {
    match unit {
        "mg/" => "mg/l",
        "µg/" => "µg/l",
        "ng/" => "ng/ml",
        "pg/" => "pg/ml",
        "mmol/" => "mmol/l",
        "pmol/" => "pmol/l",
        "op" => "%",
        "1000/" => "1000/µl",
        "Mill/" => "Mill/µl",
        other => other,
    }
}

static EXCLUSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Header words
        r"(?i)^(seite|page|datum|date|patient|name|einheit|unit|ergebnis|result|referenz|test|parameter)",
        // Addresses and contact info
        r"(?i)^(straße|str\.|plz|telefon|phone|fax|email|@|www\.)",
        // Separator lines
        r"^[-=]+$",
        // Pure numbers
        r"^\d+$",
        r"^\d+[.,]\d+$",
        // Articles and prepositions
        r"(?i)^(von|to|from|der|die|das|ein|eine|für|for|with|mit)",
        // Entry/exit labels
        r"(?i)^(eingang|ausgang|entry|exit)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid exclusion pattern"))
    .collect()
});

static RESULT_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\d.,<>≤≥±]|negativ|positiv|normal|erhöht|niedrig|high|low")
        .expect("valid result pattern")
});

static HAS_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-ZäöüßÄÖÜ]").expect("valid letter pattern"));

static CRITICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\*+",
        r"(?i)kritisch",
        r"(?i)critical",
        r"(?i)alarm",
        r"↑↑",
        r"↓↓",
        r"(?i)sehr (hoch|niedrig)",
        r"(?i)very (high|low)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid critical pattern"))
    .collect()
});

/// Decides whether a raw table row plausibly holds a test result.
///
/// Requires a test name with letters and sane length, a result cell with a
/// digit, comparison operator or status word, and a test name that is not a
/// header word, address fragment, separator line or bare number.
#[must_use]
pub fn is_valid_marker_row(row: &[String]) -> bool {
    if row.len() < 2 {
        return false;
    }

    let test_name = row[0].trim();
    let result_value = row[1].trim();

    if test_name.is_empty() || result_value.is_empty() {
        return false;
    }

    let name_len = test_name.chars().count();
    if !(2..=200).contains(&name_len) {
        return false;
    }

    if EXCLUSION_PATTERNS.iter().any(|p| p.is_match(test_name)) {
        return false;
    }

    if !RESULT_VALUE.is_match(result_value) {
        return false;
    }

    HAS_LETTER.is_match(test_name)
}

static TRAILING_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s+([a-zA-Zµ/%]+(?:/[a-zA-Zµ]+)?)$").expect("valid unit pattern")
});

static UNIT_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Zµ/%]+(?:/[a-zA-Zµ]+)?$").expect("valid unit pattern"));

/// Splits a trailing unit off a result value, e.g. `"14,2 g/dl"` into
/// `("14,2", "g/dl")`. Returns the input unchanged when no unit shape is
/// recognizable at the tail.
#[must_use]
pub fn split_trailing_unit(result: &str) -> (String, String) {
    if let Some(caps) = TRAILING_UNIT.captures(result) {
        return (caps[1].to_string(), caps[2].to_string());
    }

    let parts: Vec<&str> = result.split_whitespace().collect();
    if parts.len() >= 2 {
        let candidate = parts[parts.len() - 1];
        if UNIT_SHAPE.is_match(candidate) {
            return (parts[..parts.len() - 1].join(" "), candidate.to_string());
        }
    }

    (result.to_string(), String::new())
}

/// Detects critical-value flagging in the result or reference text.
///
/// Without a reference range the flag is not derivable and stays false.
#[must_use]
pub fn is_critical_value(result: &str, reference: &str) -> bool {
    if reference.is_empty() {
        return false;
    }

    CRITICAL_PATTERNS
        .iter()
        .any(|p| p.is_match(reference) || p.is_match(result))
}

/// Builds a marker from a raw table row: `[test, result, unit?, reference?]`.
/// When the unit column is absent, tries to split it off the result value.
///
/// # Errors
///
/// Returns [`MarkerError::MissingField`] when the row normalizes to an empty
/// test or result.
pub fn marker_from_row(row: &[String]) -> Result<Marker, MarkerError> {
    let test_name = row.first().map(|s| s.trim()).unwrap_or_default();
    let mut result = row.get(1).map(|s| s.trim().to_string()).unwrap_or_default();
    let mut unit = row.get(2).map(|s| s.trim().to_string()).unwrap_or_default();
    let reference = row.get(3).map(|s| s.trim()).unwrap_or_default();

    if unit.is_empty() && !result.is_empty() {
        let (value, trailing) = split_trailing_unit(&result);
        if !trailing.is_empty() {
            result = value;
            unit = trailing;
        }
    }

    Marker::new(test_name, &result, &unit, reference)
}
