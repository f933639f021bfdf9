use labmarker::document::Document;
use labmarker::extraction::patterns::{extract_from_text, is_valid_test_name};
use labmarker::extraction::{ExtractionError, ParseResult};

fn document_with_text(text: &str) -> Document {
    Document {
        text: text.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_colon_separated_marker_is_extracted() {
    let document = document_with_text("Ferritin: 120 ng/ml");
    let mut result = ParseResult::new();

    let added = extract_from_text(&document, &mut result).unwrap();

    assert_eq!(added, 1);
    assert_eq!(result.clinical_chemistry.len(), 1);

    let marker = &result.clinical_chemistry[0];
    assert_eq!(marker.test, "Ferritin");
    assert_eq!(marker.result, "120");
    assert_eq!(marker.unit, "ng/ml");
}

#[test]
fn test_space_separated_marker_with_reference() {
    let document = document_with_text("Hämoglobin 14,2 g/dl (13,5-17,5)");
    let mut result = ParseResult::new();

    extract_from_text(&document, &mut result).unwrap();

    assert_eq!(result.hematology.len(), 1);
    let marker = &result.hematology[0];
    assert_eq!(marker.test, "Hämoglobin");
    assert_eq!(marker.result, "14.2");
    assert_eq!(marker.unit, "g/dl");
    assert_eq!(marker.reference_range, "13,5-17,5");
}

#[test]
fn test_tab_separated_marker_is_extracted() {
    let document = document_with_text("Selen\t135\tµg/l");
    let mut result = ParseResult::new();

    extract_from_text(&document, &mut result).unwrap();

    assert_eq!(result.metals_trace_elements.len(), 1);
    assert_eq!(result.metals_trace_elements[0].result, "135");
}

#[test]
fn test_each_test_name_is_taken_once_per_pass() {
    let document = document_with_text("Ferritin: 120 ng/ml\nFerritin: 95 ng/ml");
    let mut result = ParseResult::new();

    let added = extract_from_text(&document, &mut result).unwrap();

    assert_eq!(added, 1);
    assert_eq!(result.clinical_chemistry.len(), 1);
    assert_eq!(result.clinical_chemistry[0].result, "120");
}

#[test]
fn test_blacklisted_line_is_ignored() {
    let document = document_with_text("Seite 1 von 2\nFerritin: 120 ng/ml");
    let mut result = ParseResult::new();

    let added = extract_from_text(&document, &mut result).unwrap();

    assert_eq!(added, 1);
    assert_eq!(result.clinical_chemistry[0].test, "Ferritin");
}

#[test]
fn test_empty_text_degrades() {
    let document = Document::default();
    let mut result = ParseResult::new();

    assert_eq!(
        extract_from_text(&document, &mut result),
        Err(ExtractionError::EmptyText)
    );
}

#[test]
fn test_valid_test_name_requires_letters_and_length() {
    assert!(!is_valid_test_name("12"));
    assert!(!is_valid_test_name("ab"));
    assert!(is_valid_test_name("Ferritin"));
}

#[test]
fn test_whitelist_overrides_blacklist() {
    // Contains both a known medical term and a blacklisted word; the
    // whitelist hit wins.
    assert!(is_valid_test_name("Ferritin Datum"));
}

#[test]
fn test_blacklisted_name_is_rejected() {
    assert!(!is_valid_test_name("Telefon"));
    assert!(!is_valid_test_name("Eingang"));
}

#[test]
fn test_unlisted_name_passes() {
    assert!(is_valid_test_name("Kreatinin"));
}
