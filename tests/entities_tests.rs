use labmarker::document::{Document, Entity, TextAnchor};
use labmarker::extraction::entities::extract_from_entities;
use labmarker::extraction::{Category, ExtractionError, ParseResult};

fn property(entity_type: &str, text: &str) -> Entity {
    Entity {
        entity_type: entity_type.to_string(),
        text_anchor: Some(TextAnchor::Plain(text.to_string())),
        confidence: 0.0,
        properties: Vec::new(),
    }
}

fn marker_entity(confidence: f64, properties: Vec<Entity>) -> Entity {
    Entity {
        entity_type: "marker".to_string(),
        text_anchor: None,
        confidence,
        properties,
    }
}

#[test]
fn test_entity_with_name_and_value_yields_marker() {
    let document = Document {
        entities: vec![marker_entity(
            0.93,
            vec![
                property("test_name", "Ferritin"),
                property("result_value", "120"),
                property("unit", "ng/ml"),
                property("reference_range", "30-300"),
            ],
        )],
        ..Default::default()
    };

    let mut result = ParseResult::new();
    let added = extract_from_entities(&document, &mut result).unwrap();

    assert_eq!(added, 1);
    let marker = &result.clinical_chemistry[0];
    assert_eq!(marker.test, "Ferritin");
    assert_eq!(marker.result, "120");
    assert_eq!(marker.unit, "ng/ml");
    assert_eq!(marker.reference_range, "30-300");
    assert!((marker.confidence - 0.93).abs() < 1e-9);
}

#[test]
fn test_entity_category_label_overrides_classification() {
    let document = Document {
        entities: vec![marker_entity(
            0.8,
            vec![
                property("test_name", "Ferritin"),
                property("result_value", "120"),
                property("category", "hormones"),
            ],
        )],
        ..Default::default()
    };

    let mut result = ParseResult::new();
    extract_from_entities(&document, &mut result).unwrap();

    assert!(result.clinical_chemistry.is_empty());
    assert_eq!(result.hormones.len(), 1);
    assert_eq!(result.hormones[0].category, Category::Hormones);
}

#[test]
fn test_unknown_category_label_falls_back_to_classification() {
    let document = Document {
        entities: vec![marker_entity(
            0.8,
            vec![
                property("test_name", "Hämoglobin"),
                property("result_value", "14,2"),
                property("category", "something_else"),
            ],
        )],
        ..Default::default()
    };

    let mut result = ParseResult::new();
    extract_from_entities(&document, &mut result).unwrap();

    assert_eq!(result.hematology.len(), 1);
}

#[test]
fn test_entity_without_result_value_is_skipped() {
    let document = Document {
        entities: vec![marker_entity(0.9, vec![property("test_name", "Ferritin")])],
        ..Default::default()
    };

    let mut result = ParseResult::new();
    let added = extract_from_entities(&document, &mut result).unwrap();

    assert_eq!(added, 0);
    assert_eq!(result.extraction_stats.total_markers_found, 0);
}

#[test]
fn test_document_without_entities_degrades() {
    let document = Document::default();
    let mut result = ParseResult::new();

    assert_eq!(
        extract_from_entities(&document, &mut result),
        Err(ExtractionError::NoEntities)
    );
}

#[test]
fn test_entity_text_resolves_against_document_buffer() {
    let text = "Ferritin 120 ng/ml";
    let document = Document {
        text: text.to_string(),
        entities: vec![marker_entity(
            0.9,
            vec![
                Entity {
                    entity_type: "test_name".to_string(),
                    text_anchor: Some(TextAnchor::Structured {
                        content: None,
                        text_segments: vec![labmarker::document::TextSegment {
                            start_index: 0,
                            end_index: 8,
                        }],
                    }),
                    confidence: 0.0,
                    properties: Vec::new(),
                },
                property("result_value", "120"),
            ],
        )],
        ..Default::default()
    };

    let mut result = ParseResult::new();
    extract_from_entities(&document, &mut result).unwrap();

    assert_eq!(result.clinical_chemistry[0].test, "Ferritin");
}
