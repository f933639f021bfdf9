//! Entity strategy: markers from a trained processor's typed extractions.
//!
//! When the processor has been trained on lab reports it labels spans
//! directly with `test_name`, `result_value`, `reference_range`, `unit` and
//! `category` properties. This is the highest-precision source when present,
//! so it runs first; the structural strategies still run afterwards.

use tracing::debug;

use crate::document::anchor::resolve_anchor;
use crate::document::{Document, Entity};
use crate::extraction::classify::Category;
use crate::extraction::error::ExtractionError;
use crate::extraction::marker::Marker;
use crate::extraction::result::ParseResult;

/// Builds a marker per entity that carries both a test name and a result
/// value. Returns the number of markers added.
///
/// # Errors
///
/// Returns [`ExtractionError::NoEntities`] when the document has no typed
/// entities (the common case for untrained processors).
pub fn extract_from_entities(
    document: &Document,
    result: &mut ParseResult,
) -> Result<usize, ExtractionError> {
    if document.entities.is_empty() {
        return Err(ExtractionError::NoEntities);
    }

    let mut added = 0;

    for entity in &document.entities {
        match marker_from_entity(entity, &document.text) {
            Some(marker) => {
                result.add_marker(marker);
                added += 1;
            }
            None => {
                debug!("Skipping entity '{}'", entity.entity_type);
            }
        }
    }

    Ok(added)
}

fn marker_from_entity(entity: &Entity, full_text: &str) -> Option<Marker> {
    let mut test_name = String::new();
    let mut result_value = String::new();
    let mut reference_range = String::new();
    let mut unit = String::new();
    let mut category_label = String::new();

    for prop in &entity.properties {
        let text = resolve_anchor(prop.text_anchor.as_ref(), full_text);
        match prop.entity_type.as_str() {
            "test_name" => test_name = text,
            "result_value" => result_value = text,
            "reference_range" => reference_range = text,
            "unit" => unit = text,
            "category" => category_label = text,
            _ => {}
        }
    }

    if test_name.is_empty() || result_value.is_empty() {
        return None;
    }

    let marker = match Marker::new(&test_name, &result_value, &unit, &reference_range) {
        Ok(marker) => marker,
        Err(e) => {
            debug!("Entity marker construction failed for '{test_name}': {e}");
            return None;
        }
    };

    // The trained label wins over keyword classification when it names a
    // known category.
    let marker = match Category::from_name(&category_label) {
        Some(category) => marker.with_category(category),
        None => marker,
    };

    Some(marker.with_confidence(entity.confidence))
}
