//! The extraction-and-normalization pipeline.
//!
//! Four strategies feed one shared result: typed entities, table rows,
//! flat-text patterns and form fields. All of them run on every document
//! (a best-effort union, not a pipeline with early exit), and a strategy
//! that degrades is logged and skipped. The aggregated result is then
//! deduplicated, sorted and scored against the reference catalog.

pub mod catalog;
pub mod classify;
pub mod entities;
pub mod error;
pub mod form_fields;
pub mod marker;
pub mod patterns;
pub mod result;
pub mod table;

pub use catalog::{CatalogError, ReferenceCatalog, ReferenceMarker};
pub use classify::{classify, classify_fatty_acid, Category, FattyAcidClass};
pub use error::ExtractionError;
pub use marker::{Marker, MarkerError};
pub use result::{ExtractionStats, ParseResult};

use tracing::{debug, info, warn};

use crate::document::Document;

/// Runs the full extraction over one document.
///
/// Holds only borrowed, read-only collaborators; one instance per request is
/// free, and the catalog is shared across requests without locking.
pub struct ExtractionPipeline<'a> {
    catalog: &'a ReferenceCatalog,
}

impl<'a> ExtractionPipeline<'a> {
    #[must_use]
    pub fn new(catalog: &'a ReferenceCatalog) -> Self {
        Self { catalog }
    }

    /// Extracts a categorized, post-processed result from the document.
    ///
    /// Never fails: strategies degrade individually and the post-processing
    /// always runs over whatever was collected.
    #[must_use]
    pub fn extract(&self, document: &Document) -> ParseResult {
        let mut result = ParseResult::new();

        match entities::extract_from_entities(document, &mut result) {
            Ok(count) => info!("Entity extraction added {count} markers"),
            Err(e) => debug!("Entity extraction skipped: {e}"),
        }

        if let Err(e) = table::extract_from_tables(document, &mut result) {
            warn!("Table extraction failed: {e}");
        }

        if let Err(e) = patterns::extract_from_text(document, &mut result) {
            warn!("Pattern extraction failed: {e}");
        }

        if let Err(e) = form_fields::extract_form_fields(document, &mut result) {
            warn!("Form field extraction failed: {e}");
        }

        result.post_process(self.catalog);

        result
    }
}
