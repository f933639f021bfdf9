//! Reference marker catalog.
//!
//! A CSV table of known marker names with their expected units and range
//! bands, used only for validation and confidence scoring. Loaded once at
//! startup and shared immutably; a missing file degrades to an empty catalog
//! rather than failing the service.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// One known marker from the reference table.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMarker {
    pub original_name: String,
    pub unit: String,
    pub optimal_range: String,
    pub very_low: String,
    pub low: String,
    pub optimal: String,
    pub high: String,
    pub too_high: String,
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Markername", default)]
    marker_name: String,
    #[serde(rename = "Unit", default)]
    unit: String,
    #[serde(rename = "Optimalbereich", default)]
    optimal_range: String,
    #[serde(rename = "very low", default)]
    very_low: String,
    #[serde(rename = "low", default)]
    low: String,
    #[serde(rename = "optimal", default)]
    optimal: String,
    #[serde(rename = "high", default)]
    high: String,
    #[serde(rename = "too high", default)]
    too_high: String,
}

/// Mapping from lowercased marker name to its reference entry.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    markers: HashMap<String, ReferenceMarker>,
}

impl ReferenceCatalog {
    /// An empty catalog; reference validation becomes a no-op.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the catalog from a CSV file.
    ///
    /// Rows without a marker name are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut markers = HashMap::new();

        for row in reader.deserialize::<CatalogRow>() {
            let row = row?;
            let name = row.marker_name.trim().to_string();
            if name.is_empty() {
                continue;
            }

            markers.insert(
                name.to_lowercase(),
                ReferenceMarker {
                    original_name: name,
                    unit: row.unit.trim().to_string(),
                    optimal_range: row.optimal_range.trim().to_string(),
                    very_low: row.very_low.trim().to_string(),
                    low: row.low.trim().to_string(),
                    optimal: row.optimal.trim().to_string(),
                    high: row.high.trim().to_string(),
                    too_high: row.too_high.trim().to_string(),
                },
            );
        }

        Ok(Self { markers })
    }

    /// Loads the catalog, degrading to an empty one with a logged warning
    /// when the file is missing or unreadable.
    #[must_use]
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} reference markers from {}",
                    catalog.len(),
                    path.as_ref().display()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load reference markers from {}: {e} - continuing without reference data",
                    path.as_ref().display()
                );
                Self::empty()
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Looks up a marker by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReferenceMarker> {
        self.markers.get(&name.to_lowercase())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.markers.contains_key(&name.to_lowercase())
    }
}
