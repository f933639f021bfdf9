use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::extraction::catalog::ReferenceCatalog;
use crate::extraction::classify::{classify_fatty_acid, Category, FattyAcidClass};
use crate::extraction::marker::Marker;

/// Laboratory letterhead fields recovered from form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportHeader {
    pub medical_director: String,
    pub scientists: String,
    pub address: String,
    pub contact: String,
    pub insurance: String,
    pub collection_date: String,
    pub collection_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    pub name: String,
    pub diary_number: String,
    pub birth_date_gender: String,
    pub entry_date: String,
    pub exit_date: String,
}

/// The fatty-acid panel, split by subcategory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FattyAcidPanel {
    pub omega_3_fatty_acids: Vec<Marker>,
    pub omega_6_fatty_acids: Vec<Marker>,
    pub monounsaturated_fatty_acids: Vec<Marker>,
    pub trans_fatty_acids: Vec<Marker>,
    pub saturated_fatty_acids: Vec<Marker>,
}

impl FattyAcidPanel {
    pub fn list_mut(&mut self, class: FattyAcidClass) -> &mut Vec<Marker> {
        match class {
            FattyAcidClass::Omega3 => &mut self.omega_3_fatty_acids,
            FattyAcidClass::Omega6 => &mut self.omega_6_fatty_acids,
            FattyAcidClass::Monounsaturated => &mut self.monounsaturated_fatty_acids,
            FattyAcidClass::Trans => &mut self.trans_fatty_acids,
            FattyAcidClass::Saturated => &mut self.saturated_fatty_acids,
        }
    }

    fn lists_mut(&mut self) -> [&mut Vec<Marker>; 5] {
        [
            &mut self.omega_3_fatty_acids,
            &mut self.omega_6_fatty_acids,
            &mut self.monounsaturated_fatty_acids,
            &mut self.trans_fatty_acids,
            &mut self.saturated_fatty_acids,
        ]
    }

    fn lists(&self) -> [&Vec<Marker>; 5] {
        [
            &self.omega_3_fatty_acids,
            &self.omega_6_fatty_acids,
            &self.monounsaturated_fatty_acids,
            &self.trans_fatty_acids,
            &self.saturated_fatty_acids,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionStats {
    pub total_markers_found: usize,
    pub markers_with_reference: usize,
    pub markers_without_reference: usize,
    pub critical_values: Vec<String>,
    pub extraction_confidence: f64,
    pub validation_status: String,
}

impl Default for ExtractionStats {
    fn default() -> Self {
        Self {
            total_markers_found: 0,
            markers_with_reference: 0,
            markers_without_reference: 0,
            critical_values: Vec::new(),
            extraction_confidence: 0.0,
            validation_status: "pending".to_string(),
        }
    }
}

/// The categorized extraction result for one document.
///
/// Initialized empty, filled additively by every extraction strategy, then
/// deduplicated, sorted and scored once by [`ParseResult::post_process`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseResult {
    pub header: ReportHeader,
    pub patient_info: PatientInfo,
    pub hematology: Vec<Marker>,
    pub clinical_chemistry: Vec<Marker>,
    pub hormones: Vec<Marker>,
    pub clinical_immunology: Vec<Marker>,
    pub metals_trace_elements: Vec<Marker>,
    pub micronutrients: Vec<Marker>,
    pub fatty_acids: FattyAcidPanel,
    pub quotients: Vec<Marker>,
    pub extraction_stats: ExtractionStats,
}

impl ParseResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a marker to its category list.
    ///
    /// Insertion is skipped when the list already holds a marker with the
    /// same lowercased test name, but the marker still counts toward
    /// `total_markers_found` and its critical flag is still recorded; the
    /// counters reflect extraction volume, the lists hold distinct tests.
    pub fn add_marker(&mut self, marker: Marker) {
        if marker.is_critical {
            self.extraction_stats
                .critical_values
                .push(marker.test.clone());
        }

        let list = match marker.category {
            Category::FattyAcids => self.fatty_acids.list_mut(classify_fatty_acid(&marker.test)),
            Category::Hematology => &mut self.hematology,
            Category::ClinicalChemistry => &mut self.clinical_chemistry,
            Category::Hormones => &mut self.hormones,
            Category::ClinicalImmunology => &mut self.clinical_immunology,
            Category::MetalsTraceElements => &mut self.metals_trace_elements,
            Category::Micronutrients => &mut self.micronutrients,
            Category::Quotients => &mut self.quotients,
        };

        let key = marker.test.to_lowercase();
        if !list.iter().any(|m| m.test.to_lowercase() == key) {
            list.push(marker);
        }

        self.extraction_stats.total_markers_found += 1;
    }

    /// Runs the post-extraction passes: de-duplication, deterministic sort,
    /// confidence scoring and reference validation. Always safe to call;
    /// each pass is a pure in-memory transformation.
    pub fn post_process(&mut self, catalog: &ReferenceCatalog) {
        self.remove_duplicates();
        self.sort_markers();
        self.calculate_confidence();
        self.validate_against_catalog(catalog);
    }

    fn category_lists_mut(&mut self) -> [&mut Vec<Marker>; 7] {
        [
            &mut self.hematology,
            &mut self.clinical_chemistry,
            &mut self.hormones,
            &mut self.clinical_immunology,
            &mut self.metals_trace_elements,
            &mut self.micronutrients,
            &mut self.quotients,
        ]
    }

    fn category_lists(&self) -> [&Vec<Marker>; 7] {
        [
            &self.hematology,
            &self.clinical_chemistry,
            &self.hormones,
            &self.clinical_immunology,
            &self.metals_trace_elements,
            &self.micronutrients,
            &self.quotients,
        ]
    }

    fn remove_duplicates(&mut self) {
        for list in self.category_lists_mut() {
            dedupe_markers(list);
        }
        for list in self.fatty_acids.lists_mut() {
            dedupe_markers(list);
        }
    }

    fn sort_markers(&mut self) {
        for list in self.category_lists_mut() {
            list.sort_by(|a, b| a.test.cmp(&b.test));
        }
        for list in self.fatty_acids.lists_mut() {
            list.sort_by(|a, b| a.test.cmp(&b.test));
        }
    }

    fn calculate_confidence(&mut self) {
        let stats = &mut self.extraction_stats;
        stats.extraction_confidence = confidence_score(
            stats.markers_with_reference,
            stats.total_markers_found,
        );
    }

    /// Intersects the extracted marker names with the catalog and derives the
    /// validation status. Skipped entirely when the catalog is empty: counts
    /// stay zero and the status keeps its prior value.
    fn validate_against_catalog(&mut self, catalog: &ReferenceCatalog) {
        if catalog.is_empty() {
            tracing::info!("No reference markers available for validation");
            return;
        }

        let mut extracted: HashSet<String> = HashSet::new();
        for list in self.category_lists() {
            extracted.extend(list.iter().map(|m| m.test.to_lowercase()));
        }
        for list in self.fatty_acids.lists() {
            extracted.extend(list.iter().map(|m| m.test.to_lowercase()));
        }

        let with_reference = extracted.iter().filter(|n| catalog.contains(n)).count();

        let stats = &mut self.extraction_stats;
        stats.markers_with_reference = with_reference;
        stats.markers_without_reference = extracted.len() - with_reference;
        // Counts changed, so the confidence derived from them changes too.
        stats.extraction_confidence =
            confidence_score(stats.markers_with_reference, stats.total_markers_found);

        stats.validation_status = if stats.total_markers_found < 5 {
            "warning: low marker count".to_string()
        } else if stats.extraction_confidence < 50.0 {
            "warning: low confidence".to_string()
        } else {
            "success".to_string()
        };
    }
}

/// Share of markers found in the reference catalog, as a percentage rounded
/// to two decimals. Zero when nothing was extracted.
#[must_use]
pub fn confidence_score(markers_with_reference: usize, total_markers: usize) -> f64 {
    if total_markers == 0 {
        return 0.0;
    }
    let confidence = markers_with_reference as f64 / total_markers as f64 * 100.0;
    (confidence * 100.0).round() / 100.0
}

/// Collapses duplicate test names within one list, keeping the record with
/// the higher completeness score. Ties keep the first record seen; positions
/// of kept records are stable, so the pass is idempotent.
pub fn dedupe_markers(markers: &mut Vec<Marker>) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Marker> = Vec::new();

    for marker in markers.drain(..) {
        let key = marker.test.to_lowercase();
        match seen.get(&key) {
            None => {
                seen.insert(key, unique.len());
                unique.push(marker);
            }
            Some(&idx) => {
                if marker.completeness() > unique[idx].completeness() {
                    unique[idx] = marker;
                }
            }
        }
    }

    *markers = unique;
}
