//! Form-field strategy: patient and letterhead metadata.
//!
//! The form parser returns loose key/value pairs; field names are matched
//! against fixed keyword groups and written to the corresponding result
//! field. The first matching group wins and a field maps to at most one
//! destination.

use tracing::debug;

use crate::document::anchor::resolve_layout;
use crate::document::Document;
use crate::extraction::error::ExtractionError;
use crate::extraction::result::ParseResult;

#[derive(Debug, Clone, Copy)]
enum PatientField {
    Name,
    BirthDateGender,
    DiaryNumber,
    EntryDate,
    ExitDate,
}

#[derive(Debug, Clone, Copy)]
enum HeaderField {
    MedicalDirector,
    Scientists,
    Address,
    Contact,
    Insurance,
    CollectionDate,
    CollectionTime,
}

static PATIENT_GROUPS: &[(&[&str], PatientField)] = &[
    (&["name", "patient"], PatientField::Name),
    (&["geboren", "birth", "geburt"], PatientField::BirthDateGender),
    (&["tagebuch", "diary", "nummer"], PatientField::DiaryNumber),
    (&["eingang", "entry", "received"], PatientField::EntryDate),
    (&["ausgang", "exit", "report"], PatientField::ExitDate),
];

static HEADER_GROUPS: &[(&[&str], HeaderField)] = &[
    (&["direktor", "director", "leitung"], HeaderField::MedicalDirector),
    (&["wissenschaft", "scientist"], HeaderField::Scientists),
    (&["adresse", "address", "straße"], HeaderField::Address),
    (&["telefon", "phone", "contact"], HeaderField::Contact),
    (&["versicher", "insurance", "kasse"], HeaderField::Insurance),
    (&["entnahme", "collection", "datum"], HeaderField::CollectionDate),
    (&["uhrzeit", "time", "zeit"], HeaderField::CollectionTime),
];

/// Resolves every form field on every page and maps the recognized ones into
/// `patient_info` and `header`. Returns the number of fields mapped.
///
/// # Errors
///
/// Returns [`ExtractionError::NoFormFields`] when no page carries form
/// fields.
pub fn extract_form_fields(
    document: &Document,
    result: &mut ParseResult,
) -> Result<usize, ExtractionError> {
    if document.pages.iter().all(|p| p.form_fields.is_empty()) {
        return Err(ExtractionError::NoFormFields);
    }

    let mut mapped = 0;

    for page in &document.pages {
        for field in &page.form_fields {
            let name = resolve_layout(field.field_name.as_ref(), &document.text);
            let value = resolve_layout(field.field_value.as_ref(), &document.text);

            if name.is_empty() || value.is_empty() {
                continue;
            }

            if map_field(&name, value, result) {
                mapped += 1;
            } else {
                debug!("Unmapped form field '{name}'");
            }
        }
    }

    Ok(mapped)
}

fn map_field(field_name: &str, value: String, result: &mut ParseResult) -> bool {
    let name_lower = field_name.to_lowercase();

    for (keywords, field) in PATIENT_GROUPS {
        if keywords.iter().any(|kw| name_lower.contains(kw)) {
            let info = &mut result.patient_info;
            match field {
                PatientField::Name => info.name = value,
                PatientField::BirthDateGender => info.birth_date_gender = value,
                PatientField::DiaryNumber => info.diary_number = value,
                PatientField::EntryDate => info.entry_date = value,
                PatientField::ExitDate => info.exit_date = value,
            }
            return true;
        }
    }

    for (keywords, field) in HEADER_GROUPS {
        if keywords.iter().any(|kw| name_lower.contains(kw)) {
            let header = &mut result.header;
            match field {
                HeaderField::MedicalDirector => header.medical_director = value,
                HeaderField::Scientists => header.scientists = value,
                HeaderField::Address => header.address = value,
                HeaderField::Contact => header.contact = value,
                HeaderField::Insurance => header.insurance = value,
                HeaderField::CollectionDate => header.collection_date = value,
                HeaderField::CollectionTime => header.collection_time = value,
            }
            return true;
        }
    }

    false
}
