use std::io::Write;

use labmarker::extraction::ReferenceCatalog;

const HEADER: &str = "Markername,Unit,Optimalbereich,very low,low,optimal,high,too high\n";

fn write_catalog(rows: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{HEADER}{rows}").unwrap();
    file
}

#[test]
fn test_load_catalog() {
    let file = write_catalog(
        "Ferritin,ng/ml,30-300,<15,15-29,30-300,301-400,>400\n\
         Hämoglobin,g/dl,13.5-17.5,<12.0,12.0-13.4,13.5-17.5,17.6-18.5,>18.5\n",
    );

    let catalog = ReferenceCatalog::load(file.path()).unwrap();

    assert_eq!(catalog.len(), 2);

    let ferritin = catalog.get("Ferritin").unwrap();
    assert_eq!(ferritin.original_name, "Ferritin");
    assert_eq!(ferritin.unit, "ng/ml");
    assert_eq!(ferritin.optimal_range, "30-300");
    assert_eq!(ferritin.very_low, "<15");
    assert_eq!(ferritin.too_high, ">400");
}

#[test]
fn test_lookup_is_case_insensitive() {
    let file = write_catalog("Ferritin,ng/ml,30-300,,,,,\n");
    let catalog = ReferenceCatalog::load(file.path()).unwrap();

    assert!(catalog.contains("ferritin"));
    assert!(catalog.contains("FERRITIN"));
    assert!(!catalog.contains("Transferrin"));
}

#[test]
fn test_rows_without_name_are_skipped() {
    let file = write_catalog(",ng/ml,30-300,,,,,\nFerritin,ng/ml,30-300,,,,,\n");
    let catalog = ReferenceCatalog::load(file.path()).unwrap();

    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_names_are_trimmed() {
    let file = write_catalog(" Ferritin ,ng/ml,30-300,,,,,\n");
    let catalog = ReferenceCatalog::load(file.path()).unwrap();

    assert_eq!(catalog.get("ferritin").unwrap().original_name, "Ferritin");
}

#[test]
fn test_missing_file_fails_load() {
    assert!(ReferenceCatalog::load("does/not/exist.csv").is_err());
}

#[test]
fn test_missing_file_degrades_to_empty_catalog() {
    let catalog = ReferenceCatalog::load_or_empty("does/not/exist.csv");

    assert!(catalog.is_empty());
}
