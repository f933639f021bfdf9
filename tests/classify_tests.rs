use labmarker::extraction::{classify, classify_fatty_acid, Category, FattyAcidClass};

#[test]
fn test_hematology_keyword() {
    assert_eq!(classify("Hämoglobin"), Category::Hematology);
    assert_eq!(classify("Thrombozyten"), Category::Hematology);
}

#[test]
fn test_clinical_chemistry_keyword() {
    assert_eq!(classify("Ferritin"), Category::ClinicalChemistry);
    assert_eq!(classify("Albumin"), Category::ClinicalChemistry);
}

#[test]
fn test_hormones_keyword() {
    assert_eq!(classify("TSH"), Category::Hormones);
    assert_eq!(classify("freies T3"), Category::Hormones);
}

#[test]
fn test_immunology_keyword() {
    assert_eq!(classify("CRP"), Category::ClinicalImmunology);
}

#[test]
fn test_metals_keyword() {
    assert_eq!(classify("Zink"), Category::MetalsTraceElements);
    assert_eq!(classify("Selen"), Category::MetalsTraceElements);
}

#[test]
fn test_micronutrients_keyword() {
    assert_eq!(classify("Vitamin B12"), Category::Micronutrients);
}

#[test]
fn test_fatty_acid_keyword() {
    assert_eq!(classify("Linolsäure"), Category::FattyAcids);
    assert_eq!(classify("DHA"), Category::FattyAcids);
}

#[test]
fn test_quotients_keyword() {
    assert_eq!(classify("LDL/HDL"), Category::Quotients);
}

#[test]
fn test_declaration_order_breaks_ties() {
    // Matches both the hematology keyword list and later patterns; the
    // earliest declared category must win.
    assert_eq!(classify("MCV"), Category::Hematology);
}

#[test]
fn test_unmatched_name_defaults_to_clinical_chemistry() {
    assert_eq!(classify("Xyzabc"), Category::ClinicalChemistry);
}

#[test]
fn test_classification_is_total_and_deterministic() {
    let names = ["Hämoglobin", "Ferritin", "TSH", "CRP", "Zink", "Xyzabc", "ü"];

    for name in names {
        let first = classify(name);
        let second = classify(name);
        assert_eq!(first, second, "classification of {name} must be stable");
    }
}

#[test]
fn test_fatty_acid_omega_3() {
    assert_eq!(classify_fatty_acid("EPA"), FattyAcidClass::Omega3);
    assert_eq!(
        classify_fatty_acid("alpha-Linolensäure"),
        FattyAcidClass::Omega3
    );
}

#[test]
fn test_fatty_acid_omega_6() {
    assert_eq!(classify_fatty_acid("Linolsäure"), FattyAcidClass::Omega6);
    assert_eq!(
        classify_fatty_acid("Arachidonsäure"),
        FattyAcidClass::Omega6
    );
}

#[test]
fn test_fatty_acid_monounsaturated() {
    assert_eq!(
        classify_fatty_acid("Oleinsäure"),
        FattyAcidClass::Monounsaturated
    );
}

#[test]
fn test_fatty_acid_trans() {
    assert_eq!(classify_fatty_acid("Elaidinsäure"), FattyAcidClass::Trans);
}

#[test]
fn test_fatty_acid_saturated() {
    assert_eq!(
        classify_fatty_acid("Palmitinsäure"),
        FattyAcidClass::Saturated
    );
}

#[test]
fn test_fatty_acid_defaults_to_omega_3() {
    assert_eq!(classify_fatty_acid("Unbekannt"), FattyAcidClass::Omega3);
}
