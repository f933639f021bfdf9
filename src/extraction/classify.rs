//! Domain classification of markers into medical categories.
//!
//! Classification walks an explicitly ordered rule list; the first category
//! whose keyword list or pattern hits wins. The order is part of the
//! contract: ambiguous names (a quotient of two metals, say) resolve to the
//! earliest declared match, and anything unmatched falls back to clinical
//! chemistry.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The eight top-level marker categories of a lab report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hematology,
    #[default]
    ClinicalChemistry,
    Hormones,
    ClinicalImmunology,
    MetalsTraceElements,
    Micronutrients,
    FattyAcids,
    Quotients,
}

impl Category {
    /// The serialized (snake_case) name of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hematology => "hematology",
            Category::ClinicalChemistry => "clinical_chemistry",
            Category::Hormones => "hormones",
            Category::ClinicalImmunology => "clinical_immunology",
            Category::MetalsTraceElements => "metals_trace_elements",
            Category::Micronutrients => "micronutrients",
            Category::FattyAcids => "fatty_acids",
            Category::Quotients => "quotients",
        }
    }

    /// Parses a serialized category name, e.g. from a trained processor's
    /// category label.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "hematology" => Some(Category::Hematology),
            "clinical_chemistry" => Some(Category::ClinicalChemistry),
            "hormones" => Some(Category::Hormones),
            "clinical_immunology" => Some(Category::ClinicalImmunology),
            "metals_trace_elements" => Some(Category::MetalsTraceElements),
            "micronutrients" => Some(Category::Micronutrients),
            "fatty_acids" => Some(Category::FattyAcids),
            "quotients" => Some(Category::Quotients),
            _ => None,
        }
    }
}

/// Subcategories of the fatty-acid panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FattyAcidClass {
    #[default]
    Omega3,
    Omega6,
    Monounsaturated,
    Trans,
    Saturated,
}

struct CategoryRule {
    category: Category,
    keywords: &'static [&'static str],
    pattern: &'static str,
}

/// Declaration order doubles as match priority.
static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Hematology,
        keywords: &[
            "leukoz",
            "erythroz",
            "hämoglobin",
            "hämatokrit",
            "mcv",
            "mch",
            "mchc",
            "thromboz",
            "rdw",
            "neutrophil",
            "lymphoz",
            "monoz",
            "eosinophil",
            "basophil",
            "hematocrit",
            "platelets",
        ],
        pattern: r"(?i)(leuko|erythro|hb|hct|mcv|mch|mchc|plt|rdw)",
    },
    CategoryRule {
        category: Category::ClinicalChemistry,
        keywords: &[
            "ferritin",
            "gesamteiweiß",
            "calcium",
            "protein",
            "albumin",
            "glucose",
            "creatinine",
            "urea",
            "bilirubin",
            "ast",
            "alt",
        ],
        pattern: r"(?i)(ferritin|protein|calcium|glucose|creatinin|urea)",
    },
    CategoryRule {
        category: Category::Hormones,
        keywords: &[
            "t3",
            "t4",
            "tsh",
            "freies",
            "hormone",
            "cortisol",
            "testosterone",
            "estradiol",
            "insulin",
            "dhea",
        ],
        pattern: r"(?i)(t3|t4|tsh|ft3|ft4|cortisol|testosteron)",
    },
    CategoryRule {
        category: Category::ClinicalImmunology,
        keywords: &[
            "crp",
            "immunoglobulin",
            "igg",
            "iga",
            "igm",
            "ige",
            "interleukin",
            "complement",
            "antibody",
        ],
        pattern: r"(?i)(crp|ig[agme]|interleukin|complement)",
    },
    CategoryRule {
        category: Category::MetalsTraceElements,
        keywords: &[
            "magnesium",
            "selen",
            "zink",
            "kupfer",
            "chrom",
            "blei",
            "cadmium",
            "nickel",
            "quecksilber",
            "kalium",
            "natrium",
            "phosphor",
            "mangan",
            "molybdän",
            "iron",
            "copper",
            "zinc",
        ],
        pattern: r"(?i)(mg|se|zn|cu|cr|pb|cd|ni|hg|k|na|p|mn|mo|fe)",
    },
    CategoryRule {
        category: Category::Micronutrients,
        keywords: &[
            "vitamin",
            "folsäure",
            "cobalamin",
            "holotrans",
            "biotin",
            "niacin",
            "riboflavin",
            "thiamin",
            "folic acid",
            "b12",
        ],
        pattern: r"(?i)(vitamin|vit|folsäure|folate|b12|cobalamin)",
    },
    CategoryRule {
        category: Category::FattyAcids,
        keywords: &[
            "linol",
            "omega",
            "epa",
            "dha",
            "arachidon",
            "fettsäuren",
            "palmitin",
            "stearin",
            "fatty acid",
            "lipid",
        ],
        pattern: r"(?i)(omega|epa|dha|linol|arachidon|fatty|lipid)",
    },
    CategoryRule {
        category: Category::Quotients,
        keywords: &[
            "index",
            "verhältnis",
            "quotient",
            "ratio",
            "aa/epa",
            "omega-6/omega-3",
            "ldl/hdl",
        ],
        pattern: r"(?i)(index|ratio|quotient|verhältnis|/)",
    },
];

static CATEGORY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|rule| Regex::new(rule.pattern).expect("valid category pattern"))
        .collect()
});

/// Assigns a marker name to a category. Total: unmatched names default to
/// [`Category::ClinicalChemistry`].
#[must_use]
pub fn classify(test_name: &str) -> Category {
    let test_lower = test_name.to_lowercase();

    for (rule, pattern) in CATEGORY_RULES.iter().zip(CATEGORY_PATTERNS.iter()) {
        if rule.keywords.iter().any(|kw| test_lower.contains(kw)) {
            return rule.category;
        }
        if pattern.is_match(test_name) {
            return rule.category;
        }
    }

    Category::ClinicalChemistry
}

static OMEGA_3_KEYWORDS: &[&str] = &[
    "alpha-linolen",
    "epa",
    "dha",
    "docosapentaen-n3",
    "omega-3",
    "omega 3",
];
static OMEGA_6_KEYWORDS: &[&str] = &[
    "gamma-linolen",
    "dihomo",
    "linol",
    "arachidon",
    "docosatetraen",
    "docosapentaen-n6",
    "omega-6",
    "omega 6",
];
static MONOUNSATURATED_KEYWORDS: &[&str] = &[
    "olein",
    "palmitolein",
    "gondo",
    "nervon",
    "einfach ungesättigt",
];
static TRANS_KEYWORDS: &[&str] = &["trans", "elaidin"];
static SATURATED_KEYWORDS: &[&str] = &[
    "myristin",
    "palmitin",
    "stearin",
    "arachin",
    "behen",
    "lignocerin",
    "gesättigt",
    "saturated",
];

/// Assigns a fatty-acid marker to its subcategory. Names without a subtype
/// keyword default to [`FattyAcidClass::Omega3`].
#[must_use]
pub fn classify_fatty_acid(test_name: &str) -> FattyAcidClass {
    let test_lower = test_name.to_lowercase();

    let groups: [(&[&str], FattyAcidClass); 5] = [
        (OMEGA_3_KEYWORDS, FattyAcidClass::Omega3),
        (OMEGA_6_KEYWORDS, FattyAcidClass::Omega6),
        (MONOUNSATURATED_KEYWORDS, FattyAcidClass::Monounsaturated),
        (TRANS_KEYWORDS, FattyAcidClass::Trans),
        (SATURATED_KEYWORDS, FattyAcidClass::Saturated),
    ];

    for (keywords, class) in groups {
        if keywords.iter().any(|kw| test_lower.contains(kw)) {
            return class;
        }
    }

    FattyAcidClass::Omega3
}
