//! The medication catalog offered on the manual-entry form.
//!
//! Each entry is `"<Name> – <description>"`. The interaction checker drops
//! everything from the en dash onward before matching, so entries can be
//! stored on a patient exactly as selected.

use qubitry_interactions::normalize;

pub const CANCER_DRUGS: [&str; 17] = [
    "Carboplatin – Platinum-based chemotherapy (ovarian, lung, head & neck cancers)",
    "Fluorouracil (5-FU) – Antimetabolite (colon, gastric, pancreatic cancers)",
    "Doxorubicin – Anthracycline (breast, bladder, lymphoma, leukemia)",
    "Etoposide – Topoisomerase inhibitor (lung cancer, testicular cancer)",
    "Vincristine – Vinca alkaloid (leukemia, lymphoma, pediatric cancers)",
    "Vinblastine – Vinca alkaloid (lymphoma, testicular cancer, breast cancer)",
    "Ifosfamide – Alkylating agent (sarcoma, testicular cancer, lymphoma)",
    "Topotecan – Topoisomerase I inhibitor (ovarian, cervical, lung cancers)",
    "Cisplatin – Platinum chemotherapy (lung, ovarian, bladder, testicular cancer)",
    "Cyclophosphamide – Alkylating agent (breast cancer, lymphoma, leukemia)",
    "Paclitaxel – Taxane (breast, ovarian, lung cancer, Kaposi sarcoma)",
    "Methotrexate – Antimetabolite (breast, lymphoma, leukemia, osteosarcoma)",
    "Trastuzumab – Targeted therapy (HER2+ breast & gastric cancer)",
    "Prednisone – Corticosteroid (leukemia, lymphoma supportive therapy)",
    "Bleomycin – Antibiotic chemotherapy (testicular cancer, lymphoma, cervical cancer)",
    "Leucovorin – Folinic acid, enhances 5-FU efficacy (colorectal cancer)",
    "Erlotinib – Targeted therapy (non-small cell lung cancer, pancreatic cancer)",
];

/// True when `entry` is one of the catalog strings, verbatim.
pub fn contains(entry: &str) -> bool {
    CANCER_DRUGS.contains(&entry)
}

/// Find the catalog entry whose drug name equals `name`.
///
/// Both sides are normalized, so `"Cisplatin"` and the full catalog string
/// both resolve to the same entry.
pub fn lookup(name: &str) -> Option<&'static str> {
    let wanted = normalize(name);
    CANCER_DRUGS
        .iter()
        .copied()
        .find(|entry| normalize(entry) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_an_en_dash_description() {
        for entry in CANCER_DRUGS {
            let (name, description) = entry.split_once(" – ").unwrap();
            assert!(!name.is_empty() && !description.is_empty(), "bad entry: {entry}");
        }
    }

    #[test]
    fn lookup_by_bare_name() {
        assert_eq!(lookup("Erlotinib"), Some(CANCER_DRUGS[16]));
        assert_eq!(lookup(CANCER_DRUGS[0]), Some(CANCER_DRUGS[0]));
        assert_eq!(lookup("Aspirin"), None);
    }

    #[test]
    fn fluorouracil_keeps_its_abbreviation() {
        assert_eq!(normalize(CANCER_DRUGS[1]), "Fluorouracil (5-FU)");
        assert!(lookup("Fluorouracil").is_none());
    }

    #[test]
    fn contains_is_verbatim() {
        assert!(contains(CANCER_DRUGS[3]));
        assert!(!contains("Etoposide"));
    }
}
