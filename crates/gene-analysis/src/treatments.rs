//! Treatment catalogue.
//!
//! Standard treatments depend only on the tumor type; personalized treatments depend only on
//! the mutation indicators. Both lists keep a fixed order so repeated analyses of the same
//! input produce identical output.

use crate::indicators::MutationIndicators;

/// A recommended treatment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treatment {
    pub name: String,
    pub mechanism: String,
    /// Why the treatment was recommended. Only set for personalized treatments.
    pub reason: Option<String>,
}

impl Treatment {
    fn standard(name: &str, mechanism: &str) -> Self {
        Self {
            name: name.to_string(),
            mechanism: mechanism.to_string(),
            reason: None,
        }
    }

    fn personalized(name: &str, mechanism: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            mechanism: mechanism.to_string(),
            reason: Some(reason.to_string()),
        }
    }
}

/// Standard-of-care treatments for a tumor type.
///
/// `tumor_type` is matched case-insensitively. Unknown types, including "no tumor", have none.
pub fn standard_treatments(tumor_type: &str) -> Vec<Treatment> {
    match tumor_type.trim().to_lowercase().as_str() {
        "glioma" => vec![Treatment::standard(
            "Temozolomide",
            "Alkylating chemotherapy",
        )],
        "meningioma" => vec![
            Treatment::standard("Surgery", "Primary treatment"),
            Treatment::standard(
                "Radiation Therapy",
                "Used for residual or aggressive tumors",
            ),
        ],
        "pituitary tumor" => vec![Treatment::standard(
            "Bromocriptine",
            "Dopamine agonist for hormone-secreting tumors",
        )],
        _ => Vec::new(),
    }
}

/// Treatments targeted at the detected markers.
pub fn personalized_treatments(indicators: &MutationIndicators) -> Vec<Treatment> {
    let mut treatments = Vec::new();

    if indicators.idh_mutation {
        treatments.push(Treatment::personalized(
            "Vorasidenib",
            "IDH inhibitor",
            "IDH mutation detected",
        ));
    }
    if indicators.mgmt_methylated {
        treatments.push(Treatment::personalized(
            "Temozolomide",
            "DNA alkylating agent",
            "MGMT methylation detected",
        ));
    }
    if indicators.tp53_mutation {
        treatments.push(Treatment::personalized(
            "APR-246",
            "TP53 reactivator",
            "TP53 mutation detected",
        ));
    }

    treatments
}
