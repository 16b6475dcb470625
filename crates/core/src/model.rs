//! Domain types for the two workflow phases.
//!
//! These are produced at the network boundary (see [`crate::classify`]) and never carry
//! wire-format ambiguity: an analysis response is either a [`GeneAnalysisResult`] or a
//! [`ShortSequenceAlert`], never a bag of optional fields.

use std::fmt;

/// Tumor-type label produced by the prediction service.
///
/// The label is trimmed and guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TumorPrediction(String);

impl TumorPrediction {
    /// Returns `None` if `label` is empty or whitespace.
    pub fn new(label: impl AsRef<str>) -> Option<Self> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TumorPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TumorPrediction {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Successful outcome of the prediction phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionReceipt {
    /// Status message to surface to the user.
    pub message: String,
    pub prediction: TumorPrediction,
    /// Server-side storage location, when the service reports one.
    pub file_path: Option<String>,
}

/// A recommended treatment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treatment {
    pub name: String,
    pub mechanism: String,
    /// Only set for personalized treatments.
    pub reason: Option<String>,
}

/// Sequence-derived markers reported alongside a result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationIndicators {
    pub tp53_mutation: bool,
    pub idh_mutation: bool,
    pub mgmt_methylated: bool,
}

/// Genomic summary and treatment recommendations for one sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneAnalysisResult {
    pub tumor_type: String,
    /// `None` when the service could not compute it.
    pub gc_content: Option<f64>,
    pub mutation_indicators: Option<MutationIndicators>,
    pub standard_treatments: Vec<Treatment>,
    pub personalized_treatments: Vec<Treatment>,
}

/// The service judged the sequence unsuitable for analysis.
///
/// This is a valid outcome, not a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortSequenceAlert {
    pub message: String,
}

/// Classified response of the analysis phase.
#[derive(Clone, Debug, PartialEq)]
pub enum GeneAnalysisOutcome {
    Result(GeneAnalysisResult),
    Alert(ShortSequenceAlert),
}
