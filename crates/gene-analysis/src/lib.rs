//! # Gene Analysis
//!
//! Reference implementation of the gene-analysis service used by TumorScope.
//!
//! Given a tumor type and a DNA sequence this crate produces either:
//! - a [`GeneReport`] with GC content, mutation indicators and treatment recommendations, or
//! - an [`Analysis::TooShort`] rejection when the sequence is too short to analyse.
//!
//! The analysis is deterministic: the same input always yields the same report.
//!
//! **No transport concerns**: serving this over HTTP belongs in `api-rest`.

mod indicators;
mod sequence;
mod treatments;

pub use indicators::MutationIndicators;
pub use sequence::NormalisedSequence;
pub use treatments::{personalized_treatments, standard_treatments, Treatment};

/// Minimum number of bases analysed when no other value is configured.
pub const DEFAULT_MIN_SEQUENCE_LEN: usize = 20;

/// Errors returned when configuring the analyzer.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Full analysis of a sequence long enough to analyse.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneReport {
    /// Lower-cased tumor type the report was produced for.
    pub tumor_type: String,
    /// `None` when the sequence contained no countable bases.
    pub gc_content: Option<f64>,
    pub mutation_indicators: MutationIndicators,
    pub standard_treatments: Vec<Treatment>,
    pub personalized_treatments: Vec<Treatment>,
}

/// Outcome of [`GeneAnalyzer::analyze`].
#[derive(Clone, Debug, PartialEq)]
pub enum Analysis {
    Report(GeneReport),
    TooShort { message: String },
}

/// Stateless analyzer configured with a minimum sequence length.
#[derive(Clone, Debug)]
pub struct GeneAnalyzer {
    min_sequence_len: usize,
}

impl Default for GeneAnalyzer {
    fn default() -> Self {
        Self {
            min_sequence_len: DEFAULT_MIN_SEQUENCE_LEN,
        }
    }
}

impl GeneAnalyzer {
    /// Creates an analyzer that rejects sequences shorter than `min_sequence_len` bases.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] if `min_sequence_len` is zero, since an empty
    /// sequence can never be analysed.
    pub fn new(min_sequence_len: usize) -> AnalysisResult<Self> {
        if min_sequence_len == 0 {
            return Err(AnalysisError::InvalidInput(
                "minimum sequence length must be at least 1".into(),
            ));
        }
        Ok(Self { min_sequence_len })
    }

    pub fn min_sequence_len(&self) -> usize {
        self.min_sequence_len
    }

    /// Parse the minimum sequence length from an optional string value.
    ///
    /// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MIN_SEQUENCE_LEN`].
    pub fn min_sequence_len_from_env_value(value: Option<String>) -> AnalysisResult<usize> {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match value {
            None => Ok(DEFAULT_MIN_SEQUENCE_LEN),
            Some(v) => v.parse::<usize>().map_err(|e| {
                AnalysisError::InvalidInput(format!("invalid minimum sequence length '{v}': {e}"))
            }),
        }
    }

    /// Analyse `dna_sequence` for the given `tumor_type`.
    pub fn analyze(&self, tumor_type: &str, dna_sequence: &str) -> Analysis {
        let tumor_type = tumor_type.trim().to_lowercase();
        let sequence = NormalisedSequence::new(dna_sequence);

        if sequence.len() < self.min_sequence_len {
            tracing::debug!(
                "rejecting sequence of {} bases (minimum {})",
                sequence.len(),
                self.min_sequence_len
            );
            return Analysis::TooShort {
                message: format!(
                    "Sequence too short for reliable analysis (minimum {} bases, got {})",
                    self.min_sequence_len,
                    sequence.len()
                ),
            };
        }

        let gc_content = sequence.gc_content();
        let mutation_indicators = MutationIndicators::detect(&sequence, gc_content);

        Analysis::Report(GeneReport {
            standard_treatments: standard_treatments(&tumor_type),
            personalized_treatments: personalized_treatments(&mutation_indicators),
            tumor_type,
            gc_content,
            mutation_indicators,
        })
    }
}
