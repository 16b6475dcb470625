//! Sequence-derived mutation indicators.

use crate::sequence::NormalisedSequence;

/// Motifs treated as evidence of a TP53 mutation.
pub const TP53_MOTIFS: &[&str] = &["GATGAT", "ATAGAT"];

/// Motifs treated as evidence of an IDH mutation.
pub const IDH_MOTIFS: &[&str] = &["GGTCGT", "CGTAGT"];

/// CpG-island motif treated as evidence of MGMT promoter methylation.
pub const MGMT_MOTIF: &str = "CGCG";

/// GC fraction above which MGMT methylation is assumed.
pub const MGMT_GC_THRESHOLD: f64 = 0.6;

/// Markers detected in a submitted sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationIndicators {
    pub tp53_mutation: bool,
    pub idh_mutation: bool,
    pub mgmt_methylated: bool,
}

impl MutationIndicators {
    /// Scans `sequence` for the known motifs.
    ///
    /// `gc_content` is passed in rather than recomputed so the report and the indicators
    /// always agree on the same value.
    pub fn detect(sequence: &NormalisedSequence, gc_content: Option<f64>) -> Self {
        let any = |motifs: &[&str]| motifs.iter().any(|m| sequence.contains(m));

        Self {
            tp53_mutation: any(TP53_MOTIFS),
            idh_mutation: any(IDH_MOTIFS),
            mgmt_methylated: gc_content.is_some_and(|gc| gc > MGMT_GC_THRESHOLD)
                || sequence.contains(MGMT_MOTIF),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(raw: &str) -> MutationIndicators {
        let seq = NormalisedSequence::new(raw);
        let gc = seq.gc_content();
        MutationIndicators::detect(&seq, gc)
    }

    #[test]
    fn detects_each_motif_family() {
        let found = detect("aaGATGATaaGGTCGTaa");
        assert!(found.tp53_mutation);
        assert!(found.idh_mutation);
        assert!(!found.mgmt_methylated);
    }

    #[test]
    fn high_gc_implies_methylation() {
        assert!(detect("GGGCCCGGGA").mgmt_methylated);
    }

    #[test]
    fn cpg_motif_implies_methylation_at_low_gc() {
        let found = detect("AAAATTTTCGCGAAAATTTT");
        assert!(found.mgmt_methylated);
        assert!(!found.tp53_mutation);
    }

    #[test]
    fn plain_sequence_has_no_markers() {
        assert_eq!(detect("ATATATATATAT"), MutationIndicators::default());
    }
}
