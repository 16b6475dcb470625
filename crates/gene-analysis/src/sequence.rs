//! Nucleotide sequence normalisation and base composition.

/// A DNA sequence with whitespace removed and bases upper-cased.
///
/// Characters other than `A`, `C`, `G` and `T` are kept (so motif searches see the sequence as
/// submitted) but are not counted as valid bases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalisedSequence(String);

impl NormalisedSequence {
    /// Normalises raw user input.
    pub fn new(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters after normalisation.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `motif` occurs anywhere in the sequence.
    pub fn contains(&self, motif: &str) -> bool {
        self.0.contains(motif)
    }

    /// Fraction of G/C among the counted A/C/G/T bases.
    ///
    /// Returns `None` when no valid base was counted, e.g. a run of `N`s.
    pub fn gc_content(&self) -> Option<f64> {
        let mut gc = 0usize;
        let mut counted = 0usize;
        for c in self.0.chars() {
            match c {
                'G' | 'C' => {
                    gc += 1;
                    counted += 1;
                }
                'A' | 'T' => counted += 1,
                _ => {}
            }
        }

        if counted == 0 {
            None
        } else {
            Some(gc as f64 / counted as f64)
        }
    }
}
