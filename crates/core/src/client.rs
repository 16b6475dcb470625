//! Service seams for the two workflow phases.
//!
//! The orchestrator only talks to these traits, so tests can drive it with in-memory fakes
//! and the binaries plug in the HTTP implementations from [`crate::http`].

use crate::model::{GeneAnalysisOutcome, PredictionReceipt};
use crate::selection::UploadSelection;
use crate::ClientError;
use async_trait::async_trait;

/// Classifies an MRI image into a tumor type.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, image: &UploadSelection) -> Result<PredictionReceipt, ClientError>;
}

/// Analyses a DNA sequence in the context of a predicted tumor type.
///
/// A short-sequence alert is returned as `Ok(GeneAnalysisOutcome::Alert(..))`; `Err` is
/// reserved for transport and protocol failures.
#[async_trait]
pub trait GeneAnalysisClient: Send + Sync {
    async fn analyze(
        &self,
        tumor_type: &str,
        dna_sequence: &str,
    ) -> Result<GeneAnalysisOutcome, ClientError>;
}
