//! The two-phase workflow state machine.
//!
//! [`Workflow`] is a plain value: every transition is a method taking `&mut self`, and nothing
//! in here performs I/O. A request is split into a `begin_*` call, which checks
//! preconditions and hands out a [`RequestTicket`], and a `finish_*` call, which applies the
//! response only if the ticket is still current. Tickets go stale when the workflow is
//! reset, and an in-flight analysis goes stale when a newer prediction lands.
//!
//! The current analysis outcome is a single `Option<AnalysisView>`, so a result and an alert
//! can never both be current.

use crate::model::{
    GeneAnalysisOutcome, GeneAnalysisResult, PredictionReceipt, ShortSequenceAlert,
    TumorPrediction,
};
use crate::selection::UploadSelection;
use crate::validation::prepare_sequence;
use crate::{ClientError, WorkflowError};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Upload,
    Analysis,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Upload => f.write_str("upload"),
            RequestKind::Analysis => f.write_str("analysis"),
        }
    }
}

/// Identifies one outstanding request.
///
/// `epoch` is the workflow epoch at the time the request was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: Uuid,
    pub epoch: u64,
    pub kind: RequestKind,
}

impl RequestTicket {
    fn new(kind: RequestKind, epoch: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            epoch,
            kind,
        }
    }
}

/// Everything needed to send one analysis request.
#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    pub ticket: RequestTicket,
    pub tumor_type: TumorPrediction,
    pub dna_sequence: String,
}

/// The analysis outcome currently on display.
#[derive(Clone, Debug, PartialEq)]
pub enum AnalysisView {
    Ready(GeneAnalysisResult),
    Rejected(ShortSequenceAlert),
}

impl From<GeneAnalysisOutcome> for AnalysisView {
    fn from(outcome: GeneAnalysisOutcome) -> Self {
        match outcome {
            GeneAnalysisOutcome::Result(result) => AnalysisView::Ready(result),
            GeneAnalysisOutcome::Alert(alert) => AnalysisView::Rejected(alert),
        }
    }
}

/// Observable state, derived from a [`Workflow`].
///
/// Outstanding requests take precedence: while an analysis is in flight the state is
/// `AwaitingAnalysis` even though the previous outcome is still displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    AwaitingPrediction,
    PredictionReady,
    AwaitingAnalysis,
    AnalysisReady,
    AnalysisRejected(ShortSequenceAlert),
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Idle => f.write_str("idle"),
            WorkflowState::AwaitingPrediction => f.write_str("awaiting prediction"),
            WorkflowState::PredictionReady => f.write_str("prediction ready"),
            WorkflowState::AwaitingAnalysis => f.write_str("awaiting analysis"),
            WorkflowState::AnalysisReady => f.write_str("analysis ready"),
            WorkflowState::AnalysisRejected(_) => f.write_str("analysis rejected"),
        }
    }
}

#[derive(Clone, Debug)]
struct PendingUpload {
    id: Uuid,
    selection: UploadSelection,
}

#[derive(Clone, Debug, Default)]
pub struct Workflow {
    selection: Option<UploadSelection>,
    sequence: String,
    prediction: Option<TumorPrediction>,
    status_message: Option<String>,
    analysis: Option<AnalysisView>,
    epoch: u64,
    pending_upload: Option<PendingUpload>,
    pending_analysis: Option<Uuid>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WorkflowState {
        if self.pending_analysis.is_some() {
            return WorkflowState::AwaitingAnalysis;
        }
        if self.pending_upload.is_some() {
            return WorkflowState::AwaitingPrediction;
        }
        match &self.analysis {
            Some(AnalysisView::Ready(_)) => WorkflowState::AnalysisReady,
            Some(AnalysisView::Rejected(alert)) => WorkflowState::AnalysisRejected(alert.clone()),
            None if self.prediction.is_some() => WorkflowState::PredictionReady,
            None => WorkflowState::Idle,
        }
    }

    /// Replace the file to upload. The current prediction stays valid.
    pub fn select_upload(&mut self, selection: UploadSelection) {
        tracing::debug!("selected '{}' for upload", selection.file_name());
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn set_sequence(&mut self, sequence: impl Into<String>) {
        self.sequence = sequence.into();
    }

    pub fn selection(&self) -> Option<&UploadSelection> {
        self.selection.as_ref()
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn prediction(&self) -> Option<&TumorPrediction> {
        self.prediction.as_ref()
    }

    /// Status message of the last successful prediction.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn analysis(&self) -> Option<&AnalysisView> {
        self.analysis.as_ref()
    }

    pub fn result(&self) -> Option<&GeneAnalysisResult> {
        match &self.analysis {
            Some(AnalysisView::Ready(result)) => Some(result),
            _ => None,
        }
    }

    pub fn alert(&self) -> Option<&ShortSequenceAlert> {
        match &self.analysis {
            Some(AnalysisView::Rejected(alert)) => Some(alert),
            _ => None,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_upload_in_flight(&self) -> bool {
        self.pending_upload.is_some()
    }

    pub fn is_analysis_in_flight(&self) -> bool {
        self.pending_analysis.is_some()
    }

    /// Start a prediction request for the current selection.
    ///
    /// The selection is consumed; it is put back if the request fails and nothing newer has
    /// been selected meanwhile.
    pub fn begin_upload(&mut self) -> Result<(RequestTicket, UploadSelection), WorkflowError> {
        if self.pending_upload.is_some() {
            return Err(WorkflowError::UploadInFlight);
        }
        let selection = self.selection.take().ok_or(WorkflowError::NoUploadSelected)?;

        let ticket = RequestTicket::new(RequestKind::Upload, self.epoch);
        self.pending_upload = Some(PendingUpload {
            id: ticket.id,
            selection: selection.clone(),
        });
        tracing::info!("awaiting prediction for '{}'", selection.file_name());
        Ok((ticket, selection))
    }

    /// Apply the response to an upload started with [`Workflow::begin_upload`].
    ///
    /// A successful prediction replaces the previous one and clears the analysis outcome,
    /// which belonged to the old tumor type. An analysis still in flight for the old tumor
    /// type is abandoned.
    pub fn finish_upload(
        &mut self,
        ticket: RequestTicket,
        response: Result<PredictionReceipt, ClientError>,
    ) -> Result<PredictionReceipt, WorkflowError> {
        let pending = match self.pending_upload.take() {
            Some(pending) if ticket.epoch == self.epoch && pending.id == ticket.id => pending,
            other => {
                self.pending_upload = other;
                tracing::warn!("discarding stale {} response {}", ticket.kind, ticket.id);
                return Err(WorkflowError::Superseded);
            }
        };

        match response {
            Ok(receipt) => {
                tracing::info!("prediction ready: {}", receipt.prediction);
                self.prediction = Some(receipt.prediction.clone());
                self.status_message = Some(receipt.message.clone());
                self.analysis = None;
                self.pending_analysis = None;
                Ok(receipt)
            }
            Err(err) => {
                if self.selection.is_none() {
                    self.selection = Some(pending.selection);
                }
                Err(WorkflowError::Client(err))
            }
        }
    }

    /// Start an analysis request for the current sequence and prediction.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest, WorkflowError> {
        if self.pending_analysis.is_some() {
            return Err(WorkflowError::AnalysisInFlight);
        }
        let tumor_type = self.prediction.clone().ok_or(WorkflowError::NoPrediction)?;
        let dna_sequence = prepare_sequence(&self.sequence).ok_or(WorkflowError::EmptySequence)?;

        let ticket = RequestTicket::new(RequestKind::Analysis, self.epoch);
        self.pending_analysis = Some(ticket.id);
        tracing::info!(
            "awaiting analysis of {} bases for '{tumor_type}'",
            dna_sequence.len()
        );
        Ok(AnalysisRequest {
            ticket,
            tumor_type,
            dna_sequence,
        })
    }

    /// Apply the response to an analysis started with [`Workflow::begin_analysis`].
    ///
    /// The new outcome replaces the previous one in a single assignment. A failed request
    /// leaves the previous outcome in place.
    pub fn finish_analysis(
        &mut self,
        ticket: RequestTicket,
        response: Result<GeneAnalysisOutcome, ClientError>,
    ) -> Result<GeneAnalysisOutcome, WorkflowError> {
        if ticket.epoch != self.epoch || self.pending_analysis != Some(ticket.id) {
            tracing::warn!("discarding stale {} response {}", ticket.kind, ticket.id);
            return Err(WorkflowError::Superseded);
        }
        self.pending_analysis = None;

        let outcome = response?;
        match &outcome {
            GeneAnalysisOutcome::Result(result) => {
                tracing::info!("analysis ready for '{}'", result.tumor_type)
            }
            GeneAnalysisOutcome::Alert(alert) => {
                tracing::info!("analysis rejected: {}", alert.message)
            }
        }
        self.analysis = Some(AnalysisView::from(outcome.clone()));
        Ok(outcome)
    }

    /// Give up on a request whose response will never be applied, e.g. because the caller
    /// stopped waiting for it.
    ///
    /// Frees the in-flight slot so the action can be triggered again. A cancelled upload puts
    /// its selection back like a failed one. Stale tickets are ignored.
    pub fn abandon(&mut self, ticket: RequestTicket) {
        if ticket.epoch != self.epoch {
            return;
        }
        match ticket.kind {
            RequestKind::Upload => match self.pending_upload.take() {
                Some(pending) if pending.id == ticket.id => {
                    if self.selection.is_none() {
                        self.selection = Some(pending.selection);
                    }
                }
                other => {
                    self.pending_upload = other;
                    return;
                }
            },
            RequestKind::Analysis => {
                if self.pending_analysis != Some(ticket.id) {
                    return;
                }
                self.pending_analysis = None;
            }
        }
        tracing::warn!("abandoned {} request {}", ticket.kind, ticket.id);
    }

    /// Return to the initial state. Responses to requests issued before the reset will be
    /// discarded when they arrive.
    pub fn reset(&mut self) {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::default()
        };
        tracing::info!("workflow reset (epoch {epoch})");
    }
}
