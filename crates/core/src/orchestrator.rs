//! Drives the [`Workflow`] against real or fake service clients.
//!
//! The orchestrator owns the workflow behind a mutex that is only ever held for a state
//! transition, never across a request. Outcomes are returned to the caller and also reported
//! on the notice channel.

use crate::client::{GeneAnalysisClient, PredictionClient};
use crate::constants::DEFAULT_PREDICTION_MESSAGE;
use crate::model::{GeneAnalysisOutcome, PredictionReceipt};
use crate::notice::NoticeSender;
use crate::selection::UploadSelection;
use crate::workflow::{RequestTicket, Workflow, WorkflowState};
use crate::WorkflowError;
use std::sync::{Mutex, MutexGuard};

fn lock_workflow(workflow: &Mutex<Workflow>) -> MutexGuard<'_, Workflow> {
    // Transitions never panic halfway, so a poisoned workflow is still consistent.
    workflow.lock().unwrap_or_else(|e| e.into_inner())
}

/// Abandons its request on drop unless the response was handed back first.
///
/// Held across the request so a caller that stops waiting does not leave the action
/// disabled.
struct InFlight<'a> {
    workflow: &'a Mutex<Workflow>,
    ticket: RequestTicket,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(workflow: &'a Mutex<Workflow>, ticket: RequestTicket) -> Self {
        Self {
            workflow,
            ticket,
            armed: true,
        }
    }

    /// Lock the workflow to apply the response; the request is no longer abandoned on drop.
    fn resolve(mut self) -> (RequestTicket, MutexGuard<'a, Workflow>) {
        self.armed = false;
        (self.ticket, lock_workflow(self.workflow))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock_workflow(self.workflow).abandon(self.ticket);
        }
    }
}

pub struct AnalysisOrchestrator<P, G> {
    predictor: P,
    analyzer: G,
    workflow: Mutex<Workflow>,
    notices: NoticeSender,
}

impl<P, G> AnalysisOrchestrator<P, G>
where
    P: PredictionClient,
    G: GeneAnalysisClient,
{
    pub fn new(predictor: P, analyzer: G, notices: NoticeSender) -> Self {
        Self {
            predictor,
            analyzer,
            workflow: Mutex::new(Workflow::new()),
            notices,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Workflow> {
        lock_workflow(&self.workflow)
    }

    pub fn state(&self) -> WorkflowState {
        self.lock().state()
    }

    /// Run `f` against the current workflow, e.g. to render it.
    pub fn with_workflow<R>(&self, f: impl FnOnce(&Workflow) -> R) -> R {
        f(&self.lock())
    }

    pub fn select_upload(&self, selection: UploadSelection) {
        self.lock().select_upload(selection);
    }

    pub fn set_sequence(&self, sequence: impl Into<String>) {
        self.lock().set_sequence(sequence);
    }

    /// Clear all state. Responses still in flight are dropped when they arrive.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Phase 1: send the selected image for tumor prediction.
    pub async fn upload(&self) -> Result<PredictionReceipt, WorkflowError> {
        let begun = self.lock().begin_upload();
        let (ticket, selection) = begun.map_err(|e| self.report(e))?;
        let in_flight = InFlight::new(&self.workflow, ticket);

        let response = self.predictor.predict(&selection).await;

        let finished = {
            let (ticket, mut workflow) = in_flight.resolve();
            workflow.finish_upload(ticket, response)
        };
        let receipt = finished.map_err(|e| self.report(e))?;

        let message = if receipt.message.trim().is_empty() {
            DEFAULT_PREDICTION_MESSAGE
        } else {
            receipt.message.as_str()
        };
        self.notices
            .info(format!("{message}. Predicted tumor type: {}", receipt.prediction));
        Ok(receipt)
    }

    /// Phase 2: analyse the entered sequence for the current prediction.
    ///
    /// An alert is an `Ok` outcome and raises no notice; it is shown through the workflow.
    pub async fn analyze(&self) -> Result<GeneAnalysisOutcome, WorkflowError> {
        let begun = self.lock().begin_analysis();
        let request = begun.map_err(|e| self.report(e))?;
        let in_flight = InFlight::new(&self.workflow, request.ticket);

        let response = self
            .analyzer
            .analyze(request.tumor_type.as_str(), &request.dna_sequence)
            .await;

        let finished = {
            let (ticket, mut workflow) = in_flight.resolve();
            workflow.finish_analysis(ticket, response)
        };
        finished.map_err(|e| self.report(e))
    }

    fn report(&self, err: WorkflowError) -> WorkflowError {
        match &err {
            WorkflowError::Superseded => {}
            WorkflowError::Client(client) => {
                tracing::error!("{err}: {client:?}");
                self.notices.error(err.to_string());
            }
            _ => self.notices.warn(err.to_string()),
        }
        err
    }
}
