//! # TumorScope Core
//!
//! Client-side logic for the TumorScope two-phase analysis workflow.
//!
//! This crate contains:
//! - The workflow state machine: MRI upload → tumor prediction → gene analysis
//! - Classification of service responses into a result or a short-sequence alert
//! - HTTP clients for the prediction and gene-analysis services
//! - A non-blocking notice channel and plain-text rendering of outcomes
//!
//! **No server concerns**: the reference gene-analysis service lives in `api-rest` and
//! `gene-analysis`. Binaries resolve configuration once at startup and pass a
//! [`ClientConfig`] in; nothing here reads the environment.

pub mod classify;
pub mod client;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod http;
pub mod model;
pub mod notice;
pub mod orchestrator;
pub mod selection;
pub mod validation;
pub mod workflow;

pub use client::{GeneAnalysisClient, PredictionClient};
pub use config::ClientConfig;
pub use error::{ClientError, CoreError, CoreResult, WorkflowError};
pub use http::{HttpGeneAnalysisClient, HttpPredictionClient};
pub use model::{
    GeneAnalysisOutcome, GeneAnalysisResult, MutationIndicators, PredictionReceipt,
    ShortSequenceAlert, Treatment, TumorPrediction,
};
pub use notice::{notice_channel, Notice, NoticeLevel, NoticeReceiver, NoticeSender};
pub use orchestrator::AnalysisOrchestrator;
pub use selection::UploadSelection;
pub use workflow::{AnalysisView, RequestKind, RequestTicket, Workflow, WorkflowState};
