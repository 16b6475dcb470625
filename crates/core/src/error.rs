use crate::constants::MISSING_UPLOAD_NOTICE;
use reqwest::StatusCode;
use std::path::PathBuf;

/// Errors raised while configuring the client or preparing an upload.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(reqwest::Error),
    #[error("failed to read MRI file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("MRI file '{file_name}' is empty")]
    EmptyUpload { file_name: String },
    #[error("unsupported file type '{extension}' for '{file_name}'; upload a valid image (jpg, png, etc.)")]
    UnsupportedFileType {
        file_name: String,
        extension: String,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Transport and service failures of either workflow phase.
///
/// None of these is a short-sequence alert: an alert is a successful response.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build {kind}-request to '{url}'")]
    RequestBuild {
        kind: &'static str,
        url: String,
        source: reqwest::Error,
    },
    #[error("failed to send {kind}-request to '{url}'")]
    RequestSend {
        kind: &'static str,
        url: String,
        source: reqwest::Error,
    },
    #[error("request to '{}' failed with status {} ({}){}",
        url,
        status.as_u16(),
        status.canonical_reason().unwrap_or("???"),
        response.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
    )]
    RequestFailure {
        url: String,
        status: StatusCode,
        response: Option<String>,
    },
    #[error("failed to download response from '{url}'")]
    ResponseDownload { url: String, source: reqwest::Error },
    #[error("failed to parse response from '{url}' as JSON")]
    ResponseDeserialize {
        url: String,
        raw: String,
        source: serde_json::Error,
    },
    #[error("response from '{url}' does not match the expected schema at {path}: {message}")]
    SchemaMismatch {
        url: String,
        path: String,
        message: String,
    },
    #[error("service at '{url}' rejected the request: {message}")]
    ServiceRejected { url: String, message: String },
    #[error("response from '{url}' is malformed: {reason}")]
    MalformedResponse { url: String, reason: String },
}

/// Errors returned by workflow actions.
///
/// Precondition errors (see [`WorkflowError::is_precondition`]) are raised before any request
/// is sent and leave the workflow untouched.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{}", MISSING_UPLOAD_NOTICE)]
    NoUploadSelected,
    #[error("No tumor prediction yet; upload an MRI scan before analysing a sequence")]
    NoPrediction,
    #[error("Please enter a DNA sequence")]
    EmptySequence,
    #[error("An MRI upload is already in progress")]
    UploadInFlight,
    #[error("A gene analysis is already in progress")]
    AnalysisInFlight,
    #[error("response discarded because the workflow was reset or a newer prediction replaced it")]
    Superseded,
    #[error("request failed: {0}")]
    Client(#[from] ClientError),
}

impl WorkflowError {
    /// Returns `true` for errors caught before reaching the network.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, WorkflowError::Client(_) | WorkflowError::Superseded)
    }
}
