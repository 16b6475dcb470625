//! # API Shared
//!
//! Wire types shared by the TumorScope client and the reference REST service.
//!
//! Contains:
//! - Request/response bodies for the two workflow endpoints (`wire` module)
//! - Endpoint path constants
//! - The shared `HealthService`
//!
//! Response types deserialise leniently (missing lists become empty) because clients must
//! tolerate partial payloads; the reference service always emits every field.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;

/// Path of the MRI upload endpoint.
pub const UPLOAD_MRI_PATH: &str = "/upload_mri/";

/// Path of the gene-sequence analysis endpoint.
pub const ANALYZE_GENE_SEQUENCE_PATH: &str = "/analyze_gene_sequence/";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Multipart field name carrying the MRI image.
pub const UPLOAD_FILE_FIELD: &str = "file";

/// Key whose presence marks an analysis response as a short-sequence alert.
pub const ALERT_KEY: &str = "alert";

/// Key whose presence marks an upload response as a service-side rejection.
pub const ERROR_KEY: &str = "error";
