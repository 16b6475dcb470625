//! Constants used throughout the TumorScope core crate.
//!
//! User-facing notice texts live here too so the CLI and tests agree on them.

/// Base URL of the analysis services when no explicit URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Request timeout, in seconds, when no explicit timeout is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Image file extensions the prediction service accepts (lower-case, without the dot).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "dcm"];

/// Content type sent for uploads whose type cannot be detected from their bytes.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Notice raised when "upload" is triggered without a selected file.
pub const MISSING_UPLOAD_NOTICE: &str = "Please select an MRI file";

/// Status shown after a prediction when the service sent no message of its own.
pub const DEFAULT_PREDICTION_MESSAGE: &str = "MRI analysed";

/// Alert text used when the service sends an `alert` key without a readable message.
pub const DEFAULT_ALERT_MESSAGE: &str = "Sequence rejected by the analysis service";

/// Placeholder displayed for unavailable GC content.
pub const GC_CONTENT_PLACEHOLDER: &str = "N/A";

/// Placeholder displayed for an empty treatment list.
pub const EMPTY_LIST_PLACEHOLDER: &str = "No items";
