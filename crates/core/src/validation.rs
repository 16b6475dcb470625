//! Input validation utilities.
//!
//! Checks applied to user input before it is allowed anywhere near the network.

use crate::constants::ALLOWED_IMAGE_EXTENSIONS;
use crate::{CoreError, CoreResult};

/// Validates that `file_name` carries an image extension the prediction service accepts.
///
/// The comparison is case-insensitive. A name without an extension is rejected.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] for an empty name and
/// [`CoreError::UnsupportedFileType`] for any other extension.
pub fn validate_image_file_name(file_name: &str) -> CoreResult<()> {
    if file_name.trim().is_empty() {
        return Err(CoreError::InvalidInput("file name cannot be empty".into()));
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(CoreError::UnsupportedFileType {
            file_name: file_name.to_string(),
            extension,
        })
    }
}

/// Prepares the DNA sequence input for submission.
///
/// Surrounding whitespace is dropped; the rest is sent as typed. Returns `None` when nothing
/// is left, which the workflow treats as a precondition failure.
pub fn prepare_sequence(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
