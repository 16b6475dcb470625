//! The MRI file chosen for upload.

use crate::constants::FALLBACK_MEDIA_TYPE;
use crate::validation::validate_image_file_name;
use crate::{CoreError, CoreResult};
use std::path::Path;

/// An MRI image selected by the user, held in memory until it is sent.
///
/// Construction guarantees a supported file extension and non-empty content, so every
/// selection the workflow holds is uploadable.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadSelection {
    file_name: String,
    bytes: Vec<u8>,
}

impl UploadSelection {
    /// Wraps in-memory image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the file name is empty or has an unsupported extension, or if
    /// `bytes` is empty.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> CoreResult<Self> {
        let file_name = file_name.into();
        validate_image_file_name(&file_name)?;
        if bytes.is_empty() {
            return Err(CoreError::EmptyUpload { file_name });
        }
        Ok(Self { file_name, bytes })
    }

    /// Reads an image from disk.
    ///
    /// The file name sent to the service is the final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|os| os.to_str())
            .ok_or_else(|| {
                CoreError::InvalidInput(format!("'{}' has no usable file name", path.display()))
            })?
            .to_string();

        // Check the extension before reading a possibly large file.
        validate_image_file_name(&file_name)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CoreError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("read {} bytes from '{}'", bytes.len(), path.display());

        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content type detected from the image bytes.
    ///
    /// DICOM and other formats `infer` does not recognise fall back to
    /// [`FALLBACK_MEDIA_TYPE`].
    pub fn media_type(&self) -> &'static str {
        infer::get(&self.bytes)
            .map(|kind| kind.mime_type())
            .unwrap_or(FALLBACK_MEDIA_TYPE)
    }
}

impl std::fmt::Debug for UploadSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSelection")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
