//! Validation and naming rules for uploaded cover images.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Largest accepted image payload in bytes (2 MiB).
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Public URL prefix under which stored images are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Reasons an upload is refused before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadValidationError {
    MissingFile,
    NotAnImage { content_type: Option<String> },
    TooLarge { size: usize },
}

impl fmt::Display for UploadValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile => write!(f, "No file uploaded"),
            Self::NotAnImage { .. } => write!(f, "Only image files are allowed"),
            Self::TooLarge { .. } => write!(f, "File too large. Maximum size is 2MB"),
        }
    }
}

impl std::error::Error for UploadValidationError {}

/// A single image file received from a client.
///
/// ## Invariants
/// - The declared MIME type starts with `image/`.
/// - The payload is non-empty and at most [`MAX_IMAGE_BYTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    extension: Option<String>,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate a received file part.
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::ImageUpload;
    ///
    /// let upload = ImageUpload::try_new(Some("image/png"), Some("cover.PNG"), vec![1, 2]).unwrap();
    /// assert_eq!(upload.extension(), Some(".PNG"));
    /// assert!(ImageUpload::try_new(Some("text/plain"), None, vec![1]).is_err());
    /// ```
    pub fn try_new(
        content_type: Option<&str>,
        original_name: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadValidationError> {
        if bytes.is_empty() {
            return Err(UploadValidationError::MissingFile);
        }
        let is_image = content_type
            .map(|mime| mime.trim().to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(UploadValidationError::NotAnImage {
                content_type: content_type.map(str::to_owned),
            });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadValidationError::TooLarge { size: bytes.len() });
        }
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{ext}"));
        Ok(Self { extension, bytes })
    }

    /// Original extension including the leading dot, when one was usable.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Build the stored file name: `<unix-millis>-<suffix><.ext>`.
    ///
    /// `suffix` is expected to be a nine-digit random number.
    pub fn stored_name(&self, now: DateTime<Utc>, suffix: u32) -> String {
        format!(
            "{}-{suffix:09}{}",
            now.timestamp_millis(),
            self.extension().unwrap_or_default()
        )
    }
}

/// Public URL for a stored image name.
pub fn image_url(stored_name: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{stored_name}")
}
