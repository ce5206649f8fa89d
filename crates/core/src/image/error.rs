//! Image operation error types.

use picvault_shared::AppError;
use thiserror::Error;

use crate::storage::StorageError;

/// Metadata table failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RepositoryError(pub String);

impl RepositoryError {
    /// Create a repository error from any displayable cause.
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Image operation errors.
///
/// Backing-store variants carry a short prefix naming the step that failed;
/// the full display text is what clients see.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Path identifier missing or empty.
    #[error("image_id is required")]
    MissingImageId,

    /// One or more upload fields missing or empty.
    #[error("Image file, title, and description are required")]
    MissingUploadFields,

    /// Body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    /// No metadata record for the identifier.
    #[error("Image not found")]
    NotFound,

    /// Writing image bytes failed.
    #[error("Error uploading image to storage: {0}")]
    StoreObject(#[source] StorageError),

    /// Writing the metadata record failed.
    #[error("Error saving metadata: {0}")]
    SaveMetadata(#[source] RepositoryError),

    /// Scanning the metadata table failed.
    #[error("Error querying metadata: {0}")]
    QueryMetadata(#[source] RepositoryError),

    /// Looking up a metadata record failed.
    #[error("Error retrieving metadata: {0}")]
    GetMetadata(#[source] RepositoryError),

    /// Presigning the download URL failed.
    #[error("Error generating pre-signed URL: {0}")]
    Presign(#[source] StorageError),

    /// Deleting the metadata record failed.
    #[error("Error deleting metadata: {0}")]
    DeleteMetadata(#[source] RepositoryError),

    /// Deleting image bytes failed.
    #[error("Error deleting image from storage: {0}")]
    DeleteObject(#[source] StorageError),
}

impl ImageError {
    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingImageId | Self::MissingUploadFields | Self::InvalidPayload(_) => 400,
            Self::NotFound => 404,
            Self::StoreObject(_)
            | Self::SaveMetadata(_)
            | Self::QueryMetadata(_)
            | Self::GetMetadata(_)
            | Self::Presign(_)
            | Self::DeleteMetadata(_)
            | Self::DeleteObject(_) => 500,
        }
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        let message = err.to_string();
        match err.status_code() {
            400 => Self::BadRequest(message),
            404 => Self::NotFound(message),
            _ => Self::Internal(message),
        }
    }
}
