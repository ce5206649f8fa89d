//! Image service implementation.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::error::{ImageError, RepositoryError};
use super::types::{
    ImageDownload, ImageFilter, ImageRecord, UploadImageInput, UploadImageResult, storage_key,
};
use crate::storage::StorageService;

/// Repository trait for the image metadata table.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ImageRepository: Send + Sync {
    /// Fetch a record by identifier.
    fn get(
        &self,
        image_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ImageRecord>, RepositoryError>> + Send;

    /// Insert or replace a record.
    fn put(
        &self,
        record: ImageRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a record. Returns whether a row was removed.
    fn delete(
        &self,
        image_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Return up to `filter.limit` records passing `filter`, in table order.
    fn scan(
        &self,
        filter: &ImageFilter,
    ) -> impl std::future::Future<Output = Result<Vec<ImageRecord>, RepositoryError>> + Send;
}

/// Image service coordinating the object store and the metadata table.
pub struct ImageService<R: ImageRepository> {
    storage: Arc<StorageService>,
    repo: Arc<R>,
}

impl<R: ImageRepository> ImageService<R> {
    /// Create a new image service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }

    /// Store image bytes under a fresh identifier, then save its metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any input field is empty
    /// - The object write fails
    /// - The metadata write fails (the object is left in storage)
    pub async fn upload(&self, input: UploadImageInput) -> Result<UploadImageResult, ImageError> {
        input.validate()?;

        let image_id = Uuid::new_v4().to_string();
        let key = storage_key(&image_id);

        self.storage
            .put(&key, input.image)
            .await
            .map_err(ImageError::StoreObject)?;

        let storage_url = self.storage.object_url(&key);
        let record = ImageRecord {
            image_id: image_id.clone(),
            title: input.title,
            description: input.description,
            storage_url: storage_url.clone(),
        };

        self.repo
            .put(record)
            .await
            .map_err(ImageError::SaveMetadata)?;

        Ok(UploadImageResult {
            image_id,
            storage_url,
        })
    }

    /// List records matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the table scan fails.
    pub async fn list(&self, filter: &ImageFilter) -> Result<Vec<ImageRecord>, ImageError> {
        self.repo
            .scan(filter)
            .await
            .map_err(ImageError::QueryMetadata)
    }

    /// Produce a time-limited download URL for an existing image.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `image_id` is empty
    /// - No record exists
    /// - The lookup or presign fails
    pub async fn view(&self, image_id: &str) -> Result<ImageDownload, ImageError> {
        self.find(image_id).await?;

        let presigned = self
            .storage
            .presign_download(&storage_key(image_id))
            .await
            .map_err(ImageError::Presign)?;

        Ok(ImageDownload {
            image_id: image_id.to_string(),
            download_url: presigned.url,
            expires_at: presigned.expires_at,
        })
    }

    /// Delete the metadata record, then the stored object.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `image_id` is empty
    /// - No record exists
    /// - Either delete fails (a failed object delete leaves the record gone)
    pub async fn delete(&self, image_id: &str) -> Result<(), ImageError> {
        self.find(image_id).await?;

        self.repo
            .delete(image_id)
            .await
            .map_err(ImageError::DeleteMetadata)?;

        if let Err(e) = self.storage.delete(&storage_key(image_id)).await {
            warn!(image_id, error = %e, "Metadata removed but object delete failed");
            return Err(ImageError::DeleteObject(e));
        }

        Ok(())
    }

    /// Get a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if `image_id` is empty, no record exists, or the lookup fails.
    pub async fn find(&self, image_id: &str) -> Result<ImageRecord, ImageError> {
        if image_id.is_empty() {
            return Err(ImageError::MissingImageId);
        }

        self.repo
            .get(image_id)
            .await
            .map_err(ImageError::GetMetadata)?
            .ok_or(ImageError::NotFound)
    }
}
