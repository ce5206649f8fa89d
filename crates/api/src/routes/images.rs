//! Image management routes.
//!
//! Every response body carries a `message` field; errors carry only that.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::header::CONTENT_TYPE,
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ApiError, AppState};
use picvault_core::image::{
    ImageError, ImageFilter, ImageRecord, ImageService, UploadImageInput,
};
use picvault_db::ImageRepository;

/// Creates the image routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/images", get(list_images).post(upload_image))
        .route("/images/", get(missing_image_id).delete(missing_image_id))
        .route("/images/{image_id}", get(view_image).delete(delete_image))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// JSON upload body. `image_file` is base64-encoded image bytes.
#[derive(Debug, Default, Deserialize)]
pub struct UploadImageRequest {
    /// Image title.
    pub title: Option<String>,
    /// Image description.
    pub description: Option<String>,
    /// Base64 image bytes.
    pub image_file: Option<String>,
}

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    /// Status message.
    pub message: &'static str,
    /// Generated image ID.
    pub image_id: String,
    /// Location reference of the stored bytes.
    pub storage_url: String,
}

/// Query parameters for listing images.
#[derive(Debug, Deserialize)]
pub struct ListImagesQuery {
    /// Title substring.
    pub title: Option<String>,
    /// Description substring.
    pub description: Option<String>,
    /// Maximum number of results, parsed by [`ImageFilter::from_params`].
    pub limit: Option<String>,
}

/// Response for a list request.
#[derive(Debug, Serialize)]
pub struct ListImagesResponse {
    /// Status message.
    pub message: &'static str,
    /// Matching records.
    pub images: Vec<ImageRecord>,
}

/// Response for a view request.
#[derive(Debug, Serialize)]
pub struct ViewImageResponse {
    /// Status message.
    pub message: &'static str,
    /// Image ID.
    pub image_id: String,
    /// Presigned download URL.
    pub download_url: String,
    /// Download URL expiration (ISO 8601).
    pub expires_at: String,
}

/// Response for a delete request.
#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    /// Status message.
    pub message: &'static str,
    /// Deleted image ID.
    pub image_id: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn image_service(state: &AppState) -> ImageService<ImageRepository> {
    let repo = ImageRepository::new((*state.db).clone());
    ImageService::new(state.storage.clone(), Arc::new(repo))
}

/// Decode an upload body as multipart form data or base64-in-JSON.
async fn read_upload(state: &AppState, request: Request) -> Result<UploadImageInput, ImageError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ImageError::invalid_payload(e.body_text()))?;
        read_multipart(multipart).await
    } else if content_type.is_empty() || content_type.starts_with("application/json") {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|e| ImageError::invalid_payload(e.body_text()))?;
        decode_json(&body)
    } else {
        Err(ImageError::invalid_payload(format!(
            "unsupported content type '{content_type}'"
        )))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<UploadImageInput, ImageError> {
    let mut input = UploadImageInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImageError::invalid_payload(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                input.title = field
                    .text()
                    .await
                    .map_err(|e| ImageError::invalid_payload(e.body_text()))?;
            }
            "description" => {
                input.description = field
                    .text()
                    .await
                    .map_err(|e| ImageError::invalid_payload(e.body_text()))?;
            }
            "image_file" => {
                input.image = field
                    .bytes()
                    .await
                    .map_err(|e| ImageError::invalid_payload(e.body_text()))?;
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(input)
}

fn decode_json(body: &[u8]) -> Result<UploadImageInput, ImageError> {
    let request: UploadImageRequest =
        serde_json::from_slice(body).map_err(|e| ImageError::invalid_payload(e.to_string()))?;

    let (Some(title), Some(description), Some(encoded)) =
        (request.title, request.description, request.image_file)
    else {
        return Err(ImageError::MissingUploadFields);
    };
    if encoded.is_empty() {
        return Err(ImageError::MissingUploadFields);
    }

    let image = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|_| ImageError::invalid_payload("image_file is not valid base64"))?;

    Ok(UploadImageInput {
        title,
        description,
        image: Bytes::from(image),
    })
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/images`
/// Upload an image with its title and description.
async fn upload_image(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<UploadImageResponse>, ApiError> {
    let input = read_upload(&state, request).await?;
    let result = image_service(&state).upload(input).await?;

    info!(image_id = %result.image_id, "Image uploaded");

    Ok(Json(UploadImageResponse {
        message: "Image uploaded successfully",
        image_id: result.image_id,
        storage_url: result.storage_url,
    }))
}

/// GET `/images?title=&description=&limit=`
/// List images matching optional substring filters.
async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ListImagesQuery>,
) -> Result<Json<ListImagesResponse>, ApiError> {
    let filter = ImageFilter::from_params(query.title, query.description, query.limit.as_deref())?;
    let images = image_service(&state).list(&filter).await?;

    debug!(count = images.len(), limit = filter.limit, "Images listed");

    Ok(Json(ListImagesResponse {
        message: "Images retrieved successfully",
        images,
    }))
}

/// GET `/images/{image_id}`
/// Get a time-limited download URL for an image.
async fn view_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Json<ViewImageResponse>, ApiError> {
    let download = image_service(&state).view(&image_id).await?;

    Ok(Json(ViewImageResponse {
        message: "Image found",
        image_id: download.image_id,
        download_url: download.download_url,
        expires_at: download.expires_at.to_rfc3339(),
    }))
}

/// GET/DELETE `/images/`
/// An empty path segment means no identifier was given.
async fn missing_image_id() -> ApiError {
    ImageError::MissingImageId.into()
}

/// DELETE `/images/{image_id}`
/// Delete an image's metadata and stored bytes.
async fn delete_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Json<DeleteImageResponse>, ApiError> {
    image_service(&state).delete(&image_id).await?;

    info!(image_id = %image_id, "Image deleted");

    Ok(Json(DeleteImageResponse {
        message: "Image deleted successfully",
        image_id,
    }))
}
