//! JSON error responses.

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use picvault_core::image::ImageError;
use picvault_shared::AppError;
use serde_json::json;
use tracing::{debug, error};

/// Error returned from handlers, rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (status, Json(json!({ "message": self.0.message() }))).into_response()
    }
}

/// JSON 404 for paths no route matches.
pub async fn route_not_found(request: Request) -> Response {
    debug!(method = %request.method(), uri = %request.uri(), "No route");
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
        .into_response()
}

/// JSON 405 for known paths hit with an unsupported method.
pub async fn method_not_allowed(request: Request) -> Response {
    debug!(method = %request.method(), uri = %request.uri(), "Method not allowed");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
        .into_response()
}
