use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::render::RenderError;

#[derive(Debug)]
pub enum ApiError {
    EmptyTrack,
    Render(RenderError),
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::EmptyTrack => ApiError::EmptyTrack,
            _ => ApiError::Render(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyTrack => StatusCode::NOT_FOUND,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::EmptyTrack => ErrorResponse {
                error: "empty_track".to_string(),
                message: None,
            },
            ApiError::Render(e) => ErrorResponse {
                error: "render_failed".to_string(),
                message: Some(e.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Render(e) = &self {
            log::error!("Failed to render map page: {}", e);
        }
        (self.status(), Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every failed API or page request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code, e.g. `empty_track`.
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
