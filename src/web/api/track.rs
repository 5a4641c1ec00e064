use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::track::{start_sample, Sample};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SampleResponse {
    /// RFC 3339 bucket start in the configured timezone.
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<&Sample> for SampleResponse {
    fn from(sample: &Sample) -> Self {
        SampleResponse {
            timestamp: sample.timestamp.to_rfc3339(),
            latitude: sample.latitude,
            longitude: sample.longitude,
            elevation: sample.elevation,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/track",
    responses(
        (status = 200, description = "Resampled track, oldest first", body = Vec<SampleResponse>)
    ),
    tag = "track"
)]
pub async fn samples(State(state): State<AppState>) -> Json<Vec<SampleResponse>> {
    Json(state.track.iter().map(SampleResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/track/start",
    responses(
        (status = 200, description = "Sample the map is centred on", body = SampleResponse),
        (status = 404, description = "Track is empty", body = ErrorResponse)
    ),
    tag = "track"
)]
pub async fn start(State(state): State<AppState>) -> ApiResult<Json<SampleResponse>> {
    start_sample(&state.track)
        .map(|s| Json(SampleResponse::from(s)))
        .ok_or(ApiError::EmptyTrack)
}
