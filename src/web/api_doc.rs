use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::track::SampleResponse;

#[derive(OpenApi)]
#[openapi(
    paths(super::api::track::samples, super::api::track::start),
    components(schemas(SampleResponse, ErrorResponse)),
    info(
        title = "Track-O-Mat API",
        description = "Resampled GPS track",
        version = "0.1.0"
    ),
    tags(
        (name = "track", description = "Resampled track samples")
    )
)]
pub struct ApiDoc;
