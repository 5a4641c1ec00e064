use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no access token, set MAPBOX_TOKEN or pass --access-token")]
    MissingAccessToken,
    #[error("track has no samples to render")]
    EmptyTrack,
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
