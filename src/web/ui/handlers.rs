use axum::extract::State;
use axum::response::Html;

use crate::web::api::error::ApiResult;
use crate::web::AppState;

/// The map page; template failures surface as a `render_failed` error body.
pub async fn map(State(state): State<AppState>) -> ApiResult<Html<String>> {
    Ok(Html(state.renderer.render_html(&state.track)?))
}
