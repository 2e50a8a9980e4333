use crate::error::AppError;
use crate::handlers::{cache_headers, post_key};
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::HeaderName,
    response::Json,
};
use posts::PostView;
use serde::Serialize;

pub async fn get_post(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<([(HeaderName, String); 1], Json<PostView>), AppError> {
    tracing::info!("Received post request: {}", slug);

    if slug.trim().is_empty() {
        return Err(AppError::BadRequest("Empty slug".to_string()));
    }

    let prismic = state.prismic.clone();
    let formatter = state.formatter;
    let uid = slug.clone();

    let view = state
        .post_cache
        .get_or_regenerate(&post_key(&slug), move || async move {
            posts::post_page(&prismic, &formatter, &uid).await
        })
        .await?;

    Ok((cache_headers(state.post_cache.ttl()), Json(view)))
}

#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub paths: Vec<String>,
}

pub async fn get_static_paths(
    State(state): State<SharedState>,
) -> Result<Json<PathsResponse>, AppError> {
    let paths = posts::static_paths(&state.prismic, state.config.static_paths_page_size).await?;
    Ok(Json(PathsResponse { paths }))
}
