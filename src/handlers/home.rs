use crate::error::AppError;
use crate::handlers::{cache_headers, HOME_KEY};
use crate::state::SharedState;
use axum::{extract::State, http::HeaderName, response::Json};
use blog_core::PostPage;

pub async fn get_home(
    State(state): State<SharedState>,
) -> Result<([(HeaderName, String); 1], Json<PostPage>), AppError> {
    tracing::info!("Received home request");

    let prismic = state.prismic.clone();
    let formatter = state.formatter;
    let page_size = state.config.home_page_size;

    let page = state
        .home_cache
        .get_or_regenerate(HOME_KEY, move || async move {
            posts::home_page(&prismic, &formatter, page_size).await
        })
        .await?;

    Ok((cache_headers(state.home_cache.ttl()), Json(page)))
}
