use crate::error::AppError;
use crate::state::{NextPageQuery, SharedState};
use axum::{
    extract::{Query, State},
    response::Json,
};
use blog_core::PostPage;
use reqwest::Url;

/// 「もっと見る」用: カーソルの指すページを整形して返す（キャッシュしない）
pub async fn get_next_page(
    State(state): State<SharedState>,
    Query(params): Query<NextPageQuery>,
) -> Result<Json<PostPage>, AppError> {
    let url = state
        .prismic
        .validate_cursor(&params.cursor)
        .map_err(|e| AppError::BadRequest(format!("{:#}", e)))?;

    tracing::info!("Received next page request ({})", loggable(&url));

    let page = posts::fetch_next_page(&state.prismic, &state.formatter, &params.cursor).await?;
    Ok(Json(page))
}

/// Path and query of a cursor with the access token left out.
fn loggable(url: &Url) -> String {
    let query: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k != "access_token")
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    format!("{}?{}", url.path(), query.join("&"))
}
