pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{routing::get, Router};
use state::SharedState;
use tower_http::trace::TraceLayer;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/home", get(handlers::get_home))
        .route("/api/posts/next", get(handlers::get_next_page))
        .route("/api/post/:slug", get(handlers::get_post))
        .route("/api/paths", get(handlers::get_static_paths))
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}

/// Generates the home page and the prebuilt post pages ahead of the first
/// request. Failures are logged; those pages are then generated on demand.
pub async fn pregenerate(state: &SharedState) {
    match posts::home_page(&state.prismic, &state.formatter, state.config.home_page_size).await {
        Ok(page) => {
            tracing::info!("Pre-generated home page ({} posts)", page.results.len());
            state.home_cache.prime(handlers::HOME_KEY, page).await;
        }
        Err(e) => tracing::warn!("Failed to pre-generate home page: {}", e),
    }

    let paths =
        match posts::static_paths(&state.prismic, state.config.static_paths_page_size).await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("Failed to list static paths: {}", e);
                return;
            }
        };

    for uid in paths {
        match posts::post_page(&state.prismic, &state.formatter, &uid).await {
            Ok(view) => {
                tracing::info!("Pre-generated /post/{}", uid);
                state.post_cache.prime(&handlers::post_key(&uid), view).await;
            }
            Err(e) => tracing::warn!("Failed to pre-generate /post/{}: {}", uid, e),
        }
    }
}
