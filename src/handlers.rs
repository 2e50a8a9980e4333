mod home;
mod next_page;
mod post;

pub use home::get_home;
pub use next_page::get_next_page;
pub use post::{get_post, get_static_paths};

use axum::http::{header, HeaderName};

pub const HOME_KEY: &str = "/";

pub fn post_key(slug: &str) -> String {
    format!("/post/{}", slug)
}

/// Lets an HTTP cache in front of us honour the same regeneration interval.
pub(crate) fn cache_headers(ttl: chrono::Duration) -> [(HeaderName, String); 1] {
    [(
        header::CACHE_CONTROL,
        format!("s-maxage={}, stale-while-revalidate", ttl.num_seconds()),
    )]
}

pub async fn root() -> &'static str {
    "Space Traveling: /api/home, /api/posts/next?cursor=..., /api/post/:slug"
}

pub async fn health() -> &'static str {
    "OK"
}
