use crate::cache::RegenerationCache;
use crate::config::AppConfig;
use blog_core::PostPage;
use posts::{LocaleDateFormatter, PostView};
use prismic::PrismicClient;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NextPageQuery {
    pub cursor: String,
}

pub type SharedState = AppState;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub prismic: PrismicClient,
    pub formatter: LocaleDateFormatter,
    pub home_cache: Arc<RegenerationCache<PostPage>>,
    pub post_cache: Arc<RegenerationCache<PostView>>,
}

impl AppState {
    pub fn new(config: AppConfig, http_client: reqwest::Client) -> Self {
        // both bounded by MAX_REVALIDATE_SECS
        let home_ttl = chrono::Duration::seconds(config.home_revalidate_secs as i64);
        let post_ttl = chrono::Duration::seconds(config.post_revalidate_secs as i64);

        Self {
            prismic: PrismicClient::new(http_client, config.prismic.clone()),
            formatter: LocaleDateFormatter::new(config.locale),
            home_cache: Arc::new(RegenerationCache::new("home", home_ttl)),
            post_cache: Arc::new(RegenerationCache::new("post", post_ttl)),
            config,
        }
    }
}
