use crate::fetch_next_page;
use crate::locale::DateFormatter;
use blog_core::{BlogError, Post, PostPage};
use prismic::PageFetcher;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and this many posts were appended.
    Appended(usize),
    /// No cursor left. Nothing was fetched.
    Exhausted,
    /// Another `load_more` on this controller has not finished yet.
    InFlight,
}

/// 「もっと見る」で次ページを読み込み、一覧に追記していく
///
/// `posts` only grows, in fetch order. The listing and its cursor are
/// replaced together once a page has been fetched and fully normalized, so
/// a failed load leaves both untouched.
pub struct PaginationController<F, D> {
    fetcher: F,
    formatter: D,
    listing: RwLock<PostPage>,
    loading: Mutex<()>,
}

impl<F, D> PaginationController<F, D>
where
    F: PageFetcher + Sync,
    D: DateFormatter + Sync,
{
    pub fn new(fetcher: F, formatter: D, initial: PostPage) -> Self {
        Self {
            fetcher,
            formatter,
            listing: RwLock::new(initial),
            loading: Mutex::new(()),
        }
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.listing.read().await.results.clone()
    }

    pub async fn next_page(&self) -> Option<String> {
        self.listing.read().await.next_page.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.listing.read().await.has_next_page()
    }

    pub async fn snapshot(&self) -> PostPage {
        self.listing.read().await.clone()
    }

    pub async fn load_more(&self) -> Result<LoadOutcome, BlogError> {
        let Ok(_loading) = self.loading.try_lock() else {
            tracing::debug!("load_more ignored: previous page still loading");
            return Ok(LoadOutcome::InFlight);
        };

        let cursor = {
            let listing = self.listing.read().await;
            match listing.next_page.as_deref() {
                Some(cursor) if !cursor.is_empty() => cursor.to_string(),
                _ => return Ok(LoadOutcome::Exhausted),
            }
        };

        let page = match fetch_next_page(&self.fetcher, &self.formatter, &cursor).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("load_more failed: {}", e);
                return Err(e);
            }
        };

        let appended = page.results.len();
        let mut listing = self.listing.write().await;
        listing.results.extend(page.results);
        listing.next_page = page.next_page;
        tracing::debug!(
            "Appended {} posts (total={}, has_more={})",
            appended,
            listing.results.len(),
            listing.has_next_page()
        );

        Ok(LoadOutcome::Appended(appended))
    }
}
