pub mod locale;
pub mod normalize;
pub mod pagination;
pub mod reading_time;

use blog_core::{BlogError, PostDetail, PostPage};
use prismic::{ContentSource, PageFetcher};
use serde::Serialize;

pub use locale::{DateFormatter, Locale, LocaleDateFormatter};
pub use normalize::{normalize_detail, normalize_page, normalize_post};
pub use pagination::{LoadOutcome, PaginationController};
pub use reading_time::{reading_minutes, WORDS_PER_MINUTE};

pub const POSTS_DOCUMENT_TYPE: &str = "posts";

/// 記事ページに渡すデータ
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post: PostDetail,
    pub reading_minutes: usize,
}

/// First page of the home listing.
pub async fn home_page<S, D>(
    source: &S,
    formatter: &D,
    page_size: usize,
) -> Result<PostPage, BlogError>
where
    S: ContentSource + ?Sized,
    D: DateFormatter + ?Sized,
{
    let raw = source
        .get_by_type(POSTS_DOCUMENT_TYPE, page_size)
        .await
        .map_err(BlogError::ContentSource)?;
    normalize_page(&raw, formatter)
}

/// The normalized page behind `cursor`. Any failure, including a single
/// malformed record, is reported as `PageLoadFailed`.
pub async fn fetch_next_page<F, D>(
    fetcher: &F,
    formatter: &D,
    cursor: &str,
) -> Result<PostPage, BlogError>
where
    F: PageFetcher + ?Sized,
    D: DateFormatter + ?Sized,
{
    let raw = fetcher
        .fetch_page(cursor)
        .await
        .map_err(|e| BlogError::page_load_failed(cursor, e))?;
    normalize_page(&raw, formatter).map_err(|e| BlogError::page_load_failed(cursor, e))
}

pub async fn post_page<S, D>(source: &S, formatter: &D, uid: &str) -> Result<PostView, BlogError>
where
    S: ContentSource + ?Sized,
    D: DateFormatter + ?Sized,
{
    let raw = source
        .get_by_uid(POSTS_DOCUMENT_TYPE, uid)
        .await
        .map_err(BlogError::ContentSource)?
        .ok_or_else(|| BlogError::UnknownPost(uid.to_string()))?;

    let post = normalize_detail(&raw, formatter)?;
    let reading_minutes = reading_minutes(&post.content);
    Ok(PostView {
        post,
        reading_minutes,
    })
}

/// Uids of the posts generated ahead of time. Others are generated on
/// first request.
pub async fn static_paths<S>(source: &S, page_size: usize) -> Result<Vec<String>, BlogError>
where
    S: ContentSource + ?Sized,
{
    let raw = source
        .get_by_type(POSTS_DOCUMENT_TYPE, page_size)
        .await
        .map_err(BlogError::ContentSource)?;
    Ok(raw.results.into_iter().filter_map(|post| post.uid).collect())
}
