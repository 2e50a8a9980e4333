use crate::locale::{parse_publication_date, DateFormatter};
use blog_core::{Banner, BlogError, Post, PostDetail, PostPage, Section};
use prismic::{RawPage, RawPost, RawPostDetail};

fn format_publication_date<D: DateFormatter + ?Sized>(
    uid: Option<&str>,
    raw: Option<&str>,
    formatter: &D,
) -> Result<String, BlogError> {
    let raw = raw.ok_or_else(|| BlogError::malformed(uid, "missing first_publication_date"))?;
    let date = parse_publication_date(raw)
        .ok_or_else(|| BlogError::malformed(uid, format!("unparseable date: {}", raw)))?;
    Ok(formatter.format_date(&date))
}

/// Raw record -> display-ready `Post`. Title and date are required;
/// subtitle and author fall back to empty strings.
pub fn normalize_post<D: DateFormatter + ?Sized>(
    raw: &RawPost,
    formatter: &D,
) -> Result<Post, BlogError> {
    let uid = raw.uid.as_deref();
    let first_publication_date =
        format_publication_date(uid, raw.first_publication_date.as_deref(), formatter)?;
    let title = raw
        .data
        .title
        .clone()
        .ok_or_else(|| BlogError::malformed(uid, "missing title"))?;

    Ok(Post {
        uid: raw.uid.clone(),
        first_publication_date,
        title,
        subtitle: raw.data.subtitle.clone().unwrap_or_default(),
        author: raw.data.author.clone().unwrap_or_default(),
    })
}

/// Normalizes a whole page. The first malformed record aborts it.
pub fn normalize_page<D: DateFormatter + ?Sized>(
    raw: &RawPage<RawPost>,
    formatter: &D,
) -> Result<PostPage, BlogError> {
    let results = raw
        .results
        .iter()
        .map(|post| normalize_post(post, formatter))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PostPage {
        results,
        next_page: raw.next_page.clone().filter(|c| !c.is_empty()),
    })
}

pub fn normalize_detail<D: DateFormatter + ?Sized>(
    raw: &RawPostDetail,
    formatter: &D,
) -> Result<PostDetail, BlogError> {
    let uid = raw.uid.as_deref();
    let first_publication_date =
        format_publication_date(uid, raw.first_publication_date.as_deref(), formatter)?;
    let title = raw
        .data
        .title
        .clone()
        .ok_or_else(|| BlogError::malformed(uid, "missing title"))?;

    let banner = Banner {
        url: raw
            .data
            .banner
            .as_ref()
            .and_then(|b| b.url.clone())
            .unwrap_or_default(),
    };

    let content = raw
        .data
        .content
        .iter()
        .map(|section| Section {
            heading: section.heading.clone().unwrap_or_default(),
            body: section.body.clone(),
        })
        .collect();

    Ok(PostDetail {
        uid: raw.uid.clone(),
        first_publication_date,
        title,
        author: raw.data.author.clone().unwrap_or_default(),
        banner,
        content,
    })
}
