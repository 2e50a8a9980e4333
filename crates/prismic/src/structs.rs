use blog_core::RichTextBlock;
use serde::Deserialize;

/// `documents/search` のレスポンス（必要なフィールドのみ）
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    pub data: RawPostData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPostData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPostDetail {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    pub data: RawPostDetailData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPostDetailData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub banner: Option<RawImage>,
    #[serde(default)]
    pub content: Vec<RawSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub body: Vec<RichTextBlock>,
}

/// `GET {endpoint}` のレスポンス。master ref の解決にだけ使う。
#[derive(Debug, Deserialize)]
pub(crate) struct ApiInfo {
    pub refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRef {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}
