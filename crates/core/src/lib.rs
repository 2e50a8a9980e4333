use serde::{Deserialize, Serialize};

pub mod error;

pub use error::BlogError;

/// 一覧表示用に整形済みの投稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub first_publication_date: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One fetched page of the listing. `next_page` is an opaque cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub results: Vec<Post>,
    pub next_page: Option<String>,
}

impl PostPage {
    /// An absent or empty cursor both mean the listing is finished.
    pub fn has_next_page(&self) -> bool {
        self.next_page.as_deref().is_some_and(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub first_publication_date: String,
    pub title: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: Vec<RichTextBlock>,
}

/// リッチテキストのブロック（段落・見出し・画像など）
///
/// Non-text blocks such as images carry no `text` and deserialize with an
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl RichTextBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.into(),
            spans: Vec::new(),
        }
    }
}

/// Inline styling (strong, em, hyperlink...) over a byte range of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Plain-text rendering of a rich-text body.
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
