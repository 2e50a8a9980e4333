//! Prismic REST API (v2) クライアント
//!
//! Only the two queries the blog needs are implemented: listing documents of
//! a type, and looking one up by uid. Pagination follows the `next_page`
//! URL the API hands back.

pub mod api;
pub mod structs;

pub use api::{ContentSource, PageFetcher, PrismicClient, PrismicConfig};
pub use structs::{
    RawImage, RawPage, RawPost, RawPostData, RawPostDetail, RawPostDetailData, RawSection,
};
