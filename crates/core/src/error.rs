use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    /// A raw record lacks a required field or carries an unparseable date.
    #[error("malformed record (uid={uid:?}): {reason}")]
    MalformedRecord { uid: Option<String>, reason: String },

    /// Dereferencing a cursor failed, or a record on that page was malformed.
    #[error("failed to load page {cursor}: {source:#}")]
    PageLoadFailed {
        cursor: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("unknown post: {0}")]
    UnknownPost(String),

    #[error("content source error: {0:#}")]
    ContentSource(#[source] anyhow::Error),
}

impl BlogError {
    pub fn malformed(uid: Option<&str>, reason: impl Into<String>) -> Self {
        BlogError::MalformedRecord {
            uid: uid.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub fn page_load_failed(cursor: &str, source: impl Into<anyhow::Error>) -> Self {
        BlogError::PageLoadFailed {
            cursor: cursor.to_string(),
            source: source.into(),
        }
    }
}
