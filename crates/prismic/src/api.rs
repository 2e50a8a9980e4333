use crate::structs::{ApiInfo, RawPage, RawPost, RawPostDetail};
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Prismic リポジトリへの接続設定
///
/// `endpoint` is the API root, e.g. `https://<repo>.cdn.prismic.io/api/v2`.
#[derive(Debug, Clone)]
pub struct PrismicConfig {
    pub endpoint: String,
    pub access_token: Option<String>,
}

/// Typed queries against the content repository.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn get_by_type(&self, document_type: &str, page_size: usize)
        -> Result<RawPage<RawPost>>;

    /// `Ok(None)` when no document carries `uid`.
    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<RawPostDetail>>;
}

/// Dereferences an opaque `next_page` cursor into the page it points at.
#[async_trait::async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, cursor: &str) -> Result<RawPage<RawPost>>;
}

#[derive(Debug, Clone)]
pub struct PrismicClient {
    client: Client,
    config: PrismicConfig,
}

impl PrismicClient {
    pub fn new(client: Client, config: PrismicConfig) -> Self {
        Self { client, config }
    }

    /// A cursor must point back at the configured repository (same scheme,
    /// host and port). Anything else is refused before a request is made.
    pub fn validate_cursor(&self, cursor: &str) -> Result<Url> {
        let endpoint = Url::parse(&self.config.endpoint).context("Invalid Prismic endpoint")?;
        let url = Url::parse(cursor).context("Cursor is not an absolute URL")?;

        if url.scheme() != endpoint.scheme()
            || url.host_str() != endpoint.host_str()
            || url.port_or_known_default() != endpoint.port_or_known_default()
        {
            anyhow::bail!("Cursor does not point at the configured repository: {}", url);
        }

        Ok(url)
    }

    fn with_token(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) => req.query(&[("access_token", token.as_str())]),
            None => req,
        }
    }

    async fn master_ref(&self) -> Result<String> {
        let res = self
            .with_token(self.client.get(&self.config.endpoint))
            .send()
            .await
            .context("Failed to reach Prismic API")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Prismic API failed: {} - {}", status, text);
        }

        let info: ApiInfo = res.json().await.context("Failed to parse Prismic API info")?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .context("Prismic API returned no master ref")
    }

    async fn search<T: DeserializeOwned>(
        &self,
        predicate: &str,
        page_size: usize,
    ) -> Result<RawPage<T>> {
        let reference = self.master_ref().await?;
        let url = format!(
            "{}/documents/search",
            self.config.endpoint.trim_end_matches('/')
        );

        let page_size = page_size.to_string();

        let req = self.client.get(url).query(&[
            ("ref", reference.as_str()),
            ("q", predicate),
            ("pageSize", page_size.as_str()),
        ]);

        let res = self
            .with_token(req)
            .send()
            .await
            .context("Search request failed")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Search API failed: {} - {}", status, text);
        }

        res.json().await.context("Failed to parse search response")
    }
}

/// Predicate string literal. `"` and `\` inside the value are escaped.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[async_trait::async_trait]
impl ContentSource for PrismicClient {
    async fn get_by_type(
        &self,
        document_type: &str,
        page_size: usize,
    ) -> Result<RawPage<RawPost>> {
        let predicate = format!("[[at(document.type,\"{}\")]]", document_type);
        tracing::debug!("Listing {} (pageSize={})", document_type, page_size);
        self.search(&predicate, page_size).await
    }

    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<Option<RawPostDetail>> {
        let predicate = format!("[[at(my.{}.uid,{})]]", document_type, quote(uid));
        tracing::debug!("Looking up {} by uid {}", document_type, uid);
        let page: RawPage<RawPostDetail> = self.search(&predicate, 1).await?;
        Ok(page.results.into_iter().next())
    }
}

#[async_trait::async_trait]
impl PageFetcher for PrismicClient {
    async fn fetch_page(&self, cursor: &str) -> Result<RawPage<RawPost>> {
        let url = self.validate_cursor(cursor)?;

        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("Next page request failed")?
            .error_for_status()
            .context("Next page request returned an error status")?;

        res.json().await.context("Failed to parse next page response")
    }
}
