//! Music catalog search client (iTunes Search API)

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::{CatalogResponse, RemoteTrack};

/// Why a catalog search produced no results
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Transport failure or a non-2xx status
    #[error("network error: {0}")]
    Network(String),
    /// The response carried no body
    #[error("empty response body")]
    Data,
    /// The body was not the expected JSON
    #[error("parse error: {0}")]
    Parse(String),
}

/// Anything that can answer a catalog search
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<RemoteTrack>, NetworkError>;
}

/// HTTP client for the catalog search endpoint
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    media: String,
}

impl CatalogClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: settings.catalog_url()?,
            media: settings.catalog_media.clone(),
        })
    }

    /// Full request URL for `term`, with both parameters percent-encoded
    pub fn search_url(&self, term: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("media", &self.media)
            .append_pair("term", term);
        url
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search(&self, term: &str) -> Result<Vec<RemoteTrack>, NetworkError> {
        let url = self.search_url(term);
        debug!("catalog search: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Network(e.to_string()))?;

        decode_search_response(status, &body)
    }
}

/// Map a raw HTTP status and body onto the search result
pub fn decode_search_response(
    status: StatusCode,
    body: &[u8],
) -> Result<Vec<RemoteTrack>, NetworkError> {
    if !status.is_success() {
        warn!("catalog search failed status={}", status);
        return Err(NetworkError::Network(format!("unexpected status {}", status)));
    }

    if body.is_empty() {
        return Err(NetworkError::Data);
    }

    let parsed: CatalogResponse =
        serde_json::from_slice(body).map_err(|e| NetworkError::Parse(e.to_string()))?;

    debug!(
        "catalog returned {} results (resultCount={})",
        parsed.results.len(),
        parsed.result_count
    );
    Ok(parsed.results)
}
