//! HTTP transport for the catalog API
//!
//! Design: the client only needs one capability, "GET a URL and hand back
//! JSON or bytes". That capability is the [`Transport`] trait so tests and
//! embedders can swap the network layer; [`ReqwestTransport`] is the default.

use crate::error::KetabError;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Base URL for the catalog backend API
pub const API_BASE_URL: &str = "https://backend.ketabonline.com/api/v2";

/// Base URL for the book archive CDN
pub const BOOKS_CDN_URL: &str = "https://s2.ketabonline.com/books";

/// Default request timeout (connect + full body)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a URL from an endpoint and query parameters
///
/// Any query string already on the endpoint is replaced. Parameters keep
/// their order.
pub fn build_url<K, V>(endpoint: &str, params: &[(K, V)]) -> Result<Url, KetabError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url =
        Url::parse(endpoint).map_err(|e| KetabError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
    url.set_query(None);
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    }
    Ok(url)
}

/// Body of a successful GET
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    /// Parsed JSON (content type contained `application/json`)
    Json(Value),
    /// Raw bytes for everything else
    Bytes(Bytes),
}

impl HttpBody {
    /// Interpret the body as JSON, parsing raw bytes if needed
    pub fn into_json(self) -> Result<Value, KetabError> {
        match self {
            HttpBody::Json(value) => Ok(value),
            HttpBody::Bytes(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    /// Interpret the body as raw bytes, re-encoding JSON if needed
    pub fn into_bytes(self) -> Result<Bytes, KetabError> {
        match self {
            HttpBody::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            HttpBody::Bytes(bytes) => Ok(bytes),
        }
    }
}

/// Network capability used by [`KetabClient`](crate::KetabClient)
///
/// Implementations must fail on non-success HTTP status codes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// GET the URL and return its body
    async fn get(&self, url: &Url) -> Result<HttpBody, KetabError>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default User-Agent and timeout
    pub fn new() -> Result<Self, KetabError> {
        Self::with_options(None, DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom User-Agent and timeout
    pub fn with_options(user_agent: Option<&str>, timeout: Duration) -> Result<Self, KetabError> {
        let mut headers = HeaderMap::new();
        let user_agent = user_agent.unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, application/zip, */*;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(KetabError::ClientBuildError)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn get(&self, url: &Url) -> Result<HttpBody, KetabError> {
        debug!(transport = self.name(), url = %url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(KetabError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Request failed");
            return Err(KetabError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_lowercase().contains("application/json"));

        if is_json {
            let value = response
                .json::<Value>()
                .await
                .map_err(KetabError::from_reqwest)?;
            return Ok(HttpBody::Json(value));
        }

        read_body(response).await.map(HttpBody::Bytes)
    }
}

/// Read a response body chunk by chunk
async fn read_body(response: reqwest::Response) -> Result<Bytes, KetabError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(KetabError::from_reqwest)?;
        body.extend_from_slice(&bytes);
    }

    debug!(size = body.len(), "Body read");
    Ok(Bytes::from(body))
}
