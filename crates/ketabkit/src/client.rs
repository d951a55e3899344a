//! Catalog client for KetabKit
//!
//! This module provides the entry points for the catalog API and the book
//! archive CDN. HTTP is delegated to a [`Transport`], so the same client
//! works against the live service, a mock server, or an embedder's own
//! network stack.

use crate::archive::{unzip_archive, ArchiveEntry};
use crate::common::remove_falsy_values;
use crate::error::KetabError;
use crate::network::{
    build_url, ReqwestTransport, Transport, API_BASE_URL, BOOKS_CDN_URL, DEFAULT_TIMEOUT,
};
use crate::types::{
    ApiResponse, AuthorInfo, BookContents, BookIndexEntry, BookIndexOptions, BookInfo,
    CategoryInfo, RequestOptions,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Builder for configuring a [`KetabClient`]
#[derive(Clone, Default)]
pub struct ClientBuilder {
    /// API base URL
    api_base_url: Option<String>,
    /// Book archive CDN base URL
    books_cdn_url: Option<String>,
    /// Custom User-Agent
    user_agent: Option<String>,
    /// Request timeout
    timeout: Option<Duration>,
    /// Custom transport, replaces the reqwest one
    transport: Option<Arc<dyn Transport>>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_base_url", &self.api_base_url)
            .field("books_cdn_url", &self.books_cdn_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new builder with default endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the book archive CDN base URL
    pub fn books_cdn_url(mut self, url: impl Into<String>) -> Self {
        self.books_cdn_url = Some(url.into());
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom transport
    ///
    /// User-Agent and timeout settings only apply to the default transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<KetabClient, KetabError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_options(
                self.user_agent.as_deref(),
                self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            )?),
        };

        Ok(KetabClient {
            transport,
            api_base_url: trim_base(self.api_base_url.as_deref().unwrap_or(API_BASE_URL)),
            books_cdn_url: trim_base(self.books_cdn_url.as_deref().unwrap_or(BOOKS_CDN_URL)),
        })
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Client for the ketabonline.com catalog
#[derive(Clone)]
pub struct KetabClient {
    transport: Arc<dyn Transport>,
    api_base_url: String,
    books_cdn_url: String,
}

impl std::fmt::Debug for KetabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KetabClient")
            .field("transport", &self.transport.name())
            .field("api_base_url", &self.api_base_url)
            .field("books_cdn_url", &self.books_cdn_url)
            .finish()
    }
}

impl KetabClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self, KetabError> {
        ClientBuilder::new().build()
    }

    /// Create a client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// API base URL in use
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// URL of the content archive of a book
    pub fn book_archive_url(&self, id: u64) -> Result<Url, KetabError> {
        let empty: [(&str, &str); 0] = [];
        build_url(
            &format!("{}/{}/{}.data.zip", self.books_cdn_url, id, id),
            &empty,
        )
    }

    /// Information about an author
    pub async fn get_author_info(&self, id: u64) -> Result<AuthorInfo, KetabError> {
        self.get_record("Author", &format!("authors/{}", id), id)
            .await
    }

    /// Authors matching the options
    pub async fn get_authors(&self, options: &RequestOptions) -> Result<Vec<AuthorInfo>, KetabError> {
        self.get_list("authors", options).await
    }

    /// Information about a book
    pub async fn get_book_info(&self, id: u64) -> Result<BookInfo, KetabError> {
        self.get_record("Book", &format!("books/{}", id), id).await
    }

    /// Books matching the options
    pub async fn get_books(&self, options: &RequestOptions) -> Result<Vec<BookInfo>, KetabError> {
        self.get_list("books", options).await
    }

    /// Information about a category
    pub async fn get_category_info(&self, id: u64) -> Result<CategoryInfo, KetabError> {
        self.get_record("Category", &format!("categories/{}", id), id)
            .await
    }

    /// Categories matching the options
    pub async fn get_categories(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<CategoryInfo>, KetabError> {
        self.get_list("categories", options).await
    }

    /// Table of contents of a book
    ///
    /// Entries are flat unless [`BookIndexOptions::is_recursive`] is set, in
    /// which case top-level entries carry their children.
    pub async fn get_book_index(
        &self,
        id: u64,
        options: &BookIndexOptions,
    ) -> Result<Vec<BookIndexEntry>, KetabError> {
        let url = build_url(
            &format!("{}/books/{}/index", self.api_base_url, id),
            &options.to_query_pairs(),
        )?;
        let response = self.get_envelope(&url).await?;

        match response.code {
            404 => Err(KetabError::NotFound { resource: "Book", id }),
            200 => decode_data(remove_falsy_values(
                response.data.unwrap_or(Value::Array(Vec::new())),
            )),
            _ => Err(unexpected(&response)),
        }
    }

    /// Download and decode the full contents of a book
    pub async fn get_book_contents(&self, id: u64) -> Result<BookContents, KetabError> {
        let entry = self.fetch_book_json(id).await?;
        Ok(serde_json::from_slice(&entry.data)?)
    }

    /// Download a book and save its contents as JSON
    ///
    /// The JSON document from the archive is written unchanged. Returns the
    /// path that was written.
    pub async fn download_book(
        &self,
        id: u64,
        output_file: impl AsRef<Path>,
    ) -> Result<PathBuf, KetabError> {
        let entry = self.fetch_book_json(id).await?;
        let output_file = output_file.as_ref();
        tokio::fs::write(output_file, &entry.data).await?;
        debug!(book = id, path = %output_file.display(), "Saved book contents");
        Ok(output_file.to_path_buf())
    }

    /// Download the archive of a book and take out its JSON entry
    async fn fetch_book_json(&self, id: u64) -> Result<ArchiveEntry, KetabError> {
        let url = self.book_archive_url(id)?;
        let bytes = self.transport.get(&url).await?.into_bytes()?;
        debug!(book = id, size = bytes.len(), "Downloaded book archive");

        let entries = unzip_archive(&bytes)?;
        let count = entries.len();
        let Some(entry) = entries.into_iter().find(ArchiveEntry::is_json) else {
            warn!(book = id, entries = count, "Archive has no JSON entry");
            return Err(KetabError::MissingJsonEntry);
        };

        Ok(entry)
    }

    async fn get_envelope(&self, url: &Url) -> Result<ApiResponse, KetabError> {
        let body = self.transport.get(url).await?.into_json()?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_record<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        id: u64,
    ) -> Result<T, KetabError> {
        let empty: [(&str, &str); 0] = [];
        let url = build_url(&format!("{}/{}", self.api_base_url, path), &empty)?;
        let response = self.get_envelope(&url).await?;

        match response.code {
            404 => Err(KetabError::NotFound { resource, id }),
            200 => decode_data(remove_falsy_values(
                response.data.unwrap_or(Value::Object(Default::default())),
            )),
            _ => Err(unexpected(&response)),
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Vec<T>, KetabError> {
        let url = build_url(
            &format!("{}/{}", self.api_base_url, path),
            &options.to_query_pairs(),
        )?;
        let response = self.get_envelope(&url).await?;

        if response.code != 200 {
            return Err(unexpected(&response));
        }

        decode_data(remove_falsy_values(
            response.data.unwrap_or(Value::Array(Vec::new())),
        ))
    }
}

fn decode_data<T: DeserializeOwned>(data: Value) -> Result<T, KetabError> {
    Ok(serde_json::from_value(data)?)
}

fn unexpected(response: &ApiResponse) -> KetabError {
    let rendered = serde_json::to_string(response).unwrap_or_else(|_| format!("{:?}", response));
    warn!(code = response.code, "Unexpected API response");
    KetabError::UnexpectedResponse(rendered)
}
