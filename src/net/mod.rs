//! Network utilities for talking to the books backend.
//!
//! This module provides the networking infrastructure for Libris:
//!
//! - **HTTP Client**: A global, configured HTTP client with connection pooling
//! - **Endpoint Resolution**: Relative endpoint paths joined onto the API base URL
//! - **Status Handling**: Every non-2xx answer becomes [`Error::Http`](crate::Error::Http)
//! - **Content Parsing**: JSON helpers for loosely trusted payloads
//!
//! Requests are sent exactly once. There is no retry, backoff or timeout; a
//! failure is reported to the caller and the user decides whether to try again.
//!
//! # Examples
//!
//! ```rust,no_run
//! use libris::net::HttpClient;
//! use url::Url;
//!
//! # async fn example() -> libris::Result<()> {
//! let client = HttpClient::new(Url::parse("http://localhost:9000/").unwrap());
//!
//! let wishlist: serde_json::Value = client.get_json("books/wishlist", &[]).await?;
//! client.delete("books/wishlist/Dune").await?;
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::{Client, RequestBuilder, header::HeaderMap};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

pub mod json;

/// Global HTTP client instance.
///
/// Configured with connection pooling, gzip/brotli support and a custom
/// User-Agent. Created lazily on first use and shared by every [`HttpClient`].
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("Libris/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to build HTTP client")
});

/// HTTP client bound to one API base URL.
///
/// Endpoint paths passed to the request methods are relative (`"books/list"`,
/// no leading slash) and resolved against the base URL, so a base such as
/// `http://host/api/` keeps its `/api` prefix.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: Url,
    headers: HeaderMap,
}

impl HttpClient {
    /// Creates a client for the given base URL.
    ///
    /// The base should end with `/`; [`Config::base_url`](crate::config::Config::base_url)
    /// already normalizes it that way.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a custom header to all requests made by this client.
    ///
    /// Invalid header names or values are ignored.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            name.parse::<reqwest::header::HeaderName>(),
            value.parse::<reqwest::header::HeaderValue>(),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If the joined URL is invalid
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("cannot resolve endpoint '{}': {}", path, e)))
    }

    /// Sends a prepared request and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<Bytes> {
        let response = request.headers(self.headers.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(path, status = status.as_u16(), "backend rejected request");
            return Err(Error::http(path, status.as_u16()));
        }

        Ok(response.bytes().await?)
    }

    /// Performs a GET request with the given query pairs.
    ///
    /// # Errors
    ///
    /// * [`Error::Http`] - For non-2xx responses
    /// * [`Error::Network`] - For network/connection errors
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Bytes> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        self.execute(CLIENT.get(url).query(query), path).await
    }

    /// Performs a GET request and deserializes the response as JSON.
    ///
    /// # Errors
    ///
    /// * All errors from [`get()`](HttpClient::get)
    /// * [`Error::Json`] - If JSON parsing fails
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.get(path, query).await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Performs a POST request without a body.
    pub async fn post(&self, path: &str) -> Result<Bytes> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        self.execute(CLIENT.post(url), path).await
    }

    /// Performs a POST request with a JSON body.
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST (json)");
        self.execute(CLIENT.post(url).json(body), path).await
    }

    /// Performs a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Bytes> {
        let url = self.endpoint(path)?;
        debug!(%url, "DELETE");
        self.execute(CLIENT.delete(url), path).await
    }
}
