use crate::{
    backend::BookApi,
    config::Config,
    error::{Error, Result},
    net::{HttpClient, json},
    types::{BookSummary, WishlistItem},
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

const SEARCH_PATH: &str = "books/list";
const RESET_PATH: &str = "books/reset-wishlist";
const WISHLIST_PATH: &str = "books/wishlist";

/// Books backend reached over HTTP.
///
/// Talks the JSON contract of the books service. Search results and wishlist
/// payloads are decoded defensively: a missing `items` collection or a
/// non-array wishlist yields an empty list, malformed records are skipped.
///
/// # Examples
///
/// ```rust,no_run
/// use libris::prelude::*;
/// use libris::backends::HttpBookApi;
///
/// # async fn example() -> libris::Result<()> {
/// let api = HttpBookApi::from_config(&Config::from_env())?;
///
/// let books = api.search("dune").await?;
/// for book in &books {
///     println!("{}", book.volume_info.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpBookApi {
    client: HttpClient,
}

impl HttpBookApi {
    /// Create a backend from an already configured client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a backend for the configured base URL
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpClient::new(config.base_url()?).with_header("Accept", "application/json");
        Ok(Self::new(client))
    }

    /// Path of the entry for `title`, percent-encoded as a single segment.
    ///
    /// `.` and `..` remain dot segments even when percent-encoded and would
    /// resolve to a different resource, so they are refused.
    fn item_path(title: &str) -> Result<String> {
        if matches!(title, "." | "..") {
            return Err(Error::parse(format!(
                "title '{}' cannot be sent as a path segment",
                title
            )));
        }
        Ok(format!("{}/{}", WISHLIST_PATH, urlencoding::encode(title)))
    }
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn search(&self, query: &str) -> Result<Vec<BookSummary>> {
        let response: Value = self.client.get_json(SEARCH_PATH, &[("q", query)]).await?;
        let items = json::extract_array(&response, "items");
        debug!(query, count = items.len(), "search response");
        Ok(json::decode_each(items, "search item"))
    }

    async fn reset_wishlist(&self) -> Result<()> {
        self.client.post(RESET_PATH).await?;
        Ok(())
    }

    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>> {
        let response: Value = self.client.get_json(WISHLIST_PATH, &[]).await?;
        let items = json::array_or_empty(response);
        Ok(json::decode_each(items, "wishlist item"))
    }

    async fn add_to_wishlist(&self, item: &WishlistItem) -> Result<()> {
        self.client.post_json(WISHLIST_PATH, item).await?;
        Ok(())
    }

    async fn remove_from_wishlist(&self, title: &str) -> Result<()> {
        self.client.delete(&Self::item_path(title)?).await?;
        Ok(())
    }
}
