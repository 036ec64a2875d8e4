//! The books backend contract.
//!
//! This module defines the [`BookApi`] trait, one method per backend endpoint.
//! The client is generic over it: [`HttpBookApi`](crate::backends::HttpBookApi)
//! talks to the real service, tests plug in an in-memory fake.
//!
//! | Method | Endpoint |
//! |---|---|
//! | [`search`](BookApi::search) | `GET /books/list?q=<query>` |
//! | [`reset_wishlist`](BookApi::reset_wishlist) | `POST /books/reset-wishlist` |
//! | [`get_wishlist`](BookApi::get_wishlist) | `GET /books/wishlist` |
//! | [`add_to_wishlist`](BookApi::add_to_wishlist) | `POST /books/wishlist` |
//! | [`remove_from_wishlist`](BookApi::remove_from_wishlist) | `DELETE /books/wishlist/<title>` |

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{BookSummary, WishlistItem},
};

/// Trait every books backend implements.
///
/// # Implementation Guidelines
///
/// - Use the [`net::HttpClient`](crate::net::HttpClient) for HTTP requests
/// - Normalize loosely shaped payloads here; callers only see typed values
/// - Map every non-2xx answer to an error; callers do not inspect status codes
///
/// # Examples
///
/// ```rust
/// use libris::prelude::*;
/// use libris::Result;
/// use async_trait::async_trait;
///
/// struct EmptyCatalog;
///
/// #[async_trait]
/// impl BookApi for EmptyCatalog {
///     async fn search(&self, _query: &str) -> Result<Vec<BookSummary>> { Ok(vec![]) }
///     async fn reset_wishlist(&self) -> Result<()> { Ok(()) }
///     async fn get_wishlist(&self) -> Result<Vec<WishlistItem>> { Ok(vec![]) }
///     async fn add_to_wishlist(&self, _item: &WishlistItem) -> Result<()> { Ok(()) }
///     async fn remove_from_wishlist(&self, _title: &str) -> Result<()> { Ok(()) }
/// }
/// ```
#[async_trait]
pub trait BookApi: Send + Sync {
    /// Searches the catalog.
    ///
    /// Returns the items of the response; a response without an `items`
    /// collection yields an empty vector.
    async fn search(&self, query: &str) -> Result<Vec<BookSummary>>;

    /// Clears the server-side wishlist.
    async fn reset_wishlist(&self) -> Result<()>;

    /// Fetches the whole wishlist.
    ///
    /// A payload that is not an array yields an empty vector.
    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>>;

    /// Stores a new wishlist entry.
    async fn add_to_wishlist(&self, item: &WishlistItem) -> Result<()>;

    /// Removes the wishlist entry with exactly this title.
    async fn remove_from_wishlist(&self, title: &str) -> Result<()>;
}

#[async_trait]
impl<T> BookApi for std::sync::Arc<T>
where
    T: BookApi + ?Sized,
{
    async fn search(&self, query: &str) -> Result<Vec<BookSummary>> {
        (**self).search(query).await
    }

    async fn reset_wishlist(&self) -> Result<()> {
        (**self).reset_wishlist().await
    }

    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>> {
        (**self).get_wishlist().await
    }

    async fn add_to_wishlist(&self, item: &WishlistItem) -> Result<()> {
        (**self).add_to_wishlist(item).await
    }

    async fn remove_from_wishlist(&self, title: &str) -> Result<()> {
        (**self).remove_from_wishlist(title).await
    }
}
