//! Core data types for catalog results and wishlist entries.
//!
//! This module defines the two wire shapes the backend speaks, plus the tagged
//! wrapper the rest of the crate passes around:
//!
//! - [`BookSummary`] - A raw search result, nested `volumeInfo` and all
//! - [`WishlistItem`] - A flat, persisted wishlist entry
//! - [`BookRecord`] - Either of the above, tagged by origin
//! - [`Tab`] - The two mutually exclusive views
//!
//! # Examples
//!
//! ```rust
//! use libris::types::*;
//!
//! let item = WishlistItem {
//!     id: None,
//!     title: "Dune".to_string(),
//!     authors: "Frank Herbert".to_string(),
//!     thumbnail: String::new(),
//!     rating: 4.5,
//!     ratings_count: 120,
//! };
//!
//! let record = BookRecord::Stored(item);
//! assert_eq!(record.title(), "Dune");
//! ```

use serde::{Deserialize, Serialize};

/// A single item of the catalog search response.
///
/// Field names follow the catalog API (`volumeInfo`, `imageLinks`, ...). Every
/// part except the title is optional upstream, so missing pieces decode to
/// their defaults instead of failing the whole response.
///
/// # Examples
///
/// ```rust
/// use libris::types::BookSummary;
///
/// let summary: BookSummary = serde_json::from_value(serde_json::json!({
///     "id": "abc",
///     "volumeInfo": {
///         "title": "Dune",
///         "authors": ["Frank Herbert"],
///         "averageRating": 4.5
///     }
/// })).unwrap();
///
/// assert_eq!(summary.volume_info.title, "Dune");
/// assert!(summary.volume_info.image_links.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Catalog identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Bibliographic data
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

/// The `volumeInfo` block of a search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u64>,
}

/// Cover image URLs as published by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
}

/// A persisted wishlist entry.
///
/// The title is the identity key: the backend never holds two entries with
/// the same title, and membership checks compare titles exactly.
///
/// # Fields
///
/// * `id` - Identifier assigned by the backend, if it sends one back
/// * `title` - Unique key of the entry
/// * `authors` - Authors joined with `", "`
/// * `thumbnail` - Cover URL, empty when the book has none
/// * `rating` - Average rating in `0..=5`
/// * `ratings_count` - Number of ratings behind `rating`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    #[serde(
        default,
        alias = "_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<serde_json::Value>,

    pub title: String,

    #[serde(default)]
    pub authors: String,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub ratings_count: u64,
}

/// A book in one of the two shapes the backend produces.
///
/// Nothing past the display adapter looks inside these variants; see
/// [`crate::display::DisplayBook`].
#[derive(Debug, Clone, PartialEq)]
pub enum BookRecord {
    /// Straight from the search endpoint
    Summary(BookSummary),
    /// Straight from the wishlist endpoint
    Stored(WishlistItem),
}

impl BookRecord {
    /// Returns the title that identifies this book on the wishlist.
    pub fn title(&self) -> &str {
        match self {
            BookRecord::Summary(summary) => &summary.volume_info.title,
            BookRecord::Stored(item) => &item.title,
        }
    }
}

impl From<BookSummary> for BookRecord {
    fn from(summary: BookSummary) -> Self {
        BookRecord::Summary(summary)
    }
}

impl From<WishlistItem> for BookRecord {
    fn from(item: WishlistItem) -> Self {
        BookRecord::Stored(item)
    }
}

/// The two mutually exclusive views of the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Search,
    Wishlist,
}

impl Tab {
    /// Returns the other tab.
    pub fn other(&self) -> Tab {
        match self {
            Tab::Search => Tab::Wishlist,
            Tab::Wishlist => Tab::Search,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Wishlist => "Wishlist",
        }
    }
}
