//! Display adapter for both book shapes.
//!
//! Search results and wishlist entries arrive in different shapes. Everything
//! that renders a book goes through [`DisplayBook`], built once here, so the
//! raw shapes never leak into rendering code.
//!
//! # Examples
//!
//! ```rust
//! use libris::display::DisplayBook;
//! use libris::types::{BookRecord, BookSummary, ImageLinks, VolumeInfo};
//!
//! let record = BookRecord::Summary(BookSummary {
//!     id: Some("1".into()),
//!     volume_info: VolumeInfo {
//!         title: "Dune".into(),
//!         authors: vec!["Frank Herbert".into(), "Brian Herbert".into()],
//!         image_links: Some(ImageLinks {
//!             thumbnail: Some("http://img/x.jpg".into()),
//!             small_thumbnail: None,
//!         }),
//!         average_rating: Some(4.0),
//!         ratings_count: Some(12),
//!     },
//! });
//!
//! let book = DisplayBook::from(&record);
//! assert_eq!(book.authors_text, "Frank Herbert, Brian Herbert");
//! assert_eq!(book.thumbnail_url.as_deref(), Some("https://img/x.jpg"));
//! ```

use crate::types::{BookRecord, BookSummary, WishlistItem};

/// Text shown in place of a cover that is missing or cannot be shown.
pub const THUMBNAIL_PLACEHOLDER: &str = "[no cover]";

/// One book, flattened for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBook {
    pub title: String,
    pub authors_text: String,
    pub thumbnail_url: Option<String>,
    pub rating: f64,
    pub ratings_count: u64,
}

impl DisplayBook {
    /// Cover URL, or [`THUMBNAIL_PLACEHOLDER`] when there is none.
    pub fn thumbnail_label(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(THUMBNAIL_PLACEHOLDER)
    }

    /// Builds the wishlist entry stored for this book when the user adds it.
    pub fn to_wishlist_item(&self) -> WishlistItem {
        WishlistItem {
            id: None,
            title: self.title.clone(),
            authors: self.authors_text.clone(),
            thumbnail: self.thumbnail_url.clone().unwrap_or_default(),
            rating: self.rating,
            ratings_count: self.ratings_count,
        }
    }
}

impl From<&BookSummary> for DisplayBook {
    fn from(summary: &BookSummary) -> Self {
        let info = &summary.volume_info;
        let thumbnail = info.image_links.as_ref().and_then(|links| {
            links
                .thumbnail
                .as_deref()
                .or(links.small_thumbnail.as_deref())
        });

        DisplayBook {
            title: info.title.clone(),
            authors_text: info.authors.join(", "),
            thumbnail_url: thumbnail
                .filter(|url| !url.trim().is_empty())
                .map(secure_url),
            rating: info.average_rating.unwrap_or(0.0),
            ratings_count: info.ratings_count.unwrap_or(0),
        }
    }
}

impl From<&WishlistItem> for DisplayBook {
    fn from(item: &WishlistItem) -> Self {
        DisplayBook {
            title: item.title.clone(),
            authors_text: item.authors.clone(),
            thumbnail_url: if item.thumbnail.is_empty() {
                None
            } else {
                Some(item.thumbnail.clone())
            },
            rating: item.rating,
            ratings_count: item.ratings_count,
        }
    }
}

impl From<&BookRecord> for DisplayBook {
    fn from(record: &BookRecord) -> Self {
        match record {
            BookRecord::Summary(summary) => summary.into(),
            BookRecord::Stored(item) => item.into(),
        }
    }
}

/// Rewrites an `http://` URL to `https://`; other URLs pass through.
///
/// # Examples
///
/// ```rust
/// use libris::display::secure_url;
///
/// assert_eq!(secure_url("http://img/x.jpg"), "https://img/x.jpg");
/// assert_eq!(secure_url("https://img/x.jpg"), "https://img/x.jpg");
/// ```
pub fn secure_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageLinks, VolumeInfo};

    fn summary(links: Option<ImageLinks>) -> BookSummary {
        BookSummary {
            id: None,
            volume_info: VolumeInfo {
                title: "Dune".to_string(),
                authors: vec!["Frank Herbert".to_string()],
                image_links: links,
                average_rating: None,
                ratings_count: None,
            },
        }
    }

    #[test]
    fn test_thumbnail_preferred_over_small_thumbnail() {
        let book = DisplayBook::from(&summary(Some(ImageLinks {
            thumbnail: Some("https://img/big.jpg".to_string()),
            small_thumbnail: Some("https://img/small.jpg".to_string()),
        })));
        assert_eq!(book.thumbnail_url.as_deref(), Some("https://img/big.jpg"));
    }

    #[test]
    fn test_small_thumbnail_fallback_is_secured() {
        let book = DisplayBook::from(&summary(Some(ImageLinks {
            thumbnail: None,
            small_thumbnail: Some("http://img/small.jpg".to_string()),
        })));
        assert_eq!(book.thumbnail_url.as_deref(), Some("https://img/small.jpg"));
    }

    #[test]
    fn test_missing_cover_uses_placeholder() {
        let book = DisplayBook::from(&summary(None));
        assert_eq!(book.thumbnail_url, None);
        assert_eq!(book.thumbnail_label(), THUMBNAIL_PLACEHOLDER);
        assert_eq!(book.rating, 0.0);
        assert_eq!(book.ratings_count, 0);
    }

    #[test]
    fn test_stored_item_used_verbatim() {
        let item = WishlistItem {
            id: None,
            title: "Emma".to_string(),
            authors: "Jane Austen".to_string(),
            thumbnail: "http://img/emma.jpg".to_string(),
            rating: 3.5,
            ratings_count: 9,
        };
        let book = DisplayBook::from(&item);
        assert_eq!(book.authors_text, "Jane Austen");
        assert_eq!(book.thumbnail_url.as_deref(), Some("http://img/emma.jpg"));
        assert_eq!(book.rating, 3.5);
    }

    #[test]
    fn test_wishlist_item_defaults_for_missing_fields() {
        let mut bare = summary(None);
        bare.volume_info.authors.clear();
        let item = DisplayBook::from(&bare).to_wishlist_item();

        assert_eq!(item.title, "Dune");
        assert_eq!(item.authors, "");
        assert_eq!(item.thumbnail, "");
        assert_eq!(item.rating, 0.0);
        assert_eq!(item.ratings_count, 0);
    }
}
