//! Common test utilities
//!
//! Shared functionality used across all test modules.
// Common test utilities - all must be public

use async_trait::async_trait;
use libris::prelude::*;
use libris::{Error, Operation, Result};
use std::collections::HashSet;
use std::sync::Mutex;

/// In-memory backend that follows the books service contract.
///
/// Any operation listed in `failing` answers with an HTTP 500 instead.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeBookApi {
    pub catalog: Mutex<Vec<BookSummary>>,
    pub wishlist: Mutex<Vec<WishlistItem>>,
    pub failing: Mutex<HashSet<Operation>>,
    pub calls: Mutex<Vec<Operation>>,
    next_id: Mutex<u64>,
}

#[allow(dead_code)]
impl FakeBookApi {
    pub fn with_catalog(books: Vec<BookSummary>) -> Self {
        let api = Self::default();
        *api.catalog.lock().unwrap() = books;
        api
    }

    pub fn fail(&self, operation: Operation) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.failing.lock().unwrap().remove(&operation);
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored_titles(&self) -> Vec<String> {
        self.wishlist
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.title.clone())
            .collect()
    }

    fn enter(&self, operation: Operation) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(Error::http(operation.name(), 500));
        }
        Ok(())
    }
}

#[async_trait]
impl BookApi for FakeBookApi {
    async fn search(&self, query: &str) -> Result<Vec<BookSummary>> {
        self.enter(Operation::Search)?;
        let needle = query.to_lowercase();
        Ok(self
            .catalog
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.volume_info.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn reset_wishlist(&self) -> Result<()> {
        self.enter(Operation::ResetWishlist)?;
        self.wishlist.lock().unwrap().clear();
        Ok(())
    }

    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>> {
        self.enter(Operation::LoadWishlist)?;
        Ok(self.wishlist.lock().unwrap().clone())
    }

    async fn add_to_wishlist(&self, item: &WishlistItem) -> Result<()> {
        self.enter(Operation::AddToWishlist)?;
        let mut wishlist = self.wishlist.lock().unwrap();
        if wishlist.iter().any(|i| i.title == item.title) {
            return Err(Error::http("books/wishlist", 409));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let mut stored = item.clone();
        stored.id = Some(serde_json::json!(*next_id));
        wishlist.push(stored);
        Ok(())
    }

    async fn remove_from_wishlist(&self, title: &str) -> Result<()> {
        self.enter(Operation::RemoveFromWishlist)?;
        self.wishlist.lock().unwrap().retain(|i| i.title != title);
        Ok(())
    }
}

/// Builds a search result with the given title and authors.
#[allow(dead_code)]
pub fn book(title: &str, authors: &[&str], rating: Option<f64>) -> BookSummary {
    BookSummary {
        id: Some(format!("id-{}", title.to_lowercase().replace(' ', "-"))),
        volume_info: VolumeInfo {
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            image_links: Some(ImageLinks {
                thumbnail: Some(format!("http://covers.example/{}.jpg", title.len())),
                small_thumbnail: None,
            }),
            average_rating: rating,
            ratings_count: rating.map(|_| 10),
        },
    }
}

#[allow(dead_code)]
pub fn sample_catalog() -> Vec<BookSummary> {
    vec![
        book("Dune", &["Frank Herbert"], Some(4.5)),
        book("Dune Messiah", &["Frank Herbert"], Some(3.5)),
        book("Emma", &["Jane Austen"], None),
        book("Good Omens", &["Terry Pratchett", "Neil Gaiman"], Some(4.0)),
    ]
}
