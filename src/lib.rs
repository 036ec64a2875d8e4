//! # Libris - Book search and wishlist client
//!
//! Libris queries a remote book catalog, shows the results and keeps a
//! wishlist in sync with a small CRUD backend. The library holds the whole
//! client: the HTTP contract, the two book shapes and their display adapter,
//! the rating renderer and an explicit state machine for every user action.
//! An optional terminal front-end ships behind the `tui` feature.
//!
//! ## Features
//!
//! - **Typed Backend Contract**: One [`BookApi`] method per endpoint, with a reqwest implementation
//! - **Explicit State Machine**: `(state, event) -> (state', effects)` transitions in [`state`]
//! - **Defensive Decoding**: Missing collections and non-array payloads become empty lists
//! - **Stale Response Guard**: Searches carry a generation; late answers are dropped
//! - **Toggle Lock**: A title cannot be added or removed twice at once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use libris::prelude::*;
//! use libris::backends::HttpBookApi;
//!
//! #[tokio::main]
//! async fn main() -> libris::Result<()> {
//!     let api = HttpBookApi::from_config(&Config::from_env())?;
//!     let mut client = BookSearchClient::new(api);
//!
//!     client.start().await;
//!     client.search("the left hand of darkness").await;
//!
//!     for book in client.state().books() {
//!         let display = DisplayBook::from(book);
//!         println!("{} {} by {}", star_string(Some(display.rating)), display.title, display.authors_text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`]: Wire shapes for search results and wishlist entries
//! - [`display`]: Normalization of both shapes into one display record
//! - [`rating`]: Five-star glyph rendering
//! - [`state`]: Client state, events and effects
//! - [`client`]: Driver that performs effects against a backend
//! - [`backend`] / [`backends`]: Backend trait and its HTTP implementation
//! - [`net`]: HTTP client and JSON helpers
//! - [`config`]: API base URL configuration
//! - [`error`]: Error types

pub mod backend;
pub mod backends;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod net;
pub mod rating;
pub mod state;
pub mod types;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude module for convenient imports.
///
/// ```rust
/// use libris::prelude::*;
///
/// // Now you have access to:
/// // - BookApi, BookSearchClient, ClientState, Event, Effect
/// // - BookSummary, WishlistItem, BookRecord, Tab
/// // - DisplayBook, render_stars, Config
/// ```
pub mod prelude {
    pub use crate::{
        backend::BookApi,
        client::BookSearchClient,
        config::Config,
        display::DisplayBook,
        rating::{Star, render_stars, star_string},
        state::{Banner, BannerKind, ClientState, Effect, Event, ToggleAction},
        types::{BookRecord, BookSummary, ImageLinks, Tab, VolumeInfo, WishlistItem},
    };

    #[cfg(feature = "tui")]
    pub use crate::tui::*;
}

// Re-export main types at crate root for direct access
pub use backend::BookApi;
pub use client::BookSearchClient;
pub use config::Config;
pub use display::DisplayBook;
pub use error::{Error, Operation, Result};
pub use state::{ClientState, Effect, Event};
pub use types::{BookRecord, BookSummary, Tab, WishlistItem};
