//! Client state and its transitions.
//!
//! [`ClientState`] owns everything the user sees: the current search results,
//! the cached wishlist, the banner, the busy flag and the active tab. It only
//! changes through [`ClientState::update`], which applies one [`Event`] and
//! returns the [`Effect`]s (backend calls) the event calls for. Running those
//! effects and feeding their outcomes back in is the driver's job, see
//! [`BookSearchClient`](crate::client::BookSearchClient).
//!
//! # Examples
//!
//! ```rust
//! use libris::state::{ClientState, Effect, Event};
//!
//! let mut state = ClientState::new();
//!
//! // Blank queries never reach the backend
//! assert!(state.update(Event::QuerySubmitted("   ".into())).is_empty());
//!
//! let effects = state.update(Event::QuerySubmitted("dune".into()));
//! assert_eq!(effects, vec![Effect::Search { query: "dune".into(), generation: 1 }]);
//! assert!(state.is_loading());
//! ```

use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    display::DisplayBook,
    error::Operation,
    types::{BookRecord, BookSummary, Tab, WishlistItem},
};

/// Message shown when a search comes back empty.
pub const NO_RESULTS_MESSAGE: &str = "No books matched your search.";

/// Severity of the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

/// The single, dismissible message line. Setting a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            message: message.into(),
        }
    }

    /// Banner for a failed backend operation.
    pub fn failure(operation: Operation) -> Self {
        Self {
            kind: BannerKind::Error,
            message: operation.failure_message().to_string(),
        }
    }
}

/// Something that happened: a user action or the outcome of a backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The application started
    Started,
    /// The user submitted a query
    QuerySubmitted(String),
    SearchCompleted {
        generation: u64,
        books: Vec<BookSummary>,
    },
    SearchFailed {
        generation: u64,
    },
    WishlistReset,
    WishlistResetFailed,
    /// The user picked a tab
    TabSelected(Tab),
    WishlistLoaded(Vec<WishlistItem>),
    WishlistLoadFailed,
    /// The user toggled wishlist membership of a book
    ToggleRequested(BookRecord),
    /// The add call succeeded; carries the entry that was sent
    WishlistAdded {
        item: WishlistItem,
    },
    WishlistAddFailed {
        title: String,
    },
    WishlistRemoved {
        title: String,
    },
    WishlistRemoveFailed {
        title: String,
    },
    /// The user closed the banner
    BannerDismissed,
}

/// A backend call requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search { query: String, generation: u64 },
    ResetWishlist,
    FetchWishlist,
    AddToWishlist(WishlistItem),
    RemoveFromWishlist { title: String },
}

impl Effect {
    /// The backend operation this effect performs.
    pub fn operation(&self) -> Operation {
        match self {
            Effect::Search { .. } => Operation::Search,
            Effect::ResetWishlist => Operation::ResetWishlist,
            Effect::FetchWishlist => Operation::LoadWishlist,
            Effect::AddToWishlist(_) => Operation::AddToWishlist,
            Effect::RemoveFromWishlist { .. } => Operation::RemoveFromWishlist,
        }
    }
}

/// What toggling a book would do right now, for rendering its control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Add,
    Remove,
    /// Already on the wishlist; removal is only offered from the wishlist tab
    Disabled,
    /// A call for this title is still in flight
    Pending,
}

/// All state owned by one client instance.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    books: Vec<BookSummary>,
    wishlist: Vec<WishlistItem>,
    banner: Option<Banner>,
    loading: bool,
    active_tab: Tab,
    search_generation: u64,
    pending_toggles: HashSet<String>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results of the latest successful search.
    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    /// Cached copy of the server-side wishlist.
    pub fn wishlist(&self) -> &[WishlistItem] {
        &self.wishlist
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Message of the banner if it reports an error.
    pub fn error(&self) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|b| b.kind == BannerKind::Error)
            .map(|b| b.message.as_str())
    }

    /// `true` while the latest search is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Generation of the most recently submitted search.
    pub fn search_generation(&self) -> u64 {
        self.search_generation
    }

    /// Exact, case-sensitive membership check by title.
    pub fn is_in_wishlist(&self, title: &str) -> bool {
        self.wishlist.iter().any(|item| item.title == title)
    }

    /// `true` while an add or remove for `title` is in flight.
    pub fn is_toggle_pending(&self, title: &str) -> bool {
        self.pending_toggles.contains(title)
    }

    /// What toggling `record` would do on the active tab.
    pub fn toggle_action(&self, record: &BookRecord) -> ToggleAction {
        let title = record.title();
        if self.is_toggle_pending(title) {
            ToggleAction::Pending
        } else if !self.is_in_wishlist(title) {
            ToggleAction::Add
        } else if self.active_tab == Tab::Search {
            ToggleAction::Disabled
        } else {
            ToggleAction::Remove
        }
    }

    /// Records listed on the active tab, in display order.
    pub fn visible_records(&self) -> Vec<BookRecord> {
        match self.active_tab {
            Tab::Search => self.books.iter().cloned().map(BookRecord::Summary).collect(),
            Tab::Wishlist => self.wishlist.iter().cloned().map(BookRecord::Stored).collect(),
        }
    }

    /// Applies one event and returns the backend calls it requires.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Started => {
                info!("starting up, resetting wishlist");
                vec![Effect::ResetWishlist]
            }

            Event::QuerySubmitted(query) => {
                let query = query.trim();
                if query.is_empty() {
                    return Vec::new();
                }
                self.loading = true;
                self.banner = None;
                self.search_generation += 1;
                info!(query, generation = self.search_generation, "search submitted");
                vec![Effect::Search {
                    query: query.to_string(),
                    generation: self.search_generation,
                }]
            }

            Event::SearchCompleted { generation, books } => {
                if generation != self.search_generation {
                    debug!(generation, latest = self.search_generation, "dropping stale search results");
                    return Vec::new();
                }
                self.loading = false;
                self.active_tab = Tab::Search;
                if books.is_empty() {
                    self.banner = Some(Banner::info(NO_RESULTS_MESSAGE));
                }
                self.books = books;
                Vec::new()
            }

            Event::SearchFailed { generation } => {
                if generation != self.search_generation {
                    debug!(generation, latest = self.search_generation, "dropping stale search failure");
                    return Vec::new();
                }
                self.loading = false;
                self.banner = Some(Banner::failure(Operation::Search));
                Vec::new()
            }

            Event::WishlistReset => {
                self.wishlist.clear();
                Vec::new()
            }

            Event::WishlistResetFailed => {
                self.banner = Some(Banner::failure(Operation::ResetWishlist));
                Vec::new()
            }

            Event::TabSelected(tab) => {
                self.active_tab = tab;
                match tab {
                    Tab::Wishlist => vec![Effect::FetchWishlist],
                    Tab::Search => Vec::new(),
                }
            }

            Event::WishlistLoaded(items) => {
                self.wishlist = items;
                Vec::new()
            }

            Event::WishlistLoadFailed => {
                self.banner = Some(Banner::failure(Operation::LoadWishlist));
                Vec::new()
            }

            Event::ToggleRequested(record) => self.toggle(record),

            Event::WishlistAdded { item } => {
                self.pending_toggles.remove(&item.title);
                if !self.is_in_wishlist(&item.title) {
                    self.wishlist.push(item);
                }
                vec![Effect::FetchWishlist]
            }

            Event::WishlistAddFailed { title } => {
                self.pending_toggles.remove(&title);
                self.banner = Some(Banner::failure(Operation::AddToWishlist));
                Vec::new()
            }

            Event::WishlistRemoved { title } => {
                self.pending_toggles.remove(&title);
                self.wishlist.retain(|item| item.title != title);
                Vec::new()
            }

            Event::WishlistRemoveFailed { title } => {
                self.pending_toggles.remove(&title);
                self.banner = Some(Banner::failure(Operation::RemoveFromWishlist));
                Vec::new()
            }

            Event::BannerDismissed => {
                self.banner = None;
                Vec::new()
            }
        }
    }

    fn toggle(&mut self, record: BookRecord) -> Vec<Effect> {
        let title = record.title().to_string();
        if title.is_empty() {
            debug!("ignoring toggle for a book without a title");
            return Vec::new();
        }
        if self.pending_toggles.contains(&title) {
            debug!(title = %title, "toggle already in flight");
            return Vec::new();
        }

        let effect = if self.is_in_wishlist(&title) {
            info!(title = %title, "removing from wishlist");
            Effect::RemoveFromWishlist {
                title: title.clone(),
            }
        } else {
            info!(title = %title, "adding to wishlist");
            Effect::AddToWishlist(DisplayBook::from(&record).to_wishlist_item())
        };

        self.pending_toggles.insert(title);
        vec![effect]
    }
}
