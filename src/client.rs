//! The book search client.
//!
//! [`BookSearchClient`] pairs a [`ClientState`] with a [`BookApi`] and drives
//! the state machine: every user action becomes an [`Event`], the effects it
//! returns are performed against the backend one after another, and their
//! outcomes are fed back in until nothing is left to do.
//!
//! Front-ends that cannot await inline (the terminal UI runs effects on
//! spawned tasks) use [`perform`] directly and feed the returned event back
//! into their own [`ClientState`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use libris::prelude::*;
//! use libris::backends::HttpBookApi;
//!
//! # async fn example() -> libris::Result<()> {
//! let api = HttpBookApi::from_config(&Config::from_env())?;
//! let mut client = BookSearchClient::new(api);
//!
//! client.start().await;
//! client.search("dune").await;
//!
//! if let Some(first) = client.state().books().first().cloned() {
//!     client.toggle(first.into()).await;
//! }
//!
//! client.select_tab(Tab::Wishlist).await;
//! println!("{} books on the wishlist", client.state().wishlist().len());
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;

use tracing::warn;

use crate::{
    backend::BookApi,
    error::Error,
    state::{ClientState, Effect, Event},
    types::{BookRecord, Tab},
};

/// Stateful client over a books backend.
pub struct BookSearchClient<A> {
    api: A,
    state: ClientState,
}

impl<A> BookSearchClient<A>
where
    A: BookApi,
{
    /// Creates a client with empty state. Call [`start`](Self::start) next.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Applies `event` and performs every effect that follows from it.
    pub async fn dispatch(&mut self, event: Event) {
        let mut queue: VecDeque<Effect> = self.state.update(event).into();

        while let Some(effect) = queue.pop_front() {
            let outcome = perform(&self.api, effect).await;
            queue.extend(self.state.update(outcome));
        }
    }

    /// Startup: resets the server-side wishlist.
    pub async fn start(&mut self) {
        self.dispatch(Event::Started).await;
    }

    /// Submits a query. Blank queries are ignored.
    pub async fn search(&mut self, query: &str) {
        self.dispatch(Event::QuerySubmitted(query.to_string())).await;
    }

    /// Switches tabs; the wishlist tab refreshes the cached wishlist.
    pub async fn select_tab(&mut self, tab: Tab) {
        self.dispatch(Event::TabSelected(tab)).await;
    }

    /// Adds the book to the wishlist, or removes it if it is already there.
    pub async fn toggle(&mut self, record: BookRecord) {
        self.dispatch(Event::ToggleRequested(record)).await;
    }

    /// Closes the banner. Data is left alone.
    pub fn dismiss_banner(&mut self) {
        self.state.update(Event::BannerDismissed);
    }
}

/// Performs one effect against the backend and reports its outcome.
///
/// Errors are logged here with their full detail; the returned event only
/// says which operation failed.
pub async fn perform<A>(api: &A, effect: Effect) -> Event
where
    A: BookApi + ?Sized,
{
    let operation = effect.operation();

    let report = |e: Error| warn!(%operation, error = %e, "backend call failed");

    match effect {
        Effect::Search { query, generation } => match api.search(&query).await {
            Ok(books) => Event::SearchCompleted { generation, books },
            Err(e) => {
                report(e);
                Event::SearchFailed { generation }
            }
        },

        Effect::ResetWishlist => match api.reset_wishlist().await {
            Ok(()) => Event::WishlistReset,
            Err(e) => {
                report(e);
                Event::WishlistResetFailed
            }
        },

        Effect::FetchWishlist => match api.get_wishlist().await {
            Ok(items) => Event::WishlistLoaded(items),
            Err(e) => {
                report(e);
                Event::WishlistLoadFailed
            }
        },

        Effect::AddToWishlist(item) => match api.add_to_wishlist(&item).await {
            Ok(()) => Event::WishlistAdded { item },
            Err(e) => {
                report(e);
                Event::WishlistAddFailed { title: item.title }
            }
        },

        Effect::RemoveFromWishlist { title } => match api.remove_from_wishlist(&title).await {
            Ok(()) => Event::WishlistRemoved { title },
            Err(e) => {
                report(e);
                Event::WishlistRemoveFailed { title }
            }
        },
    }
}
