//! Error types and result handling for Libris operations.
//!
//! All fallible operations return a [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Network Errors**: connection failures reported by the HTTP client
//! - **HTTP Errors**: the backend answered with a non-2xx status
//! - **Parse/JSON Errors**: payloads that could not be decoded, titles that
//!   cannot be addressed in a URL
//! - **Config Errors**: an unusable API base URL
//!
//! Detailed errors are meant for the log. What the user sees is the fixed
//! message attached to the failed [`Operation`]; failures are not
//! distinguished by status code.
//!
//! # Examples
//!
//! ```rust
//! use libris::error::{Error, Operation};
//!
//! let error = Error::http("/books/wishlist", 503);
//! assert!(error.to_string().contains("503"));
//! assert_eq!(Operation::Search.failure_message(), "Search failed. Please try again.");
//! ```

use thiserror::Error;

/// Type alias for Results with Libris errors.
///
/// # Examples
///
/// ```rust
/// use libris::{Result, Error};
///
/// fn example_operation() -> Result<String> {
///     Ok("Success".to_string())
/// }
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::parse("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all Libris operations.
///
/// # Variants
///
/// * [`Network`](Error::Network) - HTTP client and connection errors
/// * [`Http`](Error::Http) - Non-success status from the backend
/// * [`Parse`](Error::Parse) - Input that cannot be expressed in a request
/// * [`Json`](Error::Json) - JSON serialization errors
/// * [`Config`](Error::Config) - Invalid configuration
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors from HTTP operations.
    ///
    /// Wraps errors from reqwest: refused connections, DNS failures, TLS
    /// problems and broken response bodies.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a status outside the 2xx range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libris::Error;
    ///
    /// let error = Error::http("/books/list", 500);
    /// assert_eq!(error.to_string(), "HTTP 500 from /books/list");
    /// ```
    #[error("HTTP {status} from {endpoint}")]
    Http { endpoint: String, status: u16 },

    /// Input that cannot be turned into a valid request.
    ///
    /// Used for wishlist titles that are URL dot segments (`.` or `..`).
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON serialization and deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors, such as an API base URL that cannot be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates an HTTP status error for the given endpoint.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - Path of the request that failed
    /// * `status` - Numeric HTTP status returned by the backend
    pub fn http(endpoint: impl Into<String>, status: u16) -> Self {
        Error::Http {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

/// The backend operations a user action can trigger.
///
/// Each operation owns exactly one user-facing failure message. The banner
/// shows that message no matter which [`Error`] caused the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    LoadWishlist,
    AddToWishlist,
    RemoveFromWishlist,
    ResetWishlist,
}

impl Operation {
    /// Returns the fixed message shown when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Search => "Search failed. Please try again.",
            Operation::LoadWishlist => "Could not load your wishlist.",
            Operation::AddToWishlist => "Could not add the book to your wishlist.",
            Operation::RemoveFromWishlist => "Could not remove the book from your wishlist.",
            Operation::ResetWishlist => "Could not reset your wishlist.",
        }
    }

    /// Short lowercase name used in log records.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::LoadWishlist => "load-wishlist",
            Operation::AddToWishlist => "add-to-wishlist",
            Operation::RemoveFromWishlist => "remove-from-wishlist",
            Operation::ResetWishlist => "reset-wishlist",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
