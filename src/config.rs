//! Client configuration.
//!
//! The only externally visible setting is the API base URL, read from the
//! `LIBRIS_API_URL` environment variable with a local default.
//!
//! ```rust
//! use libris::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::default()
//!     .api_base_url("http://books.internal:8080/api")
//!     .build()
//!     .unwrap();
//!
//! let base = config.base_url().unwrap();
//! assert_eq!(base.as_str(), "http://books.internal:8080/api/");
//! ```

use derive_builder::Builder;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "LIBRIS_API_URL";

/// Base URL used when [`API_URL_ENV`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:9000";

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default = "DEFAULT_API_URL.to_string()")]
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for
    /// unset or blank values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(API_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_base_url }
    }

    /// Parses the base URL, normalized so that endpoint paths can be joined
    /// onto it without dropping a path prefix.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] - If the value is not an absolute `http(s)` URL
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| Error::config(format!("invalid API URL '{}': {}", self.api_base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "unsupported scheme '{}' in API URL",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}
