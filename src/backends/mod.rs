//! Backend implementations.

pub mod http;

pub use http::HttpBookApi;
