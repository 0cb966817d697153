//! Fetch layer: HTML visible-text extraction and the HTTP snippet client.
//!
//! The HTTP client and its tests are behind the `http` feature; run them
//! with `cargo test -p normas-fetch --features http`.

pub mod html;
pub use html::visible_text;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{DEFAULT_TIMEOUT_SECS, FetchError, SnippetClient};
