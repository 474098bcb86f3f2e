//! # Data Retrieval Module
//!
//! A single place for talking to upstream HTTP APIs. Market fetchers hand a
//! URL and a [`ky_http::Route`] to the client and get parsed JSON back or a
//! [`ky_http::FetchError`]; timeouts and the relay-proxy fallback are handled
//! here so no fetcher repeats that logic.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: `ResilientClient`, a `reqwest`-based JSON client with a
//!   per-request timeout and an explicit attempt plan (direct, then relayed).

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// JSON client with timeout and relay-proxy fallback.
pub mod ky_http;

pub use ky_http::{Attempt, FetchError, ResilientClient, Route};
