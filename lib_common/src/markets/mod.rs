//! # Financial Market APIs Module
//!
//! Payload models for every upstream the dashboard reads, plus the extraction
//! of those payloads into normalized readings. Nothing here performs I/O: each
//! `extract_*` function takes parsed JSON and either returns a reading or a
//! [`FetchError::Shape`](crate::retrieve::FetchError::Shape).
//!
//! ## Contained Modules:
//!
//! - **`binance`**: spot 24h ticker and futures premium index.
//! - **`coingecko`**: simple price, the spot fallback.
//! - **`alternative`**: alternative.me crypto fear & greed.
//! - **`yahoo`**: chart quotes for indices and the dollar index.
//! - **`cnn`**: CNN equity fear & greed.
//! - **`readings`**: `SpotPrice`, `Quote`, `SentimentIndex`, `FundingSnapshot`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use crate::retrieve::FetchError;

/// alternative.me crypto fear & greed.
pub mod alternative;
/// Binance spot ticker and futures premium index.
pub mod binance;
/// CNN Business APIs, such as the Fear & Greed Index.
pub mod cnn;
/// CoinGecko simple price.
pub mod coingecko;
/// Normalized per-cycle readings.
pub mod readings;
/// Yahoo Finance chart quotes.
pub mod yahoo;

mod de;

/// Maps a serde error into a shape failure tagged with its source.
pub(crate) fn shape_error(context: &'static str) -> impl Fn(serde_json::Error) -> FetchError {
    move |e| FetchError::Shape(format!("{context}: {e}"))
}
