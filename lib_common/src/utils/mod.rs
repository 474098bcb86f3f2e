//! # Utilities Module
//!
//! Pure, dependency-light helpers shared by the market fetchers, the renderer
//! and the binaries. Nothing in here touches the network or the board.
//!
//! ## Contained Modules:
//!
//! - **`format`**: locale-independent number formatting (`1,234.50`, `+0.00%`),
//!   directional tones and the funding settlement countdown.
//! - **`sentiment`**: fear & greed buckets and the two threshold scales
//!   (crypto and equity).
//! - **`locale`**: the user-facing strings for each supported locale.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Number formatting, directional tones and countdowns.
pub mod format;
/// Localized labels and messages.
pub mod locale;
/// Fear & greed buckets and threshold scales.
pub mod sentiment;
