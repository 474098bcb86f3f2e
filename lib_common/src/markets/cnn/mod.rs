//! # CNN Business Integration Module
//!
//! Data model for the CNN Fear & Greed Index, the equity sentiment shown on the
//! board.
//!
//! ## Contained Modules:
//!
//! - **`fearandgreed`**: headline score model and its extraction.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Data models and extraction for the CNN Fear & Greed Index.
pub mod fearandgreed;
