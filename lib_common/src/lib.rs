//! Shared core of the market dashboard.
//!
//! Modules are feature-gated so lighter consumers (the live smoke tests, for
//! one) can pull in only retrieval and the payload models.

#[cfg(feature = "configs")]
pub mod configs;
#[cfg(feature = "markets")]
pub mod markets;
#[cfg(feature = "pipeline")]
pub mod pipeline;
#[cfg(feature = "render")]
pub mod render;
#[cfg(feature = "retrieve")]
pub mod retrieve;
#[cfg(feature = "utils")]
pub mod utils;
