//! # Pipeline Module
//!
//! Turns upstream JSON into board content. A metric is data: an ordered list
//! of sources (each with its own extractor), a presenter and the card it owns.
//! One generic routine, [`metric::resolve_metric`], runs every metric the same
//! way, and the [`orchestrator::Dashboard`] runs all of them concurrently.
//!
//! ## Contained Modules:
//!
//! - **`metric`**: `MetricSpec`, `SourceSpec`, `Readout` and the resolve routine.
//! - **`catalog`**: the eight metrics of the dashboard and their presenters.
//! - **`orchestrator`**: refresh cycles and their triggers.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// The eight dashboard metrics.
pub mod catalog;
/// Generic metric definition and resolution.
pub mod metric;
/// Refresh cycles, manual and periodic triggers.
pub mod orchestrator;

pub use catalog::Catalog;
pub use metric::{MetricError, MetricSpec, Readout, SourceSpec};
pub use orchestrator::{CycleReport, Dashboard};
