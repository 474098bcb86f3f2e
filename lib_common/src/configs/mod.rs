//! # Configuration Modules
//!
//! Static, startup-time settings shared by the dashboard binaries: upstream
//! endpoints, relay proxy, timeouts, refresh interval and locale. Loading and
//! layering (file, environment, CLI) belongs to the binaries; this module owns
//! the defaults and validation.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Endpoint table, runtime settings and their validation.
pub mod settings;

pub use settings::{ConfigError, DashboardSettings, Endpoints};
