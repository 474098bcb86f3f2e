//! # Render Module
//!
//! The board the dashboard writes to. Render targets live in an explicit
//! [`Registry`] built once at startup and handed to the [`Renderer`]; metric
//! fetchers only ever talk to the renderer, and presentation surfaces only
//! ever read registry snapshots.
//!
//! ## Contained Modules:
//!
//! - **`registry`**: slot and card identifiers, their states, snapshots and
//!   change notification.
//! - **`renderer`**: the side-effecting operations (`show_loading`,
//!   `show_error`, `set_value`, ...). No business logic.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// Render-target identifiers, states and the registry holding them.
pub mod registry;
/// Side-effecting render operations over a registry.
pub mod renderer;

pub use registry::{BoardSnapshot, Card, CardId, Registry, Slot, SlotId, SlotState};
pub use renderer::Renderer;
