//! Host-side helpers for the `sectionizer` crate.
//!
//! The `sectionizer` crate owns the flat position index and the content fingerprints. This
//! crate provides the small, framework-neutral pieces a host list integration builds on top:
//!
//! - [`MeasuredLayout`]: per-position sizes whose measurements follow fingerprints across
//!   insertions, removals and reorders
//! - [`ViewTypeRegistry`]: reuse id → numeric view type interning with per-kind pool sizes
//! - [`Selection`]: positional item selection honouring a [`SelectionMode`]
//! - [`Controller`]: invalidate → rebuild → snapshot → layout sequencing, reload suspension,
//!   selection and drag reordering
//!
//! This crate is intentionally framework-agnostic (no platform bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod fenwick;
mod layout;
mod options;
mod selection;
mod view_types;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use layout::{LayoutUpdate, MeasuredItem, MeasuredLayout};
pub use options::{AdapterOptions, ViewType};
pub use selection::{Selection, SelectionMode};
pub use view_types::{ViewTypeEntry, ViewTypeRegistry};
