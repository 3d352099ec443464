//! Flat position index and content fingerprints for sectioned, virtualized lists.
//!
//! For host-side helpers (fingerprint-keyed size carryover, view types, a controller), see the
//! `sectionizer-adapter` crate.
//!
//! A sectioned list has an optional global header, `N` sections that each have an optional
//! header, their items and an optional footer, and an optional global footer. Native list
//! widgets address all of that through a single flat index. This crate provides:
//!
//! - [`PositionIndex`]: the flat position ↔ `(kind, section, item)` mapping, rebuilt in
//!   O(S + I) from the adapter's counts.
//! - [`ContentFingerprintCache`]: per-position fingerprints plus an order-sensitive aggregate,
//!   kept alongside the previous snapshot so hosts can carry measured sizes and views forward
//!   by content rather than by position.
//!
//! It is UI-agnostic and holds no views. A host integration is expected to provide:
//! - a [`SectionAdapter`] (section/item counts and objects)
//! - a [`ViewSelector`] (which sections have a header/footer)
//! - the global header/footer presence ([`GlobalChrome`])
//!
//! Every query is total: out-of-range lookups return `None`, negative counts are clamped to
//! zero and a missing adapter is an empty list.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod cache;
mod fingerprint;
mod index;
mod key;
mod types;


pub use adapter::{
    Identity, ReorderableAdapter, SectionAdapter, SectionList, UniformSelector, ViewSelector,
};
pub use cache::{Change, ContentFingerprintCache, Reuse, classify};
pub use fingerprint::{
    Fingerprint, GLOBAL_FOOTER, GLOBAL_HEADER, Snapshot, aggregate, combine, hash_str,
    item_fingerprint, mix, section_footer_fingerprint, section_header_fingerprint,
};
pub use index::PositionIndex;
pub use key::{FingerprintMap, FingerprintSet};
pub use types::{GlobalChrome, ItemPosition, PositionData, PositionInfo, PositionKind};
