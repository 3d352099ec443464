use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use sectionizer::PositionKind;

use crate::{AdapterOptions, ViewType};

#[cfg(feature = "std")]
type ReuseIdMap = HashMap<String, ViewType>;
#[cfg(not(feature = "std"))]
type ReuseIdMap = BTreeMap<String, ViewType>;

/// A registered view type and the reuse pool capacity it was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTypeEntry {
    pub view_type: ViewType,
    pub kind: PositionKind,
    pub pool_size: usize,
}

/// Interns string reuse ids into stable numeric view types.
///
/// Native recyclers pool views by a small integer. The first time a reuse id is seen it gets
/// the next free view type and a pool capacity derived from the kind of slot that asked for it.
#[derive(Clone, Debug)]
pub struct ViewTypeRegistry {
    options: AdapterOptions,
    ids: ReuseIdMap,
    entries: Vec<ViewTypeEntry>,
}

impl Default for ViewTypeRegistry {
    fn default() -> Self {
        Self::new(AdapterOptions::default())
    }
}

impl ViewTypeRegistry {
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            options,
            ids: ReuseIdMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the view type for `reuse_id`, registering it on first use.
    pub fn view_type(&mut self, reuse_id: &str, kind: PositionKind) -> ViewType {
        if let Some(&view_type) = self.ids.get(reuse_id) {
            return view_type;
        }
        let view_type = self
            .options
            .view_type_base
            .saturating_add(1)
            .saturating_add(self.entries.len() as ViewType);
        let pool_size = self.options.pool_size_for(kind);
        self.ids.insert(String::from(reuse_id), view_type);
        self.entries.push(ViewTypeEntry {
            view_type,
            kind,
            pool_size,
        });
        vdebug!(reuse_id, view_type, pool_size, "registered view type");
        view_type
    }

    pub fn get(&self, reuse_id: &str) -> Option<ViewType> {
        self.ids.get(reuse_id).copied()
    }

    pub fn entry(&self, view_type: ViewType) -> Option<ViewTypeEntry> {
        let first = self.options.view_type_base.checked_add(1)?;
        let slot = view_type.checked_sub(first)? as usize;
        self.entries.get(slot).copied()
    }

    pub fn pool_size(&self, view_type: ViewType) -> Option<usize> {
        self.entry(view_type).map(|e| e.pool_size)
    }

    pub fn entries(&self) -> &[ViewTypeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every registration (e.g. when templates change).
    pub fn reset(&mut self) {
        self.ids.clear();
        self.entries.clear();
    }
}
