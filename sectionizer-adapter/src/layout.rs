use alloc::vec::Vec;
use core::mem;
use core::ops::Range;

use sectionizer::{Fingerprint, FingerprintMap, FingerprintSet, Snapshot};

use crate::fenwick::Fenwick;

/// What [`MeasuredLayout::apply_snapshot`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutUpdate {
    /// The snapshot matched the one already applied; nothing was touched.
    Kept,
    /// Per-position sizes were rebuilt from the fingerprint → size cache.
    Rebuilt { carried: usize, estimated: usize },
}

/// One laid-out position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredItem {
    pub position: usize,
    pub fingerprint: Fingerprint,
    /// Start offset in the scroll axis.
    pub start: u64,
    /// Size in the scroll axis.
    pub size: u32,
    pub measured: bool,
}

impl MeasuredItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// A 1D strip of per-position sizes whose measurements follow content fingerprints.
///
/// Measured sizes are cached by fingerprint, not by position. When a new snapshot is applied
/// every position looks its fingerprint up in that cache: a hit carries the old measurement to
/// the new position (so a moved item is not re-measured), a miss falls back to the estimate.
///
/// The cache only keeps fingerprints present in the last two applied snapshots. An item that
/// stays out of the list for longer is measured again when it returns.
#[derive(Clone, Debug)]
pub struct MeasuredLayout {
    estimated_size: u32,
    fingerprints: Vec<Fingerprint>,
    sizes: Vec<u32>,
    measured: Vec<bool>,
    sums: Fenwick,
    fingerprint_sizes: FingerprintMap<u32>,
    /// Positions of fingerprints that occur more than once in the applied snapshot.
    shared: FingerprintMap<Vec<usize>>,
    applied: Option<Fingerprint>,
}

impl Default for MeasuredLayout {
    fn default() -> Self {
        Self::new(crate::AdapterOptions::default().estimated_size)
    }
}

impl MeasuredLayout {
    pub fn new(estimated_size: u32) -> Self {
        Self {
            estimated_size,
            fingerprints: Vec::new(),
            sizes: Vec::new(),
            measured: Vec::new(),
            sums: Fenwick::default(),
            fingerprint_sizes: FingerprintMap::new(),
            shared: FingerprintMap::new(),
            applied: None,
        }
    }

    pub fn estimated_size(&self) -> u32 {
        self.estimated_size
    }

    /// Changes the estimate and re-applies it to every unmeasured position.
    pub fn set_estimated_size(&mut self, estimated_size: u32) {
        if self.estimated_size == estimated_size {
            return;
        }
        self.estimated_size = estimated_size;
        for (size, &measured) in self.sizes.iter_mut().zip(&self.measured) {
            if !measured {
                *size = estimated_size;
            }
        }
        self.sums = Fenwick::from_sizes(&self.sizes);
    }

    /// Lays out a new snapshot, carrying measured sizes forward by fingerprint.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> LayoutUpdate {
        if self.applied == Some(snapshot.aggregate()) && self.fingerprints.len() == snapshot.len()
        {
            vtrace!(len = snapshot.len(), "apply_snapshot: unchanged");
            return LayoutUpdate::Kept;
        }

        let previous = mem::replace(&mut self.fingerprints, snapshot.sequence().to_vec());
        self.retain_live(&previous);
        self.shared = shared_positions(&self.fingerprints);
        let carried = self.resize_from_cache();
        self.applied = Some(snapshot.aggregate());

        let estimated = self.fingerprints.len() - carried;
        vdebug!(
            len = self.fingerprints.len(),
            carried,
            estimated,
            "apply_snapshot"
        );
        LayoutUpdate::Rebuilt { carried, estimated }
    }

    /// Drops cached sizes whose fingerprint is in neither the applied nor the previous snapshot.
    fn retain_live(&mut self, previous: &[Fingerprint]) {
        if self.fingerprint_sizes.is_empty() {
            return;
        }
        let live: FingerprintSet = self.fingerprints.iter().chain(previous).copied().collect();
        self.fingerprint_sizes
            .retain(|fingerprint, _| live.contains(fingerprint));
    }

    fn resize_from_cache(&mut self) -> usize {
        let n = self.fingerprints.len();
        self.sizes.clear();
        self.measured.clear();
        self.sizes.reserve_exact(n);
        self.measured.reserve_exact(n);

        let mut carried = 0usize;
        for fingerprint in &self.fingerprints {
            if let Some(&size) = self.fingerprint_sizes.get(fingerprint) {
                self.sizes.push(size);
                self.measured.push(true);
                carried += 1;
            } else {
                self.sizes.push(self.estimated_size);
                self.measured.push(false);
            }
        }
        self.sums = Fenwick::from_sizes(&self.sizes);
        carried
    }

    /// Records a measured size for `position` (and its fingerprint).
    ///
    /// Every position sharing that fingerprint takes the new size too. Returns the signed change
    /// applied to the total extent. Out-of-range positions are ignored.
    pub fn measure(&mut self, position: usize, size: u32) -> i64 {
        let Some(&fingerprint) = self.fingerprints.get(position) else {
            vtrace!(position, len = self.fingerprints.len(), "measure: out of range");
            return 0;
        };
        self.fingerprint_sizes.insert(fingerprint, size);

        match self.shared.get(&fingerprint) {
            Some(positions) => positions
                .iter()
                .map(|&p| set_size(&mut self.sizes, &mut self.measured, &mut self.sums, p, size))
                .sum(),
            None => set_size(
                &mut self.sizes,
                &mut self.measured,
                &mut self.sums,
                position,
                size,
            ),
        }
    }

    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        measurements
            .into_iter()
            .map(|(position, size)| self.measure(position, size))
            .sum()
    }

    /// Exchanges the sizes (and fingerprints) of two positions, for hosts that preview a
    /// neighbour swap before the data moves. Returns `false` if either position is out of range or they are
    /// equal.
    pub fn swap_sizes(&mut self, from: usize, to: usize) -> bool {
        let n = self.sizes.len();
        if from == to || from >= n || to >= n {
            return false;
        }
        let (a, b) = (self.sizes[from], self.sizes[to]);
        self.sizes.swap(from, to);
        self.measured.swap(from, to);
        self.fingerprints.swap(from, to);
        if !self.shared.is_empty() {
            self.shared = shared_positions(&self.fingerprints);
        }
        let delta = b as i64 - a as i64;
        self.sums.add(from, delta);
        self.sums.add(to, -delta);
        vtrace!(from, to, "swap_sizes");
        true
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn size_of(&self, position: usize) -> Option<u32> {
        self.sizes.get(position).copied()
    }

    pub fn is_measured(&self, position: usize) -> bool {
        self.measured.get(position).copied().unwrap_or(false)
    }

    pub fn fingerprint_of(&self, position: usize) -> Option<Fingerprint> {
        self.fingerprints.get(position).copied()
    }

    pub fn offset_of(&self, position: usize) -> Option<u64> {
        (position < self.sums.len()).then(|| self.sums.prefix_sum(position))
    }

    pub fn total_extent(&self) -> u64 {
        self.sums.total()
    }

    pub fn item(&self, position: usize) -> Option<MeasuredItem> {
        Some(MeasuredItem {
            position,
            fingerprint: self.fingerprint_of(position)?,
            start: self.offset_of(position)?,
            size: self.size_of(position)?,
            measured: self.is_measured(position),
        })
    }

    /// The position containing `offset`, clamped to the last position.
    pub fn position_at_offset(&self, offset: u64) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        Some(self.sums.lower_bound(offset).min(last))
    }

    /// Positions intersecting `[offset, offset + viewport)`.
    pub fn visible_range(&self, offset: u64, viewport: u32) -> Range<usize> {
        let n = self.len();
        if n == 0 || viewport == 0 {
            return 0..0;
        }
        if offset >= self.total_extent() {
            return n..n;
        }
        let last_offset = offset.saturating_add(viewport as u64 - 1);
        let (Some(start), Some(end)) = (
            self.position_at_offset(offset),
            self.position_at_offset(last_offset),
        ) else {
            return 0..0;
        };
        start..end + 1
    }

    pub fn for_each_visible(&self, offset: u64, viewport: u32, mut f: impl FnMut(MeasuredItem)) {
        for position in self.visible_range(offset, viewport) {
            if let Some(item) = self.item(position) {
                f(item);
            }
        }
    }

    /// Forgets every measurement; all positions fall back to the estimate.
    pub fn reset_measurements(&mut self) {
        self.fingerprint_sizes.clear();
        self.resize_from_cache();
    }

    /// Returns the number of cached measured sizes (fingerprint → size).
    pub fn measurement_cache_len(&self) -> usize {
        self.fingerprint_sizes.len()
    }

    /// Exports the cached measured sizes (useful for persistence).
    pub fn export_measurement_cache(&self) -> Vec<(Fingerprint, u32)> {
        self.fingerprint_sizes.iter().map(|(&k, &v)| (k, v)).collect()
    }

    /// Replaces the cached measured sizes and re-lays out the current positions.
    ///
    /// Only value-keyed fingerprints survive a process restart; address-based item identities
    /// will simply miss.
    /// Imported entries are subject to the same pruning as measured ones, so import after
    /// applying the snapshot they belong to.
    pub fn import_measurement_cache(&mut self, entries: impl IntoIterator<Item = (Fingerprint, u32)>) {
        self.fingerprint_sizes.clear();
        self.fingerprint_sizes.extend(entries);
        vdebug!(entries = self.fingerprint_sizes.len(), "import_measurement_cache");
        self.resize_from_cache();
    }
}

fn set_size(
    sizes: &mut [u32],
    measured: &mut [bool],
    sums: &mut Fenwick,
    position: usize,
    size: u32,
) -> i64 {
    measured[position] = true;
    let cur = sizes[position];
    if cur == size {
        return 0;
    }
    sizes[position] = size;
    let delta = size as i64 - cur as i64;
    sums.add(position, delta);
    delta
}

fn shared_positions(fingerprints: &[Fingerprint]) -> FingerprintMap<Vec<usize>> {
    let mut first: FingerprintMap<usize> = FingerprintMap::new();
    let mut shared: FingerprintMap<Vec<usize>> = FingerprintMap::new();
    for (position, &fingerprint) in fingerprints.iter().enumerate() {
        match first.get(&fingerprint) {
            Some(&at) => shared
                .entry(fingerprint)
                .or_insert_with(|| alloc::vec![at])
                .push(position),
            None => {
                first.insert(fingerprint, position);
            }
        }
    }
    shared
}
