use alloc::vec::Vec;
use core::mem;

use crate::key::FingerprintMap;
use crate::{PositionIndex, SectionAdapter, Snapshot};

/// Outcome of the aggregate gate after a refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    /// Aggregate and length match the previous snapshot; downstream caches can be kept.
    Unchanged,
    Changed,
}

/// How a current position relates to the previous snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reuse {
    /// Same fingerprint as the previous snapshot's `previous` position.
    Carried { previous: usize },
    /// No unclaimed previous position shares this fingerprint.
    New,
}

/// Current and previous content snapshots of a [`PositionIndex`].
///
/// Each [`ContentFingerprintCache::refresh`] makes the current snapshot the previous one and
/// computes a new one, so consumers can diff the two by fingerprint value rather than by
/// position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentFingerprintCache {
    current: Snapshot,
    previous: Snapshot,
}

impl ContentFingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh<A>(&mut self, index: &PositionIndex, adapter: Option<&A>) -> Change
    where
        A: SectionAdapter + ?Sized,
    {
        let next = Snapshot::compute(index, adapter);
        self.previous = mem::replace(&mut self.current, next);
        let change = if self.current.same_content(&self.previous) {
            Change::Unchanged
        } else {
            Change::Changed
        };
        vdebug!(
            len = self.current.len(),
            aggregate = self.current.aggregate(),
            ?change,
            "ContentFingerprintCache::refresh"
        );
        change
    }

    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    pub fn is_unchanged(&self) -> bool {
        self.current.same_content(&self.previous)
    }

    /// Forgets both snapshots.
    pub fn clear(&mut self) {
        self.current = Snapshot::default();
        self.previous = Snapshot::default();
    }

    /// Classifies every current position against the previous snapshot.
    ///
    /// Matching is by fingerprint value. When several previous positions share a fingerprint
    /// they are claimed in ascending order, each at most once.
    pub fn classify(&self) -> Vec<Reuse> {
        classify(&self.previous, &self.current)
    }
}

/// Classifies each position of `current` against `previous`; see
/// [`ContentFingerprintCache::classify`].
pub fn classify(previous: &Snapshot, current: &Snapshot) -> Vec<Reuse> {
    if current.same_content(previous) {
        return (0..current.len())
            .map(|previous| Reuse::Carried { previous })
            .collect();
    }

    // Positions stored descending so `pop` hands them out ascending.
    let mut claims: FingerprintMap<Vec<usize>> = FingerprintMap::new();
    for (position, &fingerprint) in previous.sequence().iter().enumerate().rev() {
        claims.entry(fingerprint).or_default().push(position);
    }

    let out: Vec<Reuse> = current
        .sequence()
        .iter()
        .map(|fingerprint| match claims.get_mut(fingerprint).and_then(Vec::pop) {
            Some(previous) => Reuse::Carried { previous },
            None => Reuse::New,
        })
        .collect();
    vtrace!(
        len = out.len(),
        new = out.iter().filter(|r| **r == Reuse::New).count(),
        "classify"
    );
    out
}
