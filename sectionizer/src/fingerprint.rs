use alloc::vec::Vec;

use crate::{Identity, PositionIndex, PositionKind, SectionAdapter};

/// A per-position content fingerprint.
pub type Fingerprint = u64;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over a string. Deterministic across processes and platforms.
pub const fn hash_str(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// 64-bit finalizer (splitmix64). Spreads low-entropy inputs such as pointer addresses.
pub const fn mix(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Order-sensitive combination: `combine(a, b) != combine(b, a)` in general.
pub const fn combine(seed: u64, value: u64) -> u64 {
    let v = value
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2);
    mix(seed ^ v)
}

pub const GLOBAL_HEADER: Fingerprint = hash_str("GlobalHeader");
pub const GLOBAL_FOOTER: Fingerprint = hash_str("GlobalFooter");
const SECTION_HEADER_TAG: u64 = hash_str("Header");
const SECTION_FOOTER_TAG: u64 = hash_str("Footer");
const MISSING_ITEM: Fingerprint = hash_str("MissingItem");
const AGGREGATE_SEED: u64 = hash_str("Aggregate");

pub fn section_header_fingerprint(section: usize) -> Fingerprint {
    combine(section as u64, SECTION_HEADER_TAG)
}

pub fn section_footer_fingerprint(section: usize) -> Fingerprint {
    combine(section as u64, SECTION_FOOTER_TAG)
}

pub fn item_fingerprint<I: Identity + ?Sized>(item: &I) -> Fingerprint {
    mix(item.identity())
}

/// Order-sensitive reduction over a fingerprint sequence. The empty sequence reduces to `0`.
pub fn aggregate(sequence: &[Fingerprint]) -> Fingerprint {
    if sequence.is_empty() {
        return 0;
    }
    let folded = sequence
        .iter()
        .fold(AGGREGATE_SEED, |acc, &f| combine(acc, f));
    combine(folded, sequence.len() as u64)
}

/// The ordered fingerprints of every flat position plus their aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    sequence: Vec<Fingerprint>,
    aggregate: Fingerprint,
}

impl Snapshot {
    /// Walks `index` in flat order and fingerprints each position.
    ///
    /// A missing adapter yields the empty snapshot (aggregate `0`).
    pub fn compute<A>(index: &PositionIndex, adapter: Option<&A>) -> Self
    where
        A: SectionAdapter + ?Sized,
    {
        let Some(adapter) = adapter else {
            return Self::default();
        };

        let mut sequence = Vec::with_capacity(index.total_count());
        for info in index.infos() {
            let fingerprint = match (info.kind, info.section, info.item) {
                (PositionKind::Header, ..) => GLOBAL_HEADER,
                (PositionKind::Footer, ..) => GLOBAL_FOOTER,
                (PositionKind::SectionHeader, Some(section), _) => {
                    section_header_fingerprint(section)
                }
                (PositionKind::SectionFooter, Some(section), _) => {
                    section_footer_fingerprint(section)
                }
                (PositionKind::Item, Some(section), Some(item)) => adapter
                    .item(section, item)
                    .map_or(MISSING_ITEM, |it| item_fingerprint(&it)),
                _ => {
                    debug_assert!(false, "malformed position info: {info:?}");
                    MISSING_ITEM
                }
            };
            sequence.push(fingerprint);
        }

        Self::from_sequence(sequence)
    }

    pub fn from_sequence(sequence: Vec<Fingerprint>) -> Self {
        let aggregate = aggregate(&sequence);
        Self {
            sequence,
            aggregate,
        }
    }

    pub fn sequence(&self) -> &[Fingerprint] {
        &self.sequence
    }

    pub fn aggregate(&self) -> Fingerprint {
        self.aggregate
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Fingerprint> {
        self.sequence.get(position).copied()
    }

    /// The cheap "nothing changed" gate: equal aggregate and equal length.
    pub fn same_content(&self, other: &Self) -> bool {
        self.aggregate == other.aggregate && self.sequence.len() == other.sequence.len()
    }

    pub fn into_sequence(self) -> Vec<Fingerprint> {
        self.sequence
    }
}
