#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::Fingerprint;

/// Fingerprint-keyed map: hashed with `std`, ordered without it.
#[cfg(feature = "std")]
pub type FingerprintMap<V> = HashMap<Fingerprint, V>;
#[cfg(not(feature = "std"))]
pub type FingerprintMap<V> = BTreeMap<Fingerprint, V>;

#[cfg(feature = "std")]
pub type FingerprintSet = HashSet<Fingerprint>;
#[cfg(not(feature = "std"))]
pub type FingerprintSet = BTreeSet<Fingerprint>;
