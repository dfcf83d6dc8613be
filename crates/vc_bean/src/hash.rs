use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

/// Fixed seed, so iteration order of the dynamic containers is stable
/// between runs.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x9e37_79b9_7f4a_7c15);

/// Deterministic [`BuildHasher`] backed by `foldhash`.
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A `hashbrown` map using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A map keyed by [`TypeId`].
///
/// `TypeId` is already a hash, so the hasher only forwards it.
pub type TypeIdMap<V> = hashbrown::HashMap<TypeId, V, NoOpHashState>;

#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher(0)
    }
}

#[derive(Debug)]
pub struct NoOpHasher(u64);

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        // Only reached for keys other than `TypeId`.
        self.0 = bytes
            .iter()
            .fold(self.0, |hash, b| hash.rotate_left(8).wrapping_add(u64::from(*b)));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.0 = i as u64 ^ (i >> 64) as u64;
    }
}

#[inline]
pub(crate) fn new_map<K, V>() -> HashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedHashState)
}

#[inline]
pub(crate) fn new_type_id_map<V>() -> TypeIdMap<V> {
    hashbrown::HashMap::with_hasher(NoOpHashState)
}
