//! Provide `FixedHasher` based on the `foldhash` crate.
//!
//! A fixed seed is used, so a value always produces the same hash.

use core::hash::{BuildHasher, Hash};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// A hasher whose results only depend on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use vc_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// let mut b = FixedHashState.build_hasher();
/// "employee".hash(&mut a);
/// "employee".hash(&mut b);
///
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Hashes a single value with [`FixedHashState`].
///
/// # Examples
///
/// ```
/// use vc_utils::hash::hash_one;
///
/// assert_eq!(hash_one(&42_i64), hash_one(&42_i64));
/// assert_ne!(hash_one("a"), hash_one("b"));
/// ```
#[inline]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    FixedHashState.hash_one(value)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FixedHashState, hash_one};
    use crate::hash::HashSet;

    #[test]
    fn stable_results() {
        assert_eq!(hash_one("Joost Nijhuis"), hash_one("Joost Nijhuis"));
        assert_eq!(hash_one(&(1_usize, "Book")), hash_one(&(1_usize, "Book")));
    }

    #[test]
    fn default_state_in_containers() {
        let mut set: HashSet<&str> = HashSet::with_hasher(FixedHashState);
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);
    }
}
