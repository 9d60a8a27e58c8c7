//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! All containers default to [`FixedHashState`], so hashing results only
//! depend on the input. This keeps set membership and lookup tables
//! reproducible across runs.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

pub mod hash_table;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher, hash_one};

pub use hash_table::HashTable;

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
