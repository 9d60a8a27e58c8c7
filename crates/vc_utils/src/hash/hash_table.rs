//! Re-export [`HashTable`] from [hashbrown] crate.
//!
//! The table stores no hasher, callers pass the hash of every probe.
//! Combine it with [`hash_one`](super::hash_one) to keep the results stable.

pub use hashbrown::HashTable;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::HashTable;
    use crate::hash::hash_one;

    #[test]
    fn index_table_over_slice() {
        let items = ["b", "a", "c"];
        let mut table: HashTable<usize> = HashTable::new();
        for (i, item) in items.iter().enumerate() {
            table.insert_unique(hash_one(item), i, |&j| hash_one(&items[j]));
        }

        assert_eq!(table.find(hash_one(&"a"), |&j| items[j] == "a"), Some(&1));
        assert_eq!(table.find(hash_one(&"d"), |&j| items[j] == "d"), None);
    }
}
