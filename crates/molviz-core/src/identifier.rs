//! Opaque handles for atoms and bonds.
//!
//! A molecule graph allocates ids from its own [`IdAllocator`]. Ids are never
//! reused within the lifetime of that graph, including across a full clear,
//! so a stale handle can never silently resolve to a newer atom.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Raw numeric value, for logging and diagnostics.
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies an atom within one molecule graph.
    AtomId,
    "a"
);

define_id!(
    /// Identifies a bond within one molecule graph.
    BondId,
    "b"
);

/// Monotonic source of [`AtomId`] and [`BondId`] values.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_atom: u64,
    next_bond: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_atom(&mut self) -> AtomId {
        self.next_atom += 1;
        AtomId(self.next_atom)
    }

    pub fn next_bond(&mut self) -> BondId {
        self.next_bond += 1;
        BondId(self.next_bond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut allocator = IdAllocator::new();
        let first = allocator.next_atom();
        let second = allocator.next_atom();
        assert!(second > first);
        assert_ne!(first, second);
    }

    #[test]
    fn test_atom_and_bond_sequences_are_independent() {
        let mut allocator = IdAllocator::new();
        allocator.next_atom();
        allocator.next_atom();
        assert_eq!(allocator.next_bond().raw(), 1);
    }

    #[test]
    fn test_id_display() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.next_atom().to_string(), "a1");
        assert_eq!(allocator.next_bond().to_string(), "b1");
    }
}
