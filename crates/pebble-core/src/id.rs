//! Stable entity identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A stable identifier for an entity, standing in for the physics body id.
///
/// Rapier body handles are generational and die with the body; this id is
/// assigned when an entity is first constructed and survives the body being
/// destroyed and rebuilt by an editor reset. Tombstones and snapshots key
/// off it.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Allocate the next unique id
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Build an id from a raw value (snapshots, tests)
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Bump the counter past ids read from a file so future allocations
    /// never collide with them
    pub fn ensure_counter_above(value: u64) {
        let mut current = NEXT_ID.load(Ordering::Relaxed);
        while current <= value {
            match NEXT_ID.compare_exchange_weak(
                current,
                value + 1,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current = c,
            }
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert!(id2.0 > id1.0);
    }

    #[test]
    fn from_raw_round_trips() {
        let id = EntityId::from_raw(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn ensure_counter_above_skips_loaded_ids() {
        EntityId::ensure_counter_above(100_000);
        let id = EntityId::new();
        assert!(id.0 > 100_000);
    }
}
