//! Entity store - immutable records behind stable, cheap-to-clone handles
//!
//! Every record in the simulation (entities, identities, NPCs, memories,
//! worlds) is allocated once and never written again. "Updating" a record
//! means allocating a new one; handles to the old record keep observing the
//! old value.
//!
//! Handles are `Arc`-backed and carry a process-unique [`RefId`] taken from a
//! lock-free counter, so allocation is safe from rayon workers running
//! per-NPC updates in parallel.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_REF_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefId(pub u64);

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref#{}", self.0)
    }
}

/// Shared handle to an immutable record
///
/// Equality and hashing are by allocation, not by value: two handles are
/// equal iff one was cloned from the other.
pub struct Ref<T> {
    id: RefId,
    value: Arc<T>,
}

impl<T> Ref<T> {
    /// Allocate a new record
    pub fn new(value: T) -> Self {
        Self {
            id: RefId(NEXT_REF_ID.fetch_add(1, Ordering::Relaxed)),
            value: Arc::new(value),
        }
    }

    /// Allocation id of `this`
    ///
    /// Associated function; `handle.id()` resolves to the record's own id.
    pub fn ref_id(this: &Self) -> RefId {
        this.id
    }

    /// True if both handles point at the same allocation
    pub fn same(a: &Self, b: &Self) -> bool {
        a.id == b.id
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> Deref for Ref<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ref<T> {}

impl<T> Hash for Ref<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.id, self.value)
    }
}

/// Total number of records allocated by this process so far
pub fn allocations() -> u64 {
    NEXT_REF_ID.load(Ordering::Relaxed) - 1
}
