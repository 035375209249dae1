//! Type identities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a type.
///
/// Every type gets a fresh identifier when it is created, so two types built
/// from identical descriptors are still distinct. Values that remember the
/// type that produced them (records, checked functions) store this id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

impl TypeId {
    /// Allocates a new, never-before-seen identifier.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw index of this identifier.
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
