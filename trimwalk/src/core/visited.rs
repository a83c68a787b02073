//! Per-call identity tracking for shared cells.

use std::collections::HashSet;
use std::fmt;

/// Address of a shared allocation, stable while the graph is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }

    pub fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Identities already claimed during one walk.
///
/// Created empty for every top-level call and dropped with it.
#[derive(Debug, Default)]
pub struct Visited {
    seen: HashSet<Identity>,
}

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time `identity` is offered, false on every later offer.
    pub fn mark_if_new(&mut self, identity: Identity) -> bool {
        self.seen.insert(identity)
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.seen.contains(&identity)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
