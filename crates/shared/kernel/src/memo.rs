//! Compute-once cells for derived views.

use std::fmt;
use std::sync::OnceLock;

/// A value computed at most once, on first access, and cached forever after.
///
/// Concurrent first readers race on an atomic initialization: exactly one closure runs and every
/// caller observes the same value. There is no invalidation.
pub struct Memoized<T> {
    cell: OnceLock<T>,
}

impl<T> Memoized<T> {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Returns the cached value, computing it with `init` if this is the first access.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(init)
    }

    /// Returns the cached value without computing it.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Memoized").field(value).finish(),
            None => f.write_str("Memoized(<pending>)"),
        }
    }
}
