//! Memoized derived values with explicit invalidation.

use std::cell::OnceCell;

/// A lazily computed value that is either clean (cached) or dirty (absent).
///
/// Reads go through `&self`; only [`Memo::invalidate`] needs `&mut self`, so
/// every mutation of the owner is forced to pass through it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub(crate) fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached value, computing it first if dirty.
    pub(crate) fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(compute)
    }

    pub(crate) fn invalidate(&mut self) {
        self.cell.take();
    }

    #[cfg(test)]
    pub(crate) fn is_dirty(&self) -> bool {
        self.cell.get().is_none()
    }
}
