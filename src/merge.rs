mod aligned_change;
mod apply;
mod combiner;
mod merge_cache;

pub use aligned_change::AlignedChange;
pub use apply::{apply, apply_keeping};
pub use combiner::combine;
pub use merge_cache::MergeCache;

use crate::Side;

/// The three sequences of a three-way comparison: two descendants and their
/// common base.
#[derive(Debug)]
pub struct Versions<'a, T> {
    pub local: &'a [T],
    pub base: &'a [T],
    pub remote: &'a [T],
}

impl<'a, T> Versions<'a, T> {
    #[must_use]
    pub const fn new(local: &'a [T], base: &'a [T], remote: &'a [T]) -> Self {
        Self {
            local,
            base,
            remote,
        }
    }

    #[must_use]
    pub const fn side(&self, side: Side) -> &'a [T] {
        match side {
            Side::Local => self.local,
            Side::Remote => self.remote,
        }
    }
}

impl<T> Clone for Versions<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Versions<'_, T> {}
