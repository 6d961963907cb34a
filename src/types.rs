use core::sync::atomic::{AtomicU64, Ordering};
use rustc_hash::FxBuildHasher;
use std::collections::HashMap as _HashMap;

/// `HashMap` type with fast hasher.
pub type HashMap<K, V> = _HashMap<K, V, FxBuildHasher>;

/// Identity of a blocked [`Select`](crate::select::Select) registered on a
/// channel.
///
/// Only uniqueness matters, so the counter lives outside the loom model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct WatcherId(u64);

impl WatcherId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}
