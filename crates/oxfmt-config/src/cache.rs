//! Single-flight memoization for async computations
//!
//! A [`Memo`] maps keys to the *shared task* computing their value. On a miss
//! the task is inserted before it starts running, so every overlapping
//! request for the same key awaits the same computation. A task that fails
//! removes its own entry before any waiter sees the error, so failures are
//! never cached.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{trace, warn};

use crate::error::Result;

type SharedTask<V> = Shared<BoxFuture<'static, Result<V>>>;

struct Slot<V> {
    /// Distinguishes this insertion from a later retry under the same key
    id: u64,
    task: SharedTask<V>,
}

/// Memoization table with at most one outstanding computation per key
pub struct Memo<K, V> {
    entries: Arc<DashMap<K, Slot<V>>>,
    next_id: AtomicU64,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Return the memoized outcome for `key`, computing it with `factory` on a miss
    ///
    /// A hit returns the stored task whether it is still running or already
    /// settled. `factory` is only invoked on a miss.
    pub async fn get_or_try_insert_with<F, Fut>(&self, key: K, factory: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let task = match self.entries.entry(key.clone()) {
            Entry::Occupied(slot) => {
                trace!("Memo hit for {:?}", key);
                slot.get().task.clone()
            }
            Entry::Vacant(vacant) => {
                trace!("Memo miss for {:?}", key);
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let task = evict_on_failure(Arc::downgrade(&self.entries), key, id, factory());
                vacant.insert(Slot {
                    id,
                    task: task.clone(),
                });
                task
            }
        };

        // The map guard is released above; never await while holding it.
        task.await
    }

    /// Whether an entry (pending or settled) exists for `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap `work` so that a failed outcome removes its own slot from `entries`
fn evict_on_failure<K, V, Fut>(
    entries: Weak<DashMap<K, Slot<V>>>,
    key: K,
    id: u64,
    work: Fut,
) -> SharedTask<V>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<V>> + Send + 'static,
{
    async move {
        let outcome = work.await;
        if let Err(err) = &outcome {
            match std::error::Error::source(err) {
                Some(cause) => warn!("Evicting failed entry for {:?}: {}: {}", key, err, cause),
                None => warn!("Evicting failed entry for {:?}: {}", key, err),
            }
            if let Some(entries) = entries.upgrade() {
                entries.remove_if(&key, |_, slot| slot.id == id);
            }
        }
        outcome
    }
    .boxed()
    .shared()
}
