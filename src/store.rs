//! In-memory message store
//!
//! Append-only mapping from id to message text. Ids come from a counter that
//! lives under the same lock as the map, so allocation and insertion are one
//! step and no caller can observe an id without its message.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Message identifier, assigned by the store starting at 1
pub type MessageId = u64;

struct Inner {
    next_id: MessageId,
    messages: BTreeMap<MessageId, String>,
}

/// Concurrency-safe message store
///
/// Reads share the lock; each `allocate_and_insert` holds it exclusively for
/// a single counter bump and map insert.
pub struct MessageStore {
    inner: RwLock<Inner>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                messages: BTreeMap::new(),
            }),
        }
    }

    /// Reserve the next id and store `text` under it.
    ///
    /// The caller has already rejected empty text.
    pub fn allocate_and_insert(&self, text: String) -> MessageId {
        let mut inner = self.write();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.messages.insert(id, text);
        id
    }

    pub fn get(&self, id: MessageId) -> Option<String> {
        self.read().messages.get(&id).cloned()
    }

    /// Snapshot of every stored id, ascending
    pub fn list_ids(&self) -> Vec<MessageId> {
        self.read().messages.keys().copied().collect()
    }

    // A panicking reader or writer never leaves the map half-updated, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = MessageStore::new();
        assert_eq!(store.allocate_and_insert("hello".to_string()), 1);
        assert_eq!(store.allocate_and_insert("world".to_string()), 2);
        assert_eq!(store.get(1).as_deref(), Some("hello"));
        assert_eq!(store.get(2).as_deref(), Some("world"));
    }

    #[test]
    fn test_get_missing() {
        let store = MessageStore::new();
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(42), None);
    }

    #[test]
    fn test_list_ids_empty_and_sorted() {
        let store = MessageStore::new();
        assert!(store.list_ids().is_empty());

        for i in 0..20 {
            store.allocate_and_insert(format!("msg {i}"));
        }
        let ids = store.list_ids();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrent_allocation_is_unique_and_gapless() {
        let store = Arc::new(MessageStore::new());
        let threads = 8;
        let per_thread = 250;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut last = 0;
                    let mut ids = Vec::with_capacity(per_thread);
                    for i in 0..per_thread {
                        let id = store.allocate_and_insert(format!("{t}-{i}"));
                        // Each caller sees its own ids strictly increasing
                        assert!(id > last);
                        last = id;
                        ids.push(id);
                    }
                    ids
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }

        let total = (threads * per_thread) as u64;
        assert_eq!(seen.len() as u64, total);
        assert_eq!(store.list_ids(), (1..=total).collect::<Vec<_>>());
    }

    #[test]
    fn test_listing_includes_prior_inserts_during_writes() {
        let store = Arc::new(MessageStore::new());
        let before: Vec<_> = (0..10)
            .map(|i| store.allocate_and_insert(format!("pre {i}")))
            .collect();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..500 {
                    store.allocate_and_insert(format!("during {i}"));
                }
            })
        };

        for _ in 0..50 {
            let ids = store.list_ids();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            assert!(before.iter().all(|id| ids.contains(id)));
            assert!(ids.iter().all(|id| store.get(*id).is_some()));
        }

        writer.join().unwrap();
        assert_eq!(store.list_ids().len(), 510);
    }
}
