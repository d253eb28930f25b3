//! Document-collection abstraction over the backing store.
//!
//! The persistent store is treated as a generic document store: one
//! collection per document type, point reads/writes by id, predicate scans
//! for everything else. Per-document atomicity is all services rely on;
//! check-then-insert sequences are deliberately not transactional.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

/// Handle to one document collection.
pub trait Collection<T>: Send + Sync {
    fn get(&self, id: Uuid) -> Option<T>;

    fn insert(&self, id: Uuid, doc: T);

    /// Replace the document at `id`. Returns false when nothing matched.
    fn replace(&self, id: Uuid, doc: T) -> bool;

    /// Returns false when nothing was deleted.
    fn remove(&self, id: Uuid) -> bool;

    fn all(&self) -> Vec<T>;

    fn find(&self, pred: &dyn Fn(&T) -> bool) -> Vec<T>;

    fn find_one(&self, pred: &dyn Fn(&T) -> bool) -> Option<T>;
}

impl<T, S> Collection<T> for Arc<S>
where
    S: Collection<T> + ?Sized,
{
    fn get(&self, id: Uuid) -> Option<T> {
        (**self).get(id)
    }

    fn insert(&self, id: Uuid, doc: T) {
        (**self).insert(id, doc)
    }

    fn replace(&self, id: Uuid, doc: T) -> bool {
        (**self).replace(id, doc)
    }

    fn remove(&self, id: Uuid) -> bool {
        (**self).remove(id)
    }

    fn all(&self) -> Vec<T> {
        (**self).all()
    }

    fn find(&self, pred: &dyn Fn(&T) -> bool) -> Vec<T> {
        (**self).find(pred)
    }

    fn find_one(&self, pred: &dyn Fn(&T) -> bool) -> Option<T> {
        (**self).find_one(pred)
    }
}

/// In-memory collection for dev and tests.
///
/// The `RwLock` is the only synchronization point, matching the atomicity
/// the production store offers per document.
#[derive(Debug)]
pub struct InMemoryCollection<T> {
    inner: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> for InMemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self, id: Uuid) -> Option<T> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn insert(&self, id: Uuid, doc: T) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(id, doc);
        }
    }

    fn replace(&self, id: Uuid, doc: T) -> bool {
        match self.inner.write() {
            Ok(mut map) => match map.entry(id) {
                std::collections::hash_map::Entry::Occupied(mut e) => {
                    e.insert(doc);
                    true
                }
                std::collections::hash_map::Entry::Vacant(_) => false,
            },
            Err(_) => false,
        }
    }

    fn remove(&self, id: Uuid) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(&id).is_some(),
            Err(_) => false,
        }
    }

    fn all(&self) -> Vec<T> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn find(&self, pred: &dyn Fn(&T) -> bool) -> Vec<T> {
        match self.inner.read() {
            Ok(map) => map.values().filter(|v| pred(v)).cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn find_one(&self, pred: &dyn Fn(&T) -> bool) -> Option<T> {
        let map = self.inner.read().ok()?;
        map.values().find(|v| pred(v)).cloned()
    }
}
