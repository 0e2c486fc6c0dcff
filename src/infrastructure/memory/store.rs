use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Shared map of records keyed by id. Clones share the same data.
pub struct MemoryStore<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the previous value when `id` was already present.
    pub async fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().await.insert(id, value)
    }

    /// Inserts only when no stored record matches `conflicts` and `id` is free.
    /// The check and the insert share one write lock.
    pub async fn insert_unique(&self, id: Uuid, value: T, conflicts: impl Fn(&T) -> bool) -> bool {
        let mut data = self.data.write().await;
        if data.contains_key(&id) || data.values().any(|v| conflicts(v)) {
            return false;
        }
        data.insert(id, value);
        true
    }

    pub async fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().await.get(id).cloned()
    }

    pub async fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().await.values().find(|v| predicate(v)).cloned()
    }

    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.data
            .read()
            .await
            .values()
            .filter(|v| predicate(v))
            .cloned()
            .collect()
    }

    /// Overwrites an existing record. Returns `false` when `id` is unknown.
    pub async fn replace(&self, id: &Uuid, value: T) -> bool {
        match self.data.write().await.get_mut(id) {
            Some(entry) => {
                *entry = value;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().await.remove(id)
    }

    /// Read, validate and mutate a record under one write lock.
    ///
    /// Returns `None` if the record does not exist.
    pub async fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().await.get_mut(id).map(f)
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replace_requires_existing_record() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(!store.replace(&id, 1).await);
        store.insert(id, 1).await;
        assert!(store.replace(&id, 2).await);
        assert_eq!(store.get(&id).await, Some(2));
    }

    #[tokio::test]
    async fn try_update_keeps_value_on_rejection() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.insert(id, 5_i64).await;

        let rejected = store
            .try_update(&id, |v| if *v >= 10 { Ok(()) } else { Err(*v) })
            .await;
        assert_eq!(rejected, Some(Err(5)));
        assert_eq!(store.get(&id).await, Some(5));

        assert_eq!(
            store.try_update(&Uuid::new_v4(), |_| Ok::<_, ()>(())).await,
            None
        );
    }

    #[tokio::test]
    async fn insert_unique_refuses_conflicts() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(store.insert_unique(id, 7, |v| *v == 7).await);
        assert!(!store.insert_unique(Uuid::new_v4(), 7, |v| *v == 7).await);
        assert!(!store.insert_unique(id, 8, |v| *v == 8).await);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&id).await, Some(7));
    }

    #[tokio::test]
    async fn clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.insert(Uuid::new_v4(), "x").await;

        assert_eq!(store.len().await, 1);
    }
}
