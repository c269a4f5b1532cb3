//! In-memory record store.
//!
//! Backs the server binary and the test suite. A `BTreeMap` keeps scan
//! order deterministic; the `RwLock` lets query reads proceed concurrently
//! with each other while writes serialize.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::errors::DomainError;
use crate::kernel::traits::BaseRecords;

pub struct MemoryRecords<T> {
    records: RwLock<BTreeMap<Uuid, T>>,
}

impl<T> MemoryRecords<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T> Default for MemoryRecords<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> BaseRecords<T> for MemoryRecords<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn put(&self, id: Uuid, record: T) -> Result<(), DomainError> {
        self.records.write().await.insert(id, record);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn scan(&self) -> Result<Vec<T>, DomainError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_roundtrip() {
        let store: MemoryRecords<String> = MemoryRecords::new();
        let id = Uuid::now_v7();

        store.put(id, "hello".to_string()).await.unwrap();
        assert_eq!(store.get(id).await.unwrap(), Some("hello".to_string()));

        assert!(store.delete(id).await.unwrap());
        assert_eq!(store.get(id).await.unwrap(), None);
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_scan_returns_every_record() {
        let store: MemoryRecords<u32> = MemoryRecords::new();
        for n in 0..5 {
            store.put(Uuid::now_v7(), n).await.unwrap();
        }
        let mut all = store.scan().await.unwrap();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }
}
