//! In-memory storage implementations for development and testing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::domain::history::HistoryRecord;
use crate::support::errors::{DomainError, DomainResult, InfraError};

use super::traits::{Document, DocumentStore, HistoryCache};

/// In-memory document store.
///
/// The `offline` and `fail_writes` switches simulate an unreachable or
/// write-rejecting remote for degraded-path tests.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: DashMap<String, DashMap<String, Document>>,
    offline: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store being unreachable (every call fails).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Simulate rejected writes while reads keep working.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> DomainResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("store is offline".into()));
        }
        Ok(())
    }

    fn check_writable(&self) -> DomainResult<()> {
        self.check_reachable()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreWriteFailed("write rejected".into()));
        }
        Ok(())
    }

    fn not_found(collection: &str, id: &str) -> DomainError {
        DomainError::NotFound {
            entity: match collection {
                "history" => "history record",
                "users" => "user profile",
                _ => "document",
            },
            field: "id",
            value: id.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>> {
        self.check_reachable()?;
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).map(|d| d.clone())))
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> DomainResult<()> {
        self.check_writable()?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> DomainResult<()> {
        self.check_writable()?;
        let docs = self
            .collections
            .get(collection)
            .ok_or_else(|| Self::not_found(collection, id))?;
        let mut doc = docs
            .get_mut(id)
            .ok_or_else(|| Self::not_found(collection, id))?;
        for (key, value) in fields {
            doc.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()> {
        self.check_writable()?;
        self.collections
            .get(collection)
            .and_then(|docs| docs.remove(id))
            .ok_or_else(|| Self::not_found(collection, id))?;
        Ok(())
    }

    async fn list(&self, collection: &str) -> DomainResult<Vec<(String, Document)>> {
        self.check_reachable()?;
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|e| (e.key().clone(), e.value().clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> DomainResult<Vec<(String, Document)>> {
        self.check_reachable()?;
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|e| e.value().get(field) == Some(value))
                    .map(|e| (e.key().clone(), e.value().clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// History cache kept in memory, for tests
#[derive(Default)]
pub struct MemoryHistoryCache {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryCache for MemoryHistoryCache {
    fn load(&self) -> Result<Vec<HistoryRecord>, InfraError> {
        Ok(self.records.lock().expect("cache lock").clone())
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<(), InfraError> {
        *self.records.lock().expect("cache lock") = records.to_vec();
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
