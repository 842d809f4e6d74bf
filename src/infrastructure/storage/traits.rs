//! Storage port definitions

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::history::HistoryRecord;
use crate::support::errors::{DomainResult, InfraError};

/// JSON document as held in a store collection
pub type Document = Map<String, Value>;

/// Well-known collection names
pub mod collections {
    pub const USERS: &str = "users";
    pub const HISTORY: &str = "history";
}

/// Remote durable store, document-collection shaped.
///
/// Authoritative when reachable. Implementations report unreachability as
/// `StoreUnavailable` and rejected writes as `StoreWriteFailed`; the caller
/// decides whether to degrade or propagate.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> DomainResult<Option<Document>>;

    /// Create or replace the document stored under `id`.
    async fn set(&self, collection: &str, id: &str, document: Document) -> DomainResult<()>;

    /// Merge `fields` into an existing document. `NotFound` if absent.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> DomainResult<()>;

    /// Remove a document. `NotFound` if absent.
    async fn delete(&self, collection: &str, id: &str) -> DomainResult<()>;

    /// All documents of a collection, in unspecified order.
    async fn list(&self, collection: &str) -> DomainResult<Vec<(String, Document)>>;

    /// Documents whose `field` equals `value`, in unspecified order.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> DomainResult<Vec<(String, Document)>>;
}

/// Local durable cache: one flat list of history records behind a
/// well-known key, replaced wholesale on every write. No migrations.
pub trait HistoryCache: Send + Sync {
    fn load(&self) -> Result<Vec<HistoryRecord>, InfraError>;
    fn save(&self, records: &[HistoryRecord]) -> Result<(), InfraError>;
}
