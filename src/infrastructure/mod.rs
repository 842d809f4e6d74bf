pub mod auth;
pub mod storage;

pub use auth::StaticAuthGateway;
pub use storage::{
    collections, Document, DocumentStore, HistoryCache, InMemoryDocumentStore, JsonHistoryCache,
    MemoryHistoryCache,
};
