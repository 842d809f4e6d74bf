//! Storage implementations

pub mod local;
pub mod memory;
pub mod traits;

pub use local::JsonHistoryCache;
pub use memory::{InMemoryDocumentStore, MemoryHistoryCache};
pub use traits::{collections, Document, DocumentStore, HistoryCache};
