//! # Estaciona parking lot occupancy core
//!
//! State machine and history ledger for a single parking lot with a fixed
//! spot inventory (motorcycle spots M1–M5 plus regular spots 1–50).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and ports (spots, actors,
//!   history records)
//! - **application**: Business logic: the lot session (occupancy state
//!   machine + move transaction), the history ledger and the identity
//!   directory
//! - **infrastructure**: External concerns (document store, local cache,
//!   auth gateway implementations)
//! - **notifications**: Render-hint events for UI subscribers
//! - **shared**: Pure formatting/query helpers
//!
//! Authentication, rendering and the concrete remote store live outside
//! the core; they are reached only through the ports defined here.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;
pub mod shared;
pub mod support;

pub use config::{default_config_path, LotConfig};

// Re-export the session and service types for easy access
pub use application::{
    start_session, HistoryLedger, IdentityService, LotSession, MoveContext, MoveOutcome,
    PendingFinish, UserProfile,
};

// Re-export domain types
pub use domain::{
    Actor, ActorRef, AuthGateway, DomainError, DomainResult, HistoryPatch, HistoryRecord,
    Occupancy, Role, SpotId, SpotRegistry, VehicleClass, Visit,
};

// Re-export storage ports and the development implementations
pub use infrastructure::{
    Document, DocumentStore, HistoryCache, InMemoryDocumentStore, JsonHistoryCache,
    MemoryHistoryCache,
};

// Re-export notifications
pub use notifications::{create_event_bus, EventBus, LotEvent, SharedEventBus};
