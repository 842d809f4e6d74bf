pub mod actor;
pub mod history;
pub mod spot;

// Re-export commonly used types
pub use actor::{Actor, ActorRef, AuthGateway, Role};
pub use history::{HistoryPatch, HistoryRecord};
pub use spot::{Occupancy, SpotId, SpotRegistry, VehicleClass, Visit};

// Re-export the error types from support for convenience
pub use crate::support::errors::{DomainError, DomainResult};
