//! Actor aggregate
//!
//! Contains the Actor entity, the role/authorization guard and the
//! authentication gateway interface.

pub mod gateway;
pub mod model;

pub use gateway::AuthGateway;
pub use model::{Actor, ActorRef, Role};
