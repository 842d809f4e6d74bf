//! Spot aggregate: identifiers, occupancy records and the fixed registry.

pub mod model;
pub mod registry;

pub use model::{Occupancy, SpotId, VehicleClass, Visit};
pub use registry::SpotRegistry;
