//! Render-hint notifications
//!
//! The presentation boundary of the core: state changes are published as
//! events, a thin adapter at the UI side decides how to draw them.

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{EventMessage, LotEvent};
