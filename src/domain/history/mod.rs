//! History aggregate: the durable per-visit record and its editable subset.

pub mod model;

pub use model::{HistoryPatch, HistoryRecord};
