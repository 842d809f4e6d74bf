//! Event types published to UI subscribers

use chrono::{DateTime, Utc};

use crate::domain::history::HistoryRecord;
use crate::domain::spot::{Occupancy, SpotId};

/// Something the presentation layer may want to re-render
#[derive(Debug, Clone)]
pub enum LotEvent {
    /// A spot's occupancy record changed; `occupancy: None` means free
    SpotChanged {
        spot: SpotId,
        occupancy: Option<Occupancy>,
    },
    /// A move was initiated; spot clicks now select the target
    MoveStarted { source: SpotId },
    /// The active move finished or was cancelled
    MoveEnded,
    /// A completed visit was appended to the ledger
    HistoryAppended { record: HistoryRecord },
    /// A ledger record was edited or deleted
    HistoryChanged { record_id: String },
}

impl LotEvent {
    /// Stable name used in logs
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SpotChanged { .. } => "spot_changed",
            Self::MoveStarted { .. } => "move_started",
            Self::MoveEnded => "move_ended",
            Self::HistoryAppended { .. } => "history_appended",
            Self::HistoryChanged { .. } => "history_changed",
        }
    }

    /// Spot the event concerns, when there is one
    pub fn spot(&self) -> Option<SpotId> {
        match self {
            Self::SpotChanged { spot, .. } => Some(*spot),
            Self::MoveStarted { source } => Some(*source),
            Self::HistoryAppended { record } => Some(record.spot),
            _ => None,
        }
    }
}

/// Envelope delivered to subscribers
#[derive(Debug, Clone)]
pub struct EventMessage {
    pub event: LotEvent,
    pub timestamp: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: LotEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}
