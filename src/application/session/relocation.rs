//! Move transaction: relocate an occupied spot's record to a free spot
//!
//! Two-step flow with cancellation: `begin_move` captures the source, then
//! one target selection either relocates, rejects (context stays active so
//! the operator can pick again), or cancels when the source itself is
//! picked. The relocation is a single `&mut self` call, so no caller ever
//! observes the record on both spots or on neither.

use tracing::{debug, info};

use crate::domain::actor::Role;
use crate::domain::spot::SpotId;
use crate::notifications::LotEvent;
use crate::support::errors::{DomainError, DomainResult};

use super::{LotSession, MoveContext};

/// How a target selection resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Record now lives on `to`; `from` is free
    Moved { from: SpotId, to: SpotId },
    /// Selecting the source cancelled the move
    Cancelled,
}

impl LotSession {
    /// Start a move from an occupied spot. Replaces any move already in
    /// flight.
    pub fn begin_move(&mut self, spot: SpotId) -> DomainResult<()> {
        self.actor().require_role(Role::Operator)?;

        match self.registry.get(spot)? {
            Some(occupancy) if occupancy.is_occupied() => {}
            _ => return Err(DomainError::NotOccupied(spot)),
        }

        if self.move_ctx.is_some() {
            debug!("Replacing in-flight move context");
        }
        self.move_ctx = Some(MoveContext { source: spot });
        self.events.publish(LotEvent::MoveStarted { source: spot });
        Ok(())
    }

    /// Resolve the active move with a target spot.
    pub fn select_move_target(&mut self, target: SpotId) -> DomainResult<MoveOutcome> {
        let ctx = self.move_ctx.ok_or(DomainError::NotFound {
            entity: "move context",
            field: "source",
            value: "none".to_string(),
        })?;

        if target == ctx.source {
            self.cancel_move();
            return Ok(MoveOutcome::Cancelled);
        }

        if self.registry.get(target)?.is_some() {
            // Context stays active; the operator may pick again or cancel.
            return Err(DomainError::TargetOccupied(target));
        }

        let record = self
            .registry
            .clear(ctx.source)?
            .ok_or(DomainError::NotOccupied(ctx.source))?;
        self.registry.set(target, record)?;
        self.move_ctx = None;

        info!("Vehicle moved from spot {} to {}", ctx.source, target);
        self.publish_spot(ctx.source);
        self.publish_spot(target);
        self.events.publish(LotEvent::MoveEnded);

        Ok(MoveOutcome::Moved {
            from: ctx.source,
            to: target,
        })
    }

    /// Abandon the active move without touching any spot.
    pub fn cancel_move(&mut self) {
        if self.move_ctx.take().is_some() {
            self.events.publish(LotEvent::MoveEnded);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
