//! Occupancy state machine: block, reopen, occupy, finish + charge
//!
//! Legal transitions per spot:
//! Free → Blocked, Free → Occupied, Blocked → Free, Blocked → Occupied
//! (taking a blocked spot into service), Occupied → Free via the two-step
//! finish flow. The capability guard runs before any state is touched, so
//! a rejected call never leaves partial effects.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::actor::Role;
use crate::domain::history::HistoryRecord;
use crate::domain::spot::{Occupancy, SpotId, VehicleClass, Visit};
use crate::shared::format::date_key_of;
use crate::support::errors::{DomainError, DomainResult};

use super::{LotSession, PendingFinish};

impl LotSession {
    /// Take a free spot out of service.
    pub fn block(&mut self, spot: SpotId, plate: Option<String>) -> DomainResult<()> {
        self.actor().require_role(Role::Operator)?;

        if self.registry.get(spot)?.is_some() {
            return Err(DomainError::NotFree(spot));
        }
        self.registry.set(spot, Occupancy::Blocked { plate })?;

        info!("Spot {} blocked by {}", spot, self.actor.visible_name());
        self.publish_spot(spot);
        Ok(())
    }

    /// Return a blocked spot to service.
    pub fn reopen(&mut self, spot: SpotId) -> DomainResult<()> {
        self.actor().require_role(Role::Operator)?;

        match self.registry.get(spot)? {
            Some(Occupancy::Blocked { .. }) => {}
            _ => return Err(DomainError::NotBlocked(spot)),
        }
        self.registry.clear(spot)?;

        info!("Spot {} reopened by {}", spot, self.actor.visible_name());
        self.publish_spot(spot);
        Ok(())
    }

    /// Check a vehicle in. The spot may be free or blocked, never already
    /// occupied.
    pub fn occupy(
        &mut self,
        spot: SpotId,
        vehicle: VehicleClass,
        plate: Option<String>,
    ) -> DomainResult<()> {
        self.occupy_at(spot, vehicle, plate, Utc::now())
    }

    /// `occupy` with an explicit check-in instant.
    pub fn occupy_at(
        &mut self,
        spot: SpotId,
        vehicle: VehicleClass,
        plate: Option<String>,
        now: chrono::DateTime<Utc>,
    ) -> DomainResult<()> {
        self.actor().require_role(Role::Operator)?;

        if let Some(Occupancy::Occupied(_)) = self.registry.get(spot)? {
            return Err(DomainError::NotFree(spot));
        }

        let visit = Visit {
            plate,
            vehicle,
            started_at: now,
            opened_by: self.actor.reference(),
        };
        self.registry.set(spot, Occupancy::Occupied(visit))?;

        info!(
            "Spot {} occupied ({}) by {}",
            spot,
            vehicle.as_str(),
            self.actor.visible_name()
        );
        self.publish_spot(spot);
        Ok(())
    }

    /// Start the finish flow on an occupied spot: snapshot the visit and
    /// compute the duration. The registry is not touched until the charge
    /// is confirmed.
    pub fn begin_finish(&mut self, spot: SpotId) -> DomainResult<PendingFinish> {
        self.begin_finish_at(spot, Utc::now())
    }

    /// `begin_finish` with an explicit end instant.
    pub fn begin_finish_at(
        &mut self,
        spot: SpotId,
        now: chrono::DateTime<Utc>,
    ) -> DomainResult<PendingFinish> {
        self.actor().require_role(Role::Operator)?;

        let visit = match self.registry.get(spot)? {
            Some(Occupancy::Occupied(visit)) => visit.clone(),
            _ => return Err(DomainError::NotOccupied(spot)),
        };

        if self.pending_finish.is_some() {
            debug!("Replacing in-flight pending finish");
        }
        let pending = PendingFinish {
            spot,
            duration_ms: (now - visit.started_at).num_milliseconds(),
            visit,
            ended_at: now,
        };
        self.pending_finish = Some(pending.clone());
        Ok(pending)
    }

    /// Record the charge and close the visit: the sole point where a visit
    /// becomes durable history. Consumes the pending finish, so a second
    /// call fails and no duplicate record is produced.
    pub async fn confirm_charge(&mut self, amount: impl Into<String>) -> DomainResult<HistoryRecord> {
        self.actor().require_role(Role::Operator)?;

        let pending = self
            .pending_finish
            .take()
            .ok_or(DomainError::NotFound {
                entity: "pending finish",
                field: "spot",
                value: "none".to_string(),
            })?;

        self.registry.clear(pending.spot)?;

        let record = HistoryRecord {
            id: Uuid::new_v4().to_string(),
            date_key: date_key_of(pending.ended_at),
            spot: pending.spot,
            plate: pending.visit.plate.clone(),
            vehicle: pending.visit.vehicle,
            start_time: pending.visit.started_at,
            end_time: pending.ended_at,
            duration_ms: pending.duration_ms,
            amount: amount.into(),
            opened_by_name: pending.visit.opened_by.display_name.clone(),
            closed_by_name: self.actor.visible_name().to_string(),
            created_at: Utc::now(),
        };

        info!(
            "Visit on spot {} finished: {} charged",
            pending.spot, record.amount
        );
        self.publish_spot(pending.spot);

        // Side effect, not a gate: the ledger logs and absorbs remote
        // failures, the spot is already free either way.
        self.ledger.record(record.clone()).await?;
        Ok(record)
    }

    /// Abandon the finish flow; the spot stays occupied.
    pub fn cancel_finish(&mut self) {
        self.pending_finish = None;
    }
}

// ── Tests ──────────────────────────────────────────────────────
