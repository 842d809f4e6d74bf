//! Fixed-inventory occupancy map
//!
//! Pure state container: the set of spots is decided at construction and
//! never changes afterwards. Absence of a record means the spot is free.

use std::collections::BTreeMap;

use crate::config::LotConfig;
use crate::support::errors::{DomainError, DomainResult};

use super::model::{Occupancy, SpotId};

/// In-memory mapping from spot identifier to its current occupancy record
#[derive(Debug)]
pub struct SpotRegistry {
    slots: BTreeMap<SpotId, Option<Occupancy>>,
}

impl SpotRegistry {
    pub fn new(config: &LotConfig) -> Self {
        Self {
            slots: config.spot_ids().map(|id| (id, None)).collect(),
        }
    }

    /// Whether the spot belongs to the inventory.
    pub fn contains(&self, spot: SpotId) -> bool {
        self.slots.contains_key(&spot)
    }

    /// Current record for a spot; `None` means free.
    pub fn get(&self, spot: SpotId) -> DomainResult<Option<&Occupancy>> {
        self.slots
            .get(&spot)
            .map(Option::as_ref)
            .ok_or_else(|| DomainError::InvalidSpot(spot.to_string()))
    }

    /// Attach a record to a spot, replacing any previous one.
    pub fn set(&mut self, spot: SpotId, record: Occupancy) -> DomainResult<()> {
        let slot = self
            .slots
            .get_mut(&spot)
            .ok_or_else(|| DomainError::InvalidSpot(spot.to_string()))?;
        *slot = Some(record);
        Ok(())
    }

    /// Clear a spot back to free, returning the previous record if any.
    pub fn clear(&mut self, spot: SpotId) -> DomainResult<Option<Occupancy>> {
        let slot = self
            .slots
            .get_mut(&spot)
            .ok_or_else(|| DomainError::InvalidSpot(spot.to_string()))?;
        Ok(slot.take())
    }

    /// All spots in inventory order (motorcycle labels first).
    pub fn all(&self) -> impl Iterator<Item = (SpotId, Option<&Occupancy>)> {
        self.slots.iter().map(|(id, rec)| (*id, rec.as_ref()))
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots
            .values()
            .filter(|rec| matches!(rec, Some(Occupancy::Occupied(_))))
            .count()
    }
}

// ── Tests ──────────────────────────────────────────────────────
