//! Lot layout configuration
//!
//! The spot inventory is fixed for the lifetime of a session: a handful of
//! motorcycle spots (labelled `M1`, `M2`, ...) followed by numbered regular
//! spots. Defaults match the physical lot (M1–M5 plus 1–50); a TOML file can
//! override the counts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::spot::SpotId;
use crate::support::errors::InfraError;

/// Spot inventory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LotConfig {
    /// Number of motorcycle spots (labelled `M1..=Mn`)
    pub motorcycle_spots: u8,
    /// Number of regular spots (numbered `1..=n`)
    pub regular_spots: u16,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            motorcycle_spots: 5,
            regular_spots: 50,
        }
    }
}

impl LotConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Total number of spots in the inventory.
    pub fn capacity(&self) -> usize {
        self.motorcycle_spots as usize + self.regular_spots as usize
    }

    /// All spot identifiers, motorcycle labels first, in display order.
    pub fn spot_ids(&self) -> impl Iterator<Item = SpotId> + '_ {
        (1..=self.motorcycle_spots)
            .map(SpotId::Motorcycle)
            .chain((1..=self.regular_spots).map(SpotId::Regular))
    }
}

/// Default configuration file location (~/.config/parking-service/config.toml)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parking-service")
        .join("config.toml")
}
