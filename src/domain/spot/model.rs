//! Spot domain entities

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::actor::ActorRef;
use crate::support::errors::DomainError;

/// Identifier of one physical parking space.
///
/// Motorcycle spots carry an `M` label (`M1`..), regular spots a plain
/// number. The derived ordering puts motorcycle spots before regular ones,
/// which is also the display order of the lot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SpotId {
    Motorcycle(u8),
    Regular(u16),
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motorcycle(n) => write!(f, "M{}", n),
            Self::Regular(n) => write!(f, "{}", n),
        }
    }
}

impl From<SpotId> for String {
    fn from(id: SpotId) -> Self {
        id.to_string()
    }
}

impl FromStr for SpotId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidSpot(s.to_string());
        if let Some(rest) = s.strip_prefix('M').or_else(|| s.strip_prefix('m')) {
            let n: u8 = rest.parse().map_err(|_| invalid())?;
            if n == 0 {
                return Err(invalid());
            }
            Ok(Self::Motorcycle(n))
        } else {
            let n: u16 = s.parse().map_err(|_| invalid())?;
            if n == 0 {
                return Err(invalid());
            }
            Ok(Self::Regular(n))
        }
    }
}

impl TryFrom<String> for SpotId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Vehicle classification recorded on check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Truck,
    Motorcycle,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Truck => "truck",
            Self::Motorcycle => "motorcycle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "car" => Some(Self::Car),
            "truck" => Some(Self::Truck),
            "motorcycle" => Some(Self::Motorcycle),
            _ => None,
        }
    }

    /// Human-readable label for list rendering
    pub fn label(&self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Motorcycle => "Motorcycle",
        }
    }
}

/// Details of an active visit on an occupied spot
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub plate: Option<String>,
    pub vehicle: VehicleClass,
    pub started_at: DateTime<Utc>,
    pub opened_by: ActorRef,
}

/// State attached to a spot. A spot without a record is free.
#[derive(Debug, Clone, PartialEq)]
pub enum Occupancy {
    /// Spot intentionally taken out of service; no vehicle, no timestamps
    Blocked { plate: Option<String> },
    /// Spot holds a vehicle
    Occupied(Visit),
}

impl Occupancy {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    pub fn as_visit(&self) -> Option<&Visit> {
        match self {
            Self::Occupied(visit) => Some(visit),
            Self::Blocked { .. } => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Blocked { .. } => "Blocked",
            Self::Occupied(_) => "Occupied",
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
