use thiserror::Error;

use crate::domain::spot::SpotId;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown spot: {0}")]
    InvalidSpot(String),

    #[error("Spot {0} is not free")]
    NotFree(SpotId),

    #[error("Spot {0} is not occupied")]
    NotOccupied(SpotId),

    #[error("Spot {0} is not blocked")]
    NotBlocked(SpotId),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Spot {0} is not free to receive a vehicle")]
    TargetOccupied(SpotId),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store write failed: {0}")]
    StoreWriteFailed(String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
