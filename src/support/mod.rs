pub mod errors;

pub use errors::{AppError, DomainError, DomainResult, InfraError};
