//! Engine error taxonomy.
//!
//! Five classes with distinct handling:
//! - [`EngineError::Configuration`] — wrong or missing setup, fatal before
//!   any mutation happens.
//! - [`EngineError::Connectivity`] — transport or API failure that survived
//!   the client retry policy.
//! - [`EngineError::RateLimited`] — the rate limit was still in force after
//!   retries were exhausted. Callers rarely see this one.
//! - [`EngineError::Validation`] — a record-level failure that had to
//!   escalate (the single project record). Everything else stays aggregated
//!   as [`RecordError`]s in the run result.
//! - [`EngineError::DataIntegrity`] — referential breakage that could not be
//!   degraded to a warning.

use lift_client::ClientError;
use lift_core::errors::RecordError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure of an engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration: {0}")]
    Configuration(String),

    #[error("connectivity: {0}")]
    Connectivity(#[source] ClientError),

    #[error("rate limited by the target platform; retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("validation: {0}")]
    Validation(RecordError),

    #[error("data integrity: {0}")]
    DataIntegrity(String),
}

impl From<ClientError> for EngineError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
            other => Self::Connectivity(other),
        }
    }
}
