//! Error types for endpoint management.

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors surfaced by endpoint management operations.
///
/// Validation variants are the creating user's business and map to 400 on
/// the management API; they never reach the relay path.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Target is not an `http://localhost` URL.
    #[error("Target must be an http://localhost URL")]
    InvalidTarget,

    /// Method is not on the GET/POST/PUT/PATCH/DELETE allow-list.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// No endpoint with the given id owned by the caller.
    #[error("Endpoint not found")]
    NotFound,

    /// The endpoint store failed.
    #[error("Endpoint store error: {0}")]
    Store(#[from] DomainError),
}
