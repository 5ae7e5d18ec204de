//! Authenticated session identity for the domain layer.
//!
//! These types represent a user resolved from an opaque session credential.
//! They have no store dependencies - any session backend can populate them
//! via the `SessionAuthenticator` port.

use super::UserId;
use thiserror::Error;

/// User identity resolved from a live session.
///
/// Produced by the `SessionAuthenticator` port after a successful lookup.
/// The relay only routes on `id`; the remaining fields exist for the
/// management surface.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The unique user identifier from the session store.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Whether the user has administrative rights.
    pub is_admin: bool,
}

impl SessionUser {
    /// Creates a new session user.
    pub fn new(id: UserId, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            email: email.into(),
            is_admin,
        }
    }
}

/// Authentication errors on the session resolve path.
///
/// A missing, unknown, expired, or revoked credential is NOT an error: the
/// port reports those as an absent user, and callers treat all of them
/// identically. This enum covers infrastructure failure only.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The session store could not be reached or answered abnormally.
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Creates a store unavailable error with a message.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }
}
