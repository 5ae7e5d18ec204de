//! SessionAuthenticator port - Opaque-credential resolution.
//!
//! The relay authenticates exactly once, at the WebSocket handshake (and on
//! management API calls), by handing the opaque session credential to this
//! port. Expiry is the session store's business; the relay only sees a live
//! user or nothing.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, SessionUser};

/// Resolves an opaque session credential to a user identity.
///
/// # Contract
///
/// - `Ok(Some(user))` - credential belongs to a live session.
/// - `Ok(None)` - missing, malformed, unknown, expired, or revoked; callers
///   must not distinguish between these sub-reasons.
/// - `Err(_)` - the store itself failed; callers on the handshake path treat
///   this the same as an absent session (silent rejection).
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Resolves a credential to the session's user, if the session is live.
    async fn resolve(&self, credential: &str) -> Result<Option<SessionUser>, AuthError>;
}
