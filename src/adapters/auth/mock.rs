//! Mock session authenticator for testing.
//!
//! Implements the `SessionAuthenticator` port against an in-memory map of
//! credentials, avoiding the need for a real session store in tests.
//!
//! # Example
//!
//! ```ignore
//! use hook_relay::adapters::auth::MockSessionAuthenticator;
//!
//! let authenticator = MockSessionAuthenticator::new()
//!     .with_session("valid-credential", "user-123");
//!
//! let resolved = authenticator.resolve("valid-credential").await?;
//! assert!(resolved.is_some());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, SessionUser, UserId};
use crate::ports::SessionAuthenticator;

/// Mock session authenticator backed by a credential map.
///
/// Credentials not in the map resolve to `None`, indistinguishable from
/// expired or revoked sessions, exactly like the real store.
#[derive(Debug, Default)]
pub struct MockSessionAuthenticator {
    /// Map of live credentials to their users
    sessions: RwLock<HashMap<String, SessionUser>>,
    /// Optional error to return for all resolutions (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionAuthenticator {
    /// Creates a new empty mock authenticator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a live credential for a simple test user.
    pub fn with_session(self, credential: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = SessionUser::new(
            UserId::new(&user_id).unwrap(),
            format!("{}@test.example.com", user_id),
            false,
        );
        self.sessions.write().unwrap().insert(credential.into(), user);
        self
    }

    /// Adds a live credential mapping to a specific user.
    pub fn with_user(self, credential: impl Into<String>, user: SessionUser) -> Self {
        self.sessions.write().unwrap().insert(credential.into(), user);
        self
    }

    /// Forces all resolutions to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Revokes a credential at runtime.
    pub fn revoke(&self, credential: &str) {
        self.sessions.write().unwrap().remove(credential);
    }
}

#[async_trait]
impl SessionAuthenticator for MockSessionAuthenticator {
    async fn resolve(&self, credential: &str) -> Result<Option<SessionUser>, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(self.sessions.read().unwrap().get(credential).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_credential() {
        let authenticator = MockSessionAuthenticator::new().with_session("cred-1", "user-1");

        let user = authenticator.resolve("cred-1").await.unwrap().unwrap();
        assert_eq!(user.id.as_str(), "user-1");
    }

    #[tokio::test]
    async fn unknown_credential_resolves_to_none() {
        let authenticator = MockSessionAuthenticator::new();
        assert!(authenticator.resolve("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoked_credential_resolves_to_none() {
        let authenticator = MockSessionAuthenticator::new().with_session("cred-1", "user-1");
        authenticator.revoke("cred-1");
        assert!(authenticator.resolve("cred-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn forced_error_is_returned() {
        let authenticator = MockSessionAuthenticator::new()
            .with_error(AuthError::store_unavailable("down for maintenance"));
        assert!(authenticator.resolve("anything").await.is_err());
    }
}
