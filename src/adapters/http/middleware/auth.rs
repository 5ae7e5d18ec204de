//! Session-cookie authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that resolves the session cookie and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//! - `session_cookie` - Cookie extraction shared with the WebSocket handshake
//!
//! # Architecture
//!
//! The middleware uses the `SessionAuthenticator` port, keeping it
//! store-agnostic. Whether sessions live in Postgres or an in-memory mock,
//! the middleware doesn't change.
//!
//! ```text
//! Request → auth_middleware → injects SessionUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::SessionUser;
use crate::ports::SessionAuthenticator;

/// Name of the cookie carrying the opaque session credential.
pub const SESSION_COOKIE: &str = "session_id";

/// Auth middleware state - wraps the session authenticator.
pub type AuthState = Arc<dyn SessionAuthenticator>;

/// Extracts the session credential from a request's `Cookie` header.
///
/// The first `session_id` cookie wins. Also used by the WebSocket handshake,
/// which authenticates against the same cookie.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("cookie")?.to_str().ok()?;
    cookie_header.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Authentication middleware that resolves session cookies.
///
/// This middleware:
/// 1. Extracts the `session_id` cookie
/// 2. Resolves it using the `SessionAuthenticator` port
/// 3. On success, injects `SessionUser` into request extensions
/// 4. On missing or dead sessions, continues without injecting; handlers
///    using `RequireAuth` then answer 401
/// 5. On session store failure, returns 503 with a generic body
pub async fn auth_middleware(
    State(authenticator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(credential) = session_cookie(request.headers()) {
        match authenticator.resolve(&credential).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(user);
            }
            Ok(None) => {
                // Dead session: fall through without identity. All of
                // missing, expired, and revoked look the same to callers.
            }
            Err(e) => {
                tracing::error!(error = %e, "Session store unavailable");
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({
                        "error": "Authentication service unavailable",
                        "code": "AUTH_UNAVAILABLE"
                    })),
                )
                    .into_response();
            }
        }
    }

    next.run(request).await
}

/// Extractor that requires an authenticated session.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub SessionUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<SessionUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No live session accompanied the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthorized"),
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHORIZED"
            })),
        )
            .into_response()
    }
}
