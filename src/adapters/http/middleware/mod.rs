//! HTTP middleware for axum.
//!
//! - `auth` - Session-cookie authentication middleware and extractors

pub mod auth;

pub use auth::{auth_middleware, session_cookie, AuthRejection, AuthState, RequireAuth};
