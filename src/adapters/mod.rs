//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session authenticator test double
//! - `endpoints` - In-memory endpoint store
//! - `http` - Public webhook receiver, management API, middleware
//! - `postgres` - Database-backed endpoint store and session authenticator
//! - `reflector` - Client-side replay of delivered webhooks
//! - `websocket` - Realtime gateway and in-memory connection registry

pub mod auth;
pub mod endpoints;
pub mod http;
pub mod postgres;
pub mod reflector;
pub mod websocket;
