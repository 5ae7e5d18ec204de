//! Use-case handlers.
//!
//! One handler per operation, each holding the ports it needs behind `Arc`.
//!
//! - `endpoint` - Owner-scoped endpoint management
//! - `relay` - Webhook receipt and client-side replay

pub mod endpoint;
pub mod relay;
