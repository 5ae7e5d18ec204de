//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EndpointStore` - Persistence for webhook endpoints
//! - `SessionAuthenticator` - Opaque-credential to user-identity resolution
//! - `ConnectionRegistry` - User identity to live-transport mapping
//! - `WebhookForwarder` - Replay of a captured webhook against its target

mod connection_registry;
mod endpoint_store;
mod session_authenticator;
mod webhook_forwarder;

pub use connection_registry::{ConnectionHandle, ConnectionRegistry};
pub use endpoint_store::EndpointStore;
pub use session_authenticator::SessionAuthenticator;
pub use webhook_forwarder::WebhookForwarder;
