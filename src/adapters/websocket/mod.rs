//! WebSocket adapter - the realtime gateway and its connection registry.

mod handler;
mod registry;

pub use handler::{gateway_router, ws_handler, GatewayState};
pub use registry::InMemoryConnectionRegistry;
