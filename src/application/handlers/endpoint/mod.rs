//! Endpoint management handlers.

mod create_endpoint;
mod delete_endpoint;
mod list_endpoints;

pub use create_endpoint::{CreateEndpointCommand, CreateEndpointHandler};
pub use delete_endpoint::{DeleteEndpointCommand, DeleteEndpointHandler};
pub use list_endpoints::ListEndpointsHandler;
