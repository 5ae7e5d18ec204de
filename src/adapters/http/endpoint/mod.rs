//! Endpoint management API.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateEndpointRequest, EndpointResponse, ErrorResponse};
pub use handlers::EndpointHandlers;
pub use routes::endpoint_routes;
