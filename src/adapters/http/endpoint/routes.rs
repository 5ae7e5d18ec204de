//! HTTP routes for endpoint management.

use axum::{
    routing::{delete, post},
    Router,
};

use super::handlers::{create_endpoint, delete_endpoint, list_endpoints, EndpointHandlers};

/// Creates the endpoint management router.
pub fn endpoint_routes(handlers: EndpointHandlers) -> Router {
    Router::new()
        .route("/", post(create_endpoint).get(list_endpoints))
        .route("/:id", delete(delete_endpoint))
        .with_state(handlers)
}
