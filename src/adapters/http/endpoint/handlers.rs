//! HTTP handlers for endpoint management.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::endpoint::{
    CreateEndpointCommand, CreateEndpointHandler, DeleteEndpointCommand, DeleteEndpointHandler,
    ListEndpointsHandler,
};
use crate::config::RelayConfig;
use crate::domain::endpoint::EndpointError;
use crate::domain::foundation::EndpointId;

use super::dto::{CreateEndpointRequest, EndpointResponse, ErrorResponse};

/// Handler state for the endpoint management API.
#[derive(Clone)]
pub struct EndpointHandlers {
    create_handler: Arc<CreateEndpointHandler>,
    list_handler: Arc<ListEndpointsHandler>,
    delete_handler: Arc<DeleteEndpointHandler>,
    relay: RelayConfig,
}

impl EndpointHandlers {
    pub fn new(
        create_handler: Arc<CreateEndpointHandler>,
        list_handler: Arc<ListEndpointsHandler>,
        delete_handler: Arc<DeleteEndpointHandler>,
        relay: RelayConfig,
    ) -> Self {
        Self {
            create_handler,
            list_handler,
            delete_handler,
            relay,
        }
    }
}

/// POST /api/endpoints - Register a new endpoint
pub async fn create_endpoint(
    State(handlers): State<EndpointHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateEndpointRequest>,
) -> Response {
    let cmd = CreateEndpointCommand {
        owner_id: user.id,
        target: req.target,
        method: req.method,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(endpoint) => {
            let response = EndpointResponse::from_endpoint(&endpoint, &handlers.relay);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_endpoint_error(e),
    }
}

/// GET /api/endpoints - List the caller's endpoints, newest first
pub async fn list_endpoints(
    State(handlers): State<EndpointHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_handler.handle(&user.id).await {
        Ok(endpoints) => {
            let response: Vec<EndpointResponse> = endpoints
                .iter()
                .map(|e| EndpointResponse::from_endpoint(e, &handlers.relay))
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_endpoint_error(e),
    }
}

/// DELETE /api/endpoints/:id - Remove one of the caller's endpoints
pub async fn delete_endpoint(
    State(handlers): State<EndpointHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    // An unparseable id is as absent as an unknown one.
    let endpoint_id = match id.parse::<EndpointId>() {
        Ok(id) => id,
        Err(_) => {
            return (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found())).into_response()
        }
    };

    let cmd = DeleteEndpointCommand {
        owner_id: user.id,
        endpoint_id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_endpoint_error(e),
    }
}

/// Maps endpoint errors onto management API responses.
fn handle_endpoint_error(error: EndpointError) -> Response {
    match error {
        EndpointError::InvalidTarget | EndpointError::InvalidMethod(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        EndpointError::NotFound => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found())).into_response()
        }
        EndpointError::Store(e) => {
            tracing::error!(error = %e, "Endpoint store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}
