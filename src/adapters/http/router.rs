//! Full application router assembly.
//!
//! Builds the single axum router the server binary serves: public hook
//! surface, realtime gateway, session-authenticated management API, and
//! health probe, with tracing, timeout, and CORS layers on top.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::adapters::http::endpoint::{endpoint_routes, EndpointHandlers};
use crate::adapters::http::hook::{hook_routes, HookState};
use crate::adapters::http::middleware::auth_middleware;
use crate::adapters::websocket::{gateway_router, GatewayState};
use crate::application::handlers::endpoint::{
    CreateEndpointHandler, DeleteEndpointHandler, ListEndpointsHandler,
};
use crate::application::handlers::relay::ReceiveWebhookHandler;
use crate::config::AppConfig;
use crate::ports::{ConnectionRegistry, EndpointStore, SessionAuthenticator};

/// The port implementations the router is wired against.
///
/// Constructed once at process start; the registry instance in particular is
/// the process-wide one shared between gateway and receiver.
pub struct AppDeps {
    pub endpoint_store: Arc<dyn EndpointStore>,
    pub authenticator: Arc<dyn SessionAuthenticator>,
    pub registry: Arc<dyn ConnectionRegistry>,
}

/// Builds the complete application router.
pub fn build_router(deps: &AppDeps, config: &AppConfig) -> Router {
    let hook_state = HookState::new(Arc::new(ReceiveWebhookHandler::new(
        deps.endpoint_store.clone(),
        deps.registry.clone(),
    )));

    let endpoint_handlers = EndpointHandlers::new(
        Arc::new(CreateEndpointHandler::new(deps.endpoint_store.clone())),
        Arc::new(ListEndpointsHandler::new(deps.endpoint_store.clone())),
        Arc::new(DeleteEndpointHandler::new(deps.endpoint_store.clone())),
        config.relay.clone(),
    );

    let gateway_state = GatewayState::new(deps.authenticator.clone(), deps.registry.clone());

    let api = endpoint_routes(endpoint_handlers).layer(middleware::from_fn_with_state(
        deps.authenticator.clone(),
        auth_middleware,
    ));

    Router::new()
        .route("/health", get(health))
        .merge(hook_routes(hook_state))
        .merge(gateway_router().with_state(gateway_state))
        .nest("/api/endpoints", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(config))
}

/// GET /health - liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // The hook surface is meant to be called cross-origin by services,
        // not browsers; without configured origins no CORS grants are made.
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    }
}
