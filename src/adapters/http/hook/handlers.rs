//! HTTP handler for the public webhook surface.
//!
//! One handler shared across all allowed verbs. Whatever happens - unknown
//! id, offline owner, enqueue failure - the external caller sees 204 with an
//! empty body. That blankness is the contract: response codes must not be
//! usable to probe which endpoint ids exist or who is online.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
};

use crate::application::handlers::relay::{ReceiveWebhookCommand, ReceiveWebhookHandler};

/// State required for hook handling.
#[derive(Clone)]
pub struct HookState {
    pub receiver: Arc<ReceiveWebhookHandler>,
}

impl HookState {
    /// Create a new hook state.
    pub fn new(receiver: Arc<ReceiveWebhookHandler>) -> Self {
        Self { receiver }
    }
}

/// Handle an inbound webhook call.
///
/// Route: `GET|POST|PUT|PATCH|DELETE /hook/:id`
pub async fn handle_hook(
    State(state): State<HookState>,
    Path(id): Path<String>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let command = ReceiveWebhookCommand {
        endpoint_id: id,
        method: method.as_str().to_string(),
        headers: flatten_headers(&headers),
        // Captured as text for every verb; the capture step discards it
        // for GET and HEAD.
        body: Some(String::from_utf8_lossy(&body).into_owned()),
    };

    state.receiver.handle(command).await;

    StatusCode::NO_CONTENT
}

/// Flattens request headers into a plain map, first value per name.
fn flatten_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut flat = HashMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            flat.entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn flatten_keeps_first_value_per_name() {
        let mut headers = HeaderMap::new();
        headers.append("x-test", HeaderValue::from_static("first"));
        headers.append("x-test", HeaderValue::from_static("second"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat.get("x-test").map(String::as_str), Some("first"));
    }

    #[test]
    fn flatten_skips_non_utf8_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bin", HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        headers.insert("x-ok", HeaderValue::from_static("yes"));

        let flat = flatten_headers(&headers);
        assert!(!flat.contains_key("x-bin"));
        assert_eq!(flat.get("x-ok").map(String::as_str), Some("yes"));
    }
}
