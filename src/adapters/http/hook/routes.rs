//! HTTP routes for the public webhook surface.

use axum::{routing::get, Router};

use super::handlers::{handle_hook, HookState};

/// Creates the hook router.
///
/// All five allowed verbs share the single receiver handler.
pub fn hook_routes(state: HookState) -> Router {
    Router::new()
        .route(
            "/hook/:id",
            get(handle_hook)
                .post(handle_hook)
                .put(handle_hook)
                .patch(handle_hook)
                .delete(handle_hook),
        )
        .with_state(state)
}
