//! Public webhook receiver.

mod handlers;
mod routes;

pub use handlers::{handle_hook, HookState};
pub use routes::hook_routes;
