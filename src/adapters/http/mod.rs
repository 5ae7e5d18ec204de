//! HTTP adapters - the public webhook surface and the management API.
//!
//! - `hook` - Public webhook receiver (`/hook/{id}`)
//! - `endpoint` - Owner-scoped endpoint management (`/api/endpoints`)
//! - `middleware` - Session-cookie authentication
//! - `router` - Full application router assembly

pub mod endpoint;
pub mod hook;
pub mod middleware;
pub mod router;

pub use router::{build_router, AppDeps};
