//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the bearer-token guard.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{CurrentUser, authenticate, require_bearer_auth};
pub use router::{auth_router, auth_router_generic};
