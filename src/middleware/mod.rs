// ABOUTME: HTTP middleware for authorization, CORS, and request correlation
// ABOUTME: Exposes the access guard, the CORS layer builder, and request ID tagging

/// Access guard and role requirements
pub mod auth;
/// CORS layer configuration
pub mod cors;
/// Request ID assignment
pub mod request_id;

pub use auth::{require_roles, AccessGuard, AuthenticatedUser, RequireRoles};
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
