//! HTTP middleware implementations
//!
//! Request logging comes from `tracing-actix-web`; this module adds request ID
//! tracking on top of it.

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, RequestIdMiddlewareService};
