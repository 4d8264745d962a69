//! Request-scoped observability.

mod request_id;

pub use request_id::{RequestId, RequestIdMiddleware};
