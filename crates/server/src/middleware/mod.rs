//! HTTP middleware stack for the order API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. CORS (answers preflight requests before routing)
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (records `x-request-id` into the span)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
