//! Authenticated API client and its interceptor pipeline.
//!
//! ```text
//! ApiRequest ─▶ RequestInterceptor ─▶ HttpClient ─▶ ResponseInterceptor ─▶ Result<Response, ApiError>
//!               (Authorization,        (transport,    (401 purge + expiry,
//!                X-CSRF-Token)          opt. retry)    403 / network / other notify)
//! ```

pub mod client;
pub mod request;
pub mod request_interceptor;
pub mod response_interceptor;
pub mod retry;

pub use client::ApiClient;
pub use request::ApiRequest;
pub use request_interceptor::{RequestInterceptor, AUTHORIZATION_HEADER, CSRF_HEADER};
pub use response_interceptor::{ResponseInterceptor, ResponseOutcome};
pub use retry::RetryPolicy;
