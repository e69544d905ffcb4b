//! Error types for shipdesk.
//!
//! - [`ApiError`]: every rejection produced by the API client
//! - [`StoreError`]: credential store and substrate failures
//! - [`ErrorCategory`]: coarse classification used for log fields and
//!   recovery hints
//!
//! Retrying is decided by [`crate::api::RetryPolicy`] alone, from the
//! transport error before classification.
//!
//! # Error Categories
//!
//! | Category | Source |
//! |----------|--------|
//! | Network | no response received |
//! | Auth | HTTP 401 |
//! | Server | HTTP 5xx, undecodable body |
//! | User | HTTP 403, other 4xx |
//! | Client | request could not be built or addressed |
//! | System | credential store failure |

mod api;
mod category;
mod store;

pub use api::{
    ApiError, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, PERMISSION_DENIED_MESSAGE,
};
pub use category::ErrorCategory;
pub use store::StoreError;

/// Type alias for Results using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;
