//! Outbound request context.

use serde::Serialize;

use crate::error::ApiError;
use crate::traits::{Headers, Method};

/// One outbound API call: method, path relative to the base URL, headers and
/// an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Headers,
    pub body: Option<String>,
    /// Whether failures are shown through the notifier
    pub notify_errors: bool,
}

impl ApiRequest {
    /// A request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            method,
            path: path.into(),
            headers,
            body: None,
            notify_errors: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// A request carrying `body` serialized as JSON.
    pub fn with_json<B: Serialize + ?Sized>(
        method: Method,
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let mut request = Self::new(method, path);
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        request.body = Some(body);
        Ok(request)
    }

    /// Keep failures out of the notifier. Classification and the 401 session
    /// purge still apply.
    pub fn quiet(mut self) -> Self {
        self.notify_errors = false;
        self
    }

    /// Set a header, replacing any previous value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
