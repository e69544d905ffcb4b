//! API client configuration.
//!
//! Use the builder methods to customize the client, or [`ApiConfig::from_env`]
//! to pick settings up from `SHIPDESK_*` environment variables.
//!
//! ```ignore
//! use shipdesk::config::{ApiConfig, Portal};
//!
//! let config = ApiConfig::default()
//!     .with_base_url("https://api.shipdesk.example")
//!     .with_portal(Portal::Admin);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::api::RetryPolicy;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between tracking polls.
pub const DEFAULT_TRACKING_INTERVAL: Duration = Duration::from_secs(30);

/// Which portal the client is deployed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Portal {
    Customer,
    #[default]
    Seller,
    Admin,
}

impl Portal {
    /// Path the host navigates to when the session expires.
    pub fn login_path(&self) -> &'static str {
        match self {
            Portal::Customer => "/customer/login",
            Portal::Seller => "/seller/login",
            Portal::Admin => "/admin/login",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Portal::Customer => "customer",
            Portal::Seller => "seller",
            Portal::Admin => "admin",
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Portal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Portal::Customer),
            "seller" => Ok(Portal::Seller),
            "admin" => Ok(Portal::Admin),
            other => Err(format!("unknown portal '{}'", other)),
        }
    }
}

/// Configuration for [`crate::api::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    pub base_url: String,
    /// Transport timeout; a call pending longer surfaces as a network failure
    pub timeout: Duration,
    /// Portal this deployment serves
    pub portal: Portal,
    /// Login path carried by the session-expired event
    pub login_path: String,
    /// Retry policy for transport failures (disabled by default)
    pub retry: RetryPolicy,
    /// Interval between tracking polls
    pub tracking_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let portal = Portal::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            portal,
            login_path: portal.login_path().to_string(),
            retry: RetryPolicy::default(),
            tracking_interval: DEFAULT_TRACKING_INTERVAL,
        }
    }
}

impl ApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the portal. Also resets the login path to the portal's default.
    pub fn with_portal(mut self, portal: Portal) -> Self {
        self.portal = portal;
        self.login_path = portal.login_path().to_string();
        self
    }

    /// Override the login path.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the tracking poll interval.
    pub fn with_tracking_interval(mut self, interval: Duration) -> Self {
        self.tracking_interval = interval;
        self
    }

    /// Build a configuration from the environment.
    ///
    /// Reads `SHIPDESK_API_URL`, `SHIPDESK_PORTAL`, `SHIPDESK_TIMEOUT_SECS` and
    /// `SHIPDESK_MAX_RETRIES`. Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SHIPDESK_API_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(portal) = std::env::var("SHIPDESK_PORTAL") {
            match portal.parse::<Portal>() {
                Ok(portal) => config = config.with_portal(portal),
                Err(e) => tracing::warn!("Ignoring SHIPDESK_PORTAL: {}", e),
            }
        }

        if let Ok(secs) = std::env::var("SHIPDESK_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => tracing::warn!("Ignoring invalid SHIPDESK_TIMEOUT_SECS={:?}", secs),
            }
        }

        if let Ok(retries) = std::env::var("SHIPDESK_MAX_RETRIES") {
            match retries.trim().parse::<u32>() {
                Ok(n) => {
                    let retry = config.retry.clone().with_max_retries(n);
                    config = config.with_retry_policy(retry);
                }
                Err(_) => tracing::warn!("Ignoring invalid SHIPDESK_MAX_RETRIES={:?}", retries),
            }
        }

        config
    }

    /// Join a request path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
