//! Gateway configuration: base addresses for the three backend services.
//!
//! Each base address can be overridden through environment variables
//! (`SENTIVIEW_AUTH_URL`, `SENTIVIEW_API_URL`, `SENTIVIEW_COLLECTOR_URL`);
//! otherwise the documented defaults below apply.

use crate::target::BackendTarget;
use std::env;
use std::time::Duration;

/// Default base address of the authentication service.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:5000/api/auth";
/// Default base address of the analytics/read service.
pub const DEFAULT_API_URL: &str = "http://localhost:5002/api";
/// Default base address of the collection-trigger service.
pub const DEFAULT_COLLECTOR_URL: &str = "http://localhost:5001/api/collect";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base addresses and request timeout for the gateway client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub auth_base_url: String,
    pub analytics_base_url: String,
    pub collector_base_url: String,
    /// Applied per request; the client performs no retries of its own.
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            analytics_base_url: DEFAULT_API_URL.to_string(),
            collector_base_url: DEFAULT_COLLECTOR_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Priority:
    /// 1. `SENTIVIEW_AUTH_URL`, `SENTIVIEW_API_URL`, `SENTIVIEW_COLLECTOR_URL`
    /// 2. Documented defaults (`http://localhost:5000/api/auth` etc.)
    pub fn from_env() -> Self {
        Self {
            auth_base_url: normalize(
                env::var("SENTIVIEW_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            ),
            analytics_base_url: normalize(
                env::var("SENTIVIEW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ),
            collector_base_url: normalize(
                env::var("SENTIVIEW_COLLECTOR_URL")
                    .unwrap_or_else(|_| DEFAULT_COLLECTOR_URL.to_string()),
            ),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the authentication service base address.
    pub fn with_auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = normalize(url.into());
        self
    }

    /// Overrides the analytics service base address.
    pub fn with_analytics_base_url(mut self, url: impl Into<String>) -> Self {
        self.analytics_base_url = normalize(url.into());
        self
    }

    /// Overrides the collector service base address.
    pub fn with_collector_base_url(mut self, url: impl Into<String>) -> Self {
        self.collector_base_url = normalize(url.into());
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the configured base address for the given target.
    pub fn base_url(&self, target: BackendTarget) -> &str {
        match target {
            BackendTarget::Auth => &self.auth_base_url,
            BackendTarget::Analytics => &self.analytics_base_url,
            BackendTarget::Collector => &self.collector_base_url,
        }
    }
}

// Base addresses are joined with paths via plain concatenation, so a
// trailing slash would produce double slashes.
fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
