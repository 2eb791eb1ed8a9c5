//! The gateway client: one call surface over three backend services.
//!
//! All operations funnel through [`GatewayClient::dispatch`], which applies
//! the two cross-cutting contracts uniformly: bearer-token attachment on
//! the way out, and global session invalidation on any 401 on the way
//! back. Adding a further backend target requires no change here beyond a
//! new [`BackendTarget`] variant.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use sentiview_core::{BackendTarget, GatewayConfig, GatewayError, Result, SessionStore};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Authenticated multi-backend API client.
///
/// Cloning is cheap; clones share the underlying connection pool and the
/// session store. Calls are independent and may run concurrently, the
/// client never serializes them.
#[derive(Clone)]
pub struct GatewayClient {
    http: Client,
    config: GatewayConfig,
    session: SessionStore,
}

impl GatewayClient {
    /// Creates a client over the given configuration and session handle.
    pub fn new(config: GatewayConfig, session: SessionStore) -> Self {
        Self {
            http: Client::new(),
            config,
            session,
        }
    }

    /// The configuration this client routes with.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The session store shared with this client.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Builds a request for the given target with the shared credential
    /// policy applied: the current token, when held, becomes a bearer
    /// header; otherwise the request goes out without credentials and the
    /// backend decides whether the endpoint requires one.
    async fn request(&self, target: BackendTarget, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url(target), path);
        tracing::debug!("[Gateway] {} {} ({})", method, url, target);

        let builder = self
            .http
            .request(method, url)
            .timeout(self.config.request_timeout);

        match self.session.current().await {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token.as_str())),
            None => builder,
        }
    }

    /// Sends a built request and applies the shared response policy.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|err| GatewayError::Transport {
            message: format!("request failed: {err}"),
            is_retryable: err.is_connect() || err.is_timeout(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body, status);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("[Gateway] authentication failure, invalidating session: {message}");
            self.session.invalidate().await;
            return Err(GatewayError::SessionExpired { message });
        }

        tracing::warn!("[Gateway] backend error {}: {message}", status.as_u16());
        Err(GatewayError::Backend {
            status_code: status.as_u16(),
            message,
        })
    }

    /// GET returning a JSON payload; unset filter keys never reach the
    /// query string because `query` only contains set pairs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        target: BackendTarget,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let builder = self.request(target, Method::GET, path).await.query(query);
        let response = self.dispatch(builder).await?;
        response.json().await.map_err(|err| {
            GatewayError::decode(format!("failed to parse response from {path}: {err}"))
        })
    }

    /// POST with a JSON body, returning a JSON payload.
    pub async fn post_json<T, B>(&self, target: BackendTarget, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(target, Method::POST, path).await.json(body);
        let response = self.dispatch(builder).await?;
        response.json().await.map_err(|err| {
            GatewayError::decode(format!("failed to parse response from {path}: {err}"))
        })
    }

    /// GET returning the raw response body, for binary payloads such as
    /// the CSV export.
    pub async fn get_bytes(
        &self,
        target: BackendTarget,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<u8>> {
        let builder = self.request(target, Method::GET, path).await.query(query);
        let response = self.dispatch(builder).await?;
        let bytes = response.bytes().await.map_err(|err| {
            let message = format!("failed to read response body from {path}: {err}");
            GatewayError::transport(message, false)
        })?;
        Ok(bytes.to_vec())
    }
}

/// Pulls the backend's declared message out of an error body.
///
/// The services answer errors as `{"error": "..."}`. A non-JSON body is
/// surfaced as-is; an empty one falls back to a status-derived message.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: String,
    }

    serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                format!("request failed with status {}", status.as_u16())
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_error_message_is_extracted() {
        let message = extract_error_message(
            r#"{"error": "token expired"}"#,
            StatusCode::UNAUTHORIZED,
        );
        assert_eq!(message, "token expired");
    }

    #[test]
    fn non_json_body_is_surfaced_unmodified() {
        let message = extract_error_message("upstream exploded", StatusCode::BAD_GATEWAY);
        assert_eq!(message, "upstream exploded");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let message = extract_error_message("", StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(message, "request failed with status 503");
    }
}
