//! Operations against the authentication service.

use crate::gateway::GatewayClient;
use crate::models::{
    Credentials, LoginResponse, MessageResponse, NewAccount, RegisterResponse, SessionCheck,
};
use sentiview_core::{BackendTarget, GatewayError, Result};

impl GatewayClient {
    /// Exchanges credentials for a session token.
    ///
    /// On success the backend's payload is returned as-is; persisting the
    /// token into the session store is the caller's decision. A rejected
    /// login surfaces the backend's error message unchanged.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(GatewayError::validation("email and password are required"));
        }
        self.post_json(BackendTarget::Auth, "/login", credentials)
            .await
    }

    /// Creates a new account. Success and failure semantics mirror `login`.
    pub async fn register(&self, account: &NewAccount) -> Result<RegisterResponse> {
        if account.username.trim().is_empty()
            || account.email.trim().is_empty()
            || account.password.is_empty()
        {
            return Err(GatewayError::validation(
                "username, email and password are required",
            ));
        }
        self.post_json(BackendTarget::Auth, "/register", account)
            .await
    }

    /// Notifies the auth service that the session is ending.
    ///
    /// The locally held token is discarded whatever the network outcome,
    /// so a dead auth service cannot pin a stale session.
    pub async fn logout(&self) -> Result<MessageResponse> {
        let outcome = self
            .post_json(BackendTarget::Auth, "/logout", &serde_json::json!({}))
            .await;
        self.session().clear().await;
        outcome
    }

    /// Asks the auth service whether the held token is still valid.
    pub async fn verify_session(&self) -> Result<SessionCheck> {
        self.get_json(BackendTarget::Auth, "/verify", &[]).await
    }
}
